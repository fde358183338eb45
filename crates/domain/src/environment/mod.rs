//! Environment and variable domain types

mod variable;

pub use variable::{
    CollectionVariables, Environment, EnvironmentEntry, EnvironmentVariables, Variable,
};
