//! Variable resolution engine
//!
//! Resolves `{{variable}}` references against environment variables first,
//! then collection variables. Values that themselves contain placeholders are
//! resolved recursively up to [`MAX_RESOLUTION_DEPTH`].

use atlas_domain::{CollectionVariables, EnvironmentVariables};

use super::parser::{has_variables, parse_variables};

/// Depth at which nested resolution stops and returns its input unchanged.
///
/// Depths `0..MAX_RESOLUTION_DEPTH` substitute, so a self-referencing value
/// is expanded exactly `MAX_RESOLUTION_DEPTH` times.
pub const MAX_RESOLUTION_DEPTH: usize = 10;

/// The variable resolution engine.
///
/// Borrowed view over one collection's variables and its workspace's
/// environment; cheap to construct per collection.
#[derive(Debug, Clone, Copy)]
pub struct VariableResolver<'a> {
    collection: &'a CollectionVariables,
    environment: &'a EnvironmentVariables,
}

impl<'a> VariableResolver<'a> {
    /// Creates a resolver over the given variable sources.
    #[must_use]
    pub const fn new(
        collection: &'a CollectionVariables,
        environment: &'a EnvironmentVariables,
    ) -> Self {
        Self {
            collection,
            environment,
        }
    }

    /// Looks a variable up: environment first, then collection.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&'a str> {
        self.environment
            .get(name)
            .or_else(|| self.collection.lookup(name))
    }

    /// Resolves all placeholders in `input`.
    ///
    /// Unknown placeholders are left as written.
    #[must_use]
    pub fn resolve(&self, input: &str) -> String {
        self.resolve_at(input, 0)
    }

    /// Resolves `input` as if reached through `depth` nested substitutions.
    ///
    /// At or beyond [`MAX_RESOLUTION_DEPTH`] the input is returned as-is.
    #[must_use]
    pub fn resolve_at(&self, input: &str, depth: usize) -> String {
        if depth >= MAX_RESOLUTION_DEPTH {
            return input.to_string();
        }

        let references = parse_variables(input);
        if references.is_empty() {
            return input.to_string();
        }

        let mut result = String::with_capacity(input.len());
        let mut last_end = 0;

        for var_ref in &references {
            result.push_str(&input[last_end..var_ref.span.start]);

            match self.lookup(&var_ref.name) {
                Some(value) if has_variables(value) => {
                    result.push_str(&self.resolve_at(value, depth + 1));
                }
                Some(value) => result.push_str(value),
                None => result.push_str(&input[var_ref.span.clone()]),
            }

            last_end = var_ref.span.end;
        }

        result.push_str(&input[last_end..]);
        result
    }
}
