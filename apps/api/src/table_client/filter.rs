use std::fmt;

/// Equality predicate for a remote list-read (`GET base?where=...`).
///
/// The value is user input, so it is only ever rendered as a quoted literal
/// with embedded single quotes doubled. Field names are compile-time constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    field: &'static str,
    value: String,
}

impl Filter {
    pub fn eq(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    /// Renders the predicate in the remote store's `where` syntax, e.g. `email='a@b.co'`.
    pub fn to_where_clause(&self) -> String {
        format!("{}='{}'", self.field, escape_literal(&self.value))
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_where_clause())
    }
}

// Read by the in-memory table.
#[cfg(test)]
impl Filter {
    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}
