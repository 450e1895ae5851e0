use std::fmt;

/// Attribute name that carries a token in the output document.
pub const TOKEN_ATTRIBUTE: &str = "tid";

/// Per-field unique identifier, scoped to one worksheet pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub scope_key: String,
    pub sequence: u64,
}

impl Token {
    pub fn new(scope_key: impl Into<String>, sequence: u64) -> Self {
        Self {
            scope_key: scope_key.into(),
            sequence,
        }
    }

    /// The `tid` attribute fragment for this token.
    pub fn attribute(&self) -> (&'static str, String) {
        (TOKEN_ATTRIBUTE, self.to_string())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.scope_key, self.sequence)
    }
}

/// Normalize a shelfmark into a token scope key.
///
/// `/`, space, `-` and `,` all become `_`; nothing else changes.
pub fn normalize_shelfmark(shelfmark: &str) -> String {
    shelfmark
        .chars()
        .map(|ch| match ch {
            '/' | ' ' | '-' | ',' => '_',
            other => other,
        })
        .collect()
}
