//! Preferred-language tag for users.

use serde::{Deserialize, Serialize};

/// Language a user wants the application rendered in.
///
/// The backend stores a two-letter code (`fr` or `en`) and defaults to
/// French.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// French (backend default).
    #[default]
    Fr,
    /// English.
    En,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fr => f.write_str("fr"),
            Self::En => f.write_str("en"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_wire_values() {
        let json = serde_json::to_string(&Language::Fr).expect("serialize");
        assert_eq!(json, "\"fr\"");
        let back: Language = serde_json::from_str("\"en\"").expect("deserialize");
        assert_eq!(back, Language::En);
    }
}
