//! Error type for database construction

use crate::types::EntityKind;

/// Errors raised while building the database
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Refusing to merge {kind} record with a zero key")]
    InvalidKey { kind: EntityKind },

    #[error(
        "Talent '{talent}' in tree '{tree}' declares {max_points} ranks but lists no spell IDs to infer from"
    )]
    MissingTalentSeed {
        tree: String,
        talent: String,
        max_points: i32,
    },

    #[error(
        "Talent '{talent}' in tree '{tree}' cannot infer {max_points} ranks from spell ID {seed}"
    )]
    TalentRankOverflow {
        tree: String,
        talent: String,
        seed: i32,
        max_points: i32,
    },

    #[error("Invalid deny pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type for database operations
pub type Result<T> = std::result::Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_culprit() {
        let err = DbError::InvalidKey {
            kind: EntityKind::Gem,
        };
        assert_eq!(err.to_string(), "Refusing to merge gem record with a zero key");

        let err = DbError::TalentRankOverflow {
            tree: "Fire".to_string(),
            talent: "ignite".to_string(),
            seed: i32::MAX,
            max_points: 3,
        };
        let message = err.to_string();
        assert!(message.contains("ignite"));
        assert!(message.contains("Fire"));
    }

    #[test]
    fn test_pattern_error_keeps_source() {
        use std::error::Error;

        let source = regex::Regex::new("(").unwrap_err();
        let err = DbError::InvalidPattern {
            pattern: "(".to_string(),
            source,
        };
        assert!(err.source().is_some());
    }
}
