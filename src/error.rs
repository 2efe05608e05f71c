//! Error types for league scheduling and standings.

/// Result type for league operations
pub type LeagueResult<T> = Result<T, LeagueError>;

/// Error type for league operations.
///
/// `MalformedMatrixEntry` and `InconsistentScore` are recovered where they
/// occur and only show up as diagnostics; the other kinds are returned as `Err`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeagueError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Malformed matchup entry for {row} vs {column}: {value:?} (counted as 0)")]
    MalformedMatrixEntry {
        row: String,
        column: String,
        value: String,
    },

    #[error("Unknown team {team:?} in week {week}, game {game}")]
    UnknownTeamInResults { team: String, week: usize, game: usize },

    #[error("Team {team:?} appears on both sides in week {week}, game {game}")]
    SelfPairing { team: String, week: usize, game: usize },

    #[error("Inconsistent score in week {week}, game {game} ({home} vs {away}) ignored")]
    InconsistentScore {
        week: usize,
        game: usize,
        home: String,
        away: String,
    },

    #[error("Invalid league configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for LeagueError {
    fn from(e: serde_json::Error) -> Self {
        LeagueError::InvalidConfig(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_locate_record() {
        let err = LeagueError::UnknownTeamInResults {
            team: "Hermes".to_string(),
            week: 3,
            game: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("Hermes"));
        assert!(msg.contains("week 3"));
        assert!(msg.contains("game 2"));
    }

    #[test]
    fn test_json_error_converts() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: LeagueError = parse_err.into();
        assert!(matches!(err, LeagueError::InvalidConfig(_)));
    }
}
