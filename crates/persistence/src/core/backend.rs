//! Backend identification.

use std::fmt;
use std::str::FromStr;

/// Identifies the type of store backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// In-process store (tests, development, seeded demos).
    Memory,
    /// MongoDB (document store).
    MongoDB,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Memory => write!(f, "memory"),
            BackendKind::MongoDB => write!(f, "mongodb"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" => Ok(BackendKind::Memory),
            "mongodb" | "mongo" => Ok(BackendKind::MongoDB),
            other => Err(format!(
                "unknown storage backend '{}', expected 'memory' or 'mongodb'",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trip() {
        for kind in [BackendKind::Memory, BackendKind::MongoDB] {
            assert_eq!(kind.to_string().parse::<BackendKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("Mongo".parse::<BackendKind>().unwrap(), BackendKind::MongoDB);
        assert!("sqlite".parse::<BackendKind>().is_err());
    }
}
