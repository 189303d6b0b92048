//! Record identifiers.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// Length of an identifier in bytes.
const ID_BYTES: usize = 12;

static COUNTER: AtomicU32 = AtomicU32::new(0);

/// The store's native object identifier.
///
/// Twelve bytes, written externally as 24 hexadecimal characters. The layout
/// matches a MongoDB ObjectId so identifiers minted by the in-memory backend
/// are interchangeable with ones assigned by a real database.
///
/// # Example
///
/// ```
/// use matdb_persistence::types::RecordId;
///
/// let id = RecordId::parse("671E1961AB159A6F6AC9FDDB").unwrap();
/// assert_eq!(id.to_string(), "671e1961ab159a6f6ac9fddb");
/// assert!(RecordId::parse("not-an-id").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId([u8; ID_BYTES]);

impl RecordId {
    /// Parses an identifier from its hexadecimal form.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        if value.len() != ID_BYTES * 2 {
            return Err(ValidationError::InvalidIdentifier {
                value: value.to_string(),
                message: format!(
                    "expected {} hexadecimal characters, got {}",
                    ID_BYTES * 2,
                    value.len()
                ),
            });
        }

        let mut bytes = [0u8; ID_BYTES];
        hex::decode_to_slice(value, &mut bytes).map_err(|e| {
            ValidationError::InvalidIdentifier {
                value: value.to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(Self(bytes))
    }

    /// Mints a fresh identifier: 4 bytes of unix time, 5 random bytes and a
    /// 3-byte process-wide counter.
    pub fn generate() -> Self {
        let mut bytes = [0u8; ID_BYTES];

        let seconds = chrono::Utc::now().timestamp().clamp(0, u32::MAX as i64) as u32;
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        rand::thread_rng().fill(&mut bytes[4..9]);

        let count = COUNTER.fetch_add(1, Ordering::Relaxed) & 0x00ff_ffff;
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);

        Self(bytes)
    }

    /// Creates an identifier from raw bytes.
    pub fn from_bytes(bytes: [u8; ID_BYTES]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    pub fn bytes(&self) -> [u8; ID_BYTES] {
        self.0
    }

    /// Returns the lowercase hexadecimal form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for RecordId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}
