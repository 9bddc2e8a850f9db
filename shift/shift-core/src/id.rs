//! Identifier schemes
//!
//! TigerStyle: Each store owns its identifier format. Identifiers from one
//! scheme are never meaningful in the other, even when the text collides.
//!
//! - `ObjectId`: 12 bytes rendered as 24 lowercase hex characters
//!   (4-byte big-endian seconds, 5 random bytes, 3-byte counter).
//! - `Uuid`: random v4 UUID in hyphenated form.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::constants::{OBJECT_ID_BYTES, OBJECT_ID_HEX_CHARS};
use crate::dst::DeterministicRng;

/// Counter portion of generated ObjectIds. Only the low 24 bits are used.
static OBJECT_ID_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Native identifier format of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdScheme {
    /// Document-store object identifiers.
    ObjectId,
    /// Random UUIDs.
    Uuid,
}

impl IdScheme {
    /// Short name for logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ObjectId => "object_id",
            Self::Uuid => "uuid",
        }
    }

    /// Generate a new native identifier.
    ///
    /// `rng` makes generation reproducible in simulation; without it the
    /// thread RNG is used.
    #[must_use]
    pub fn generate(&self, now: DateTime<Utc>, rng: Option<&DeterministicRng>) -> String {
        let id = match self {
            Self::ObjectId => {
                let mut bytes = [0u8; OBJECT_ID_BYTES];
                let secs = u32::try_from(now.timestamp().max(0)).unwrap_or(u32::MAX);
                bytes[..4].copy_from_slice(&secs.to_be_bytes());
                fill_random(&mut bytes[4..9], rng);
                let counter = OBJECT_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
                bytes[9..].copy_from_slice(&counter.to_be_bytes()[1..]);
                to_hex(&bytes)
            }
            Self::Uuid => {
                let mut bytes = [0u8; 16];
                fill_random(&mut bytes, rng);
                uuid::Builder::from_random_bytes(bytes)
                    .into_uuid()
                    .hyphenated()
                    .to_string()
            }
        };

        // Postcondition
        debug_assert!(self.parse(&id).is_some(), "generated id must parse");
        id
    }

    /// Parse a candidate identifier into canonical form.
    ///
    /// Returns `None` for anything not in this scheme's format; callers treat
    /// that exactly like an unknown identifier.
    #[must_use]
    pub fn parse(&self, candidate: &str) -> Option<String> {
        match self {
            Self::ObjectId => {
                let valid = candidate.len() == OBJECT_ID_HEX_CHARS
                    && candidate.bytes().all(|b| b.is_ascii_hexdigit());
                valid.then(|| candidate.to_ascii_lowercase())
            }
            Self::Uuid => Uuid::parse_str(candidate)
                .ok()
                .map(|u| u.hyphenated().to_string()),
        }
    }
}

impl std::fmt::Display for IdScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn fill_random(dest: &mut [u8], rng: Option<&DeterministicRng>) {
    match rng {
        Some(rng) => rng.fill_bytes(dest),
        None => rand::RngCore::fill_bytes(&mut rand::thread_rng(), dest),
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}
