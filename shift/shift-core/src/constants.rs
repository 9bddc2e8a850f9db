//! Constants - TigerStyle named limits
//!
//! Every limit has units in its name, and every default lives here.

// =============================================================================
// Feed
// =============================================================================

/// Default number of posts in a feed page.
pub const FEED_LIMIT_DEFAULT: usize = 50;

/// Upper bound on a single feed page.
pub const FEED_LIMIT_MAX: usize = 1000;

/// Display name used when a post or comment author cannot be found.
pub const AUTHOR_NAME_UNKNOWN: &str = "Unknown";

// =============================================================================
// Identifiers
// =============================================================================

/// Raw size of an ObjectId (4 timestamp + 5 random + 3 counter bytes).
pub const OBJECT_ID_BYTES: usize = 12;

/// Length of an ObjectId rendered as lowercase hex.
pub const OBJECT_ID_HEX_CHARS: usize = OBJECT_ID_BYTES * 2;

// =============================================================================
// Namespaces
// =============================================================================

/// Default logical namespace (schema / keyspace) for both stores.
pub const NAMESPACE_DEFAULT: &str = "blog";

/// Maximum namespace length in bytes (Postgres identifier limit).
pub const NAMESPACE_BYTES_MAX: usize = 63;

/// Endpoint scheme selecting the in-memory store.
pub const ENDPOINT_MEMORY: &str = "memory://";

// =============================================================================
// Postgres
// =============================================================================

/// Connections per store pool.
pub const POSTGRES_POOL_CONNECTIONS_MAX: u32 = 10;

/// Fractional-second digits kept by `TIMESTAMPTZ` (microseconds).
pub const TIMESTAMP_SUBSEC_DIGITS: u16 = 6;

// =============================================================================
// DST
// =============================================================================

/// Environment variable holding the simulation seed.
pub const DST_SEED_ENV: &str = "DST_SEED";

/// Largest single clock advance allowed in simulation.
pub const DST_TIME_ADVANCE_MS_MAX: u64 = 86_400_000;

/// Milliseconds per second.
pub const TIME_MS_PER_SEC: u64 = 1000;
