//! Configuration errors reported once, at table construction.

use thiserror::Error;

/// Invalid table configuration.
///
/// Fatal to the table instance being constructed, never to the host
/// application. Runtime intents never produce these: out-of-range pages are
/// clamped and malformed intents are logged no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Two columns share the same id.
    #[error("duplicate column id: {id}")]
    DuplicateColumn { id: String },

    /// The configured search column does not match any column id.
    #[error("unknown search column: {id}")]
    UnknownSearchColumn { id: String },
}
