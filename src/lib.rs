//! Session ledger and reconciliation for live poker clubs.
//!
//! Tracks buy-ins and cash-outs per player per session, and derives
//! profit/loss (in currency and big blinds), play time, and participation
//! status from that append-only event log.
//!
//! ## Modules
//!
//! - [`club`] — Roster players, clubs, and the club access check
//! - [`session`] — Session records and the [`Ledger`](session::Ledger) of events
//! - [`reconcile`] — Side-effect-free summaries over ledger state
//! - [`store`] — External persistent-store collaborator
//! - [`desk`] — Mutation entry points that validate, mutate, and persist
pub mod club;
pub mod confirm;
pub mod desk;
pub mod error;
pub mod format;
pub mod reconcile;
pub mod session;
pub mod store;

#[cfg(feature = "server")]
pub mod hosting;

pub use error::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Currency amounts (buy-ins, stacks, settlements).
pub type Money = f64;
/// Wall-clock timestamps in milliseconds since the Unix epoch.
pub type Millis = i64;

// ============================================================================
// CONSTANTS
// ============================================================================
/// Tolerance when deciding whether a settled cash-out differs from its stack value.
pub const EPSILON: Money = 1e-4;
/// Currency symbol used by every money display.
pub const CURRENCY: &str = "₪";
/// Typed confirmation required before every cash-out in a session is reset.
pub const DELETE_ALL: &str = "DELETE ALL";
/// Club name shown when a session references an unknown club.
pub const UNKNOWN_CLUB: &str = "Unknown Club";

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing.
pub trait Arbitrary {
    fn random() -> Self;
}

/// Unique identifier trait for domain entities.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Opaque key with compile-time type safety.
///
/// Keys written by other clients (e.g. realtime-database push ids) are kept
/// verbatim; keys minted here are UUIDv7 strings so they sort by creation.
pub struct ID<T> {
    inner: String,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn as_str(&self) -> &str {
        &self.inner
    }
    pub fn is_empty(&self) -> bool {
        self.inner.trim().is_empty()
    }
    /// Cast ID<T> to ID<U> while preserving the underlying key.
    pub fn cast<U>(self) -> ID<U> {
        ID {
            inner: self.inner,
            marker: PhantomData,
        }
    }
}

impl<T> From<&str> for ID<T> {
    fn from(inner: &str) -> Self {
        Self::from(inner.to_string())
    }
}
impl<T> From<String> for ID<T> {
    fn from(inner: String) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}
impl<T> From<ID<T>> for String {
    fn from(id: ID<T>) -> Self {
        id.inner
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self::from(uuid::Uuid::now_v7().to_string())
    }
}

impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        Self::from(self.inner.clone())
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl<T> serde::Serialize for ID<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.inner)
    }
}
impl<'de, T> serde::Deserialize<'de> for ID<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::from)
    }
}

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Current wall-clock time in milliseconds.
pub fn now() -> Millis {
    chrono::Utc::now().timestamp_millis()
}

/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", now() / 1000)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker;

    #[test]
    fn minted_ids_are_distinct_and_nonempty() {
        let a = ID::<Marker>::default();
        let b = ID::<Marker>::default();
        assert!(!a.is_empty());
        assert_ne!(a, b);
    }

    #[test]
    fn blank_ids_are_empty() {
        assert!(ID::<Marker>::from("").is_empty());
        assert!(ID::<Marker>::from("  ").is_empty());
        assert!(!ID::<Marker>::from("-Nx3").is_empty());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = ID::<Marker>::from("-Nx3");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"-Nx3\"");
        let back = serde_json::from_str::<ID<Marker>>(&json).unwrap();
        assert_eq!(back, id);
    }
}
