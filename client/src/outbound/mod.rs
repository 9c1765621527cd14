//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern, providing concrete
//! implementations of domain port traits:
//!
//! - **http**: reqwest-backed REST transport against the gym API
//! - **file_store**: cap-std backed key-value store for the session cache
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod file_store;
pub mod http;

pub use self::file_store::DirKeyValueStore;
pub use self::http::RestTransport;
