//! Query Services
//!
//! The resolution layer on top of the store:
//!
//! - [`ConnectionService`] - the public entry point resolving paginated,
//!   filtered, sorted connections
//! - [`filter`] - recursive filter predicate translation
//! - [`pagination`] - window arithmetic and page metadata
//!
//! Services coordinate the schema boundary and the store's chain API; they
//! hold no per-call state and may be shared across concurrent callers.

pub mod connection_service;
pub mod error;
pub mod filter;
pub mod pagination;

pub use connection_service::ConnectionService;
pub use error::ConnectionError;
pub use pagination::PageWindow;
