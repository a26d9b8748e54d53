//! Common types, protocol definitions, and errors shared across `crypto-api` crates.

pub mod error;
pub mod protocol;

pub use error::ServiceError;
