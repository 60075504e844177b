//! Core library-wide error structures.

pub mod error;

pub use error::ValuationError;
