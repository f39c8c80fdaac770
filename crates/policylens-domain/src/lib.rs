//! PolicyLens Domain Layer
//!
//! This crate contains the domain model for PolicyLens, the access-control
//! policy classifier. It has ZERO external dependencies and defines the
//! value objects and trait interfaces that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Classification**: The two-valued verdict, `Weak` or `Strong`
//! - **ClassificationResult**: A verdict plus a bounded, trimmed reason
//! - **TextGenerator**: The model call, as seen by the core
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure value types only
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod label;
pub mod result;
pub mod traits;

// Re-exports for convenience
pub use label::Classification;
pub use result::{
    word_count, ClassificationResult, ReasonViolation, REASON_MAX_CHARS, REASON_MAX_WORDS,
    REASON_MIN_CHARS,
};
pub use traits::TextGenerator;
