//! Lookup request pipeline.
//!
//! # Data Flow
//! ```text
//! form field `input` (body first, then query string)
//!     → request.rs (length check, 1..=13 chars)
//!     → dispatch.rs (load words, run anagram / match)
//!     → envelope.rs ({success, result} + status)
//! ```
//!
//! Validation always completes before any word data is loaded.

pub mod dispatch;
pub mod envelope;
pub mod request;

pub use dispatch::{dispatch, resolve, Operation};
pub use envelope::{LookupResponse, LookupResult, Payload};
pub use request::{first_value, LookupInput, LookupRequest, INPUT_FIELD, MAX_INPUT_CHARS};
