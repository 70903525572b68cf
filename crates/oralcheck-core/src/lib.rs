//! oralcheck-core
//!
//! Pure domain types and S3 key conventions.
//! No AWS SDK dependency. This is the shared vocabulary of the oralcheck system.

pub mod error;
pub mod models;
pub mod s3_keys;
