//! oralcheck-storage
//!
//! S3-backed persistence for patients and their clinical records. Every record
//! is one JSON object; keys come from `oralcheck_core::s3_keys`.

pub mod client;
pub mod error;
pub mod objects;
pub mod records;
