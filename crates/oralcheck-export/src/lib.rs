//! oralcheck-export
//!
//! CSV and JSON exports, JSON import, summary statistics, and the printable
//! assessment report.

pub mod bundle;
pub mod csv;
pub mod error;
pub mod render;
pub mod stats;
