//! Core types shared by the seisarc archival and verification pipelines
//!
//! - `station`: canonical station codes parsed from raw processing-directory names
//! - `layout`: on-disk layout constants and file-category predicates
//! - `config`: the explicit set of root directories the pipelines operate on

pub mod config;
pub mod layout;
pub mod station;

pub use config::Roots;
pub use layout::Category;
pub use station::{StationCode, StationNameError};
