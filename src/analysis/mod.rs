//! Delineation result types

pub mod metadata;
pub mod result;
