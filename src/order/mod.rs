// src/order/mod.rs

//! Deterministic ordering of task directories and task files.

pub mod natural;

pub use natural::{NaturalKey, Segment, natural_cmp, natural_key, sort_natural_by};
