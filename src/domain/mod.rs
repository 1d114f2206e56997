//! Domain types

pub mod swaps;
