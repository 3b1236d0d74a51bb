//! Advent of Code 2025 solutions
//!
//! Every day derives `AutoRegister`, so linking this crate is enough for a
//! binary to find them through `RegistryBuilder::register_all_plugins`.

pub mod year_2025;
