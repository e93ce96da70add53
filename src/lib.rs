//! PipScope - transitive pip dependency explorer with PlantUML rendering
//!
//! This crate walks the declared dependencies of an installed Python
//! package, collects the discovered relations as an ordered edge list, and
//! renders them as a PlantUML script for an external diagram renderer.

pub mod export;
pub mod graph;
pub mod source;
pub mod visualize;
