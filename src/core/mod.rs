// uastats - core/mod.rs
//
// Core business logic layer: parsing, classification, aggregation, export.
// Must NOT depend on: app or platform.

pub mod classify;
pub mod export;
pub mod model;
pub mod parser;
pub mod stats;
