// uastats - app/mod.rs
//
// Application layer: run configuration, orchestration, text rendering.
// Dependencies: core, platform, util.

pub mod config;
pub mod pipeline;
pub mod render;
