// uastats - platform/mod.rs
//
// Platform abstraction layer: filesystem access.
// Must NOT depend on: core or app.

pub mod fs;
