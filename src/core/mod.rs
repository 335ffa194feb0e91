// LogLens - core/mod.rs
//
// Core business logic layer.
// Dependencies: chrono, chrono-tz, serde, tracing.
// Must NOT depend on: ui, platform, app, or any I/O.

pub mod clock;
pub mod filter;
pub mod model;
pub mod preset;
pub mod timezone;
pub mod translate;
