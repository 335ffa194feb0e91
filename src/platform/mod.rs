// LogLens - platform/mod.rs
//
// Platform abstraction layer: directories, config files, request-log exports.
// Must NOT depend on: ui.

pub mod config;
pub mod entries;
