// LogLens - app/mod.rs
//
// Application layer: filter toolbar state machine, debouncing, state
// management, session persistence.
// Dependencies: core and platform layers.
// Must NOT depend on: ui.

pub mod debounce;
pub mod session;
pub mod state;
pub mod toolbar;
