// LogLens - ui/panels/mod.rs

pub mod filters;
pub mod requests;
pub mod status_bar;
