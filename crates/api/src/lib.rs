//! The HTTP surface of the bar: axum routes, the PIN gate, and process
//! configuration. Domain logic stays in the domain crates; handlers load
//! state, call one operation, and write the result back.

pub mod app;
pub mod auth;
pub mod config;
