// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod clock;
pub mod config;
pub mod error;
pub mod game;
pub mod runtime;
pub mod solutions;
pub mod ui;
pub mod view;
