// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod config;
pub mod content;
pub mod runtime;
pub mod session;
pub mod theme;
