pub mod dataset;
pub mod sampler;

// Re-export the main types for convenience
pub use dataset::ContentSet;
pub use sampler::{ContentKind, Sampler};
