//! Adapters layer: Concrete implementations of ports.
//!
//! - `linear`: exported linear classifier loaded from the model artifact

pub mod linear;

// Re-export artifact error for lib.rs
pub use linear::ArtifactError;
