//! sr-core: stable foundation for skyrate.
//!
//! Contains:
//! - units (uom aliases + US customary batch constructors)
//! - numeric (Real + tolerances + float helpers)
//! - batch (fixed-length per-node value vectors)
//! - ids (compact IDs for blocks and signals)
//! - error (shared error types)

pub mod batch;
pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use batch::NodeBatch;
pub use error::{DomainError, SrError, SrResult};
pub use ids::*;
pub use numeric::*;
