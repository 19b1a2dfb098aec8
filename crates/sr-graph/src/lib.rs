//! sr-graph: block/port wiring layer for skyrate.
//!
//! Provides:
//! - The `Block` trait implemented by every rate component
//! - Port binding tables (internal port name -> external signal name)
//! - Incremental wiring builder with validation and a fixed evaluation order
//! - Batched evaluation with forward-mode total derivatives
//!
//! # Example
//!
//! ```
//! use sr_core::{DomainError, Real};
//! use sr_graph::{BindingTable, Block, Partials, WiringBuilder};
//!
//! struct Double;
//!
//! impl Block for Double {
//!     fn kind(&self) -> &'static str { "Double" }
//!     fn inputs(&self) -> &[&'static str] { &["x"] }
//!     fn outputs(&self) -> &[&'static str] { &["y"] }
//!     fn compute(&self, inputs: &[&[Real]], outputs: &mut [Vec<Real>]) -> Result<(), DomainError> {
//!         for (y, x) in outputs[0].iter_mut().zip(inputs[0]) {
//!             *y = 2.0 * x;
//!         }
//!         Ok(())
//!     }
//!     fn compute_partials(&self, _inputs: &[&[Real]], partials: &mut Partials) -> Result<(), DomainError> {
//!         partials.fill(0, 0, |_| 2.0);
//!         Ok(())
//!     }
//! }
//!
//! let mut builder = WiringBuilder::new();
//! builder.add_input("a");
//! builder.add_block("first", Double, BindingTable::new().bind("x", "a").bind("y", "b"));
//! builder.add_block("second", Double, BindingTable::new().bind("x", "b").bind("y", "c"));
//! let graph = builder.build().unwrap();
//!
//! let eval = graph.evaluate(&[&[1.0, 3.0]]).unwrap();
//! let c = graph.signal_id("c").unwrap();
//! assert_eq!(eval.value(c).as_slice(), &[4.0, 12.0]);
//! assert_eq!(eval.derivative(c, 0).unwrap().as_slice(), &[4.0, 4.0]);
//! ```

pub mod binding;
pub mod block;
pub mod builder;
pub mod error;
pub mod eval;
pub mod graph;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use binding::BindingTable;
pub use block::{Block, Partials};
pub use builder::WiringBuilder;
pub use error::{EvalError, GraphError};
pub use eval::Evaluation;
pub use graph::{BlockGraph, BlockNode, SignalInfo};
