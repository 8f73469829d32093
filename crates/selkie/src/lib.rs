#![forbid(unsafe_code)]

//! Vector path geometry + conditional style resolution (headless).
//!
//! Design goals:
//! - faithful AVG/SVG path-data semantics (compiled command/point form, analytic
//!   tight bounds with Bezier extrema and arc expansion)
//! - deterministic, testable outputs; malformed input degrades to empty results,
//!   never panics or errors across the public boundary
//! - single-threaded, synchronous, allocation-light; no I/O anywhere in the core
//!
//! The two halves are independent: [`path`] turns externally-authored path-data
//! strings into [`CompiledPath`] values and computes their bounds, and [`style`]
//! resolves state-conditional property blocks with a per-[`State`] cache.

pub mod error;
pub mod geom;
pub mod path;
pub mod state;
pub mod style;

pub use error::{Error, Result};
pub use path::bounds::{bounds, bounds_with_transform};
pub use path::parser::parse;
pub use path::{CompiledPath, PathOp, Shape};
pub use state::{State, StateFlag};
pub use style::{BasicEvaluator, Context, Evaluator, StyleDefinition, StyleInstance};

#[cfg(test)]
mod tests;
