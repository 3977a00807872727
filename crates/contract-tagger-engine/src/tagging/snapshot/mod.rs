//! # Snapshot Testing Support
//!
//! Utilities for testing the tagger via snapshot assertions and invariant checks.
//!
//! - **`normalize`**: converts a `ParsedDocument` to a stable, serializable `Snap`
//! - **`invariants`**: runtime checks for balance, span containment and the
//!   content round trip

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{Snap, normalize};
