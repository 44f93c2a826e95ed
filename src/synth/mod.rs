//! Scene synthesis: clone template scenes into a run-of-show.
//!
//! Synthesis is a pure, in-memory transformation. It borrows the template collection, never
//! mutates it, and returns a new collection with the generated scenes and browser sources
//! appended. Loading inputs and persisting the result are the caller's job.

/// Run-list to scene collection transformation.
pub mod engine;
pub(crate) mod index;
