//! Scene collection documents: typed model and on-disk persistence.

/// Reading and writing collection files.
pub mod io;
/// Serde model of a scene collection.
pub mod model;
