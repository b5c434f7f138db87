use thiserror::Error;

/// Validation failures raised by the feedback controller before any backend
/// call is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeedbackError {
    /// The displayed record lacks a query or response identifier, so there
    /// is nothing to attach the rating to.
    #[error("Query ID or Response ID is missing.")]
    MissingIdentifier,
}
