use thiserror::Error;

/// Structural ambiguities detected while building the graph.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("operator '{operator}' resolves to node key '{key}', which is already taken")]
    DuplicateOperator { key: String, operator: String },

    #[error("output #{index} of operator '{operator}' has neither an event name nor a non-zero hz")]
    UnidentifiedOutput { operator: String, index: usize },

    #[error("operator '{operator}' publishes '{key}' with descriptors that differ from an earlier producer")]
    ConflictingOutput { key: String, operator: String },
}
