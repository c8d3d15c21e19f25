//! Identifier generation port

/// Source of fresh transaction identifiers
pub trait IdGenerator: Send + Sync {
    /// Produce a new identifier; callers assume it has not been handed out before
    fn generate_id(&self) -> String;
}
