//! UUID adapter for IdGenerator

use uuid::Uuid;

use crate::domain::ports::IdGenerator;

/// Random (v4) UUID identifiers
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn generate_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
