//! Domain layer
//!
//! Contains pure business logic with no framework dependencies.
//! - `entities`: Domain models representing core business concepts
//! - `ports`: Trait definitions for external dependencies

pub mod entities;
pub mod ports;
