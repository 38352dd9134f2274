//! Ridge and river terrain generation library
//!
//! Re-exports modules for use by binaries and tools.

pub mod config;
pub mod deposit;
pub mod error;
pub mod export;
pub mod heightfield;
pub mod mesh;
pub mod mountains;
pub mod rivers;
pub mod seeds;
pub mod world;

pub use config::{SeedMode, WorldConfig};
pub use error::{ConfigError, FieldError, TerrainError};
pub use heightfield::HeightField;
pub use world::{generate, generate_world, GeneratedWorld};
