pub use error::{CustomError, ErrorKind};

/// Main architecture layers (dependency flow: CLI → API → Schema)
pub mod api; // Backend API client: transport, resources, pipeline
pub mod cli; // Command-line interface
pub mod core; // Result combinators
pub mod schema; // Validation capability and input schemas
pub mod storage; // Configuration profiles and API key

/// Support modules (used across layers)
pub mod error; // Error taxonomy
pub mod utils; // Validation adapter, retry, logging

pub type Result<T> = std::result::Result<T, CustomError>;
