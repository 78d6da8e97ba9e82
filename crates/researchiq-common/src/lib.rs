//! researchiq-common: Shared types, errors, and the outbound HTTP client used
//! across all ResearchIQ crates.

pub mod error;
pub mod entities;
pub mod sandbox;

// Re-export commonly used types
pub use entities::PaperRecord;
pub use error::{ResearchIqError, Result};
pub use sandbox::SandboxClient;
