pub mod bundle;
pub mod error;
pub mod models;
pub mod store;

// Re-export commonly used types
pub use bundle::{BundleClient, BundleManagerClient};
pub use error::{ApiError, ApiResult};
pub use models::*;
pub use store::{CandidatePage, CandidateQuery, CandidateScope, DumpStore};
