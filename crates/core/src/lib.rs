pub mod config;
pub mod cursor;
pub mod error;
pub mod logging;
pub mod paths;
pub mod request;
pub mod resolver;

pub use config::{Config, LoggingConfig, ResolverConfig};
pub use cursor::{BatchCursor, Cursor, DefinitionMonikersCursor, SameDumpCursor};
pub use error::{CodeNavError, Result};
pub use request::CursorRequest;
pub use resolver::{CodeNavApi, ReferencesPage};
