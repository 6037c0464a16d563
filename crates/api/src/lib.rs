pub mod error;
pub mod models;
pub mod parser;
pub mod runtime;

// Re-export commonly used types
pub use error::{ApiError, ApiResult};
pub use models::*;
pub use parser::{QueryParser, SyntaxError};
pub use runtime::{ModelDump, RuntimeModel};
