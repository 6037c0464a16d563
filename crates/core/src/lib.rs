pub mod analysis;
pub mod cache;
pub mod document;
pub mod error;
pub mod external;
pub mod index;
pub mod logging;
pub mod util;

pub use cache::IndexCache;
pub use document::DocumentState;
pub use error::{Result, StormscopeError};
pub use external::{CommandParser, load_model_dump};
pub use index::{IndexHandle, IndexSnapshot, IndexSource};

use std::path::PathBuf;

pub const DEFAULT_HOME_DIR: &str = ".stormscope";

/// Base directory for the cache and logs, supporting the STORMSCOPE_HOME env var.
pub fn home_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("STORMSCOPE_HOME") {
        return PathBuf::from(dir);
    }

    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_HOME_DIR)
}
