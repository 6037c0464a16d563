pub mod index_cache;

pub use index_cache::{CACHE_FILE_NAME, IndexCache};
