pub mod diagnostic;
pub mod metadata;
pub mod position;
pub mod symbol;
pub mod syntax;

pub use diagnostic::*;
pub use metadata::*;
pub use position::*;
pub use symbol::*;
pub use syntax::*;
