pub mod context;
pub use context::*;

pub mod quad_key;
pub use quad_key::*;

pub mod types;
pub use types::*;
