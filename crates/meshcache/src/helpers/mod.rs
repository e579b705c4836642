pub mod cancel;
pub use cancel::*;

pub mod errors;
pub use errors::*;

pub mod logging;
pub use logging::*;
