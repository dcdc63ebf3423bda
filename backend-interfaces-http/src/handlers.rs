pub mod ops_handlers;
pub mod webhook_handlers;

pub use ops_handlers::*;
pub use webhook_handlers::*;
