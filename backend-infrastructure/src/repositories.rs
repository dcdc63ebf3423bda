pub mod sheets_log;

pub use sheets_log::*;
