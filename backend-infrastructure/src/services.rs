pub mod chart_service;
pub mod telegram_responder;

pub use chart_service::*;
pub use telegram_responder::*;
