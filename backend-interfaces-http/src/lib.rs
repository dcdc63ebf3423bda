pub mod bot;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use bot::BotState;
pub use error::*;
pub use middleware::*;
pub use routes::*;
