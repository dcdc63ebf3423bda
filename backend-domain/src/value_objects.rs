pub mod activity_kind;
pub mod period;

pub use activity_kind::*;
pub use period::*;
