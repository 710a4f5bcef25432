mod moderation_handler;
mod report_handler;

pub use moderation_handler::*;
pub use report_handler::*;
