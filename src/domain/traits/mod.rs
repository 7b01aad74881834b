mod audit;
mod bot;

pub use audit::AuditPublisher;
pub use bot::{Bot, BotInfo, KeyboardButton};
