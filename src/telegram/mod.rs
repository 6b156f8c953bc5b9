//! Telegram Bot API integration.
//!
//! Inbound webhook payloads are parsed into [`Update`]; outbound calls go
//! through [`TelegramClient`]. All outbound calls return `Result` so the
//! caller decides what to do with failures.

mod client;
mod types;

pub use client::{TelegramClient, TelegramError, BOT_TOKEN_ENV, TELEGRAM_API_BASE_URL};
pub use types::{Chat, Document, File, Message, ParseMode, PhotoSize, Update};
