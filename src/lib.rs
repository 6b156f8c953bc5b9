//! emoji-mosaic library crate.
//!
//! Telegram webhook bot that answers `/start` and `/verified` and turns
//! uploaded photos into emoji mosaics or small PNG thumbnails.

pub mod bot;
pub mod cli;
pub mod config;
pub mod mosaic;
pub mod server;
pub mod telegram;
pub mod thumbnail;
