//! CLI argument parsing with clap.

use std::path::PathBuf;

use clap::Parser;

use crate::bot::TransformMode;
use crate::mosaic::Palette;

/// Default port the webhook server listens on.
pub const DEFAULT_PORT: u16 = 5000;

/// Telegram webhook that turns photos into emoji mosaics
#[derive(Parser, Debug, Clone)]
#[command(name = "emoji-mosaic")]
#[command(version, about = "Telegram webhook that turns photos into emoji mosaics", long_about = None)]
#[command(after_help = "ENVIRONMENT:
    BOT_TOKEN      Telegram bot token (required)
    WEBHOOK_PATH   Path the webhook is served on (default: the bot token)
    PORT           Port to listen on (default: 5000)
    RUST_LOG       Log filter, overrides --log-level")]
pub struct Args {
    /// Port to listen on
    #[arg(long, short, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Image transform applied to uploaded photos
    #[arg(long, short)]
    pub mode: Option<TransformMode>,

    /// Mosaic palette
    #[arg(long)]
    pub palette: Option<Palette>,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
