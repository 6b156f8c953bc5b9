//! Routes each update to a text reply or an image transform.

use std::fmt;

use clap::ValueEnum;
use serde::Deserialize;

use super::command::{Command, TickColor};
use crate::mosaic::{MosaicError, MosaicPipeline, MosaicSettings};
use crate::telegram::{ParseMode, TelegramClient, TelegramError, Update};
use crate::thumbnail::{self, ThumbnailSettings, THUMBNAIL_CONTENT_TYPE, THUMBNAIL_FILE_NAME};

/// Reply to `/start`.
pub const WELCOME_MESSAGE: &str = "<b>Image ➝ Emoji Converter ✨</b>\n\n\
<i>Just send me an image and I’ll shrink it into emoji-style size!</i>";

/// Sent when an uploaded file is not a readable image.
pub const UNREADABLE_IMAGE_WARNING: &str =
    "⚠️ I couldn't read that image. Please send a JPG or PNG photo.";

/// Sent when the mosaic would not fit in a single message.
pub const MOSAIC_TOO_LARGE_WARNING: &str =
    "⚠️ That mosaic is too big to fit in one message. Try a smaller grid.";

/// Reply to `/verified`.
pub fn verified_message(color: TickColor) -> String {
    format!("This user is verified {}", color.badge())
}

/// What to do with uploaded images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TransformMode {
    /// Reply with an emoji mosaic as text
    #[default]
    Mosaic,
    /// Reply with a small PNG thumbnail
    Thumbnail,
}

impl fmt::Display for TransformMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformMode::Mosaic => f.write_str("mosaic"),
            TransformMode::Thumbnail => f.write_str("thumbnail"),
        }
    }
}

/// How a single update was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to answer
    Ignored,
    Welcome,
    Verified,
    Mosaic,
    Thumbnail,
    /// Image could not be decoded; the user was warned
    UnreadableImage,
    /// Mosaic exceeded the message size limit; the user was warned
    MosaicTooLarge,
    /// Image could not be fetched from Telegram
    DownloadFailed,
}

/// Handles one update at a time with no state between requests.
///
/// Never fails: transform errors become warning messages and send failures
/// are logged and dropped.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: TelegramClient,
    mode: TransformMode,
    mosaic: MosaicPipeline,
    thumbnail: ThumbnailSettings,
}

impl Dispatcher {
    pub fn new(
        client: TelegramClient,
        mode: TransformMode,
        mosaic: MosaicSettings,
        thumbnail: ThumbnailSettings,
    ) -> Self {
        Self {
            client,
            mode,
            mosaic: MosaicPipeline::new(mosaic),
            thumbnail,
        }
    }

    /// Parse a raw webhook body and handle it.
    ///
    /// Bodies that are not a valid update are ignored.
    pub async fn handle_payload(&self, body: &[u8]) -> Outcome {
        match serde_json::from_slice::<Update>(body) {
            Ok(update) => self.handle(&update).await,
            Err(e) => {
                log::debug!("Ignoring unparseable webhook body: {}", e);
                Outcome::Ignored
            }
        }
    }

    /// Handle a single update.
    pub async fn handle(&self, update: &Update) -> Outcome {
        let Some(message) = update.message() else {
            return Outcome::Ignored;
        };
        let Some(chat_id) = message.chat_id() else {
            return Outcome::Ignored;
        };

        let command = message
            .text
            .as_deref()
            .map(Command::parse)
            .unwrap_or(Command::None);

        match command {
            Command::Start => {
                self.reply(chat_id, WELCOME_MESSAGE, Some(ParseMode::Html), "welcome")
                    .await;
                Outcome::Welcome
            }
            Command::Verified(color) => {
                self.reply(
                    chat_id,
                    &verified_message(color),
                    Some(ParseMode::Html),
                    "verified badge",
                )
                .await;
                Outcome::Verified
            }
            Command::None => match message.image_file_id() {
                Some(file_id) => self.handle_image(chat_id, file_id).await,
                None => Outcome::Ignored,
            },
        }
    }

    async fn handle_image(&self, chat_id: i64, file_id: &str) -> Outcome {
        let bytes = match self.client.download_by_id(file_id).await {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Failed to download file {} for chat {}: {}", file_id, chat_id, e);
                return Outcome::DownloadFailed;
            }
        };
        log::info!(
            "Processing {} byte image for chat {} ({} mode)",
            bytes.len(),
            chat_id,
            self.mode
        );

        match self.mode {
            TransformMode::Mosaic => self.send_mosaic(chat_id, bytes).await,
            TransformMode::Thumbnail => self.send_thumbnail(chat_id, bytes).await,
        }
    }

    async fn send_mosaic(&self, chat_id: i64, bytes: Vec<u8>) -> Outcome {
        let pipeline = self.mosaic;
        let result = tokio::task::spawn_blocking(move || pipeline.run(&bytes)).await;

        match result {
            Ok(Ok(text)) => {
                self.reply(chat_id, &text, None, "mosaic").await;
                Outcome::Mosaic
            }
            Ok(Err(MosaicError::SizeExceeded { length, limit })) => {
                log::info!("Mosaic for chat {} too large ({} > {})", chat_id, length, limit);
                self.reply(chat_id, MOSAIC_TOO_LARGE_WARNING, None, "warning")
                    .await;
                Outcome::MosaicTooLarge
            }
            Ok(Err(e)) => {
                log::info!("Mosaic failed for chat {}: {}", chat_id, e);
                self.reply(chat_id, UNREADABLE_IMAGE_WARNING, None, "warning")
                    .await;
                Outcome::UnreadableImage
            }
            Err(e) => {
                log::error!("Mosaic task for chat {} did not complete: {}", chat_id, e);
                self.reply(chat_id, UNREADABLE_IMAGE_WARNING, None, "warning")
                    .await;
                Outcome::UnreadableImage
            }
        }
    }

    async fn send_thumbnail(&self, chat_id: i64, bytes: Vec<u8>) -> Outcome {
        let settings = self.thumbnail;
        let result =
            tokio::task::spawn_blocking(move || thumbnail::downscale_with(&bytes, &settings)).await;

        match result {
            Ok(Ok(png)) => {
                let sent = self
                    .client
                    .send_photo(chat_id, png, THUMBNAIL_FILE_NAME, THUMBNAIL_CONTENT_TYPE)
                    .await;
                log_delivery(sent, "thumbnail", chat_id);
                Outcome::Thumbnail
            }
            Ok(Err(e)) => {
                log::info!("Thumbnail failed for chat {}: {}", chat_id, e);
                self.reply(chat_id, UNREADABLE_IMAGE_WARNING, None, "warning")
                    .await;
                Outcome::UnreadableImage
            }
            Err(e) => {
                log::error!("Thumbnail task for chat {} did not complete: {}", chat_id, e);
                self.reply(chat_id, UNREADABLE_IMAGE_WARNING, None, "warning")
                    .await;
                Outcome::UnreadableImage
            }
        }
    }

    async fn reply(&self, chat_id: i64, text: &str, parse_mode: Option<ParseMode>, what: &str) {
        let sent = self.client.send_message(chat_id, text, parse_mode).await;
        log_delivery(sent, what, chat_id);
    }
}

/// Best-effort delivery: failures are logged, never propagated.
fn log_delivery(result: Result<(), TelegramError>, what: &str, chat_id: i64) {
    match result {
        Ok(()) => log::debug!("Delivered {} to chat {}", what, chat_id),
        Err(e) => log::warn!("Failed to send {} to chat {}: {}", what, chat_id, e),
    }
}
