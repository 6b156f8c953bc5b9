//! TelegramClient - handles communication with the Telegram Bot API.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use super::types::{ApiResponse, File, GetFileRequest, ParseMode, SendMessageRequest};

/// The environment variable name for the bot token.
pub const BOT_TOKEN_ENV: &str = "BOT_TOKEN";

/// Default base URL for the Telegram Bot API.
pub const TELEGRAM_API_BASE_URL: &str = "https://api.telegram.org";

/// Default timeout for HTTP requests (10 seconds).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default connection timeout (5 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Longest slice of an unparseable response body kept in error messages.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Client for the Telegram Bot API.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    token: String,
    base_url: String,
    http_client: reqwest::Client,
}

impl TelegramClient {
    /// Create a client talking to the public Telegram API.
    ///
    /// # Errors
    ///
    /// Returns `TelegramError::MissingToken` if `token` is empty.
    pub fn new(token: String) -> Result<Self, TelegramError> {
        Self::with_base_url(token, TELEGRAM_API_BASE_URL.to_string())
    }

    /// Create a client with a custom base URL.
    ///
    /// Useful for testing against a mock server.
    pub fn with_base_url(token: String, base_url: String) -> Result<Self, TelegramError> {
        if token.is_empty() {
            return Err(TelegramError::MissingToken);
        }

        let http_client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a Bot API method, e.g. `{base}/bot{token}/sendMessage`.
    pub fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    /// Download URL for a `file_path` returned by `getFile`.
    pub fn file_url(&self, file_path: &str) -> String {
        format!("{}/file/bot{}/{}", self.base_url, self.token, file_path)
    }

    /// Send a text message.
    ///
    /// # Errors
    ///
    /// Returns `TelegramError::Http` if the request fails and
    /// `TelegramError::Api` if Telegram rejects it.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        parse_mode: Option<ParseMode>,
    ) -> Result<(), TelegramError> {
        let request = SendMessageRequest {
            chat_id,
            text,
            parse_mode,
        };

        let response = self
            .http_client
            .post(self.method_url("sendMessage"))
            .json(&request)
            .send()
            .await?;

        parse_response::<serde_json::Value>("sendMessage", response).await?;
        log::debug!("Sent message to chat {}", chat_id);
        Ok(())
    }

    /// Upload a photo from memory.
    pub async fn send_photo(
        &self,
        chat_id: i64,
        photo: Vec<u8>,
        file_name: &str,
        content_type: &str,
    ) -> Result<(), TelegramError> {
        let size = photo.len();
        let part = Part::bytes(photo)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let form = Form::new()
            .text("chat_id", chat_id.to_string())
            .part("photo", part);

        let response = self
            .http_client
            .post(self.method_url("sendPhoto"))
            .multipart(form)
            .send()
            .await?;

        parse_response::<serde_json::Value>("sendPhoto", response).await?;
        log::debug!("Sent photo {} ({} bytes) to chat {}", file_name, size, chat_id);
        Ok(())
    }

    /// Resolve a file id to a downloadable file path.
    ///
    /// # Errors
    ///
    /// Returns `TelegramError::MissingResult` if Telegram answers without a
    /// `file_path` (file too large or expired).
    pub async fn get_file_path(&self, file_id: &str) -> Result<String, TelegramError> {
        let response = self
            .http_client
            .post(self.method_url("getFile"))
            .json(&GetFileRequest { file_id })
            .send()
            .await?;

        let file: File = parse_response("getFile", response).await?;
        file.file_path.ok_or(TelegramError::MissingResult { method: "getFile" })
    }

    /// Download a file by the path returned from [`Self::get_file_path`].
    pub async fn download_file(&self, file_path: &str) -> Result<Vec<u8>, TelegramError> {
        let response = self.http_client.get(self.file_url(file_path)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TelegramError::Api {
                status: status.as_u16(),
                description: format!("file download failed for '{}'", file_path),
            });
        }

        let bytes = response.bytes().await?;
        log::debug!("Downloaded {} ({} bytes)", file_path, bytes.len());
        Ok(bytes.to_vec())
    }

    /// Resolve and download a file in one go.
    pub async fn download_by_id(&self, file_id: &str) -> Result<Vec<u8>, TelegramError> {
        let file_path = self.get_file_path(file_id).await?;
        self.download_file(&file_path).await
    }
}

/// Unwrap a Bot API response envelope.
async fn parse_response<T: DeserializeOwned>(
    method: &'static str,
    response: reqwest::Response,
) -> Result<T, TelegramError> {
    let status = response.status();
    let body = response.text().await?;

    match serde_json::from_str::<ApiResponse<T>>(&body) {
        Ok(envelope) if envelope.ok && status.is_success() => envelope
            .result
            .ok_or(TelegramError::MissingResult { method }),
        Ok(envelope) => Err(TelegramError::Api {
            status: status.as_u16(),
            description: envelope
                .description
                .unwrap_or_else(|| format!("{} failed", method)),
        }),
        Err(_) => Err(TelegramError::Api {
            status: status.as_u16(),
            description: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        }),
    }
}

/// Errors that can occur when talking to Telegram.
#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    #[error("Bot token not configured")]
    MissingToken,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Telegram API error ({status}): {description}")]
    Api {
        /// HTTP status code of the response
        status: u16,
        /// Telegram's `description` field, or the raw body
        description: String,
    },

    #[error("Telegram {method} response had no result")]
    MissingResult { method: &'static str },
}
