//! Webhook update handling.

mod command;
mod dispatcher;

pub use command::{Command, TickColor};
pub use dispatcher::{
    verified_message, Dispatcher, Outcome, TransformMode, MOSAIC_TOO_LARGE_WARNING,
    UNREADABLE_IMAGE_WARNING, WELCOME_MESSAGE,
};
