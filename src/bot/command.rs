//! Chat command classification.

/// Tick colour for the `/verified` badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickColor {
    #[default]
    Blue,
    Green,
    White,
    Black,
}

impl TickColor {
    /// Parse a known colour name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "blue" => Some(TickColor::Blue),
            "green" => Some(TickColor::Green),
            "white" => Some(TickColor::White),
            "black" => Some(TickColor::Black),
            _ => None,
        }
    }

    /// Circle with a tick.
    pub fn badge(&self) -> &'static str {
        match self {
            TickColor::Blue => "🔵✔️",
            TickColor::Green => "🟢✔️",
            TickColor::White => "⚪✔️",
            TickColor::Black => "⚫✔️",
        }
    }
}

/// Command carried by a text message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `/start`: send the welcome text
    Start,
    /// `/verified [colour]`: send the verified badge
    Verified(TickColor),
    /// Not a command this bot knows
    None,
}

impl Command {
    /// Classify message text once.
    ///
    /// Matching is case-insensitive on the trimmed text and by prefix, so
    /// `/start@SomeBot` and `/START` are both `Start`. `/verified` takes an
    /// optional colour name; anything else after it keeps the blue badge.
    pub fn parse(text: &str) -> Self {
        let lowered = text.trim().to_lowercase();

        if lowered.starts_with("/start") {
            return Command::Start;
        }

        if let Some(rest) = lowered.strip_prefix("/verified") {
            // Skip a `@BotName` suffix, if any.
            let color = rest
                .split_whitespace()
                .find(|word| !word.starts_with('@'))
                .and_then(TickColor::from_name)
                .unwrap_or_default();
            return Command::Verified(color);
        }

        Command::None
    }
}
