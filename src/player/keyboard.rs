/// A key press as seen by the page's `keydown` listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    /// `KeyboardEvent.key`, e.g. `" "`, `"ArrowLeft"`, `"m"`.
    pub key: String,
    /// Focus is in an `<input>` or `<textarea>`.
    pub in_text_field: bool,
}

impl KeyInput {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            in_text_field: false,
        }
    }

    #[must_use]
    pub fn in_text_field(mut self) -> Self {
        self.in_text_field = true;
        self
    }
}

/// What a shortcut asks the player to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShortcutAction {
    TogglePlay,
    SeekBy(f64),
    AdjustVolume(f64),
    ToggleFullscreen,
    ToggleCinema,
    ToggleMute,
}

/// Map a key press to a player action. Keys typed into text fields are ignored.
#[must_use]
pub fn shortcut_for(input: &KeyInput, seek_step: f64, volume_step: f64) -> Option<ShortcutAction> {
    if input.in_text_field {
        return None;
    }
    match input.key.as_str() {
        " " | "Space" | "Spacebar" => Some(ShortcutAction::TogglePlay),
        "ArrowRight" => Some(ShortcutAction::SeekBy(seek_step)),
        "ArrowLeft" => Some(ShortcutAction::SeekBy(-seek_step)),
        "ArrowUp" => Some(ShortcutAction::AdjustVolume(volume_step)),
        "ArrowDown" => Some(ShortcutAction::AdjustVolume(-volume_step)),
        "f" => Some(ShortcutAction::ToggleFullscreen),
        "t" => Some(ShortcutAction::ToggleCinema),
        "m" => Some(ShortcutAction::ToggleMute),
        _ => None,
    }
}
