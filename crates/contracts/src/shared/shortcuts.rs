//! Double-press keyboard shortcuts (`A A` for the admin panel, `F F` for
//! layout mode).

/// Maximum gap between the two presses, in milliseconds.
pub const DOUBLE_PRESS_WINDOW_MS: f64 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    ToggleAdmin,
    ToggleLayoutMode,
}

/// The parts of a keydown event the detector looks at.
#[derive(Debug, Clone, Default)]
pub struct KeyPress {
    pub key: String,
    pub code: String,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
    pub repeat: bool,
    /// Focus is in an input, textarea, select or editable text.
    pub in_editing_field: bool,
}

impl KeyPress {
    fn plain_letter(&self) -> Option<char> {
        if self.ctrl || self.meta || self.alt || self.shift {
            return None;
        }
        let key = self.key.to_lowercase();
        if self.code == "KeyA" || key == "a" {
            Some('a')
        } else if self.code == "KeyF" || key == "f" {
            Some('f')
        } else {
            None
        }
    }
}

/// Remembers the previous shortcut key to recognize a double press.
#[derive(Debug, Clone, Default)]
pub struct DoublePressDetector {
    last_key: Option<char>,
    last_time_ms: f64,
}

impl DoublePressDetector {
    /// Feed a keydown; returns the action when it completes a double press.
    pub fn on_key(&mut self, press: &KeyPress, now_ms: f64) -> Option<ShortcutAction> {
        if press.repeat || press.in_editing_field {
            return None;
        }
        let letter = press.plain_letter()?;

        let is_double = self.last_key == Some(letter)
            && now_ms - self.last_time_ms <= DOUBLE_PRESS_WINDOW_MS;
        self.last_key = Some(letter);
        self.last_time_ms = now_ms;

        if !is_double {
            return None;
        }
        self.last_key = None;
        self.last_time_ms = 0.0;

        match letter {
            'a' => Some(ShortcutAction::ToggleAdmin),
            _ => Some(ShortcutAction::ToggleLayoutMode),
        }
    }
}
