//! Single-line text input for step forms.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A text input field with cursor support. Secret fields render masked.
#[derive(Clone)]
pub struct InputField {
    value: String,
    /// Cursor position (byte index).
    cursor: usize,
    pub label: String,
    pub secret: bool,
}

impl std::fmt::Debug for InputField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value: &dyn std::fmt::Debug = if self.secret { &"<hidden>" } else { &self.value };
        f.debug_struct("InputField")
            .field("label", &self.label)
            .field("value", value)
            .field("cursor", &self.cursor)
            .finish()
    }
}

impl InputField {
    pub fn new(label: &str) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            label: label.to_string(),
            secret: false,
        }
    }

    pub fn secret(label: &str) -> Self {
        Self {
            secret: true,
            ..Self::new(label)
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.len();
    }

    /// What the field shows on screen.
    pub fn display(&self) -> String {
        if self.secret {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    /// Handle a key event, returns true if the value or cursor changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => {
                self.value.clear();
                self.cursor = 0;
                true
            }
            KeyCode::Char(_) if ctrl => false,
            KeyCode::Char(c) => {
                self.value.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                true
            }
            KeyCode::Backspace => {
                match self.prev_boundary() {
                    Some(prev) => {
                        self.value.remove(prev);
                        self.cursor = prev;
                        true
                    }
                    None => false,
                }
            }
            KeyCode::Delete if self.cursor < self.value.len() => {
                self.value.remove(self.cursor);
                true
            }
            KeyCode::Left => match self.prev_boundary() {
                Some(prev) => {
                    self.cursor = prev;
                    true
                }
                None => false,
            },
            KeyCode::Right if self.cursor < self.value.len() => {
                let step = self.value[self.cursor..]
                    .chars()
                    .next()
                    .map(char::len_utf8)
                    .unwrap_or(0);
                self.cursor += step;
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.value.len();
                true
            }
            _ => false,
        }
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.value[..self.cursor].char_indices().last().map(|(i, _)| i)
    }
}
