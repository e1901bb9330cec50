// Text fields and the login/register forms
//
// Fields edit in place on key presses; the forms only track focus and turn
// their fields into what the controller submits.

use crate::api::Registration;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Single-line editable text
#[derive(Debug, Clone, Default)]
pub struct TextField {
    pub label: &'static str,
    value: String,
    /// Cursor position in chars
    cursor: usize,
    /// Render as bullets
    pub masked: bool,
}

impl TextField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            ..Default::default()
        }
    }

    pub fn masked(label: &'static str) -> Self {
        Self {
            label,
            masked: true,
            ..Default::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Display text split around the cursor
    pub fn split_at_cursor(&self) -> (String, String) {
        let shown = self.display();
        let at = shown
            .char_indices()
            .nth(self.cursor)
            .map_or(shown.len(), |(i, _)| i);
        let (before, after) = shown.split_at(at);
        (before.to_string(), after.to_string())
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// What to draw: bullets for masked fields
    pub fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Apply an editing key. Returns true if the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let len = self.value.chars().count();
        match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let at = self.byte_index(self.cursor);
                self.value.drain(..at);
                self.cursor = 0;
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index(self.cursor);
                    self.value.remove(at);
                }
            }
            KeyCode::Delete => {
                if self.cursor < len {
                    let at = self.byte_index(self.cursor);
                    self.value.remove(at);
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(len),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = len,
            _ => return false,
        }
        true
    }
}

/// A set of fields with one focused
#[derive(Debug, Clone)]
pub struct Form {
    pub fields: Vec<TextField>,
    focus: usize,
}

impl Form {
    fn new(fields: Vec<TextField>) -> Self {
        Self { fields, focus: 0 }
    }

    pub fn login() -> Self {
        Self::new(vec![TextField::new("Email"), TextField::masked("Password")])
    }

    pub fn register() -> Self {
        Self::new(vec![
            TextField::new("Username"),
            TextField::new("Email"),
            TextField::masked("Password"),
            TextField::new("Preferences (comma-separated categories)"),
        ])
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    pub fn focused_mut(&mut self) -> &mut TextField {
        &mut self.fields[self.focus]
    }

    pub fn value(&self, idx: usize) -> &str {
        self.fields.get(idx).map_or("", |f| f.value())
    }

    /// Wipe every masked field
    pub fn clear_secrets(&mut self) {
        for field in self.fields.iter_mut().filter(|f| f.masked) {
            field.clear();
        }
    }

    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.focus = 0;
    }

    /// Fields of the register form as a request body
    pub fn registration(&self) -> Registration {
        Registration {
            username: self.value(0).trim().to_string(),
            email: self.value(1).trim().to_string(),
            password: self.value(2).to_string(),
            preferences: parse_preferences(self.value(3)),
        }
    }
}

/// "Books, Sports,," -> ["Books", "Sports"]
pub fn parse_preferences(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(field: &mut TextField, s: &str) {
        for c in s.chars() {
            field.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn editing_moves_cursor() {
        let mut field = TextField::new("Search");
        type_str(&mut field, "shrt");
        field.handle_key(key(KeyCode::Left));
        field.handle_key(key(KeyCode::Left));
        type_str(&mut field, "i");
        assert_eq!(field.value(), "shirt");
        assert_eq!(field.cursor, 3);
        assert_eq!(
            field.split_at_cursor(),
            ("shi".to_string(), "rt".to_string())
        );

        field.handle_key(key(KeyCode::End));
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.value(), "shir");

        field.handle_key(key(KeyCode::Home));
        field.handle_key(key(KeyCode::Delete));
        assert_eq!(field.value(), "hir");
    }

    #[test]
    fn multibyte_input_is_safe() {
        let mut field = TextField::new("Search");
        type_str(&mut field, "café");
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.value(), "caf");
    }

    #[test]
    fn control_keys_are_not_inserted() {
        let mut field = TextField::new("Email");
        type_str(&mut field, "abc");
        let consumed = field.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert!(!consumed);
        assert_eq!(field.value(), "abc");

        field.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(field.value(), "");
    }

    #[test]
    fn masked_fields_render_bullets() {
        let mut field = TextField::masked("Password");
        field.set("secret");
        assert_eq!(field.display(), "••••••");
        field.handle_key(key(KeyCode::Left));
        assert_eq!(
            field.split_at_cursor(),
            ("•••••".to_string(), "•".to_string())
        );
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut form = Form::login();
        form.focus_prev();
        assert_eq!(form.focus(), 1);
        form.focus_next();
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn registration_splits_preferences() {
        let mut form = Form::register();
        form.fields[0].set(" erin ");
        form.fields[1].set("erin@example.com");
        form.fields[2].set("pw");
        form.fields[3].set("Books, Sports,,  ");

        let reg = form.registration();
        assert_eq!(reg.username, "erin");
        assert_eq!(reg.preferences, vec!["Books", "Sports"]);

        form.clear_secrets();
        assert_eq!(form.value(2), "");
        assert_eq!(form.value(1), "erin@example.com");
    }
}
