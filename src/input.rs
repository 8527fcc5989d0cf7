//! Two-digit numeric edit field for the minutes and seconds components.

use lipgloss_extras::prelude::*;

use crate::Component;
use bubbletea_rs::Cmd;

const DIGIT_LIMIT: usize = 2;

/// A fixed-width, digit-only text field.
///
/// The field does no numeric interpretation itself; it collects up to two
/// digits and hands the raw text to whoever submits it. While disabled it
/// rejects all edits, mirroring a greyed-out input.
#[derive(Debug, Clone)]
pub struct Model {
    value: String,
    placeholder: String,
    focus: bool,
    enabled: bool,

    /// Style applied to the field text; the owning widget keeps this in
    /// sync with the readout phase.
    pub text_style: Style,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            value: String::new(),
            placeholder: "00".to_string(),
            focus: false,
            enabled: true,
            text_style: Style::new(),
        }
    }
}

/// Create a new field. Equivalent to `Model::new()`.
pub fn new() -> Model {
    Model::new()
}

impl Model {
    /// Creates an empty, enabled, blurred field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the placeholder shown while the field is empty.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Replaces the field text, truncated to two characters.
    ///
    /// Used by the owning widget to write formatted component values back
    /// into the field; it works even while the field is disabled.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        if self.value.len() > DIGIT_LIMIT {
            self.value.truncate(DIGIT_LIMIT);
        }
    }

    /// The raw field text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Enables or disables editing.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.blur();
        }
    }

    /// Whether the field currently accepts edits.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Appends a digit, ignoring anything else.
    ///
    /// Rejected outright while disabled or blurred, and once two digits are
    /// present.
    pub fn insert_char(&mut self, ch: char) {
        if !self.enabled || !self.focus {
            return;
        }
        if !ch.is_ascii_digit() || self.value.len() >= DIGIT_LIMIT {
            return;
        }
        self.value.push(ch);
    }

    /// Deletes the last digit, if any.
    pub fn delete_char_backward(&mut self) {
        if !self.enabled || !self.focus {
            return;
        }
        self.value.pop();
    }

    /// Renders the field, padded to two columns.
    pub fn view(&self) -> String {
        let display = if self.value.is_empty() && !self.focus {
            &self.placeholder
        } else {
            &self.value
        };
        let padded = format!("{:<width$}", display, width = DIGIT_LIMIT);

        let style = if self.focus {
            self.text_style.clone().underline(true)
        } else {
            self.text_style.clone()
        };
        style.render(&padded)
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        if self.enabled {
            self.focus = true;
        }
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lipgloss_extras::lipgloss::strip_ansi;

    #[test]
    fn test_insert_accepts_digits_only() {
        let mut field = new();
        let _ = field.focus();
        field.insert_char('4');
        field.insert_char('x');
        field.insert_char('2');
        assert_eq!(field.value(), "42");
    }

    #[test]
    fn test_insert_caps_at_two_digits() {
        let mut field = new();
        let _ = field.focus();
        for ch in ['1', '2', '3', '4'] {
            field.insert_char(ch);
        }
        assert_eq!(field.value(), "12");
    }

    #[test]
    fn test_disabled_field_rejects_edits() {
        let mut field = new();
        let _ = field.focus();
        field.insert_char('7');
        field.set_enabled(false);
        field.insert_char('8');
        field.delete_char_backward();
        assert_eq!(field.value(), "7");
        // Disabling also drops focus.
        assert!(!field.focused());
    }

    #[test]
    fn test_blurred_field_rejects_edits() {
        let mut field = new();
        field.insert_char('9');
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_set_value_truncates() {
        let mut field = new();
        field.set_value("123");
        assert_eq!(field.value(), "12");
    }

    #[test]
    fn test_set_value_works_while_disabled() {
        let mut field = new();
        field.set_enabled(false);
        field.set_value("05");
        assert_eq!(field.value(), "05");
    }

    #[test]
    fn test_view_shows_placeholder_when_empty_and_blurred() {
        let field = new().with_placeholder("00");
        assert_eq!(strip_ansi(&field.view()), "00");
    }

    #[test]
    fn test_view_pads_to_two_columns() {
        let mut field = new();
        let _ = field.focus();
        field.insert_char('5');
        assert_eq!(strip_ansi(&field.view()), "5 ");
    }

    #[test]
    fn test_cannot_focus_disabled_field() {
        let mut field = new();
        field.set_enabled(false);
        let _ = field.focus();
        assert!(!field.focused());
    }
}
