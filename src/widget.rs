//! The composed countdown widget.
//!
//! Wires the countdown engine, the minutes/seconds edit fields, and the
//! hourglass bars into a single bubbletea-rs model. The widget translates
//! key presses into engine commands, keeps the field text synchronized with
//! the engine, and paints the readout with phase-dependent styles.
//!
//! # Basic Usage
//!
//! ```rust
//! use hourglass_widget::widget;
//! use std::time::Duration;
//!
//! let mut countdown = widget::new().with_duration(Duration::from_secs(300));
//! let _cmd = countdown.play();
//! ```
//!
//! Editing works like a form: tab focuses a field and clears it for fresh
//! entry, digits fill it, and enter (or tabbing onward) applies it. Leaving
//! a field without typing anything keeps the previous value.

use crate::hourglass;
use crate::input;
use crate::key::{self, KeyMap as KeyMapTrait};
use crate::timer::{self, Phase};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;
use std::time::Duration;
use tracing::debug;

/// Key bindings for the countdown widget.
#[derive(Debug, Clone)]
pub struct CountdownKeyMap {
    /// Toggles between playing and paused.
    pub play_pause: key::Binding,
    /// Restores the remaining time to the baseline.
    pub reset: key::Binding,
    /// Moves editing focus to the next field.
    pub next_field: key::Binding,
    /// Applies the focused field's text.
    pub submit: key::Binding,
}

impl Default for CountdownKeyMap {
    fn default() -> Self {
        Self {
            play_pause: key::Binding::new(vec![KeyCode::Char(' ')])
                .with_help("space", "play/pause"),
            reset: key::Binding::new(vec![KeyCode::Char('r')]).with_help("r", "reset"),
            next_field: key::Binding::new(vec![KeyCode::Tab]).with_help("tab", "switch field"),
            submit: key::Binding::new(vec![KeyCode::Enter]).with_help("enter", "apply"),
        }
    }
}

impl KeyMapTrait for CountdownKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.play_pause, &self.reset, &self.next_field, &self.submit]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![&self.play_pause, &self.reset],
            vec![&self.next_field, &self.submit],
        ]
    }
}

/// Styles for the readout, keyed by phase.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Readout style while plenty of time remains.
    pub normal: Style,
    /// Readout style when time is running low.
    pub warning: Style,
    /// Readout style once the countdown has expired.
    pub done: Style,
}

impl Styles {
    /// The style for a given phase.
    pub fn for_phase(&self, phase: Phase) -> &Style {
        match phase {
            Phase::Normal => &self.normal,
            Phase::Warning => &self.warning,
            Phase::Done => &self.done,
        }
    }
}

/// The default white/red/green readout palette.
pub fn default_styles() -> Styles {
    Styles {
        normal: Style::new().foreground(Color::from("#FFFFFF")),
        warning: Style::new().foreground(Color::from("#FF0000")),
        done: Style::new().foreground(Color::from("#00FF00")),
    }
}

impl Default for Styles {
    fn default() -> Self {
        default_styles()
    }
}

// Which edit field currently holds the caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Minutes,
    Seconds,
}

/// The countdown widget model.
#[derive(Debug, Clone)]
pub struct Model {
    timer: timer::Model,
    hourglass: hourglass::Model,
    minutes: input::Model,
    seconds: input::Model,

    /// Key bindings; replaceable for custom layouts.
    pub keymap: CountdownKeyMap,
    /// Readout styles; replaceable for custom palettes.
    pub styles: Styles,

    active: Option<Field>,
    focus: bool,
}

/// Create a countdown widget with the default one-minute duration.
pub fn new() -> Model {
    Model::new()
}

impl Model {
    /// Creates a widget with the default one-minute countdown.
    ///
    /// The widget starts focused, since it is usually the only component on
    /// screen; call [`Component::blur`] when embedding it next to others.
    pub fn new() -> Self {
        let mut m = Self {
            timer: timer::Model::default(),
            hourglass: hourglass::Model::default(),
            minutes: input::new().with_placeholder("00"),
            seconds: input::new().with_placeholder("00"),
            keymap: CountdownKeyMap::default(),
            styles: default_styles(),
            active: None,
            focus: true,
        };
        m.sync_fields();
        m
    }

    /// Replaces the countdown duration (and baseline).
    pub fn with_duration(mut self, total: Duration) -> Self {
        self.timer = timer::new(total);
        self.sync_fields();
        self
    }

    /// Replaces the hourglass renderer.
    pub fn with_hourglass(mut self, hourglass: hourglass::Model) -> Self {
        self.hourglass = hourglass;
        self
    }

    /// Replaces the readout styles.
    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    /// Replaces the key bindings.
    pub fn with_keymap(mut self, keymap: CountdownKeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// The underlying countdown engine.
    ///
    /// Host applications use this to match [`timer::TimeoutMsg::id`] against
    /// [`timer::Model::id`] and to inspect remaining time.
    pub fn timer(&self) -> &timer::Model {
        &self.timer
    }

    /// Whether the countdown is advancing.
    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Starts the countdown, ending any in-progress edit first.
    ///
    /// Silently does nothing when no time remains. Returns the command that
    /// drives the frame loop.
    pub fn play(&mut self) -> Option<Cmd> {
        self.end_edit();
        let cmd = self.timer.set_playing(true);
        self.sync_fields();
        cmd
    }

    /// Pauses the countdown, ending any in-progress edit first.
    pub fn pause(&mut self) -> Option<Cmd> {
        self.end_edit();
        let cmd = self.timer.set_playing(false);
        self.sync_fields();
        cmd
    }

    /// Resets the countdown to its baseline, ending any in-progress edit.
    pub fn reset(&mut self) {
        self.end_edit();
        self.timer.reset();
        self.sync_fields();
    }

    /// Advances the countdown by `delta` elapsed time.
    ///
    /// For hosts that run their own frame loop instead of the widget's
    /// scheduled frames. Returns `true` on the call that expires the
    /// countdown.
    pub fn advance(&mut self, delta: Duration) -> bool {
        let expired = self.timer.advance(delta);
        self.sync_fields();
        expired
    }

    /// Processes runtime messages.
    ///
    /// Key messages are interpreted against the keymap while the widget is
    /// focused; everything else is forwarded to the countdown engine.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if !self.focus {
                return None;
            }
            return self.handle_key(key_msg);
        }

        let cmd = self.timer.update(&msg);
        // Refresh the display unless the user is mid-edit; a focused field
        // holds unapplied text that must not be clobbered.
        if self.active.is_none() {
            self.sync_fields();
        }
        cmd
    }

    /// Renders the readout above the hourglass bars.
    pub fn view(&self) -> String {
        let snap = self.timer.snapshot();
        let style = self.styles.for_phase(snap.phase);

        let readout = format!(
            "{}{}{}{}{}",
            self.minutes.view(),
            style.clone().render(":"),
            self.seconds.view(),
            style.clone().render("."),
            style.clone().render(&snap.millis),
        );
        let bars = self.hourglass.view(snap.fill_top, snap.fill_bottom);
        format!("{}\n{}", readout, bars)
    }

    fn handle_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        if self.keymap.play_pause.matches(key_msg) {
            return if self.timer.is_running() {
                self.pause()
            } else {
                self.play()
            };
        }

        if self.keymap.reset.matches(key_msg) {
            self.reset();
            return None;
        }

        if self.keymap.next_field.matches(key_msg) {
            self.cycle_field();
            return None;
        }

        if self.keymap.submit.matches(key_msg) {
            self.end_edit();
            return None;
        }

        if let Some(field) = self.active {
            match key_msg.key {
                KeyCode::Char(ch) => self.field_mut(field).insert_char(ch),
                KeyCode::Backspace => self.field_mut(field).delete_char_backward(),
                _ => {}
            }
        }
        None
    }

    // Tab order: minutes, seconds, then back out of editing.
    fn cycle_field(&mut self) {
        if !self.timer.inputs_enabled() {
            return;
        }
        let next = match self.active {
            None => Some(Field::Minutes),
            Some(Field::Minutes) => Some(Field::Seconds),
            Some(Field::Seconds) => None,
        };
        self.end_edit();
        if let Some(field) = next {
            self.focus_field(field);
        }
    }

    fn focus_field(&mut self, field: Field) {
        self.active = Some(field);
        let input = self.field_mut(field);
        // Clear for fresh entry; abandoning the edit restores the old value.
        input.set_value("");
        let _ = input.focus();
    }

    // Applies the focused field's text and leaves editing mode, mirroring an
    // end-edit event. Invalid or abandoned edits leave the countdown alone
    // and the previous value is written back.
    fn end_edit(&mut self) {
        let Some(field) = self.active.take() else {
            return;
        };

        let text = self.field_mut(field).value().to_string();
        let result = match field {
            Field::Minutes => self.timer.submit_minutes(&text),
            Field::Seconds => self.timer.submit_seconds(&text),
        };
        if let Err(err) = result {
            debug!(id = self.timer.id(), %err, "edit rejected");
        }

        self.minutes.blur();
        self.seconds.blur();
        self.sync_fields();
    }

    fn field_mut(&mut self, field: Field) -> &mut input::Model {
        match field {
            Field::Minutes => &mut self.minutes,
            Field::Seconds => &mut self.seconds,
        }
    }

    // Writes the engine's formatted components and interactability back into
    // the fields, and keeps the edit bindings in step.
    fn sync_fields(&mut self) {
        let snap = self.timer.snapshot();

        self.minutes.set_value(&snap.minutes);
        self.seconds.set_value(&snap.seconds);
        self.minutes.set_enabled(snap.inputs_enabled);
        self.seconds.set_enabled(snap.inputs_enabled);

        let style = self.styles.for_phase(snap.phase).clone();
        self.minutes.text_style = style.clone();
        self.seconds.text_style = style;

        self.keymap.next_field.set_enabled(snap.inputs_enabled);
        self.keymap.submit.set_enabled(snap.inputs_enabled);
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.end_edit();
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        (Model::new(), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use lipgloss_extras::lipgloss::strip_ansi;

    fn press(w: &mut Model, code: KeyCode) -> Option<Cmd> {
        w.update(Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }) as Msg)
    }

    fn type_digits(w: &mut Model, digits: &str) {
        for ch in digits.chars() {
            press(w, KeyCode::Char(ch));
        }
    }

    fn readout(w: &Model) -> String {
        strip_ansi(&w.view()).lines().next().unwrap().to_string()
    }

    #[test]
    fn test_new_shows_default_minute() {
        let w = new();
        assert_eq!(readout(&w), "01:00.000");
        assert!(!w.is_running());
    }

    #[test]
    fn test_space_starts_and_pauses() {
        let mut w = new();

        let cmd = press(&mut w, KeyCode::Char(' '));
        assert!(cmd.is_some());
        assert!(w.is_running());

        let cmd = press(&mut w, KeyCode::Char(' '));
        assert!(cmd.is_none());
        assert!(!w.is_running());
    }

    #[test]
    fn test_edit_flow_sets_duration_and_baseline() {
        let mut w = new();

        press(&mut w, KeyCode::Tab); // minutes
        type_digits(&mut w, "5");
        press(&mut w, KeyCode::Tab); // apply, move to seconds
        type_digits(&mut w, "30");
        press(&mut w, KeyCode::Enter); // apply, leave editing

        assert_eq!(w.timer().remaining(), Duration::from_secs(5 * 60 + 30));
        assert_eq!(w.timer().baseline(), Duration::from_secs(5 * 60 + 30));
        assert_eq!(readout(&w), "05:30.000");
    }

    #[test]
    fn test_edit_clamps_out_of_range_minutes() {
        let mut w = new();

        press(&mut w, KeyCode::Tab);
        type_digits(&mut w, "150"); // third digit is dropped by the field
        press(&mut w, KeyCode::Enter);

        // "15" fits in two digits; overflow is exercised against the engine
        // directly since the field cannot hold three.
        assert_eq!(w.timer().remaining(), Duration::from_secs(15 * 60));

        press(&mut w, KeyCode::Tab);
        press(&mut w, KeyCode::Tab); // seconds
        type_digits(&mut w, "75");
        press(&mut w, KeyCode::Enter);
        assert_eq!(
            w.timer().remaining(),
            Duration::from_secs(15 * 60 + 59),
            "seconds clamp to 59"
        );
    }

    #[test]
    fn test_abandoned_edit_restores_previous_value() {
        let mut w = new();

        press(&mut w, KeyCode::Tab); // focus minutes, clearing it
        press(&mut w, KeyCode::Enter); // apply empty text: rejected

        assert_eq!(w.timer().remaining(), Duration::from_secs(60));
        assert_eq!(readout(&w), "01:00.000");
    }

    #[test]
    fn test_play_submits_pending_edit_first() {
        let mut w = new();

        press(&mut w, KeyCode::Tab);
        type_digits(&mut w, "2");
        let cmd = press(&mut w, KeyCode::Char(' '));

        assert!(cmd.is_some());
        assert!(w.is_running());
        assert_eq!(w.timer().baseline(), Duration::from_secs(2 * 60));
    }

    #[test]
    fn test_editing_is_rejected_while_running() {
        let mut w = new();
        press(&mut w, KeyCode::Char(' '));
        assert!(w.is_running());

        press(&mut w, KeyCode::Tab);
        type_digits(&mut w, "9");
        assert_eq!(w.timer().baseline(), Duration::from_secs(60));
        assert!(!strip_ansi(&w.view()).contains('9'));
    }

    #[test]
    fn test_advance_updates_readout_and_phase() {
        let mut w = new();
        w.play();

        w.advance(Duration::from_secs(55));
        assert_eq!(readout(&w), "00:05.000");
        assert_eq!(w.timer().phase(), Phase::Warning);

        let snap = w.timer().snapshot();
        assert!((snap.fill_top - 5.0 / 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_expiry_shows_zero_and_reenables_editing() {
        let mut w = new();
        w.play();

        assert!(w.advance(Duration::from_secs(90)));
        assert_eq!(readout(&w), "00:00.000");
        assert_eq!(w.timer().phase(), Phase::Done);
        assert!(!w.is_running());

        // Play at zero fails silently.
        assert!(w.play().is_none());
        assert!(!w.is_running());
    }

    #[test]
    fn test_reset_restores_baseline_and_display() {
        let mut w = new();
        w.play();
        w.advance(Duration::from_secs(40));

        press(&mut w, KeyCode::Char('r'));
        assert_eq!(readout(&w), "01:00.000");
        assert_eq!(w.timer().phase(), Phase::Normal);
        // Reset alone does not pause.
        assert!(w.is_running());
    }

    #[test]
    fn test_blurred_widget_ignores_keys() {
        let mut w = new();
        w.blur();

        let cmd = press(&mut w, KeyCode::Char(' '));
        assert!(cmd.is_none());
        assert!(!w.is_running());
    }

    #[test]
    fn test_view_has_readout_and_two_bars() {
        let w = new().with_hourglass(hourglass::new(&[
            hourglass::with_width(10),
            hourglass::with_fill_characters('#', '.'),
        ]));

        let plain = strip_ansi(&w.view());
        let lines: Vec<&str> = plain.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "01:00.000");
        assert_eq!(lines[1], "##########"); // full baseline remaining
        assert_eq!(lines[2], ".........."); // nothing drained yet
    }

    #[test]
    fn test_short_help_lists_all_bindings() {
        let w = new();
        assert_eq!(w.keymap.short_help().len(), 4);
    }
}
