#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/hourglass-widget/")]

//! # hourglass-widget
//!
//! A countdown timer widget for terminal applications built with
//! [bubbletea-rs](https://github.com/whit3rabbit/bubbletea-rs): set a
//! minutes/seconds duration, play, pause, and reset it, and watch a
//! zero-padded `MM:SS.mmm` readout count down over a two-bar "hourglass"
//! whose top bar drains while the bottom bar fills. The readout turns red
//! when less than ten seconds remain and green once time is up.
//!
//! ## Overview
//!
//! The crate follows the Elm Architecture pattern: every component exposes
//! `update()` and `view()` methods and communicates through messages. It is
//! split into small pieces that can be used together or on their own:
//!
//! - [`widget`] — the composed, key-driven countdown widget (start here)
//! - [`timer`] — the countdown engine: state machine, tick advance,
//!   duration submission, and derived render state
//! - [`hourglass`] — the complementary fill-bar renderer
//! - [`input`] — the two-digit numeric edit field
//! - [`key`] — key bindings with help text
//!
//! ## Quick Start
//!
//! ```rust
//! use hourglass_widget::prelude::*;
//! use std::time::Duration;
//!
//! let mut countdown = widget_new().with_duration(Duration::from_secs(300));
//!
//! // Drive it from your own frame loop, or let the widget schedule frames
//! // through the bubbletea-rs runtime via `play()` and `update()`.
//! let _cmd = countdown.play();
//! countdown.advance(Duration::from_millis(16));
//! println!("{}", countdown.view());
//! ```
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Model, Msg};
//! use hourglass_widget::{timer::TimeoutMsg, Countdown};
//!
//! struct App {
//!     countdown: Countdown,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         (App { countdown: Countdown::new() }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(timeout) = msg.downcast_ref::<TimeoutMsg>() {
//!             if timeout.id == self.countdown.timer().id() {
//!                 // countdown reached zero
//!             }
//!         }
//!         self.countdown.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.countdown.view()
//!     }
//! }
//! ```

pub mod hourglass;
pub mod input;
pub mod key;
pub mod timer;
pub mod widget;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// A focused component receives keyboard input; a blurred one ignores it.
/// `focus()` may return a command for initialization work, mirroring the
/// other component methods.
pub trait Component {
    /// Sets the component to the focused state.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to the blurred state.
    fn blur(&mut self);

    /// Returns whether the component is currently focused.
    fn focused(&self) -> bool;
}

pub use hourglass::Model as Hourglass;
pub use input::Model as DigitInput;
pub use key::{Binding, Help as KeyHelp, KeyMap};
pub use timer::{
    new as timer_new, FrameMsg as TimerFrameMsg, InvalidInput, Model as Timer, Phase,
    PlaybackState, Snapshot, StartStopMsg as TimerStartStopMsg, TimeoutMsg as TimerTimeoutMsg,
};
pub use widget::{
    default_styles, new as widget_new, CountdownKeyMap, Model as Countdown, Styles,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use hourglass_widget::prelude::*;
/// ```
pub mod prelude {
    pub use crate::hourglass::{
        new as hourglass_new, with_empty_color, with_fill_characters, with_solid_fill, with_width,
        Model as Hourglass,
    };
    pub use crate::input::{new as input_new, Model as DigitInput};
    pub use crate::key::{Binding, Help as KeyHelp, KeyMap};
    pub use crate::timer::{
        new as timer_new, InvalidInput, Model as Timer, Phase, PlaybackState, Snapshot,
        TimeoutMsg as TimerTimeoutMsg,
    };
    pub use crate::widget::{
        default_styles, new as widget_new, CountdownKeyMap, Model as Countdown, Styles,
    };
    pub use crate::Component;
}
