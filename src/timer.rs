//! Countdown engine for the hourglass widget.
//!
//! This module owns the timer state machine: a `remaining` duration counting
//! down toward zero, the `baseline` duration it resets to, and a
//! [`PlaybackState`] controlling whether frame ticks advance it. Rendering is
//! derived on demand through [`Model::snapshot`]; nothing display-related is
//! stored beyond the current [`Phase`].
//!
//! # Basic Usage
//!
//! ```rust
//! use hourglass_widget::timer;
//! use std::time::Duration;
//!
//! let mut countdown = timer::new(Duration::from_secs(90));
//! countdown.submit_minutes("5").unwrap();
//! let snap = countdown.snapshot();
//! assert_eq!(snap.minutes, "05");
//! ```
//!
//! # bubbletea-rs Integration
//!
//! The engine schedules its own frame messages while running. Host models
//! forward every message to [`Model::update`] and kick the countdown off with
//! the command returned by [`Model::play`]:
//!
//! ```rust,ignore
//! fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!     if let Some(timeout) = msg.downcast_ref::<timer::TimeoutMsg>() {
//!         if timeout.id == self.countdown.id() {
//!             // countdown reached zero
//!         }
//!     }
//!     self.countdown.update(&msg)
//! }
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Model as BubbleTeaModel, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

// Internal ID management, so several countdown instances can coexist without
// stealing each other's frame messages.
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Duration a freshly constructed countdown starts with.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(60);

/// Remaining time below which the readout enters [`Phase::Warning`].
pub const WARNING_THRESHOLD: Duration = Duration::from_secs(10);

/// Upper bound for the minutes component of a submitted duration.
pub const MAX_MINUTES: i64 = 99;

/// Upper bound for the seconds component of a submitted duration.
pub const MAX_SECONDS: i64 = 59;

// Frame scheduling while running.
const FPS: u64 = 60;
const FRAME_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / FPS);

/// Whether the countdown is advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Paused, or never started. Frame messages are ignored.
    #[default]
    Stopped,
    /// Counting down once per frame.
    Running,
}

/// Display phase of the readout, derived from the remaining time.
///
/// The phase is stored rather than recomputed so that [`Model::reset`] can
/// return the readout to `Normal` immediately, as the reset control does,
/// independent of where the next tick would put it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Plenty of time left.
    #[default]
    Normal,
    /// Less than [`WARNING_THRESHOLD`] remaining.
    Warning,
    /// The countdown reached zero.
    Done,
}

/// Error returned when a submitted minutes/seconds string is not an integer.
///
/// Submission leaves the countdown untouched when this is returned; the
/// caller decides whether to re-display the previous value or surface the
/// rejected text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid numeric input {text:?}")]
pub struct InvalidInput {
    /// The rejected raw text.
    pub text: String,
}

/// Message scheduled once per frame while the countdown is running.
#[derive(Debug, Clone)]
pub struct FrameMsg {
    /// Identifier of the countdown instance this frame targets.
    pub id: i64,
    // Frames from a previous run are rejected by tag, so pausing and
    // resuming quickly cannot double the tick rate.
    tag: i64,
}

/// Message produced by the [`Model::play`] and [`Model::pause`] commands.
#[derive(Debug, Clone)]
pub struct StartStopMsg {
    /// Identifier of the countdown instance this message targets.
    pub id: i64,
    running: bool,
}

/// Message emitted exactly once when the countdown reaches zero.
#[derive(Debug, Clone)]
pub struct TimeoutMsg {
    /// Identifier of the countdown instance that expired.
    pub id: i64,
}

/// Derived render state of a countdown, recomputed on demand.
///
/// All strings are zero-padded to fixed widths: two digits for minutes and
/// seconds, three for milliseconds. `fill_top` and `fill_bottom` always sum
/// to one.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Minutes component, `"00"`..`"99"`.
    pub minutes: String,
    /// Seconds component, `"00"`..`"59"`.
    pub seconds: String,
    /// Milliseconds component, `"000"`..`"999"`.
    pub millis: String,
    /// Current display phase.
    pub phase: Phase,
    /// Fraction of the baseline still remaining, in `[0, 1]`.
    pub fill_top: f64,
    /// Complement of `fill_top`.
    pub fill_bottom: f64,
    /// Whether a play control should accept input.
    pub play_enabled: bool,
    /// Whether a pause control should accept input.
    pub pause_enabled: bool,
    /// Whether the minutes/seconds edit fields should accept input.
    pub inputs_enabled: bool,
}

/// Countdown timer state machine.
///
/// Owns the remaining and baseline durations exclusively; hosts mutate it
/// only through the command methods and [`Model::update`], and read it
/// through [`Model::snapshot`] and the accessors.
#[derive(Debug, Clone)]
pub struct Model {
    remaining: Duration,
    baseline: Duration,
    state: PlaybackState,
    phase: Phase,

    id: i64,
    tag: i64,
    // Wall-clock instant of the previous frame, used to measure the delta
    // fed into `advance`. Cleared while stopped.
    last_frame: Option<Instant>,
}

/// Creates a countdown with the given total duration.
///
/// The duration doubles as the baseline: `reset` returns to it and the fill
/// ratio is measured against it.
pub fn new(total: Duration) -> Model {
    Model {
        remaining: total,
        baseline: total,
        state: PlaybackState::Stopped,
        phase: Phase::Normal,
        id: next_id(),
        tag: 0,
        last_frame: None,
    }
}

impl Model {
    /// Returns the unique identifier of this countdown instance.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Time left until the countdown expires.
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// The configured total: reset target and fill-ratio denominator.
    pub fn baseline(&self) -> Duration {
        self.baseline
    }

    /// Current playback state.
    pub fn playback_state(&self) -> PlaybackState {
        self.state
    }

    /// Whether the countdown is currently advancing.
    pub fn is_running(&self) -> bool {
        self.state == PlaybackState::Running
    }

    /// Current display phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a play control should accept input right now.
    pub fn play_enabled(&self) -> bool {
        self.state == PlaybackState::Stopped && !self.remaining.is_zero()
    }

    /// Whether a pause control should accept input right now.
    pub fn pause_enabled(&self) -> bool {
        self.state == PlaybackState::Running
    }

    /// Whether the minutes/seconds edit fields should accept input.
    pub fn inputs_enabled(&self) -> bool {
        self.state == PlaybackState::Stopped
    }

    /// Advances the countdown by `delta` elapsed time.
    ///
    /// Ignored unless running. Subtracts saturating at zero, then derives
    /// the phase with `Done` taking precedence over `Warning` over `Normal`.
    /// Returns `true` on the call that drives the countdown to zero; that
    /// call also transitions to `Stopped`, so `true` is returned at most
    /// once per run.
    pub fn advance(&mut self, delta: Duration) -> bool {
        if self.state != PlaybackState::Running {
            return false;
        }

        self.remaining = self.remaining.saturating_sub(delta);

        if self.remaining.is_zero() {
            self.phase = Phase::Done;
            self.state = PlaybackState::Stopped;
            self.last_frame = None;
            debug!(id = self.id, "countdown expired");
            return true;
        }

        self.phase = if self.remaining < WARNING_THRESHOLD {
            Phase::Warning
        } else {
            Phase::Normal
        };
        false
    }

    /// Restores `remaining` to the baseline and the phase to `Normal`.
    ///
    /// Allowed in any state and never changes the playback state: resetting
    /// a running countdown restarts it from the top without pausing.
    pub fn reset(&mut self) {
        self.remaining = self.baseline;
        self.phase = Phase::Normal;
    }

    /// Returns the command that starts the countdown.
    ///
    /// Silently does nothing (returns `None`) when no time remains, matching
    /// the play control being disabled at zero.
    pub fn play(&self) -> Option<Cmd> {
        if self.remaining.is_zero() {
            return None;
        }
        Some(self.start_stop(true))
    }

    /// Returns the command that pauses the countdown.
    ///
    /// Pausing an already stopped countdown is a no-op when the message is
    /// processed.
    pub fn pause(&self) -> Cmd {
        self.start_stop(false)
    }

    /// Returns a play command when stopped and a pause command when running.
    pub fn toggle(&self) -> Option<Cmd> {
        if self.is_running() {
            Some(self.pause())
        } else {
            self.play()
        }
    }

    /// Parses and applies a minutes edit.
    ///
    /// The text must be an integer; anything else returns [`InvalidInput`]
    /// and leaves the countdown untouched. The value is clamped to
    /// `[0, MAX_MINUTES]` and returned so callers can echo it back. Both
    /// `remaining` and `baseline` are rebuilt from the new minutes and the
    /// current seconds component (milliseconds are dropped), so submitting
    /// always redefines the reset target, even mid-run.
    pub fn submit_minutes(&mut self, text: &str) -> Result<i64, InvalidInput> {
        let minutes = parse_component(text)?.clamp(0, MAX_MINUTES);
        self.set_components(minutes as u64, self.remaining.as_secs() % 60);
        Ok(minutes)
    }

    /// Parses and applies a seconds edit.
    ///
    /// Same contract as [`Model::submit_minutes`] with the value clamped to
    /// `[0, MAX_SECONDS]`, combined with the current minutes component.
    pub fn submit_seconds(&mut self, text: &str) -> Result<i64, InvalidInput> {
        let seconds = parse_component(text)?.clamp(0, MAX_SECONDS);
        self.set_components(self.remaining.as_secs() / 60, seconds as u64);
        Ok(seconds)
    }

    fn set_components(&mut self, minutes: u64, seconds: u64) {
        self.remaining = Duration::from_secs(minutes * 60 + seconds);
        self.baseline = self.remaining;
    }

    /// Fraction of the baseline still remaining, in `[0, 1]`.
    ///
    /// Defined as 1 while untouched (`remaining == baseline`) and as 0 when
    /// the baseline itself is zero, so the value is total and the top and
    /// bottom fills always complement each other.
    pub fn fill_ratio(&self) -> f64 {
        if self.baseline.is_zero() {
            0.0
        } else if self.remaining == self.baseline {
            1.0
        } else {
            self.remaining.as_secs_f64() / self.baseline.as_secs_f64()
        }
    }

    /// Computes the derived render state.
    pub fn snapshot(&self) -> Snapshot {
        let total = self.remaining.as_secs();
        let fill_top = self.fill_ratio();
        Snapshot {
            minutes: format!("{:02}", total / 60),
            seconds: format!("{:02}", total % 60),
            millis: format!("{:03}", self.remaining.subsec_millis()),
            phase: self.phase,
            fill_top,
            fill_bottom: 1.0 - fill_top,
            play_enabled: self.play_enabled(),
            pause_enabled: self.pause_enabled(),
            inputs_enabled: self.inputs_enabled(),
        }
    }

    /// Processes countdown messages.
    ///
    /// Handles [`StartStopMsg`] (state transitions, starting the frame loop)
    /// and [`FrameMsg`] (measuring the elapsed delta and advancing). Foreign
    /// and stale messages are rejected by id and tag. Returns the command
    /// that keeps the frame loop alive, the timeout notification when the
    /// countdown expires, or `None`.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(start_stop) = msg.downcast_ref::<StartStopMsg>() {
            if start_stop.id != 0 && start_stop.id != self.id {
                return None;
            }
            return self.set_playing(start_stop.running);
        }

        if let Some(frame) = msg.downcast_ref::<FrameMsg>() {
            if frame.id != self.id || frame.tag != self.tag {
                return None;
            }
            if self.state != PlaybackState::Running {
                return None;
            }

            let now = Instant::now();
            let delta = self.last_frame.map_or(FRAME_INTERVAL, |last| now - last);
            self.last_frame = Some(now);

            if self.advance(delta) {
                return Some(self.timeout_cmd());
            }
            return Some(self.next_frame());
        }

        None
    }

    /// Applies a play/pause transition synchronously.
    ///
    /// This is the state change behind [`Model::play`] and [`Model::pause`];
    /// composite widgets that own the countdown call it directly instead of
    /// routing a [`StartStopMsg`] through the runtime. Returns the command
    /// that starts the frame loop when the countdown begins running.
    pub fn set_playing(&mut self, running: bool) -> Option<Cmd> {
        if running {
            // A play request on an expired or already running countdown
            // fails silently.
            if self.remaining.is_zero() || self.state == PlaybackState::Running {
                return None;
            }
            self.state = PlaybackState::Running;
            self.last_frame = Some(Instant::now());
            self.tag += 1;
            debug!(id = self.id, remaining = ?self.remaining, "countdown started");
            return Some(self.next_frame());
        }

        if self.state == PlaybackState::Running {
            self.state = PlaybackState::Stopped;
            self.last_frame = None;
            debug!(id = self.id, remaining = ?self.remaining, "countdown paused");
        }
        None
    }

    fn next_frame(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(FRAME_INTERVAL, move |_| {
            Box::new(FrameMsg { id, tag }) as Msg
        })
    }

    fn timeout_cmd(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(TimeoutMsg { id }) as Msg
        })
    }

    fn start_stop(&self, running: bool) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(StartStopMsg { id, running }) as Msg
        })
    }

    /// Renders the countdown as a plain `MM:SS.mmm` string.
    pub fn view(&self) -> String {
        let snap = self.snapshot();
        format!("{}:{}.{}", snap.minutes, snap.seconds, snap.millis)
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        (Model::default(), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(&msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

impl Default for Model {
    /// A one-minute countdown, stopped.
    fn default() -> Self {
        new(DEFAULT_DURATION)
    }
}

fn parse_component(text: &str) -> Result<i64, InvalidInput> {
    text.trim().parse::<i64>().map_err(|_| InvalidInput {
        text: text.to_string(),
    })
}
