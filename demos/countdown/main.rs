//! Interactive countdown demo.
//!
//! Run with `cargo run` from this directory. Tab into the minutes/seconds
//! fields to set a duration, space to play or pause, `r` to reset, and `q`
//! or ctrl-c to quit.

use bubbletea_rs::{quit, Cmd, KeyMsg, Model, Msg, Program};
use crossterm::event::{KeyCode, KeyModifiers};
use hourglass_widget::key::KeyMap;
use hourglass_widget::timer::{Phase, TimeoutMsg};
use hourglass_widget::Countdown;
use lipgloss_extras::prelude::*;
use std::time::Duration;

struct App {
    countdown: Countdown,
    expired: bool,
}

impl Model for App {
    fn init() -> (Self, Option<Cmd>) {
        let countdown = Countdown::new().with_duration(Duration::from_secs(60));
        (
            App {
                countdown,
                expired: false,
            },
            None,
        )
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            let ctrl_c = key_msg.key == KeyCode::Char('c')
                && key_msg.modifiers.contains(KeyModifiers::CONTROL);
            if ctrl_c || key_msg.key == KeyCode::Char('q') {
                return Some(quit());
            }
        }

        if let Some(timeout) = msg.downcast_ref::<TimeoutMsg>() {
            if timeout.id == self.countdown.timer().id() {
                self.expired = true;
            }
        }

        let cmd = self.countdown.update(msg);
        if self.countdown.timer().phase() != Phase::Done {
            self.expired = false;
        }
        cmd
    }

    fn view(&self) -> String {
        let help_style = Style::new().foreground(Color::from("240"));
        let help = self
            .countdown
            .keymap
            .short_help()
            .iter()
            .filter(|b| !b.disabled)
            .map(|b| format!("{} {}", b.help.key, b.help.desc))
            .collect::<Vec<_>>()
            .join(" · ");

        let status = if self.expired { "\nTime's up!" } else { "" };
        format!(
            "{}{}\n\n{}\n",
            self.countdown.view(),
            status,
            help_style.render(&format!("{} · q quit", help)),
        )
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let program = Program::<App>::builder().build()?;
    program.run().await?;
    Ok(())
}
