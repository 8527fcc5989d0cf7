//! Hourglass fill bars.
//!
//! Renders a countdown's fill ratio as two stacked bars: the top bar drains
//! as time passes while the bottom bar fills by the same amount, like sand
//! moving between the bulbs of an hourglass. The renderer is stateless; the
//! countdown engine supplies the ratios on every frame.
//!
//! # Basic Usage
//!
//! ```rust
//! use hourglass_widget::hourglass::{new, with_width, with_fill_characters};
//!
//! let glass = new(&[with_width(20), with_fill_characters('#', '.')]);
//! let rendered = glass.view(0.25, 0.75);
//! assert_eq!(rendered.lines().count(), 2);
//! ```

use lipgloss_extras::prelude::*;

const DEFAULT_WIDTH: usize = 24;
const DEFAULT_FULL_CHAR: char = '█';
const DEFAULT_EMPTY_CHAR: char = '░';
const DEFAULT_FULL_COLOR: &str = "#7571F9";
const DEFAULT_EMPTY_COLOR: &str = "#606060";

/// Configuration options for the hourglass bars.
pub enum HourglassOption {
    /// Sets the width of each bar in character cells.
    WithWidth(usize),
    /// Sets the characters used for the filled and empty portions.
    WithFillCharacters(char, char),
    /// Sets the color of the filled portion (hex code or ANSI color string).
    WithSolidFill(String),
    /// Sets the color of the empty portion.
    WithEmptyColor(String),
}

impl HourglassOption {
    fn apply(&self, m: &mut Model) {
        match self {
            HourglassOption::WithWidth(width) => m.width = *width,
            HourglassOption::WithFillCharacters(full, empty) => {
                m.full = *full;
                m.empty = *empty;
            }
            HourglassOption::WithSolidFill(color) => m.full_color = color.clone(),
            HourglassOption::WithEmptyColor(color) => m.empty_color = color.clone(),
        }
    }
}

/// Sets the width of each bar in character cells.
pub fn with_width(width: usize) -> HourglassOption {
    HourglassOption::WithWidth(width)
}

/// Sets the characters used for filled and empty sections.
pub fn with_fill_characters(full: char, empty: char) -> HourglassOption {
    HourglassOption::WithFillCharacters(full, empty)
}

/// Sets a solid color for the filled sections.
pub fn with_solid_fill(color: impl Into<String>) -> HourglassOption {
    HourglassOption::WithSolidFill(color.into())
}

/// Sets the color of the empty sections.
pub fn with_empty_color(color: impl Into<String>) -> HourglassOption {
    HourglassOption::WithEmptyColor(color.into())
}

/// The hourglass bar renderer.
#[derive(Debug, Clone)]
pub struct Model {
    /// Width of each bar in character cells.
    pub width: usize,
    /// Character drawn for filled sections.
    pub full: char,
    /// Character drawn for empty sections.
    pub empty: char,
    /// Color of the filled sections.
    pub full_color: String,
    /// Color of the empty sections.
    pub empty_color: String,
}

/// Creates an hourglass renderer with the given options applied over the
/// defaults.
pub fn new(opts: &[HourglassOption]) -> Model {
    let mut m = Model {
        width: DEFAULT_WIDTH,
        full: DEFAULT_FULL_CHAR,
        empty: DEFAULT_EMPTY_CHAR,
        full_color: DEFAULT_FULL_COLOR.to_string(),
        empty_color: DEFAULT_EMPTY_COLOR.to_string(),
    };
    for opt in opts {
        opt.apply(&mut m);
    }
    m
}

impl Model {
    /// Renders the two bars, top over bottom, separated by a newline.
    pub fn view(&self, fill_top: f64, fill_bottom: f64) -> String {
        format!("{}\n{}", self.bar_view(fill_top), self.bar_view(fill_bottom))
    }

    /// Renders a single bar filled to `ratio`.
    ///
    /// The ratio is clamped to `[0, 1]` and the filled width rounds to the
    /// nearest cell, so a nearly drained bar still shows empty rather than
    /// overflowing.
    pub fn bar_view(&self, ratio: f64) -> String {
        let ratio = ratio.clamp(0.0, 1.0);
        let filled = ((self.width as f64) * ratio).round() as usize;
        let filled = filled.min(self.width);

        let full_styled = Style::new()
            .foreground(Color::from(self.full_color.as_str()))
            .render(&self.full.to_string());
        let empty_styled = Style::new()
            .foreground(Color::from(self.empty_color.as_str()))
            .render(&self.empty.to_string());

        let mut bar = String::new();
        bar.push_str(&full_styled.repeat(filled));
        bar.push_str(&empty_styled.repeat(self.width - filled));
        bar
    }
}

impl Default for Model {
    fn default() -> Self {
        new(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lipgloss_extras::lipgloss::strip_ansi;

    #[test]
    fn test_defaults() {
        let glass = new(&[]);
        assert_eq!(glass.width, DEFAULT_WIDTH);
        assert_eq!(glass.full, '█');
        assert_eq!(glass.empty, '░');
    }

    #[test]
    fn test_options_apply() {
        let glass = new(&[
            with_width(10),
            with_fill_characters('#', '.'),
            with_solid_fill("#ff0000"),
            with_empty_color("#222222"),
        ]);
        assert_eq!(glass.width, 10);
        assert_eq!(glass.full, '#');
        assert_eq!(glass.empty, '.');
        assert_eq!(glass.full_color, "#ff0000");
        assert_eq!(glass.empty_color, "#222222");
    }

    #[test]
    fn test_bar_fill_widths() {
        let glass = new(&[with_width(8), with_fill_characters('#', '.')]);

        assert_eq!(strip_ansi(&glass.bar_view(0.0)), "........");
        assert_eq!(strip_ansi(&glass.bar_view(0.5)), "####....");
        assert_eq!(strip_ansi(&glass.bar_view(1.0)), "########");
    }

    #[test]
    fn test_bar_clamps_out_of_range_ratios() {
        let glass = new(&[with_width(4), with_fill_characters('#', '.')]);
        assert_eq!(strip_ansi(&glass.bar_view(-0.5)), "....");
        assert_eq!(strip_ansi(&glass.bar_view(1.5)), "####");
    }

    #[test]
    fn test_complementary_bars_cover_full_width() {
        let glass = new(&[with_width(12), with_fill_characters('#', '.')]);

        for fill_top in [0.0, 0.0833, 0.25, 0.5, 0.75, 1.0] {
            let rendered = strip_ansi(&glass.view(fill_top, 1.0 - fill_top));
            let (top, bottom) = rendered.split_once('\n').expect("two bars");
            assert_eq!(top.chars().count(), 12);
            assert_eq!(bottom.chars().count(), 12);

            // Rounding moves cells between the bars but never loses any.
            let filled = |bar: &str| bar.chars().filter(|&c| c == '#').count();
            assert_eq!(filled(top) + filled(bottom), 12);
        }
    }
}
