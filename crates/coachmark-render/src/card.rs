#![forbid(unsafe_code)]

//! Tooltip card content and measurement.
//!
//! The card is laid out as
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ Title (1/3)             [x]  │  header: heading text + dismiss control
//! │                              │
//! │ Description text, wrapped to │  body
//! │ the inner width.             │
//! │                              │
//! │ [<]                    [>]   │  controls: previous + next/finish
//! └──────────────────────────────┘
//! ```
//!
//! Measurement is pure: [`CardLayout::measure`] turns a [`CardContent`] and a
//! width into a size and control hit regions using [`CardMetrics`]. The
//! measured height is what the renderer feeds back into the placement solver.

use coachmark_core::{Offset, Rect, Size, Step, WalkthroughConfig};

use crate::text::{display_width, wrap_text};

/// A tappable control on the card.
pub use coachmark_runtime::NavAction as CardControl;

/// Typography and spacing used to measure a card, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardMetrics {
    /// Inner padding on every side.
    pub padding: f32,
    /// Average advance of one text column.
    pub glyph_advance: f32,
    pub title_line_height: f32,
    pub body_line_height: f32,
    /// Space between the header and the body.
    pub header_gap: f32,
    /// Space between the body and the control row.
    pub controls_gap: f32,
    /// Side of a square icon control; also the control row height.
    pub control_size: f32,
    /// Horizontal padding around a text button label.
    pub text_button_padding: f32,
    /// Minimum distance between the card and the viewport side edges.
    pub edge_inset: f32,
    pub corner_radius: f32,
}

impl Default for CardMetrics {
    fn default() -> Self {
        Self {
            padding: 16.0,
            glyph_advance: 8.0,
            title_line_height: 22.0,
            body_line_height: 20.0,
            header_gap: 8.0,
            controls_gap: 16.0,
            control_size: 48.0,
            text_button_padding: 12.0,
            edge_inset: 16.0,
            corner_radius: 12.0,
        }
    }
}

impl CardMetrics {
    /// Card width for a viewport: the configured maximum, narrowed so the
    /// card keeps `edge_inset` from both sides.
    pub fn card_width(&self, max_width: f32, viewport: Size) -> f32 {
        max_width.min(viewport.width - 2.0 * self.edge_inset).max(0.0)
    }

    fn columns(&self, width: f32) -> usize {
        if self.glyph_advance <= 0.0 || width <= 0.0 {
            return 0;
        }
        (width / self.glyph_advance).floor() as usize
    }
}

/// What a card shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CardContent {
    pub title: String,
    /// Step counter shown after the title, e.g. `(2/5)`.
    pub counter: Option<String>,
    pub description: String,
    /// Label for the previous control; `None` hides it.
    pub previous: Option<String>,
    /// The forward control (`Next` or `Finish`) and its label.
    pub forward: Option<(CardControl, String)>,
}

impl CardContent {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn counter(mut self, counter: impl Into<String>) -> Self {
        self.counter = Some(counter.into());
        self
    }

    #[must_use]
    pub fn previous(mut self, label: impl Into<String>) -> Self {
        self.previous = Some(label.into());
        self
    }

    #[must_use]
    pub fn next(mut self, label: impl Into<String>) -> Self {
        self.forward = Some((CardControl::Next, label.into()));
        self
    }

    #[must_use]
    pub fn finish(mut self, label: impl Into<String>) -> Self {
        self.forward = Some((CardControl::Finish, label.into()));
        self
    }

    /// The built-in card for `step` at 1-based position `current` of `total`.
    pub fn for_step(step: &Step, current: usize, total: usize, config: &WalkthroughConfig) -> Self {
        let content = Self::new(step.title.clone(), step.description.clone())
            .counter(config.format_counter(current, total));
        let content = if current > 1 {
            content.previous(config.previous_button_text.clone())
        } else {
            content
        };
        if current < total {
            content.next(config.next_button_text.clone())
        } else {
            let label = step
                .button_text
                .clone()
                .unwrap_or_else(|| config.finish_button_text.clone());
            content.finish(label)
        }
    }

    /// Title and counter as one line of text.
    pub fn heading(&self) -> String {
        match &self.counter {
            Some(counter) => format!("{} {}", self.title, counter),
            None => self.title.clone(),
        }
    }
}

/// Replaces the built-in card content: `(step, 1-based index, total)`.
pub type CardHook = Box<dyn Fn(&Step, usize, usize) -> CardContent>;

/// A control's hit region, relative to the card's top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlRegion {
    pub control: CardControl,
    pub label: String,
    pub rect: Rect,
}

/// A measured card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub size: Size,
    pub heading_lines: Vec<String>,
    pub body_lines: Vec<String>,
    /// Dismiss first, then previous, then the forward control.
    pub controls: Vec<ControlRegion>,
}

impl CardLayout {
    /// Measure `content` at `width`.
    pub fn measure(content: &CardContent, width: f32, metrics: &CardMetrics) -> Self {
        let m = metrics;
        let inner_width = (width - 2.0 * m.padding).max(0.0);
        let heading_width = (inner_width - m.control_size).max(0.0);

        let heading_lines = wrap_text(&content.heading(), m.columns(heading_width));
        let body_lines = wrap_text(&content.description, m.columns(inner_width));

        let header_h = (heading_lines.len() as f32 * m.title_line_height).max(m.control_size);
        let body_h = body_lines.len() as f32 * m.body_line_height;
        let controls_y = m.padding + header_h + m.header_gap + body_h + m.controls_gap;
        let height = controls_y + m.control_size + m.padding;

        let right = width - m.padding;
        let mut controls = vec![ControlRegion {
            control: CardControl::Dismiss,
            label: "x".to_owned(),
            rect: Rect::new(right - m.control_size, m.padding, m.control_size, m.control_size),
        }];
        if let Some(label) = &content.previous {
            controls.push(ControlRegion {
                control: CardControl::Previous,
                label: label.clone(),
                rect: Rect::new(m.padding, controls_y, m.control_size, m.control_size),
            });
        }
        if let Some((control, label)) = &content.forward {
            let button_w = match control {
                CardControl::Finish => (display_width(label) as f32 * m.glyph_advance
                    + 2.0 * m.text_button_padding)
                    .max(m.control_size),
                _ => m.control_size,
            };
            controls.push(ControlRegion {
                control: *control,
                label: label.clone(),
                rect: Rect::new(right - button_w, controls_y, button_w, m.control_size),
            });
        }

        Self {
            size: Size::new(width, height),
            heading_lines,
            body_lines,
            controls,
        }
    }

    /// The control under `point`, with `point` relative to the card origin.
    pub fn control_at(&self, point: Offset) -> Option<CardControl> {
        self.controls
            .iter()
            .find(|region| region.rect.contains(point))
            .map(|region| region.control)
    }

    pub fn region(&self, control: CardControl) -> Option<&ControlRegion> {
        self.controls.iter().find(|region| region.control == control)
    }
}
