//! Terminal presentation for the transcriber.
//!
//! Plays the part of the presentation layer: renders snapshots, field prompts
//! and finished records with `console` styles. Nothing here mutates the
//! workflow.

use std::fmt::Write as _;

use console::Style;

use crate::geometry::{MagnifierLayout, Rectangle};
use crate::workflow::{Change, FieldView, FinishedRecord, Guide, Snapshot};

/// Styled line renderer for the transcription session.
pub struct Terminal {
    // Titles and the active field.
    bold: Style,
    // Stored values and successful transitions.
    green: Style,
    // Rejected actions.
    red: Style,
    // Hints and placeholders.
    dim: Style,
    // Record/step counters.
    cyan: Style,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            bold: Style::new().bold(),
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            dim: Style::new().dim(),
            cyan: Style::new().cyan(),
        }
    }

    /// Status bar line: collection title, description and record counter.
    pub fn status_bar(&self, title: &str, description: &str, record: usize) -> String {
        format!(
            "{} {}  {}",
            self.bold.apply_to(title),
            self.dim.apply_to(description),
            self.cyan.apply_to(format!("record #{record}"))
        )
    }

    pub fn guide(&self, guide: &Guide) -> String {
        let mut out = String::new();
        for step in guide.steps() {
            let _ = writeln!(
                out,
                "{:>2}. {} {}",
                step.index + 1,
                self.bold.apply_to(&step.title),
                self.dim.apply_to(format!(
                    "[{}, width {}] {}",
                    step.input_kind, step.input_width, step.placeholder
                ))
            );
            let _ = writeln!(out, "    {}", step.description);
        }
        out
    }

    /// Helper and input widget for the current field.
    pub fn field(&self, field: &FieldView) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} {}",
            self.cyan.apply_to(&field.counter),
            self.bold.apply_to(&field.title)
        );
        let _ = writeln!(out, "  {}", field.description);
        if !field.example_refs.is_empty() {
            let _ = writeln!(
                out,
                "  {}",
                self.dim
                    .apply_to(format!("examples: {}", field.example_refs.join(", ")))
            );
        }
        if field.value.is_empty() {
            let _ = write!(out, "  {} ", self.dim.apply_to(format!("<{}>", field.placeholder)));
        } else {
            let _ = write!(out, "  {} ", self.green.apply_to(format!("[{}]", field.value)));
        }
        out
    }

    pub fn change(&self, change: Change, snapshot: &Snapshot) -> String {
        let step = snapshot
            .current_step
            .map_or_else(|| "-".to_string(), |s| (s + 1).to_string());
        format!(
            "  {} {} record={} step={}/{} pending={}{}",
            self.green.apply_to("✓"),
            change,
            snapshot.current_record,
            step,
            snapshot.step_count,
            snapshot.pending_answer_count,
            snapshot
                .highlight
                .map(|h| format!(" highlight={}", rect(&h)))
                .unwrap_or_default()
        )
    }

    pub fn rejected(&self, reason: &str) -> String {
        format!("  {} {reason}", self.red.apply_to("✗"))
    }

    pub fn layout(&self, layout: &MagnifierLayout) -> String {
        format!(
            "  {} frame={} zoom offset=({}, {})",
            self.dim.apply_to("magnifier"),
            rect(&layout.frame),
            layout.zoom_offset.x,
            layout.zoom_offset.y
        )
    }

    pub fn finished(&self, record: &FinishedRecord) -> String {
        format!(
            "{} record #{} with {} answers",
            self.green.apply_to("─── Finished"),
            record.record,
            record.answers.len()
        )
    }
}

fn rect(r: &Rectangle) -> String {
    format!("{}x{}@({}, {})", r.width, r.height, r.x, r.y)
}
