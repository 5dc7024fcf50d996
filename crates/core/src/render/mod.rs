use std::fmt::Write;

use crate::snapshot::ArraySnapshot;
use crate::Frame;

const PROGRESS_WIDTH: usize = 20;

/// Plain-text view of an [`ArraySnapshot`] frame with its pseudocode panel.
///
/// Each call renders from scratch; nothing carries over between frames.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    cell_width: usize,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self { cell_width: 5 }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cell_width(cell_width: usize) -> Self {
        Self {
            cell_width: cell_width.max(2),
        }
    }

    pub fn render_frame(
        &self,
        frame: &Frame<ArraySnapshot>,
        index: usize,
        total: usize,
        pseudocode: &[&str],
    ) -> String {
        self.render(&frame.snapshot, &frame.description, index, total, pseudocode)
    }

    pub fn render(
        &self,
        snapshot: &ArraySnapshot,
        description: &str,
        index: usize,
        total: usize,
        pseudocode: &[&str],
    ) -> String {
        let mut out = String::new();

        let _ = writeln!(
            out,
            "step {}/{} {}",
            index + 1,
            total,
            progress_bar(index + 1, total)
        );

        if snapshot.values.is_empty() {
            out.push_str("  (empty)\n");
        } else {
            out.push_str(&self.row(snapshot.values.iter().map(|value| value.to_string())));
            out.push_str(&self.row(snapshot.marks.iter().map(|mark| mark.glyph().to_string())));
        }
        if !snapshot.output.is_empty() {
            let picked: Vec<String> = snapshot.output.iter().map(i64::to_string).collect();
            let _ = writeln!(out, "  out: {}", picked.join(" "));
        }

        out.push('\n');
        for (number, line) in pseudocode.iter().enumerate() {
            let cursor = if snapshot.line == Some(number) { '>' } else { ' ' };
            let _ = writeln!(out, "{cursor} {line}");
        }

        out.push('\n');
        out.push_str(description);
        out.push('\n');
        out
    }

    fn row(&self, cells: impl Iterator<Item = String>) -> String {
        let mut line = String::from(" ");
        for cell in cells {
            let _ = write!(line, "{cell:>width$}", width = self.cell_width);
        }
        line.push('\n');
        line
    }
}

fn progress_bar(shown: usize, total: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        (shown.min(total) * PROGRESS_WIDTH) / total
    };
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH - filled)
    )
}
