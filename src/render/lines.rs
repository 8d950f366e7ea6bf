//! Line splitting and classification for display strings.
//!
//! [`render`] walks a display string one `'\n'`-delimited segment at a time and tags each
//! segment as a citation or prose line. Styling is derived separately from the kind, see
//! [`LineStyle::for_kind`](crate::render::ui::theme::LineStyle::for_kind).

use crate::render::ui::theme::{ColorTheme, LineStyle};
use std::iter::{Enumerate, FusedIterator};
use std::str::Split;

/// Literal prefix marking an attribution line.
pub const CITATION_PREFIX: &str = "Source:";

/// How a rendered line should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Citation,
    Prose,
}

impl LineKind {
    /// Classify a single line. Pure prefix test: case-sensitive, no whitespace tolerance.
    pub fn classify(text: &str) -> Self {
        if text.starts_with(CITATION_PREFIX) {
            LineKind::Citation
        } else {
            LineKind::Prose
        }
    }
}

/// One line of a display string, in original order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderLine<'a> {
    pub text: &'a str,
    pub index: usize,
    pub kind: LineKind,
}

impl<'a> RenderLine<'a> {
    pub fn is_citation(&self) -> bool {
        self.kind == LineKind::Citation
    }

    pub fn style(&self, theme: &ColorTheme) -> LineStyle {
        LineStyle::for_kind(self.kind, theme)
    }
}

/// Lazy iterator returned by [`render`].
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    segments: Enumerate<Split<'a, char>>,
}

impl<'a> Iterator for Lines<'a> {
    type Item = RenderLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.segments.next().map(|(index, text)| RenderLine {
            text,
            index,
            kind: LineKind::classify(text),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.segments.size_hint()
    }
}

impl FusedIterator for Lines<'_> {}

/// Split `text` on `'\n'` and classify every segment.
///
/// Each call starts a fresh split. Nothing is trimmed or collapsed, so `render("")` yields a
/// single empty prose line and `"a\n\nb"` yields three lines.
pub fn render(text: &str) -> Lines<'_> {
    Lines {
        segments: text.split('\n').enumerate(),
    }
}

/// Collect [`render`] into a vector.
pub fn render_lines(text: &str) -> Vec<RenderLine<'_>> {
    render(text).collect()
}
