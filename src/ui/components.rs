//! Reusable UI component helpers
//!
//! Small styled spans shared by the preview screen: the readability badge
//! and relative timestamps.

use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::text::Readability;
use crate::theme::Theme;

/// Colored grade badge, e.g. ` 11th–12th grade `
pub fn readability_badge(readability: &Readability, theme: &Theme) -> Span<'static> {
    Span::styled(
        format!(" {} ", readability.label),
        Style::default()
            .fg(theme.bucket_color(readability.bucket))
            .add_modifier(Modifier::BOLD),
    )
}

/// Placeholder shown until the text is long enough to grade
pub fn pending_badge(chars: usize, min_length: usize, theme: &Theme) -> Span<'static> {
    Span::styled(
        format!(" {}/{} chars ", chars, min_length),
        Style::default().fg(theme.text_dim),
    )
}

/// Dimmed relative timestamp
pub fn timestamp(label: &str, relative: &str, theme: &Theme) -> Span<'static> {
    Span::styled(
        format!("{} {}", label, relative),
        Style::default().fg(theme.text_dim),
    )
}
