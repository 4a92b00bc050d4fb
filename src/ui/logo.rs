//! Banner logo for the dashboard header.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

/// App name + version banner rendered in the header panel.
///
/// Falls back to the plain one-line form when the panel is too narrow
/// for the boxed banner.
#[derive(Debug, Clone)]
pub struct Logo {
    plain: String,
    lines: Vec<String>,
}

impl Logo {
    pub fn new(name: &str, version: &str, max_width: usize) -> Self {
        let plain = format!("{name} - v{version}");
        let banner = format!("  {}  v{}  ", name.to_uppercase(), version);

        let lines = if banner.chars().count() + 2 <= max_width {
            let inner = banner.chars().count();
            vec![
                format!("╔{}╗", "═".repeat(inner)),
                format!("║{banner}║"),
                format!("╚{}╝", "═".repeat(inner)),
            ]
        } else {
            vec![plain.clone()]
        };

        Self { plain, lines }
    }

    /// One-line fallback form, also used in the footer and summary.
    pub fn plain(&self) -> &str {
        &self.plain
    }

    /// Height of the rendered banner in terminal rows.
    pub fn rows(&self) -> u16 {
        self.lines.len() as u16
    }

    /// Banner as styled text for a ratatui paragraph.
    pub fn text(&self) -> Text<'static> {
        let lines: Vec<Line<'static>> = self
            .lines
            .iter()
            .map(|l| {
                Line::from(Span::styled(
                    l.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ))
            })
            .collect();
        Text::from(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_terminal_gets_boxed_banner() {
        let logo = Logo::new("sensordeck", "0.1.0", 80);
        assert_eq!(logo.rows(), 3);
        assert_eq!(logo.plain(), "sensordeck - v0.1.0");
    }

    #[test]
    fn test_narrow_terminal_falls_back_to_plain() {
        let logo = Logo::new("sensordeck", "0.1.0", 10);
        assert_eq!(logo.rows(), 1);
    }
}
