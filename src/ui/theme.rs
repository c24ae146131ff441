use ratatui::style::{Color, Modifier, Style};

/// Colors for the dashboard panel and the plain-text notices around it.
#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Color,
    pub border: Color,
    pub label: Color,
    pub value: Color,
    pub live: Color,
    pub stop_notice: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            title: Color::Blue,
            border: Color::Blue,
            label: Color::Cyan,
            value: Color::Magenta,
            live: Color::Green,
            stop_notice: Color::Yellow,
            error: Color::Red,
        }
    }
}

impl Theme {
    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn label_style(&self, live: bool) -> Style {
        if live {
            self.live_style()
        } else {
            Style::default().fg(self.label)
        }
    }

    pub fn value_style(&self, live: bool) -> Style {
        if live {
            self.live_style()
        } else {
            Style::default().fg(self.value)
        }
    }

    /// Rows that change between frames (CPU, memory, disk).
    fn live_style(&self) -> Style {
        Style::default().fg(self.live).add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_rows_are_bold_and_distinct_from_static_rows() {
        let theme = Theme::default();
        assert!(theme.value_style(true).add_modifier.contains(Modifier::BOLD));
        assert!(!theme.value_style(false).add_modifier.contains(Modifier::BOLD));
        assert_ne!(theme.label_style(true).fg, theme.label_style(false).fg);
    }
}
