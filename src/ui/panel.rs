use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use crate::format::{format_bytes, format_percent, pad_to_width};
use crate::system::Snapshot;
use crate::ui::theme::Theme;

pub const TITLE: &str = " \u{1F4BB} System Dashboard ";

const PADDING_X: u16 = 2;
const PADDING_Y: u16 = 1;
const COLUMN_GAP: usize = 2;

/// One label/value line of the panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRow {
    pub label: String,
    pub value: String,
    /// Changes between frames and is emphasized.
    pub live: bool,
}

impl PanelRow {
    fn fixed(label: impl Into<String>, value: impl Into<String>) -> Self {
        PanelRow {
            label: label.into(),
            value: value.into(),
            live: false,
        }
    }

    fn live(label: impl Into<String>, value: impl Into<String>) -> Self {
        PanelRow {
            label: label.into(),
            value: value.into(),
            live: true,
        }
    }
}

/// Rows in display order: identity first, then usage, then network.
pub fn panel_rows(snapshot: &Snapshot) -> Vec<PanelRow> {
    let memory = &snapshot.memory;
    let disk = &snapshot.disk;
    vec![
        PanelRow::fixed("OS", snapshot.os_name.as_str()),
        PanelRow::fixed("Architecture", snapshot.architecture.as_str()),
        PanelRow::fixed(
            "CPU Cores",
            format!(
                "{} Cores, {} Threads",
                snapshot.physical_cores, snapshot.logical_cores
            ),
        ),
        PanelRow::live("CPU Usage", format_percent(snapshot.cpu_usage_percent)),
        PanelRow::live(
            "Memory Usage",
            format!(
                "{} ({} / {})",
                format_percent(memory.percent),
                format_bytes(memory.used_bytes),
                format_bytes(memory.total_bytes)
            ),
        ),
        PanelRow::live(
            format!("Disk Usage ({})", snapshot.disk_mount.display()),
            format!(
                "{} ({} / {})",
                format_percent(disk.percent),
                format_bytes(disk.used_bytes),
                format_bytes(disk.total_bytes)
            ),
        ),
        PanelRow::fixed(
            "Network",
            format!(
                "Sent: {} | Received: {}",
                format_bytes(snapshot.network.bytes_sent),
                format_bytes(snapshot.network.bytes_received)
            ),
        ),
    ]
}

/// Bordered two-column panel sized to fit its content.
pub struct DashboardPanel<'a> {
    rows: Vec<PanelRow>,
    theme: &'a Theme,
}

impl<'a> DashboardPanel<'a> {
    pub fn new(snapshot: &Snapshot, theme: &'a Theme) -> Self {
        DashboardPanel {
            rows: panel_rows(snapshot),
            theme,
        }
    }

    fn label_width(&self) -> usize {
        self.rows.iter().map(|r| r.label.width()).max().unwrap_or(0)
    }

    /// Outer (width, height) including border and padding.
    pub fn size(&self) -> (u16, u16) {
        let label_width = self.label_width();
        let content_width = self
            .rows
            .iter()
            .map(|r| label_width + COLUMN_GAP + r.value.width())
            .max()
            .unwrap_or(0);
        let inner_width = (content_width + 2 * PADDING_X as usize).max(TITLE.width() + 2);
        let width = inner_width + 2;
        let height = self.rows.len() + 2 * PADDING_Y as usize + 2;
        (clamp_u16(width), clamp_u16(height))
    }

    fn lines(&self) -> Vec<Line<'_>> {
        let label_width = self.label_width();
        self.rows
            .iter()
            .map(|row| {
                Line::from(vec![
                    Span::styled(
                        pad_to_width(&row.label, label_width + COLUMN_GAP),
                        self.theme.label_style(row.live),
                    ),
                    Span::styled(row.value.as_str(), self.theme.value_style(row.live)),
                ])
            })
            .collect()
    }
}

impl Widget for &DashboardPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_style())
            .title(Span::styled(TITLE, self.theme.title_style()))
            .padding(Padding::new(PADDING_X, PADDING_X, PADDING_Y, PADDING_Y));

        Paragraph::new(self.lines()).block(block).render(area, buf);
    }
}

fn clamp_u16(v: usize) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}
