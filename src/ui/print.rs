use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{
    Attribute, Color as CtColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor, Stylize,
};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier};
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

use crate::ui::panel::DashboardPanel;
use crate::ui::theme::Theme;

pub const STOP_NOTICE: &str = "Dashboard stopped.";

/// Render the panel off-screen and return it as text, one line per row.
pub fn render_panel(panel: &DashboardPanel, styled: bool) -> io::Result<String> {
    let (width, height) = panel.size();
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    panel.render(area, &mut buf);
    buffer_to_text(&buf, styled)
}

/// Serialize a buffer. Cells covered by a wide grapheme on their left are
/// skipped; styling is emitted as ANSI sequences only when `styled`.
pub fn buffer_to_text(buf: &Buffer, styled: bool) -> io::Result<String> {
    let area = buf.area;
    let mut out: Vec<u8> = Vec::new();

    for y in area.top()..area.bottom() {
        let mut hidden = 0usize;
        let mut current = None;
        for x in area.left()..area.right() {
            let Some(cell) = buf.cell((x, y)) else {
                continue;
            };
            if hidden > 0 {
                hidden -= 1;
                continue;
            }
            let symbol = cell.symbol();
            hidden = symbol.width().saturating_sub(1);

            if styled {
                let style = (cell.fg, cell.bg, cell.modifier);
                if current != Some(style) {
                    queue!(
                        out,
                        SetAttribute(Attribute::Reset),
                        SetForegroundColor(to_crossterm(cell.fg)),
                        SetBackgroundColor(to_crossterm(cell.bg))
                    )?;
                    if cell.modifier.contains(Modifier::BOLD) {
                        queue!(out, SetAttribute(Attribute::Bold))?;
                    }
                    if cell.modifier.contains(Modifier::DIM) {
                        queue!(out, SetAttribute(Attribute::Dim))?;
                    }
                    current = Some(style);
                }
            }
            queue!(out, Print(symbol))?;
        }
        if styled {
            queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
        }
        queue!(out, Print('\n'))?;
    }

    String::from_utf8(out).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

pub fn write_stop_notice(out: &mut impl Write, theme: &Theme, styled: bool) -> io::Result<()> {
    if styled {
        writeln!(
            out,
            "{}",
            STOP_NOTICE.bold().with(to_crossterm(theme.stop_notice))
        )
    } else {
        writeln!(out, "{STOP_NOTICE}")
    }
}

pub fn write_error_line(
    out: &mut impl Write,
    message: &str,
    theme: &Theme,
    styled: bool,
) -> io::Result<()> {
    let line = format!("error: {message}");
    if styled {
        writeln!(out, "{}", line.with(to_crossterm(theme.error)))
    } else {
        writeln!(out, "{line}")
    }
}

fn to_crossterm(color: Color) -> CtColor {
    match color {
        Color::Reset => CtColor::Reset,
        Color::Black => CtColor::Black,
        Color::Red => CtColor::DarkRed,
        Color::Green => CtColor::DarkGreen,
        Color::Yellow => CtColor::DarkYellow,
        Color::Blue => CtColor::DarkBlue,
        Color::Magenta => CtColor::DarkMagenta,
        Color::Cyan => CtColor::DarkCyan,
        Color::Gray => CtColor::Grey,
        Color::DarkGray => CtColor::DarkGrey,
        Color::LightRed => CtColor::Red,
        Color::LightGreen => CtColor::Green,
        Color::LightYellow => CtColor::Yellow,
        Color::LightBlue => CtColor::Blue,
        Color::LightMagenta => CtColor::Magenta,
        Color::LightCyan => CtColor::Cyan,
        Color::White => CtColor::White,
        Color::Rgb(r, g, b) => CtColor::Rgb { r, g, b },
        Color::Indexed(i) => CtColor::AnsiValue(i),
    }
}
