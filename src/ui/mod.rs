pub mod panel;
pub mod print;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::Rect;

use crate::system::Snapshot;
use crate::ui::panel::DashboardPanel;
use crate::ui::theme::Theme;

/// Draw one live frame: the fitted panel anchored at the top-left corner.
pub fn draw(frame: &mut Frame, snapshot: &Snapshot, theme: &Theme) {
    let _render_span = tracing::trace_span!("ui.draw").entered();

    let area = frame.area();
    let panel = DashboardPanel::new(snapshot, theme);
    let (width, height) = panel.size();
    let panel_area = Rect::new(
        area.x,
        area.y,
        width.min(area.width),
        height.min(area.height),
    );
    frame.render_widget(&panel, panel_area);
}
