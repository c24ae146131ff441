use std::io::Write;

use color_eyre::Result;
use color_eyre::eyre::{Report, WrapErr, eyre};
use ratatui::Terminal;
use ratatui::backend::Backend;
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

use crate::config::DashboardConfig;
use crate::event::{Event, EventHandler};
use crate::system::{CpuCursor, CpuMode, MetricsSampler, Snapshot};
use crate::ui;
use crate::ui::panel::DashboardPanel;
use crate::ui::print::{render_panel, write_stop_notice};
use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LivePhase {
    Init,
    Running,
    Stopped,
}

/// Outcome of a live session that ended through cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveReport {
    /// Sampled frames drawn, the initial one included. Resize redraws are not counted.
    pub frames: usize,
}

/// Snapshot mode: one blocking sample, one printed panel.
pub fn run_snapshot(
    sampler: &mut MetricsSampler,
    config: &DashboardConfig,
    theme: &Theme,
    out: &mut impl Write,
    styled: bool,
) -> Result<()> {
    let snapshot = sampler
        .sample(CpuMode::Blocking(config.cpu_sample_window))
        .wrap_err("failed to sample system metrics")?;

    let panel = DashboardPanel::new(&snapshot, theme);
    let text = render_panel(&panel, styled)?;
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Live mode on an already initialized terminal. Returns once `cancel` fires
/// or an interrupt event arrives; sampling errors end the session early.
/// Restoring the terminal is left to the caller.
pub async fn run_live<B: Backend>(
    terminal: &mut Terminal<B>,
    sampler: &mut MetricsSampler,
    config: &DashboardConfig,
    theme: &Theme,
    events: &mut EventHandler,
    cancel: &CancellationToken,
) -> Result<LiveReport> {
    let mut phase = LivePhase::Init;
    tracing::debug!(?phase, interval_ms = config.refresh_interval.as_millis() as u64, "live.phase");

    let cursor = sampler.prime();
    let mut snapshot = sample_live(sampler, &cursor)?;
    draw_frame(terminal, &snapshot, theme)?;
    let mut frames = 1usize;

    phase = LivePhase::Running;
    tracing::debug!(?phase, "live.phase");

    let mut next_tick = Instant::now() + config.refresh_interval;
    let mut events_open = true;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            event = events.next(), if events_open => match event {
                Some(Event::Interrupt) => {
                    cancel.cancel();
                    break;
                }
                Some(Event::Resize) => draw_frame(terminal, &snapshot, theme)?,
                None => events_open = false,
            },
            _ = sleep_until(next_tick) => {
                snapshot = sample_live(sampler, &cursor)?;
                draw_frame(terminal, &snapshot, theme)?;
                frames += 1;
                next_tick = Instant::now() + config.refresh_interval;
            }
        }
    }

    phase = LivePhase::Stopped;
    tracing::debug!(?phase, frames, "live.phase");
    Ok(LiveReport { frames })
}

/// STOPPED transition, once the live surface has been torn down: a clean
/// stop prints the notice exactly once, a failure is passed through.
pub fn finish_live(
    result: Result<LiveReport>,
    out: &mut impl Write,
    theme: &Theme,
    styled: bool,
) -> Result<LiveReport> {
    let report = result?;
    write_stop_notice(out, theme, styled)?;
    out.flush()?;
    Ok(report)
}

/// Cause chain on one line, outermost context first.
pub fn error_summary(err: &Report) -> String {
    err.chain()
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}

fn sample_live(sampler: &mut MetricsSampler, cursor: &CpuCursor) -> Result<Snapshot> {
    sampler
        .sample(CpuMode::NonBlocking(cursor))
        .wrap_err("failed to sample system metrics")
}

fn draw_frame<B: Backend>(
    terminal: &mut Terminal<B>,
    snapshot: &Snapshot,
    theme: &Theme,
) -> Result<()> {
    let _frame_span = tracing::debug_span!("live.frame").entered();
    terminal
        .draw(|frame| ui::draw(frame, snapshot, theme))
        .map_err(|e| eyre!("failed to draw frame: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::SampleError;

    #[test]
    fn error_summary_joins_the_chain() {
        let err = Report::new(SampleError::MetricUnavailable {
            metric: "disk usage for /nope".to_string(),
            reason: "not found".to_string(),
        })
        .wrap_err("failed to sample system metrics");

        assert_eq!(
            error_summary(&err),
            "failed to sample system metrics: disk usage for /nope unavailable: not found"
        );
    }

    #[test]
    fn finish_live_prints_notice_once_on_clean_stop() {
        let mut out = Vec::new();
        let report =
            finish_live(Ok(LiveReport { frames: 3 }), &mut out, &Theme::default(), false).unwrap();
        assert_eq!(report.frames, 3);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Dashboard stopped.").count(), 1);
    }

    #[test]
    fn finish_live_passes_failures_through_silently() {
        let mut out = Vec::new();
        let result = finish_live(
            Err(eyre!("disk gone")),
            &mut out,
            &Theme::default(),
            false,
        );
        assert!(result.is_err());
        assert!(out.is_empty());
    }
}
