use std::io::{IsTerminal, stderr, stdout};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use color_eyre::Result;
use tokio_util::sync::CancellationToken;

use sysdash::app;
use sysdash::config::DashboardConfig;
use sysdash::event::EventHandler;
use sysdash::logging;
use sysdash::system::MetricsSampler;
use sysdash::ui::print::write_error_line;
use sysdash::ui::theme::Theme;

#[derive(Parser)]
#[command(
    name = "sysdash",
    about = "A CLI dashboard to display your system's information and live stats."
)]
struct Cli {
    /// Keep the dashboard running and refresh every second.
    #[arg(short, long, default_value_t = false)]
    watch: bool,

    /// Write diagnostics to this file (JSON lines).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        logging::init_file_logging(path)?;
    }

    let config = DashboardConfig::default();
    let theme = Theme::default();

    let result = if cli.watch {
        run_watch(&config, &theme).await
    } else {
        run_once(&config, &theme)
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            tracing::error!(error = %app::error_summary(&err), "dashboard failed");
            let styled = stderr().is_terminal();
            write_error_line(&mut stderr(), &app::error_summary(&err), &theme, styled)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_once(config: &DashboardConfig, theme: &Theme) -> Result<()> {
    let mut sampler = MetricsSampler::new(&config.mount_point);
    let styled = stdout().is_terminal();
    app::run_snapshot(&mut sampler, config, theme, &mut stdout().lock(), styled)
}

async fn run_watch(config: &DashboardConfig, theme: &Theme) -> Result<()> {
    let mut sampler = MetricsSampler::new(&config.mount_point);
    let cancel = CancellationToken::new();

    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(cancel.clone());

    let result = app::run_live(
        &mut terminal,
        &mut sampler,
        config,
        theme,
        &mut events,
        &cancel,
    )
    .await;

    drop(events);
    ratatui::restore();

    let styled = stdout().is_terminal();
    let report = app::finish_live(result, &mut stdout(), theme, styled)?;
    tracing::info!(frames = report.frames, "live session stopped");
    Ok(())
}
