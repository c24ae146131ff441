use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;

use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing_subscriber::fmt::format::FmtSpan;

/// Send tracing output to `path` as JSON lines. stdout belongs to the
/// dashboard, so nothing is installed unless a log file is requested.
pub fn init_file_logging(path: &Path) -> Result<()> {
    let file = create_log_file(path)?;
    tracing::subscriber::set_global_default(json_subscriber(file))
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging started");
    Ok(())
}

fn json_subscriber(file: File) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_ansi(false)
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(Mutex::new(file))
        .finish()
}

fn create_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
    }
    File::create(path).wrap_err_with(|| format!("failed to create log file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_written_as_json_lines() {
        let dir = std::env::temp_dir().join(format!("sysdash-log-{}", std::process::id()));
        let path = dir.join("nested").join("sysdash.jsonl");
        let file = create_log_file(&path).unwrap();

        tracing::subscriber::with_default(json_subscriber(file), || {
            tracing::info!(frames = 3, "live session stopped");
        });

        let contents = fs::read_to_string(&path).unwrap();
        let line = contents.lines().next().unwrap();
        assert!(line.starts_with('{'));
        assert!(line.contains("live session stopped"));
        assert!(line.contains("\"frames\":3"));
        let _ = fs::remove_dir_all(&dir);
    }
}
