use std::path::Path;

use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding an `EnvFilter` directive, e.g. `perfect_maze=debug`.
pub const LOG_ENV: &str = "PERFECT_MAZE_LOG";
pub const LOG_FILE: &str = "perfect-maze.log";

/// Send logs to `log_dir/perfect-maze.log` so they never mix with the maze
/// printed on stdout. The returned guard flushes pending lines when dropped and
/// must be held until the program exits.
pub fn init_tracing(
    log_dir: &Path,
) -> Result<WorkerGuard, Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(log_dir)?;
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwritable_log_dir_is_an_error() {
        // A directory cannot be created beneath a regular file.
        let blocker = std::env::temp_dir().join(format!("perfect-maze-log-{}", std::process::id()));
        std::fs::write(&blocker, b"").unwrap();

        let result = init_tracing(&blocker.join("logs"));
        std::fs::remove_file(&blocker).unwrap();
        assert!(result.is_err());
    }
}
