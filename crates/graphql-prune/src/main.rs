mod cli;
mod command;
mod commands;
mod input_files;
mod output_utils;

use clap::Parser;
pub(crate) use cli::Cli;
pub(crate) use command::CommandResult;
pub(crate) use command::RunnableCommand;

const DEFAULT_LOG_LEVEL: tracing::Level = tracing::Level::INFO;

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::process::ExitCode {
    let mut cli = Cli::parse();
    setup_logger(&cli);

    let Some(command) = cli.cmd.take() else {
        return match cli.run_default().await {
            Ok(()) => std::process::ExitCode::SUCCESS,
            Err(err) => CommandResult::failure(&err).print(),
        };
    };

    command.run(cli).await.print()
}

/// Maps a `LOG_LEVEL` value to a level, or `None` if it isn't recognized.
fn parse_log_level(value: &str) -> Option<tracing::Level> {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Some(tracing::Level::TRACE),
        "debug" | "verbose" => Some(tracing::Level::DEBUG),
        "info" => Some(tracing::Level::INFO),
        "warn" => Some(tracing::Level::WARN),
        "error" => Some(tracing::Level::ERROR),
        _ => None,
    }
}

fn setup_logger(cli: &Cli) {
    let mut log_level_warning = None;
    let log_level =
        if cli.verbose {
            tracing::Level::DEBUG
        } else {
            match std::env::var("LOG_LEVEL") {
                Ok(env_val) => parse_log_level(&env_val).unwrap_or_else(|| {
                    log_level_warning = Some(format!(
                        "Invalid `LOG_LEVEL` environment variable value: \
                        `{}`",
                        env_val.trim(),
                    ));
                    DEFAULT_LOG_LEVEL
                }),
                Err(_) => DEFAULT_LOG_LEVEL,
            }
        };

    // Residual queries go to stdout, so logs stay on stderr.
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();
    log::trace!("Initial logging level set to `{log_level}`.");

    if let Some(warning) = log_level_warning {
        log::warn!("{warning}");
    }
}

#[cfg(test)]
mod tests {
    use super::parse_log_level;

    #[test]
    fn log_level_names_are_case_insensitive() {
        assert_eq!(parse_log_level("TRACE"), Some(tracing::Level::TRACE));
        assert_eq!(parse_log_level(" debug\n"), Some(tracing::Level::DEBUG));
        assert_eq!(parse_log_level("Verbose"), Some(tracing::Level::DEBUG));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        assert_eq!(parse_log_level("loud"), None);
        assert_eq!(parse_log_level(""), None);
    }
}
