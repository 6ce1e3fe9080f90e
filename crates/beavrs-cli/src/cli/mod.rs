mod commands;

use beavrs_core::common::config::ConfigError;
use beavrs_core::domain::{BuildError, BuildErrorCategory};
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{}", error.diagnostic_line());
            if let Some(summary_line) = error.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("beavrs".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            init_tracing(cli.verbose, cli.quiet);
            dispatch_parsed(cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

/// Logs go to stderr. `RUST_LOG` overrides the level picked by the flags.
fn init_tracing(verbose: bool, quiet: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else if quiet {
        LevelFilter::WARN
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    // A subscriber may already be installed when `run` is called twice in one process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Parser)]
#[command(name = "beavrs", about = "BEAVRS PWR core model generator", version)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Log warnings and errors only
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Build the core model and write the solver input documents
    Generate(commands::GenerateArgs),
    /// Print control-rod bank elevations for one step position
    ControlBanks(commands::ControlBanksArgs),
    /// Print the default model configuration as JSON
    Config,
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Generate(args) => commands::run_generate_command(args),
        CliCommand::ControlBanks(args) => commands::run_control_banks_command(args),
        CliCommand::Config => commands::run_config_command(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn category(&self) -> BuildErrorCategory {
        match self {
            Self::Usage(_) | Self::Config(ConfigError::Parse { .. }) => {
                BuildErrorCategory::InputValidationError
            }
            Self::Config(ConfigError::Read { .. }) => BuildErrorCategory::IoSystemError,
            Self::Build(error) => error.category(),
            Self::Internal(_) => BuildErrorCategory::InternalError,
        }
    }

    fn placeholder(&self) -> &'static str {
        match self {
            Self::Usage(_) => "INPUT.CLI_USAGE",
            Self::Config(ConfigError::Read { .. }) => "IO.CONFIG_READ",
            Self::Config(ConfigError::Parse { .. }) => "INPUT.CONFIG_PARSE",
            Self::Build(error) => error.placeholder(),
            Self::Internal(_) => "INTERNAL.CLI",
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        match self {
            Self::Internal(error) => format!("ERROR: [{}] {error:#}", self.placeholder()),
            _ => format!("ERROR: [{}] {}", self.placeholder(), self),
        }
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        self.category()
            .is_fatal()
            .then(|| format!("FATAL EXIT CODE: {}", self.exit_code()))
    }
}

#[cfg(test)]
mod tests {
    use super::{CliError, run};
    use beavrs_core::domain::BuildError;

    #[test]
    fn unknown_subcommands_are_usage_errors() {
        let error = run(["reticulate"]).expect_err("unknown command should fail");
        assert!(matches!(error, CliError::Usage(_)));
        assert_eq!(error.exit_code(), 2);
        assert!(error.diagnostic_line().starts_with("ERROR: [INPUT.CLI_USAGE]"));
    }

    #[test]
    fn help_exits_cleanly() {
        assert_eq!(run(["--help"]).expect("help should succeed"), 0);
    }

    #[test]
    fn build_errors_keep_their_exit_mapping() {
        let error = CliError::from(BuildError::InvalidStep { step: 575, max: 574 });
        assert_eq!(error.exit_code(), 2);
        assert_eq!(
            error.diagnostic_line(),
            "ERROR: [INPUT.INVALID_STEP] control rod step 575 is outside [0, 574]"
        );
        assert_eq!(error.fatal_exit_line().as_deref(), Some("FATAL EXIT CODE: 2"));
    }

    #[test]
    fn out_of_range_step_is_reported_by_the_command() {
        let error = run(["control-banks", "--step", "575"]).expect_err("step 575 is invalid");
        assert!(matches!(
            error,
            CliError::Build(BuildError::InvalidStep { step: 575, .. })
        ));
    }
}
