mod markers_cmd;
mod plan_cmd;
mod run_cmd;
mod suite_cmd;
mod validate_cmd;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use tfsmoke_core::tool::registry::DEFAULT_TOOL;

#[derive(Parser)]
#[command(name = "tfsmoke", about = "Plan smoke-test harness for declarative infrastructure tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Report output format for `run` and `suite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a smoke test against a configuration directory
    Run {
        /// Configuration directory to plan
        dir: PathBuf,
        /// A check as name=substring (repeatable)
        #[arg(long = "marker")]
        markers: Vec<String>,
        /// Pull in a preset check group (aws, google, azurerm)
        #[arg(long)]
        provider: Option<String>,
        /// Tool adapter: terraform or tofu
        #[arg(long, default_value = DEFAULT_TOOL)]
        tool: String,
        /// Override the tool binary path
        #[arg(long)]
        tool_bin: Option<String>,
        /// Keep ANSI color codes in tool output
        #[arg(long)]
        color: bool,
        /// A -var assignment as key=value (repeatable)
        #[arg(long = "var")]
        vars: Vec<String>,
        /// A -var-file path (repeatable)
        #[arg(long = "var-file")]
        var_files: Vec<String>,
        /// Per-step timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
        /// Report format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Run a smoke suite from a tfsmoke.toml file
    Suite {
        /// Path to the suite file
        file: PathBuf,
        /// Override the tool binary path
        #[arg(long)]
        tool_bin: Option<String>,
        /// Report format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Init-and-plan only: print the raw plan report
    Plan {
        /// Configuration directory to plan
        dir: PathBuf,
        /// Tool adapter: terraform or tofu
        #[arg(long, default_value = DEFAULT_TOOL)]
        tool: String,
        /// Override the tool binary path
        #[arg(long)]
        tool_bin: Option<String>,
        /// Keep ANSI color codes in tool output
        #[arg(long)]
        color: bool,
    },
    /// List the built-in marker presets
    Markers {
        /// Restrict to one provider group
        #[arg(long)]
        provider: Option<String>,
    },
    /// Parse and validate a suite file without running it
    Validate {
        /// Path to the suite file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so `--format json` output stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            dir,
            markers,
            provider,
            tool,
            tool_bin,
            color,
            vars,
            var_files,
            timeout,
            format,
        } => {
            let code = run_cmd::run_smoke(run_cmd::RunParams {
                dir,
                markers,
                provider,
                tool,
                tool_bin,
                color,
                vars,
                var_files,
                timeout_secs: timeout,
                format,
            })
            .await?;
            if code != 0 {
                std::process::exit(code);
            }
        }
        Commands::Suite {
            file,
            tool_bin,
            format,
        } => {
            let code = suite_cmd::run_suite(&file, tool_bin.as_deref(), format).await?;
            if code != 0 {
                std::process::exit(code);
            }
        }
        Commands::Plan {
            dir,
            tool,
            tool_bin,
            color,
        } => {
            plan_cmd::run_plan(&dir, &tool, tool_bin.as_deref(), color).await?;
        }
        Commands::Markers { provider } => {
            markers_cmd::run_markers(provider.as_deref())?;
        }
        Commands::Validate { file } => {
            validate_cmd::run_validate(&file)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_parses_repeated_markers() {
        let cli = Cli::parse_from([
            "tfsmoke",
            "run",
            "infra/",
            "--marker",
            "vpc=aws_vpc",
            "--marker",
            "bucket=aws_s3_bucket",
            "--format",
            "json",
        ]);
        match cli.command {
            Commands::Run {
                markers, format, ..
            } => {
                assert_eq!(markers, vec!["vpc=aws_vpc", "bucket=aws_s3_bucket"]);
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn run_defaults_to_terraform_and_text() {
        let cli = Cli::parse_from(["tfsmoke", "run", "infra/", "--provider", "aws"]);
        match cli.command {
            Commands::Run {
                tool,
                format,
                color,
                ..
            } => {
                assert_eq!(tool, DEFAULT_TOOL);
                assert_eq!(tool, "terraform");
                assert_eq!(format, OutputFormat::Text);
                assert!(!color);
            }
            _ => panic!("expected run command"),
        }
    }
}
