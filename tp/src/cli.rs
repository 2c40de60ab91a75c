//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// TaskPlanner - break a goal into an actionable task plan
#[derive(Parser)]
#[command(
    name = "tp",
    about = "Break a free-text goal into a dependency-resolved task plan using an LLM",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a task plan for a goal
    Generate {
        /// The goal to break down (10-1000 characters)
        goal: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Do not record the plan in the plan store
        #[arg(long)]
        no_save: bool,
    },

    /// List previously generated plans
    Plans {
        /// Show at most this many plans
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a stored plan
    Show {
        /// Plan id as printed by `generate` or `plans`
        id: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Output format for plan commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_requires_command() {
        assert!(Cli::try_parse_from(["tp"]).is_err());
    }

    #[test]
    fn test_cli_parse_generate() {
        let cli = Cli::parse_from(["tp", "generate", "Launch a personal blog"]);
        if let Command::Generate { goal, format, no_save } = cli.command {
            assert_eq!(goal, "Launch a personal blog");
            assert_eq!(format, OutputFormat::Text);
            assert!(!no_save);
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn test_cli_parse_generate_json_no_save() {
        let cli = Cli::parse_from(["tp", "generate", "Launch a personal blog", "-f", "json", "--no-save"]);
        assert!(matches!(
            cli.command,
            Command::Generate {
                format: OutputFormat::Json,
                no_save: true,
                ..
            }
        ));
    }

    #[test]
    fn test_cli_parse_plans() {
        let cli = Cli::parse_from(["tp", "plans", "-n", "5"]);
        assert!(matches!(cli.command, Command::Plans { limit: Some(5), .. }));
    }

    #[test]
    fn test_cli_parse_show() {
        let cli = Cli::parse_from(["tp", "show", "0192-abc", "--format", "json"]);
        if let Command::Show { id, format } = cli.command {
            assert_eq!(id, "0192-abc");
            assert_eq!(format, OutputFormat::Json);
        } else {
            panic!("Expected Show command");
        }
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::parse_from(["tp", "plans", "-c", "/path/to/config.yml", "--log-level", "debug"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.yml")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_output_format_from_str() {
        assert!(matches!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text)));
        assert!(matches!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!("table".parse::<OutputFormat>().is_err());
    }
}
