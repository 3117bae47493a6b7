use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `rvw` binary.
#[derive(Debug, Parser)]
#[command(name = "rvw", version, about = "rvw - AI document review from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Backend base URL (overrides api.base_url)
    #[arg(long, global = true, env = "RVW_API_URL")]
    pub api_url: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            api_url: self.api_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::subcommands::{AuthCommands, ReviewCommands, TemplateCommands};
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "rvw",
            "--format",
            "json",
            "--limit",
            "10",
            "--verbose",
            "health",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Health));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["rvw", "review", "list", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Review {
                action: ReviewCommands::List { .. }
            }
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["rvw", "--format", "xml", "health"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["rvw", "--api-url", "http://10.0.0.5:8000", "health"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.api_url.as_deref(), Some("http://10.0.0.5:8000"));
    }

    #[test]
    fn review_new_collects_files_and_options() {
        let cli = Cli::try_parse_from([
            "rvw",
            "review",
            "new",
            "invoice.pdf",
            "po.png",
            "--template",
            "tpl-1",
            "--no-watch",
        ])
        .expect("cli should parse");

        let Commands::Review {
            action: ReviewCommands::New(args),
        } = cli.command
        else {
            panic!("expected review new");
        };
        assert_eq!(args.files.len(), 2);
        assert_eq!(args.template.as_deref(), Some("tpl-1"));
        assert!(args.no_watch);
        assert!(args.rules.is_none());
    }

    #[test]
    fn review_new_requires_at_least_one_file() {
        assert!(Cli::try_parse_from(["rvw", "review", "new"]).is_err());
    }

    #[test]
    fn auth_token_takes_positional_token() {
        let cli = Cli::try_parse_from(["rvw", "auth", "token", "jwt_abc"]).expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Auth {
                action: AuthCommands::Token { ref token }
            } if token == "jwt_abc"
        ));
    }

    #[test]
    fn template_create_accepts_repeated_checklists() {
        let cli = Cli::try_parse_from([
            "rvw",
            "template",
            "create",
            "--name",
            "Loans",
            "--checklist",
            "invoice=Total present",
            "--checklist",
            "bank_statement=Balance matches",
            "--mode",
            "replace",
        ])
        .expect("cli should parse");

        let Commands::Template {
            action: TemplateCommands::Create(args),
        } = cli.command
        else {
            panic!("expected template create");
        };
        assert_eq!(args.name, "Loans");
        assert_eq!(args.rules.checklist.len(), 2);
        assert_eq!(args.rules.mode.as_deref(), Some("replace"));
    }
}
