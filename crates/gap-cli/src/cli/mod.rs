use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `gap` binary.
#[derive(Debug, Parser)]
#[command(name = "gap", version, about = "GAP compliance API client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::{CommandFactory, Parser};
    use gap_core::FieldGroup;
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, OutputFormat};
    use crate::cli::subcommands::{AuditCommands, FieldCommands, GoalCommands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["gap", "--format", "raw", "--verbose", "hello"])
            .expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Hello));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["gap", "memberships", "--quiet"]).expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.global_flags().quiet);
        assert!(matches!(cli.command, Commands::Memberships));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["gap", "-q", "-v", "hello"]).is_err());
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["gap", "--format", "xml", "hello"]).is_err());
    }

    #[test]
    fn audits_find_takes_a_title() {
        let cli = Cli::try_parse_from(["gap", "audits", "find", "ISO 27001"]).expect("parse");
        match cli.command {
            Commands::Audits {
                action: AuditCommands::Find { title },
            } => assert_eq!(title, "ISO 27001"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn goals_upsert_reads_inline_body() {
        let cli = Cli::try_parse_from(["gap", "goals", "upsert", "--body", r#"{"title":"T"}"#])
            .expect("parse");
        match cli.command {
            Commands::Goals {
                action: GoalCommands::Upsert(input),
            } => assert_eq!(input.body.as_deref(), Some(r#"{"title":"T"}"#)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn json_input_requires_exactly_one_source() {
        assert!(Cli::try_parse_from(["gap", "audits", "upsert"]).is_err());
        assert!(
            Cli::try_parse_from(["gap", "audits", "upsert", "--body", "{}", "--file", "a.json"])
                .is_err()
        );
    }

    #[test]
    fn fields_create_parses_group() {
        let cli = Cli::try_parse_from([
            "gap",
            "fields",
            "create",
            "data_recepients",
            "--body",
            r#"{"name":"Owner"}"#,
        ])
        .expect("parse");
        match cli.command {
            Commands::Fields {
                action: FieldCommands::Create { group, .. },
            } => assert_eq!(group, FieldGroup::DataRecepients),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["gap", "fields", "create", "nope", "--body", "{}"]).is_err());
    }

    #[test]
    fn map_takes_csv_parent_and_push() {
        let cli = Cli::try_parse_from(["gap", "map", "soa.csv", "--parent-id", "12", "--push"])
            .expect("parse");
        match cli.command {
            Commands::Map(args) => {
                assert_eq!(args.csv, PathBuf::from("soa.csv"));
                assert_eq!(args.parent_id, Some(12));
                assert!(args.push);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
