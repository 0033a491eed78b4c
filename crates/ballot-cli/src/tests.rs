//! CLI tests.

#[cfg(test)]
mod tests {
    use crate::accounts::dev_account;
    use crate::commands::{execute, Cli, Commands, ConfigCommands};
    use crate::config::CliConfig;
    use ballot_core::EventKind;
    use ballot_storage::{FileStore, LedgerService};
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from(["ballot", "-d", "/tmp/ledger", "--from", "2", "-v", "vote", "1"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/ledger")));
        assert_eq!(cli.from.as_deref(), Some("2"));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Vote { index: 1 }));
    }

    #[test]
    fn test_parse_deploy() {
        let cli = Cli::try_parse_from(["ballot", "deploy", "Yes", "No", "--force"]).unwrap();
        match cli.command {
            Commands::Deploy { names, force } => {
                assert_eq!(names, vec!["Yes", "No"]);
                assert!(force);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["ballot", "deploy"]).unwrap();
        assert!(matches!(cli.command, Commands::Deploy { ref names, force: false } if names.is_empty()));
    }

    #[test]
    fn test_parse_events() {
        let cli = Cli::try_parse_from(["ballot", "events", "--kind", "new-voter", "--since", "3", "--follow"]).unwrap();
        match cli.command {
            Commands::Events { kind, since, follow, interval, json } => {
                assert_eq!(kind, Some(EventKind::NewVoter));
                assert_eq!(since, 3);
                assert!(follow);
                assert_eq!(interval, 1000);
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Cli::try_parse_from(["ballot", "events", "--kind", "transfer"]).is_err());
    }

    #[test]
    fn test_parse_rejects_bad_index() {
        assert!(Cli::try_parse_from(["ballot", "vote", "-1"]).is_err());
        assert!(Cli::try_parse_from(["ballot", "vote", "first"]).is_err());
        assert!(Cli::try_parse_from(["ballot", "give-right"]).is_err());
    }

    #[test]
    fn test_parse_config_commands() {
        let cli = Cli::try_parse_from(["ballot", "config", "set", "log_level", "debug"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommands::Set { ref key, ref value }) if key == "log_level" && value == "debug"
        ));

        let cli = Cli::try_parse_from(["ballot", "config", "reset", "--yes"]).unwrap();
        assert!(matches!(cli.command, Commands::Config(ConfigCommands::Reset { yes: true })));

        let cli = Cli::try_parse_from(["ballot", "config", "completions", "bash"]).unwrap();
        assert!(matches!(cli.command, Commands::Config(ConfigCommands::Completions { .. })));
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut config = CliConfig {
            data_dir: temp_dir.path().join("ledger"),
            ..CliConfig::default()
        };
        config.set("default_account", "3").unwrap();
        config.set("proposals", "Alpha,Beta").unwrap();
        config.save_to(&config_path).unwrap();

        let toml_str = std::fs::read_to_string(&config_path).unwrap();
        assert!(toml_str.contains("Alpha"));

        let loaded = CliConfig::load_from(&config_path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_creates_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let config = CliConfig::load_from(&config_path).unwrap();
        assert_eq!(config, CliConfig::default());
        assert!(config_path.exists());
    }

    fn ledger_cli(dir: &std::path::Path, from: &str, args: &[&str]) -> Cli {
        let mut full = vec!["ballot", "-d", dir.to_str().unwrap(), "--from", from];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    #[tokio::test]
    async fn test_deploy_and_simulate() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("ledger");

        execute(ledger_cli(&dir, "0", &["deploy"]), CliConfig::default()).await.unwrap();
        execute(ledger_cli(&dir, "0", &["simulate"]), CliConfig::default()).await.unwrap();
        execute(ledger_cli(&dir, "0", &["events", "--kind", "voted"]), CliConfig::default())
            .await
            .unwrap();

        let service = LedgerService::open(FileStore::open(&dir).unwrap()).unwrap();
        service.read(|ballot| {
            assert_eq!(ballot.chairperson(), dev_account(0));
            assert_eq!(ballot.proposal(0).unwrap().vote_count, 4);
            assert_eq!(ballot.winner_name().as_str(), "Proposal 1");
            assert_eq!(ballot.events().len(), 8);
            assert_eq!(ballot.voter(&dev_account(4)).delegate, Some(dev_account(3)));
        });
    }

    #[tokio::test]
    async fn test_client_side_checks() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("ledger");
        execute(ledger_cli(&dir, "0", &["deploy", "A", "B"]), CliConfig::default()).await.unwrap();

        let err = execute(ledger_cli(&dir, "1", &["give-right", "2"]), CliConfig::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Caller is not the chairperson"));

        let err = execute(ledger_cli(&dir, "0", &["vote", "2"]), CliConfig::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("out of range"));

        let err = execute(ledger_cli(&dir, "5", &["vote", "0"]), CliConfig::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Has no right to vote");

        let err = execute(ledger_cli(&dir, "0", &["deploy"]), CliConfig::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already"));
    }

    #[tokio::test]
    async fn test_commands_require_deployment() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("missing");
        assert!(execute(ledger_cli(&dir, "0", &["winner"]), CliConfig::default()).await.is_err());
    }
}
