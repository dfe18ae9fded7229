//! Command-line interface and command execution

use crate::config::AdminConfig;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use persistence::{open_store, RecordStore, StoreConfig, StoreFormat};
use player_registry::{PlayerId, PlayerRegistry};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "player-admin")]
#[command(about = "Create, inspect and score players in a player registry file")]
#[command(version)]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Record store file, overrides the configured path
    #[arg(short, long, global = true)]
    pub store: Option<PathBuf>,

    /// Record store encoding (json or xml); inferred from --store when omitted
    #[arg(short, long, global = true)]
    pub format: Option<StoreFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a new player
    Create {
        /// Nickname, must not already be in use; omit for an anonymous player
        nickname: Option<String>,
    },

    /// List all players
    List,

    /// Show one player
    Get {
        /// Player ID
        id: PlayerId,
    },

    /// Delete a player permanently
    Delete {
        /// Player ID
        id: PlayerId,
    },

    /// Add points to a player (negative values subtract)
    AddPoints {
        /// Player ID
        id: PlayerId,

        /// Points to add
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },

    /// Copy the store into another file, possibly in another encoding
    Convert {
        /// Destination file
        target: PathBuf,

        /// Destination encoding; inferred from the target extension when omitted
        #[arg(long)]
        to_format: Option<StoreFormat>,
    },
}

impl Cli {
    /// Apply `--store` / `--format` on top of the loaded configuration
    pub fn apply_overrides(&self, mut config: AdminConfig) -> AdminConfig {
        if let Some(path) = &self.store {
            config.store = StoreConfig::new(path.clone());
        }

        if let Some(format) = self.format {
            config.store.format = format;
        }

        config
    }
}

/// Run one command against `store`, writing human-readable output to `out`
pub fn execute(command: &Command, store: &dyn RecordStore, out: &mut dyn Write) -> Result<()> {
    let mut registry = PlayerRegistry::load_from(store)
        .with_context(|| format!("Failed to load players from {:?}", store.path()))?;

    match command {
        Command::Create { nickname } => {
            let player = registry.create_player(nickname.as_deref())?.clone();
            save(&registry, store)?;
            info!("Created player {}", player.id);
            writeln!(out, "{player}")?;
        }
        Command::List => {
            for player in registry.get_players() {
                writeln!(out, "{player}")?;
            }
        }
        Command::Get { id } => {
            let player = registry.get_player_by_id(*id)?;
            writeln!(out, "{player}")?;
        }
        Command::Delete { id } => {
            let player = registry.delete_player(*id)?;
            save(&registry, store)?;
            info!("Deleted player {}", player.id);
            writeln!(out, "deleted {player}")?;
        }
        Command::AddPoints { id, delta } => {
            registry.add_points(*id, *delta)?;
            save(&registry, store)?;
            let player = registry.get_player_by_id(*id)?;
            writeln!(out, "{player}")?;
        }
        Command::Convert { target, to_format } => {
            let format = to_format.unwrap_or_else(|| StoreFormat::from_path(target));
            let destination = open_store(&StoreConfig::with_format(target.clone(), format))?;
            save(&registry, destination.as_ref())?;
            info!(
                "Converted {} players from {:?} ({}) to {:?} ({})",
                registry.len(),
                store.path(),
                store.format(),
                destination.path(),
                destination.format()
            );
            writeln!(out, "wrote {} players to {}", registry.len(), target.display())?;
        }
    }

    Ok(())
}

fn save(registry: &PlayerRegistry, store: &dyn RecordStore) -> Result<()> {
    registry
        .save_to(store)
        .with_context(|| format!("Failed to save players to {:?}", store.path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use persistence::{open_store_at, Player};
    use player_registry::RegistryError;
    use tempfile::TempDir;

    fn run(store: &dyn RecordStore, command: Command) -> Result<String> {
        let mut out = Vec::new();
        execute(&command, store, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_create_persists_player() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store_at(temp_dir.path().join("players.json")).unwrap();

        let output =
            run(store.as_ref(), Command::Create { nickname: Some("ace".to_string()) }).unwrap();
        assert_eq!(output, "#1 \"ace\" points=0 active=true\n");

        run(store.as_ref(), Command::Create { nickname: None }).unwrap();

        let players = store.load().unwrap();
        assert_eq!(players, vec![Player::new(1, Some("ace".to_string())), Player::new(2, None)]);
    }

    #[test]
    fn test_duplicate_create_fails_without_saving() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store_at(temp_dir.path().join("players.xml")).unwrap();
        run(store.as_ref(), Command::Create { nickname: Some("1".to_string()) }).unwrap();

        let err =
            run(store.as_ref(), Command::Create { nickname: Some("1".to_string()) }).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<RegistryError>(),
            Some(RegistryError::DuplicateKey { .. })
        ));
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_add_points_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store_at(temp_dir.path().join("players.json")).unwrap();
        run(store.as_ref(), Command::Create { nickname: Some("player".to_string()) }).unwrap();

        run(store.as_ref(), Command::AddPoints { id: 1, delta: 10 }).unwrap();
        run(store.as_ref(), Command::AddPoints { id: 1, delta: -25 }).unwrap();

        let output = run(store.as_ref(), Command::Get { id: 1 }).unwrap();
        assert_eq!(output, "#1 \"player\" points=-15 active=true\n");
    }

    #[test]
    fn test_missing_player_reports_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store_at(temp_dir.path().join("players.json")).unwrap();

        let err = run(store.as_ref(), Command::Get { id: 2 }).unwrap_err();
        assert_eq!(err.to_string(), "no such user: 2");

        let err = run(store.as_ref(), Command::Delete { id: 2 }).unwrap_err();
        assert_eq!(err.to_string(), "no such user: 2");
    }

    #[test]
    fn test_delete_then_list() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store_at(temp_dir.path().join("players.json")).unwrap();
        for nickname in ["a", "b"] {
            run(store.as_ref(), Command::Create { nickname: Some(nickname.to_string()) }).unwrap();
        }

        run(store.as_ref(), Command::Delete { id: 1 }).unwrap();

        let output = run(store.as_ref(), Command::List).unwrap();
        assert_eq!(output, "#2 \"b\" points=0 active=true\n");
    }

    #[test]
    fn test_deleted_id_not_reissued_by_later_run() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store_at(temp_dir.path().join("players.xml")).unwrap();
        for nickname in ["a", "b"] {
            run(store.as_ref(), Command::Create { nickname: Some(nickname.to_string()) }).unwrap();
        }
        run(store.as_ref(), Command::Delete { id: 2 }).unwrap();

        let output =
            run(store.as_ref(), Command::Create { nickname: Some("c".to_string()) }).unwrap();

        assert_eq!(output, "#3 \"c\" points=0 active=true\n");
        assert_eq!(store.load_snapshot().unwrap().next_id, Some(4));
    }

    #[test]
    fn test_convert_json_to_xml() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store_at(temp_dir.path().join("players.json")).unwrap();
        run(store.as_ref(), Command::Create { nickname: Some("ace".to_string()) }).unwrap();
        run(store.as_ref(), Command::AddPoints { id: 1, delta: 7 }).unwrap();

        let target = temp_dir.path().join("players.xml");
        run(store.as_ref(), Command::Convert { target: target.clone(), to_format: None }).unwrap();

        let converted = open_store_at(target).unwrap();
        assert_eq!(converted.format(), StoreFormat::Xml);
        assert_eq!(converted.load_snapshot().unwrap(), store.load_snapshot().unwrap());
    }

    #[test]
    fn test_cli_parsing_and_overrides() {
        let cli = Cli::try_parse_from([
            "player-admin",
            "--store",
            "/tmp/players.xml",
            "add-points",
            "3",
            "-10",
        ])
        .unwrap();

        assert!(matches!(cli.command, Command::AddPoints { id: 3, delta: -10 }));

        let config = cli.apply_overrides(AdminConfig::default());
        assert_eq!(config.store.path, PathBuf::from("/tmp/players.xml"));
        assert_eq!(config.store.format, StoreFormat::Xml);

        let cli = Cli::try_parse_from(["player-admin", "--format", "xml", "list"]).unwrap();
        let config = cli.apply_overrides(AdminConfig::default());
        assert_eq!(config.store.format, StoreFormat::Xml);
        assert_eq!(config.store.path, AdminConfig::default().store.path);
    }
}
