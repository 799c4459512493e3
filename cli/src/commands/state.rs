//! `fanout state` — inspect or clear persisted derivation records.

use std::path::Path;

use anyhow::{Context, Result};

use fanout_derivation::source_fingerprint;
use fanout_store::{DerivationStateStore, JsonFileStore, StateKey};

use crate::config::ToolConfig;
use crate::{StateAction, StateArgs};

pub fn run(args: &StateArgs, config: &ToolConfig) -> Result<()> {
    let store = JsonFileStore::new(&config.state_file);
    match &args.action {
        StateAction::Show {
            source_file,
            base_path,
        } => {
            let key = state_key(source_file, base_path.as_deref(), config)?;
            match store.last_index(&key)? {
                Some(last) => {
                    println!("Source fingerprint: {:06}", key.fingerprint);
                    println!("Base path: {}", key.base_path);
                    println!("Last index used: {last}");
                    println!("Next run continues at: {}", last.saturating_add(1));
                }
                None => println!(
                    "No state recorded for fingerprint {:06} at base path {}",
                    key.fingerprint, key.base_path
                ),
            }
        }
        StateAction::Clear {
            source_file,
            base_path,
        } => {
            let key = state_key(source_file, base_path.as_deref(), config)?;
            store.clear(&key)?;
            println!(
                "Cleared state for fingerprint {:06} at base path {}",
                key.fingerprint, key.base_path
            );
        }
    }
    Ok(())
}

fn state_key(source_file: &Path, base_path: Option<&str>, config: &ToolConfig) -> Result<StateKey> {
    let source = std::fs::read_to_string(source_file)
        .with_context(|| format!("reading source file {}", source_file.display()))?;
    let base_path = base_path.unwrap_or(&config.base_path);
    Ok(StateKey::new(source_fingerprint(source.trim()), base_path))
}
