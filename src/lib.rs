pub mod alias;
pub mod cli;
pub mod config;
pub mod error;
pub mod mapping_source;
pub mod matching;
pub mod normalize;
pub mod reconcile;
pub mod search;
pub mod types;

use std::{io::Read, sync::Arc, time::Duration};

use log::{debug, info};

use alias::AliasStore;
use cli::{Cli, Command};
use config::Config;
use error::Result;
use mapping_source::{HttpMappingSource, join_merge, spawn_external_merge};
use reconcile::{ProviderPair, reconcile};

pub use matching::ProviderMatcher;
pub use normalize::normalize;
pub use types::{CircuitPurpose, MatchReason, MatchResult};

/// Run one CLI command.
///
/// # Errors
///
/// Returns an error for bad configuration, unreadable stdin or invalid
/// reconcile input. Mapping fetch failures are logged, not returned.
pub async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::from_env()?;
    if let Some(url) = cli.mappings_url {
        config.mappings_url = Some(url);
    }
    if let Some(secs) = cli.timeout_secs.filter(|secs| *secs > 0) {
        config.fetch_timeout = Duration::from_secs(secs);
    }

    let store = Arc::new(AliasStore::with_builtin());
    if let Some(url) = config.mappings_url.clone() {
        // One-shot command: wait for the bounded merge so output reflects it.
        let source = HttpMappingSource::new(url);
        info!("Merging provider mappings from {}", source.url());
        let handle = spawn_external_merge(Arc::clone(&store), source, config.fetch_timeout);
        let merged = join_merge(handle).await;
        debug!("External mapping merge finished (merged={merged})");
    }

    let matcher = ProviderMatcher::new(store);

    match cli.command {
        Command::Normalize { raw } => println!("{}", normalize(&raw)),
        Command::Match { dsr, arin, purpose } => {
            let result = matcher.match_providers(&dsr, &arin, purpose);
            info!(
                "'{dsr}' vs '{arin}' ({purpose}): {} ({})",
                result.reason, result.confidence
            );
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Canonical { raw } => println!("{}", matcher.canonical_provider(&raw)),
        Command::Search { query, limit } => {
            let table = matcher.aliases().snapshot();
            for name in search::search_providers(&table, &query, limit) {
                println!("{name}");
            }
        }
        Command::Reconcile => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            let pairs: Vec<ProviderPair> = serde_json::from_str(&input)?;
            let report = reconcile(&matcher, pairs);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
