//! Command-line interface parsing for the `royale` binary
//!
//! Handles the connection options shared by every lookup and the one
//! subcommand per resource. Tags may be given with or without the leading
//! `#`, since an unquoted `#` starts a comment in most shells.

use std::time::Duration;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::cache::Ttl;
use crate::client::{ClientConfig, API_BASE_URL};

/// Error types for CLI argument handling
#[derive(Debug, Error)]
pub enum CliError {
    /// `--cache-ttl` was neither a number of seconds nor `forever`
    #[error("Invalid cache TTL: '{0}'. Expected a number of seconds or 'forever'")]
    InvalidCacheTtl(String),

    /// A tag argument was empty or only `#`
    #[error("Tag must not be empty")]
    EmptyTag,
}

/// Look up Clash Royale players and clans
#[derive(Parser, Debug)]
#[command(name = "royale")]
#[command(about = "Look up Clash Royale players and clans from the command line")]
#[command(version)]
pub struct Cli {
    /// API token from the Clash Royale developer portal
    #[arg(long, env = "ROYALE_API_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 20, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Send requests through this proxy
    #[arg(long, value_name = "URL")]
    pub proxy: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub insecure: bool,

    /// How long responses stay cached
    #[arg(long, value_name = "SECONDS|forever", default_value = "60")]
    pub cache_ttl: String,

    /// API root to send requests to
    #[arg(long, value_name = "URL", default_value = API_BASE_URL)]
    pub base_url: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Resource to look up
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Player profile summary
    Player {
        #[arg(value_name = "TAG")]
        tag: String,
    },
    /// A player's most recent battles
    Battles {
        #[arg(value_name = "TAG")]
        tag: String,

        /// Number of battles to show
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// A player's upcoming chest cycle
    Chests {
        #[arg(value_name = "TAG")]
        tag: String,
    },
    /// Clan profile and member list
    Clan {
        #[arg(value_name = "TAG")]
        tag: String,
    },
    /// A clan's finished river races
    RiverRace {
        #[arg(value_name = "TAG")]
        tag: String,
    },
}

impl Command {
    /// The raw tag argument, as typed
    pub fn tag(&self) -> &str {
        match self {
            Command::Player { tag }
            | Command::Battles { tag, .. }
            | Command::Chests { tag }
            | Command::Clan { tag }
            | Command::RiverRace { tag } => tag,
        }
    }
}

/// Parses a `--cache-ttl` value
///
/// Accepts a whole number of seconds or `forever` (any case).
pub fn parse_ttl(s: &str) -> Result<Ttl, CliError> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("forever") {
        return Ok(Ttl::Forever);
    }

    s.parse::<u64>()
        .map(Ttl::seconds)
        .map_err(|_| CliError::InvalidCacheTtl(s.to_string()))
}

/// Normalizes a tag typed on the command line to the API's `#XXXX` form
pub fn normalize_tag(raw: &str) -> Result<String, CliError> {
    let bare = raw.trim().trim_start_matches('#');
    if bare.is_empty() {
        return Err(CliError::EmptyTag);
    }

    Ok(format!("#{}", bare.to_ascii_uppercase()))
}

impl Cli {
    /// Builds the client configuration from the parsed options
    pub fn client_config(&self) -> Result<ClientConfig, CliError> {
        let mut config = ClientConfig::new(self.token.clone())
            .with_timeout(Duration::from_secs(self.timeout))
            .with_tls_verification(!self.insecure)
            .with_cache_ttl(parse_ttl(&self.cache_ttl)?)
            .with_base_url(self.base_url.clone());

        if let Some(proxy) = &self.proxy {
            config = config.with_proxy(proxy.clone());
        }

        Ok(config)
    }
}
