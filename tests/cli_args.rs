//! Integration tests for CLI argument handling
//!
//! Runs the `royale` binary with arguments that fail or exit before any
//! request would be sent.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_royale"))
        .args(args)
        .env_remove("ROYALE_API_TOKEN")
        .output()
        .expect("Failed to execute royale")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success(), "Expected --help to exit successfully");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("royale"), "Help should mention royale");
    assert!(stdout.contains("--token"), "Help should mention --token");
    assert!(stdout.contains("river-race"), "Help should list river-race");
}

#[test]
fn test_subcommand_help_exits_successfully() {
    let output = run_cli(&["battles", "--help"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("--limit"));
}

#[test]
fn test_missing_token_fails() {
    let output = run_cli(&["player", "#2VVYYRVYP"]);
    assert!(!output.status.success(), "Expected a missing token to fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--token"), "Should name the missing option: {}", stderr);
}

#[test]
fn test_invalid_cache_ttl_prints_error_and_exits() {
    let output = run_cli(&["--token", "t", "--cache-ttl", "soon", "player", "#2VVYYRVYP"]);
    assert!(!output.status.success(), "Expected an invalid TTL to fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid cache TTL"),
        "Should print error message about the TTL: {}",
        stderr
    );
}

#[test]
fn test_empty_tag_prints_error_and_exits() {
    let output = run_cli(&["--token", "t", "clan", "#"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Tag must not be empty"));
}

#[test]
fn test_unknown_subcommand_fails() {
    let output = run_cli(&["--token", "t", "tournaments", "#ABC"]);
    assert!(!output.status.success());
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use royale_api::cache::Ttl;
    use royale_api::cli::{parse_ttl, Cli, Command};

    #[test]
    fn test_cli_chests_subcommand() {
        let cli = Cli::parse_from(["royale", "--token", "t", "chests", "#P"]);
        assert_eq!(
            cli.command,
            Command::Chests {
                tag: "#P".to_string()
            }
        );
    }

    #[test]
    fn test_cli_battles_default_limit() {
        let cli = Cli::parse_from(["royale", "--token", "t", "battles", "#P"]);
        assert_eq!(
            cli.command,
            Command::Battles {
                tag: "#P".to_string(),
                limit: 5
            }
        );
    }

    #[test]
    fn test_parse_ttl_forever() {
        assert_eq!(parse_ttl("forever").unwrap(), Ttl::Forever);
    }

    #[test]
    fn test_default_cache_ttl_is_one_minute() {
        let cli = Cli::parse_from(["royale", "--token", "t", "clan", "#C"]);
        let config = cli.client_config().unwrap();
        assert_eq!(config.cache_ttl(), Ttl::seconds(60));
    }
}
