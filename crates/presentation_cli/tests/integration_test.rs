//! Integration tests for CLI
//!
//! These tests verify CLI functionality without running actual commands,
//! but instead test the command parsing and structure.

#![allow(clippy::panic)] // Allow panic! in tests for clear failure messages

use std::ffi::OsString;
use std::path::Path;

use clap::Parser;
use domain::WidgetId;
use presentation_cli::{Cli, Commands, EXIT_RETRY};

fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
    let os_args: Vec<OsString> = args.iter().map(OsString::from).collect();
    Cli::try_parse_from(os_args)
}

#[test]
fn cli_parses_plain_refresh() {
    let cli = parse_args(&["pws-widget", "refresh"]).unwrap();
    if let Commands::Refresh { force, target } = cli.command {
        assert!(!force);
        assert_eq!(target, None);
    } else {
        panic!("Expected Refresh command");
    }
}

#[test]
fn cli_parses_forced_refresh_with_target() {
    let cli = parse_args(&["pws-widget", "refresh", "--force", "--target", "42"]).unwrap();
    if let Commands::Refresh { force, target } = cli.command {
        assert!(force);
        assert_eq!(target, Some(WidgetId::new(42)));
    } else {
        panic!("Expected Refresh command");
    }
}

#[test]
fn cli_rejects_non_numeric_target() {
    assert!(parse_args(&["pws-widget", "refresh", "--target", "abc"]).is_err());
}

#[test]
fn cli_parses_daemon() {
    let cli = parse_args(&["pws-widget", "daemon"]).unwrap();
    assert!(matches!(cli.command, Commands::Daemon));
}

#[test]
fn cli_parses_show_json() {
    let cli = parse_args(&["pws-widget", "show", "--json"]).unwrap();
    assert!(matches!(cli.command, Commands::Show { json: true }));
}

#[test]
fn cli_parses_configure() {
    let cli = parse_args(&[
        "pws-widget",
        "configure",
        "--api-key",
        "secret",
        "--station-id",
        "IMADRID123",
    ])
    .unwrap();
    if let Commands::Configure {
        api_key,
        station_id,
    } = cli.command
    {
        assert_eq!(api_key, "secret");
        assert_eq!(station_id, "IMADRID123");
    } else {
        panic!("Expected Configure command");
    }
}

#[test]
fn cli_configure_requires_station_id() {
    assert!(parse_args(&["pws-widget", "configure", "--api-key", "secret"]).is_err());
}

#[test]
fn cli_global_flags_after_subcommand() {
    let cli = parse_args(&[
        "pws-widget",
        "show",
        "-vv",
        "--config",
        "/etc/pws-widget.toml",
        "--ephemeral",
    ])
    .unwrap();
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.config.as_deref(), Some(Path::new("/etc/pws-widget.toml")));
    assert!(cli.ephemeral);
}

#[test]
fn cli_requires_subcommand() {
    assert!(parse_args(&["pws-widget"]).is_err());
}

#[test]
fn cli_rejects_unknown_command() {
    assert!(parse_args(&["pws-widget", "forecast"]).is_err());
}

#[test]
fn retry_exit_code_is_tempfail() {
    assert_eq!(EXIT_RETRY, 75);
}
