//! Integration tests for CLI argument parsing through the library surface

use clap::Parser;

use macrosod::api::DEFAULT_API_URL;
use macrosod::cli::{Cli, Command};

#[test]
fn search_accepts_any_subset_of_macro_flags() {
    let cli = Cli::parse_from(["macrosod", "search", "--protein", "150", "--fats", "60"]);

    match cli.command {
        Command::Search {
            calories,
            protein,
            carbs,
            fats,
            ranked,
        } => {
            assert_eq!(calories, None);
            assert_eq!(protein, Some(150));
            assert_eq!(carbs, None);
            assert_eq!(fats, Some(60));
            assert!(!ranked);
        }
        other => panic!("Expected search, got {:?}", other),
    }
}

#[test]
fn search_with_no_flags_parses() {
    let cli = Cli::parse_from(["macrosod", "search"]);
    assert!(matches!(cli.command, Command::Search { .. }));
}

#[test]
fn a_subcommand_is_required() {
    assert!(Cli::try_parse_from(["macrosod"]).is_err());
}

#[test]
fn invalid_macro_value_is_rejected() {
    assert!(Cli::try_parse_from(["macrosod", "search", "--calories", "lots"]).is_err());
}

#[test]
fn api_url_flag_applies_to_any_subcommand() {
    let cli = Cli::parse_from(["macrosod", "--api-url", "http://localhost:9999/api", "logout"]);
    assert_eq!(cli.api_url, "http://localhost:9999/api");
    assert!(matches!(cli.command, Command::Logout));

    let cli = Cli::parse_from(["macrosod", "profile"]);
    assert_eq!(cli.api_url, DEFAULT_API_URL);
}
