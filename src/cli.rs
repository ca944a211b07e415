//! Command-line interface for the Macros On Demand client
//!
//! Parses the subcommands with clap; the dispatch in `main` converts the
//! macro flags into the typed goal/preference structs the API client takes.

use clap::{Parser, Subcommand};

use crate::api::DEFAULT_API_URL;

/// Macros On Demand - find restaurant meals matching your macro goals
#[derive(Parser, Debug)]
#[command(name = "macrosod")]
#[command(about = "Find restaurant meals matching your macro-nutrient goals")]
#[command(version)]
pub struct Cli {
    /// Base URL of the backend API
    #[arg(long, value_name = "URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register a new account and start a session
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in with an existing account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log out and discard cached data
    Logout,
    /// Search for meals matching macro targets
    Search {
        /// Calorie limit in kcal
        #[arg(long)]
        calories: Option<u32>,
        /// Protein limit in grams
        #[arg(long)]
        protein: Option<u32>,
        /// Carbohydrate limit in grams
        #[arg(long)]
        carbs: Option<u32>,
        /// Fat limit in grams
        #[arg(long)]
        fats: Option<u32>,
        /// Use the ranked search endpoint
        #[arg(long)]
        ranked: bool,
    },
    /// Save a meal to your favorites
    Save {
        #[arg(long)]
        restaurant: String,
        #[arg(long)]
        calories: f64,
        #[arg(long)]
        protein: f64,
        #[arg(long)]
        carbs: f64,
        #[arg(long)]
        fats: f64,
        /// Comma-separated food item ids making up the meal
        #[arg(long, value_delimiter = ',')]
        food_item_ids: Vec<String>,
    },
    /// List your saved meals
    Saved,
    /// Show your profile
    Profile,
    /// Show your macro preferences, or update them if any flag is given
    Prefs {
        #[arg(long)]
        calories: Option<u32>,
        #[arg(long)]
        protein: Option<u32>,
        #[arg(long)]
        carbs: Option<u32>,
        #[arg(long)]
        fats: Option<u32>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_search_with_all_macros() {
        let cli = Cli::parse_from([
            "macrosod", "search", "--calories", "2000", "--protein", "150", "--carbs", "200",
            "--fats", "60",
        ]);

        match cli.command {
            Command::Search {
                calories,
                protein,
                carbs,
                fats,
                ranked,
            } => {
                assert_eq!(calories, Some(2000));
                assert_eq!(protein, Some(150));
                assert_eq!(carbs, Some(200));
                assert_eq!(fats, Some(60));
                assert!(!ranked);
            }
            other => panic!("Expected search, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_parse_search_partial_macros() {
        let cli = Cli::parse_from(["macrosod", "search", "--calories", "800"]);

        match cli.command {
            Command::Search {
                calories, protein, ..
            } => {
                assert_eq!(calories, Some(800));
                assert_eq!(protein, None);
            }
            other => panic!("Expected search, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_parse_search_ranked_flag() {
        let cli = Cli::parse_from(["macrosod", "search", "--calories", "800", "--ranked"]);
        assert!(matches!(cli.command, Command::Search { ranked: true, .. }));
    }

    #[test]
    fn test_cli_parse_login() {
        let cli = Cli::parse_from([
            "macrosod", "login", "--email", "a@x.com", "--password", "hunter2",
        ]);

        match cli.command {
            Command::Login { email, password } => {
                assert_eq!(email, "a@x.com");
                assert_eq!(password, "hunter2");
            }
            other => panic!("Expected login, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_parse_save_splits_food_item_ids() {
        let cli = Cli::parse_from([
            "macrosod", "save", "--restaurant", "Chipotle", "--calories", "700", "--protein",
            "45", "--carbs", "80", "--fats", "25", "--food-item-ids", "a1,b2,c3",
        ]);

        match cli.command {
            Command::Save {
                restaurant,
                food_item_ids,
                protein,
                ..
            } => {
                assert_eq!(restaurant, "Chipotle");
                assert_eq!(food_item_ids, vec!["a1", "b2", "c3"]);
                assert!((protein - 45.0).abs() < 0.01);
            }
            other => panic!("Expected save, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_parse_prefs_without_flags() {
        let cli = Cli::parse_from(["macrosod", "prefs"]);
        assert!(matches!(
            cli.command,
            Command::Prefs {
                calories: None,
                protein: None,
                carbs: None,
                fats: None,
            }
        ));
    }

    #[test]
    fn test_cli_parse_prefs_with_flags() {
        let cli = Cli::parse_from(["macrosod", "prefs", "--calories", "1800"]);
        assert!(matches!(
            cli.command,
            Command::Prefs {
                calories: Some(1800),
                protein: None,
                ..
            }
        ));
    }

    #[test]
    fn test_cli_default_api_url() {
        let cli = Cli::parse_from(["macrosod", "saved"]);
        assert_eq!(cli.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_cli_custom_api_url() {
        let cli = Cli::parse_from(["macrosod", "--api-url", "http://localhost:8000/api", "saved"]);
        assert_eq!(cli.api_url, "http://localhost:8000/api");
    }
}
