//! Macros On Demand - CLI client
//!
//! Enter macro-nutrient goals, fetch candidate restaurant meals matching
//! them, and save favorites. Responses are cached in memory for the life
//! of the process; mutating commands invalidate the affected categories.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use macrosod::api::{ApiClient, TokenStore};
use macrosod::cache::ResponseCache;
use macrosod::cli::{Cli, Command};
use macrosod::data::{
    MacroGoals, MacroPreferences, MacroTotals, Meal, MealOptions, SaveMealRequest, UserDetails,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let tokens = TokenStore::new()
        .ok_or("Could not determine a data directory for token storage")?;
    let mut client = ApiClient::new(cli.api_url, tokens, ResponseCache::new());

    match cli.command {
        Command::Signup { email, password } => {
            client.register(&email, &password).await?;
            println!("Account created. Logged in as {}.", email);
        }
        Command::Login { email, password } => {
            client.login(&email, &password).await?;
            println!("Logged in as {}.", email);
        }
        Command::Logout => {
            client.logout()?;
            println!("Logged out.");
        }
        Command::Search {
            calories,
            protein,
            carbs,
            fats,
            ranked,
        } => {
            let goals = MacroGoals {
                calories,
                protein,
                carbs,
                fats,
            };
            let options = if ranked {
                client.ranked_meal_options(&goals).await?
            } else {
                client.meal_options(&goals).await?
            };
            print_meal_options(&options);
        }
        Command::Save {
            restaurant,
            calories,
            protein,
            carbs,
            fats,
            food_item_ids,
        } => {
            let request = SaveMealRequest {
                restaurant,
                food_item_ids,
                macros: MacroTotals {
                    calories,
                    protein,
                    carbs,
                    fats,
                },
            };
            let saved = client.save_meal(&request).await?;
            println!("Saved meal from {}.", saved.restaurant);
        }
        Command::Saved => {
            let meals = client.saved_meals().await?;
            if meals.is_empty() {
                println!("No saved meals yet.");
            } else {
                for saved in &meals {
                    print_meal(&saved.meal);
                    for item in &saved.food_items {
                        println!("      - {} ({:.0} kcal)", item.item_name, item.calories);
                    }
                }
            }
        }
        Command::Profile => {
            let user = client.user_details().await?;
            print_profile(&user);
        }
        Command::Prefs {
            calories,
            protein,
            carbs,
            fats,
        } => {
            let preferences = if calories.is_some()
                || protein.is_some()
                || carbs.is_some()
                || fats.is_some()
            {
                client
                    .update_preferences(&MacroPreferences {
                        calories_goal: calories,
                        protein_goal: protein,
                        carbs_goal: carbs,
                        fats_goal: fats,
                    })
                    .await?
            } else {
                client.preferences().await?
            };
            print_preferences(&preferences);
        }
    }

    Ok(())
}

/// Prints a meal search result
fn print_meal_options(options: &MealOptions) {
    if options.valid_meals.is_empty() {
        println!("No meals found for those targets.");
        return;
    }
    println!("{} meal(s) found:", options.count);
    for meal in &options.valid_meals {
        print_meal(meal);
    }
}

/// Prints one meal as a single line
fn print_meal(meal: &Meal) {
    println!(
        "  {} - {:.0} kcal, {:.0}g protein, {:.0}g carbs, {:.0}g fat",
        meal.restaurant, meal.calories, meal.protein, meal.carbs, meal.fats
    );
}

/// Prints the user's profile
fn print_profile(user: &UserDetails) {
    let name = format!("{} {}", user.first_name, user.last_name);
    let name = name.trim();
    if name.is_empty() {
        println!("{}", user.email);
    } else {
        println!("{} <{}>", name, user.email);
    }
    print_goal("Calories", user.calories_goal, "kcal");
    print_goal("Protein", user.protein_goal, "g");
    print_goal("Carbs", user.carbs_goal, "g");
    print_goal("Fats", user.fats_goal, "g");
    println!("Saved meals: {}", user.saved_meals.len());
}

/// Prints the user's macro preferences
fn print_preferences(preferences: &MacroPreferences) {
    print_goal("Calories", preferences.calories_goal, "kcal");
    print_goal("Protein", preferences.protein_goal, "g");
    print_goal("Carbs", preferences.carbs_goal, "g");
    print_goal("Fats", preferences.fats_goal, "g");
}

fn print_goal(label: &str, value: Option<u32>, unit: &str) {
    match value {
        Some(v) => println!("  {}: {} {}", label, v, unit),
        None => println!("  {}: not set", label),
    }
}
