mod client;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client::{ApiClient, GenerateRecipeRequest};

#[derive(Parser)]
#[command(name = "sous")]
#[command(about = "Sous recipe generator CLI", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(long, global = true, env = "SOUS_SERVER", default_value = "http://localhost:3000")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ping the server
    Ping,
    /// List selectable ingredients, categories and actions
    Options,
    /// Look up a recipe, generating it if the server has none cached
    Generate {
        /// Ingredient to use (repeatable, order matters)
        #[arg(short, long = "ingredient")]
        ingredients: Vec<String>,
        /// Dish category, e.g. "Breakfast"
        #[arg(long)]
        category: String,
        /// Cooking action, e.g. "fry"
        #[arg(long)]
        action: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = ApiClient::new(&cli.server);

    match cli.command {
        Commands::Ping => {
            println!("{}", client.ping().await?.message);
        }
        Commands::Options => {
            print_options(&client).await?;
        }
        Commands::Generate {
            ingredients,
            category,
            action,
        } => {
            generate(&client, &ingredients, &category, &action).await?;
        }
    }

    Ok(())
}

async fn print_options(client: &ApiClient) -> Result<()> {
    let options = client.options().await?;

    println!("Ingredients: {}", options.ingredients.join(", "));
    println!("Categories:  {}", options.categories.join(", "));
    println!("Actions:     {}", options.actions.join(", "));

    Ok(())
}

async fn generate(
    client: &ApiClient,
    ingredients: &[String],
    category: &str,
    action: &str,
) -> Result<()> {
    let response = client
        .generate(&GenerateRecipeRequest {
            ingredients,
            category,
            action,
        })
        .await?;

    println!("{}\n", response.heading);
    println!("{}", response.text.trim());

    match (response.source.as_str(), response.generator_status) {
        ("cache", _) => eprintln!("\n(from cache)"),
        ("generated", _) if !response.persisted => {
            eprintln!("\n(generated, not cached)")
        }
        ("generator_error", Some(status)) => {
            eprintln!("\n(generation service returned {})", status)
        }
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "sous",
            "generate",
            "-i",
            "Eggs",
            "--ingredient",
            "Potato",
            "--category",
            "Breakfast",
            "--action",
            "fry",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate {
                ingredients,
                category,
                action,
            } => {
                assert_eq!(ingredients, vec!["Eggs", "Potato"]);
                assert_eq!(category, "Breakfast");
                assert_eq!(action, "fry");
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_server_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["sous", "ping", "--server", "http://recipes:8080"]).unwrap();
        assert_eq!(cli.server, "http://recipes:8080");
    }

    #[test]
    fn test_generate_requires_action() {
        assert!(Cli::try_parse_from(["sous", "generate", "-i", "Eggs", "--category", "Meals"]).is_err());
    }
}
