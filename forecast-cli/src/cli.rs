use anyhow::Context;
use clap::{Parser, Subcommand};
use forecast_core::{Config, ViewState, client_from_config, suggestions};
use inquire::{Password, PasswordDisplayMode, Text};
use std::path::PathBuf;

use crate::{interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "City weather forecast lookup")]
pub struct Cli {
    /// OpenWeather API key; takes precedence over the config file.
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `interactive`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and an optional city list file.
    Configure,

    /// Type a city with suggestions and browse forecasts.
    Interactive,

    /// Show the forecast for a city.
    Show {
        /// City name, e.g. "London".
        city: String,
    },

    /// List city suggestions for a prefix.
    Suggest {
        /// Beginning of a city name.
        query: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?.with_api_key_override(self.api_key);

        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(config)?,
            Command::Interactive => {
                let directory = config.city_directory()?;
                let source = client_from_config(&config);
                interactive::run(source.as_ref(), directory).await?;
            }
            Command::Show { city } => {
                let source = client_from_config(&config);
                let mut state = ViewState::new();

                match state.fetch(source.as_ref(), &city).await {
                    Ok(_) => println!("{}", render::view(&state)),
                    Err(e) => println!("{}", render::alert(&e.to_string())),
                }
            }
            Command::Suggest { query } => {
                let directory = config.city_directory()?;
                for name in suggestions(&query, &directory) {
                    println!("{name}");
                }
            }
        }

        Ok(())
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key);

    let current = config
        .cities_file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let cities_file = Text::new("City list file (leave empty for the built-in list):")
        .with_initial_value(&current)
        .prompt()
        .context("Failed to read city list path")?;

    config.cities_file = Some(cities_file.trim())
        .filter(|p| !p.is_empty())
        .map(PathBuf::from);

    // Fail now rather than on the next lookup.
    config.city_directory()?;

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}
