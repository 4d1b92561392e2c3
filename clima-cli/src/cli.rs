use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use clima_core::{
    Config, PrecipitationUnit, Providers, SearchStatus, ServiceId, Session, TemperatureUnit,
    UnitPreferences, WindUnit, providers_from_config, search, session::DEFAULT_QUERY,
};

use crate::{interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "clima", version, about = "Weather lookup by place name")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Args)]
pub struct UnitArgs {
    /// Temperature unit: celsius or fahrenheit.
    #[arg(long, default_value_t = TemperatureUnit::Celsius)]
    pub temperature: TemperatureUnit,

    /// Wind speed unit: kmh or mph.
    #[arg(long, default_value_t = WindUnit::Kmh)]
    pub wind: WindUnit,

    /// Precipitation unit: mm or inches.
    #[arg(long, default_value_t = PrecipitationUnit::Mm)]
    pub precipitation: PrecipitationUnit,
}

impl From<&UnitArgs> for UnitPreferences {
    fn from(args: &UnitArgs) -> Self {
        UnitPreferences {
            temperature: args.temperature,
            wind: args.wind,
            precipitation: args.precipitation,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Override the base URL of an upstream service.
    Configure {
        /// Service short name: "nominatim" or "open-meteo".
        service: String,

        /// Remove the override and use the public endpoint again.
        #[arg(long)]
        reset: bool,
    },

    /// Show current weather and forecast for a place.
    Show {
        /// Place name, e.g. "Recife, BR".
        #[arg(default_value = DEFAULT_QUERY)]
        query: String,

        #[command(flatten)]
        units: UnitArgs,

        /// Forecast day for the hourly strip (0 = today).
        #[arg(long, default_value_t = 0)]
        day: usize,

        /// Print the view model as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Search, then change units or day without fetching again.
    Interactive {
        /// Place name to start with.
        #[arg(default_value = DEFAULT_QUERY)]
        query: String,

        #[command(flatten)]
        units: UnitArgs,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { service, reset } => configure(&service, reset),
            Command::Show { query, units, day, json } => {
                let config = Config::load()?;
                let providers = providers_from_config(&config)?;
                let mut session = Session::new(config.display_settings());
                session.set_units(UnitPreferences::from(&units));

                run_search(&mut session, &providers, &query).await;
                if let SearchStatus::Failed(message) = session.status() {
                    bail!("{message}");
                }
                session.select_day(day);

                let view = session.render().context("No weather data available")?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&view)?);
                } else {
                    print!("{}", render::weather(&view));
                }
                Ok(())
            }
            Command::Interactive { query, units } => {
                let config = Config::load()?;
                let providers = providers_from_config(&config)?;
                let mut session = Session::new(config.display_settings());
                session.set_units(UnitPreferences::from(&units));

                interactive::run(&mut session, &providers, &query).await
            }
        }
    }
}

/// One search, start to finish, recorded in the session.
pub async fn run_search(session: &mut Session, providers: &Providers, query: &str) {
    let Some(ticket) = session.begin_search(query) else {
        return;
    };
    eprintln!("Buscando \"{}\"...", ticket.query());

    let outcome =
        search(providers.geocoder.as_ref(), providers.weather.as_ref(), ticket.query()).await;
    session.finish_search(ticket, outcome);
}

fn configure(service: &str, reset: bool) -> anyhow::Result<()> {
    let id = ServiceId::try_from(service)?;
    let mut config = Config::load()?;

    if reset {
        config.reset_service_url(id);
    } else {
        let current = config.service_base_url(id);
        let url = inquire::Text::new(&format!("Base URL for {id}:"))
            .with_default(&current)
            .prompt()
            .context("Failed to read base URL")?;

        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!("Base URL must start with http:// or https://, got '{url}'");
        }
        config.upsert_service_url(id, url.to_string());
    }

    config.save()?;
    println!(
        "{id} -> {} (saved to {})",
        config.service_base_url(id),
        Config::config_file_path()?.display()
    );
    Ok(())
}
