//! Menu-driven session: one search, then local re-renders.

use std::fmt;

use anyhow::Context;
use clima_core::{
    PrecipitationUnit, Providers, SearchStatus, Session, TemperatureUnit, WindUnit,
};
use inquire::{Select, Text};

use crate::{cli::run_search, render};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    Temperature,
    Wind,
    Precipitation,
    Day,
    Quit,
}

impl Action {
    const ALL: [Action; 6] = [
        Action::Search,
        Action::Day,
        Action::Temperature,
        Action::Wind,
        Action::Precipitation,
        Action::Quit,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Search => "Buscar outro local",
            Action::Temperature => "Unidade de temperatura",
            Action::Wind => "Unidade de vento",
            Action::Precipitation => "Unidade de precipitação",
            Action::Day => "Dia da previsão por hora",
            Action::Quit => "Sair",
        })
    }
}

pub async fn run(session: &mut Session, providers: &Providers, query: &str) -> anyhow::Result<()> {
    run_search(session, providers, query).await;
    show(session);

    loop {
        let action = Select::new("O que deseja fazer?", Action::ALL.to_vec())
            .prompt()
            .context("Failed to read menu choice")?;

        match action {
            Action::Search => {
                let query = Text::new("Local:").prompt().context("Failed to read location")?;
                run_search(session, providers, &query).await;
            }
            Action::Temperature => {
                let unit = Select::new("Temperatura:", TemperatureUnit::all().to_vec()).prompt()?;
                session.set_temperature_unit(unit);
            }
            Action::Wind => {
                let unit = Select::new("Vento:", WindUnit::all().to_vec()).prompt()?;
                session.set_wind_unit(unit);
            }
            Action::Precipitation => {
                let unit =
                    Select::new("Precipitação:", PrecipitationUnit::all().to_vec()).prompt()?;
                session.set_precipitation_unit(unit);
            }
            Action::Day => {
                if let Some(view) = session.render().filter(|v| !v.days.is_empty()) {
                    let labels: Vec<String> = view.days.iter().map(|t| t.label.clone()).collect();
                    let picked = Select::new("Dia:", labels)
                        .with_starting_cursor(session.selected_day())
                        .raw_prompt()?;
                    session.select_day(picked.index);
                }
            }
            Action::Quit => return Ok(()),
        }

        show(session);
    }
}

fn show(session: &Session) {
    match (session.render(), session.status()) {
        (Some(view), _) => print!("{}", render::weather(&view)),
        (None, SearchStatus::Failed(message)) => eprintln!("{message}"),
        (None, _) => eprintln!("Nenhum dado disponível."),
    }
}
