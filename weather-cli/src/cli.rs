use anyhow::anyhow;
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{Confirm, InquireError, Password, PasswordDisplayMode, Text};
use tracing::debug;
use weather_core::{
    Config, Event, FetchState, OpenWeatherProvider, ViewState, WeatherApp, provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the OpenWeather API key and the default place.
    Configure,

    /// Show current weather and the 5-day forecast for a place.
    Show {
        /// City name; the configured default place when absent.
        place: Option<String>,
    },

    /// Search places interactively.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { place } => show(place).await,
            Command::Interactive => interactive().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;
    config.set_api_key(api_key.trim().to_string());

    let place = Text::new("Default place:")
        .with_default(&config.default_place)
        .prompt()?;
    config.set_default_place(&place);

    config.save()?;
    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}

fn build_app() -> anyhow::Result<WeatherApp<OpenWeatherProvider>> {
    let config = Config::load()?.with_env_overrides();
    let provider = provider_from_config(&config)?;
    debug!(base_url = provider.base_url(), default_place = %config.default_place, "provider ready");

    Ok(WeatherApp::new(provider, &config.default_place))
}

async fn show(place: Option<String>) -> anyhow::Result<()> {
    let mut app = build_app()?;

    let state = match place.filter(|p| !p.trim().is_empty()) {
        Some(place) => app.dispatch(Event::PlaceChanged(place)).await,
        None => app.start().await,
    };

    if let Some(message) = state.error() {
        return Err(anyhow!("{message}"));
    }

    print!("{}", render::render_state(state, &Local::now()));
    Ok(())
}

fn is_cancel(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Only a change of the fetch state is worth printing; typing into the search
/// box is not.
fn needs_render(shown: Option<&FetchState>, state: &ViewState) -> bool {
    shown != Some(&state.fetch)
}

fn render_if_changed(state: &ViewState, shown: &mut Option<FetchState>) {
    if needs_render(shown.as_ref(), state) {
        println!("{}", render::render_state(state, &Local::now()));
        *shown = Some(state.fetch.clone());
    }
}

/// Apply an event, printing the loading view before any fetch it triggers.
async fn dispatch_rendered(
    app: &mut WeatherApp<OpenWeatherProvider>,
    event: Event,
    shown: &mut Option<FetchState>,
) {
    if let Some(effect) = app.apply(event) {
        render_if_changed(app.state(), shown);
        app.run_effect(effect).await;
    }
}

async fn interactive() -> anyhow::Result<()> {
    let mut app = build_app()?;
    let mut shown = None;

    let place = app.state().place.clone();
    dispatch_rendered(&mut app, Event::PlaceChanged(place), &mut shown).await;

    loop {
        render_if_changed(app.state(), &mut shown);

        if app.state().error().is_some() {
            let question = format!("Try again with {}?", app.state().default_place);
            match Confirm::new(&question).with_default(true).prompt() {
                Ok(true) => {
                    dispatch_rendered(&mut app, Event::Retry, &mut shown).await;
                    continue;
                }
                Ok(false) => {}
                Err(err) if is_cancel(&err) => break,
                Err(err) => return Err(err.into()),
            }
        }

        let input = match Text::new("Search:")
            .with_placeholder("Enter city name...")
            .with_help_message("Esc to quit")
            .prompt()
        {
            Ok(input) => input,
            Err(err) if is_cancel(&err) => break,
            Err(err) => return Err(err.into()),
        };

        app.apply(Event::InputChanged(input));
        dispatch_rendered(&mut app, Event::SearchSubmitted, &mut shown).await;
    }

    Ok(())
}
