//! View state and its transitions.
//!
//! [`reduce`] is a pure function: it never performs I/O. When a transition
//! needs data from the network it returns an [`Effect`], and whoever executes
//! the effect feeds the outcome back as [`Event::FetchSucceeded`] or
//! [`Event::FetchFailed`]. Completions are applied in arrival order, so if a
//! caller runs fetches concurrently the last one to finish wins.
//!
//! The last loaded report stays visible while a new fetch is in flight and is
//! only dropped when a fetch fails.

use crate::{
    config::DEFAULT_PLACE,
    error::FetchError,
    model::{DailyForecastEntry, WeatherReport, WeatherSnapshot},
};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    #[default]
    Idle,
    Loading {
        previous: Option<WeatherReport>,
    },
    Loaded(WeatherReport),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Place the current (or last) fetch is for.
    pub place: String,
    /// Search box contents not yet submitted.
    pub pending_input: String,
    /// Place used by [`Event::Retry`].
    pub default_place: String,
    pub fetch: FetchState,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_PLACE)
    }
}

impl ViewState {
    pub fn new(default_place: &str) -> Self {
        Self {
            place: default_place.to_string(),
            pending_input: String::new(),
            default_place: default_place.to_string(),
            fetch: FetchState::Idle,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.fetch, FetchState::Loading { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match &self.fetch {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        match &self.fetch {
            FetchState::Loaded(report) => Some(report),
            FetchState::Loading { previous } => previous.as_ref(),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.report().map(|r| &r.snapshot)
    }

    pub fn forecast(&self) -> Option<&[DailyForecastEntry]> {
        self.report().map(|r| r.forecast.as_slice())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Switch to a place and fetch it.
    PlaceChanged(String),
    /// The search box changed.
    InputChanged(String),
    /// The search box was submitted.
    SearchSubmitted,
    /// Recover from the error view by loading the default place.
    Retry,
    FetchSucceeded(WeatherReport),
    FetchFailed(FetchError),
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch { place: String },
}

pub fn reduce(mut state: ViewState, event: Event) -> (ViewState, Option<Effect>) {
    match event {
        Event::PlaceChanged(name) => change_place(state, &name),
        Event::InputChanged(text) => {
            state.pending_input = text;
            (state, None)
        }
        Event::SearchSubmitted => {
            let trimmed = state.pending_input.trim().to_string();
            if trimmed.is_empty() {
                return (state, None);
            }
            state.pending_input.clear();
            change_place(state, &trimmed)
        }
        Event::Retry => {
            let place = state.default_place.clone();
            change_place(state, &place)
        }
        Event::FetchSucceeded(report) => {
            state.fetch = FetchState::Loaded(report);
            (state, None)
        }
        Event::FetchFailed(err) => {
            state.fetch = FetchState::Failed(err.to_string());
            (state, None)
        }
    }
}

fn change_place(mut state: ViewState, name: &str) -> (ViewState, Option<Effect>) {
    let place = name.trim();
    if place.is_empty() {
        return (state, None);
    }

    state.place = place.to_string();
    let previous = match std::mem::take(&mut state.fetch) {
        FetchState::Loaded(report) => Some(report),
        FetchState::Loading { previous } => previous,
        FetchState::Idle | FetchState::Failed(_) => None,
    };
    state.fetch = FetchState::Loading { previous };

    let effect = Effect::Fetch {
        place: state.place.clone(),
    };
    (state, Some(effect))
}
