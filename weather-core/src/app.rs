use tracing::info;

use crate::{
    pipeline::fetch_weather,
    provider::WeatherProvider,
    state::{Effect, Event, ViewState, reduce},
};

/// Owns the view state and executes the effects the reducer asks for.
#[derive(Debug)]
pub struct WeatherApp<P> {
    provider: P,
    state: ViewState,
}

impl<P: WeatherProvider> WeatherApp<P> {
    pub fn new(provider: P, default_place: &str) -> Self {
        Self {
            provider,
            state: ViewState::new(default_place),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Load the place the state was created with.
    pub async fn start(&mut self) -> &ViewState {
        let place = self.state.place.clone();
        self.dispatch(Event::PlaceChanged(place)).await
    }

    /// Apply an event and, if it requests a fetch, run the pipeline and apply
    /// its outcome before returning.
    pub async fn dispatch(&mut self, event: Event) -> &ViewState {
        match self.apply(event) {
            Some(effect) => self.run_effect(effect).await,
            None => &self.state,
        }
    }

    /// Apply an event without executing the effect it returns, so the caller
    /// can show the intermediate state first.
    pub fn apply(&mut self, event: Event) -> Option<Effect> {
        let (next, effect) = reduce(std::mem::take(&mut self.state), event);
        self.state = next;
        effect
    }

    pub async fn run_effect(&mut self, effect: Effect) -> &ViewState {
        let Effect::Fetch { place } = effect;
        info!(%place, "fetching weather");
        let outcome = match fetch_weather(&self.provider, &place).await {
            Ok(report) => Event::FetchSucceeded(report),
            Err(err) => Event::FetchFailed(err),
        };
        self.apply(outcome);
        &self.state
    }
}
