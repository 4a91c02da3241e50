//! Screen transitions and the state resets each screen performs on entry

use steasy_core::prelude::*;
use steasy_core::{Language, StationId};

use crate::navigation::{transition, NavEvent};
use crate::screen::{AuthStep, Screen};
use crate::settings_store::SettingsPatch;
use crate::state::{AppState, LocateTarget};

use super::{UpdateAction, UpdateResult};

/// Apply a navigation event and run the entry hook of the new screen
pub fn navigate(state: &mut AppState, event: NavEvent) -> UpdateResult {
    let Some(next) = transition(&state.nav, &event) else {
        debug!("Navigation no-op: {:?} on {}", event, state.nav.screen);
        return UpdateResult::none();
    };

    let previous = state.nav.screen;
    state.nav = next;

    if state.nav.screen == previous {
        return UpdateResult::none();
    }
    debug!("Screen {} -> {}", previous, state.nav.screen);
    on_enter(state, previous)
}

/// Every screen starts from a clean slate when it is shown
fn on_enter(state: &mut AppState, previous: Screen) -> UpdateResult {
    match state.nav.screen {
        Screen::Onboarding => state.onboarding.slide = 0,
        Screen::Auth(AuthStep::Phone) if !previous.is_auth() => state.auth.reset(),
        Screen::Auth(AuthStep::Otp) => state.auth.clear_otp(),
        Screen::Home => state.home_query.clear(),
        Screen::StationList => state.directory_query.clear(),
        Screen::Map => state.map.reset(),
        Screen::Feedback => state.feedback.open(),
        Screen::Chat => state.chat.open(),
        Screen::NavigationRoute => {
            state.route.reset();
            state.route.loading_location = true;
            return UpdateResult::action(UpdateAction::LocateUser {
                target: LocateTarget::Route,
                request: state.route.request,
            });
        }
        _ => {}
    }
    UpdateResult::none()
}

/// Choosing a language also sets it globally, but only from the
/// language-select screen
pub fn handle_language_chosen(state: &mut AppState, language: Language) -> UpdateResult {
    if transition(&state.nav, &NavEvent::LanguageChosen).is_none() {
        debug!("LanguageChosen ignored on {}", state.nav.screen);
        return UpdateResult::none();
    }
    if state.settings.update(&SettingsPatch::language(language)) {
        info!("Language set to {}", language);
    }
    navigate(state, NavEvent::LanguageChosen)
}

pub fn handle_onboarding_next(state: &mut AppState) -> UpdateResult {
    if state.nav.splash_visible || state.nav.screen != Screen::Onboarding {
        debug!("OnboardingNext ignored on {}", state.nav.screen);
        return UpdateResult::none();
    }
    if state.onboarding.advance() {
        UpdateResult::none()
    } else {
        navigate(state, NavEvent::OnboardingFinished)
    }
}

/// Stations outside the catalog are rejected before they reach the selection
pub fn handle_station_selected(state: &mut AppState, id: StationId) -> UpdateResult {
    if state.catalog.station(&id).is_none() {
        warn!("Ignoring selection of unknown station {}", id);
        return UpdateResult::none();
    }
    navigate(state, NavEvent::StationSelected(id))
}
