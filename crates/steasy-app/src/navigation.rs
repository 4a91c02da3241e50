//! Screen controller state machine
//!
//! [`transition`] is a pure, total function over `(NavState, NavEvent)`.
//! Pairs that the transition table does not cover yield `None` and leave the
//! state exactly as it was; that includes `Back` from screens with no back
//! target.

use serde::Serialize;
use steasy_core::{AmenityId, StationId};

use crate::screen::{AuthStep, Screen, Tab, TabSelection};
use crate::selection::Selection;

/// Process-wide screen state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavState {
    pub screen: Screen,
    /// Tab restored when leaving a non-tab screen
    pub active_tab: Tab,
    pub selection: Selection,
    /// Startup splash; nothing but the splash renders while set
    pub splash_visible: bool,
}

impl Default for NavState {
    fn default() -> Self {
        Self {
            screen: Screen::LanguageSelect,
            active_tab: Tab::Home,
            selection: Selection::default(),
            splash_visible: true,
        }
    }
}

impl NavState {
    /// Apply an event, returning the state unchanged for a no-op
    #[must_use]
    pub fn apply(&self, event: &NavEvent) -> NavState {
        transition(self, event).unwrap_or_else(|| self.clone())
    }
}

/// Inputs to the screen controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    SplashElapsed,
    LanguageChosen,
    OnboardingFinished,
    /// The current auth step was satisfied
    AuthStepPassed,
    /// All auth steps passed at once
    AuthCompleted,
    TabSelected(TabSelection),
    StationSelected(StationId),
    FacilityClicked(AmenityId),
    NavigateClicked,
    SeeAllClicked,
    Back,
    Logout,
    NotificationsOpened,
    FeedbackOpened,
    AboutOpened,
}

/// Compute the next state, or `None` when the event does not apply
pub fn transition(state: &NavState, event: &NavEvent) -> Option<NavState> {
    if state.splash_visible {
        return match event {
            NavEvent::SplashElapsed => Some(NavState {
                splash_visible: false,
                screen: Screen::LanguageSelect,
                ..state.clone()
            }),
            _ => None,
        };
    }

    let mut next = state.clone();

    match (state.screen, event) {
        (Screen::LanguageSelect, NavEvent::LanguageChosen) => next.screen = Screen::Onboarding,

        (Screen::Onboarding, NavEvent::OnboardingFinished) => {
            next.screen = Screen::Auth(AuthStep::Phone)
        }

        (Screen::Auth(step), NavEvent::AuthStepPassed) => match step.next() {
            Some(step) => next.screen = Screen::Auth(step),
            None => enter_home(&mut next),
        },

        (Screen::Auth(_), NavEvent::AuthCompleted) => enter_home(&mut next),

        (_, NavEvent::TabSelected(selection)) => match selection {
            TabSelection::Assistant => next.screen = Screen::Chat,
            TabSelection::Profile => next.screen = Screen::Profile,
            TabSelection::Home => select_tab(&mut next, Tab::Home),
            TabSelection::Map => select_tab(&mut next, Tab::Map),
            TabSelection::Favorites => select_tab(&mut next, Tab::Favorites),
            TabSelection::Settings => select_tab(&mut next, Tab::Settings),
        },

        (_, NavEvent::StationSelected(id)) => {
            next.selection = state.selection.with_station(id.clone());
            select_tab(&mut next, Tab::Map);
        }

        (
            Screen::Map | Screen::Favorites | Screen::StationList,
            NavEvent::FacilityClicked(id),
        ) => {
            next.selection = state.selection.with_facility(id.clone());
            next.screen = Screen::FacilityDetail;
        }

        (Screen::FacilityDetail | Screen::Map, NavEvent::NavigateClicked) => {
            next.screen = Screen::NavigationRoute
        }

        (Screen::Home, NavEvent::SeeAllClicked) => next.screen = Screen::StationList,

        (Screen::FacilityDetail | Screen::NavigationRoute, NavEvent::Back) => {
            next.screen = Screen::Map
        }
        (Screen::Feedback | Screen::About, NavEvent::Back) => next.screen = Screen::Settings,
        (Screen::Chat | Screen::Notifications, NavEvent::Back) => {
            next.screen = state.active_tab.screen()
        }
        (Screen::StationList, NavEvent::Back) => next.screen = Screen::Home,

        (_, NavEvent::Logout) => next.screen = Screen::Auth(AuthStep::Phone),

        (Screen::Home, NavEvent::NotificationsOpened) => next.screen = Screen::Notifications,
        (Screen::Settings, NavEvent::FeedbackOpened) => next.screen = Screen::Feedback,
        (Screen::Settings, NavEvent::AboutOpened) => next.screen = Screen::About,

        _ => return None,
    }

    Some(next)
}

fn enter_home(state: &mut NavState) {
    select_tab(state, Tab::Home);
}

fn select_tab(state: &mut NavState, tab: Tab) {
    state.active_tab = tab;
    state.screen = tab.screen();
}
