//! Map and route handlers

use steasy_core::prelude::*;
use steasy_core::{AmenityCategory, Coordinates};

use crate::screen::Screen;
use crate::state::{AppState, LocateTarget, NoticeKind};

use super::{UpdateAction, UpdateResult};

fn on_screen(state: &AppState, screen: Screen) -> bool {
    !state.nav.splash_visible && state.nav.screen == screen
}

pub fn handle_category_toggled(state: &mut AppState, category: AmenityCategory) -> UpdateResult {
    if !on_screen(state, Screen::Map) {
        return UpdateResult::none();
    }
    state.map.toggle_category(category);
    debug!("Map category filter: {:?}", state.map.category);
    UpdateResult::none()
}

pub fn handle_locate_me(state: &mut AppState) -> UpdateResult {
    if !on_screen(state, Screen::Map) || state.map.locating {
        return UpdateResult::none();
    }
    state.map.request += 1;
    state.map.locating = true;
    UpdateResult::action(UpdateAction::LocateUser {
        target: LocateTarget::Map,
        request: state.map.request,
    })
}

pub fn handle_location_resolved(
    state: &mut AppState,
    target: LocateTarget,
    request: u64,
    coordinates: Coordinates,
) -> UpdateResult {
    match target {
        LocateTarget::Map if request == state.map.request => {
            state.map.locating = false;
            state.map.user_location = Some(coordinates);
            state.map.category = None;
            debug!("Map located user at {}", coordinates);
        }
        LocateTarget::Route if request == state.route.request => {
            state.route.loading_location = false;
            state.route.origin = Some(coordinates);
            debug!("Route origin set to {}", coordinates);
        }
        _ => debug!("Dropping stale {:?} location #{}", target, request),
    }
    UpdateResult::none()
}

/// Location failures degrade the view and surface a notice; no retry
pub fn handle_location_failed(
    state: &mut AppState,
    target: LocateTarget,
    request: u64,
    reason: &str,
) -> UpdateResult {
    let current = match target {
        LocateTarget::Map => {
            let current = request == state.map.request;
            if current {
                state.map.locating = false;
            }
            current
        }
        LocateTarget::Route => {
            let current = request == state.route.request;
            if current {
                state.route.loading_location = false;
            }
            current
        }
    };
    if !current {
        debug!("Dropping stale {:?} location failure #{}", target, request);
        return UpdateResult::none();
    }

    warn!("Location unavailable: {}", reason);
    let text = state.text("locationError").to_string();
    state.post_notice(NoticeKind::Warning, text);
    UpdateResult::none()
}

pub fn handle_toggle_guidance(state: &mut AppState) -> UpdateResult {
    if !on_screen(state, Screen::NavigationRoute) {
        return UpdateResult::none();
    }
    state.route.guidance = !state.route.guidance;
    debug!("Guidance {}", if state.route.guidance { "started" } else { "stopped" });
    UpdateResult::none()
}
