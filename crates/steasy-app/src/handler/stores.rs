//! Favorites, settings and search-query handlers

use steasy_core::prelude::*;
use steasy_core::{AmenityId, StationId};

use crate::screen::Screen;
use crate::settings_store::SettingsPatch;
use crate::state::{AppState, SavedFilter};

use super::UpdateResult;

pub fn handle_search_query(state: &mut AppState, query: String) -> UpdateResult {
    if state.nav.screen == Screen::Home {
        state.home_query = query;
    }
    UpdateResult::none()
}

pub fn handle_directory_query(state: &mut AppState, query: String) -> UpdateResult {
    if state.nav.screen == Screen::StationList {
        state.directory_query = query;
    }
    UpdateResult::none()
}

pub fn handle_toggle_station(state: &mut AppState, id: &StationId) -> UpdateResult {
    let now = state.favorites.toggle_station(id);
    debug!("Station {} favorite={}", id, now);
    UpdateResult::none()
}

pub fn handle_toggle_amenity(state: &mut AppState, id: &AmenityId) -> UpdateResult {
    let now = state.favorites.toggle_amenity(id);
    debug!("Amenity {} favorite={}", id, now);
    UpdateResult::none()
}

pub fn handle_update_settings(state: &mut AppState, patch: &SettingsPatch) -> UpdateResult {
    if patch.is_empty() {
        return UpdateResult::none();
    }
    if state.settings.update(patch) {
        info!("Settings changed: {:?}", state.current_settings());
    }
    UpdateResult::none()
}

pub fn handle_saved_filter(state: &mut AppState, filter: SavedFilter) -> UpdateResult {
    state.saved_filter = filter;
    UpdateResult::none()
}
