//! Domain events emitted by the Engine for external consumers
//!
//! Events are broadcast after each message processing cycle via
//! `Engine::subscribe()`. The headless driver turns them into NDJSON.

use serde::Serialize;
use steasy_core::StationId;

use crate::screen::{Screen, Tab};
use crate::settings_store::AppSettings;
use crate::state::{ChatSender, Notice};

/// Which favorites set an id belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FavoriteTarget {
    Station,
    Amenity,
}

/// Which station query produced a result list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// Home screen live search
    Home,
    /// Alphabetical station list
    Directory,
}

/// Domain events emitted by the Engine.
///
/// Subscribers see a consistent view: every event of one processing cycle is
/// sent after the whole follow-up chain of that cycle has run.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    // ─────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────
    /// Screen, active tab or splash visibility changed
    ScreenChanged {
        screen: Screen,
        active_tab: Tab,
        splash_visible: bool,
    },

    // ─────────────────────────────────────────────────────────
    // Stores
    // ─────────────────────────────────────────────────────────
    SettingsChanged { settings: AppSettings },

    FavoriteToggled {
        target: FavoriteTarget,
        id: String,
        is_favorite: bool,
    },

    // ─────────────────────────────────────────────────────────
    // Derived Views
    // ─────────────────────────────────────────────────────────
    /// A search query changed; ids are in result order
    SearchResults {
        scope: SearchScope,
        query: String,
        station_ids: Vec<StationId>,
    },

    /// A line was appended to the chat transcript
    ChatMessage { sender: ChatSender, text: String },

    /// Something the user should see, outside the screen flow
    Notice(Notice),

    // ─────────────────────────────────────────────────────────
    // Engine Lifecycle
    // ─────────────────────────────────────────────────────────
    /// Engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Returns a short string label for this event type (for logging/debugging).
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ScreenChanged { .. } => "screen_changed",
            Self::SettingsChanged { .. } => "settings_changed",
            Self::FavoriteToggled { .. } => "favorite_toggled",
            Self::SearchResults { .. } => "search_results",
            Self::ChatMessage { .. } => "chat_message",
            Self::Notice(_) => "notice",
            Self::Shutdown => "shutdown",
        }
    }
}
