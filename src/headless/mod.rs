//! Headless mode - JSON event output for scripted runs
//!
//! The controller has no renderer of its own. In headless mode it reads one
//! command per line on stdin and writes structured JSON events to stdout, so
//! a script can drive every screen flow and assert on the results.
//!
//! # Event Format
//!
//! Events are output as NDJSON (newline-delimited JSON), one event per line.
//! Each event has an "event" field indicating its type, along with event-specific data.
//!
//! # Example Output
//!
//! ```json
//! {"event":"screen_changed","screen":"language-select","active_tab":"home","splash_visible":false,"timestamp":1704700001000}
//! {"event":"settings_changed","settings":{"language":"Hindi","theme":"light","accessibility_enabled":false,"voice_assistant":false},"timestamp":1704700002000}
//! {"event":"notice","kind":"info","text":"Station Easy Verification Code: 123456","timestamp":1704700003000}
//! ```

pub mod command;
pub mod runner;

use chrono::Utc;
use serde::Serialize;
use std::io::{self, Write};
use tracing::error;

use steasy_app::state::{AppState, ChatSender, LocateTarget, NoticeKind};
use steasy_app::{AppSettings, EngineEvent, FavoriteTarget, Screen, SearchScope, Selection, Tab};
use steasy_core::{Error, StationId};

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// Screen, active tab or splash visibility changed
    ScreenChanged {
        screen: Screen,
        active_tab: Tab,
        splash_visible: bool,
        timestamp: i64,
    },

    SettingsChanged {
        settings: AppSettings,
        timestamp: i64,
    },

    FavoriteToggled {
        target: FavoriteTarget,
        id: String,
        is_favorite: bool,
        timestamp: i64,
    },

    /// Result list of the home search or the station directory
    SearchResults {
        scope: SearchScope,
        query: String,
        station_ids: Vec<StationId>,
        timestamp: i64,
    },

    ChatMessage {
        sender: ChatSender,
        text: String,
        timestamp: i64,
    },

    /// Out-of-band information or a degraded feature
    Notice {
        kind: NoticeKind,
        text: String,
        timestamp: i64,
    },

    /// Full controller state, printed on the `state` command
    State {
        screen: Screen,
        active_tab: Tab,
        splash_visible: bool,
        selection: Selection,
        settings: AppSettings,
        favorite_stations: Vec<String>,
        favorite_amenities: Vec<String>,
        auth_error: Option<String>,
        user_location: Option<String>,
        locating: Option<LocateTarget>,
        chat_typing: bool,
        timestamp: i64,
    },

    /// A command was rejected, or startup failed when `fatal`
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },

    Shutdown { timestamp: i64 },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        // Write to stdout with newline (NDJSON format)
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        if let Err(e) = writeln!(handle, "{}", json) {
            error!("Failed to write headless event: {}", e);
            return;
        }
        if let Err(e) = handle.flush() {
            error!("Failed to flush stdout: {}", e);
        }
    }

    /// Convert an engine event; every engine event has a headless form
    pub fn from_engine_event(event: &EngineEvent) -> Self {
        let timestamp = now();
        match event {
            EngineEvent::ScreenChanged {
                screen,
                active_tab,
                splash_visible,
            } => HeadlessEvent::ScreenChanged {
                screen: *screen,
                active_tab: *active_tab,
                splash_visible: *splash_visible,
                timestamp,
            },
            EngineEvent::SettingsChanged { settings } => HeadlessEvent::SettingsChanged {
                settings: *settings,
                timestamp,
            },
            EngineEvent::FavoriteToggled {
                target,
                id,
                is_favorite,
            } => HeadlessEvent::FavoriteToggled {
                target: *target,
                id: id.clone(),
                is_favorite: *is_favorite,
                timestamp,
            },
            EngineEvent::SearchResults {
                scope,
                query,
                station_ids,
            } => HeadlessEvent::SearchResults {
                scope: *scope,
                query: query.clone(),
                station_ids: station_ids.clone(),
                timestamp,
            },
            EngineEvent::ChatMessage { sender, text } => HeadlessEvent::ChatMessage {
                sender: *sender,
                text: text.clone(),
                timestamp,
            },
            EngineEvent::Notice(notice) => HeadlessEvent::Notice {
                kind: notice.kind,
                text: notice.text.clone(),
                timestamp,
            },
            EngineEvent::Shutdown => HeadlessEvent::Shutdown { timestamp },
        }
    }

    /// Snapshot of the state a script can assert on
    pub fn state(state: &AppState) -> Self {
        let mut favorite_stations: Vec<String> = state
            .favorites
            .stations()
            .map(|id| id.as_str().to_string())
            .collect();
        favorite_stations.sort();
        let mut favorite_amenities: Vec<String> = state
            .favorites
            .amenities()
            .map(|id| id.as_str().to_string())
            .collect();
        favorite_amenities.sort();

        let locating = if state.map.locating {
            Some(LocateTarget::Map)
        } else if state.route.loading_location {
            Some(LocateTarget::Route)
        } else {
            None
        };

        HeadlessEvent::State {
            screen: state.nav.screen,
            active_tab: state.nav.active_tab,
            splash_visible: state.nav.splash_visible,
            selection: state.nav.selection.clone(),
            settings: state.current_settings(),
            favorite_stations,
            favorite_amenities,
            auth_error: state.auth.error.as_ref().map(|e| e.message.clone()),
            user_location: state.map.user_location.map(|c| c.to_string()),
            locating,
            chat_typing: state.chat.typing,
            timestamp: now(),
        }
    }

    pub fn error(err: &Error) -> Self {
        HeadlessEvent::Error {
            message: err.to_string(),
            fatal: !err.is_recoverable(),
            timestamp: now(),
        }
    }
}

/// Get current timestamp in milliseconds
fn now() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use steasy_app::state::Notice;
    use steasy_core::Translations;

    fn json(event: &HeadlessEvent) -> serde_json::Value {
        serde_json::to_value(event).unwrap()
    }

    #[test]
    fn test_screen_changed_serialization() {
        let event = HeadlessEvent::from_engine_event(&EngineEvent::ScreenChanged {
            screen: Screen::Home,
            active_tab: Tab::Home,
            splash_visible: false,
        });
        let value = json(&event);
        assert_eq!(value["event"], "screen_changed");
        assert_eq!(value["screen"], "home");
        assert_eq!(value["active_tab"], "home");
        assert_eq!(value["splash_visible"], false);
        assert!(value["timestamp"].is_i64());
    }

    #[test]
    fn test_notice_serialization_snapshot() {
        let event = HeadlessEvent::from_engine_event(&EngineEvent::Notice(Notice {
            kind: NoticeKind::Info,
            text: "Station Easy Verification Code: 123456".to_string(),
        }));
        insta::with_settings!({filters => vec![(r#""timestamp":\d+"#, r#""timestamp":"[ts]""#)]}, {
            insta::assert_snapshot!(
                serde_json::to_string(&event).unwrap(),
                @r#"{"event":"notice","kind":"info","text":"Station Easy Verification Code: 123456","timestamp":"[ts]"}"#
            );
        });
    }

    #[test]
    fn test_search_results_serialization_snapshot() {
        let event = HeadlessEvent::from_engine_event(&EngineEvent::SearchResults {
            scope: SearchScope::Home,
            query: "tpj".to_string(),
            station_ids: vec![StationId::new("415")],
        });
        insta::with_settings!({filters => vec![(r#""timestamp":\d+"#, r#""timestamp":"[ts]""#)]}, {
            insta::assert_snapshot!(
                serde_json::to_string(&event).unwrap(),
                @r#"{"event":"search_results","scope":"home","query":"tpj","station_ids":["415"],"timestamp":"[ts]"}"#
            );
        });
    }

    #[test]
    fn test_favorite_toggled_serialization() {
        let event = HeadlessEvent::from_engine_event(&EngineEvent::FavoriteToggled {
            target: FavoriteTarget::Amenity,
            id: "1".to_string(),
            is_favorite: false,
        });
        let value = json(&event);
        assert_eq!(value["event"], "favorite_toggled");
        assert_eq!(value["target"], "amenity");
        assert_eq!(value["is_favorite"], false);
    }

    #[test]
    fn test_error_serialization() {
        let value = json(&HeadlessEvent::error(&Error::invalid_command(
            "unknown command 'fly'",
        )));
        assert_eq!(value["event"], "error");
        assert_eq!(value["message"], "Invalid command: unknown command 'fly'");
        assert_eq!(value["fatal"], false);

        let value = json(&HeadlessEvent::error(&Error::config("locale table missing")));
        assert_eq!(value["fatal"], true);
    }

    #[test]
    fn test_state_lists_sorted_favorites() {
        let state = AppState::new(Arc::new(Translations::builtin().unwrap()));
        let value = json(&HeadlessEvent::state(&state));

        assert_eq!(value["event"], "state");
        assert_eq!(value["screen"], "language-select");
        assert_eq!(value["splash_visible"], true);
        assert_eq!(value["favorite_amenities"], serde_json::json!(["1"]));

        let stations = value["favorite_stations"].as_array().unwrap();
        assert!(!stations.is_empty());
        let mut sorted = stations.clone();
        sorted.sort_by(|a, b| a.as_str().cmp(&b.as_str()));
        assert_eq!(stations, &sorted);
        assert!(value["locating"].is_null());
    }

    #[test]
    fn test_shutdown_serialization() {
        let value = json(&HeadlessEvent::from_engine_event(&EngineEvent::Shutdown));
        assert_eq!(value["event"], "shutdown");
    }
}
