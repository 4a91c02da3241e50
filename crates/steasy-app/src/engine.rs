//! Engine - owns the controller state and its plumbing
//!
//! The Engine holds the TEA state, the message channel, the shutdown signal,
//! the simulated devices and the splash timer. Frontends feed it messages and
//! subscribe to the [`EngineEvent`]s it derives from each processing cycle.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use steasy_core::{Result, ResultExt, StationId, Translations};

use crate::actions::{spawn_timer, Devices};
use crate::config::AppConfig;
use crate::engine_event::{EngineEvent, FavoriteTarget, SearchScope};
use crate::favorites::FavoriteSets;
use crate::message::Message;
use crate::process;
use crate::screen::{Screen, Tab};
use crate::settings_store::AppSettings;
use crate::state::AppState;
use crate::views;

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to detect
/// what changed and emit appropriate EngineEvents.
#[derive(Debug, Clone)]
struct StateSnapshot {
    screen: Screen,
    active_tab: Tab,
    splash_visible: bool,
    settings: AppSettings,
    favorites: FavoriteSets,
    home_query: String,
    directory_query: String,
    chat_session: u64,
    chat_len: usize,
}

impl StateSnapshot {
    fn capture(state: &AppState) -> Self {
        Self {
            screen: state.nav.screen,
            active_tab: state.nav.active_tab,
            splash_visible: state.nav.splash_visible,
            settings: state.current_settings(),
            favorites: state.favorites.clone(),
            home_query: state.home_query.clone(),
            directory_query: state.directory_query.clone(),
            chat_session: state.chat.session,
            chat_len: state.chat.transcript.len(),
        }
    }
}

/// Orchestration engine for Station Easy.
pub struct Engine {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources.
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Sender for the shutdown signal. Send `true` to initiate shutdown.
    pub shutdown_tx: watch::Sender<bool>,

    /// Receiver for the shutdown signal. Clone for background tasks.
    pub shutdown_rx: watch::Receiver<bool>,

    devices: Devices,

    splash_timer: Option<JoinHandle<()>>,

    /// Event broadcaster for external consumers.
    event_tx: broadcast::Sender<EngineEvent>,
}

impl Engine {
    /// Create an Engine with the built-in catalogs and translations.
    ///
    /// Must be called inside a tokio runtime: the splash timer starts here.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let translations =
            Arc::new(Translations::builtin().context("Failed to load built-in translations")?);
        let state = AppState::with_config(config, translations);
        Ok(Self::with_state(config, state))
    }

    /// Create an Engine around a prepared state
    pub fn with_state(config: &AppConfig, state: AppState) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (event_tx, _) = broadcast::channel(256);

        let splash_timer = spawn_timer(
            config.startup.splash_duration(),
            Message::SplashElapsed,
            msg_tx.clone(),
            shutdown_rx.clone(),
        );
        info!(
            "Engine started, splash for {:?}",
            config.startup.splash_duration()
        );

        Self {
            state,
            msg_tx,
            msg_rx,
            shutdown_tx,
            shutdown_rx,
            devices: Devices::from_config(&config.simulation),
            splash_timer: Some(splash_timer),
            event_tx,
        }
    }

    /// Subscribe to engine events.
    ///
    /// If the subscriber falls behind (buffer full), older events are
    /// dropped. Use `broadcast::error::RecvError::Lagged` to detect this.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Watch the global settings directly
    pub fn settings_watch(&self) -> watch::Receiver<AppSettings> {
        self.state.settings.subscribe()
    }

    /// Process a single message through the TEA update cycle.
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);

        process::process_message(
            &mut self.state,
            msg,
            &self.msg_tx,
            &self.shutdown_rx,
            &self.devices,
        );

        let post = StateSnapshot::capture(&self.state);
        self.emit_events(&pre, &post);

        // Published notices leave the state
        for notice in self.state.take_notices() {
            self.emit(EngineEvent::Notice(notice));
        }
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    /// Get a clone of the shutdown receiver for background tasks.
    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Signal background tasks to stop and notify subscribers.
    pub async fn shutdown(&mut self) {
        self.emit(EngineEvent::Shutdown);

        let _ = self.shutdown_tx.send(true);

        if let Some(handle) = self.splash_timer.take() {
            handle.abort();
            let _ = handle.await;
        }
        info!("Engine shut down");
    }

    /// Emit EngineEvents based on state changes after processing.
    fn emit_events(&self, pre: &StateSnapshot, post: &StateSnapshot) {
        if pre.screen != post.screen
            || pre.active_tab != post.active_tab
            || pre.splash_visible != post.splash_visible
        {
            self.emit(EngineEvent::ScreenChanged {
                screen: post.screen,
                active_tab: post.active_tab,
                splash_visible: post.splash_visible,
            });
        }

        if pre.settings != post.settings {
            self.emit(EngineEvent::SettingsChanged {
                settings: post.settings,
            });
        }

        self.emit_favorite_changes(&pre.favorites, &post.favorites);

        if pre.home_query != post.home_query {
            self.emit(EngineEvent::SearchResults {
                scope: SearchScope::Home,
                query: post.home_query.clone(),
                station_ids: station_ids(views::search_results(&self.state)),
            });
        }
        if pre.directory_query != post.directory_query {
            self.emit(EngineEvent::SearchResults {
                scope: SearchScope::Directory,
                query: post.directory_query.clone(),
                station_ids: station_ids(views::directory_results(&self.state)),
            });
        }

        // A reopened chat starts over from its greeting
        let first_new = if pre.chat_session != post.chat_session {
            0
        } else {
            pre.chat_len
        };
        if post.chat_len > first_new {
            let resolver = self.state.resolver();
            for entry in &self.state.chat.transcript[first_new..] {
                self.emit(EngineEvent::ChatMessage {
                    sender: entry.sender,
                    text: entry.text(&resolver).to_string(),
                });
            }
        }
    }

    fn emit_favorite_changes(&self, pre: &FavoriteSets, post: &FavoriteSets) {
        for id in post.stations().filter(|id| !pre.is_station_favorite(id)) {
            self.emit(favorite_event(FavoriteTarget::Station, id.as_str(), true));
        }
        for id in pre.stations().filter(|id| !post.is_station_favorite(id)) {
            self.emit(favorite_event(FavoriteTarget::Station, id.as_str(), false));
        }
        for id in post.amenities().filter(|id| !pre.is_amenity_favorite(id)) {
            self.emit(favorite_event(FavoriteTarget::Amenity, id.as_str(), true));
        }
        for id in pre.amenities().filter(|id| !post.is_amenity_favorite(id)) {
            self.emit(favorite_event(FavoriteTarget::Amenity, id.as_str(), false));
        }
    }

    /// Emit a single EngineEvent to all subscribers.
    ///
    /// send() returns Err only if there are no receivers, which is fine.
    fn emit(&self, event: EngineEvent) {
        debug!("Event: {}", event.event_type());
        let _ = self.event_tx.send(event);
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if let Some(handle) = self.splash_timer.take() {
            handle.abort();
        }
    }
}

fn favorite_event(target: FavoriteTarget, id: &str, is_favorite: bool) -> EngineEvent {
    EngineEvent::FavoriteToggled {
        target,
        id: id.to_string(),
        is_favorite,
    }
}

fn station_ids(stations: Vec<&steasy_core::Station>) -> Vec<StationId> {
    stations.into_iter().map(|s| s.id.clone()).collect()
}
