//! steasy-app - Application state and navigation controller for Station Easy
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the screen
//! controller, the settings and favorites stores, derived views, configuration
//! loading, and the Engine that frontends drive.

pub mod actions;
pub mod config;
pub mod engine;
pub mod engine_event;
pub mod favorites;
pub mod handler;
pub mod message;
pub mod navigation;
pub mod process;
pub mod screen;
pub mod selection;
pub mod settings_store;
pub mod state;
pub mod views;

// Re-export primary types
pub use engine::Engine;
pub use engine_event::{EngineEvent, FavoriteTarget, SearchScope};
pub use handler::{UpdateAction, UpdateResult};
pub use message::Message;
pub use navigation::{NavEvent, NavState};
pub use screen::{AuthStep, Screen, Tab, TabSelection};
pub use selection::Selection;
pub use settings_store::{AppSettings, SettingsPatch, SettingsStore, Theme};
pub use state::AppState;
