//! Application state (Model in TEA pattern)

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Local};
use serde::Serialize;
use steasy_core::prelude::*;
use steasy_core::{
    builtin_catalog, AmenityCategory, Catalog, Coordinates, ErrorKind, PhoneNumber, Resolver,
    Translations, OTP_LENGTH,
};
use steasy_device::{ChatResponder, KeywordResponder, ReplyKey};

use crate::config::AppConfig;
use crate::favorites::FavoriteSets;
use crate::navigation::NavState;
use crate::settings_store::{AppSettings, SettingsStore};

// ─────────────────────────────────────────────────────────────────────────────
// Auth
// ─────────────────────────────────────────────────────────────────────────────

/// Error shown inline on the auth screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineError {
    #[serde(skip)]
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&Error> for InlineError {
    fn from(err: &Error) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Phone entry, OTP cells and permission answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthFlow {
    pub phone_input: String,
    pub phone: Option<String>,
    pub otp_cells: [Option<char>; OTP_LENGTH],
    /// An OTP send is in flight
    pub sending: bool,
    pub error: Option<InlineError>,
    pub notifications_allowed: Option<bool>,
    pub location_allowed: Option<bool>,
    #[serde(skip)]
    expected_code: String,
}

impl AuthFlow {
    pub fn new(expected_code: impl Into<String>) -> Self {
        Self {
            phone_input: String::new(),
            phone: None,
            otp_cells: [None; OTP_LENGTH],
            sending: false,
            error: None,
            notifications_allowed: None,
            location_allowed: None,
            expected_code: expected_code.into(),
        }
    }

    pub fn expected_code(&self) -> &str {
        &self.expected_code
    }

    /// Back to a blank phone step, keeping the expected code
    pub fn reset(&mut self) {
        *self = Self::new(std::mem::take(&mut self.expected_code));
    }

    pub fn set_error(&mut self, err: &Error) {
        self.error = Some(InlineError::from(err));
    }

    /// Edit one OTP cell. Empty clears it, a single digit sets it, anything
    /// else is ignored. Returns whether the cell was edited.
    pub fn set_otp_digit(&mut self, index: usize, value: &str) -> bool {
        if index >= OTP_LENGTH {
            return false;
        }
        let mut chars = value.chars();
        let cell = match (chars.next(), chars.next()) {
            (None, _) => None,
            (Some(c), None) if c.is_ascii_digit() => Some(c),
            _ => return false,
        };
        self.otp_cells[index] = cell;
        self.error = None;
        true
    }

    /// Fill the cells from the digits of `code`, clearing any remainder
    pub fn set_otp_code(&mut self, code: &str) {
        let mut digits = code.chars().filter(char::is_ascii_digit);
        for cell in self.otp_cells.iter_mut() {
            *cell = digits.next();
        }
        self.error = None;
    }

    pub fn entered_code(&self) -> String {
        self.otp_cells.iter().flatten().collect()
    }

    /// The code as typed, cells left blank are dropped
    pub fn filled_cells(&self) -> usize {
        self.otp_cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn clear_otp(&mut self) {
        self.otp_cells = [None; OTP_LENGTH];
    }

    pub fn remember_phone(&mut self, phone: &PhoneNumber) {
        self.phone = Some(phone.as_str().to_string());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Onboarding
// ─────────────────────────────────────────────────────────────────────────────

/// Title and optional subtitle locale keys of each slide
pub const ONBOARDING_SLIDES: [(&str, Option<&str>); 4] = [
    ("onboardingTitle1", None),
    ("onboardingTitle2", Some("onboardingSubtitle2")),
    ("onboardingTitle3", Some("onboardingSubtitle3")),
    ("onboardingTitle4", Some("onboardingSubtitle4")),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OnboardingState {
    pub slide: usize,
}

impl OnboardingState {
    pub fn is_last(&self) -> bool {
        self.slide + 1 >= ONBOARDING_SLIDES.len()
    }

    /// Move to the next slide. Returns `false` when already on the last one.
    pub fn advance(&mut self) -> bool {
        if self.is_last() {
            false
        } else {
            self.slide += 1;
            true
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Map and route
// ─────────────────────────────────────────────────────────────────────────────

/// Which view asked for a position fix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocateTarget {
    Map,
    Route,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MapState {
    pub category: Option<AmenityCategory>,
    pub user_location: Option<Coordinates>,
    pub locating: bool,
    /// Bumped on every request and reset; stale fixes are dropped
    #[serde(skip)]
    pub request: u64,
}

impl MapState {
    /// Select `category`, or clear it when it is already active
    pub fn toggle_category(&mut self, category: AmenityCategory) {
        self.category = if self.category == Some(category) {
            None
        } else {
            Some(category)
        };
        self.user_location = None;
    }

    pub fn reset(&mut self) {
        *self = Self {
            request: self.request + 1,
            ..Self::default()
        };
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RouteState {
    /// Turn-by-turn guidance requested
    pub guidance: bool,
    pub origin: Option<Coordinates>,
    pub loading_location: bool,
    #[serde(skip)]
    pub request: u64,
}

impl RouteState {
    pub fn reset(&mut self) {
        *self = Self {
            request: self.request + 1,
            ..Self::default()
        };
    }

    /// Directions need both guidance and a known origin
    pub fn directions_mode(&self) -> bool {
        self.guidance && self.origin.is_some()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Saved view
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SavedFilter {
    #[default]
    All,
    Stations,
    Amenities,
}

impl SavedFilter {
    pub fn shows_stations(&self) -> bool {
        matches!(self, SavedFilter::All | SavedFilter::Stations)
    }

    pub fn shows_amenities(&self) -> bool {
        matches!(self, SavedFilter::All | SavedFilter::Amenities)
    }
}

impl FromStr for SavedFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(SavedFilter::All),
            "stations" => Ok(SavedFilter::Stations),
            "amenities" => Ok(SavedFilter::Amenities),
            other => Err(Error::invalid_command(format!("unknown filter '{other}'"))),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Feedback
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTag {
    #[default]
    Bug,
    Feature,
    Navigation,
    Amenity,
    General,
    Other,
}

impl FeedbackTag {
    pub const ALL: [FeedbackTag; 6] = [
        FeedbackTag::Bug,
        FeedbackTag::Feature,
        FeedbackTag::Navigation,
        FeedbackTag::Amenity,
        FeedbackTag::General,
        FeedbackTag::Other,
    ];

    pub fn translation_key(&self) -> &'static str {
        match self {
            FeedbackTag::Bug => "tagBug",
            FeedbackTag::Feature => "tagFeature",
            FeedbackTag::Navigation => "tagNav",
            FeedbackTag::Amenity => "tagAmenity",
            FeedbackTag::General => "tagGeneral",
            FeedbackTag::Other => "tagOther",
        }
    }
}

impl FromStr for FeedbackTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bug" => Ok(FeedbackTag::Bug),
            "feature" => Ok(FeedbackTag::Feature),
            "nav" | "navigation" => Ok(FeedbackTag::Navigation),
            "amenity" => Ok(FeedbackTag::Amenity),
            "general" => Ok(FeedbackTag::General),
            "other" => Ok(FeedbackTag::Other),
            other => Err(Error::invalid_command(format!("unknown feedback tag '{other}'"))),
        }
    }
}

/// Local-only feedback form; nothing is sent anywhere
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedbackForm {
    pub tag: FeedbackTag,
    pub subject: String,
    pub description: String,
    pub contact: Option<String>,
    pub attachment: Option<String>,
    pub submitted: bool,
    /// Bumped on every open; return timers from earlier opens are dropped
    #[serde(skip)]
    pub generation: u64,
}

impl FeedbackForm {
    /// Blank form for a new visit
    pub fn open(&mut self) {
        *self = Self {
            generation: self.generation + 1,
            ..Self::default()
        };
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Chat
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatSender {
    User,
    Bot,
}

/// Bot lines are stored as locale keys and resolved when read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatBody {
    Text(String),
    Localized(&'static str),
}

#[derive(Debug, Clone)]
pub struct ChatEntry {
    pub sender: ChatSender,
    pub body: ChatBody,
    pub sent_at: DateTime<Local>,
}

impl ChatEntry {
    pub fn text<'a>(&'a self, resolver: &Resolver<'a>) -> &'a str {
        match &self.body {
            ChatBody::Text(text) => text,
            ChatBody::Localized(key) => resolver.text(key),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatState {
    /// Bumped each time the chat opens; replies for older sessions are dropped
    pub session: u64,
    pub transcript: Vec<ChatEntry>,
    /// Bot reply pending
    pub typing: bool,
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            session: 0,
            transcript: vec![Self::greeting()],
            typing: false,
        }
    }

    fn greeting() -> ChatEntry {
        ChatEntry {
            sender: ChatSender::Bot,
            body: ChatBody::Localized("chatGreeting"),
            sent_at: Local::now(),
        }
    }

    /// Fresh transcript opening with the greeting
    pub fn open(&mut self) {
        self.session += 1;
        self.transcript = vec![Self::greeting()];
        self.typing = false;
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.transcript.push(ChatEntry {
            sender: ChatSender::User,
            body: ChatBody::Text(text.into()),
            sent_at: Local::now(),
        });
    }

    pub fn push_reply(&mut self, reply: ReplyKey) {
        self.transcript.push(ChatEntry {
            sender: ChatSender::Bot,
            body: ChatBody::Localized(reply.translation_key()),
            sent_at: Local::now(),
        });
    }
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Notices
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// Out-of-band information, e.g. the delivered OTP
    Info,
    /// A degraded feature, e.g. location unavailable
    Warning,
}

/// Non-blocking message surfaced to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// AppState
// ─────────────────────────────────────────────────────────────────────────────

/// Complete application state (the Model in TEA)
pub struct AppState {
    pub nav: NavState,
    pub settings: SettingsStore,
    pub favorites: FavoriteSets,
    pub catalog: &'static Catalog,
    pub translations: Arc<Translations>,

    pub auth: AuthFlow,
    pub onboarding: OnboardingState,
    pub home_query: String,
    pub directory_query: String,
    pub map: MapState,
    pub route: RouteState,
    pub saved_filter: SavedFilter,
    pub feedback: FeedbackForm,
    pub chat: ChatState,
    /// Posted notices not yet taken by [`AppState::take_notices`]
    pub notices: Vec<Notice>,

    chat_responder: Arc<dyn ChatResponder>,
    quit_requested: bool,
}

impl AppState {
    /// Default configuration with the given tables
    pub fn new(translations: Arc<Translations>) -> Self {
        Self::with_config(&AppConfig::default(), translations)
    }

    pub fn with_config(config: &AppConfig, translations: Arc<Translations>) -> Self {
        let catalog = builtin_catalog();
        Self {
            nav: NavState::default(),
            settings: SettingsStore::new(config.startup.initial_settings()),
            favorites: FavoriteSets::seeded(catalog),
            catalog,
            translations,
            auth: AuthFlow::new(config.simulation.otp_code.clone()),
            onboarding: OnboardingState::default(),
            home_query: String::new(),
            directory_query: String::new(),
            map: MapState::default(),
            route: RouteState::default(),
            saved_filter: SavedFilter::default(),
            feedback: FeedbackForm::default(),
            chat: ChatState::new(),
            notices: Vec::new(),
            chat_responder: Arc::new(KeywordResponder::new()),
            quit_requested: false,
        }
    }

    /// Swap the chat matcher
    pub fn with_responder(mut self, responder: Arc<dyn ChatResponder>) -> Self {
        self.chat_responder = responder;
        self
    }

    pub fn chat_responder(&self) -> &dyn ChatResponder {
        self.chat_responder.as_ref()
    }

    pub fn current_settings(&self) -> AppSettings {
        self.settings.current()
    }

    /// Resolver bound to the current language
    pub fn resolver(&self) -> Resolver<'_> {
        self.translations
            .resolver(self.settings.current().language.code())
    }

    /// Localized UI string
    pub fn text(&self, key: &'static str) -> &str {
        self.resolver().text(key)
    }

    pub fn post_notice(&mut self, kind: NoticeKind, text: impl Into<String>) {
        let notice = Notice {
            kind,
            text: text.into(),
        };
        match kind {
            NoticeKind::Info => info!("Notice: {}", notice.text),
            NoticeKind::Warning => warn!("Notice: {}", notice.text),
        }
        self.notices.push(notice);
    }

    /// Remove and return every notice posted so far
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("nav", &self.nav)
            .field("settings", &self.settings.current())
            .field("favorites", &self.favorites)
            .field("auth", &self.auth)
            .field("map", &self.map)
            .field("route", &self.route)
            .field("quit_requested", &self.quit_requested)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translations() -> Arc<Translations> {
        Arc::new(Translations::builtin().unwrap())
    }

    #[test]
    fn test_new_state() {
        let state = AppState::new(translations());
        assert!(state.nav.splash_visible);
        assert!(!state.should_quit());
        assert_eq!(state.chat.transcript.len(), 1);
        assert_eq!(state.auth.expected_code(), "123456");
    }

    #[test]
    fn test_otp_digit_rules() {
        let mut auth = AuthFlow::new("123456");
        auth.error = Some(InlineError::from(&Error::AuthMismatch));

        assert!(!auth.set_otp_digit(0, "a"));
        assert!(auth.error.is_some(), "ignored input keeps the error");

        assert!(auth.set_otp_digit(0, "7"));
        assert!(auth.error.is_none());
        assert!(!auth.set_otp_digit(1, "12"));
        assert!(!auth.set_otp_digit(6, "1"));
        assert_eq!(auth.entered_code(), "7");

        assert!(auth.set_otp_digit(0, ""));
        assert_eq!(auth.filled_cells(), 0);
    }

    #[test]
    fn test_set_otp_code_fills_cells() {
        let mut auth = AuthFlow::new("123456");
        auth.set_otp_code("12-34");
        assert_eq!(auth.entered_code(), "1234");
        auth.set_otp_code("9876543");
        assert_eq!(auth.entered_code(), "987654");
    }

    #[test]
    fn test_auth_reset_keeps_expected_code() {
        let mut auth = AuthFlow::new("424242");
        auth.phone_input = "98765".to_string();
        auth.reset();
        assert!(auth.phone_input.is_empty());
        assert_eq!(auth.expected_code(), "424242");
    }

    #[test]
    fn test_onboarding_advance_stops_at_last() {
        let mut onboarding = OnboardingState::default();
        assert!(onboarding.advance());
        assert!(onboarding.advance());
        assert!(onboarding.advance());
        assert!(onboarding.is_last());
        assert!(!onboarding.advance());
        assert_eq!(onboarding.slide, 3);
    }

    #[test]
    fn test_category_toggle_clears_location() {
        let mut map = MapState {
            user_location: Some(steasy_device::DEFAULT_POSITION),
            ..MapState::default()
        };
        map.toggle_category(AmenityCategory::Food);
        assert_eq!(map.category, Some(AmenityCategory::Food));
        assert!(map.user_location.is_none());
        map.toggle_category(AmenityCategory::Food);
        assert_eq!(map.category, None);
    }

    #[test]
    fn test_reset_bumps_request() {
        let mut route = RouteState::default();
        route.guidance = true;
        route.reset();
        assert_eq!(route.request, 1);
        assert!(!route.guidance);
    }

    #[test]
    fn test_directions_mode_needs_origin() {
        let mut route = RouteState {
            guidance: true,
            ..RouteState::default()
        };
        assert!(!route.directions_mode());
        route.origin = Some(steasy_device::DEFAULT_POSITION);
        assert!(route.directions_mode());
    }

    #[test]
    fn test_chat_open_resets_transcript() {
        let mut chat = ChatState::new();
        chat.push_user("hi");
        chat.typing = true;
        chat.open();
        assert_eq!(chat.session, 1);
        assert_eq!(chat.transcript.len(), 1);
        assert!(!chat.typing);
    }

    #[test]
    fn test_text_follows_language() {
        let state = AppState::new(translations());
        assert_eq!(state.text("home"), "Home");
        state
            .settings
            .update(&crate::settings_store::SettingsPatch::language(
                steasy_core::Language::Hindi,
            ));
        assert_eq!(state.text("home"), "होम");
    }
}
