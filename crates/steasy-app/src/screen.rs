//! Screen enumeration and bottom-tab types

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use steasy_core::Error;

/// Sub-steps of the auth flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthStep {
    Phone,
    Otp,
    PermissionNotif,
    PermissionLoc,
}

impl AuthStep {
    /// Following step, `None` after the last permission prompt
    pub fn next(self) -> Option<AuthStep> {
        match self {
            AuthStep::Phone => Some(AuthStep::Otp),
            AuthStep::Otp => Some(AuthStep::PermissionNotif),
            AuthStep::PermissionNotif => Some(AuthStep::PermissionLoc),
            AuthStep::PermissionLoc => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            AuthStep::Phone => "phone",
            AuthStep::Otp => "otp",
            AuthStep::PermissionNotif => "permission-notif",
            AuthStep::PermissionLoc => "permission-loc",
        }
    }
}

/// Every full-page view the controller can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    LanguageSelect,
    Onboarding,
    Auth(AuthStep),
    Home,
    Map,
    Favorites,
    Settings,
    Profile,
    FacilityDetail,
    NavigationRoute,
    StationList,
    Feedback,
    About,
    Chat,
    Notifications,
}

impl Screen {
    pub fn is_auth(&self) -> bool {
        matches!(self, Screen::Auth(_))
    }

    /// Screens that carry the bottom navigation bar highlight
    pub fn as_tab(&self) -> Option<Tab> {
        match self {
            Screen::Home => Some(Tab::Home),
            Screen::Map => Some(Tab::Map),
            Screen::Favorites => Some(Tab::Favorites),
            Screen::Settings => Some(Tab::Settings),
            _ => None,
        }
    }

    /// Locale key of the screen title, where the screen has one
    pub fn title_key(&self) -> Option<&'static str> {
        Some(match self {
            Screen::Home => "home",
            Screen::Map => "map",
            Screen::Favorites => "savedLocations",
            Screen::Settings => "settings",
            Screen::FacilityDetail => "facilityDetailTitle",
            Screen::NavigationRoute => "navTitle",
            Screen::StationList => "allStationsTitle",
            Screen::Feedback => "feedbackTitle",
            Screen::Chat => "aiHelp",
            Screen::Notifications => "notificationsTitle",
            _ => return None,
        })
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::LanguageSelect => f.write_str("language-select"),
            Screen::Onboarding => f.write_str("onboarding"),
            Screen::Auth(step) => write!(f, "auth({})", step.name()),
            Screen::Home => f.write_str("home"),
            Screen::Map => f.write_str("map"),
            Screen::Favorites => f.write_str("favorites"),
            Screen::Settings => f.write_str("settings"),
            Screen::Profile => f.write_str("profile"),
            Screen::FacilityDetail => f.write_str("facility-detail"),
            Screen::NavigationRoute => f.write_str("navigation-route"),
            Screen::StationList => f.write_str("station-list"),
            Screen::Feedback => f.write_str("feedback"),
            Screen::About => f.write_str("about"),
            Screen::Chat => f.write_str("chat"),
            Screen::Notifications => f.write_str("notifications"),
        }
    }
}

impl Serialize for Screen {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The four tab-bearing screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Home,
    Map,
    Favorites,
    Settings,
}

impl Tab {
    pub fn screen(self) -> Screen {
        match self {
            Tab::Home => Screen::Home,
            Tab::Map => Screen::Map,
            Tab::Favorites => Screen::Favorites,
            Tab::Settings => Screen::Settings,
        }
    }
}

/// What the user tapped on the bottom bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabSelection {
    Home,
    Map,
    Favorites,
    Settings,
    Profile,
    /// Opens the chat assistant
    Assistant,
}

impl FromStr for TabSelection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(TabSelection::Home),
            "map" => Ok(TabSelection::Map),
            "favorites" | "saved" => Ok(TabSelection::Favorites),
            "settings" => Ok(TabSelection::Settings),
            "profile" => Ok(TabSelection::Profile),
            "assistant" | "chat" => Ok(TabSelection::Assistant),
            other => Err(Error::invalid_command(format!("unknown tab '{other}'"))),
        }
    }
}
