//! Message types for the application (TEA pattern)

use steasy_core::{AmenityCategory, AmenityId, Coordinates, Language, StationId};
use steasy_device::ReplyKey;

use crate::screen::TabSelection;
use crate::settings_store::SettingsPatch;
use crate::state::{FeedbackTag, LocateTarget, SavedFilter};

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    // ─────────────────────────────────────────────────────────
    // Navigation Messages
    // ─────────────────────────────────────────────────────────
    /// Startup splash timer fired
    SplashElapsed,

    /// Language picked on the language-select screen
    LanguageChosen(Language),

    /// Advance one onboarding slide; finishes on the last slide
    OnboardingNext,

    /// Leave onboarding (Get Started or skip)
    OnboardingFinished,

    /// Current auth step satisfied
    AuthStepPassed,

    /// Skip the remaining auth steps
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

    // ─────────────────────────────────────────────────────────
    // Auth Messages
    // ─────────────────────────────────────────────────────────
    PhoneEdited(String),

    /// Request an OTP for the entered phone number
    PhoneSubmitted,

    /// Edit one OTP cell; an empty value clears it
    OtpDigitEntered { index: usize, value: String },

    /// Paste a whole code across the cells
    OtpCodeEntered(String),

    OtpVerifyRequested,

    /// Answer on a permission step; either answer advances
    PermissionAnswered { granted: bool },

    /// Simulated delivery finished
    OtpDelivered { code: String },

    OtpFailed { reason: String },

    // ─────────────────────────────────────────────────────────
    // Search Messages
    // ─────────────────────────────────────────────────────────
    /// Home screen live search
    SearchQueryChanged(String),

    /// Station directory filter
    DirectoryQueryChanged(String),

    // ─────────────────────────────────────────────────────────
    // Store Messages
    // ─────────────────────────────────────────────────────────
    ToggleStationFavorite(StationId),
    ToggleAmenityFavorite(AmenityId),
    UpdateSettings(SettingsPatch),

    // ─────────────────────────────────────────────────────────
    // Map / Route Messages
    // ─────────────────────────────────────────────────────────
    MapCategoryToggled(AmenityCategory),

    /// Ask for the traveler's position on the map
    LocateMe,

    LocationResolved {
        target: LocateTarget,
        request: u64,
        coordinates: Coordinates,
    },

    LocationFailed {
        target: LocateTarget,
        request: u64,
        reason: String,
    },

    /// Start or stop turn-by-turn guidance on the route screen
    ToggleGuidance,

    // ─────────────────────────────────────────────────────────
    // Saved / Feedback / Chat Messages
    // ─────────────────────────────────────────────────────────
    SavedFilterChanged(SavedFilter),

    FeedbackTagSelected(FeedbackTag),
    FeedbackSubjectEdited(String),
    FeedbackDescriptionEdited(String),
    FeedbackContactEdited(String),
    /// Attach a file by name, or clear the attachment
    FeedbackAttachmentChosen(Option<String>),
    FeedbackSubmitted,

    /// Delay after a successful submit elapsed
    FeedbackReturnElapsed { generation: u64 },

    ChatSend(String),

    /// Canned reply is due for the given chat session
    ChatReplyReady { reply: ReplyKey, session: u64 },

    /// Stop the controller
    Quit,
}
