//! Main update function - handles state transitions (TEA pattern)

use crate::message::Message;
use crate::navigation::NavEvent;
use crate::state::AppState;

use super::{auth, chat, feedback, map, navigation, stores, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.request_quit();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Navigation Messages
        // ─────────────────────────────────────────────────────────
        Message::SplashElapsed => navigation::navigate(state, NavEvent::SplashElapsed),
        Message::LanguageChosen(language) => navigation::handle_language_chosen(state, language),
        Message::OnboardingNext => navigation::handle_onboarding_next(state),
        Message::OnboardingFinished => navigation::navigate(state, NavEvent::OnboardingFinished),
        Message::AuthStepPassed => navigation::navigate(state, NavEvent::AuthStepPassed),
        Message::AuthCompleted => navigation::navigate(state, NavEvent::AuthCompleted),
        Message::TabSelected(tab) => navigation::navigate(state, NavEvent::TabSelected(tab)),
        Message::StationSelected(id) => navigation::handle_station_selected(state, id),
        Message::FacilityClicked(id) => navigation::navigate(state, NavEvent::FacilityClicked(id)),
        Message::NavigateClicked => navigation::navigate(state, NavEvent::NavigateClicked),
        Message::SeeAllClicked => navigation::navigate(state, NavEvent::SeeAllClicked),
        Message::Back => navigation::navigate(state, NavEvent::Back),
        Message::Logout => navigation::navigate(state, NavEvent::Logout),
        Message::NotificationsOpened => {
            navigation::navigate(state, NavEvent::NotificationsOpened)
        }
        Message::FeedbackOpened => navigation::navigate(state, NavEvent::FeedbackOpened),
        Message::AboutOpened => navigation::navigate(state, NavEvent::AboutOpened),

        // ─────────────────────────────────────────────────────────
        // Auth Messages
        // ─────────────────────────────────────────────────────────
        Message::PhoneEdited(input) => auth::handle_phone_edited(state, input),
        Message::PhoneSubmitted => auth::handle_phone_submitted(state),
        Message::OtpDigitEntered { index, value } => {
            auth::handle_otp_digit(state, index, &value)
        }
        Message::OtpCodeEntered(code) => auth::handle_otp_code(state, &code),
        Message::OtpVerifyRequested => auth::handle_verify(state),
        Message::PermissionAnswered { granted } => auth::handle_permission(state, granted),
        Message::OtpDelivered { code } => auth::handle_otp_delivered(state, code),
        Message::OtpFailed { reason } => auth::handle_otp_failed(state, reason),

        // ─────────────────────────────────────────────────────────
        // Search / Store Messages
        // ─────────────────────────────────────────────────────────
        Message::SearchQueryChanged(query) => stores::handle_search_query(state, query),
        Message::DirectoryQueryChanged(query) => stores::handle_directory_query(state, query),
        Message::ToggleStationFavorite(id) => stores::handle_toggle_station(state, &id),
        Message::ToggleAmenityFavorite(id) => stores::handle_toggle_amenity(state, &id),
        Message::UpdateSettings(patch) => stores::handle_update_settings(state, &patch),
        Message::SavedFilterChanged(filter) => stores::handle_saved_filter(state, filter),

        // ─────────────────────────────────────────────────────────
        // Map / Route Messages
        // ─────────────────────────────────────────────────────────
        Message::MapCategoryToggled(category) => map::handle_category_toggled(state, category),
        Message::LocateMe => map::handle_locate_me(state),
        Message::LocationResolved {
            target,
            request,
            coordinates,
        } => map::handle_location_resolved(state, target, request, coordinates),
        Message::LocationFailed {
            target,
            request,
            reason,
        } => map::handle_location_failed(state, target, request, &reason),
        Message::ToggleGuidance => map::handle_toggle_guidance(state),

        // ─────────────────────────────────────────────────────────
        // Feedback Messages
        // ─────────────────────────────────────────────────────────
        Message::FeedbackTagSelected(tag) => feedback::handle_tag(state, tag),
        Message::FeedbackSubjectEdited(text) => feedback::handle_subject(state, text),
        Message::FeedbackDescriptionEdited(text) => feedback::handle_description(state, text),
        Message::FeedbackContactEdited(text) => feedback::handle_contact(state, text),
        Message::FeedbackAttachmentChosen(name) => feedback::handle_attachment(state, name),
        Message::FeedbackSubmitted => feedback::handle_submit(state),
        Message::FeedbackReturnElapsed { generation } => {
            feedback::handle_return_elapsed(state, generation)
        }

        // ─────────────────────────────────────────────────────────
        // Chat Messages
        // ─────────────────────────────────────────────────────────
        Message::ChatSend(text) => chat::handle_send(state, &text),
        Message::ChatReplyReady { reply, session } => {
            chat::handle_reply_ready(state, reply, session)
        }
    }
}
