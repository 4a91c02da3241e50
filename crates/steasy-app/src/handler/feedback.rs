//! Feedback form handlers

use steasy_core::prelude::*;

use crate::message::Message;
use crate::screen::Screen;
use crate::state::{AppState, FeedbackTag};

use super::{UpdateAction, UpdateResult};

/// Form edits only apply while the form is open and not yet submitted
fn editable(state: &AppState) -> bool {
    !state.nav.splash_visible && state.nav.screen == Screen::Feedback && !state.feedback.submitted
}

pub fn handle_tag(state: &mut AppState, tag: FeedbackTag) -> UpdateResult {
    if editable(state) {
        state.feedback.tag = tag;
    }
    UpdateResult::none()
}

pub fn handle_subject(state: &mut AppState, text: String) -> UpdateResult {
    if editable(state) {
        state.feedback.subject = text;
    }
    UpdateResult::none()
}

pub fn handle_description(state: &mut AppState, text: String) -> UpdateResult {
    if editable(state) {
        state.feedback.description = text;
    }
    UpdateResult::none()
}

pub fn handle_contact(state: &mut AppState, text: String) -> UpdateResult {
    if editable(state) {
        state.feedback.contact = Some(text).filter(|t| !t.trim().is_empty());
    }
    UpdateResult::none()
}

pub fn handle_attachment(state: &mut AppState, name: Option<String>) -> UpdateResult {
    if editable(state) {
        state.feedback.attachment = name;
    }
    UpdateResult::none()
}

pub fn handle_submit(state: &mut AppState) -> UpdateResult {
    if !editable(state) {
        debug!("FeedbackSubmitted ignored");
        return UpdateResult::none();
    }
    state.feedback.submitted = true;
    info!(
        "Feedback recorded locally: tag={:?} subject={:?}",
        state.feedback.tag, state.feedback.subject
    );
    UpdateResult::action(UpdateAction::ScheduleFeedbackReturn {
        generation: state.feedback.generation,
    })
}

/// Leave the acknowledgment, unless the user already navigated away
///
/// A timer armed during an earlier visit carries an older generation and
/// never cuts a later acknowledgment short.
pub fn handle_return_elapsed(state: &mut AppState, generation: u64) -> UpdateResult {
    if generation != state.feedback.generation {
        debug!(
            "Stale feedback return dropped (generation {} != {})",
            generation, state.feedback.generation
        );
        return UpdateResult::none();
    }
    if state.nav.screen == Screen::Feedback && state.feedback.submitted {
        UpdateResult::message(Message::Back)
    } else {
        UpdateResult::none()
    }
}
