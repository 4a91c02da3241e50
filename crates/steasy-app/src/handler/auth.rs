//! Auth flow handlers: phone entry, OTP delivery and verification, permissions

use steasy_core::prelude::*;
use steasy_core::PhoneNumber;
use steasy_device::verify_code;

use crate::message::Message;
use crate::screen::{AuthStep, Screen};
use crate::state::{AppState, NoticeKind};

use super::{UpdateAction, UpdateResult};

fn at_step(state: &AppState, step: AuthStep) -> bool {
    !state.nav.splash_visible && state.nav.screen == Screen::Auth(step)
}

pub fn handle_phone_edited(state: &mut AppState, input: String) -> UpdateResult {
    if !at_step(state, AuthStep::Phone) {
        return UpdateResult::none();
    }
    state.auth.phone_input = input;
    state.auth.error = None;
    UpdateResult::none()
}

/// Validate the number and ask for a code. Nothing is sent for an invalid
/// number or while a send is already in flight.
pub fn handle_phone_submitted(state: &mut AppState) -> UpdateResult {
    if !at_step(state, AuthStep::Phone) {
        debug!("PhoneSubmitted ignored on {}", state.nav.screen);
        return UpdateResult::none();
    }
    if state.auth.sending {
        debug!("OTP send already in progress");
        return UpdateResult::none();
    }

    match PhoneNumber::parse(&state.auth.phone_input) {
        Ok(phone) => {
            state.auth.error = None;
            state.auth.sending = true;
            state.auth.remember_phone(&phone);
            info!("Requesting OTP for {}", phone.masked());
            UpdateResult::action(UpdateAction::SendOtp { phone })
        }
        Err(e) => {
            debug!("Rejected phone number: {}", e);
            state.auth.set_error(&e);
            UpdateResult::none()
        }
    }
}

pub fn handle_otp_delivered(state: &mut AppState, code: String) -> UpdateResult {
    if !state.auth.sending {
        debug!("Dropping OTP delivery with no send in flight");
        return UpdateResult::none();
    }
    state.auth.sending = false;
    state.post_notice(
        NoticeKind::Info,
        format!("Station Easy Verification Code: {code}"),
    );
    if at_step(state, AuthStep::Phone) {
        UpdateResult::message(Message::AuthStepPassed)
    } else {
        UpdateResult::none()
    }
}

pub fn handle_otp_failed(state: &mut AppState, reason: String) -> UpdateResult {
    state.auth.sending = false;
    warn!("OTP delivery failed: {}", reason);
    state.auth.set_error(&Error::device_unavailable("OTP gateway", reason));
    UpdateResult::none()
}

pub fn handle_otp_digit(state: &mut AppState, index: usize, value: &str) -> UpdateResult {
    if at_step(state, AuthStep::Otp) && !state.auth.set_otp_digit(index, value) {
        trace!("Ignored OTP input {:?} at cell {}", value, index);
    }
    UpdateResult::none()
}

pub fn handle_otp_code(state: &mut AppState, code: &str) -> UpdateResult {
    if at_step(state, AuthStep::Otp) {
        state.auth.set_otp_code(code);
    }
    UpdateResult::none()
}

pub fn handle_verify(state: &mut AppState) -> UpdateResult {
    if !at_step(state, AuthStep::Otp) {
        debug!("OtpVerifyRequested ignored on {}", state.nav.screen);
        return UpdateResult::none();
    }
    let entered = state.auth.entered_code();
    match verify_code(&entered, state.auth.expected_code()) {
        Ok(()) => {
            info!("OTP verified");
            state.auth.error = None;
            UpdateResult::message(Message::AuthStepPassed)
        }
        Err(e) => {
            debug!("OTP verification failed: {}", e);
            state.auth.set_error(&e);
            UpdateResult::none()
        }
    }
}

/// Record the answer; granting or denying both move on
pub fn handle_permission(state: &mut AppState, granted: bool) -> UpdateResult {
    if at_step(state, AuthStep::PermissionNotif) {
        state.auth.notifications_allowed = Some(granted);
    } else if at_step(state, AuthStep::PermissionLoc) {
        state.auth.location_allowed = Some(granted);
    } else {
        debug!("PermissionAnswered ignored on {}", state.nav.screen);
        return UpdateResult::none();
    }
    debug!("Permission answered: granted={}", granted);
    UpdateResult::message(Message::AuthStepPassed)
}
