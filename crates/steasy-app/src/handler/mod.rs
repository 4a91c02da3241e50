//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `navigation`: Screen transitions and per-screen entry resets
//! - `auth`: Phone, OTP and permission steps
//! - `map`: Category filter, locate-me and route guidance
//! - `chat`: Assistant transcript
//! - `feedback`: Feedback form
//! - `stores`: Favorites, settings and search queries

pub(crate) mod auth;
pub(crate) mod chat;
pub(crate) mod feedback;
pub(crate) mod map;
pub(crate) mod navigation;
pub(crate) mod stores;
pub(crate) mod update;


use steasy_core::PhoneNumber;
use steasy_device::ReplyKey;

use crate::message::Message;
use crate::state::LocateTarget;

// Re-export main entry point
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Ask the OTP gateway to deliver a code; answers with
    /// `OtpDelivered` or `OtpFailed`
    SendOtp { phone: PhoneNumber },

    /// Request a position fix; answers with `LocationResolved` or
    /// `LocationFailed` carrying the same target and request id
    LocateUser { target: LocateTarget, request: u64 },

    /// Deliver a canned reply after the configured delay
    ScheduleChatReply { reply: ReplyKey, session: u64 },

    /// Return from the feedback screen after the configured delay
    ScheduleFeedbackReturn { generation: u64 },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
