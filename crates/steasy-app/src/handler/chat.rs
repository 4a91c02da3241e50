//! Assistant chat handlers

use steasy_core::prelude::*;
use steasy_device::ReplyKey;

use crate::screen::Screen;
use crate::state::AppState;

use super::{UpdateAction, UpdateResult};

pub fn handle_send(state: &mut AppState, text: &str) -> UpdateResult {
    if state.nav.splash_visible || state.nav.screen != Screen::Chat {
        debug!("ChatSend ignored on {}", state.nav.screen);
        return UpdateResult::none();
    }
    let text = text.trim();
    if text.is_empty() {
        return UpdateResult::none();
    }

    let reply = state.chat_responder().reply_for(text);
    state.chat.push_user(text);
    state.chat.typing = true;
    debug!("Chat reply {:?} scheduled", reply);

    UpdateResult::action(UpdateAction::ScheduleChatReply {
        reply,
        session: state.chat.session,
    })
}

/// Replies for a transcript that has since been reopened are dropped
pub fn handle_reply_ready(state: &mut AppState, reply: ReplyKey, session: u64) -> UpdateResult {
    if session != state.chat.session || state.nav.screen != Screen::Chat {
        debug!("Dropping stale chat reply for session {}", session);
        return UpdateResult::none();
    }
    state.chat.push_reply(reply);
    state.chat.typing = false;
    UpdateResult::none()
}
