//! Line commands accepted on stdin in headless mode
//!
//! Parsing is pure: a line becomes a [`Command`] or an `InvalidCommand`
//! error, and nothing touches the engine until the runner applies it.

use std::time::Duration;

use steasy_app::message::Message;
use steasy_app::state::{FeedbackTag, SavedFilter};
use steasy_app::{SettingsPatch, TabSelection};
use steasy_core::prelude::*;
use steasy_core::{AmenityCategory, AmenityId, Language, StationId};

/// A parsed stdin line
#[derive(Debug, Clone)]
pub enum Command {
    /// Messages to process, in order
    Send(Vec<Message>),
    /// Print a `state` event
    Dump,
    /// Pause the reader before taking the next line
    Wait(Duration),
}

impl Command {
    fn one(message: Message) -> Self {
        Command::Send(vec![message])
    }
}

/// Parse one stdin line
pub fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb {
        "lang" => Command::one(Message::LanguageChosen(rest.parse::<Language>()?)),
        "next" => Command::one(Message::OnboardingNext),
        "finish-onboarding" => Command::one(Message::OnboardingFinished),
        "phone" => Command::one(Message::PhoneEdited(rest.to_string())),
        "send-otp" => Command::one(Message::PhoneSubmitted),
        "otp" => Command::Send(vec![
            Message::OtpCodeEntered(required(verb, rest)?.to_string()),
            Message::OtpVerifyRequested,
        ]),
        "allow" => Command::one(Message::PermissionAnswered { granted: true }),
        "deny" => Command::one(Message::PermissionAnswered { granted: false }),
        "tab" => Command::one(Message::TabSelected(rest.parse::<TabSelection>()?)),
        "station" => Command::one(Message::StationSelected(StationId::new(required(
            verb, rest,
        )?))),
        "facility" => Command::one(Message::FacilityClicked(AmenityId::new(required(
            verb, rest,
        )?))),
        "navigate" => Command::one(Message::NavigateClicked),
        "see-all" => Command::one(Message::SeeAllClicked),
        "back" => Command::one(Message::Back),
        "logout" => Command::one(Message::Logout),
        "notifications" => Command::one(Message::NotificationsOpened),
        "feedback" => Command::one(Message::FeedbackOpened),
        "about" => Command::one(Message::AboutOpened),
        "search" => Command::one(Message::SearchQueryChanged(rest.to_string())),
        "list-search" => Command::one(Message::DirectoryQueryChanged(rest.to_string())),
        "fav-station" => Command::one(Message::ToggleStationFavorite(StationId::new(
            required(verb, rest)?,
        ))),
        "fav-amenity" => Command::one(Message::ToggleAmenityFavorite(AmenityId::new(
            required(verb, rest)?,
        ))),
        "set" => Command::one(Message::UpdateSettings(SettingsPatch::from_assignment(
            required(verb, rest)?,
        )?)),
        "category" => {
            let category = AmenityCategory::parse(rest).ok_or_else(|| {
                Error::invalid_command(format!("unknown category '{rest}'"))
            })?;
            Command::one(Message::MapCategoryToggled(category))
        }
        "locate" => Command::one(Message::LocateMe),
        "guidance" => Command::one(Message::ToggleGuidance),
        "saved" => Command::one(Message::SavedFilterChanged(rest.parse::<SavedFilter>()?)),
        "feedback-tag" => Command::one(Message::FeedbackTagSelected(
            rest.parse::<FeedbackTag>()?,
        )),
        "feedback-subject" => Command::one(Message::FeedbackSubjectEdited(rest.to_string())),
        "feedback-text" => Command::one(Message::FeedbackDescriptionEdited(rest.to_string())),
        "submit-feedback" => Command::one(Message::FeedbackSubmitted),
        "chat" => Command::one(Message::ChatSend(rest.to_string())),
        "wait" => {
            let millis = required(verb, rest)?.parse::<u64>().map_err(|_| {
                Error::invalid_command(format!("wait expects milliseconds, got '{rest}'"))
            })?;
            Command::Wait(Duration::from_millis(millis))
        }
        "state" => Command::Dump,
        "quit" | "q" => Command::one(Message::Quit),
        "" => return Err(Error::invalid_command("empty command")),
        other => return Err(Error::invalid_command(format!("unknown command '{other}'"))),
    };

    Ok(command)
}

fn required<'a>(verb: &str, rest: &'a str) -> Result<&'a str> {
    if rest.is_empty() {
        Err(Error::invalid_command(format!("'{verb}' needs an argument")))
    } else {
        Ok(rest)
    }
}
