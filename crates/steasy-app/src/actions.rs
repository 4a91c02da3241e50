//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Every task races its work against the shutdown signal and reports back
//! through the message channel. A closed channel means the engine is gone,
//! so send errors are only logged.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use steasy_core::PhoneNumber;
use steasy_device::{GeolocationProvider, OtpGateway, SimulatedGeolocation, SimulatedOtpGateway};

use crate::config::SimulationConfig;
use crate::message::Message;
use crate::state::LocateTarget;
use crate::UpdateAction;

/// The simulated collaborators and timings one engine runs with
#[derive(Debug, Clone)]
pub struct Devices {
    pub otp: SimulatedOtpGateway,
    pub geolocation: SimulatedGeolocation,
    pub chat_reply_delay: Duration,
    pub feedback_return_delay: Duration,
}

impl Devices {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            otp: config.otp_gateway(),
            geolocation: config.geolocation.provider(),
            chat_reply_delay: config.chat_reply_delay(),
            feedback_return_delay: config.feedback_return_delay(),
        }
    }
}

impl Default for Devices {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

/// Execute an action by spawning a background task
pub fn handle_action(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    shutdown_rx: watch::Receiver<bool>,
    devices: &Devices,
) {
    match action {
        UpdateAction::SendOtp { phone } => {
            spawn_send_otp(devices.otp.clone(), phone, msg_tx, shutdown_rx);
        }

        UpdateAction::LocateUser { target, request } => {
            spawn_locate(
                devices.geolocation.clone(),
                target,
                request,
                msg_tx,
                shutdown_rx,
            );
        }

        UpdateAction::ScheduleChatReply { reply, session } => {
            spawn_timer(
                devices.chat_reply_delay,
                Message::ChatReplyReady { reply, session },
                msg_tx,
                shutdown_rx,
            );
        }

        UpdateAction::ScheduleFeedbackReturn { generation } => {
            spawn_timer(
                devices.feedback_return_delay,
                Message::FeedbackReturnElapsed { generation },
                msg_tx,
                shutdown_rx,
            );
        }
    }
}

/// Deliver `message` after `delay` unless shutdown comes first
pub fn spawn_timer(
    delay: Duration,
    message: Message,
    msg_tx: mpsc::Sender<Message>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(delay) => {
                if msg_tx.send(message).await.is_err() {
                    debug!("Timer fired after the message channel closed");
                }
            }
            _ = shutdown_rx.changed() => {
                debug!("Timer cancelled by shutdown");
            }
        }
    })
}

fn spawn_send_otp<G>(
    gateway: G,
    phone: PhoneNumber,
    msg_tx: mpsc::Sender<Message>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    G: OtpGateway + Sync + 'static,
{
    tokio::spawn(async move {
        let msg = tokio::select! {
            result = gateway.send_code(&phone) => match result {
                Ok(delivery) => Message::OtpDelivered { code: delivery.code },
                Err(e) => {
                    warn!("OTP send failed: {}", e);
                    Message::OtpFailed { reason: e.to_string() }
                }
            },
            _ = shutdown_rx.changed() => return,
        };
        if msg_tx.send(msg).await.is_err() {
            debug!("OTP result dropped, channel closed");
        }
    })
}

fn spawn_locate<P>(
    provider: P,
    target: LocateTarget,
    request: u64,
    msg_tx: mpsc::Sender<Message>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    P: GeolocationProvider + Sync + 'static,
{
    tokio::spawn(async move {
        let msg = tokio::select! {
            result = provider.current_position() => match result {
                Ok(coordinates) => Message::LocationResolved { target, request, coordinates },
                Err(e) => Message::LocationFailed { target, request, reason: e.to_string() },
            },
            _ = shutdown_rx.changed() => return,
        };
        if msg_tx.send(msg).await.is_err() {
            debug!("Location result dropped, channel closed");
        }
    })
}
