//! Headless mode runner - stdin commands in, NDJSON events out
//!
//! The engine loop waits on two sources: messages posted back by background
//! tasks (splash timer, simulated devices) and commands parsed from stdin.
//! After each step every engine event broadcast so far is written to stdout.

use tokio::sync::{broadcast, mpsc};
use tracing::{info, warn};

use steasy_app::config::AppConfig;
use steasy_app::{Engine, EngineEvent, Message};
use steasy_core::prelude::*;

use super::command::{parse_command, Command};
use super::HeadlessEvent;

/// What the stdin reader hands to the event loop
#[derive(Debug)]
enum Input {
    Messages(Vec<Message>),
    Dump,
    Rejected(Error),
}

/// Run in headless mode - output JSON events instead of a UI
pub async fn run_headless(config: AppConfig) -> Result<()> {
    info!("═══════════════════════════════════════════════════════");
    info!("Station Easy starting in HEADLESS mode");
    info!("Splash: {} ms", config.startup.splash_ms);
    info!("═══════════════════════════════════════════════════════");

    let mut engine = match Engine::new(&config) {
        Ok(engine) => engine,
        Err(e) => {
            HeadlessEvent::error(&e).emit();
            return Err(e);
        }
    };
    let mut events = engine.subscribe();

    let (input_tx, mut input_rx) = mpsc::channel::<Input>(64);
    std::thread::spawn(move || {
        spawn_stdin_reader_blocking(input_tx);
    });

    let result = headless_event_loop(&mut engine, &mut input_rx, &mut events).await;

    engine.shutdown().await;
    emit_engine_events(&mut events);

    info!("Station Easy headless mode exiting");
    result
}

/// Main headless event loop
async fn headless_event_loop(
    engine: &mut Engine,
    input_rx: &mut mpsc::Receiver<Input>,
    events: &mut broadcast::Receiver<EngineEvent>,
) -> Result<()> {
    loop {
        if engine.should_quit() {
            info!("Quit requested");
            break;
        }

        tokio::select! {
            msg = engine.msg_rx.recv() => match msg {
                Some(msg) => engine.process_message(msg),
                None => {
                    info!("Message channel closed");
                    break;
                }
            },
            input = input_rx.recv() => match input {
                Some(Input::Messages(messages)) => {
                    for msg in messages {
                        engine.process_message(msg);
                    }
                }
                Some(Input::Dump) => HeadlessEvent::state(&engine.state).emit(),
                Some(Input::Rejected(err)) => HeadlessEvent::error(&err).emit(),
                None => {
                    // End of input quits like the `quit` command
                    engine.process_message(Message::Quit);
                }
            },
        }

        emit_engine_events(events);
    }

    Ok(())
}

/// Write every engine event received so far
fn emit_engine_events(events: &mut broadcast::Receiver<EngineEvent>) {
    loop {
        match events.try_recv() {
            Ok(event) => HeadlessEvent::from_engine_event(&event).emit(),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!("Headless output lagged, {} events dropped", skipped);
            }
            Err(_) => break,
        }
    }
}

/// Read commands from stdin until EOF or `quit` (blocking version)
fn spawn_stdin_reader_blocking(input_tx: mpsc::Sender<Input>) {
    use std::io::BufRead;

    let stdin = std::io::stdin();
    let reader = stdin.lock();

    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Stdin read error: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let input = match parse_command(&line) {
            Ok(Command::Wait(duration)) => {
                info!("Stdin: waiting {:?}", duration);
                std::thread::sleep(duration);
                continue;
            }
            Ok(Command::Dump) => Input::Dump,
            Ok(Command::Send(messages)) => Input::Messages(messages),
            Err(e) => {
                warn!("Stdin: rejected '{}': {}", line.trim(), e);
                Input::Rejected(e)
            }
        };

        let quit = matches!(
            &input,
            Input::Messages(messages) if matches!(messages.as_slice(), [Message::Quit])
        );
        if input_tx.blocking_send(input).is_err() || quit {
            break;
        }
    }

    info!("Stdin reader exiting");
}
