//! Timer engine for the Pomodoro Timer.
//!
//! This module drives a [`Session`] from a tick source and a command channel:
//! - Serial ticks from any [`TickSource`]
//! - Commands from the presentation layer (play/pause, start, reset, answers)
//! - Events for presentation layers on every state change
//! - Automatic answers to completion questions via [`CompletionPolicy`]

use serde::Serialize;
use tokio::sync::mpsc;

use super::error::EngineError;
use super::ticker::TickSource;
use crate::session::{Completion, CompletionPolicy, NextAction, Session, SettingsUpdate, Toggle};
use crate::settings::TimerSettings;
use crate::types::IntervalKind;

// ============================================================================
// EngineCommand / TimerEvent
// ============================================================================

/// Commands accepted by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    /// Play/pause
    Toggle,
    /// Start an interval from its full duration
    Start(IntervalKind),
    /// Stop and load an idle pomodoro
    Reset,
    /// Answer the pending completion question
    Respond {
        /// Whether the user accepted the proposed next interval
        accept: bool,
    },
    /// Replace the settings (deferred while an interval runs)
    UpdateSettings(TimerSettings),
    /// Set or clear the current task label
    SetTask(Option<String>),
    /// Stop the engine loop
    Shutdown,
}

/// Events published by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum TimerEvent {
    /// An interval started from its full duration
    Started {
        /// Interval kind
        kind: IntervalKind,
        /// Full length in seconds
        total_seconds: u32,
    },
    /// The countdown was paused
    Paused {
        /// Seconds left
        remaining_seconds: u32,
    },
    /// The countdown continues in place
    Resumed {
        /// Seconds left
        remaining_seconds: u32,
    },
    /// The timer was stopped and reloaded
    Reset {
        /// Interval kind now loaded
        kind: IntervalKind,
        /// Seconds loaded
        remaining_seconds: u32,
    },
    /// One second elapsed
    Tick {
        /// Seconds left
        remaining_seconds: u32,
    },
    /// An interval reached zero
    IntervalCompleted(Completion),
    /// The completion needs an answer from the user
    AwaitingDecision(Completion),
    /// New settings are active
    SettingsApplied(TimerSettings),
    /// New settings will apply when the running interval completes
    SettingsDeferred(TimerSettings),
    /// The current task label changed
    TaskChanged {
        /// New label
        task: Option<String>,
    },
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Drives a session and publishes its state changes.
pub struct TimerEngine {
    session: Session,
    policy: CompletionPolicy,
    pending: Option<Completion>,
    restart_ticks: bool,
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerEngine {
    /// Creates an engine around a session.
    pub fn new(
        session: Session,
        policy: CompletionPolicy,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> Self {
        Self {
            session,
            policy,
            pending: None,
            restart_ticks: false,
            event_tx,
        }
    }

    /// Runs the engine until shutdown.
    ///
    /// Commands take priority over ticks when both are ready, and each tick
    /// is fully processed before the next is awaited. The ticker is re-armed
    /// whenever an interval starts or resumes, so the first second of it is
    /// always a full one. Returns when a
    /// `Shutdown` command arrives, the command channel closes or the tick
    /// source is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error only when events can no longer be delivered; rejected
    /// commands are logged and skipped.
    pub async fn run<T: TickSource>(
        &mut self,
        mut ticker: T,
        mut commands: mpsc::UnboundedReceiver<EngineCommand>,
    ) -> Result<(), EngineError> {
        tracing::debug!("timer engine started");

        loop {
            tokio::select! {
                biased;

                command = commands.recv() => match command {
                    None | Some(EngineCommand::Shutdown) => break,
                    Some(command) => {
                        if let Err(err) = self.handle_command(command) {
                            if err.is_fatal() {
                                return Err(err);
                            }
                            tracing::warn!(error = %err, "command rejected");
                        }
                    }
                },
                alive = ticker.tick() => {
                    if !alive {
                        break;
                    }
                    self.process_tick()?;
                }
            }

            if std::mem::take(&mut self.restart_ticks) {
                ticker.restart();
            }
        }

        tracing::debug!("timer engine stopped");
        Ok(())
    }

    /// Processes one tick.
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: the countdown was running and advanced
    /// - `Ok(false)`: nothing is running
    /// - `Err(...)`: events could not be delivered
    pub fn process_tick(&mut self) -> Result<bool, EngineError> {
        if !self.session.is_running() {
            return Ok(false);
        }

        let had_pending_settings = self.session.pending_settings().is_some();
        let completion = self.session.tick();

        self.emit(TimerEvent::Tick {
            remaining_seconds: self.session.snapshot().remaining_seconds,
        })?;

        if let Some(completion) = completion {
            if had_pending_settings && self.session.pending_settings().is_none() {
                self.emit(TimerEvent::SettingsApplied(*self.session.settings()))?;
            }
            self.handle_completion(completion)?;
        }

        Ok(true)
    }

    fn handle_completion(&mut self, completion: Completion) -> Result<(), EngineError> {
        self.emit(TimerEvent::IntervalCompleted(completion))?;

        match self.policy.decide(&completion) {
            Some(accept) => {
                tracing::debug!(accept, "completion answered by policy");
                let action = self.session.respond(&completion, accept);
                self.emit_action(action)
            }
            None => {
                self.pending = Some(completion);
                self.emit(TimerEvent::AwaitingDecision(completion))
            }
        }
    }

    /// Applies one command.
    ///
    /// Starting, resetting or toggling drops an unanswered completion.
    /// `Shutdown` is handled by [`TimerEngine::run`] and ignored here.
    ///
    /// # Errors
    ///
    /// Fails on an answer with no pending completion, invalid settings or
    /// task text, or an undeliverable event.
    pub fn handle_command(&mut self, command: EngineCommand) -> Result<(), EngineError> {
        tracing::debug!(?command, "handling command");

        match command {
            EngineCommand::Toggle => {
                self.pending = None;
                let event = match self.session.toggle() {
                    Toggle::Paused => TimerEvent::Paused {
                        remaining_seconds: self.session.snapshot().remaining_seconds,
                    },
                    Toggle::Resumed => TimerEvent::Resumed {
                        remaining_seconds: self.session.snapshot().remaining_seconds,
                    },
                    Toggle::Restarted(kind) => self.started_event(kind),
                };
                self.emit(event)
            }
            EngineCommand::Start(kind) => {
                self.pending = None;
                self.session.start(kind);
                let event = self.started_event(kind);
                self.emit(event)
            }
            EngineCommand::Reset => {
                self.pending = None;
                self.session.reset();
                self.emit_action(NextAction::Wait)
            }
            EngineCommand::Respond { accept } => {
                let completion = self.pending.take().ok_or(EngineError::NoPendingDecision)?;
                let action = self.session.respond(&completion, accept);
                self.emit_action(action)
            }
            EngineCommand::UpdateSettings(settings) => {
                let update = self.session.update_settings(settings).inspect_err(|err| {
                    tracing::warn!(field = err.field(), error = %err, "settings rejected");
                })?;
                let event = match update {
                    SettingsUpdate::Applied => TimerEvent::SettingsApplied(settings),
                    SettingsUpdate::Deferred => TimerEvent::SettingsDeferred(settings),
                };
                self.emit(event)
            }
            EngineCommand::SetTask(task) => {
                self.session.set_current_task(task.as_deref())?;
                self.emit(TimerEvent::TaskChanged {
                    task: self.session.current_task().map(str::to_owned),
                })
            }
            EngineCommand::Shutdown => Ok(()),
        }
    }

    fn started_event(&self, kind: IntervalKind) -> TimerEvent {
        TimerEvent::Started {
            kind,
            total_seconds: self.session.timer().total_seconds(),
        }
    }

    fn emit_action(&mut self, action: NextAction) -> Result<(), EngineError> {
        let event = match action {
            NextAction::Start(kind) => self.started_event(kind),
            NextAction::Wait => {
                let snapshot = self.session.snapshot();
                TimerEvent::Reset {
                    kind: snapshot.kind,
                    remaining_seconds: snapshot.remaining_seconds,
                }
            }
        };
        self.emit(event)
    }

    fn emit(&mut self, event: TimerEvent) -> Result<(), EngineError> {
        if matches!(event, TimerEvent::Started { .. } | TimerEvent::Resumed { .. }) {
            self.restart_ticks = true;
        }
        self.event_tx
            .send(event)
            .map_err(|_| EngineError::EventChannelClosed)
    }

    /// Returns the driven session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the completion waiting for an answer, if any.
    pub fn pending_decision(&self) -> Option<&Completion> {
        self.pending.as_ref()
    }
}

// ============================================================================
// Tests
// ============================================================================
