//! Event dispatch for a configuration session
//!
//! A [`Session`] serializes operator actions into the state machine and
//! drains the two channels that feed back from the collaborator:
//!
//! - [`SurfaceEvent`]s - lifecycle callbacks (load, render, error, ...)
//! - [`RequestOutcome`]s - completion of fire-and-forget requests
//!
//! Both are consumed on the dispatch thread, so the machine is never touched
//! concurrently.
//!
//! # Example
//!
//! ```ignore
//! use embed_harness::session::{Session, UserAction};
//!
//! let (events_tx, events_rx) = crossbeam_channel::unbounded();
//! let embedder = LoggingEmbedder::new(events_tx);
//! let mut session = Session::new(embedder, events_rx, runtime.handle().clone(), &settings);
//!
//! session.dispatch(UserAction::Run);
//! println!("{}", serde_json::to_string_pretty(&session.surface())?);
//! ```

pub mod command;

pub use command::{parse_command, Command, HELP};

use crate::collaborator::{Embedder, RequestDispatcher, RequestOutcome, SurfaceEvent};
use crate::config::SessionSettings;
use crate::embed::{ConfigurationStateMachine, FieldEdit, SecondaryOption, SurfaceDescriptor};
use crate::types::EmbedType;
use crossbeam_channel::{unbounded, Receiver};

/// A discrete operator input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    SetField(FieldEdit),
    SelectEmbedType(EmbedType),
    SelectOption(SecondaryOption),
    ToggleVisualHeaders,
    Run,
    Save,
}

/// Counters for completed collaborator requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestStats {
    pub succeeded: u64,
    pub failed: u64,
}

/// One operator session: the state machine plus its feedback channels
pub struct Session<E: Embedder> {
    machine: ConfigurationStateMachine<E>,
    events: Receiver<SurfaceEvent>,
    outcomes: Receiver<RequestOutcome>,
    stats: RequestStats,
}

impl<E: Embedder> Session<E> {
    /// Create a session.
    ///
    /// `events` must be the receiving end of the channel the embedder
    /// reports lifecycle callbacks on.
    pub fn new(
        embedder: E,
        events: Receiver<SurfaceEvent>,
        runtime: tokio::runtime::Handle,
        settings: &SessionSettings,
    ) -> Self {
        let (outcomes_tx, outcomes) = unbounded();
        let requests = RequestDispatcher::new(runtime, outcomes_tx);
        Self {
            machine: ConfigurationStateMachine::new(embedder, requests, settings),
            events,
            outcomes,
            stats: RequestStats::default(),
        }
    }

    pub fn machine(&self) -> &ConfigurationStateMachine<E> {
        &self.machine
    }

    /// Apply one action, then process any feedback it triggered.
    ///
    /// Returns whether the action changed anything.
    pub fn dispatch(&mut self, action: UserAction) -> bool {
        tracing::trace!("Dispatching {:?}", action);
        self.pump();

        let changed = match action {
            UserAction::SetField(edit) => self.machine.set_field(edit),
            UserAction::SelectEmbedType(embed_type) => self.machine.select_embed_type(embed_type),
            UserAction::SelectOption(option) => self.machine.select_secondary_option(option),
            UserAction::ToggleVisualHeaders => {
                self.machine.toggle_visual_headers();
                true
            }
            UserAction::Run => self.machine.run(),
            UserAction::Save => self.machine.save_report(),
        };

        self.pump();
        changed
    }

    /// Drain pending lifecycle events and request outcomes
    pub fn pump(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.machine.handle_surface_event(event);
        }

        while let Ok(outcome) = self.outcomes.try_recv() {
            if outcome.succeeded() {
                self.stats.succeeded += 1;
            } else {
                self.stats.failed += 1;
            }
        }
    }

    /// Descriptor for what the preview should show right now
    pub fn surface(&self) -> SurfaceDescriptor {
        self.machine.select_surface()
    }

    pub fn request_stats(&self) -> RequestStats {
        self.stats
    }
}
