//! Headless embedding collaborator
//!
//! This collaborator does not talk to any embedding service. It logs every
//! mount and request, and can simulate the load/render callbacks and request
//! failures so the harness can be exercised without a browser.
//!
//! # Example
//!
//! ```ignore
//! use embed_harness::collaborator::LoggingEmbedder;
//!
//! let (events_tx, events_rx) = crossbeam_channel::unbounded();
//! let embedder = LoggingEmbedder::new(events_tx).with_simulated_lifecycle(true);
//! ```

use super::{Embedder, MountId, RequestFuture, SettingsPatch, SurfaceEvent, SurfaceHandle};
use crate::config::CollaboratorConfig;
use crate::embed::{SurfaceDescriptor, SurfaceKind};
use crate::error::HarnessError;
use crossbeam_channel::Sender;

/// Embedder that only logs
pub struct LoggingEmbedder {
    events: Sender<SurfaceEvent>,
    simulate_lifecycle: bool,
    fail_requests: bool,
    mounts: u64,
}

impl LoggingEmbedder {
    pub fn new(events: Sender<SurfaceEvent>) -> Self {
        Self {
            events,
            simulate_lifecycle: true,
            fail_requests: false,
            mounts: 0,
        }
    }

    pub fn from_config(events: Sender<SurfaceEvent>, config: &CollaboratorConfig) -> Self {
        Self::new(events)
            .with_simulated_lifecycle(config.simulate_lifecycle)
            .with_failing_requests(config.fail_requests)
    }

    /// Emit `Loaded` and `Rendered` right after each mount
    pub fn with_simulated_lifecycle(mut self, enabled: bool) -> Self {
        self.simulate_lifecycle = enabled;
        self
    }

    /// Make every settings update and save reject
    pub fn with_failing_requests(mut self, enabled: bool) -> Self {
        self.fail_requests = enabled;
        self
    }

    /// Number of surfaces mounted so far
    pub fn mount_count(&self) -> u64 {
        self.mounts
    }
}

impl Embedder for LoggingEmbedder {
    fn mount(&mut self, id: MountId, descriptor: &SurfaceDescriptor) -> Box<dyn SurfaceHandle> {
        debug_assert!(
            !descriptor.is_placeholder(),
            "placeholder descriptors are never mounted ({})",
            id
        );
        let kind = descriptor.kind().unwrap_or_else(|| {
            tracing::warn!("Asked to mount a placeholder as {}; treating it as a report", id);
            SurfaceKind::Report
        });
        self.mounts += 1;

        match serde_json::to_string(descriptor) {
            Ok(json) => tracing::info!("Mounting {} as {}: {}", kind, id, json),
            Err(e) => tracing::info!("Mounting {} as {} (descriptor not serializable: {})", kind, id, e),
        }

        if self.simulate_lifecycle {
            // The receiver may already be gone during shutdown.
            let _ = self.events.send(SurfaceEvent::Loaded { mount: id });
            if kind == SurfaceKind::Report {
                let _ = self.events.send(SurfaceEvent::Rendered { mount: id });
            }
        }

        Box::new(LoggedSurface {
            id,
            kind,
            fail_requests: self.fail_requests,
        })
    }
}

struct LoggedSurface {
    id: MountId,
    kind: SurfaceKind,
    fail_requests: bool,
}

impl LoggedSurface {
    fn respond(&self, what: &str) -> RequestFuture {
        let outcome = if self.fail_requests {
            Err(HarnessError::Collaborator(format!(
                "{} rejected by {} ({})",
                what, self.kind, self.id
            )))
        } else {
            Ok(())
        };
        Box::pin(async move { outcome })
    }
}

impl SurfaceHandle for LoggedSurface {
    fn kind(&self) -> SurfaceKind {
        self.kind
    }

    fn update_settings(&self, patch: SettingsPatch) -> RequestFuture {
        tracing::info!(
            "updateSettings on {}: {}",
            self.id,
            serde_json::to_string(&patch).unwrap_or_default()
        );
        self.respond("updateSettings")
    }

    fn save(&self) -> RequestFuture {
        tracing::info!("save on {}", self.id);
        if self.kind != SurfaceKind::Report {
            let kind = self.kind;
            return Box::pin(async move {
                Err::<(), _>(HarnessError::Collaborator(format!("{} cannot be saved", kind)))
            });
        }
        self.respond("save")
    }

    fn unmount(self: Box<Self>) {
        tracing::info!("Unmounting {} ({})", self.kind, self.id);
    }
}
