//! Interface to the external embedding library
//!
//! The harness never renders anything itself. It hands a
//! [`SurfaceDescriptor`](crate::embed::SurfaceDescriptor) to an [`Embedder`],
//! keeps the returned [`SurfaceHandle`] and, later, issues fire-and-forget
//! settings updates and saves against it.
//!
//! # Components
//!
//! - [`Embedder`] - Mounts one surface per descriptor change
//! - [`SurfaceHandle`] - The mounted object; async `update_settings` / `save`
//! - [`SurfaceEvent`] - Lifecycle callbacks the library reports back
//! - [`RequestDispatcher`] - Spawns handle requests on tokio and reports outcomes
//! - [`LoggingEmbedder`] - Headless collaborator that only logs (used by the binary)
//!
//! # Failure model
//!
//! Request failures are telemetry, not state: they are logged and sent as a
//! [`RequestOutcome`] but never touch the configuration record and never
//! reach the caller.

pub mod logging;

pub use logging::LoggingEmbedder;

use crate::embed::{SurfaceDescriptor, SurfaceKind};
use crate::error::Result;
use crossbeam_channel::Sender;
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Future returned by asynchronous handle requests
pub type RequestFuture = Pin<Box<dyn Future<Output = Result<()>> + Send + 'static>>;

/// Identifies one mount, so late callbacks from a replaced surface can be ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct MountId(pub u64);

impl MountId {
    pub fn next(self) -> Self {
        MountId(self.0 + 1)
    }
}

impl fmt::Display for MountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mount#{}", self.0)
    }
}

/// Instantiates surfaces in the external embedding library
#[cfg_attr(test, mockall::automock)]
pub trait Embedder {
    /// Mount the surface described by `descriptor`.
    ///
    /// Only called with non-placeholder descriptors. Load errors are reported
    /// later through [`SurfaceEvent::Error`].
    fn mount(&mut self, id: MountId, descriptor: &SurfaceDescriptor) -> Box<dyn SurfaceHandle>;
}

/// A mounted report, dashboard or tile
pub trait SurfaceHandle: Send {
    fn kind(&self) -> SurfaceKind;

    /// Apply a settings patch to the live surface
    fn update_settings(&self, patch: SettingsPatch) -> RequestFuture;

    /// Persist the surface (reports only; others reject)
    fn save(&self) -> RequestFuture;

    /// Tear the surface down. Called exactly once, before a replacement mounts.
    fn unmount(self: Box<Self>);
}

/// Lifecycle callbacks from the embedding library
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Loaded { mount: MountId },
    Rendered { mount: MountId },
    Error { mount: MountId, payload: serde_json::Value },
    DataSelected { mount: MountId, payload: serde_json::Value },
    TileClicked { mount: MountId, payload: serde_json::Value },
    Saved { mount: MountId, payload: serde_json::Value },
}

impl SurfaceEvent {
    pub fn mount(&self) -> MountId {
        match self {
            SurfaceEvent::Loaded { mount }
            | SurfaceEvent::Rendered { mount }
            | SurfaceEvent::Error { mount, .. }
            | SurfaceEvent::DataSelected { mount, .. }
            | SurfaceEvent::TileClicked { mount, .. }
            | SurfaceEvent::Saved { mount, .. } => *mount,
        }
    }
}

/// Settings update payload, serialized in the embedding library's shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub visual_settings: VisualSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualSettings {
    pub visual_headers: Vec<VisualHeader>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualHeader {
    pub settings: VisualHeaderSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisualHeaderSettings {
    pub visible: bool,
}

impl SettingsPatch {
    /// Show or hide the header of every visual
    pub fn visual_headers(visible: bool) -> Self {
        Self {
            visual_settings: VisualSettings {
                visual_headers: vec![VisualHeader {
                    settings: VisualHeaderSettings { visible },
                }],
            },
        }
    }
}

/// Which handle request an outcome refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    UpdateSettings,
    Save,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::UpdateSettings => f.write_str("updateSettings"),
            RequestKind::Save => f.write_str("save"),
        }
    }
}

/// Completion report of a fire-and-forget request
#[derive(Debug, Clone)]
pub struct RequestOutcome {
    pub mount: MountId,
    pub kind: RequestKind,
    /// Error message if the request failed
    pub error: Option<String>,
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

impl RequestOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Spawns handle requests without waiting for them
///
/// Outcomes are logged here and forwarded on the telemetry channel; a closed
/// channel is ignored.
#[derive(Clone)]
pub struct RequestDispatcher {
    runtime: tokio::runtime::Handle,
    outcomes: Sender<RequestOutcome>,
}

impl RequestDispatcher {
    pub fn new(runtime: tokio::runtime::Handle, outcomes: Sender<RequestOutcome>) -> Self {
        Self { runtime, outcomes }
    }

    pub fn spawn(&self, mount: MountId, kind: RequestKind, request: RequestFuture) {
        let outcomes = self.outcomes.clone();
        tracing::debug!("Dispatching {} on {}", kind, mount);
        self.runtime.spawn(async move {
            let error = match request.await {
                Ok(()) => {
                    tracing::info!("{} on {} succeeded", kind, mount);
                    None
                }
                Err(e) => {
                    tracing::warn!("{} on {} failed: {}", kind, mount, e);
                    Some(e.to_string())
                }
            };
            let _ = outcomes.send(RequestOutcome {
                mount,
                kind,
                error,
                completed_at: chrono::Utc::now(),
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HarnessError;

    #[test]
    fn test_visual_header_patch_shape() {
        let json = serde_json::to_value(SettingsPatch::visual_headers(false)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "visualSettings": {
                    "visualHeaders": [{ "settings": { "visible": false } }]
                }
            })
        );
    }

    #[test]
    fn test_mount_id_sequence() {
        let first = MountId::default();
        assert_eq!(first.next(), MountId(1));
        assert_eq!(first.next().to_string(), "mount#1");
    }

    #[test]
    fn test_event_mount_accessor() {
        let event = SurfaceEvent::TileClicked {
            mount: MountId(7),
            payload: serde_json::json!({ "tileId": "t" }),
        };
        assert_eq!(event.mount(), MountId(7));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_dispatcher_reports_failure() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let dispatcher = RequestDispatcher::new(tokio::runtime::Handle::current(), tx);

        dispatcher.spawn(
            MountId(3),
            RequestKind::Save,
            Box::pin(async { Err::<(), _>(HarnessError::Collaborator("read-only report".into())) }),
        );

        let outcome = tokio::task::spawn_blocking(move || {
            rx.recv_timeout(std::time::Duration::from_secs(2))
        })
        .await
        .unwrap()
        .unwrap();
        assert_eq!(outcome.mount, MountId(3));
        assert_eq!(outcome.kind, RequestKind::Save);
        assert!(!outcome.succeeded());
        assert!(outcome.error.unwrap().contains("read-only report"));
    }
}
