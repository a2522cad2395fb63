//! Recording collaborator for integration tests

use crossbeam_channel::Sender;
use embed_harness::collaborator::{RequestFuture, SettingsPatch};
use embed_harness::embed::SurfaceKind;
use embed_harness::{Embedder, HarnessError, MountId, SurfaceDescriptor, SurfaceEvent, SurfaceHandle};
use std::sync::{Arc, Mutex};

/// Everything the harness asked of the collaborator, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Mount(MountId, SurfaceDescriptor),
    UpdateSettings(MountId, bool),
    Save(MountId),
    Unmount(MountId),
}

pub type CallLog = Arc<Mutex<Vec<Call>>>;

/// Embedder that records calls and optionally reports `Loaded` on mount
pub struct RecordingEmbedder {
    pub log: CallLog,
    events: Option<Sender<SurfaceEvent>>,
    fail_requests: bool,
}

impl RecordingEmbedder {
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
            events: None,
            fail_requests: false,
        }
    }

    /// Report `Loaded` for every mount on this channel
    pub fn with_events(mut self, events: Sender<SurfaceEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn with_failing_requests(mut self) -> Self {
        self.fail_requests = true;
        self
    }
}

impl Embedder for RecordingEmbedder {
    fn mount(&mut self, id: MountId, descriptor: &SurfaceDescriptor) -> Box<dyn SurfaceHandle> {
        self.log
            .lock()
            .unwrap()
            .push(Call::Mount(id, descriptor.clone()));
        if let Some(events) = &self.events {
            events.send(SurfaceEvent::Loaded { mount: id }).unwrap();
        }
        Box::new(RecordingHandle {
            id,
            kind: descriptor.kind().expect("placeholder is never mounted"),
            log: self.log.clone(),
            fail: self.fail_requests,
        })
    }
}

pub struct RecordingHandle {
    id: MountId,
    kind: SurfaceKind,
    log: CallLog,
    fail: bool,
}

impl RecordingHandle {
    fn reply(&self) -> RequestFuture {
        let fail = self.fail;
        Box::pin(async move {
            if fail {
                Err(HarnessError::Collaborator("service unavailable".into()))
            } else {
                Ok(())
            }
        })
    }
}

impl SurfaceHandle for RecordingHandle {
    fn kind(&self) -> SurfaceKind {
        self.kind
    }

    fn update_settings(&self, patch: SettingsPatch) -> RequestFuture {
        let visible = patch.visual_settings.visual_headers[0].settings.visible;
        self.log
            .lock()
            .unwrap()
            .push(Call::UpdateSettings(self.id, visible));
        self.reply()
    }

    fn save(&self) -> RequestFuture {
        self.log.lock().unwrap().push(Call::Save(self.id));
        self.reply()
    }

    fn unmount(self: Box<Self>) {
        self.log.lock().unwrap().push(Call::Unmount(self.id));
    }
}
