//! Test session builders

use super::mock_helpers::{CallLog, RecordingEmbedder};
use super::test_runtime;
use embed_harness::{ConnectionFields, EmbedType, Session, SessionSettings};

/// Builder for sessions backed by a [`RecordingEmbedder`]
pub struct SessionBuilder {
    settings: SessionSettings,
    emit_loaded: bool,
    fail_requests: bool,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            settings: SessionSettings {
                seed: ConnectionFields::new("Embed", "token-1", "https://app.example.com/embed"),
                ..Default::default()
            },
            emit_loaded: true,
            fail_requests: false,
        }
    }

    pub fn embed_type(mut self, embed_type: EmbedType) -> Self {
        self.settings.initial_embed_type = embed_type;
        self
    }

    pub fn preserve_connection(mut self) -> Self {
        self.settings.preserve_connection_on_option_change = true;
        self
    }

    /// Do not report `Loaded` after mounting
    pub fn silent(mut self) -> Self {
        self.emit_loaded = false;
        self
    }

    pub fn failing_requests(mut self) -> Self {
        self.fail_requests = true;
        self
    }

    pub fn build(self) -> (Session<RecordingEmbedder>, CallLog) {
        let (events_tx, events_rx) = crossbeam_channel::unbounded();
        let mut embedder = RecordingEmbedder::new();
        if self.emit_loaded {
            embedder = embedder.with_events(events_tx);
        }
        if self.fail_requests {
            embedder = embedder.with_failing_requests();
        }
        let log = embedder.log.clone();
        let session = Session::new(
            embedder,
            events_rx,
            test_runtime().handle().clone(),
            &self.settings,
        );
        (session, log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_builder() {
        let (session, log) = SessionBuilder::new().embed_type(EmbedType::Tile).build();
        assert_eq!(session.machine().embed_type(), EmbedType::Tile);
        assert!(log.lock().unwrap().is_empty());
    }
}
