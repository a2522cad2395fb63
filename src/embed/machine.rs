//! Configuration state machine
//!
//! Owns the [`EmbedConfiguration`] record and the currently mounted surface.
//! Every mutation runs to completion on the caller's thread; afterwards the
//! surface slot is brought in line with the new descriptor (release the old
//! handle, mount the new one).
//!
//! # States
//!
//! - **Configuring**: `started == false`; field edits loop here and the
//!   preview shows the placeholder
//! - **Running**: entered only through [`ConfigurationStateMachine::run`]
//!
//! Selecting an embed type or a secondary option resets the record and
//! returns to Configuring. There is no terminal state.

use super::defaults::{defaults_for, options_for, EmbedOptions};
use super::record::{EmbedConfiguration, FieldEdit, SecondaryOption};
use super::surface::{SurfaceDescriptor, SurfaceKind};
use crate::collaborator::{
    Embedder, MountId, RequestDispatcher, RequestKind, SettingsPatch, SurfaceEvent, SurfaceHandle,
};
use crate::config::SessionSettings;
use crate::types::{ConnectionFields, EmbedType};

/// The mounted surface and whether its handle has been captured for requests
struct ActiveSurface {
    id: MountId,
    descriptor: SurfaceDescriptor,
    handle: Box<dyn SurfaceHandle>,
    /// Set by the load/render callbacks; requests are only issued once captured
    captured: bool,
    mounted_at: chrono::DateTime<chrono::Utc>,
}

/// Mediates all configuration mutations and owns the active surface handle
pub struct ConfigurationStateMachine<E: Embedder> {
    record: EmbedConfiguration,
    embedder: E,
    requests: RequestDispatcher,
    surface: Option<ActiveSurface>,
    last_mount: MountId,
    preserve_connection_on_option_change: bool,
}

impl<E: Embedder> ConfigurationStateMachine<E> {
    /// Create a machine whose record holds the defaults for the configured
    /// initial embed type
    pub fn new(embedder: E, requests: RequestDispatcher, settings: &SessionSettings) -> Self {
        tracing::debug!(
            "Starting configuration session with embed type {}",
            settings.initial_embed_type
        );
        Self {
            record: defaults_for(settings.initial_embed_type, &settings.seed),
            embedder,
            requests,
            surface: None,
            last_mount: MountId::default(),
            preserve_connection_on_option_change: settings.preserve_connection_on_option_change,
        }
    }

    /// Current configuration record
    pub fn record(&self) -> &EmbedConfiguration {
        &self.record
    }

    pub fn embed_type(&self) -> EmbedType {
        self.record.embed_type
    }

    pub fn is_started(&self) -> bool {
        self.record.started
    }

    /// Dropdown options for the active embed type
    pub fn options(&self) -> EmbedOptions {
        options_for(self.record.embed_type)
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Mount id of the active surface, if any
    pub fn active_mount(&self) -> Option<MountId> {
        self.surface.as_ref().map(|s| s.id)
    }

    /// Check if a load/render callback has handed over the active surface
    pub fn has_captured_handle(&self) -> bool {
        self.surface.as_ref().is_some_and(|s| s.captured)
    }

    /// Assign a single field.
    ///
    /// Returns `false` without touching the record when the field is not
    /// shown for the active embed type and report mode.
    pub fn set_field(&mut self, edit: FieldEdit) -> bool {
        let field = edit.field();
        if !field.applies_to(self.record.embed_type, self.record.report_mode) {
            tracing::debug!(
                "Ignoring {} edit: not applicable to {} ({})",
                field.as_str(),
                self.record.embed_type,
                self.record.report_mode
            );
            return false;
        }

        edit.apply_to(&mut self.record);
        self.sync_surface();
        true
    }

    /// Switch to another embed type.
    ///
    /// Everything except the connection fields returns to the new type's
    /// defaults, including the run gate. Selecting the active type does nothing.
    pub fn select_embed_type(&mut self, embed_type: EmbedType) -> bool {
        if embed_type == self.record.embed_type {
            return false;
        }

        tracing::info!("Embed type {} -> {}", self.record.embed_type, embed_type);
        let seed = self.record.connection.clone();
        self.record = defaults_for(embed_type, &seed);
        self.sync_surface();
        true
    }

    /// Pick a report mode or page view.
    ///
    /// Valid field combinations differ per mode, so the record is reset to the
    /// active type's defaults before the value is applied. Connection fields
    /// are discarded too unless the session is configured to keep them.
    pub fn select_secondary_option(&mut self, option: SecondaryOption) -> bool {
        if !self.options().offers(option) {
            tracing::debug!(
                "Ignoring {:?}: not offered for {}",
                option,
                self.record.embed_type
            );
            return false;
        }

        let unchanged = match option {
            SecondaryOption::ReportMode(mode) => self.record.report_mode == mode,
            SecondaryOption::PageView(view) => self.record.page_view == view,
        };
        if unchanged {
            return false;
        }

        let seed = if self.preserve_connection_on_option_change {
            self.record.connection.clone()
        } else {
            ConnectionFields::default()
        };
        self.record = defaults_for(self.record.embed_type, &seed);
        match option {
            SecondaryOption::ReportMode(mode) => self.record.report_mode = mode,
            SecondaryOption::PageView(view) => self.record.page_view = view,
        }
        tracing::info!("Selected {:?}; configuration reset", option);

        self.sync_surface();
        true
    }

    /// Flip the visual header flag.
    ///
    /// The flag flips immediately. If a surface handle has been captured, a
    /// settings update is sent without waiting; its failure is only logged.
    /// Returns the new flag.
    pub fn toggle_visual_headers(&mut self) -> bool {
        self.record.visual_header_flag = !self.record.visual_header_flag;
        let visible = self.record.visual_header_flag;

        if let Some(surface) = self.surface.as_ref().filter(|s| s.captured) {
            let request = surface
                .handle
                .update_settings(SettingsPatch::visual_headers(visible));
            self.requests
                .spawn(surface.id, RequestKind::UpdateSettings, request);
        }

        visible
    }

    /// Open the run gate. Repeated calls have no effect.
    pub fn run(&mut self) -> bool {
        if self.record.started {
            return false;
        }

        if !self.record.connection.is_complete() {
            tracing::warn!(
                "Running with blank connection fields: {}",
                self.record.connection.missing().join(", ")
            );
        }

        self.record.started = true;
        self.sync_surface();
        true
    }

    /// Ask the captured surface to save itself. Returns whether a request was sent.
    pub fn save_report(&mut self) -> bool {
        let Some(surface) = self.surface.as_ref().filter(|s| s.captured) else {
            tracing::debug!("Nothing to save: no surface handle captured");
            return false;
        };

        let request = surface.handle.save();
        self.requests.spawn(surface.id, RequestKind::Save, request);
        true
    }

    /// Descriptor for the current record
    pub fn select_surface(&self) -> SurfaceDescriptor {
        SurfaceDescriptor::from_record(&self.record)
    }

    /// React to a lifecycle callback from the embedding library.
    ///
    /// Load and render capture the handle of the active mount. If headers
    /// were hidden before the mount, the captured surface is told to hide
    /// them too. Everything else is diagnostic output only.
    pub fn handle_surface_event(&mut self, event: SurfaceEvent) {
        let Some(surface) = self.surface.as_mut().filter(|s| s.id == event.mount()) else {
            tracing::debug!("Ignoring event from replaced surface: {:?}", event);
            return;
        };

        match event {
            SurfaceEvent::Loaded { .. } | SurfaceEvent::Rendered { .. } => {
                let kind = surface.handle.kind();
                if kind == SurfaceKind::Tile {
                    tracing::info!("Tile loaded ({})", surface.id);
                } else if !surface.captured {
                    tracing::info!(
                        "{} loaded ({}) after {} ms",
                        kind,
                        surface.id,
                        (chrono::Utc::now() - surface.mounted_at).num_milliseconds()
                    );
                    surface.captured = true;

                    // A fresh mount shows headers; carry a hidden flag over to it
                    if !self.record.visual_header_flag {
                        let request = surface
                            .handle
                            .update_settings(SettingsPatch::visual_headers(false));
                        self.requests
                            .spawn(surface.id, RequestKind::UpdateSettings, request);
                    }
                }
            }
            SurfaceEvent::Error { payload, .. } => {
                tracing::warn!("Surface error on {}: {}", surface.id, payload);
            }
            SurfaceEvent::DataSelected { payload, .. } => {
                tracing::info!("Data selected: {}", payload);
            }
            SurfaceEvent::TileClicked { payload, .. } => {
                tracing::info!("Data from tile: {}", payload);
            }
            SurfaceEvent::Saved { payload, .. } => {
                tracing::info!("Report saved. Event data {}", payload);
            }
        }
    }

    /// Bring the surface slot in line with the current descriptor
    fn sync_surface(&mut self) {
        let descriptor = self.select_surface();
        if descriptor.is_placeholder() {
            self.release_surface();
            return;
        }

        if self
            .surface
            .as_ref()
            .is_some_and(|s| s.descriptor == descriptor)
        {
            return;
        }

        self.release_surface();
        self.last_mount = self.last_mount.next();
        let id = self.last_mount;
        let handle = self.embedder.mount(id, &descriptor);
        self.surface = Some(ActiveSurface {
            id,
            descriptor,
            handle,
            captured: false,
            mounted_at: chrono::Utc::now(),
        });
    }

    fn release_surface(&mut self) {
        if let Some(surface) = self.surface.take() {
            tracing::debug!("Releasing {}", surface.id);
            surface.handle.unmount();
        }
    }
}

impl<E: Embedder> Drop for ConfigurationStateMachine<E> {
    fn drop(&mut self) {
        self.release_surface();
    }
}
