//! Embed configuration core
//!
//! - [`defaults`] - Per-type option tables and default records
//! - [`record`] - The [`EmbedConfiguration`] record and typed field edits
//! - [`surface`] - Surface descriptors derived from the record
//! - [`machine`] - The [`ConfigurationStateMachine`] that ties them together
//!
//! # Example
//!
//! ```ignore
//! use embed_harness::embed::{ConfigurationStateMachine, FieldEdit, SecondaryOption};
//! use embed_harness::types::{EmbedType, ReportMode};
//!
//! let mut machine = ConfigurationStateMachine::new(embedder, requests, &settings);
//! machine.select_secondary_option(SecondaryOption::ReportMode(ReportMode::Create));
//! machine.set_field(FieldEdit::DatasetId("ds1".into()));
//! machine.run();
//!
//! let descriptor = machine.select_surface();
//! ```

pub mod defaults;
pub mod machine;
pub mod record;
pub mod surface;

pub use defaults::{defaults_for, options_for, EmbedOptions};
pub use machine::ConfigurationStateMachine;
pub use record::{EmbedConfiguration, FieldEdit, FieldName, SecondaryOption};
pub use surface::{
    DashboardSurface, ExtraSettings, ReportCreateSurface, ReportViewSurface, SurfaceDescriptor,
    SurfaceKind, TileSurface, PLACEHOLDER_INSTRUCTIONS,
};
