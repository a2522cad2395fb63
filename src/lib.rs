//! # embed-harness: Embedded analytics configuration harness
//!
//! An interactive harness for configuring and previewing three embeddable
//! analytics surfaces: a full report, a dashboard and a single tile. The
//! rendering itself belongs to an external embedding library; this crate
//! decides what configuration is valid, which defaults apply and which
//! surface to mount.
//!
//! ## Architecture
//!
//! - **Embed core**: [`embed::ConfigurationStateMachine`] owns the configuration
//!   record and the mounted surface handle; [`embed::defaults`] holds the
//!   per-type option tables
//! - **Collaborator**: [`collaborator::Embedder`] / [`collaborator::SurfaceHandle`]
//!   abstract the embedding library; async requests run on tokio
//! - **Session**: [`session::Session`] serializes operator actions and feeds
//!   lifecycle callbacks back into the machine over crossbeam channels
//!
//! ## Example
//!
//! ```ignore
//! use embed_harness::{
//!     collaborator::LoggingEmbedder,
//!     config::HarnessConfig,
//!     session::{Session, UserAction},
//! };
//!
//! let config = HarnessConfig::load_or_default();
//! let runtime = tokio::runtime::Runtime::new()?;
//! let (events_tx, events_rx) = crossbeam_channel::unbounded();
//! let embedder = LoggingEmbedder::from_config(events_tx, &config.collaborator);
//!
//! let mut session = Session::new(embedder, events_rx, runtime.handle().clone(), &config.session);
//! session.dispatch(UserAction::Run);
//! ```

pub mod collaborator;
pub mod config;
pub mod embed;
pub mod error;
pub mod logging;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use collaborator::{Embedder, MountId, SurfaceEvent, SurfaceHandle};
pub use config::{HarnessConfig, SessionSettings};
pub use embed::{ConfigurationStateMachine, EmbedConfiguration, FieldEdit, SurfaceDescriptor};
pub use error::{HarnessError, Result};
pub use session::{Session, UserAction};
pub use types::{ConnectionFields, EmbedType, PageView, PaneFlag, ReportMode};
