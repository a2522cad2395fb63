//! Session settings applied when a configuration session starts
//!
//! These control the initial record of the state machine and how it resets,
//! separate from logging and collaborator configuration.
//!
//! # Reset behavior
//!
//! Selecting a report mode or page view resets the whole record, connection
//! fields included. Operators who keep the same credentials across
//! experiments can set `preserve_connection_on_option_change` to carry the
//! token type, access token and embed URL across that reset as well.

use crate::types::{ConnectionFields, EmbedType};
use serde::{Deserialize, Serialize};

/// Settings for a configuration session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SessionSettings {
    /// Embed type selected when the session starts
    #[serde(default)]
    pub initial_embed_type: EmbedType,

    /// Keep connection fields when a report mode or page view is selected
    #[serde(default)]
    pub preserve_connection_on_option_change: bool,

    /// Connection fields pre-filled into the first record
    #[serde(default)]
    pub seed: ConnectionFields,
}

impl SessionSettings {
    /// Override the initial embed type
    pub fn with_initial_embed_type(mut self, embed_type: EmbedType) -> Self {
        self.initial_embed_type = embed_type;
        self
    }
}
