//! Core value types for the embed harness
//!
//! This module contains the small enumerations and records shared by the
//! configuration state machine, the surface descriptors and the operator
//! command layer.
//!
//! # Main Types
//!
//! - [`EmbedType`] - Which surface is being configured (report, dashboard, tile)
//! - [`ReportMode`] - Whether a report is opened for viewing or created from a dataset
//! - [`PageView`] - Dashboard page layout strategy
//! - [`PaneFlag`] - Tri-state pane visibility (unset, enabled, disabled)
//! - [`ConnectionFields`] - Token type, access token and embed URL shared by every surface
//!
//! All enums serialize to the camel-case strings the embedding service expects
//! (`"report"`, `"fitToWidth"`, ...), which are also what the operator types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of embeddable surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum EmbedType {
    /// Full report
    #[default]
    Report,
    /// Dashboard made of pinned tiles
    Dashboard,
    /// A single dashboard tile
    Tile,
}

impl EmbedType {
    /// All embed types in dropdown order
    pub const ALL: [EmbedType; 3] = [EmbedType::Report, EmbedType::Dashboard, EmbedType::Tile];

    /// Wire/operator name of this embed type
    pub fn as_str(&self) -> &'static str {
        match self {
            EmbedType::Report => "report",
            EmbedType::Dashboard => "dashboard",
            EmbedType::Tile => "tile",
        }
    }

    /// Parse an operator-supplied name (case-insensitive)
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for EmbedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a report is embedded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ReportMode {
    /// Open an existing report
    #[default]
    View,
    /// Author a new report on top of a dataset
    Create,
}

impl ReportMode {
    pub const ALL: [ReportMode; 2] = [ReportMode::View, ReportMode::Create];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportMode::View => "view",
            ReportMode::Create => "create",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for ReportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dashboard page layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PageView {
    /// Scale tiles to the container width
    #[default]
    FitToWidth,
    /// Stack tiles in a single column
    OneColumn,
    /// Render tiles at their authored size
    ActualSize,
    /// Fit the whole dashboard in the container
    FullFit,
}

impl PageView {
    pub const ALL: [PageView; 4] = [
        PageView::FitToWidth,
        PageView::OneColumn,
        PageView::ActualSize,
        PageView::FullFit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageView::FitToWidth => "fitToWidth",
            PageView::OneColumn => "oneColumn",
            PageView::ActualSize => "actualSize",
            PageView::FullFit => "fullFit",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for PageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tri-state pane visibility setting
///
/// `Unset` means the operator never picked a radio button. It is kept distinct
/// from `Enabled` so the form can show neither option as checked, but both
/// resolve to an enabled pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PaneFlag {
    #[default]
    Unset,
    Enabled,
    Disabled,
}

impl PaneFlag {
    /// Resolve to the boolean handed to the embedding service
    pub fn is_enabled(&self) -> bool {
        !matches!(self, PaneFlag::Disabled)
    }

    /// Parse a radio value.
    ///
    /// Accepts the prefixed form values (`nav-true`, `filter-false`, ...) as
    /// well as bare `true`/`false`. An empty string clears the flag.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let bare = value.rsplit('-').next().unwrap_or(value);
        match bare.to_ascii_lowercase().as_str() {
            "" | "unset" => Some(PaneFlag::Unset),
            "true" | "on" => Some(PaneFlag::Enabled),
            "false" | "off" => Some(PaneFlag::Disabled),
            _ => None,
        }
    }
}

/// Connection fields shared by every embed type
///
/// These are the operator's credentials and target URL. They are opaque to
/// the harness and survive embed type changes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionFields {
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub embed_url: String,
}

impl ConnectionFields {
    pub fn new(
        token_type: impl Into<String>,
        access_token: impl Into<String>,
        embed_url: impl Into<String>,
    ) -> Self {
        Self {
            token_type: token_type.into(),
            access_token: access_token.into(),
            embed_url: embed_url.into(),
        }
    }

    /// Names of connection fields that are still blank
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.token_type.trim().is_empty() {
            missing.push("tokenType");
        }
        if self.access_token.trim().is_empty() {
            missing.push("accessToken");
        }
        if self.embed_url.trim().is_empty() {
            missing.push("embedUrl");
        }
        missing
    }

    /// Check if every connection field is filled in
    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_type_parse() {
        assert_eq!(EmbedType::parse("dashboard"), Some(EmbedType::Dashboard));
        assert_eq!(EmbedType::parse(" Tile "), Some(EmbedType::Tile));
        assert_eq!(EmbedType::parse("paginated"), None);
    }

    #[test]
    fn test_page_view_wire_names() {
        assert_eq!(PageView::FullFit.as_str(), "fullFit");
        assert_eq!(PageView::parse("fittowidth"), Some(PageView::FitToWidth));
        assert_eq!(
            serde_json::to_string(&PageView::OneColumn).unwrap(),
            "\"oneColumn\""
        );
    }

    #[test]
    fn test_report_mode_default_is_view() {
        assert_eq!(ReportMode::default(), ReportMode::View);
        assert_eq!(ReportMode::parse("CREATE"), Some(ReportMode::Create));
    }

    #[test]
    fn test_pane_flag_parse_form_values() {
        assert_eq!(PaneFlag::parse("nav-true"), Some(PaneFlag::Enabled));
        assert_eq!(PaneFlag::parse("nav-false"), Some(PaneFlag::Disabled));
        assert_eq!(PaneFlag::parse("filter-true"), Some(PaneFlag::Enabled));
        assert_eq!(PaneFlag::parse("false"), Some(PaneFlag::Disabled));
        assert_eq!(PaneFlag::parse(""), Some(PaneFlag::Unset));
        assert_eq!(PaneFlag::parse("maybe"), None);
    }

    #[test]
    fn test_pane_flag_unset_resolves_enabled() {
        assert!(PaneFlag::Unset.is_enabled());
        assert!(PaneFlag::Enabled.is_enabled());
        assert!(!PaneFlag::Disabled.is_enabled());
    }

    #[test]
    fn test_connection_missing_fields() {
        let conn = ConnectionFields::new("Embed", "", " ");
        assert_eq!(conn.missing(), vec!["accessToken", "embedUrl"]);
        assert!(!conn.is_complete());
        assert!(ConnectionFields::new("Aad", "tok", "https://x").is_complete());
    }
}
