//! The embed configuration record and the field edits that mutate it

use crate::types::{ConnectionFields, EmbedType, PageView, PaneFlag, ReportMode};
use serde::{Deserialize, Serialize};

/// Single source of truth for what the operator has configured
///
/// Fields that do not apply to the active embed type may hold stale values;
/// surface selection never reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedConfiguration {
    pub embed_type: EmbedType,

    #[serde(flatten)]
    pub connection: ConnectionFields,

    pub embed_id: String,
    pub dashboard_id: String,
    pub dataset_id: String,

    /// Report only
    pub report_mode: ReportMode,

    /// Dashboard only
    pub page_view: PageView,

    /// Report + view only
    pub page_name: String,
    pub permissions: String,
    pub nav_content_pane: PaneFlag,
    pub filter_pane: PaneFlag,

    pub visual_header_flag: bool,

    /// Run gate; nothing is rendered until this is set
    pub started: bool,
}

/// Names of the editable scalar fields, as used by the configuration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    TokenType,
    AccessToken,
    EmbedUrl,
    EmbedId,
    DashboardId,
    DatasetId,
    PageName,
    Permissions,
    NavContentPane,
    FilterPane,
}

impl FieldName {
    pub const ALL: [FieldName; 10] = [
        FieldName::TokenType,
        FieldName::AccessToken,
        FieldName::EmbedUrl,
        FieldName::EmbedId,
        FieldName::DashboardId,
        FieldName::DatasetId,
        FieldName::PageName,
        FieldName::Permissions,
        FieldName::NavContentPane,
        FieldName::FilterPane,
    ];

    /// Form input name
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::TokenType => "tokenType",
            FieldName::AccessToken => "accessToken",
            FieldName::EmbedUrl => "embedUrl",
            FieldName::EmbedId => "embedId",
            FieldName::DashboardId => "dashboardId",
            FieldName::DatasetId => "datasetId",
            FieldName::PageName => "pageName",
            FieldName::Permissions => "permissions",
            FieldName::NavContentPane => "navContentPaneEnabled",
            FieldName::FilterPane => "filterPaneEnabled",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name.trim())
    }

    /// Whether the form shows this field for the given type and report mode
    pub fn applies_to(&self, embed_type: EmbedType, report_mode: ReportMode) -> bool {
        let report_view = embed_type == EmbedType::Report && report_mode == ReportMode::View;
        match self {
            FieldName::TokenType | FieldName::AccessToken | FieldName::EmbedUrl => true,
            FieldName::EmbedId => match embed_type {
                EmbedType::Dashboard | EmbedType::Tile => true,
                EmbedType::Report => report_view,
            },
            FieldName::DashboardId => embed_type == EmbedType::Tile || report_view,
            FieldName::DatasetId => embed_type == EmbedType::Report,
            FieldName::PageName
            | FieldName::Permissions
            | FieldName::NavContentPane
            | FieldName::FilterPane => report_view,
        }
    }
}

/// A single scalar field assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    TokenType(String),
    AccessToken(String),
    EmbedUrl(String),
    EmbedId(String),
    DashboardId(String),
    DatasetId(String),
    PageName(String),
    Permissions(String),
    NavContentPane(PaneFlag),
    FilterPane(PaneFlag),
}

impl FieldEdit {
    /// Build an edit from a form field name and its raw value.
    ///
    /// Returns `None` for unknown names and for pane values that are not a
    /// recognised radio value.
    pub fn parse(name: &str, value: &str) -> Option<Self> {
        let field = FieldName::parse(name)?;
        let text = value.to_string();
        Some(match field {
            FieldName::TokenType => FieldEdit::TokenType(text),
            FieldName::AccessToken => FieldEdit::AccessToken(text),
            FieldName::EmbedUrl => FieldEdit::EmbedUrl(text),
            FieldName::EmbedId => FieldEdit::EmbedId(text),
            FieldName::DashboardId => FieldEdit::DashboardId(text),
            FieldName::DatasetId => FieldEdit::DatasetId(text),
            FieldName::PageName => FieldEdit::PageName(text),
            FieldName::Permissions => FieldEdit::Permissions(text),
            FieldName::NavContentPane => FieldEdit::NavContentPane(PaneFlag::parse(value)?),
            FieldName::FilterPane => FieldEdit::FilterPane(PaneFlag::parse(value)?),
        })
    }

    pub fn field(&self) -> FieldName {
        match self {
            FieldEdit::TokenType(_) => FieldName::TokenType,
            FieldEdit::AccessToken(_) => FieldName::AccessToken,
            FieldEdit::EmbedUrl(_) => FieldName::EmbedUrl,
            FieldEdit::EmbedId(_) => FieldName::EmbedId,
            FieldEdit::DashboardId(_) => FieldName::DashboardId,
            FieldEdit::DatasetId(_) => FieldName::DatasetId,
            FieldEdit::PageName(_) => FieldName::PageName,
            FieldEdit::Permissions(_) => FieldName::Permissions,
            FieldEdit::NavContentPane(_) => FieldName::NavContentPane,
            FieldEdit::FilterPane(_) => FieldName::FilterPane,
        }
    }

    /// Write the value into the record, without any applicability check
    pub(crate) fn apply_to(self, record: &mut EmbedConfiguration) {
        match self {
            FieldEdit::TokenType(v) => record.connection.token_type = v,
            FieldEdit::AccessToken(v) => record.connection.access_token = v,
            FieldEdit::EmbedUrl(v) => record.connection.embed_url = v,
            FieldEdit::EmbedId(v) => record.embed_id = v,
            FieldEdit::DashboardId(v) => record.dashboard_id = v,
            FieldEdit::DatasetId(v) => record.dataset_id = v,
            FieldEdit::PageName(v) => record.page_name = v,
            FieldEdit::Permissions(v) => record.permissions = v,
            FieldEdit::NavContentPane(flag) => record.nav_content_pane = flag,
            FieldEdit::FilterPane(flag) => record.filter_pane = flag,
        }
    }
}

/// A dropdown selection that resets the type-specific fields before applying
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryOption {
    ReportMode(ReportMode),
    PageView(PageView),
}
