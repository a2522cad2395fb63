//! Surface descriptors handed to the embedding collaborator
//!
//! A [`SurfaceDescriptor`] is the minimal field set needed to instantiate one
//! embed type / report mode combination. Each variant only carries the fields
//! that combination reads, so stale values left in the configuration record
//! for other types can never reach the collaborator.

use super::record::EmbedConfiguration;
use crate::types::{ConnectionFields, EmbedType, PageView, ReportMode};
use serde::Serialize;
use std::fmt;

/// Which kind of object the collaborator must mount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SurfaceKind {
    Report,
    Dashboard,
    Tile,
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceKind::Report => f.write_str("report"),
            SurfaceKind::Dashboard => f.write_str("dashboard"),
            SurfaceKind::Tile => f.write_str("tile"),
        }
    }
}

/// Pane visibility settings for a report opened in view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraSettings {
    pub filter_pane_enabled: bool,
    pub nav_content_pane_enabled: bool,
    pub hide_errors: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSurface {
    #[serde(flatten)]
    pub connection: ConnectionFields,
    pub embed_id: String,
    pub page_view: PageView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCreateSurface {
    #[serde(flatten)]
    pub connection: ConnectionFields,
    pub report_mode: ReportMode,
    pub dataset_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportViewSurface {
    #[serde(flatten)]
    pub connection: ConnectionFields,
    pub embed_id: String,
    pub dashboard_id: String,
    pub permissions: String,
    pub page_name: String,
    pub report_mode: ReportMode,
    pub dataset_id: String,
    pub extra_settings: ExtraSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSurface {
    #[serde(flatten)]
    pub connection: ConnectionFields,
    pub embed_id: String,
    pub dashboard_id: String,
}

/// What should be shown in the preview area
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "surface", rename_all = "camelCase")]
pub enum SurfaceDescriptor {
    /// Nothing is mounted; the preview shows usage instructions
    Placeholder,
    Dashboard(DashboardSurface),
    ReportCreate(ReportCreateSurface),
    ReportView(ReportViewSurface),
    Tile(TileSurface),
}

impl SurfaceDescriptor {
    /// Derive the descriptor for a configuration record.
    ///
    /// The match over (embed type, report mode) is exhaustive; adding a type
    /// or mode without a surface is a compile error.
    pub fn from_record(record: &EmbedConfiguration) -> Self {
        if !record.started {
            return SurfaceDescriptor::Placeholder;
        }

        let connection = record.connection.clone();
        match (record.embed_type, record.report_mode) {
            (EmbedType::Dashboard, _) => SurfaceDescriptor::Dashboard(DashboardSurface {
                connection,
                embed_id: record.embed_id.clone(),
                page_view: record.page_view,
            }),
            (EmbedType::Report, ReportMode::Create) => {
                SurfaceDescriptor::ReportCreate(ReportCreateSurface {
                    connection,
                    report_mode: ReportMode::Create,
                    dataset_id: record.dataset_id.clone(),
                })
            }
            (EmbedType::Report, ReportMode::View) => {
                SurfaceDescriptor::ReportView(ReportViewSurface {
                    connection,
                    embed_id: record.embed_id.clone(),
                    dashboard_id: record.dashboard_id.clone(),
                    permissions: record.permissions.clone(),
                    page_name: record.page_name.clone(),
                    report_mode: ReportMode::View,
                    dataset_id: record.dataset_id.clone(),
                    extra_settings: ExtraSettings {
                        filter_pane_enabled: record.filter_pane.is_enabled(),
                        nav_content_pane_enabled: record.nav_content_pane.is_enabled(),
                        hide_errors: false,
                    },
                })
            }
            (EmbedType::Tile, _) => SurfaceDescriptor::Tile(TileSurface {
                connection,
                embed_id: record.embed_id.clone(),
                dashboard_id: record.dashboard_id.clone(),
            }),
        }
    }

    /// Kind of object to mount, `None` for the placeholder
    pub fn kind(&self) -> Option<SurfaceKind> {
        match self {
            SurfaceDescriptor::Placeholder => None,
            SurfaceDescriptor::Dashboard(_) => Some(SurfaceKind::Dashboard),
            SurfaceDescriptor::ReportCreate(_) | SurfaceDescriptor::ReportView(_) => {
                Some(SurfaceKind::Report)
            }
            SurfaceDescriptor::Tile(_) => Some(SurfaceKind::Tile),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, SurfaceDescriptor::Placeholder)
    }
}

/// Instructions shown while nothing is mounted
pub const PLACEHOLDER_INSTRUCTIONS: &[&str] = &[
    "Fill in the connection details and identifiers",
    "Run to mount the surface",
    "Change the embed type or mode at any time to start over",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::defaults::defaults_for;
    use crate::types::PaneFlag;

    fn started(embed_type: EmbedType) -> EmbedConfiguration {
        let mut record = defaults_for(
            embed_type,
            &ConnectionFields::new("Embed", "tok", "https://embed"),
        );
        record.started = true;
        record
    }

    #[test]
    fn test_placeholder_until_started() {
        let mut record = started(EmbedType::Tile);
        record.started = false;
        record.embed_id = "e1".into();
        assert_eq!(
            SurfaceDescriptor::from_record(&record),
            SurfaceDescriptor::Placeholder
        );
    }

    #[test]
    fn test_report_view_extra_settings_from_panes() {
        let mut record = started(EmbedType::Report);
        record.nav_content_pane = PaneFlag::Disabled;
        record.filter_pane = PaneFlag::Unset;

        let SurfaceDescriptor::ReportView(surface) = SurfaceDescriptor::from_record(&record) else {
            panic!("expected a report view surface");
        };
        assert!(!surface.extra_settings.nav_content_pane_enabled);
        assert!(surface.extra_settings.filter_pane_enabled);
        assert!(!surface.extra_settings.hide_errors);
    }

    #[test]
    fn test_report_create_omits_embed_id() {
        let mut record = started(EmbedType::Report);
        record.report_mode = ReportMode::Create;
        record.embed_id = "stale".into();
        record.permissions = "All".into();
        record.dataset_id = "ds1".into();

        let descriptor = SurfaceDescriptor::from_record(&record);
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["surface"], "reportCreate");
        assert_eq!(json["reportMode"], "create");
        assert_eq!(json["datasetId"], "ds1");
        assert_eq!(json["accessToken"], "tok");
        assert!(json.get("embedId").is_none());
        assert!(json.get("permissions").is_none());
    }

    #[test]
    fn test_dashboard_ignores_report_mode() {
        let mut record = started(EmbedType::Dashboard);
        record.report_mode = ReportMode::Create;
        record.page_view = PageView::OneColumn;
        let descriptor = SurfaceDescriptor::from_record(&record);
        assert_eq!(descriptor.kind(), Some(SurfaceKind::Dashboard));
        let SurfaceDescriptor::Dashboard(surface) = descriptor else {
            panic!("expected a dashboard surface");
        };
        assert_eq!(surface.page_view, PageView::OneColumn);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(SurfaceDescriptor::Placeholder.kind(), None);
        assert_eq!(
            SurfaceDescriptor::from_record(&started(EmbedType::Report)).kind(),
            Some(SurfaceKind::Report)
        );
        assert_eq!(
            SurfaceDescriptor::from_record(&started(EmbedType::Tile)).kind(),
            Some(SurfaceKind::Tile)
        );
    }
}
