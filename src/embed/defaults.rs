//! Static per-type option tables and default records

use super::record::{EmbedConfiguration, SecondaryOption};
use crate::types::{ConnectionFields, EmbedType, PageView, PaneFlag, ReportMode};

/// Dropdown options offered for one embed type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedOptions {
    /// Selectable report modes (empty when the type has no mode dropdown)
    pub modes: &'static [ReportMode],
    /// Selectable page views (empty when the type has no page view dropdown)
    pub page_views: &'static [PageView],
}

impl EmbedOptions {
    /// Check if a secondary option is offered by this table
    pub fn offers(&self, option: SecondaryOption) -> bool {
        match option {
            SecondaryOption::ReportMode(mode) => self.modes.contains(&mode),
            SecondaryOption::PageView(view) => self.page_views.contains(&view),
        }
    }
}

const REPORT_OPTIONS: EmbedOptions = EmbedOptions {
    modes: &ReportMode::ALL,
    page_views: &[],
};

const DASHBOARD_OPTIONS: EmbedOptions = EmbedOptions {
    modes: &[],
    page_views: &PageView::ALL,
};

const TILE_OPTIONS: EmbedOptions = EmbedOptions {
    modes: &[],
    page_views: &[],
};

/// Options table for an embed type
pub fn options_for(embed_type: EmbedType) -> EmbedOptions {
    match embed_type {
        EmbedType::Report => REPORT_OPTIONS,
        EmbedType::Dashboard => DASHBOARD_OPTIONS,
        EmbedType::Tile => TILE_OPTIONS,
    }
}

/// Fresh record for an embed type, keeping the connection fields from `seed`
pub fn defaults_for(embed_type: EmbedType, seed: &ConnectionFields) -> EmbedConfiguration {
    EmbedConfiguration {
        embed_type,
        connection: seed.clone(),
        embed_id: String::new(),
        dashboard_id: String::new(),
        dataset_id: String::new(),
        report_mode: ReportMode::View,
        page_view: PageView::FitToWidth,
        page_name: String::new(),
        permissions: String::new(),
        nav_content_pane: PaneFlag::Unset,
        filter_pane: PaneFlag::Unset,
        visual_header_flag: true,
        started: false,
    }
}
