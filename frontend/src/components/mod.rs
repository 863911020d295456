pub mod analytics_chart;
pub mod form_field;
pub mod header;
pub mod modal;
pub mod notification_list;
pub mod pagination;
pub mod sidebar;
pub mod stat_card;
pub mod toast;
