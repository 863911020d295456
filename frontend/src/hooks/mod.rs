pub mod use_dashboard_stats;
pub mod use_notifications;
pub mod use_periodic_refresh;
pub mod use_records;
pub mod use_report_analytics;
pub mod use_toasts;
