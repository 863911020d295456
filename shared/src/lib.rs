//! Platform-independent view models for the OIMS admin console.
//!
//! Everything in here is plain data plus the small amount of client-side
//! logic the console needs (notification bookkeeping, pagination windows,
//! report analytics reshaping, form validation). It compiles for both the
//! browser and the host so it can be tested natively.

pub mod analytics;
pub mod format;
pub mod labels;
pub mod models;
pub mod notification;
pub mod pagination;
pub mod roles;
pub mod stats;
pub mod validation;

pub use analytics::{
    ChartKind, ChartPanel, ChartPoint, ChartSeries, DataSource, ReportAnalytics, ReportDto,
    ReportFormat, ReportType, SummaryStat, SummaryValue,
};
pub use models::branch::{Branch, BranchForm, BranchRequest};
pub use models::centre::{
    CentreForm, CentreRegistrationRequest, CentreRegistrationResponse, CertificateUpload,
    OrphanageCentre, RegistrationOutcome,
};
pub use models::fundraiser::{CampaignStatus, FundraiserCampaign, FundraiserForm, FundraiserRequest};
pub use models::inventory::{InventoryForm, InventoryItem, InventoryItemRequest, StockStatus};
pub use models::staff::{StaffForm, StaffMember, StaffRequest};
pub use models::{remove_by_id, upsert_by_id, FormInput, Identified};
pub use notification::{Notification, NotificationInbox, NotificationType};
pub use pagination::PaginationWindow;
pub use roles::{Role, Section, Session};
pub use stats::DashboardStats;
pub use validation::{FieldErrors, ValidationError};

/// Generic acknowledgement body returned by mutation endpoints.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApiMessage {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}
