//! REST client for the OIMS backend.
//!
//! Every request carries `Authorization: Bearer <token>` read from local
//! storage at send time. There is no retry and no timeout beyond the
//! browser's own; failures are returned to the caller as [`ApiError`].

use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    ApiMessage, Branch, BranchRequest, CentreRegistrationRequest, CentreRegistrationResponse,
    CertificateUpload, DashboardStats, FundraiserCampaign, FundraiserRequest, InventoryItem,
    InventoryItemRequest, Notification, OrphanageCentre, ReportDto, ReportFormat, ReportType,
    StaffMember, StaffRequest,
};
use web_sys::FormData;

use crate::services::config::ConsoleConfig;
use crate::services::session::SessionStore;

const API_ROOT: &str = "/app/oims";

/// Percent-encode an id or query value
fn encode(value: &str) -> String {
    String::from(js_sys::encode_uri_component(value))
}

/// Append the caller's branch scope, if any, as `?branchId=`
fn scoped(path: &str, branch_id: Option<&str>) -> String {
    match branch_id {
        Some(branch) => format!("{}?branchId={}", path, encode(branch)),
        None => path.to_string(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not signed in")]
    Unauthorized,

    #[error("server returned {status}: {message}")]
    Http { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] gloo::net::Error),

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized | ApiError::Http { status: 401, .. })
    }
}

/// API client for the OIMS backend
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ConsoleConfig) -> Self {
        Self::new(config.api_url.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_ROOT, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let token = SessionStore::token().ok_or(ApiError::Unauthorized)?;
        Ok(builder
            .header("Authorization", &format!("Bearer {}", token))
            .header("Accept", "application/json"))
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        if response.ok() {
            return Ok(response);
        }
        let status = response.status();
        if status == 401 {
            return Err(ApiError::Unauthorized);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiMessage>(&body)
            .ok()
            .map(|m| m.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                if body.is_empty() {
                    response.status_text()
                } else {
                    body
                }
            });
        Err(ApiError::Http { status, message })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::check(response).await?;
        response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.authorized(Request::get(&self.url(path)))?.send().await?;
        Self::decode(response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .authorized(Request::post(&self.url(path)))?
            .json(body)?
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn patch_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .authorized(Request::patch(&self.url(path)))?
            .json(body)?
            .send()
            .await?;
        Self::decode(response).await
    }

    /// PATCH with no body, ignoring whatever the server answers with
    pub async fn patch_empty(&self, path: &str) -> Result<(), ApiError> {
        let response = self.authorized(Request::patch(&self.url(path)))?.send().await?;
        Self::check(response).await.map(|_| ())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.authorized(Request::delete(&self.url(path)))?.send().await?;
        Self::check(response).await.map(|_| ())
    }

    /// Multipart POST; the browser sets the boundary header itself
    pub async fn post_form<T: DeserializeOwned>(&self, path: &str, form: FormData) -> Result<T, ApiError> {
        let response = self
            .authorized(Request::post(&self.url(path)))?
            .body(form)?
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn get_text(&self, path: &str) -> Result<String, ApiError> {
        let response = self.authorized(Request::get(&self.url(path)))?.send().await?;
        let response = Self::check(response).await?;
        Ok(response.text().await?)
    }

    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.authorized(Request::get(&self.url(path)))?.send().await?;
        let response = Self::check(response).await?;
        Ok(response.binary().await?)
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    /// Notifications visible to the caller, narrowed to `branch_id` for supervisors
    pub async fn get_notifications(&self, branch_id: Option<&str>) -> Result<Vec<Notification>, ApiError> {
        self.get_json(&scoped("/orphanages/notifications", branch_id)).await
    }

    pub async fn mark_notification_read(&self, public_id: &str) -> Result<(), ApiError> {
        self.patch_empty(&format!("/orphanages/notifications/read/{}?isRead=true", encode(public_id)))
            .await
    }

    pub async fn mark_all_notifications_read(&self) -> Result<(), ApiError> {
        self.patch_empty("/orphanages/notifications/read/all-current").await
    }

    // ------------------------------------------------------------------
    // Staff
    // ------------------------------------------------------------------

    pub async fn get_staff(&self) -> Result<Vec<StaffMember>, ApiError> {
        self.get_json("/admins").await
    }

    pub async fn create_staff(&self, request: &StaffRequest) -> Result<StaffMember, ApiError> {
        self.post_json("/admins", request).await
    }

    pub async fn update_staff(&self, public_id: &str, request: &StaffRequest) -> Result<StaffMember, ApiError> {
        self.patch_json(&format!("/admins/{}", encode(public_id)), request).await
    }

    /// Suspend or reinstate an account; the backend speaks in terms of `enabled`
    pub async fn set_staff_suspended(&self, public_id: &str, suspended: bool) -> Result<(), ApiError> {
        self.patch_empty(&format!("/admins/{}/status?enabled={}", encode(public_id), !suspended))
            .await
    }

    pub async fn delete_staff(&self, public_id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/admins/{}", encode(public_id))).await
    }

    // ------------------------------------------------------------------
    // Branches
    // ------------------------------------------------------------------

    pub async fn get_branches(&self) -> Result<Vec<Branch>, ApiError> {
        self.get_json("/orphanages/branches").await
    }

    pub async fn create_branch(&self, request: &BranchRequest) -> Result<Branch, ApiError> {
        self.post_json("/orphanages/branches", request).await
    }

    pub async fn update_branch(&self, public_id: &str, request: &BranchRequest) -> Result<Branch, ApiError> {
        self.patch_json(&format!("/orphanages/branches/{}", encode(public_id)), request)
            .await
    }

    pub async fn delete_branch(&self, public_id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/orphanages/branches/{}", encode(public_id))).await
    }

    // ------------------------------------------------------------------
    // Inventory
    // ------------------------------------------------------------------

    pub async fn get_inventory(&self, branch_id: Option<&str>) -> Result<Vec<InventoryItem>, ApiError> {
        self.get_json(&scoped("/inventory/items", branch_id)).await
    }

    pub async fn create_inventory_item(&self, request: &InventoryItemRequest) -> Result<InventoryItem, ApiError> {
        self.post_json("/inventory/items", request).await
    }

    pub async fn update_inventory_item(
        &self,
        public_id: &str,
        request: &InventoryItemRequest,
    ) -> Result<InventoryItem, ApiError> {
        self.patch_json(&format!("/inventory/items/{}", encode(public_id)), request)
            .await
    }

    pub async fn delete_inventory_item(&self, public_id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/inventory/items/{}", encode(public_id))).await
    }

    // ------------------------------------------------------------------
    // Fundraisers
    // ------------------------------------------------------------------

    pub async fn get_fundraisers(&self) -> Result<Vec<FundraiserCampaign>, ApiError> {
        self.get_json("/fundraisers").await
    }

    pub async fn create_fundraiser(&self, request: &FundraiserRequest) -> Result<FundraiserCampaign, ApiError> {
        self.post_json("/fundraisers", request).await
    }

    pub async fn update_fundraiser(
        &self,
        public_id: &str,
        request: &FundraiserRequest,
    ) -> Result<FundraiserCampaign, ApiError> {
        self.patch_json(&format!("/fundraisers/{}", encode(public_id)), request).await
    }

    pub async fn delete_fundraiser(&self, public_id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/fundraisers/{}", encode(public_id))).await
    }

    // ------------------------------------------------------------------
    // Centres
    // ------------------------------------------------------------------

    pub async fn get_centres(&self) -> Result<Vec<OrphanageCentre>, ApiError> {
        self.get_json("/orphanages/centres").await
    }

    pub async fn register_centre(
        &self,
        request: &CentreRegistrationRequest,
    ) -> Result<CentreRegistrationResponse, ApiError> {
        self.post_json("/orphanages/centres", request).await
    }

    pub async fn upload_certificate(&self, centre_id: &str, form: FormData) -> Result<ApiMessage, ApiError> {
        self.post_form(&format!("/orphanages/centres/{}/certificate", encode(centre_id)), form)
            .await
    }

    pub async fn upload_certificate_base64(
        &self,
        centre_id: &str,
        upload: &CertificateUpload,
    ) -> Result<ApiMessage, ApiError> {
        self.post_json(&format!("/orphanages/centres/{}/certificate/base64", encode(centre_id)), upload)
            .await
    }

    // ------------------------------------------------------------------
    // Reports & stats
    // ------------------------------------------------------------------

    pub async fn get_report_analytics(&self, report_type: ReportType) -> Result<ReportDto, ApiError> {
        let body = self
            .get_text(&format!("/reports/{}/analytics", report_type.path_segment()))
            .await?;
        ReportDto::from_json(report_type, &body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn export_report(&self, report_type: ReportType, format: ReportFormat) -> Result<Vec<u8>, ApiError> {
        self.get_bytes(&format!(
            "/reports/{}?format={}",
            report_type.path_segment(),
            format.query_value()
        ))
        .await
    }

    pub async fn get_dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.get_json("/dashboard/stats").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_url_joins_api_root() {
        let client = ApiClient::new("https://oims.example.org/");
        assert_eq!(
            client.url("/orphanages/notifications"),
            "https://oims.example.org/app/oims/orphanages/notifications"
        );
    }

    #[wasm_bindgen_test]
    fn test_branch_scope_query() {
        assert_eq!(scoped("/orphanages/notifications", None), "/orphanages/notifications");
        assert_eq!(
            scoped("/orphanages/notifications", Some("br-7")),
            "/orphanages/notifications?branchId=br-7"
        );
        assert_eq!(scoped("/inventory/items", Some("br 1/2")), "/inventory/items?branchId=br%201%2F2");
    }

    #[wasm_bindgen_test]
    fn test_ids_are_percent_encoded() {
        assert_eq!(encode("c-42"), "c-42");
        assert_eq!(encode("a/b?c=d"), "a%2Fb%3Fc%3Dd");
        assert_eq!(encode("x#1"), "x%231");
    }

    #[wasm_bindgen_test]
    fn test_unauthorized_classification() {
        assert!(ApiError::Unauthorized.is_unauthorized());
        assert!(ApiError::Http { status: 401, message: String::new() }.is_unauthorized());
        assert!(!ApiError::Http { status: 500, message: String::new() }.is_unauthorized());
    }
}
