use serde::Deserialize;

use crate::format::percentage;
use crate::models::fundraiser::FundraiserCampaign;
use crate::models::inventory::{InventoryItem, StockStatus};

/// Summary cards on the overview tab. Missing fields decode as zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_centres: u64,
    pub total_branches: u64,
    pub total_staff: u64,
    pub total_orphans: u64,
    pub inventory_items: u64,
    pub low_stock_items: u64,
    pub active_campaigns: u64,
    pub total_raised: f64,
    pub total_goal: f64,
    pub unread_notifications: u64,
}

impl DashboardStats {
    pub fn fundraising_percent(&self) -> f64 {
        percentage(self.total_raised, self.total_goal)
    }

    /// Overlay inventory counts computed from an already loaded item list
    pub fn with_inventory(mut self, items: &[InventoryItem]) -> Self {
        self.inventory_items = items.len() as u64;
        self.low_stock_items = items
            .iter()
            .filter(|i| i.stock_status() != StockStatus::InStock)
            .count() as u64;
        self
    }

    /// Overlay fundraising totals computed from an already loaded campaign list
    pub fn with_campaigns(mut self, campaigns: &[FundraiserCampaign]) -> Self {
        self.active_campaigns = campaigns.iter().filter(|c| c.is_active()).count() as u64;
        self.total_raised = campaigns.iter().map(|c| c.raised_amount).sum();
        self.total_goal = campaigns.iter().map(|c| c.goal_amount).sum();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_payload_defaults_to_zero() {
        let stats: DashboardStats = serde_json::from_str(r#"{"totalStaff": 12}"#).unwrap();
        assert_eq!(stats.total_staff, 12);
        assert_eq!(stats.total_branches, 0);
        assert_eq!(stats.fundraising_percent(), 0.0);
    }

    #[test]
    fn test_overlay_from_lists() {
        let items: Vec<InventoryItem> = serde_json::from_str(
            r#"[{"publicId":"a","quantity":0},{"publicId":"b","quantity":50,"minThreshold":5},{"publicId":"c","quantity":2,"minThreshold":5}]"#,
        )
        .unwrap();
        let campaigns: Vec<FundraiserCampaign> = serde_json::from_str(
            r#"[{"publicId":"f","goalAmount":400,"raisedAmount":100,"status":"ACTIVE"},{"publicId":"g","goalAmount":100,"raisedAmount":100,"status":"COMPLETED"}]"#,
        )
        .unwrap();
        let stats = DashboardStats::default().with_inventory(&items).with_campaigns(&campaigns);
        assert_eq!(stats.inventory_items, 3);
        assert_eq!(stats.low_stock_items, 2);
        assert_eq!(stats.active_campaigns, 1);
        assert_eq!(stats.fundraising_percent(), 40.0);
    }
}
