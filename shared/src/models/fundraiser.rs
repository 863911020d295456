use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{FormInput, Identified};
use crate::format::progress_percent;
use crate::validation::{self, FieldErrors, ValidationError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CampaignStatus {
    #[default]
    Pending,
    Active,
    Completed,
    Cancelled,
    Other(String),
}

impl CampaignStatus {
    pub fn as_key(&self) -> &str {
        match self {
            CampaignStatus::Pending => "PENDING",
            CampaignStatus::Active => "ACTIVE",
            CampaignStatus::Completed => "COMPLETED",
            CampaignStatus::Cancelled => "CANCELLED",
            CampaignStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for CampaignStatus {
    fn from(raw: String) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "PENDING" | "DRAFT" => CampaignStatus::Pending,
            "ACTIVE" | "ONGOING" => CampaignStatus::Active,
            "COMPLETED" | "CLOSED" => CampaignStatus::Completed,
            "CANCELLED" | "CANCELED" => CampaignStatus::Cancelled,
            _ => CampaignStatus::Other(raw),
        }
    }
}

impl From<CampaignStatus> for String {
    fn from(status: CampaignStatus) -> Self {
        match status {
            CampaignStatus::Other(raw) => raw,
            known => known.as_key().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundraiserCampaign {
    pub public_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub goal_amount: f64,
    #[serde(default)]
    pub raised_amount: f64,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: CampaignStatus,
}

impl FundraiserCampaign {
    pub fn progress_percent(&self) -> f64 {
        progress_percent(self.raised_amount, self.goal_amount)
    }

    pub fn is_active(&self) -> bool {
        self.status == CampaignStatus::Active
    }

    pub fn apply(&mut self, request: &FundraiserRequest) {
        self.title = request.title.clone();
        self.description = request.description.clone();
        self.goal_amount = request.goal_amount;
        self.start_date = Some(request.start_date);
        self.end_date = Some(request.end_date);
    }
}

impl Identified for FundraiserCampaign {
    fn public_id(&self) -> &str {
        &self.public_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundraiserRequest {
    pub title: String,
    pub description: String,
    pub goal_amount: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FundraiserForm {
    pub title: String,
    pub description: String,
    pub goal_amount: String,
    pub start_date: String,
    pub end_date: String,
}

impl FundraiserForm {
    pub fn from_campaign(campaign: &FundraiserCampaign) -> Self {
        let date = |d: Option<NaiveDate>| d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
        Self {
            title: campaign.title.clone(),
            description: campaign.description.clone(),
            goal_amount: format!("{:.2}", campaign.goal_amount),
            start_date: date(campaign.start_date),
            end_date: date(campaign.end_date),
        }
    }
}

impl FormInput for FundraiserForm {
    type Request = FundraiserRequest;

    fn validate(&self) -> Result<FundraiserRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        let title = errors.check("title", validation::required("Title", &self.title));
        let description = errors.check("description", validation::required("Description", &self.description));
        let goal_amount = errors.check("goal_amount", validation::positive_amount("Goal amount", &self.goal_amount));
        let start_date = errors.check("start_date", validation::date("Start date", &self.start_date));
        let end_date = errors.check("end_date", validation::date("End date", &self.end_date));

        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end <= start {
                errors.add("end_date", ValidationError::EndBeforeStart);
            }
        }

        match (title, description, goal_amount, start_date, end_date) {
            (Some(title), Some(description), Some(goal_amount), Some(start_date), Some(end_date))
                if errors.is_empty() =>
            {
                Ok(FundraiserRequest {
                    title,
                    description,
                    goal_amount,
                    start_date,
                    end_date,
                })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_from_backend() {
        let campaign: FundraiserCampaign = serde_json::from_str(
            r#"{"publicId":"f-1","title":"School books","goalAmount":2000,"raisedAmount":500,
                "startDate":"2025-01-01","endDate":"2025-06-30","status":"ACTIVE"}"#,
        )
        .unwrap();
        assert!(campaign.is_active());
        assert_eq!(campaign.progress_percent(), 25.0);
        assert_eq!(campaign.end_date, NaiveDate::from_ymd_opt(2025, 6, 30));
    }

    #[test]
    fn test_unknown_status_round_trips() {
        let status: CampaignStatus = serde_json::from_str(r#""PAUSED""#).unwrap();
        assert_eq!(status, CampaignStatus::Other("PAUSED".into()));
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""PAUSED""#);
    }

    #[test]
    fn test_overfunded_progress_caps_at_100() {
        let campaign: FundraiserCampaign =
            serde_json::from_str(r#"{"publicId":"f-2","goalAmount":100,"raisedAmount":180}"#).unwrap();
        assert_eq!(campaign.progress_percent(), 100.0);
        assert_eq!(campaign.status, CampaignStatus::Pending);
    }

    #[test]
    fn test_form_rejects_end_before_start() {
        let form = FundraiserForm {
            title: "Winter coats".into(),
            description: "Warm clothing".into(),
            goal_amount: "500".into(),
            start_date: "2025-05-01".into(),
            end_date: "2025-04-01".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("end_date").as_deref(), Some("End date must be after the start date"));
    }

    #[test]
    fn test_form_serializes_iso_dates() {
        let request = FundraiserForm {
            title: "Clinic".into(),
            description: "Medical supplies".into(),
            goal_amount: "1200".into(),
            start_date: "2025-05-01".into(),
            end_date: "2025-08-01".into(),
        }
        .validate()
        .unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["startDate"], "2025-05-01");
        assert_eq!(body["goalAmount"], 1200.0);
    }
}
