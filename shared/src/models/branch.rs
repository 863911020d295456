use serde::{Deserialize, Serialize};

use super::{default_enabled, FormInput, Identified};
use crate::validation::{self, FieldErrors};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BranchDto {
    public_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    capacity: u32,
    #[serde(default)]
    current_occupancy: u32,
    #[serde(default)]
    supervisor_name: Option<String>,
    #[serde(default = "default_enabled")]
    enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "BranchDto")]
pub struct Branch {
    pub public_id: String,
    pub name: String,
    pub location: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub capacity: u32,
    pub occupancy: u32,
    pub supervisor_name: Option<String>,
    pub suspended: bool,
}

impl From<BranchDto> for Branch {
    fn from(dto: BranchDto) -> Self {
        Self {
            public_id: dto.public_id,
            name: dto.name,
            location: dto.location,
            phone: dto.phone_number,
            email: dto.email,
            capacity: dto.capacity,
            occupancy: dto.current_occupancy,
            supervisor_name: dto.supervisor_name,
            suspended: !dto.enabled,
        }
    }
}

impl Branch {
    /// Occupied share of capacity, 0-100
    pub fn occupancy_percent(&self) -> f64 {
        crate::format::progress_percent(self.occupancy as f64, self.capacity as f64)
    }

    pub fn apply(&mut self, request: &BranchRequest) {
        self.name = request.name.clone();
        self.location = request.location.clone();
        self.phone = request.phone_number.clone();
        self.email = request.email.clone();
        self.capacity = request.capacity;
    }
}

impl Identified for Branch {
    fn public_id(&self) -> &str {
        &self.public_id
    }
}

/// Body for `POST /orphanages/branches` and `PATCH /orphanages/branches/{id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchRequest {
    pub name: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub capacity: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BranchForm {
    pub name: String,
    pub location: String,
    pub phone: String,
    pub email: String,
    pub capacity: String,
}

impl BranchForm {
    pub fn from_branch(branch: &Branch) -> Self {
        Self {
            name: branch.name.clone(),
            location: branch.location.clone(),
            phone: branch.phone.clone().unwrap_or_default(),
            email: branch.email.clone().unwrap_or_default(),
            capacity: branch.capacity.to_string(),
        }
    }
}

impl FormInput for BranchForm {
    type Request = BranchRequest;

    fn validate(&self) -> Result<BranchRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = errors.check("name", validation::required("Branch name", &self.name));
        let location = errors.check("location", validation::required("Location", &self.location));
        let phone_number = errors.check("phone", validation::optional_phone(&self.phone));
        let email = if self.email.trim().is_empty() {
            Some(None)
        } else {
            errors.check("email", validation::email(&self.email)).map(Some)
        };
        let capacity = errors.check("capacity", validation::non_negative_count("Capacity", &self.capacity));

        match (name, location, phone_number, email, capacity) {
            (Some(name), Some(location), Some(phone_number), Some(email), Some(capacity)) => Ok(BranchRequest {
                name,
                location,
                phone_number,
                email,
                capacity,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_from_backend() {
        let branch: Branch = serde_json::from_str(
            r#"{"publicId":"br-1","name":"North","location":"Bahir Dar","capacity":40,"currentOccupancy":30,"enabled":true}"#,
        )
        .unwrap();
        assert!(!branch.suspended);
        assert_eq!(branch.occupancy_percent(), 75.0);
    }

    #[test]
    fn test_zero_capacity_occupancy() {
        let branch: Branch = serde_json::from_str(r#"{"publicId":"br-2","currentOccupancy":3}"#).unwrap();
        assert_eq!(branch.occupancy_percent(), 0.0);
    }

    #[test]
    fn test_form_optional_email() {
        let form = BranchForm {
            name: "South".into(),
            location: "Hawassa".into(),
            capacity: "25".into(),
            ..BranchForm::default()
        };
        let request = form.validate().unwrap();
        assert_eq!(request.email, None);
        assert_eq!(request.capacity, 25);

        let bad = BranchForm {
            email: "nope".into(),
            capacity: "-2".into(),
            ..form
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.get("email").is_some());
        assert_eq!(errors.get("capacity").as_deref(), Some("Capacity must not be negative"));
    }
}
