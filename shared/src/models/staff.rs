use serde::{Deserialize, Serialize};

use super::{default_enabled, FormInput, Identified};
use crate::labels::translate;
use crate::validation::{self, FieldErrors};

/// Staff roles an orphanage admin can assign
pub const STAFF_ROLES: &[&str] = &["SUPERVISOR", "CAREGIVER", "SOCIAL_WORKER", "ACCOUNTANT"];

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StaffMemberDto {
    public_id: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    branch_id: Option<String>,
    #[serde(default)]
    branch_name: Option<String>,
    #[serde(default = "default_enabled")]
    enabled: bool,
    #[serde(default)]
    created_date: Option<String>,
}

/// A staff account as shown in the staff table
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "StaffMemberDto")]
pub struct StaffMember {
    pub public_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    pub branch_id: Option<String>,
    pub branch_name: Option<String>,
    pub suspended: bool,
    pub created_date: Option<String>,
}

impl From<StaffMemberDto> for StaffMember {
    fn from(dto: StaffMemberDto) -> Self {
        Self {
            public_id: dto.public_id,
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            phone: dto.phone_number,
            role: dto.role.unwrap_or_default(),
            branch_id: dto.branch_id,
            branch_name: dto.branch_name,
            suspended: !dto.enabled,
            created_date: dto.created_date,
        }
    }
}

impl StaffMember {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    pub fn role_label(&self) -> String {
        translate(&self.role).into_owned()
    }

    pub fn status_label(&self) -> &'static str {
        if self.suspended {
            "Suspended"
        } else {
            "Active"
        }
    }

    /// Apply an accepted update locally when the backend does not echo the record
    pub fn apply(&mut self, request: &StaffRequest) {
        self.first_name = request.first_name.clone();
        self.last_name = request.last_name.clone();
        self.email = request.email.clone();
        self.phone = request.phone_number.clone();
        self.role = request.role.clone();
        self.branch_id = request.branch_id.clone();
    }
}

impl Identified for StaffMember {
    fn public_id(&self) -> &str {
        &self.public_id
    }
}

/// Body for `POST /admins` and `PATCH /admins/{id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaffForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub branch_id: String,
}

impl StaffForm {
    pub fn from_member(member: &StaffMember) -> Self {
        Self {
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
            email: member.email.clone(),
            phone: member.phone.clone().unwrap_or_default(),
            role: member.role.clone(),
            branch_id: member.branch_id.clone().unwrap_or_default(),
        }
    }
}

impl FormInput for StaffForm {
    type Request = StaffRequest;

    fn validate(&self) -> Result<StaffRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        let first_name = errors.check("first_name", validation::required("First name", &self.first_name));
        let last_name = errors.check("last_name", validation::required("Last name", &self.last_name));
        let email = errors.check("email", validation::email(&self.email));
        let phone_number = errors.check("phone", validation::optional_phone(&self.phone));
        let role = errors.check("role", validation::required("Role", &self.role));

        match (first_name, last_name, email, phone_number, role) {
            (Some(first_name), Some(last_name), Some(email), Some(phone_number), Some(role)) if errors.is_empty() => {
                Ok(StaffRequest {
                    first_name,
                    last_name,
                    email,
                    phone_number,
                    role,
                    branch_id: validation::optional(&self.branch_id),
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
    fn test_enabled_becomes_suspended() {
        let json = r#"[
            {"publicId":"s-1","firstName":"Abebe","lastName":"Kebede","email":"a@oims.org","role":"CAREGIVER","enabled":false},
            {"publicId":"s-2","firstName":"Sara","lastName":"Tesfaye","email":"s@oims.org"}
        ]"#;
        let staff: Vec<StaffMember> = serde_json::from_str(json).unwrap();
        assert!(staff[0].suspended);
        assert_eq!(staff[0].status_label(), "Suspended");
        assert_eq!(staff[0].role_label(), "Caregiver");
        assert!(!staff[1].suspended);
        assert_eq!(staff[1].full_name(), "Sara Tesfaye");
    }

    #[test]
    fn test_form_validation_reports_each_field() {
        let form = StaffForm {
            email: "broken".into(),
            phone: "12".into(),
            ..StaffForm::default()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.get("first_name").is_some());
        assert!(errors.get("last_name").is_some());
        assert_eq!(errors.get("email").as_deref(), Some("Enter a valid email address"));
        assert_eq!(errors.get("phone").as_deref(), Some("Enter a valid phone number"));
        assert_eq!(errors.get("role").as_deref(), Some("Role is required"));
    }

    #[test]
    fn test_form_builds_request() {
        let form = StaffForm {
            first_name: " Liya ".into(),
            last_name: "Haile".into(),
            email: "liya@oims.org".into(),
            phone: "".into(),
            role: "SUPERVISOR".into(),
            branch_id: "br-9".into(),
        };
        let request = form.validate().unwrap();
        assert_eq!(request.first_name, "Liya");
        assert_eq!(request.phone_number, None);
        assert_eq!(request.branch_id.as_deref(), Some("br-9"));

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["firstName"], "Liya");
        assert!(body.get("phoneNumber").is_none());
    }

    #[test]
    fn test_apply_update_keeps_status() {
        let mut member: StaffMember = serde_json::from_str(
            r#"{"publicId":"s-1","firstName":"A","lastName":"B","email":"a@b.co","enabled":false}"#,
        )
        .unwrap();
        let request = StaffForm {
            first_name: "New".into(),
            last_name: "Name".into(),
            email: "new@oims.org".into(),
            role: "ACCOUNTANT".into(),
            ..StaffForm::default()
        }
        .validate()
        .unwrap();
        member.apply(&request);
        assert_eq!(member.full_name(), "New Name");
        assert!(member.suspended);
    }
}
