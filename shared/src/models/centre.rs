//! Orphanage centres and the two-step registration flow.
//!
//! Registering a centre is a form submission followed by a separate
//! certificate upload. The upload may fail after the centre already exists;
//! [`RegistrationOutcome`] records which step the flow reached.

use serde::{Deserialize, Serialize};

use super::{default_enabled, FormInput, Identified};
use crate::validation::{self, FieldErrors};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrphanageCentreDto {
    public_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    director_name: Option<String>,
    #[serde(default)]
    branch_count: u32,
    #[serde(default)]
    verified: bool,
    #[serde(default = "default_enabled")]
    enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "OrphanageCentreDto")]
pub struct OrphanageCentre {
    pub public_id: String,
    pub name: String,
    pub address: String,
    pub email: Option<String>,
    pub director_name: Option<String>,
    pub branch_count: u32,
    pub verified: bool,
    pub suspended: bool,
}

impl From<OrphanageCentreDto> for OrphanageCentre {
    fn from(dto: OrphanageCentreDto) -> Self {
        Self {
            public_id: dto.public_id,
            name: dto.name,
            address: dto.address,
            email: dto.email,
            director_name: dto.director_name,
            branch_count: dto.branch_count,
            verified: dto.verified,
            suspended: !dto.enabled,
        }
    }
}

impl Identified for OrphanageCentre {
    fn public_id(&self) -> &str {
        &self.public_id
    }
}

/// Body for `POST /orphanages/centres`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CentreRegistrationRequest {
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone_number: String,
    pub director_name: String,
    pub license_number: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CentreRegistrationResponse {
    pub public_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// JSON body for the base64 certificate upload fallback
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateUpload {
    pub file_name: String,
    pub content_type: String,
    /// Base64 file content without the `data:` URL prefix
    pub data: String,
}

impl CertificateUpload {
    /// Build from a `data:<mime>;base64,<payload>` URL as produced by a file reader
    pub fn from_data_url(file_name: &str, data_url: &str) -> Option<Self> {
        let rest = data_url.strip_prefix("data:")?;
        let (meta, payload) = rest.split_once(',')?;
        let content_type = meta.strip_suffix(";base64")?;
        Some(Self {
            file_name: file_name.to_string(),
            content_type: if content_type.is_empty() {
                "application/octet-stream".to_string()
            } else {
                content_type.to_string()
            },
            data: payload.to_string(),
        })
    }
}

/// How far the registration flow got
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// Centre created and certificate stored
    Complete { centre_id: String },
    /// Centre created but the certificate could not be uploaded; the centre
    /// is not rolled back
    CertificateMissing { centre_id: String, reason: String },
}

impl RegistrationOutcome {
    pub fn centre_id(&self) -> &str {
        match self {
            RegistrationOutcome::Complete { centre_id } => centre_id,
            RegistrationOutcome::CertificateMissing { centre_id, .. } => centre_id,
        }
    }

    pub fn message(&self) -> String {
        match self {
            RegistrationOutcome::Complete { .. } => "Orphanage centre registered".to_string(),
            RegistrationOutcome::CertificateMissing { reason, .. } => format!(
                "Centre registered, but the certificate upload failed ({}). Upload it again from the centre list.",
                reason
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CentreForm {
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub director_name: String,
    pub license_number: String,
}

impl FormInput for CentreForm {
    type Request = CentreRegistrationRequest;

    fn validate(&self) -> Result<CentreRegistrationRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = errors.check("name", validation::required("Centre name", &self.name));
        let address = errors.check("address", validation::required("Address", &self.address));
        let email = errors.check("email", validation::email(&self.email));
        let phone_number = errors.check("phone", validation::phone(&self.phone));
        let director_name = errors.check("director_name", validation::required("Director name", &self.director_name));
        let license_number = errors.check(
            "license_number",
            validation::required("License number", &self.license_number),
        );

        match (name, address, email, phone_number, director_name, license_number) {
            (
                Some(name),
                Some(address),
                Some(email),
                Some(phone_number),
                Some(director_name),
                Some(license_number),
            ) => Ok(CentreRegistrationRequest {
                name,
                address,
                email,
                phone_number,
                director_name,
                license_number,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certificate_from_data_url() {
        let upload = CertificateUpload::from_data_url("cert.pdf", "data:application/pdf;base64,JVBERi0=").unwrap();
        assert_eq!(upload.content_type, "application/pdf");
        assert_eq!(upload.data, "JVBERi0=");

        let untyped = CertificateUpload::from_data_url("x.bin", "data:;base64,AAAA").unwrap();
        assert_eq!(untyped.content_type, "application/octet-stream");

        assert!(CertificateUpload::from_data_url("x", "data:text/plain,hello").is_none());
        assert!(CertificateUpload::from_data_url("x", "not a data url").is_none());
    }

    #[test]
    fn test_outcome_messages() {
        let partial = RegistrationOutcome::CertificateMissing {
            centre_id: "c-1".into(),
            reason: "HTTP 500".into(),
        };
        assert_eq!(partial.centre_id(), "c-1");
        assert!(partial.message().contains("HTTP 500"));
    }

    #[test]
    fn test_centre_form_requires_everything() {
        let errors = CentreForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 6);
    }

    #[test]
    fn test_centre_listing() {
        let centre: OrphanageCentre =
            serde_json::from_str(r#"{"publicId":"c-9","name":"Hope","branchCount":3,"enabled":false}"#).unwrap();
        assert!(centre.suspended);
        assert_eq!(centre.branch_count, 3);
    }
}
