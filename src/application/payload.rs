//! Wire types for the partnership application endpoint.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request body for `POST /api/partnership-application`
/// Missing keys deserialize to their defaults, so the same type reads answers files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub country_code: String,
    pub job_title: String,
    pub linkedin: String,
    pub company: String,
    pub website: String,
    pub country: String,
    pub org_type: String,
    pub student_volume: String,
    pub partnership_type: String,
    pub expected_timeline: String,
    pub monthly_volume: String,
    pub why_partner: String,
    pub additional_info: String,
    pub is_whatsapp: bool,
    pub current_english_training: String,
    pub target_segments: Vec<String>,
    pub agree_to_terms: bool,
    pub authority: bool,
    pub demo_call: String,
    #[serde(rename = "cf-turnstile-response")]
    pub turnstile_response: String,
}

/// Response body from the application endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Field/group name → human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

impl SubmitResponse {
    pub fn accepted(reference: impl Into<String>) -> Self {
        Self {
            success: true,
            reference_number: Some(reference.into()),
            ..Default::default()
        }
    }

    pub fn rejected<I, K, V>(message: Option<&str>, errors: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            success: false,
            reference_number: None,
            message: message.map(str::to_string),
            errors: Some(
                errors
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_key_set() {
        let value = serde_json::to_value(ApplicationPayload::default()).unwrap();
        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();

        let mut expected = vec![
            "firstName",
            "lastName",
            "email",
            "phone",
            "countryCode",
            "jobTitle",
            "linkedin",
            "company",
            "website",
            "country",
            "orgType",
            "studentVolume",
            "partnershipType",
            "expectedTimeline",
            "monthlyVolume",
            "whyPartner",
            "additionalInfo",
            "isWhatsapp",
            "currentEnglishTraining",
            "targetSegments",
            "agreeToTerms",
            "authority",
            "demoCall",
            "cf-turnstile-response",
        ];
        expected.sort_unstable();
        assert_eq!(keys, expected);
        assert_eq!(value["targetSegments"], serde_json::json!([]));
        assert_eq!(value["isWhatsapp"], serde_json::json!(false));
    }

    #[test]
    fn test_response_parsing() {
        let ok: SubmitResponse = serde_json::from_str(
            r#"{"success": true, "reference_number": "SP-2026-0042", "message": "done"}"#,
        )
        .unwrap();
        assert!(ok.success);
        assert_eq!(ok.reference_number.as_deref(), Some("SP-2026-0042"));
        assert!(ok.errors.is_none());

        let failed: SubmitResponse = serde_json::from_str(
            r#"{"success": false, "message": "Please fix", "errors": {"email": "bad"}}"#,
        )
        .unwrap();
        assert!(!failed.success);
        assert_eq!(failed.errors.unwrap()["email"], "bad");

        let bare: SubmitResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(bare.message.is_none());
    }
}
