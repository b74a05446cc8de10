use std::collections::BTreeMap;

use super::payload::ApplicationPayload;
use super::types::{ChoiceGroup, FormField, TARGET_SEGMENTS, YES_NO};
use super::validators;

/// Raw values of every control on the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: BTreeMap<FormField, String>,
    pub is_whatsapp: bool,
    pub current_english_training: Option<String>,
    /// Checked segments, kept in catalogue order
    pub target_segments: Vec<String>,
    pub agree_to_terms: bool,
    pub authority: bool,
    pub demo_call: Option<String>,
    /// Token produced by the external challenge widget
    pub verification_token: Option<String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current raw value of a field; empty when never set
    pub fn value(&self, field: FormField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set_value(&mut self, field: FormField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn value_mut(&mut self, field: FormField) -> &mut String {
        self.values.entry(field).or_default()
    }

    pub fn is_checked(&self, group: ChoiceGroup) -> bool {
        match group {
            ChoiceGroup::AgreeToTerms => self.agree_to_terms,
            ChoiceGroup::Authority => self.authority,
            ChoiceGroup::CurrentEnglishTraining => self.current_english_training.is_some(),
            ChoiceGroup::TargetSegments => !self.target_segments.is_empty(),
            ChoiceGroup::DemoCall => self.demo_call.is_some(),
        }
    }

    pub fn set_checked(&mut self, group: ChoiceGroup, checked: bool) {
        match group {
            ChoiceGroup::AgreeToTerms => self.agree_to_terms = checked,
            ChoiceGroup::Authority => self.authority = checked,
            _ => {}
        }
    }

    /// Toggle one segment in the multi-select group
    pub fn toggle_segment(&mut self, segment: &str) {
        if let Some(pos) = self.target_segments.iter().position(|s| s == segment) {
            self.target_segments.remove(pos);
        } else {
            self.target_segments.push(segment.to_string());
            self.target_segments.sort_by_key(|s| {
                TARGET_SEGMENTS
                    .iter()
                    .position(|known| known == s)
                    .unwrap_or(usize::MAX)
            });
        }
    }

    /// Checked-state of each radio in the English-training group
    pub fn english_training_checks(&self) -> Vec<bool> {
        YES_NO
            .iter()
            .map(|opt| self.current_english_training.as_deref() == Some(*opt))
            .collect()
    }

    /// Checked-state of each selected segment checkbox
    pub fn segment_checks(&self) -> Vec<bool> {
        self.target_segments.iter().map(|s| !s.is_empty()).collect()
    }

    /// Message for a locally validated group; empty when valid
    pub fn group_message(&self, group: ChoiceGroup) -> String {
        match group {
            ChoiceGroup::CurrentEnglishTraining => {
                validators::validate_single_choice(&self.english_training_checks())
            }
            ChoiceGroup::TargetSegments => validators::validate_multi_choice(&self.segment_checks()),
            ChoiceGroup::AgreeToTerms | ChoiceGroup::Authority => {
                validators::validate_consent(group, self.is_checked(group))
            }
            ChoiceGroup::DemoCall => String::new(),
        }
    }

    /// Build the request body. Every declared key is present.
    pub fn collect(&self) -> ApplicationPayload {
        let v = |field| self.value(field).to_string();
        ApplicationPayload {
            first_name: v(FormField::FirstName),
            last_name: v(FormField::LastName),
            email: v(FormField::Email),
            phone: v(FormField::Phone),
            country_code: v(FormField::CountryCode),
            job_title: v(FormField::JobTitle),
            linkedin: v(FormField::Linkedin),
            company: v(FormField::Company),
            website: v(FormField::Website),
            country: v(FormField::Country),
            org_type: v(FormField::OrgType),
            student_volume: v(FormField::StudentVolume),
            partnership_type: v(FormField::PartnershipType),
            expected_timeline: v(FormField::ExpectedTimeline),
            monthly_volume: v(FormField::MonthlyVolume),
            why_partner: v(FormField::WhyPartner),
            additional_info: v(FormField::AdditionalInfo),
            is_whatsapp: self.is_whatsapp,
            current_english_training: self.current_english_training.clone().unwrap_or_default(),
            target_segments: self.target_segments.clone(),
            agree_to_terms: self.agree_to_terms,
            authority: self.authority,
            demo_call: self.demo_call.clone().unwrap_or_default(),
            turnstile_response: self.verification_token.clone().unwrap_or_default(),
        }
    }

    /// Inverse of `collect`, used to load answers files
    pub fn from_payload(payload: &ApplicationPayload) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());

        let mut form = Self::new();
        let p = payload;
        for (field, value) in [
            (FormField::FirstName, &p.first_name),
            (FormField::LastName, &p.last_name),
            (FormField::Email, &p.email),
            (FormField::Phone, &p.phone),
            (FormField::CountryCode, &p.country_code),
            (FormField::JobTitle, &p.job_title),
            (FormField::Linkedin, &p.linkedin),
            (FormField::Company, &p.company),
            (FormField::Website, &p.website),
            (FormField::Country, &p.country),
            (FormField::OrgType, &p.org_type),
            (FormField::StudentVolume, &p.student_volume),
            (FormField::PartnershipType, &p.partnership_type),
            (FormField::ExpectedTimeline, &p.expected_timeline),
            (FormField::MonthlyVolume, &p.monthly_volume),
            (FormField::WhyPartner, &p.why_partner),
            (FormField::AdditionalInfo, &p.additional_info),
        ] {
            if !value.is_empty() {
                form.set_value(field, value.clone());
            }
        }
        form.is_whatsapp = p.is_whatsapp;
        form.current_english_training = non_empty(&p.current_english_training);
        form.target_segments = p
            .target_segments
            .iter()
            .filter(|s| !s.trim().is_empty())
            .cloned()
            .collect();
        form.agree_to_terms = p.agree_to_terms;
        form.authority = p.authority;
        form.demo_call = non_empty(&p.demo_call);
        form.verification_token = non_empty(&p.turnstile_response);
        form
    }
}

#[cfg(test)]
impl FormState {
    /// A form that passes every step
    pub(crate) fn sample() -> Self {
        let mut form = Self::new();
        for (field, value) in [
            (FormField::FirstName, "Jane"),
            (FormField::LastName, "Doe"),
            (FormField::Email, "jane@example.com"),
            (FormField::Phone, "(555) 123-4567"),
            (FormField::CountryCode, "+1"),
            (FormField::JobTitle, "Consultant"),
            (FormField::Linkedin, "https://linkedin.com/in/jane"),
            (FormField::Company, "Acme Medical College"),
            (FormField::Country, "India"),
            (FormField::OrgType, "Medical College"),
            (FormField::StudentVolume, "100-500"),
            (FormField::PartnershipType, "Campus Program Partner"),
            (FormField::ExpectedTimeline, "1-3 months"),
            (FormField::MonthlyVolume, "about 40 learners"),
            (
                FormField::WhyPartner,
                "We train hundreds of clinicians every year and need OET content.",
            ),
        ] {
            form.set_value(field, value);
        }
        form.current_english_training = Some("Yes".into());
        form.toggle_segment("MBBS Students");
        form.agree_to_terms = true;
        form.authority = true;
        form.demo_call = Some("Yes".into());
        form.verification_token = Some("XXXX.DUMMY.TOKEN".into());
        form
    }
}
