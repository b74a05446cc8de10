//! Field and group validators.
//!
//! Every validator is a pure function of its input. An empty message means valid.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{ChoiceGroup, FormField};

static NAME_CHARSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\s\-'.]+$").expect("name charset regex"));
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").expect("email regex")
});
static PHONE_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\-()]+").expect("phone separator regex"));
static PHONE_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{7,15}$").expect("phone digits regex"));
static LINKEDIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(www\.)?linkedin\.com/in/.+").expect("linkedin regex")
});
static WEBSITE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://.+\..+").expect("website regex"));

const NAME_CHARSET_MSG: &str = "Only letters, spaces, hyphens & apostrophes allowed.";

pub const SELECT_OPTION_MSG: &str = "Please select an option.";
pub const TARGET_SEGMENTS_MSG: &str = "Please select at least one target segment.";
pub const AGREE_TO_TERMS_MSG: &str = "You must agree to the terms and conditions.";
pub const AUTHORITY_MSG: &str = "You must confirm your authority.";
pub const VERIFICATION_MSG: &str = "Please complete the security verification.";

/// Validate a raw field value; returns an empty string when valid
pub fn validate_field(field: FormField, raw: &str) -> String {
    let v = raw.trim();
    let len = v.chars().count();

    let msg = match field {
        FormField::FirstName => {
            if v.is_empty() {
                "First name is required."
            } else if !(2..=50).contains(&len) {
                "First name must be 2-50 characters."
            } else if !NAME_CHARSET.is_match(v) {
                NAME_CHARSET_MSG
            } else {
                ""
            }
        }
        FormField::LastName => {
            if v.is_empty() {
                ""
            } else if len > 50 {
                "Last name must be at most 50 characters."
            } else if !NAME_CHARSET.is_match(v) {
                NAME_CHARSET_MSG
            } else {
                ""
            }
        }
        FormField::Email => {
            if v.is_empty() {
                "Email address is required."
            } else if !EMAIL.is_match(v) {
                "Please enter a valid email address."
            } else {
                ""
            }
        }
        FormField::Phone => {
            let digits = normalize_phone(v);
            if digits.is_empty() {
                "Phone number is required."
            } else if !PHONE_DIGITS.is_match(&digits) {
                "Phone must be 7-15 digits."
            } else {
                ""
            }
        }
        FormField::Linkedin => {
            if v.is_empty() {
                "LinkedIn profile URL is required."
            } else if !LINKEDIN.is_match(v) {
                "Enter a valid LinkedIn URL (e.g. https://linkedin.com/in/your-profile)."
            } else {
                ""
            }
        }
        FormField::Company => {
            if v.is_empty() {
                "Institution/company name is required."
            } else if !(2..=100).contains(&len) {
                "Must be 2-100 characters."
            } else {
                ""
            }
        }
        FormField::Website => {
            if !v.is_empty() && !WEBSITE.is_match(v) {
                "Enter a valid URL starting with http:// or https://."
            } else {
                ""
            }
        }
        FormField::MonthlyVolume => {
            if v.is_empty() {
                "Expected monthly volume is required."
            } else if !(2..=100).contains(&len) {
                "Must be 2-100 characters."
            } else {
                ""
            }
        }
        FormField::WhyPartner => {
            if v.is_empty() {
                "This field is required."
            } else if len < 20 {
                return format!("Please provide at least 20 characters (currently {len}).");
            } else if len > 2000 {
                "Please keep your response under 2000 characters."
            } else {
                ""
            }
        }
        FormField::AdditionalInfo => {
            if len > 2000 {
                "Must be under 2000 characters."
            } else {
                ""
            }
        }
        FormField::CountryCode
        | FormField::JobTitle
        | FormField::Country
        | FormField::OrgType
        | FormField::StudentVolume
        | FormField::PartnershipType
        | FormField::ExpectedTimeline => {
            if v.is_empty() {
                required_selection_message(field)
            } else {
                ""
            }
        }
    };

    msg.to_string()
}

/// Validate by wire name; `None` when no validator exists for `name`
pub fn validate_named(name: &str, raw: &str) -> Option<String> {
    FormField::from_name(name).map(|field| validate_field(field, raw))
}

/// Strip spaces, hyphens and parentheses from a phone number
pub fn normalize_phone(raw: &str) -> String {
    PHONE_SEPARATORS.replace_all(raw.trim(), "").into_owned()
}

fn required_selection_message(field: FormField) -> &'static str {
    match field {
        FormField::CountryCode => "Country code is required.",
        FormField::JobTitle => "Please select your role.",
        FormField::Country => "Please select your country.",
        FormField::OrgType => "Please select organization type.",
        FormField::StudentVolume => "Please select student volume.",
        FormField::PartnershipType => "Please select partnership type.",
        FormField::ExpectedTimeline => "Please select expected timeline.",
        _ => "This field is required.",
    }
}

/// Single-choice group: exactly one option checked
pub fn validate_single_choice(checked: &[bool]) -> String {
    if checked.iter().filter(|c| **c).count() == 1 {
        String::new()
    } else {
        SELECT_OPTION_MSG.to_string()
    }
}

/// Multi-choice group: at least one option checked
pub fn validate_multi_choice(checked: &[bool]) -> String {
    if checked.iter().any(|c| *c) {
        String::new()
    } else {
        TARGET_SEGMENTS_MSG.to_string()
    }
}

/// Consent checkbox: must be checked, each with its own message
pub fn validate_consent(group: ChoiceGroup, checked: bool) -> String {
    if checked {
        return String::new();
    }
    match group {
        ChoiceGroup::AgreeToTerms => AGREE_TO_TERMS_MSG.to_string(),
        ChoiceGroup::Authority => AUTHORITY_MSG.to_string(),
        _ => String::new(),
    }
}

/// Anti-automation token: must be present and non-empty
pub fn validate_verification_token(token: Option<&str>) -> String {
    match token {
        Some(t) if !t.is_empty() => String::new(),
        _ => VERIFICATION_MSG.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(FormField::FirstName)]
    #[case(FormField::Email)]
    #[case(FormField::Phone)]
    #[case(FormField::CountryCode)]
    #[case(FormField::JobTitle)]
    #[case(FormField::Linkedin)]
    #[case(FormField::Company)]
    #[case(FormField::Country)]
    #[case(FormField::OrgType)]
    #[case(FormField::StudentVolume)]
    #[case(FormField::PartnershipType)]
    #[case(FormField::ExpectedTimeline)]
    #[case(FormField::MonthlyVolume)]
    #[case(FormField::WhyPartner)]
    fn test_required_fields_reject_blank(#[case] field: FormField) {
        assert!(!field.is_optional());
        assert!(!validate_field(field, "").is_empty());
        assert!(
            !validate_field(field, "   \t ").is_empty(),
            "{} should reject whitespace",
            field.name()
        );
    }

    #[rstest]
    #[case(FormField::LastName)]
    #[case(FormField::Website)]
    #[case(FormField::AdditionalInfo)]
    fn test_optional_fields_accept_blank(#[case] field: FormField) {
        assert!(field.is_optional());
        assert_eq!(validate_field(field, ""), "");
        assert_eq!(validate_field(field, "   "), "");
    }

    #[test]
    fn test_why_partner_length_boundary() {
        let nineteen = "a".repeat(19);
        assert_eq!(
            validate_field(FormField::WhyPartner, &nineteen),
            "Please provide at least 20 characters (currently 19)."
        );
        let twenty = "a".repeat(20);
        assert_eq!(validate_field(FormField::WhyPartner, &twenty), "");
        // surrounding whitespace does not count
        let padded = format!("   {}   ", nineteen);
        assert!(validate_field(FormField::WhyPartner, &padded).contains("currently 19"));
        let too_long = "a".repeat(2001);
        assert_eq!(
            validate_field(FormField::WhyPartner, &too_long),
            "Please keep your response under 2000 characters."
        );
    }

    #[test]
    fn test_phone_normalization() {
        assert_eq!(normalize_phone("(555) 123-4567"), "5551234567");
        assert_eq!(validate_field(FormField::Phone, "(555) 123-4567"), "");
        assert_eq!(
            validate_field(FormField::Phone, "123"),
            "Phone must be 7-15 digits."
        );
        assert_eq!(
            validate_field(FormField::Phone, "555-CALL-NOW"),
            "Phone must be 7-15 digits."
        );
        assert_eq!(
            validate_field(FormField::Phone, " ( ) - "),
            "Phone number is required."
        );
        assert!(!validate_field(FormField::Phone, &"9".repeat(16)).is_empty());
    }

    #[rstest]
    #[case("Ann", "")]
    #[case("Mary-Jane O'Neil", "")]
    #[case("J. R.", "")]
    #[case("A", "First name must be 2-50 characters.")]
    #[case("R2D2", "Only letters, spaces, hyphens & apostrophes allowed.")]
    fn test_first_name_rules(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(validate_field(FormField::FirstName, input), expected);
    }

    #[test]
    fn test_last_name_rules() {
        assert_eq!(validate_field(FormField::LastName, "Smith"), "");
        assert_eq!(
            validate_field(FormField::LastName, &"a".repeat(51)),
            "Last name must be at most 50 characters."
        );
        assert_eq!(
            validate_field(FormField::LastName, "Sm1th"),
            "Only letters, spaces, hyphens & apostrophes allowed."
        );
    }

    #[rstest]
    #[case("jane.doe+partner@example.co.uk", true)]
    #[case("  jane@example.com  ", true)]
    #[case("jane@example", false)]
    #[case("jane@example.c", false)]
    #[case("not an email", false)]
    fn test_email_rules(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(validate_field(FormField::Email, input).is_empty(), valid);
    }

    #[rstest]
    #[case("https://linkedin.com/in/jane", true)]
    #[case("http://www.linkedin.com/in/jane-doe", true)]
    #[case("https://linkedin.com/company/acme", false)]
    #[case("linkedin.com/in/jane", false)]
    fn test_linkedin_rules(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(validate_field(FormField::Linkedin, input).is_empty(), valid);
    }

    #[test]
    fn test_website_and_lengths() {
        assert_eq!(validate_field(FormField::Website, "https://example.org"), "");
        assert!(!validate_field(FormField::Website, "example.org").is_empty());
        assert_eq!(
            validate_field(FormField::Company, "X"),
            "Must be 2-100 characters."
        );
        assert_eq!(validate_field(FormField::MonthlyVolume, "50"), "");
        assert_eq!(
            validate_field(FormField::AdditionalInfo, &"z".repeat(2001)),
            "Must be under 2000 characters."
        );
    }

    #[test]
    fn test_validators_are_deterministic() {
        for field in FormField::ALL {
            for input in ["", "x", "hello world", "https://linkedin.com/in/a"] {
                assert_eq!(validate_field(field, input), validate_field(field, input));
            }
        }
    }

    #[test]
    fn test_validate_named() {
        assert_eq!(
            validate_named("email", "").as_deref(),
            Some("Email address is required.")
        );
        assert_eq!(validate_named("targetSegments", ""), None);
        assert_eq!(validate_named("nope", "x"), None);
    }

    #[test]
    fn test_group_validators() {
        assert_eq!(validate_single_choice(&[false, false]), SELECT_OPTION_MSG);
        assert_eq!(validate_single_choice(&[true, false]), "");
        assert_eq!(validate_single_choice(&[true, true]), SELECT_OPTION_MSG);

        assert_eq!(validate_multi_choice(&[]), TARGET_SEGMENTS_MSG);
        assert_eq!(validate_multi_choice(&[false, true, true]), "");

        assert_eq!(
            validate_consent(ChoiceGroup::AgreeToTerms, false),
            AGREE_TO_TERMS_MSG
        );
        assert_eq!(validate_consent(ChoiceGroup::Authority, false), AUTHORITY_MSG);
        assert_eq!(validate_consent(ChoiceGroup::Authority, true), "");

        assert_eq!(validate_verification_token(None), VERIFICATION_MSG);
        assert_eq!(validate_verification_token(Some("")), VERIFICATION_MSG);
        assert_eq!(validate_verification_token(Some("tok")), "");
    }
}
