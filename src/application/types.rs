/// Number of steps in the application form
pub const TOTAL_STEPS: usize = 5;

/// Step titles, indexed by `step - 1`
pub const STEP_TITLES: [&str; TOTAL_STEPS] = [
    "Personal Information",
    "Institution Details",
    "Partnership Details",
    "Business Experience",
    "Agreement",
];

/// Fields owned by each step, indexed by `step - 1`
pub const STEP_FIELDS: [&[FormField]; TOTAL_STEPS] = [
    &[
        FormField::FirstName,
        FormField::LastName,
        FormField::Email,
        FormField::Phone,
        FormField::CountryCode,
        FormField::JobTitle,
        FormField::Linkedin,
    ],
    &[
        FormField::Company,
        FormField::Website,
        FormField::Country,
        FormField::OrgType,
        FormField::StudentVolume,
    ],
    &[FormField::PartnershipType, FormField::ExpectedTimeline],
    &[FormField::MonthlyVolume, FormField::WhyPartner],
    &[FormField::AdditionalInfo],
];

/// Groups owned by each step, indexed by `step - 1`.
/// `DemoCall` is never validated locally but server errors for it land on step 5.
pub const STEP_GROUPS: [&[ChoiceGroup]; TOTAL_STEPS] = [
    &[],
    &[ChoiceGroup::CurrentEnglishTraining],
    &[ChoiceGroup::TargetSegments],
    &[],
    &[
        ChoiceGroup::AgreeToTerms,
        ChoiceGroup::Authority,
        ChoiceGroup::DemoCall,
    ],
];

pub const JOB_TITLES: &[&str] = &[
    "Director / Founder",
    "Academic Coordinator",
    "Faculty / Trainer",
    "Business Development",
    "Consultant",
    "Other",
];

pub const COUNTRIES: &[&str] = &[
    "India",
    "United States",
    "United Kingdom",
    "Canada",
    "Australia",
    "New Zealand",
    "Ireland",
    "South Africa",
    "Singapore",
    "Philippines",
    "Turkey",
    "United Arab Emirates",
    "Saudi Arabia",
    "Germany",
    "France",
    "Japan",
    "South Korea",
    "Nepal",
    "Sri Lanka",
    "Bangladesh",
    "Pakistan",
    "Nigeria",
    "Other",
];

pub const COUNTRY_CODES: &[&str] = &[
    "+91", "+1", "+44", "+61", "+64", "+353", "+27", "+65", "+63", "+90", "+971", "+966", "+49",
    "+33", "+81", "+82", "+977", "+94", "+880", "+92", "+234",
];

pub const ORG_TYPES: &[&str] = &[
    "Medical College",
    "Nursing College",
    "Hospital",
    "EdTech Company",
    "Study Abroad Consultancy",
    "Individual Trainer",
    "Other",
];

pub const STUDENT_VOLUMES: &[&str] = &["0-100", "100-500", "500-1000", "1000+", "Not Applicable"];

pub const PARTNERSHIP_TYPES: &[&str] = &[
    "Authorized Training Partner",
    "Campus Program Partner",
    "Reseller / Referral Partner",
    "Corporate Hospital Training Partner",
    "Faculty Representative",
];

pub const TIMELINES: &[&str] = &["Immediately", "1-3 months", "3-6 months", "Not sure yet"];

pub const TARGET_SEGMENTS: &[&str] = &[
    "MBBS Students",
    "Nursing Students",
    "Doctors / Clinicians",
    "IELTS/OET Aspirants",
    "International Placement",
];

pub const YES_NO: &[&str] = &["Yes", "No"];

/// How a field is edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Select(&'static [&'static str]),
}

/// A named text/select control of the application form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Phone,
    CountryCode,
    JobTitle,
    Linkedin,
    Company,
    Website,
    Country,
    OrgType,
    StudentVolume,
    PartnershipType,
    ExpectedTimeline,
    MonthlyVolume,
    WhyPartner,
    AdditionalInfo,
}

impl FormField {
    /// Every field, in payload order
    pub const ALL: [FormField; 17] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Phone,
        Self::CountryCode,
        Self::JobTitle,
        Self::Linkedin,
        Self::Company,
        Self::Website,
        Self::Country,
        Self::OrgType,
        Self::StudentVolume,
        Self::PartnershipType,
        Self::ExpectedTimeline,
        Self::MonthlyVolume,
        Self::WhyPartner,
        Self::AdditionalInfo,
    ];

    /// Wire name, as used in the request body and server error maps
    pub fn name(&self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::CountryCode => "countryCode",
            Self::JobTitle => "jobTitle",
            Self::Linkedin => "linkedin",
            Self::Company => "company",
            Self::Website => "website",
            Self::Country => "country",
            Self::OrgType => "orgType",
            Self::StudentVolume => "studentVolume",
            Self::PartnershipType => "partnershipType",
            Self::ExpectedTimeline => "expectedTimeline",
            Self::MonthlyVolume => "monthlyVolume",
            Self::WhyPartner => "whyPartner",
            Self::AdditionalInfo => "additionalInfo",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Email => "Email address",
            Self::Phone => "Phone number",
            Self::CountryCode => "Country code",
            Self::JobTitle => "Role in organization",
            Self::Linkedin => "LinkedIn profile",
            Self::Company => "Institution / company",
            Self::Website => "Website",
            Self::Country => "Country",
            Self::OrgType => "Organization type",
            Self::StudentVolume => "Student volume",
            Self::PartnershipType => "Partnership type",
            Self::ExpectedTimeline => "Expected timeline",
            Self::MonthlyVolume => "Expected monthly volume",
            Self::WhyPartner => "Why partner with us?",
            Self::AdditionalInfo => "Additional information",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::CountryCode => FieldKind::Select(COUNTRY_CODES),
            Self::JobTitle => FieldKind::Select(JOB_TITLES),
            Self::Country => FieldKind::Select(COUNTRIES),
            Self::OrgType => FieldKind::Select(ORG_TYPES),
            Self::StudentVolume => FieldKind::Select(STUDENT_VOLUMES),
            Self::PartnershipType => FieldKind::Select(PARTNERSHIP_TYPES),
            Self::ExpectedTimeline => FieldKind::Select(TIMELINES),
            Self::WhyPartner | Self::AdditionalInfo => FieldKind::TextArea,
            _ => FieldKind::Text,
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Self::LastName | Self::Website | Self::AdditionalInfo)
    }

    /// Step (1-based) that owns this field
    pub fn step(&self) -> usize {
        STEP_FIELDS
            .iter()
            .position(|fields| fields.contains(self))
            .map(|i| i + 1)
            .unwrap_or(TOTAL_STEPS)
    }
}

/// Controls validated (or reported on) as a unit rather than per field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChoiceGroup {
    /// Single-choice radio set on step 2
    CurrentEnglishTraining,
    /// Multi-select checkbox set on step 3
    TargetSegments,
    AgreeToTerms,
    Authority,
    /// Optional demo-call preference on step 5
    DemoCall,
}

impl ChoiceGroup {
    pub const ALL: [ChoiceGroup; 5] = [
        Self::CurrentEnglishTraining,
        Self::TargetSegments,
        Self::AgreeToTerms,
        Self::Authority,
        Self::DemoCall,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::CurrentEnglishTraining => "currentEnglishTraining",
            Self::TargetSegments => "targetSegments",
            Self::AgreeToTerms => "agreeToTerms",
            Self::Authority => "authority",
            Self::DemoCall => "demoCall",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.name() == name)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::CurrentEnglishTraining => "Do you currently offer English training?",
            Self::TargetSegments => "Target segments",
            Self::AgreeToTerms => "I agree to the terms and conditions",
            Self::Authority => "I have authority to discuss partnerships",
            Self::DemoCall => "Would you like a demo call?",
        }
    }

    /// Options offered by choice-style groups; empty for single checkboxes
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            Self::CurrentEnglishTraining | Self::DemoCall => YES_NO,
            Self::TargetSegments => TARGET_SEGMENTS,
            Self::AgreeToTerms | Self::Authority => &[],
        }
    }

    pub fn step(&self) -> usize {
        STEP_GROUPS
            .iter()
            .position(|groups| groups.contains(self))
            .map(|i| i + 1)
            .unwrap_or(TOTAL_STEPS)
    }
}

/// Title for a 1-based step number
pub fn step_title(step: usize) -> &'static str {
    step.checked_sub(1)
        .and_then(|i| STEP_TITLES.get(i))
        .copied()
        .unwrap_or("")
}

/// Fields owned by a 1-based step; empty outside `1..=TOTAL_STEPS`
pub fn step_fields(step: usize) -> &'static [FormField] {
    step.checked_sub(1)
        .and_then(|i| STEP_FIELDS.get(i))
        .copied()
        .unwrap_or(&[])
}

/// Groups owned by a 1-based step; empty outside `1..=TOTAL_STEPS`
pub fn step_groups(step: usize) -> &'static [ChoiceGroup] {
    step.checked_sub(1)
        .and_then(|i| STEP_GROUPS.get(i))
        .copied()
        .unwrap_or(&[])
}
