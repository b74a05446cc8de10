use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use super::console::ConsoleView;
use crate::application::{
    ApplicationClient, ApplicationPayload, ApplicationWizard, ChoiceGroup, FieldKind, FormField,
    FormState, HttpApplicationClient, SubmissionOutcome, TOTAL_STEPS, step_fields, step_groups,
    step_title, validators,
};
use crate::config::Config;
use crate::error::PartnerApplyError;
use crate::tui::{self, App};

/// Load and validate configuration, from `path` when given
pub(crate) fn load_config(path: Option<&str>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
    .and_then(|config| config.validate().map(|_| config))
    .map_err(|e| PartnerApplyError::Config(format!("{e:#}")))?;
    Ok(config)
}

/// Run the interactive wizard
pub(crate) async fn cmd_apply(config: &Config, token: Option<String>) -> Result<()> {
    let mut form = FormState::new();
    form.verification_token = token.or_else(|| config.verification.token.clone());
    let client: Arc<dyn ApplicationClient> =
        Arc::new(HttpApplicationClient::new(&config.api).map_err(PartnerApplyError::from)?);

    tracing::info!(url = %config.api.submit_url(), "starting interactive wizard");
    let reference = tui::run(App::new(form), client)
        .await
        .map_err(|e| PartnerApplyError::Terminal(format!("{e:#}")))?;

    match reference {
        Some(reference) => println!("Application submitted. Reference number: {}", reference),
        None => tracing::info!("wizard closed without a completed submission"),
    }
    Ok(())
}

/// Print the validator message for one value, or "ok"
pub(crate) fn cmd_validate(field: &str, value: &str) -> Result<()> {
    let Some(message) = validators::validate_named(field, value) else {
        let known: Vec<&str> = FormField::ALL.iter().map(|f| f.name()).collect();
        anyhow::bail!("Unknown field: {}. Known fields: {}", field, known.join(", "));
    };

    if message.is_empty() {
        println!("ok");
    } else {
        println!("{}", message);
    }
    Ok(())
}

/// Read an answers file keyed by wire names. `.json` is JSON, anything else TOML.
pub(crate) fn load_answers(path: &Path) -> Result<FormState, PartnerApplyError> {
    let contents = std::fs::read_to_string(path).map_err(|source| PartnerApplyError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let payload: ApplicationPayload = if is_json {
        serde_json::from_str(&contents).map_err(|e| e.to_string())
    } else {
        toml::from_str(&contents).map_err(|e| e.to_string())
    }
    .map_err(|reason| PartnerApplyError::AnswersFile {
        path: path.to_path_buf(),
        reason,
    })?;

    Ok(FormState::from_payload(&payload))
}

/// Walk an answers file through every step, then send it
pub(crate) async fn cmd_submit(config: &Config, answers: &Path, dry_run: bool) -> Result<()> {
    let mut form = load_answers(answers)?;
    if form.verification_token.is_none() {
        form.verification_token = config.verification.token.clone();
    }

    let mut wizard = ApplicationWizard::with_form(form);
    let mut view = ConsoleView::new();

    let reached = wizard.go_to_step(TOTAL_STEPS, &mut view);
    if reached != TOTAL_STEPS {
        eprint!("{}", view.error_report());
        return Err(PartnerApplyError::Validation { step: reached }.into());
    }

    let Some(payload) = wizard.begin_submission(&mut view) else {
        eprint!("{}", view.error_report());
        return Err(PartnerApplyError::Validation { step: TOTAL_STEPS }.into());
    };

    if dry_run {
        let json = serde_json::to_string_pretty(&payload).context("Failed to encode payload")?;
        println!("{}", json);
        return Ok(());
    }

    let client = HttpApplicationClient::new(&config.api).map_err(PartnerApplyError::from)?;
    let result = client.submit(&payload).await;
    let transport_error = result.as_ref().err().cloned();

    match wizard.finish_submission(result, &mut view) {
        SubmissionOutcome::Accepted { reference } => {
            match reference {
                Some(reference) => println!("Application submitted. Reference number: {}", reference),
                None => println!("Application submitted."),
            }
            Ok(())
        }
        SubmissionOutcome::Rejected { message, step } => {
            eprintln!("{}", message);
            eprint!("{}", view.error_report());
            Err(PartnerApplyError::Validation {
                step: step.unwrap_or(TOTAL_STEPS),
            }
            .into())
        }
        SubmissionOutcome::Unreachable(reason) => match transport_error {
            Some(e) => Err(PartnerApplyError::from(e).into()),
            None => anyhow::bail!("{}", reason),
        },
        SubmissionOutcome::Blocked => anyhow::bail!("submission was not started"),
    }
}

/// List the form layout
pub(crate) fn cmd_fields() -> Result<()> {
    for step in 1..=TOTAL_STEPS {
        println!("Step {} - {}", step, step_title(step));
        for field in step_fields(step) {
            let optional = if field.is_optional() { " (optional)" } else { "" };
            println!("  {:<20} {}{}", field.name(), field.label(), optional);
            if let FieldKind::Select(options) = field.kind() {
                println!("  {:<20}   one of: {}", "", options.join(" | "));
            }
        }
        for group in step_groups(step) {
            let kind = match group {
                ChoiceGroup::TargetSegments => "choose one or more",
                ChoiceGroup::CurrentEnglishTraining | ChoiceGroup::DemoCall => "choose one",
                ChoiceGroup::AgreeToTerms | ChoiceGroup::Authority => "must be true",
            };
            println!("  {:<20} {} ({})", group.name(), group.label(), kind);
            if !group.options().is_empty() {
                println!("  {:<20}   one of: {}", "", group.options().join(" | "));
            }
        }
        println!();
    }
    Ok(())
}

/// Write the default configuration to the system path
pub(crate) fn cmd_init(force: bool) -> Result<()> {
    let path = Config::system_config_path()
        .ok_or_else(|| PartnerApplyError::Config("no home directory".to_string()))?;

    if path.exists() && !force {
        anyhow::bail!(
            "Configuration already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    Config::default()
        .save(&path)
        .map_err(|e| PartnerApplyError::Config(format!("{e:#}")))?;
    println!("Configuration written to {}", path.display());
    Ok(())
}

/// Print the effective configuration with the token masked
pub(crate) fn cmd_config(config: &Config) -> Result<()> {
    let shown =
        toml::to_string_pretty(&config.redacted()).context("Failed to serialize config to TOML")?;
    println!("{}", shown);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ANSWERS_TOML: &str = r#"
firstName = "Jane"
email = "jane@example.com"
phone = "(555) 123-4567"
countryCode = "+1"
jobTitle = "Consultant"
linkedin = "https://linkedin.com/in/jane"
isWhatsapp = true
company = "Acme Medical College"
country = "India"
orgType = "Medical College"
studentVolume = "100-500"
currentEnglishTraining = "Yes"
partnershipType = "Campus Program Partner"
expectedTimeline = "1-3 months"
targetSegments = ["MBBS Students", "Nursing Students"]
monthlyVolume = "about 40 learners"
whyPartner = "We train hundreds of clinicians every year and need OET content."
agreeToTerms = true
authority = true
demoCall = "No"
"cf-turnstile-response" = "tok"
"#;

    #[test]
    fn test_load_answers_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("answers.toml");
        std::fs::write(&path, ANSWERS_TOML).unwrap();

        let form = load_answers(&path).unwrap();
        assert_eq!(form.value(FormField::Email), "jane@example.com");
        assert!(form.is_whatsapp);
        assert_eq!(form.target_segments.len(), 2);
        assert_eq!(form.demo_call.as_deref(), Some("No"));
        assert_eq!(form.verification_token.as_deref(), Some("tok"));
        assert_eq!(form.value(FormField::LastName), "");
    }

    #[test]
    fn test_load_answers_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("answers.JSON");
        std::fs::write(&path, r#"{"firstName": "Jane", "agreeToTerms": true}"#).unwrap();

        let form = load_answers(&path).unwrap();
        assert_eq!(form.value(FormField::FirstName), "Jane");
        assert!(form.agree_to_terms);
    }

    #[test]
    fn test_load_answers_errors() {
        let dir = TempDir::new().unwrap();
        let missing = load_answers(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, PartnerApplyError::Io { .. }));

        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let broken = load_answers(&path).unwrap_err();
        assert!(matches!(broken, PartnerApplyError::AnswersFile { .. }));
    }

    #[tokio::test]
    async fn test_submit_dry_run_stops_on_invalid_step() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("answers.toml");
        std::fs::write(&path, ANSWERS_TOML.replace("India", "")).unwrap();

        let err = cmd_submit(&Config::default(), &path, true)
            .await
            .unwrap_err();
        let err = err.downcast_ref::<PartnerApplyError>().unwrap();
        assert!(matches!(err, PartnerApplyError::Validation { step: 2 }));
    }

    #[tokio::test]
    async fn test_submit_dry_run_valid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("answers.toml");
        std::fs::write(&path, ANSWERS_TOML).unwrap();
        assert!(cmd_submit(&Config::default(), &path, true).await.is_ok());
    }

    #[tokio::test]
    async fn test_submit_uses_config_token() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("answers.toml");
        std::fs::write(
            &path,
            ANSWERS_TOML.replace("\"cf-turnstile-response\" = \"tok\"", ""),
        )
        .unwrap();

        let err = cmd_submit(&Config::default(), &path, true)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PartnerApplyError>(),
            Some(PartnerApplyError::Validation { step: 5 })
        ));

        let mut config = Config::default();
        config.verification.token = Some("from-config".to_string());
        assert!(cmd_submit(&config, &path, true).await.is_ok());
    }

    #[tokio::test]
    async fn test_submit_against_server() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/partnership-application")
            .with_status(200)
            .with_body(r#"{"success": true, "reference_number": "SP-99"}"#)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("answers.toml");
        std::fs::write(&path, ANSWERS_TOML).unwrap();

        let mut config = Config::default();
        config.api.base_url = server.url();
        cmd_submit(&config, &path, false).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_submit_rejected_by_server() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/partnership-application")
            .with_status(400)
            .with_body(r#"{"success": false, "errors": {"company": "Unknown institution."}}"#)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("answers.toml");
        std::fs::write(&path, ANSWERS_TOML).unwrap();

        let mut config = Config::default();
        config.api.base_url = server.url();
        let err = cmd_submit(&config, &path, false).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PartnerApplyError>(),
            Some(PartnerApplyError::Validation { step: 2 })
        ));
    }

    #[test]
    fn test_validate_unknown_field() {
        assert!(cmd_validate("favouriteColour", "blue").is_err());
        assert!(cmd_validate("email", "jane@example.com").is_ok());
    }
}
