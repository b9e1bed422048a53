//! Subcommand implementations

use crate::prompt;
use anyhow::Context;
use form_client::{ClientConfig, SchemaClient};
use form_schema::{SchemaLoader, User};
use form_wizard::{FormState, LOAD_FAILED_MESSAGE, Notice, Session, Submission, Wizard};
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

pub async fn register(config: &ClientConfig, roll_number: &str, name: &str) -> anyhow::Result<ExitCode> {
    let client = SchemaClient::new(config)?;
    let user = User::new(roll_number, name);

    match Session::login(&client, user).await {
        Ok((_, notice)) => {
            println!("{notice}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", e.notice());
            Ok(ExitCode::FAILURE)
        }
    }
}

pub async fn fetch(
    config: &ClientConfig,
    roll_number: &str,
    output: Option<&Path>,
) -> anyhow::Result<ExitCode> {
    let client = SchemaClient::new(config)?;

    let schema = match client.get_form(roll_number).await {
        Ok(schema) => schema,
        Err(e) => {
            tracing::debug!("fetch failed: {e}");
            eprintln!("{}", Notice::error(LOAD_FAILED_MESSAGE));
            return Ok(ExitCode::FAILURE);
        }
    };

    let json = serde_json::to_string_pretty(&schema)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("cannot write {}", path.display()))?;
            tracing::info!("Wrote schema to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(ExitCode::SUCCESS)
}

/// Runs the submit flow from the first section over saved values
pub fn check(schema_path: &Path, values_path: &Path) -> anyhow::Result<ExitCode> {
    let loader = SchemaLoader::new();
    let schema = loader
        .load_from_file(schema_path)
        .with_context(|| format!("cannot load schema {}", schema_path.display()))?;
    let values = loader
        .load_values_from_file(values_path)
        .with_context(|| format!("cannot load values {}", values_path.display()))?;

    tracing::info!("Checking {} against {}", values_path.display(), schema_path.display());

    let mut state = FormState::new(schema);
    state.set_values(values)?;

    let submission = state.submit()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &submission {
        Submission::Complete(values) => {
            writeln!(out, "Form is complete ({} values)", values.len())?;
            Ok(ExitCode::SUCCESS)
        }
        Submission::CurrentSectionInvalid { .. } | Submission::SectionIncomplete { .. } => {
            if let Some(notice) = submission.notice() {
                writeln!(out, "{notice}")?;
            }
            write_section_errors(&mut out, &state)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

pub async fn fill(config: &ClientConfig, roll_number: &str, name: &str) -> anyhow::Result<ExitCode> {
    let client = SchemaClient::new(config)?;

    let session = match Session::login(&client, User::new(roll_number, name)).await {
        Ok((session, notice)) => {
            println!("{notice}");
            session
        }
        Err(e) => {
            eprintln!("{}", e.notice());
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut wizard = Wizard::new(client, session);
    println!("Loading form...");
    if let Err(e) = wizard.load().await {
        eprintln!("{}", e.notice());
        return Ok(ExitCode::FAILURE);
    }

    let state = wizard.state_mut()?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let submitted = prompt::run(state, stdin.lock(), stdout.lock())?;

    Ok(if submitted.is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Lists the active section's field errors with their labels
fn write_section_errors(out: &mut impl Write, state: &FormState) -> std::io::Result<()> {
    let Some(section) = state.current_section() else {
        return Ok(());
    };
    writeln!(out, "Section \"{}\" is incomplete:", section.title)?;
    for field in &section.fields {
        if let Some(message) = state.errors().get(&field.field_id) {
            writeln!(out, "  - {} ({}): {}", field.label, field.field_id, message)?;
        }
    }
    Ok(())
}

