use serde_json::Value;
use veles_questionnaires::{QuestionnaireOptions, all_questionnaires, require_questionnaire};
use veles_survey::Options;

use crate::config::VelesConfig;

/// Parse a `KEY=VALUE` option. The value is read as JSON when it parses,
/// otherwise it is kept as a plain string.
pub fn parse_option(arg: &str) -> Result<(String, Value), String> {
    let (key, raw) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{arg}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty option name in '{arg}'"));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

pub fn list() -> String {
    all_questionnaires()
        .iter()
        .map(|q| format!("{}\t{}", q.id(), q.name()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn page(
    config: &VelesConfig,
    id: &str,
    overrides: QuestionnaireOptions,
) -> eyre::Result<String> {
    let questionnaire = require_questionnaire(id)?;
    let options = match config.defaults_for(questionnaire.id()) {
        Some(defaults) => defaults.apply(overrides),
        None => overrides,
    };
    tracing::info!(
        questionnaire = questionnaire.id(),
        question_options = options.question_options.len(),
        page_options = options.page_options.len(),
        "building page"
    );
    Ok(questionnaire.page(options).to_json()?)
}

pub fn info(id: &str) -> eyre::Result<String> {
    let questionnaire = require_questionnaire(id)?;
    questionnaire.validate_metadata()?;
    Ok(serde_json::to_string_pretty(&questionnaire.metadata())?)
}

pub fn overrides(
    name: Option<String>,
    instruction: Option<String>,
    question_options: Vec<(String, Value)>,
    page_options: Vec<(String, Value)>,
) -> QuestionnaireOptions {
    QuestionnaireOptions {
        name,
        instruction,
        question_options: question_options.into_iter().collect::<Options>(),
        page_options: page_options.into_iter().collect::<Options>(),
    }
}
