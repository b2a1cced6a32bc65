//! veles-questionnaires
//!
//! Standardized psychological questionnaires as ready-made survey pages.
//! Pure content: item wording, response scales, instructions, and the
//! published keying and subscale structure. Responses are never scored here.

pub mod error;
pub mod metadata;
pub mod options;
pub mod questionnaires;

use veles_survey::{Page, info, page, radio};

use error::QuestionnaireError;
use metadata::{Citation, MetadataError, QuestionnaireInfo, ScoringMethod, Subscale};

pub use options::QuestionnaireOptions;
pub use questionnaires::tipi::tipi;

/// Trait implemented by each questionnaire.
pub trait Questionnaire: Send + Sync {
    /// Unique identifier (e.g., "tipi").
    fn id(&self) -> &str;

    /// Full published name.
    fn name(&self) -> &str;

    /// Base name for generated pages and questions (e.g., "TIPI").
    fn default_name(&self) -> &str;

    fn description(&self) -> &str;

    fn citation(&self) -> &Citation;

    /// Instruction shown when the caller does not supply one.
    fn default_instruction(&self) -> &str;

    /// Item statements in published order.
    fn items(&self) -> &[&'static str];

    /// Response scale labels, lowest first.
    fn scale(&self) -> &[&'static str];

    /// 1-based numbers of reverse-keyed items.
    fn reverse_items(&self) -> &[usize];

    fn subscales(&self) -> &[Subscale];

    fn scoring(&self) -> ScoringMethod;

    fn implemented_by(&self) -> Option<&str> {
        None
    }

    /// Build the questionnaire page: one instruction block followed by one
    /// radio block with every item on the shared scale.
    ///
    /// The page is named `{name}_page`, the instruction `{name}_instruction`
    /// and the radio block `{name}`.
    fn page(&self, options: QuestionnaireOptions) -> Page {
        let QuestionnaireOptions {
            name,
            instruction,
            question_options,
            page_options,
        } = options;
        let name = name.unwrap_or_else(|| self.default_name().to_string());
        let instruction = instruction.unwrap_or_else(|| self.default_instruction().to_string());

        page(
            format!("{name}_page"),
            [
                info(format!("{name}_instruction"), instruction),
                radio(
                    name.as_str(),
                    self.items().iter().copied(),
                    self.scale().iter().copied(),
                    question_options,
                ),
            ],
            page_options,
        )
    }

    /// Check that reverse items and subscales only refer to existing items
    /// and that no item sits in two subscales.
    fn metadata_errors(&self) -> Vec<MetadataError> {
        let item_count = self.items().len();
        let mut errors = Vec::new();
        let mut push = |item: usize, message: String| {
            errors.push(MetadataError {
                questionnaire_id: self.id().to_string(),
                item,
                message,
            });
        };

        for &item in self.reverse_items() {
            if item == 0 || item > item_count {
                push(
                    item,
                    format!("{}: reverse item {item} is outside 1..={item_count}", self.name()),
                );
            }
        }

        let mut seen: Vec<Option<&str>> = vec![None; item_count];
        for subscale in self.subscales() {
            for &item in &subscale.items {
                if item == 0 || item > item_count {
                    push(
                        item,
                        format!(
                            "{}: {} lists item {item} outside 1..={item_count}",
                            self.name(),
                            subscale.name
                        ),
                    );
                    continue;
                }
                if let Some(other) = seen[item - 1] {
                    push(
                        item,
                        format!(
                            "{}: item {item} belongs to both {other} and {}",
                            self.name(),
                            subscale.name
                        ),
                    );
                } else {
                    seen[item - 1] = Some(subscale.name.as_str());
                }
            }
        }
        errors
    }

    /// Fail on the first metadata problem.
    fn validate_metadata(&self) -> Result<(), QuestionnaireError> {
        match self.metadata_errors().into_iter().next() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    /// Serializable snapshot for listing or exporting.
    fn metadata(&self) -> QuestionnaireInfo {
        QuestionnaireInfo {
            id: self.id().to_string(),
            name: self.name().to_string(),
            default_name: self.default_name().to_string(),
            description: self.description().to_string(),
            citation: self.citation().clone(),
            item_count: self.items().len(),
            items: self.items().iter().map(|s| s.to_string()).collect(),
            scale: self.scale().iter().map(|s| s.to_string()).collect(),
            reverse_items: self.reverse_items().to_vec(),
            subscales: self.subscales().to_vec(),
            scoring: self.scoring(),
            implemented_by: self.implemented_by().map(str::to_string),
        }
    }
}

/// Return all registered questionnaires.
pub fn all_questionnaires() -> Vec<Box<dyn Questionnaire>> {
    vec![Box::new(questionnaires::tipi::Tipi)]
}

/// Look up a questionnaire by ID, ignoring case.
pub fn get_questionnaire(id: &str) -> Option<Box<dyn Questionnaire>> {
    all_questionnaires()
        .into_iter()
        .find(|q| q.id().eq_ignore_ascii_case(id))
}

/// Like [`get_questionnaire`], but an unknown ID is an error.
pub fn require_questionnaire(id: &str) -> Result<Box<dyn Questionnaire>, QuestionnaireError> {
    get_questionnaire(id).ok_or_else(|| QuestionnaireError::UnknownQuestionnaire(id.to_string()))
}
