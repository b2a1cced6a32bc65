use veles_survey::Options;

/// Caller overrides for building a questionnaire page.
///
/// Every field is optional. `name` falls back to the questionnaire's
/// abbreviation and `instruction` to its published instruction text. The two
/// option maps are passed through untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionnaireOptions {
    pub name: Option<String>,
    pub instruction: Option<String>,
    pub question_options: Options,
    pub page_options: Options,
}

impl QuestionnaireOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    pub fn question_options(mut self, options: Options) -> Self {
        self.question_options = options;
        self
    }

    pub fn page_options(mut self, options: Options) -> Self {
        self.page_options = options;
        self
    }
}
