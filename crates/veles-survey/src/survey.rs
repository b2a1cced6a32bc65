use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::error::SurveyError;
use crate::options::Options;
use crate::page::Page;

/// An ordered collection of pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Survey {
    pub pages: Vec<Page>,
    #[serde(flatten)]
    #[ts(skip)]
    pub options: Options,
}

impl Survey {
    pub fn new(pages: Vec<Page>) -> Self {
        Self {
            pages,
            options: Options::new(),
        }
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.push(page);
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key, value);
        self
    }

    pub fn page(&self, name: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.name == name)
    }

    pub fn to_json(&self) -> Result<String, SurveyError> {
        self.options.check_reserved("survey", &["pages"])?;
        for page in &self.pages {
            page.validate()?;
        }
        Ok(serde_json::to_string_pretty(self)?)
    }
}
