use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// A named group of items whose responses are combined into one score.
/// Item numbers are 1-based, matching the published instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Subscale {
    pub id: String,
    pub name: String,
    pub items: Vec<usize>,
    /// Cronbach's alpha reported by the instrument's authors.
    pub reliability: Option<f64>,
}

/// How the instrument's authors combine item responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ScoringMethod {
    /// Mean of the (reverse-keyed where needed) items.
    Average,
    /// Sum of the (reverse-keyed where needed) items.
    Sum,
}

/// Bibliographic reference for the original publication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Citation {
    pub authors: String,
    pub year: u16,
    pub title: String,
    pub journal: String,
    pub volume: String,
    pub pages: String,
    pub doi: Option<String>,
}

impl std::fmt::Display for Citation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}). {}. {}, {}, {}.",
            self.authors, self.year, self.title, self.journal, self.volume, self.pages
        )?;
        if let Some(doi) = &self.doi {
            write!(f, " https://doi.org/{doi}")?;
        }
        Ok(())
    }
}

/// Serializable snapshot of everything known about a questionnaire.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionnaireInfo {
    pub id: String,
    pub name: String,
    pub default_name: String,
    pub description: String,
    pub citation: Citation,
    pub item_count: usize,
    pub items: Vec<String>,
    pub scale: Vec<String>,
    pub reverse_items: Vec<usize>,
    pub subscales: Vec<Subscale>,
    pub scoring: ScoringMethod,
    pub implemented_by: Option<String>,
}

/// A structural problem in a questionnaire's metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct MetadataError {
    pub questionnaire_id: String,
    pub item: usize,
    pub message: String,
}
