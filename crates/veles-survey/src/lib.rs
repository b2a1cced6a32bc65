//! veles-survey
//!
//! Declarative survey data model. Pages hold instruction and question
//! blocks; nothing here renders, validates, or scores anything.

pub mod error;
pub mod options;
pub mod page;
pub mod survey;

pub use error::SurveyError;
pub use options::Options;
pub use page::{Element, InfoBlock, Page, RadioBlock, RadioQuestion, info, page, radio};
pub use survey::Survey;
