use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::SurveyError;
use crate::options::Options;

const PAGE_FIELDS: &[&str] = &["name", "elements"];
const RADIO_FIELDS: &[&str] = &["type", "name", "items", "scale"];

/// A single screen of a survey: an ordered list of blocks plus page-level
/// options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Page {
    pub name: String,
    pub elements: Vec<Element>,
    #[serde(flatten)]
    #[ts(skip)]
    pub options: Options,
}

/// A block placed on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum Element {
    /// Static text, typically the questionnaire instruction.
    Info(InfoBlock),
    /// A group of single-choice items sharing one response scale.
    Radio(RadioBlock),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InfoBlock {
    pub name: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RadioBlock {
    pub name: String,
    pub items: Vec<String>,
    pub scale: Vec<String>,
    #[serde(flatten)]
    #[ts(skip)]
    pub options: Options,
}

/// One item of a [`RadioBlock`] as a standalone question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RadioQuestion {
    pub name: String,
    pub title: String,
    pub choices: Vec<String>,
    #[serde(flatten)]
    #[ts(skip)]
    pub options: Options,
}

/// Build a page from its blocks.
pub fn page(
    name: impl Into<String>,
    elements: impl IntoIterator<Item = Element>,
    options: Options,
) -> Page {
    Page {
        name: name.into(),
        elements: elements.into_iter().collect(),
        options,
    }
}

/// Build an instruction block.
pub fn info(name: impl Into<String>, text: impl Into<String>) -> Element {
    Element::Info(InfoBlock {
        name: name.into(),
        text: text.into(),
    })
}

/// Build a radio block. Items and scale labels are copied in order.
pub fn radio<I, S>(name: impl Into<String>, items: I, scale: S, options: Options) -> Element
where
    I: IntoIterator,
    I::Item: Into<String>,
    S: IntoIterator,
    S::Item: Into<String>,
{
    Element::Radio(RadioBlock {
        name: name.into(),
        items: items.into_iter().map(Into::into).collect(),
        scale: scale.into_iter().map(Into::into).collect(),
        options,
    })
}

impl Page {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn info_blocks(&self) -> impl Iterator<Item = &InfoBlock> {
        self.elements.iter().filter_map(|e| match e {
            Element::Info(block) => Some(block),
            _ => None,
        })
    }

    pub fn radio_blocks(&self) -> impl Iterator<Item = &RadioBlock> {
        self.elements.iter().filter_map(|e| match e {
            Element::Radio(block) => Some(block),
            _ => None,
        })
    }

    /// Append blocks, e.g. the unpacked contents of another page.
    pub fn extend(&mut self, elements: impl IntoIterator<Item = Element>) {
        self.elements.extend(elements);
    }

    /// Reject option keys that would shadow the page's or a block's own
    /// fields once flattened.
    pub fn validate(&self) -> Result<(), SurveyError> {
        self.options.check_reserved(&self.name, PAGE_FIELDS)?;
        for element in &self.elements {
            if let Element::Radio(block) = element {
                block.options.check_reserved(&block.name, RADIO_FIELDS)?;
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, SurveyError> {
        self.validate()?;
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Unpacks a page into its blocks. Page-level options are dropped.
impl IntoIterator for Page {
    type Item = Element;
    type IntoIter = std::vec::IntoIter<Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl Element {
    pub fn name(&self) -> &str {
        match self {
            Element::Info(block) => &block.name,
            Element::Radio(block) => &block.name,
        }
    }
}

impl RadioBlock {
    /// Split the block into one question per item, named `{name}_{n}` with
    /// `n` starting at 1. Block options are copied onto every question.
    pub fn questions(&self) -> Vec<RadioQuestion> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| RadioQuestion {
                name: format!("{}_{}", self.name, i + 1),
                title: item.clone(),
                choices: self.scale.clone(),
                options: self.options.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> Page {
        page(
            "demo_page",
            [
                info("demo_instruction", "Answer honestly."),
                radio("demo", ["I like tea.", "I like coffee."], ["No", "Yes"], Options::new()),
            ],
            Options::new(),
        )
    }

    #[test]
    fn accessors_split_blocks_by_kind() {
        let p = sample();
        assert_eq!(p.info_blocks().count(), 1);
        assert_eq!(p.radio_blocks().count(), 1);
        let names: Vec<_> = p.elements().iter().map(Element::name).collect();
        assert_eq!(names, ["demo_instruction", "demo"]);
    }

    #[test]
    fn questions_are_numbered_from_one() {
        let p = sample();
        let block = p.radio_blocks().next().unwrap();
        let questions = block.questions();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].name, "demo_1");
        assert_eq!(questions[1].name, "demo_2");
        assert_eq!(questions[1].title, "I like coffee.");
        assert_eq!(questions[1].choices, ["No", "Yes"]);
    }

    #[test]
    fn element_json_is_tagged() {
        let value = serde_json::to_value(info("x", "hello")).unwrap();
        assert_eq!(value, json!({"type": "info", "name": "x", "text": "hello"}));
    }

    #[test]
    fn page_json_roundtrips_with_options() {
        let mut p = sample();
        p.options.insert("visibleIf", "{consent} = true");
        let parsed: Page = serde_json::from_str(&p.to_json().unwrap()).unwrap();
        assert_eq!(parsed, p);
    }

    #[test]
    fn page_option_cannot_shadow_name() {
        let mut p = sample();
        p.options.insert("name", "other_page");
        let err = p.to_json().unwrap_err();
        assert!(matches!(
            err,
            SurveyError::ReservedOption { ref block, ref key } if block == "demo_page" && key == "name"
        ));
    }

    #[test]
    fn radio_option_cannot_shadow_type() {
        let p = page(
            "demo_page",
            [radio("demo", ["Item"], ["No", "Yes"], Options::new().with("type", "checkbox"))],
            Options::new(),
        );
        let err = p.to_json().unwrap_err();
        assert_eq!(
            err.to_string(),
            "option 'type' on 'demo' collides with a built-in field"
        );
    }
}
