//! TIPI: Ten-Item Personality Inventory.
//!
//! A 10-item measure of the Big-Five dimensions for settings where very
//! short measures are needed. Each item is a pair of trait adjectives rated
//! on a 7-point agreement scale.
//!
//! Scoring is the average of the two items of each subscale, after
//! reverse-keying items 2, 4, 6, 8 and 10:
//!
//! | Subscale | Items | α |
//! |---|---|---|
//! | Extraversion | 1, 6R | .68 |
//! | Agreeableness | 2R, 7 | .40 |
//! | Conscientiousness | 3, 8R | .50 |
//! | Emotional Stability | 4R, 9 | .73 |
//! | Openness to Experiences | 5, 10R | .45 |

use std::sync::LazyLock;

use veles_survey::Page;

use crate::metadata::{Citation, ScoringMethod, Subscale};
use crate::{Questionnaire, QuestionnaireOptions};

pub const DEFAULT_NAME: &str = "TIPI";

pub const INSTRUCTION: &str = "Here are a number of personality traits that may or may not apply to you. \
Please write a number next to each statement to indicate the extent to which you agree or disagree \
with that statement. You should rate the extent to which the pair of traits applies to you, even if \
one characteristic applies more strongly than the other.\n\n<b>I see myself as:</b>";

pub const ITEMS: [&str; 10] = [
    "Extraverted, enthusiastic.",
    "Critical, quarrelsome.",
    "Dependable, self-disciplined.",
    "Anxious, easily upset.",
    "Open to new experiences, complex.",
    "Reserved, quiet.",
    "Sympathetic, warm.",
    "Disorganized, careless.",
    "Calm, emotionally stable.",
    "Conventional, uncreative.",
];

pub const SCALE: [&str; 7] = [
    "1 – Disagree strongly",
    "2 – Disagree moderately",
    "3 – Disagree a little",
    "4 – Neither agree nor disagree",
    "5 – Agree a little",
    "6 – Agree moderately",
    "7 – Agree strongly",
];

pub const REVERSE_ITEMS: [usize; 5] = [2, 4, 6, 8, 10];

pub struct Tipi;

/// Build the TIPI page.
///
/// With default options this is a page named `TIPI_page` holding the
/// standard instruction and a `TIPI` radio block of 10 items on the 7-point
/// scale.
pub fn tipi(options: QuestionnaireOptions) -> Page {
    Tipi.page(options)
}

impl Questionnaire for Tipi {
    fn id(&self) -> &str {
        "tipi"
    }

    fn name(&self) -> &str {
        "Ten-Item Personality Inventory"
    }

    fn default_name(&self) -> &str {
        DEFAULT_NAME
    }

    fn description(&self) -> &str {
        "10-item measure of the Big-Five dimensions for situations where very short measures \
         are needed, personality is not the primary topic of interest, or researchers can \
         tolerate the somewhat diminished psychometric properties associated with very brief \
         measures."
    }

    fn citation(&self) -> &Citation {
        static CITATION: LazyLock<Citation> = LazyLock::new(|| Citation {
            authors: "Gosling, S. D., Rentfrow, P. J., & Swann, W. B.".to_string(),
            year: 2003,
            title: "A very brief measure of the Big-Five personality domains".to_string(),
            journal: "Journal of Research in Personality".to_string(),
            volume: "37(6)".to_string(),
            pages: "504–528".to_string(),
            doi: Some("10.1016/S0092-6566(03)00046-1".to_string()),
        });
        &CITATION
    }

    fn default_instruction(&self) -> &str {
        INSTRUCTION
    }

    fn items(&self) -> &[&'static str] {
        &ITEMS
    }

    fn scale(&self) -> &[&'static str] {
        &SCALE
    }

    fn reverse_items(&self) -> &[usize] {
        &REVERSE_ITEMS
    }

    fn subscales(&self) -> &[Subscale] {
        static SUBSCALES: LazyLock<Vec<Subscale>> = LazyLock::new(|| {
            vec![
                subscale("extraversion", "Extraversion", [1, 6], 0.68),
                subscale("agreeableness", "Agreeableness", [2, 7], 0.40),
                subscale("conscientiousness", "Conscientiousness", [3, 8], 0.50),
                subscale("emotional_stability", "Emotional Stability", [4, 9], 0.73),
                subscale("openness", "Openness to Experiences", [5, 10], 0.45),
            ]
        });
        &SUBSCALES
    }

    fn scoring(&self) -> ScoringMethod {
        ScoringMethod::Average
    }

    fn implemented_by(&self) -> Option<&str> {
        Some("Julia Jankowska (University of Wrocław)")
    }
}

fn subscale(id: &str, name: &str, items: [usize; 2], reliability: f64) -> Subscale {
    Subscale {
        id: id.to_string(),
        name: name.to_string(),
        items: items.to_vec(),
        reliability: Some(reliability),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_is_consistent() {
        assert!(Tipi.metadata_errors().is_empty());
        assert!(Tipi.validate_metadata().is_ok());
    }

    #[test]
    fn every_item_is_in_exactly_one_subscale() {
        let mut covered: Vec<usize> = Tipi.subscales().iter().flat_map(|s| s.items.clone()).collect();
        covered.sort_unstable();
        assert_eq!(covered, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn each_subscale_has_one_reversed_item() {
        for subscale in Tipi.subscales() {
            let reversed = subscale
                .items
                .iter()
                .filter(|i| REVERSE_ITEMS.contains(i))
                .count();
            assert_eq!(reversed, 1, "{}", subscale.name);
        }
    }
}
