use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionError {
    #[error("invalid lever class: {0}")]
    InvalidLeverClass(String),

    #[error("unknown matching category: {0}")]
    UnknownCategory(String),
}

//
// ─── LEVERS ────────────────────────────────────────────────────────────────────
//

/// Lever classification by where the fulcrum, effort and load sit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum LeverClass {
    /// Fulcrum between effort and load (interfixa).
    First,
    /// Load between fulcrum and effort (inter-resistente).
    Second,
    /// Effort between fulcrum and load (interpotente).
    Third,
}

impl LeverClass {
    pub const ALL: [LeverClass; 3] = [LeverClass::First, LeverClass::Second, LeverClass::Third];

    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            LeverClass::First => 1,
            LeverClass::Second => 2,
            LeverClass::Third => 3,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            LeverClass::First => "1ª classe (interfixa)",
            LeverClass::Second => "2ª classe (inter-resistente)",
            LeverClass::Third => "3ª classe (interpotente)",
        }
    }
}

impl TryFrom<u8> for LeverClass {
    type Error = QuestionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(LeverClass::First),
            2 => Ok(LeverClass::Second),
            3 => Ok(LeverClass::Third),
            other => Err(QuestionError::InvalidLeverClass(other.to_string())),
        }
    }
}

impl From<LeverClass> for u8 {
    fn from(value: LeverClass) -> Self {
        value.number()
    }
}

impl FromStr for LeverClass {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<u8>()
            .map_err(|_| QuestionError::InvalidLeverClass(trimmed.to_owned()))
            .and_then(LeverClass::try_from)
    }
}

impl fmt::Display for LeverClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeverQuestion {
    pub id: QuestionId,
    pub question: String,
    /// Display form of the expected classification.
    pub answer: String,
    pub class: LeverClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

//
// ─── WHO AM I ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyPartCategory {
    Joint,
    Muscle,
    Bone,
}

impl BodyPartCategory {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            BodyPartCategory::Joint => "Articulação",
            BodyPartCategory::Muscle => "Músculo",
            BodyPartCategory::Bone => "Osso",
        }
    }
}

/// A body part described by progressively more revealing hints.
///
/// Identity is the position in the bank; the first hint is always visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoAmIQuestion {
    pub answer: String,
    pub category: BodyPartCategory,
    pub hints: Vec<String>,
}

//
// ─── MOVEMENT ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementOption {
    pub text: String,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementQuestion {
    pub id: QuestionId,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub options: Vec<MovementOption>,
}

impl MovementQuestion {
    /// Text of the option flagged as correct.
    #[must_use]
    pub fn correct_option(&self) -> Option<&MovementOption> {
        self.options.iter().find(|option| option.correct)
    }
}

//
// ─── MATCHING ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchingCategory {
    MuscleAction,
    MovementMuscle,
    LeverExample,
    AnatomyDefinition,
}

impl MatchingCategory {
    pub const ALL: [MatchingCategory; 4] = [
        MatchingCategory::MuscleAction,
        MatchingCategory::MovementMuscle,
        MatchingCategory::LeverExample,
        MatchingCategory::AnatomyDefinition,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MatchingCategory::MuscleAction => "muscle-action",
            MatchingCategory::MovementMuscle => "movement-muscle",
            MatchingCategory::LeverExample => "lever-example",
            MatchingCategory::AnatomyDefinition => "anatomy-definition",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MatchingCategory::MuscleAction => "Músculo → Ação",
            MatchingCategory::MovementMuscle => "Movimento → Músculo",
            MatchingCategory::LeverExample => "Alavanca → Exemplo",
            MatchingCategory::AnatomyDefinition => "Anatomia → Definição",
        }
    }
}

impl fmt::Display for MatchingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchingCategory {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        MatchingCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == wanted)
            .ok_or(QuestionError::UnknownCategory(wanted))
    }
}

/// Left term and the right term it belongs with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingPair {
    pub id: QuestionId,
    pub left: String,
    pub right: String,
    pub category: MatchingCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lever_class_parses_from_number_text() {
        assert_eq!("2".parse::<LeverClass>().unwrap(), LeverClass::Second);
        assert!(matches!(
            "4".parse::<LeverClass>(),
            Err(QuestionError::InvalidLeverClass(_))
        ));
        assert!("x".parse::<LeverClass>().is_err());
    }

    #[test]
    fn lever_question_deserializes_class_from_integer() {
        let json = r#"{"id": 7, "question": "Tesoura?", "answer": "1ª classe", "class": 1}"#;
        let question: LeverQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(question.class, LeverClass::First);
        assert_eq!(question.id, QuestionId::new(7));
        assert!(question.explanation.is_none());

        let bad = r#"{"id": 7, "question": "?", "answer": "?", "class": 9}"#;
        assert!(serde_json::from_str::<LeverQuestion>(bad).is_err());
    }

    #[test]
    fn matching_category_uses_kebab_case_identifiers() {
        let pair: MatchingPair = serde_json::from_str(
            r#"{"id": 1, "left": "Fulcro", "right": "Ponto de apoio", "category": "anatomy-definition"}"#,
        )
        .unwrap();
        assert_eq!(pair.category, MatchingCategory::AnatomyDefinition);
        assert_eq!(
            "lever-example".parse::<MatchingCategory>().unwrap(),
            MatchingCategory::LeverExample
        );
    }

    #[test]
    fn movement_question_finds_correct_option() {
        let question = MovementQuestion {
            id: QuestionId::new(1),
            title: "Agachamento".into(),
            description: "?".into(),
            image_url: "img".into(),
            options: vec![
                MovementOption {
                    text: "A".into(),
                    correct: false,
                },
                MovementOption {
                    text: "B".into(),
                    correct: true,
                },
            ],
        };
        assert_eq!(question.correct_option().unwrap().text, "B");
    }
}
