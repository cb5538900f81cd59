//! Core data model types for gradekeeper.
//!
//! Raw entities (`StudyBlock` → `Course` → `Component` → `Subcomponent`) are
//! immutable snapshots handed to the engine by whatever owns persistence.
//! `Grade` and `ComponentGrade` are the derived value objects it produces.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::scale::GradeScale;

/// One individually scored item, e.g. "Assignment 3".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcomponent {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Score achieved as a fraction of the maximum, in [0, 1].
    pub grade_value_percentage: f64,
    /// Whether this item has been graded yet.
    pub is_completed: bool,
}

/// A graded category within a course, e.g. "Quizzes".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Unique identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Share of the course grade, in [0, 1].
    pub subject_weighting: f64,
    /// How many of the lowest-scoring items are discarded.
    #[serde(default)]
    pub number_of_subcomponents_to_drop_lowest: usize,
    /// The scored items. Order does not affect any calculation.
    #[serde(default)]
    pub subcomponents: Vec<Subcomponent>,
}

impl Component {
    /// Returns `true` if any item in this component is still ungraded.
    pub fn has_incomplete(&self) -> bool {
        self.subcomponents.iter().any(|s| !s.is_completed)
    }

    /// Label used for individual items, e.g. "Quiz" for a "Quizzes" component.
    pub fn item_label(&self) -> &str {
        singular_label(&self.name).unwrap_or(self.name.as_str())
    }
}

/// One academic course within a study block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique identifier.
    pub id: String,
    /// The owning study block.
    #[serde(default)]
    pub study_block_id: String,
    /// Subject prefix, e.g. "COMP".
    pub course_code_name: String,
    /// Course number, e.g. "102".
    pub course_code_number: String,
    /// Full course title.
    #[serde(default)]
    pub long_name: String,
    /// Display colour as `#rrggbb`.
    #[serde(default = "default_color")]
    pub color: String,
    /// Graded components.
    #[serde(default)]
    pub components: Vec<Component>,
}

impl Course {
    /// Short display code, e.g. "COMP 102".
    pub fn code(&self) -> String {
        format!("{} {}", self.course_code_name, self.course_code_number)
            .trim()
            .to_string()
    }
}

/// A study period (trimester, semester) grouping courses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyBlock {
    /// Unique identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// First day of the block.
    pub start_date: NaiveDate,
    /// Last day of the block.
    pub end_date: NaiveDate,
    /// Courses taken in this block.
    #[serde(default)]
    pub courses: Vec<Course>,
}

/// Everything a single account owns: its grade scale and study blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Scale used to turn numeric grades into letters.
    #[serde(default)]
    pub grade_scale: GradeScale,
    /// The account's study blocks.
    #[serde(default)]
    pub study_blocks: Vec<StudyBlock>,
}

/// A derived course- or block-level grade.
///
/// When `is_unknown` is set there was no data to grade and `numerical` is a
/// placeholder `0.0`, not a score of zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub numerical: f64,
    pub letter: String,
    pub is_unknown: bool,
}

impl Grade {
    /// A grade with no usable data behind it.
    pub fn unknown(letter: &str) -> Self {
        Self {
            numerical: 0.0,
            letter: letter.to_string(),
            is_unknown: true,
        }
    }
}

/// A derived component-level grade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentGrade {
    /// Grade as a fraction; `0.0` when unknown.
    pub value: f64,
    /// Provisional: some items in the component are still ungraded.
    pub is_average: bool,
    /// No eligible items exist yet.
    pub is_unknown: bool,
}

impl ComponentGrade {
    pub const UNKNOWN: ComponentGrade = ComponentGrade {
        value: 0.0,
        is_average: false,
        is_unknown: true,
    };
}

/// Singular item label for a plural component name, e.g. "Labs" → "Lab".
pub fn singular_label(plural: &str) -> Option<&'static str> {
    match plural {
        "Assignments" => Some("Assignment"),
        "Labs" => Some("Lab"),
        "Lectures" => Some("Lecture"),
        "Projects" => Some("Project"),
        "Quizzes" => Some("Quiz"),
        "Tests" => Some("Test"),
        "Exams" => Some("Exam"),
        _ => None,
    }
}

/// Slate grey, used when a course has no colour of its own.
pub fn default_color() -> String {
    "#64748b".to_string()
}
