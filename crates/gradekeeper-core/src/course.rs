//! Course-level aggregation: weighted component grades and completion status.

use serde::{Deserialize, Serialize};

use crate::component::{
    actual_grade, maximum_possible_grade, process_component, projected_grade, ProcessedComponent,
};
use crate::model::{Component, ComponentGrade, Course, Grade};
use crate::scale::GradeScale;
use crate::selection::active_subcomponents;

/// Letter reported for a course with no components (maximum and projected).
pub const NO_COMPONENTS_LETTER: &str = "Z";

/// Best achievable course grade if every ungraded item scores perfectly.
pub fn maximum_possible_course_grade(course: &Course, scale: &GradeScale) -> Grade {
    if course.components.is_empty() {
        return Grade::unknown(NO_COMPONENTS_LETTER);
    }
    let numerical = weighted_sum(&course.components, maximum_possible_grade);
    Grade {
        letter: scale.resolve(numerical),
        numerical,
        is_unknown: false,
    }
}

/// Course grade so far, with every ungraded item counting as zero.
pub fn actual_course_grade(course: &Course, scale: &GradeScale) -> Grade {
    if course.components.is_empty() {
        return Grade::unknown("");
    }
    let numerical = weighted_sum(&course.components, actual_grade);
    Grade {
        letter: scale.resolve(numerical),
        numerical,
        is_unknown: false,
    }
}

/// Expected final grade, extrapolated from the components that have data.
///
/// The weighted sum of projected component grades is renormalised by the
/// total weight of components with at least one active item. When no
/// component has any, the divisor falls back to `1.0`, which reports the
/// (usually zero) weighted sum unscaled.
pub fn projected_course_grade(course: &Course, scale: &GradeScale) -> Grade {
    if course.components.is_empty() {
        return Grade {
            numerical: 0.0,
            letter: NO_COMPONENTS_LETTER.to_string(),
            is_unknown: false,
        };
    }
    let weighted = weighted_sum(&course.components, projected_grade);
    let numerical = weighted / completed_weighting(&course.components);
    Grade {
        letter: scale.resolve(numerical),
        numerical,
        is_unknown: false,
    }
}

/// Sum of weights of components that have at least one active item, or
/// `1.0` if none do.
pub fn completed_weighting(components: &[Component]) -> f64 {
    let weights: Vec<f64> = components
        .iter()
        .filter(|c| !active_subcomponents(c).is_empty())
        .map(|c| c.subject_weighting)
        .collect();
    if weights.is_empty() {
        1.0
    } else {
        weights.iter().sum()
    }
}

/// `true` when every component is fully graded: its actual grade is neither
/// unknown nor provisional.
pub fn is_course_completed(course: &Course) -> bool {
    course.components.iter().all(is_component_finished)
}

/// Components whose actual grade is still provisional or unknown.
pub fn components_remaining(course: &Course) -> Vec<Component> {
    course
        .components
        .iter()
        .filter(|c| !is_component_finished(c))
        .cloned()
        .collect()
}

fn is_component_finished(component: &Component) -> bool {
    let grade = actual_grade(component);
    !grade.is_unknown && !grade.is_average
}

fn weighted_sum(components: &[Component], grade: fn(&Component) -> ComponentGrade) -> f64 {
    components
        .iter()
        .map(|c| grade(c).value * c.subject_weighting)
        .sum()
}

/// The three course-level grades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseGrades {
    pub maximum_possible: Grade,
    pub actual: Grade,
    pub projected: Grade,
}

/// Completion status of a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseStatus {
    pub is_completed: bool,
    pub components_remaining: Vec<Component>,
}

/// A raw course together with everything derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedCourse {
    pub course: Course,
    pub grades: CourseGrades,
    pub status: CourseStatus,
    /// Per-component grades, in the course's component order.
    pub components: Vec<ProcessedComponent>,
}

impl ProcessedCourse {
    /// Processed grades for the component with `component_id`.
    pub fn component(&self, component_id: &str) -> Option<&ProcessedComponent> {
        self.components
            .iter()
            .find(|c| c.component_id == component_id)
    }
}

/// Derive grades and status for one course.
pub fn process_course(course: &Course, scale: &GradeScale) -> ProcessedCourse {
    ProcessedCourse {
        course: course.clone(),
        grades: CourseGrades {
            maximum_possible: maximum_possible_course_grade(course, scale),
            actual: actual_course_grade(course, scale),
            projected: projected_course_grade(course, scale),
        },
        status: CourseStatus {
            is_completed: is_course_completed(course),
            components_remaining: components_remaining(course),
        },
        components: course.components.iter().map(process_component).collect(),
    }
}
