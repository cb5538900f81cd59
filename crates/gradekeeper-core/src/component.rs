//! Component-level grades: actual, maximum possible, and projected.
//!
//! Actual and maximum divide by the component's nominal slot count
//! (`subcomponents - drop`), so ungraded items pull the grade down.
//! Projected divides by the number of graded items that survived the drop,
//! extrapolating from what exists.

use serde::{Deserialize, Serialize};

use crate::model::{Component, ComponentGrade};
use crate::selection::{active_subcomponents, all_subcomponents_sorted};

/// Grade counting every ungraded slot as zero.
pub fn actual_grade(component: &Component) -> ComponentGrade {
    let active = active_subcomponents(component);
    if active.is_empty() {
        return ComponentGrade::UNKNOWN;
    }
    let total: f64 = active.iter().map(|s| s.grade_value_percentage).sum();
    ComponentGrade {
        value: total / nominal_slots(component),
        is_average: component.has_incomplete(),
        is_unknown: false,
    }
}

/// Grade counting every ungraded slot as a perfect score.
pub fn maximum_possible_grade(component: &Component) -> ComponentGrade {
    let kept = all_subcomponents_sorted(component);
    if kept.is_empty() {
        return ComponentGrade::UNKNOWN;
    }
    let total: f64 = kept
        .iter()
        .map(|s| {
            if s.is_completed {
                s.grade_value_percentage
            } else {
                1.0
            }
        })
        .sum();
    ComponentGrade {
        value: total / nominal_slots(component),
        is_average: component.has_incomplete(),
        is_unknown: false,
    }
}

/// Mean of the graded items that survived the drop.
pub fn projected_grade(component: &Component) -> ComponentGrade {
    let active = active_subcomponents(component);
    if active.is_empty() {
        return ComponentGrade::UNKNOWN;
    }
    let total: f64 = active.iter().map(|s| s.grade_value_percentage).sum();
    ComponentGrade {
        value: total / active.len() as f64,
        is_average: component.has_incomplete(),
        is_unknown: false,
    }
}

/// All three grades for one component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentGrades {
    pub actual: ComponentGrade,
    pub maximum_possible: ComponentGrade,
    pub projected: ComponentGrade,
}

/// A component's id and name alongside its derived grades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedComponent {
    pub component_id: String,
    pub name: String,
    pub subject_weighting: f64,
    pub grades: ComponentGrades,
}

/// Derive every grade for `component`.
pub fn process_component(component: &Component) -> ProcessedComponent {
    ProcessedComponent {
        component_id: component.id.clone(),
        name: component.name.clone(),
        subject_weighting: component.subject_weighting,
        grades: ComponentGrades {
            actual: actual_grade(component),
            maximum_possible: maximum_possible_grade(component),
            projected: projected_grade(component),
        },
    }
}

/// Only called with a non-empty selection, which implies more items than drops.
fn nominal_slots(component: &Component) -> f64 {
    (component.subcomponents.len() - component.number_of_subcomponents_to_drop_lowest) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Subcomponent;

    fn sub(pct: f64, done: bool) -> Subcomponent {
        Subcomponent {
            id: format!("s-{pct}-{done}"),
            name: String::new(),
            grade_value_percentage: pct,
            is_completed: done,
        }
    }

    fn component(drop: usize, subs: Vec<Subcomponent>) -> Component {
        Component {
            id: "comp".into(),
            name: "Assignments".into(),
            subject_weighting: 0.5,
            number_of_subcomponents_to_drop_lowest: drop,
            subcomponents: subs,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_component_is_unknown_everywhere() {
        let c = component(0, vec![]);
        assert!(actual_grade(&c).is_unknown);
        assert!(maximum_possible_grade(&c).is_unknown);
        assert!(projected_grade(&c).is_unknown);
        assert_eq!(actual_grade(&c).value, 0.0);
    }

    #[test]
    fn drop_count_covering_everything_is_unknown() {
        let c = component(2, vec![sub(0.8, true), sub(0.4, true)]);
        assert_eq!(actual_grade(&c), ComponentGrade::UNKNOWN);
        assert_eq!(maximum_possible_grade(&c), ComponentGrade::UNKNOWN);
        assert_eq!(projected_grade(&c), ComponentGrade::UNKNOWN);

        let c = component(4, vec![sub(0.8, true)]);
        assert!(actual_grade(&c).is_unknown);
        assert!(maximum_possible_grade(&c).is_unknown);
    }

    #[test]
    fn drop_lowest_with_pending_item() {
        // [0.9 done, 0.6 done, pending], drop 1.
        let c = component(1, vec![sub(0.9, true), sub(0.6, true), sub(0.0, false)]);

        let projected = projected_grade(&c);
        assert!(approx(projected.value, 0.9));
        assert!(projected.is_average);

        let actual = actual_grade(&c);
        assert!(approx(actual.value, 0.45));
        assert!(actual.is_average);

        // The pending item stores 0.0, ranks last and is the one dropped,
        // leaving 0.9 + 0.6 over two slots.
        let max = maximum_possible_grade(&c);
        assert!(approx(max.value, 0.75));
        assert!(max.is_average);
    }

    #[test]
    fn pending_item_with_high_stored_value_counts_as_perfect() {
        // Stored 0.95 ranks first, so 0.6 is dropped and the pending item
        // contributes 1.0 to the maximum.
        let c = component(1, vec![sub(0.9, true), sub(0.6, true), sub(0.95, false)]);
        let max = maximum_possible_grade(&c);
        assert!(approx(max.value, 0.95));
    }

    #[test]
    fn pending_only_component() {
        let c = component(0, vec![sub(0.0, false), sub(0.0, false)]);
        assert!(actual_grade(&c).is_unknown);
        assert!(projected_grade(&c).is_unknown);
        let max = maximum_possible_grade(&c);
        assert!(!max.is_unknown);
        assert!(approx(max.value, 1.0));
        assert!(max.is_average);
    }

    #[test]
    fn fully_graded_component_agrees_across_grades() {
        let c = component(0, vec![sub(0.8, true), sub(0.6, true)]);
        let actual = actual_grade(&c);
        assert!(approx(actual.value, 0.7));
        assert!(!actual.is_average);
        assert_eq!(actual, maximum_possible_grade(&c));
        assert_eq!(actual, projected_grade(&c));
    }

    #[test]
    fn actual_never_exceeds_maximum() {
        let scores = [0.0, 0.25, 0.5, 0.75, 1.0];
        for &a in &scores {
            for &b in &scores {
                for drop in 0..3 {
                    for pending in [false, true] {
                        let c = component(
                            drop,
                            vec![sub(a, true), sub(b, true), sub(a * b, !pending)],
                        );
                        let actual = actual_grade(&c);
                        let max = maximum_possible_grade(&c);
                        if !actual.is_unknown {
                            assert!(
                                actual.value <= max.value + 1e-12,
                                "actual {} > max {} for {a} {b} drop {drop} pending {pending}",
                                actual.value,
                                max.value
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn processed_component_carries_identity() {
        let c = component(0, vec![sub(0.5, true)]);
        let processed = process_component(&c);
        assert_eq!(processed.component_id, "comp");
        assert_eq!(processed.subject_weighting, 0.5);
        assert!(approx(processed.grades.projected.value, 0.5));
    }
}
