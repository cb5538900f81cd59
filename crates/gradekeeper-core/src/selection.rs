//! Subcomponent selection: which scored items count toward a component.
//!
//! Both selections sort by percentage (highest first, stable on ties) and then
//! discard the component's drop-lowest count from the tail.

use std::cmp::Ordering;

use crate::model::{Component, Subcomponent};

/// Completed items that survive the drop-lowest rule, highest score first.
///
/// Used for the actual and projected grades.
pub fn active_subcomponents(component: &Component) -> Vec<&Subcomponent> {
    let completed = component.subcomponents.iter().filter(|s| s.is_completed);
    sort_and_drop(completed, component.number_of_subcomponents_to_drop_lowest)
}

/// All items, completed or not, that survive the drop-lowest rule.
///
/// Ungraded items are ranked by their raw stored percentage; they are only
/// treated as perfect later, when the maximum grade is summed.
pub fn all_subcomponents_sorted(component: &Component) -> Vec<&Subcomponent> {
    sort_and_drop(
        component.subcomponents.iter(),
        component.number_of_subcomponents_to_drop_lowest,
    )
}

/// Whether the item with `subcomponent_id` currently counts toward its
/// component's grade.
pub fn is_active_subcomponent(component: &Component, subcomponent_id: &str) -> bool {
    active_subcomponents(component)
        .iter()
        .any(|s| s.id == subcomponent_id)
}

/// Average of the highest `values.len() - drop` values.
///
/// An empty list averages to `0.0`; dropping everything yields `None`.
pub fn average_with_drop(values: &[f64], drop: usize) -> Option<f64> {
    if values.is_empty() {
        return Some(0.0);
    }
    let kept = values.len().checked_sub(drop).filter(|&n| n > 0)?;

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| descending(*a, *b));
    Some(sorted[..kept].iter().sum::<f64>() / kept as f64)
}

fn sort_and_drop<'a>(
    items: impl Iterator<Item = &'a Subcomponent>,
    drop: usize,
) -> Vec<&'a Subcomponent> {
    let mut sorted: Vec<&Subcomponent> = items.collect();
    sorted.sort_by(|a, b| descending(a.grade_value_percentage, b.grade_value_percentage));
    sorted.truncate(sorted.len().saturating_sub(drop));
    sorted
}

/// Highest first; incomparable values (NaN) are treated as ties.
fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
