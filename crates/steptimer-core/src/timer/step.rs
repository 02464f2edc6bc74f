use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Engine-assigned step identity.
///
/// Callers never choose ids; a fresh one is minted whenever a step enters
/// the store, including on bulk import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(Uuid);

impl StepId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StepId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub id: StepId,
    /// Minutes before the shared completion instant.
    pub offset_min: f64,
    pub category: String,
    pub description: String,
}

impl Step {
    pub fn new(offset_min: f64, category: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: StepId::new(),
            offset_min,
            category: category.into(),
            description: description.into(),
        }
    }

    /// Offset converted to seconds before completion.
    pub fn offset_secs(&self) -> f64 {
        self.offset_min * 60.0
    }
}

/// Ordered step collection plus the user's completion marks.
///
/// Steps are kept sorted by offset descending (furthest from completion
/// first). The sort is stable, so steps sharing an offset keep the order in
/// which they were supplied.
#[derive(Debug, Clone, Default)]
pub struct StepStore {
    steps: Vec<Step>,
    completed: HashSet<StepId>,
}

impl StepStore {
    pub fn new(steps: Vec<Step>) -> Self {
        let mut store = Self::default();
        store.replace(steps);
        store
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, id: StepId) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == id)
    }

    pub fn is_completed(&self, id: StepId) -> bool {
        self.completed.contains(&id)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Largest offset across all steps, or 0 for an empty store.
    pub fn total_minutes(&self) -> f64 {
        self.steps.first().map(|s| s.offset_min).unwrap_or(0.0)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Swap in a new step list. Completion marks belong to the old ids, so
    /// they are dropped.
    pub fn replace(&mut self, mut steps: Vec<Step>) {
        order_steps(&mut steps);
        self.steps = steps;
        self.completed.clear();
    }

    /// Flip the completion mark for `id`. Returns the new state, or `None`
    /// if no step has that id.
    pub fn toggle_completion(&mut self, id: StepId) -> Option<bool> {
        self.get(id)?;
        if self.completed.remove(&id) {
            Some(false)
        } else {
            self.completed.insert(id);
            Some(true)
        }
    }

    pub fn clear_completed(&mut self) {
        self.completed.clear();
    }
}

/// Stable sort by offset descending.
pub fn order_steps(steps: &mut [Step]) {
    steps.sort_by(|a, b| b.offset_min.total_cmp(&a.offset_min));
}

/// Built-in step list used when no steps file is configured: two
/// spatchcocked hens with a pan gravy, finishing together.
pub fn default_steps() -> Vec<Step> {
    [
        (45.0, "Chicken", "Pre-heat grill"),
        (30.0, "Chicken", "Place hens skin side up directly over coals"),
        (26.0, "Gravy", "Melt 4tbsp butter over medium-high heat"),
        (25.0, "Chicken", "Flip skin-side down"),
        (23.0, "Gravy", "When foaming subsides, add shallots"),
        (17.0, "Gravy", "Whisk in flour"),
        (15.0, "Gravy", "Add in stock and 1 cup wine"),
        (10.0, "Chicken", "Pull chicken when breast registers 145-150F. Set to rest"),
        (0.0, "Gravy", "Whisk in mustard and honey. Season with salt and pepper to taste"),
        (0.0, "Chicken", "Carve"),
    ]
    .into_iter()
    .map(|(offset, category, description)| Step::new(offset, category, description))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_steps_has_10_steps() {
        let store = StepStore::new(default_steps());
        assert_eq!(store.len(), 10);
        assert_eq!(store.total_minutes(), 45.0);
    }

    #[test]
    fn replace_sorts_descending_and_keeps_tie_order() {
        let store = StepStore::new(vec![
            Step::new(0.0, "A", "first final"),
            Step::new(10.0, "B", "ten"),
            Step::new(0.0, "C", "second final"),
            Step::new(20.0, "D", "twenty"),
        ]);
        let order: Vec<&str> = store.steps().iter().map(|s| s.description.as_str()).collect();
        assert_eq!(order, ["twenty", "ten", "first final", "second final"]);
    }

    #[test]
    fn toggle_completion_flips_membership() {
        let mut store = StepStore::new(default_steps());
        let id = store.steps()[2].id;
        assert_eq!(store.toggle_completion(id), Some(true));
        assert!(store.is_completed(id));
        assert_eq!(store.toggle_completion(id), Some(false));
        assert!(!store.is_completed(id));
    }

    #[test]
    fn toggle_unknown_id_is_ignored() {
        let mut store = StepStore::new(default_steps());
        assert_eq!(store.toggle_completion(StepId::new()), None);
        assert_eq!(store.completed_count(), 0);
    }

    #[test]
    fn replace_clears_completion_marks() {
        let mut store = StepStore::new(default_steps());
        let id = store.steps()[0].id;
        store.toggle_completion(id);
        store.replace(default_steps());
        assert_eq!(store.completed_count(), 0);
    }

    #[test]
    fn empty_store_has_zero_total() {
        let store = StepStore::default();
        assert!(store.is_empty());
        assert_eq!(store.total_minutes(), 0.0);
    }
}
