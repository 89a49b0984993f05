// ingredients.rs

use serde::Serialize;

/// Ordered, de-duplicated list of ingredient names.
///
/// Entries are trimmed on the way in; empty and duplicate submissions are
/// no-ops rather than errors. Comparison is exact string equality, with no
/// case folding, so "Egg" and "egg" are distinct ingredients. There is no
/// removal operation.
#[derive(Debug, Default, Clone, Serialize)]
pub struct IngredientList {
    items: Vec<String>,
}

/// What happened to a single submission. `Empty` and `Duplicate` are silent
/// no-op policies, not failures.
#[derive(Debug, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Empty,
    Duplicate,
}

impl IngredientList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trim the submission and append it, unless it is empty or already
    /// present. Insertion order is preserved.
    pub fn add(&mut self, raw: &str) -> AddOutcome {
        let ingredient = raw.trim();
        if ingredient.is_empty() {
            return AddOutcome::Empty;
        }
        if self.items.iter().any(|i| i == ingredient) {
            return AddOutcome::Duplicate;
        }
        self.items.push(ingredient.to_string());
        AddOutcome::Added
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }
}
