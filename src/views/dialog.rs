// src/views/dialog.rs

//! Delete confirmation as explicit caller-owned state.
//!
//! The caller holds an `Option<ConfirmDelete<T>>` and renders the
//! prompt while it is `Some`. Confirming yields the target for the
//! delete mutation; cancelling drops the dialog and performs no
//! network action.

/// A pending destructive action, naming its target.
#[derive(Debug, Clone)]
pub struct ConfirmDelete<T> {
    target: T,
    label: String,
}

impl<T> ConfirmDelete<T> {
    pub fn new(target: T, label: impl Into<String>) -> Self {
        Self {
            target,
            label: label.into(),
        }
    }

    /// The question shown to the user, naming the target entity.
    pub fn prompt(&self, kind: &str) -> String {
        format!("Do you really want to delete the {kind}, {}?", self.label)
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Consume the dialog, handing the target to the delete mutation.
    pub fn confirm(self) -> T {
        self.target
    }

    /// Discard the dialog without touching anything.
    pub fn cancel(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Topic;

    #[test]
    fn prompt_names_the_target() {
        let dialog = ConfirmDelete::new(Topic::new("cooking", "recipes"), "cooking");
        assert_eq!(
            dialog.prompt("topic"),
            "Do you really want to delete the topic, cooking?"
        );
    }

    #[test]
    fn confirm_yields_the_target() {
        let dialog = ConfirmDelete::new(Topic::new("cooking", "recipes"), "cooking");
        assert_eq!(dialog.confirm().name, "cooking");
    }
}
