//! Catalog editor state machine.
//!
//! A guild section edits at most one catalog entry at a time: the state
//! holds a single target slot rather than per-row flags. Transitions:
//!
//! - Viewing --edit(i)--> Editing(i)
//! - Editing(i) --done--> (update call) --> Viewing
//! - Editing(i) --cancel--> Viewing, local edits discarded
//! - Viewing --add--> Creating
//! - Creating --done--> (create call) --> Viewing
//! - Creating --cancel--> Viewing

use deiquest_domain::{DomainError, QuestAction, QuestActionId};

/// The editable fields of a catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestActionDraft {
    pub description: String,
    pub name: Option<String>,
    pub adventurer_note: Option<String>,
    pub xp: u32,
    pub repeatable: bool,
}

impl QuestActionDraft {
    pub fn from_action(action: &QuestAction) -> Self {
        Self {
            description: action.description.clone(),
            name: action.name.clone(),
            adventurer_note: action.adventurer_note.clone(),
            xp: action.xp,
            repeatable: action.repeatable,
        }
    }

    /// Local validation run before any network call.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.description.trim().is_empty() {
            return Err(DomainError::validation("description must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Viewing,
    Editing {
        target: QuestActionId,
        draft: QuestActionDraft,
    },
    Creating {
        draft: QuestActionDraft,
    },
}

impl EditorState {
    pub fn is_viewing(&self) -> bool {
        matches!(self, EditorState::Viewing)
    }

    pub fn editing_target(&self) -> Option<QuestActionId> {
        match self {
            EditorState::Editing { target, .. } => Some(*target),
            _ => None,
        }
    }

    /// Begin editing an existing entry. Only legal from `Viewing`.
    pub fn begin_edit(&mut self, action: &QuestAction) -> Result<(), DomainError> {
        if !self.is_viewing() {
            return Err(DomainError::InvalidStateTransition(
                "another entry is already being edited".to_string(),
            ));
        }
        *self = EditorState::Editing {
            target: action.id,
            draft: QuestActionDraft::from_action(action),
        };
        Ok(())
    }

    /// Begin creating a new entry. Only legal from `Viewing`.
    pub fn begin_create(&mut self) -> Result<(), DomainError> {
        if !self.is_viewing() {
            return Err(DomainError::InvalidStateTransition(
                "another entry is already being edited".to_string(),
            ));
        }
        *self = EditorState::Creating {
            draft: QuestActionDraft::default(),
        };
        Ok(())
    }

    /// The draft under edit, if any.
    pub fn draft_mut(&mut self) -> Option<&mut QuestActionDraft> {
        match self {
            EditorState::Editing { draft, .. } | EditorState::Creating { draft } => Some(draft),
            EditorState::Viewing => None,
        }
    }

    /// Discard local edits and return to `Viewing`.
    pub fn cancel(&mut self) {
        *self = EditorState::Viewing;
    }

    /// Take the state for commit, leaving `Viewing` behind.
    pub fn take(&mut self) -> EditorState {
        std::mem::take(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(id: u32, description: &str, xp: u32) -> QuestAction {
        QuestAction::new(QuestActionId::new(id), description, xp)
    }

    #[test]
    fn edit_then_cancel_returns_to_viewing() {
        let mut editor = EditorState::default();
        editor.begin_edit(&action(1, "desc", 10)).unwrap();
        assert_eq!(editor.editing_target(), Some(QuestActionId::new(1)));

        editor.cancel();
        assert!(editor.is_viewing());
    }

    #[test]
    fn only_one_entry_may_be_edited_at_a_time() {
        let mut editor = EditorState::default();
        editor.begin_edit(&action(1, "a", 10)).unwrap();

        assert!(editor.begin_edit(&action(2, "b", 20)).is_err());
        assert!(editor.begin_create().is_err());
        // The original target is untouched by the refused transitions.
        assert_eq!(editor.editing_target(), Some(QuestActionId::new(1)));
    }

    #[test]
    fn creating_starts_from_an_empty_draft() {
        let mut editor = EditorState::default();
        editor.begin_create().unwrap();
        let draft = editor.draft_mut().unwrap();
        assert!(draft.description.is_empty());
        assert_eq!(draft.xp, 0);
    }

    #[test]
    fn draft_edits_do_not_touch_the_source_action() {
        let source = action(1, "original", 10);
        let mut editor = EditorState::default();
        editor.begin_edit(&source).unwrap();
        editor.draft_mut().unwrap().description = "changed".to_string();

        assert_eq!(source.description, "original");
    }

    #[test]
    fn empty_description_fails_validation() {
        let draft = QuestActionDraft {
            description: "   ".to_string(),
            ..Default::default()
        };
        assert!(draft.validate().is_err());
    }
}
