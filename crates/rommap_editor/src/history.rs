//! Generic per-document undo/redo engine.
//!
//! Each open document owns one [`History`]; stacks are never shared between
//! documents. Commands carry full before/after snapshots, so replaying one is
//! a pure state assignment and the engine itself never touches grid logic.

/// An undoable edit over some document state.
///
/// `merge_with` lets a command absorb a later command from the same user
/// gesture; implementations must verify the two commands are the same variant
/// before merging any fields.
pub trait Command {
    /// The document state the command replays into
    type Target;

    /// Replay the command's end state
    fn apply(&self, target: &mut Self::Target);

    /// Replay the command's start state
    fn revert(&self, target: &mut Self::Target);

    /// Absorb `other` into this command, extending its end state.
    ///
    /// Returns `false` (leaving both commands unchanged) when the two edits
    /// do not belong to the same gesture.
    fn merge_with(&mut self, other: &Self) -> bool;
}

/// An undo stack with a cursor.
///
/// The cursor sits between `0` and `len()`; everything below it is undoable,
/// everything at or above it is redoable. Pushing while redo entries exist
/// discards them.
#[derive(Debug, Clone)]
pub struct History<C> {
    commands: Vec<C>,
    cursor: usize,
    clean_index: Option<usize>,
}

impl<C> Default for History<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> History<C> {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            cursor: 0,
            clean_index: Some(0),
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.commands.len()
    }

    /// Mark the current cursor position as the saved state
    pub fn mark_clean(&mut self) {
        self.clean_index = Some(self.cursor);
    }

    /// Whether the document matches its last saved state
    pub fn is_clean(&self) -> bool {
        self.clean_index == Some(self.cursor)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.cursor = 0;
        self.clean_index = Some(0);
    }

    /// The command the next `undo` would revert
    pub fn undo_command(&self) -> Option<&C> {
        self.cursor.checked_sub(1).map(|i| &self.commands[i])
    }

    /// The command the next `redo` would apply
    pub fn redo_command(&self) -> Option<&C> {
        self.commands.get(self.cursor)
    }
}

impl<C: Command> History<C> {
    /// Apply `command` to `target` and record it.
    ///
    /// Any redo tail past the cursor is discarded first. If the top command
    /// accepts the merge, no new entry is created and the stack depth is
    /// unchanged. Never merges across the clean index, so saved-state
    /// tracking stays exact.
    pub fn push(&mut self, command: C, target: &mut C::Target) {
        if self.cursor < self.commands.len() {
            self.commands.truncate(self.cursor);
            // The saved state lived in the discarded tail.
            if self.clean_index.is_some_and(|i| i > self.cursor) {
                self.clean_index = None;
            }
        }

        command.apply(target);

        if self.clean_index != Some(self.cursor) {
            if let Some(top) = self.commands.last_mut() {
                if top.merge_with(&command) {
                    return;
                }
            }
        }

        self.commands.push(command);
        self.cursor += 1;
    }

    /// Step the cursor back one command, replaying its start state.
    /// Returns `false` (and fires nothing) at the bottom of the stack.
    pub fn undo(&mut self, target: &mut C::Target) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.commands[self.cursor].revert(target);
        true
    }

    /// Step the cursor forward one command, replaying its end state.
    pub fn redo(&mut self, target: &mut C::Target) -> bool {
        if self.cursor == self.commands.len() {
            return false;
        }
        self.commands[self.cursor].apply(target);
        self.cursor += 1;
        true
    }
}
