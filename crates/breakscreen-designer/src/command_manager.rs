//! Bounded-depth undo/redo stack discipline.

use breakscreen_core::constants::MAX_HISTORY_DEPTH;
use breakscreen_core::{DesignerEvent, EventBus, Result};

use crate::canvas::Canvas;
use crate::commands::DesignerCommand;

/// Two bounded stacks with standard linear-history discipline: a new
/// command clears redo entirely, and the undo stack silently drops its
/// oldest entry past the depth limit (a memory bound, not a correctness
/// concern).
pub struct CommandManager {
    undo_stack: Vec<DesignerCommand>,
    redo_stack: Vec<DesignerCommand>,
    max_depth: usize,
    events: EventBus,
}

impl CommandManager {
    pub fn new(events: EventBus) -> Self {
        Self::with_max_depth(MAX_HISTORY_DEPTH, events)
    }

    pub fn with_max_depth(max_depth: usize, events: EventBus) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth,
            events,
        }
    }

    /// Applies a command and records it. On failure the error is
    /// propagated and the stacks are left untouched.
    pub fn execute(&mut self, mut command: DesignerCommand, canvas: &mut Canvas) -> Result<()> {
        command.apply(canvas)?;
        self.undo_stack.push(command);
        self.redo_stack.clear();
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
        self.notify();
        Ok(())
    }

    /// Undoes the most recent command. Returns `Ok(false)` on an empty
    /// stack. If the command's undo fails, the command is pushed back onto
    /// the undo stack before the error propagates: best-effort stack
    /// consistency, not transactional rollback.
    pub fn undo(&mut self, canvas: &mut Canvas) -> Result<bool> {
        let Some(mut command) = self.undo_stack.pop() else {
            return Ok(false);
        };
        match command.undo(canvas) {
            Ok(()) => {
                self.redo_stack.push(command);
                self.notify();
                Ok(true)
            }
            Err(err) => {
                self.undo_stack.push(command);
                Err(err)
            }
        }
    }

    /// Re-applies the most recently undone command; symmetric to `undo`.
    pub fn redo(&mut self, canvas: &mut Canvas) -> Result<bool> {
        let Some(mut command) = self.redo_stack.pop() else {
            return Ok(false);
        };
        match command.apply(canvas) {
            Ok(()) => {
                self.undo_stack.push(command);
                self.notify();
                Ok(true)
            }
            Err(err) => {
                self.redo_stack.push(command);
                Err(err)
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Label of the command `undo` would revert.
    pub fn undo_description(&self) -> Option<String> {
        self.undo_stack.last().map(|c| c.description())
    }

    /// Label of the command `redo` would replay.
    pub fn redo_description(&self) -> Option<String> {
        self.redo_stack.last().map(|c| c.description())
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.notify();
    }

    fn notify(&self) {
        self.events.publish(DesignerEvent::HistoryChanged {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            undo_description: self.undo_description(),
            redo_description: self.redo_description(),
        });
    }
}
