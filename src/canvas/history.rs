use std::collections::VecDeque;

use super::surface::Snapshot;

/// Default number of snapshots kept on each stack
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// Linear undo/redo history of full-frame paint layer snapshots.
///
/// The top of the undo stack is always the current state of the layer, so
/// the stack never drops below one entry. Both stacks evict their oldest
/// entry when they grow past `capacity`.
#[derive(Debug, Clone)]
pub struct SnapshotHistory {
    /// Stack of checkpoints, newest at the back
    undo_stack: VecDeque<Snapshot>,
    /// Stack of undone checkpoints, newest at the back
    redo_stack: VecDeque<Snapshot>,
    capacity: usize,
}

impl SnapshotHistory {
    /// Creates a history whose only entry is `base`
    pub fn new(base: Snapshot, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut undo_stack = VecDeque::with_capacity(capacity + 1);
        undo_stack.push_back(base);
        Self {
            undo_stack,
            redo_stack: VecDeque::new(),
            capacity,
        }
    }

    /// Record a new checkpoint. Invalidates anything that could be redone.
    pub fn push(&mut self, snapshot: Snapshot) {
        Self::push_bounded(&mut self.undo_stack, snapshot, self.capacity);
        self.redo_stack.clear();
    }

    /// Step back one checkpoint, returning the snapshot to restore
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.undo_stack.len() <= 1 {
            return None;
        }
        let current = self.undo_stack.pop_back()?;
        Self::push_bounded(&mut self.redo_stack, current, self.capacity);
        self.undo_stack.back()
    }

    /// Re-apply the most recently undone checkpoint
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let snapshot = self.redo_stack.pop_back()?;
        Self::push_bounded(&mut self.undo_stack, snapshot, self.capacity);
        self.undo_stack.back()
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The checkpoint matching the current layer contents
    pub fn current(&self) -> Option<&Snapshot> {
        self.undo_stack.back()
    }

    fn push_bounded(stack: &mut VecDeque<Snapshot>, snapshot: Snapshot, capacity: usize) {
        stack.push_back(snapshot);
        while stack.len() > capacity {
            stack.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::surface::{Paint, PaintLayer, RasterSurface};
    use egui::{Color32, Pos2};

    fn snapshot_with_dot(x: f32) -> Snapshot {
        let mut layer = PaintLayer::new(16, 4);
        layer.fill_circle(Pos2::new(x, 2.0), 1.0, &Paint::color(Color32::RED, 1.0));
        layer.snapshot()
    }

    #[test]
    fn test_base_entry_is_never_undone() {
        let mut history = SnapshotHistory::new(PaintLayer::new(16, 4).snapshot(), 20);
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
        assert_eq!(history.undo_len(), 1);
    }

    #[test]
    fn test_push_clears_redo() {
        let mut history = SnapshotHistory::new(PaintLayer::new(16, 4).snapshot(), 20);
        history.push(snapshot_with_dot(2.0));
        assert!(history.undo().is_some());
        assert!(history.can_redo());

        history.push(snapshot_with_dot(8.0));
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = SnapshotHistory::new(PaintLayer::new(16, 4).snapshot(), 3);
        for x in 1..=5 {
            history.push(snapshot_with_dot(x as f32 * 2.0));
        }
        assert_eq!(history.undo_len(), 3);

        let mut steps = 0;
        while history.undo().is_some() {
            steps += 1;
        }
        assert_eq!(steps, 2);
        assert_eq!(history.current(), Some(&snapshot_with_dot(6.0)));
    }
}
