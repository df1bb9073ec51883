/// Work that must wait until the toolkit has finished its current layout
/// pass, e.g. measuring panel sizes after one was hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    UpdateSize,
    SaveSettings,
}

/// Coalescing queue of deferred tasks.
///
/// Posting a task that is already queued is a no-op, so any number of
/// requests made during one event-loop turn run once when the host drains
/// the queue.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    tasks: Vec<DeferredTask>,
}

impl DeferredQueue {
    /// Queue `task`; returns false if it was already pending.
    pub fn post(&mut self, task: DeferredTask) -> bool {
        if self.is_pending(task) {
            return false;
        }
        self.tasks.push(task);
        true
    }

    pub fn is_pending(&self, task: DeferredTask) -> bool {
        self.tasks.contains(&task)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Take every pending task in posting order, leaving the queue empty.
    pub fn take(&mut self) -> Vec<DeferredTask> {
        std::mem::take(&mut self.tasks)
    }
}
