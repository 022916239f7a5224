use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::HistoryBackend;

/// In-process navigation stack with a back/forward cursor.
///
/// Clones share the same stack, so a host can keep a handle for `back()` /
/// `forward()` while the session owns another through `HistorySync`.
#[derive(Clone, Default)]
pub struct MemoryHistory {
    inner: Arc<Mutex<Stack>>,
}

#[derive(Default)]
struct Stack {
    entries: Vec<String>,
    cursor: usize,
}

impl MemoryHistory {
    /// Start with a single entry, e.g. the query string of a deep link.
    pub fn new(initial_location: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Stack {
                entries: vec![initial_location.into()],
                cursor: 0,
            })),
        }
    }

    fn stack(&self) -> MutexGuard<'_, Stack> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move one entry back. Returns false at the oldest entry.
    pub fn back(&self) -> bool {
        let mut s = self.stack();
        if s.cursor == 0 {
            return false;
        }
        s.cursor -= 1;
        true
    }

    /// Move one entry forward. Returns false at the newest entry.
    pub fn forward(&self) -> bool {
        let mut s = self.stack();
        if s.cursor + 1 >= s.entries.len() {
            return false;
        }
        s.cursor += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.stack().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack().entries.is_empty()
    }

    pub fn entries(&self) -> Vec<String> {
        self.stack().entries.clone()
    }
}

impl HistoryBackend for MemoryHistory {
    fn push(&mut self, location: String) {
        let mut s = self.stack();
        if !s.entries.is_empty() {
            let keep = s.cursor + 1;
            s.entries.truncate(keep);
        }
        s.entries.push(location);
        s.cursor = s.entries.len() - 1;
    }

    fn location(&self) -> String {
        let s = self.stack();
        s.entries.get(s.cursor).cloned().unwrap_or_default()
    }
}
