//! Deep-link synchronization between the sentence and the navigation URL.
//!
//! The sentence lives in a single `text` query parameter. [`HistorySync`]
//! pushes new entries when the controller asks for it, reads the parameter
//! back, and fans out back/forward notifications to subscribers.

mod memory;
mod query;


pub use memory::MemoryHistory;
pub use query::{encode_query, parse_query, TEXT_PARAM};

use tracing::debug;

/// A navigation API the explorer can push entries to.
pub trait HistoryBackend: Send {
    /// Push a new entry whose query string is `location` (including the leading `?`).
    fn push(&mut self, location: String);
    /// Query string of the current entry, `""` when there is none.
    fn location(&self) -> String;
}

/// Callback invoked after a back/forward navigation with the freshly parsed text.
pub type NavigationListener = Box<dyn FnMut(Option<String>) + Send>;

pub struct HistorySync {
    backend: Option<Box<dyn HistoryBackend>>,
    listeners: Vec<NavigationListener>,
}

impl HistorySync {
    pub fn new(backend: impl HistoryBackend + 'static) -> Self {
        Self {
            backend: Some(Box::new(backend)),
            listeners: Vec::new(),
        }
    }

    /// No navigation API: pushes are dropped and there is never a deep link.
    pub fn detached() -> Self {
        Self {
            backend: None,
            listeners: Vec::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Push `text + chosen_token` as the new `text` parameter.
    /// Returns false when no navigation API is available.
    pub fn push_state(&mut self, text: &str, chosen_token: Option<&str>) -> bool {
        let Some(backend) = self.backend.as_mut() else {
            return false;
        };
        let location = encode_query(text, chosen_token);
        debug!(%location, "history push");
        backend.push(location);
        true
    }

    /// The deep-linked sentence, or `None` when the URL carries none.
    pub fn read_from_url(&self) -> Option<String> {
        let backend = self.backend.as_ref()?;
        parse_query(&backend.location())
    }

    pub fn location(&self) -> Option<String> {
        self.backend.as_ref().map(|b| b.location())
    }

    pub fn subscribe(&mut self, listener: impl FnMut(Option<String>) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Called by the host after a back/forward navigation changed the URL.
    pub fn notify_navigated(&mut self) {
        let text = self.read_from_url();
        debug!(?text, listeners = self.listeners.len(), "history navigated");
        for listener in &mut self.listeners {
            listener(text.clone());
        }
    }
}
