use tracing::{debug, debug_span};

use lmx_core::text::undo_prefix;
use lmx_core::RequestId;

use super::fetch::UrlUpdate;
use super::ExplorerSession;

impl ExplorerSession {
    /// Initial fetch for the seeded sentence. A deep-linked sentence is
    /// already in the URL, so only the default sentence is pushed.
    pub fn start(&mut self) -> Option<RequestId> {
        let _span = debug_span!("start", seeded_from_url = self.seeded_from_url).entered();
        let url = if self.seeded_from_url {
            UrlUpdate::Suppress
        } else {
            UrlUpdate::Push
        };
        self.fetch(None, url)
    }

    /// Drop the last space-delimited token and refresh the candidates.
    ///
    /// With no space left the sentence becomes empty and, like any empty
    /// prefix, no request is sent.
    pub fn undo(&mut self) -> Option<RequestId> {
        let prefix = undo_prefix(&self.state.text).to_string();
        let _span = debug_span!("undo", %prefix).entered();
        self.replace_text(prefix);
        self.fetch(None, UrlUpdate::Push)
    }

    /// The host observed a back/forward navigation. `text` is the sentence
    /// parsed from the new URL; `None` falls back to the default sentence.
    /// The URL is never pushed from here, so navigation cannot feed back
    /// into history. A debounced refresh still pending from earlier typing
    /// is dropped for the same reason: the navigated text is fetched here.
    pub fn on_external_navigate(&mut self, text: Option<String>) -> Option<RequestId> {
        let text = text
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| self.config.default_text.clone());
        let _span = debug_span!("navigate", %text).entered();
        debug!("external navigation");
        self.debounce.clear();
        self.replace_text(text);
        self.state.loading = true;
        self.fetch(None, UrlUpdate::Suppress)
    }
}
