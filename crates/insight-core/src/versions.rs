use insight_model::ResponseRecord;

/// State of the version-history overlay: all regenerations of one query,
/// fetched on demand when the overlay opens.
///
/// Opening for a different record while a fetch is in flight bumps the
/// generation, so the older fetch result is dropped when it lands.
#[derive(Debug, Default)]
pub struct VersionViewer {
    open: bool,
    loading: bool,
    caption: String,
    versions: Vec<ResponseRecord>,
    generation: u64,
}

impl VersionViewer {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The query text the listed versions answer, shown as the overlay title.
    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn versions(&self) -> &[ResponseRecord] {
        &self.versions
    }

    /// Open the overlay in its loading state and return the generation token
    /// for the fetch.
    pub fn begin_open(&mut self, caption: String) -> u64 {
        self.open = true;
        self.loading = true;
        self.caption = caption;
        self.versions.clear();
        self.generation += 1;
        self.generation
    }

    /// Apply a fetched version list.  Returns false when the fetch was
    /// superseded or the overlay already closed.
    pub fn complete_open(&mut self, generation: u64, versions: Vec<ResponseRecord>) -> bool {
        if generation != self.generation || !self.open {
            return false;
        }
        self.loading = false;
        self.versions = versions;
        true
    }

    /// Mark the fetch as failed.  The overlay closes again; failure leaves
    /// the viewer in the state it had before `begin_open`.
    pub fn fail_open(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.open {
            return false;
        }
        self.close();
        true
    }

    pub fn close(&mut self) {
        self.open = false;
        self.loading = false;
        self.versions.clear();
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
