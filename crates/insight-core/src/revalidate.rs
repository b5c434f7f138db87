/// Tracks the single in-flight revalidation and which record it targets.
///
/// Same supersession scheme as the query controller: a new `begin` bumps the
/// generation and any completion carrying an older one is dropped.  Unlike
/// query submission, a new revalidation may start while one is in flight;
/// the older one is simply abandoned.
#[derive(Debug, Default)]
pub struct RevalidationController {
    revalidating: Option<String>,
    generation: u64,
}

impl RevalidationController {
    /// The response id currently being revalidated, if any.
    pub fn target(&self) -> Option<&str> {
        self.revalidating.as_deref()
    }

    pub fn is_revalidating(&self, response_id: &str) -> bool {
        self.revalidating.as_deref() == Some(response_id)
    }

    pub fn begin(&mut self, response_id: String) -> u64 {
        self.revalidating = Some(response_id);
        self.generation += 1;
        self.generation
    }

    /// Record a completion.  Returns true if it is current and should be
    /// applied.
    pub fn finish(&mut self, generation: u64) -> bool {
        if self.revalidating.is_none() || generation != self.generation {
            return false;
        }
        self.revalidating = None;
        true
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
