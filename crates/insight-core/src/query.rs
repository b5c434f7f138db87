/// Tracks the single in-flight query submission.
///
/// Each `begin` bumps the generation counter, so a completion carrying an
/// older generation is recognised as superseded and dropped.  Only one
/// submission may be in flight at a time; `begin` refuses while loading.
#[derive(Debug, Default)]
pub struct QueryController {
    loading: bool,
    generation: u64,
}

impl QueryController {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Start a submission, returning the generation token to tag the
    /// backend call with.  Returns `None` while another submission is
    /// still in flight.
    pub fn begin(&mut self) -> Option<u64> {
        if self.loading {
            return None;
        }
        self.loading = true;
        self.generation += 1;
        Some(self.generation)
    }

    /// Record a completion.  Returns true if the completion is current and
    /// should be applied, false if it was superseded or nothing is in
    /// flight.
    pub fn finish(&mut self, generation: u64) -> bool {
        if !self.loading || generation != self.generation {
            return false;
        }
        self.loading = false;
        true
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_refuses_while_loading() {
        let mut q = QueryController::default();
        assert!(q.begin().is_some());
        assert!(q.begin().is_none());
    }

    #[test]
    fn finish_clears_loading_for_current_generation() {
        let mut q = QueryController::default();
        let gen = q.begin().unwrap();
        assert!(q.finish(gen));
        assert!(!q.is_loading());
        assert!(q.begin().is_some());
    }

    #[test]
    fn completion_without_submission_is_rejected() {
        let mut q = QueryController::default();
        assert!(!q.finish(0));
    }

    #[test]
    fn stale_generation_is_rejected() {
        let mut q = QueryController::default();
        let old = q.begin().unwrap();
        assert!(q.finish(old));
        let newer = q.begin().unwrap();
        assert!(!q.finish(old));
        assert!(q.is_loading());
        assert!(q.finish(newer));
    }
}
