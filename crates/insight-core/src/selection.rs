/// Which history entry (if any) is currently pinned by the user.
///
/// `None` means "the most recently produced record, not yet pinned to a
/// history entry".  Owned by the session, lives for the application session,
/// no persistence.
#[derive(Debug, Default)]
pub struct Selection {
    selected: Option<String>,
}

impl Selection {
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn set(&mut self, response_id: String) {
        self.selected = Some(response_id);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}
