use insight_model::Document;

/// Single-slot transient state for the currently previewed source document.
/// `open` replaces any existing preview unconditionally; last write wins,
/// there is no stack.
#[derive(Debug, Default)]
pub struct DocumentPreview {
    previewed: Option<Document>,
}

impl DocumentPreview {
    pub fn previewed(&self) -> Option<&Document> {
        self.previewed.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.previewed.is_some()
    }

    pub fn open(&mut self, doc: Document) {
        self.previewed = Some(doc);
    }

    pub fn close(&mut self) {
        self.previewed = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str) -> Document {
        Document { id: id.into(), text: "body".into() }
    }

    #[test]
    fn open_replaces_existing_preview() {
        let mut p = DocumentPreview::default();
        p.open(doc("a"));
        p.open(doc("b"));
        assert_eq!(p.previewed().unwrap().id, "b");
    }

    #[test]
    fn close_clears_the_slot() {
        let mut p = DocumentPreview::default();
        p.open(doc("a"));
        p.close();
        assert!(!p.is_open());
    }
}
