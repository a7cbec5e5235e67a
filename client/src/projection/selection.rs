//! The record currently opened for viewing or printing.
//!
//! There is at most one selection. Closing the detail or print surface
//! clears it, and printing with nothing selected does nothing.

use super::print::{print_projection, PrintDocument, PrintOptions};
use super::view::{view_projection, ViewRow};
use crate::models::KiraiRecord;

#[derive(Debug, Default)]
pub struct Selection {
    current: Option<KiraiRecord>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `record`, replacing any previous selection.
    pub fn select(&mut self, record: KiraiRecord) {
        self.current = Some(record);
    }

    pub fn selected(&self) -> Option<&KiraiRecord> {
        self.current.as_ref()
    }

    /// Close the owning surface and drop the selection.
    pub fn close(&mut self) -> Option<KiraiRecord> {
        self.current.take()
    }

    pub fn view(&self) -> Option<Vec<ViewRow>> {
        self.current.as_ref().map(view_projection)
    }

    /// `None` when nothing is selected.
    pub fn print(&self, options: &PrintOptions) -> Option<PrintDocument> {
        self.current.as_ref().map(|record| print_projection(record, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_without_selection_is_noop() {
        let selection = Selection::new();
        assert!(selection.print(&PrintOptions::default()).is_none());
        assert!(selection.view().is_none());
    }

    #[test]
    fn test_single_selection_lifecycle() {
        let mut selection = Selection::new();
        selection.select(KiraiRecord::new("A1"));
        selection.select(KiraiRecord::new("A2"));
        assert_eq!(selection.selected().map(|r| r.klno.as_str()), Some("A2"));

        let doc = selection.print(&PrintOptions::default()).unwrap();
        assert_eq!(doc.header.kl_number, "A2");

        assert_eq!(selection.close().map(|r| r.klno), Some("A2".to_string()));
        assert!(selection.selected().is_none());
        assert!(selection.print(&PrintOptions::default()).is_none());
    }
}
