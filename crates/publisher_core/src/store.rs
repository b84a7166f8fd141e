use crate::{ArticleRecord, ArticleStatus, FeaturedImage, FileDescriptor, IdSet, TaxonomyKind};

/// Ordered collection of article publish intents, keyed by file path.
///
/// Every mutator returns `false` when no record has the given path; a reload
/// can make a path a caller holds disappear, and that is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArticleStore {
    records: Vec<ArticleRecord>,
}

impl ArticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole store. Prior selections and overrides are discarded.
    pub fn load(&mut self, files: Vec<FileDescriptor>) {
        self.records = files.into_iter().map(ArticleRecord::from_descriptor).collect();
    }

    pub fn records(&self) -> &[ArticleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&ArticleRecord> {
        self.records.iter().find(|record| record.path == path)
    }

    pub fn position(&self, path: &str) -> Option<usize> {
        self.records.iter().position(|record| record.path == path)
    }

    /// Maps a display position back to the record's key.
    pub fn path_at(&self, position: usize) -> Option<&str> {
        self.records.get(position).map(|record| record.path.as_str())
    }

    pub fn toggle_selected(&mut self, path: &str) -> bool {
        self.with_record(path, |record| record.selected = !record.selected)
    }

    pub fn set_all_selected(&mut self, selected: bool) {
        for record in &mut self.records {
            record.selected = selected;
        }
    }

    pub fn set_status(&mut self, path: &str, status: ArticleStatus) -> bool {
        self.with_record(path, |record| record.status = status)
    }

    pub fn set_featured_image(&mut self, path: &str, image: FeaturedImage) -> bool {
        self.with_record(path, |record| record.featured_image = Some(image))
    }

    pub fn clear_featured_image(&mut self, path: &str) -> bool {
        self.with_record(path, |record| record.featured_image = None)
    }

    pub fn set_categories(&mut self, path: &str, ids: IdSet) -> bool {
        self.set_taxonomy(path, TaxonomyKind::Categories, ids)
    }

    pub fn set_tags(&mut self, path: &str, ids: IdSet) -> bool {
        self.set_taxonomy(path, TaxonomyKind::Tags, ids)
    }

    pub fn set_taxonomy(&mut self, path: &str, kind: TaxonomyKind, ids: IdSet) -> bool {
        self.with_record(path, |record| *record.taxonomy_mut(kind) = ids)
    }

    /// Selected records in store order.
    pub fn selected(&self) -> impl Iterator<Item = &ArticleRecord> {
        self.records.iter().filter(|record| record.selected)
    }

    pub fn selected_count(&self) -> usize {
        self.selected().count()
    }

    fn with_record(&mut self, path: &str, apply: impl FnOnce(&mut ArticleRecord)) -> bool {
        match self.records.iter_mut().find(|record| record.path == path) {
            Some(record) => {
                apply(record);
                true
            }
            None => false,
        }
    }
}
