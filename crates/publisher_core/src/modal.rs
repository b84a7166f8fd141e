use crate::{IdSet, TaxonomyEntity, TaxonomyId, TaxonomyKind};

/// What an accepted taxonomy selection is written back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalTarget {
    Global,
    Article { path: String },
}

/// Which items "select all" / "deselect all" touch while a search is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectAllScope {
    /// Every item, including those hidden by the search filter.
    #[default]
    AllItems,
    /// Only items matching the current search.
    VisibleOnly,
}

/// An open taxonomy selection dialog. A closed dialog is `None` in `AppState`.
///
/// The checked set is private to the dialog until it is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyModal {
    kind: TaxonomyKind,
    target: ModalTarget,
    search: String,
    checked: IdSet,
}

impl TaxonomyModal {
    pub fn open(kind: TaxonomyKind, target: ModalTarget, seed: &IdSet) -> Self {
        Self {
            kind,
            target,
            search: String::new(),
            checked: seed.clone(),
        }
    }

    pub fn kind(&self) -> TaxonomyKind {
        self.kind
    }

    pub fn target(&self) -> &ModalTarget {
        &self.target
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn is_checked(&self, id: TaxonomyId) -> bool {
        self.checked.contains(id)
    }

    /// Case-insensitive substring match on the entity name.
    pub fn is_visible(&self, entity: &TaxonomyEntity) -> bool {
        let needle = self.search.trim();
        needle.is_empty() || entity.name.to_lowercase().contains(&needle.to_lowercase())
    }

    pub fn toggle(&mut self, id: TaxonomyId) {
        if !self.checked.remove(id) {
            self.checked.insert(id);
        }
    }

    pub fn set_all(&mut self, entities: &[TaxonomyEntity], checked: bool, scope: SelectAllScope) {
        for entity in entities {
            if scope == SelectAllScope::VisibleOnly && !self.is_visible(entity) {
                continue;
            }
            if checked {
                self.checked.insert(entity.id);
            } else {
                self.checked.remove(entity.id);
            }
        }
    }

    /// Checked ids that are present in `entities`, in catalog order.
    ///
    /// Ids not offered by the dialog (absent from the catalog) are not kept.
    pub fn accepted_ids(&self, entities: &[TaxonomyEntity]) -> IdSet {
        entities
            .iter()
            .map(|entity| entity.id)
            .filter(|id| self.checked.contains(*id))
            .collect()
    }
}
