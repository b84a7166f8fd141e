use crate::{IdSet, TaxonomyEntity, TaxonomyId, TaxonomyKind};

/// Categories and tags known for one profile.
///
/// The catalog remembers which profile it was filled for so that a response
/// arriving after a profile switch can be recognised as stale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaxonomyCatalog {
    profile: Option<String>,
    categories: Vec<TaxonomyEntity>,
    tags: Vec<TaxonomyEntity>,
}

impl TaxonomyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty catalog bound to `profile`, awaiting its first refresh.
    pub fn for_profile(profile: impl Into<String>) -> Self {
        Self {
            profile: Some(profile.into()),
            ..Self::default()
        }
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    pub fn belongs_to(&self, profile: &str) -> bool {
        self.profile.as_deref() == Some(profile)
    }

    pub fn entities(&self, kind: TaxonomyKind) -> &[TaxonomyEntity] {
        match kind {
            TaxonomyKind::Categories => &self.categories,
            TaxonomyKind::Tags => &self.tags,
        }
    }

    /// Installs a complete refresh. Both lists are replaced together.
    pub fn replace(&mut self, categories: Vec<TaxonomyEntity>, tags: Vec<TaxonomyEntity>) {
        self.categories = categories;
        self.tags = tags;
    }

    /// Appends a freshly created entity unless its id is already known.
    pub fn append(&mut self, kind: TaxonomyKind, entity: TaxonomyEntity) -> bool {
        let list = match kind {
            TaxonomyKind::Categories => &mut self.categories,
            TaxonomyKind::Tags => &mut self.tags,
        };
        if list.iter().any(|existing| existing.id == entity.id) {
            return false;
        }
        list.push(entity);
        true
    }

    pub fn name_of(&self, kind: TaxonomyKind, id: TaxonomyId) -> Option<&str> {
        self.entities(kind)
            .iter()
            .find(|entity| entity.id == id)
            .map(|entity| entity.name.as_str())
    }

    /// Display names for `ids` in id order. Unknown ids are skipped.
    pub fn resolve_names(&self, kind: TaxonomyKind, ids: &IdSet) -> Vec<String> {
        ids.iter()
            .filter_map(|id| self.name_of(kind, id))
            .filter(|name| !name.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    }
}
