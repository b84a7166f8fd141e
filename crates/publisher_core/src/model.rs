use std::fmt;

pub type TaxonomyId = u64;

/// Which of the two disjoint taxonomy catalogs an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaxonomyKind {
    Categories,
    Tags,
}

impl TaxonomyKind {
    pub fn label(self) -> &'static str {
        match self {
            TaxonomyKind::Categories => "categories",
            TaxonomyKind::Tags => "tags",
        }
    }
}

impl fmt::Display for TaxonomyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyEntity {
    pub id: TaxonomyId,
    pub name: String,
}

impl TaxonomyEntity {
    pub fn new(id: TaxonomyId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Insertion-ordered set of taxonomy ids. Repeated ids are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdSet(Vec<TaxonomyId>);

impl IdSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` at the end unless already present. Returns whether it was added.
    pub fn insert(&mut self, id: TaxonomyId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.0.push(id);
        true
    }

    pub fn remove(&mut self, id: TaxonomyId) -> bool {
        let before = self.0.len();
        self.0.retain(|existing| *existing != id);
        before != self.0.len()
    }

    pub fn contains(&self, id: TaxonomyId) -> bool {
        self.0.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = TaxonomyId> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[TaxonomyId] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<TaxonomyId> {
        self.0.clone()
    }
}

impl FromIterator<TaxonomyId> for IdSet {
    fn from_iter<I: IntoIterator<Item = TaxonomyId>>(iter: I) -> Self {
        let mut set = IdSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl From<Vec<TaxonomyId>> for IdSet {
    fn from(ids: Vec<TaxonomyId>) -> Self {
        ids.into_iter().collect()
    }
}

/// A named remote target. Credentials never live in client state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub url: String,
    pub username: String,
}

/// Input for creating a profile on the backend.
///
/// The password is forwarded once and dropped; `Debug` never prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct NewProfile {
    pub name: String,
    pub url: String,
    pub username: String,
    pub app_password: String,
}

impl fmt::Debug for NewProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewProfile")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("username", &self.username)
            .field("app_password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArticleStatus {
    #[default]
    Draft,
    Publish,
}

impl ArticleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ArticleStatus::Draft => "draft",
            ArticleStatus::Publish => "publish",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "draft" => Some(ArticleStatus::Draft),
            "publish" => Some(ArticleStatus::Publish),
            _ => None,
        }
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the backend's file listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub path: String,
    pub name: String,
    pub size: u64,
    pub modified: String,
}

/// Image bytes chosen by the user, held until the article is published.
#[derive(Clone, PartialEq, Eq)]
pub struct FeaturedImage {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for FeaturedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeaturedImage")
            .field("filename", &self.filename)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Publish intent for a single source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    pub path: String,
    pub name: String,
    pub size: u64,
    pub modified: String,
    pub selected: bool,
    pub status: ArticleStatus,
    pub featured_image: Option<FeaturedImage>,
    pub categories: IdSet,
    pub tags: IdSet,
}

impl ArticleRecord {
    pub fn from_descriptor(file: FileDescriptor) -> Self {
        Self {
            path: file.path,
            name: file.name,
            size: file.size,
            modified: file.modified,
            selected: false,
            status: ArticleStatus::Draft,
            featured_image: None,
            categories: IdSet::new(),
            tags: IdSet::new(),
        }
    }

    pub fn taxonomy(&self, kind: TaxonomyKind) -> &IdSet {
        match kind {
            TaxonomyKind::Categories => &self.categories,
            TaxonomyKind::Tags => &self.tags,
        }
    }

    pub fn taxonomy_mut(&mut self, kind: TaxonomyKind) -> &mut IdSet {
        match kind {
            TaxonomyKind::Categories => &mut self.categories,
            TaxonomyKind::Tags => &mut self.tags,
        }
    }
}

/// Fallback categories and tags applied to articles without overrides.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlobalSelection {
    pub categories: IdSet,
    pub tags: IdSet,
}

impl GlobalSelection {
    pub fn get(&self, kind: TaxonomyKind) -> &IdSet {
        match kind {
            TaxonomyKind::Categories => &self.categories,
            TaxonomyKind::Tags => &self.tags,
        }
    }

    pub fn set(&mut self, kind: TaxonomyKind, ids: IdSet) {
        match kind {
            TaxonomyKind::Categories => self.categories = ids,
            TaxonomyKind::Tags => self.tags = ids,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Published { url: String, status: ArticleStatus },
    Failed { error: String },
}

/// Outcome of one article within one batch publish invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishResult {
    pub filename: String,
    pub outcome: PublishOutcome,
}

impl PublishResult {
    pub fn published(
        filename: impl Into<String>,
        url: impl Into<String>,
        status: ArticleStatus,
    ) -> Self {
        Self {
            filename: filename.into(),
            outcome: PublishOutcome::Published {
                url: url.into(),
                status,
            },
        }
    }

    pub fn failed(filename: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            outcome: PublishOutcome::Failed {
                error: error.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, PublishOutcome::Published { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            PublishOutcome::Failed { error } => Some(error),
            PublishOutcome::Published { .. } => None,
        }
    }
}
