use crate::{ArticleStatus, Profile, PublishResult, TaxonomyId, TaxonomyKind};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub profiles: Vec<Profile>,
    pub current_profile: Option<Profile>,
    pub directory: Option<String>,
    pub articles: Vec<ArticleRowView>,
    pub selected_count: usize,
    pub global_categories: Vec<String>,
    pub global_tags: Vec<String>,
    pub modal: Option<ModalView>,
    pub batch: Option<BatchProgressView>,
    pub results: Option<ResultsView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRowView {
    pub position: usize,
    pub path: String,
    pub name: String,
    pub selected: bool,
    pub status: ArticleStatus,
    pub has_image: bool,
    /// Names of the per-article overrides; empty means the global selection applies.
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub size_text: String,
    pub modified: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub kind: TaxonomyKind,
    pub title: String,
    pub search: String,
    /// Items matching the search, in catalog order.
    pub items: Vec<ModalItemView>,
    pub hidden_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalItemView {
    pub id: TaxonomyId,
    pub name: String,
    pub checked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgressView {
    pub total: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub published: usize,
    pub failed: usize,
    pub rows: Vec<PublishResult>,
}

/// Human-readable size with one decimal, base 1024 (`0 B`, `1.5 KB`, `2 MB`).
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{} {}", rounded as u64, UNITS[unit])
    } else {
        format!("{:.1} {}", rounded, UNITS[unit])
    }
}
