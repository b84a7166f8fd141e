use std::fmt::Write;

use publisher_core::{AppViewModel, Notice, NoticeLevel, PublishOutcome};

pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    let profile = match &view.current_profile {
        Some(profile) => format!("{} ({})", profile.name, profile.url),
        None => "none".to_string(),
    };
    let known: Vec<&str> = view.profiles.iter().map(|p| p.name.as_str()).collect();
    let _ = writeln!(out, "Profile: {}   available: {}", profile, list_or_dash(&known));
    let _ = writeln!(
        out,
        "Folder:  {}",
        view.directory.as_deref().unwrap_or("-")
    );
    let _ = writeln!(
        out,
        "Global categories: {}   tags: {}",
        names_or_dash(&view.global_categories),
        names_or_dash(&view.global_tags)
    );

    if view.articles.is_empty() {
        let _ = writeln!(out, "No articles.");
    } else {
        let _ = writeln!(
            out,
            "Articles ({} of {} selected):",
            view.selected_count,
            view.articles.len()
        );
        for row in &view.articles {
            let _ = writeln!(
                out,
                "  {:>3} [{}] {:<30} {:<7} {:>8}  {}{}{}{}",
                row.position + 1,
                if row.selected { "x" } else { " " },
                row.name,
                row.status.as_str(),
                row.size_text,
                row.modified,
                if row.has_image { "  +image" } else { "" },
                override_text("cats", &row.categories),
                override_text("tags", &row.tags),
            );
        }
    }

    if let Some(modal) = &view.modal {
        let _ = writeln!(out, "{}", modal.title);
        if !modal.search.is_empty() {
            let _ = writeln!(out, "  search: {}", modal.search);
        }
        for item in &modal.items {
            let _ = writeln!(
                out,
                "  [{}] {:>5}  {}",
                if item.checked { "x" } else { " " },
                item.id,
                item.name
            );
        }
        if modal.hidden_count > 0 {
            let _ = writeln!(out, "  ({} hidden by search)", modal.hidden_count);
        }
    }

    if let Some(batch) = &view.batch {
        let _ = writeln!(out, "Publishing... {}/{}", batch.completed, batch.total);
    }

    if let Some(results) = &view.results {
        let _ = writeln!(
            out,
            "Last batch: {} published, {} failed",
            results.published, results.failed
        );
        for row in &results.rows {
            match &row.outcome {
                PublishOutcome::Published { url, status } => {
                    let _ = writeln!(out, "  ok    {} ({}) {}", row.filename, status, url);
                }
                PublishOutcome::Failed { error } => {
                    let _ = writeln!(out, "  fail  {}: {}", row.filename, error);
                }
            }
        }
    }

    out
}

pub fn render_notice(notice: &Notice) -> String {
    let prefix = match notice.level {
        NoticeLevel::Info => "info",
        NoticeLevel::Success => "done",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Error => "error",
    };
    format!("{prefix}: {}", notice.message)
}

fn override_text(label: &str, names: &[String]) -> String {
    if names.is_empty() {
        String::new()
    } else {
        format!("  {label}: {}", names.join(", "))
    }
}

fn names_or_dash(names: &[String]) -> String {
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(", ")
    }
}

fn list_or_dash(names: &[&str]) -> String {
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(", ")
    }
}
