//! `quickclick search`: one-shot search over a page snapshot.

use std::path::Path;

use anyhow::{Context, Result};

use quickclick_config::{Settings, Tuning};
use quickclick_core::{ClickSignal, Document, ElementClassifier, MatchEngine, NodeId, Page, load_page};

/// Longest text shown per row.
const TEXT_WIDTH: usize = 48;

pub(crate) fn search(
    page_path: &Path,
    query: &str,
    settings: &Settings,
    tuning: &Tuning,
    show_signals: bool,
) -> Result<()> {
    let page = load_page(page_path)
        .with_context(|| format!("loading page {}", page_path.display()))?;
    let engine = MatchEngine::new(ElementClassifier::new(tuning.highlight.min_candidate_size));
    let matches = engine.search(&page, query, settings);

    if matches.is_empty() {
        println!("No matches.");
        return Ok(());
    }

    println!("{:<4} {:<8} {:<10} {:<20} {}", "#", "NODE", "TAG", "ID", "TEXT");
    println!("{}", "-".repeat(90));
    for (i, node) in matches.iter().enumerate() {
        let tag = page.tag_name(node)?;
        let id = page.attribute(node, "id")?.unwrap_or_else(|| "-".to_string());
        let text = truncate(&page.rendered_text(node)?, TEXT_WIDTH);
        println!("{:<4} {:<8} {:<10} {:<20} {}", i + 1, node.to_string(), tag, id, text);
        if show_signals {
            println!("     signals: {}", signal_names(&page, engine.classifier(), node));
        }
    }
    Ok(())
}

fn signal_names(page: &Page, classifier: &ElementClassifier, node: NodeId) -> String {
    classifier
        .signals(page, node)
        .into_iter()
        .map(ClickSignal::name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer label", 10), "a much ...");
        assert_eq!(truncate("ñandú ñandú", 8), "ñandú...");
    }
}
