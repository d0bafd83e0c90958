//! Container selection: finding the repeating item pattern on a results
//! page.
//!
//! Candidates come from [`patterns::CONTAINER_PATTERNS`] and are scored as
//! a proxy for "looks like a list of content cards": patterns rich in
//! headlines, links, and images beat plain repeated wrappers.

use crate::discover::patterns;
use crate::parse::{Document, Element};
use crate::{FaroError, Result};

/// Minimum node count for a candidate to represent a repeating list.
const MIN_CONTAINER_MATCHES: usize = 2;

const HEADING_OR_ANCHOR_SELECTOR: &str = "h1, h2, h3, h4, h5, a";
const IMAGE_SELECTOR: &str = "img";
const LINKED_ANCHOR_SELECTOR: &str = "a[href]";

/// The winning container pattern and its matched nodes.
#[derive(Debug)]
pub struct ContainerMatch<'a> {
    /// Selector that won the scoring pass.
    pub pattern: &'static str,
    /// Match count plus the first node's content signals.
    pub score: usize,
    /// All nodes the pattern matched, in document order.
    pub items: Vec<Element<'a>>,
}

/// Scores candidate repeating-item patterns and returns the best one.
///
/// A candidate needs at least two matching nodes. Its score is the match
/// count plus content signals from the first node, taken as representative
/// of the whole set. The maximum wins; on a tie the earlier-listed pattern
/// is kept.
///
/// # Errors
///
/// Returns [`FaroError::NoContainer`] when no candidate clears the
/// minimum match count.
pub fn select_container(doc: &Document) -> Result<ContainerMatch<'_>> {
    let mut best: Option<ContainerMatch> = None;

    for &pattern in patterns::CONTAINER_PATTERNS {
        let items = doc.select(pattern)?;
        if items.len() < MIN_CONTAINER_MATCHES {
            continue;
        }

        let score = items.len() + content_signals(&items[0])?;

        if best.as_ref().is_none_or(|current| score > current.score) {
            best = Some(ContainerMatch { pattern, score, items });
        }
    }

    best.ok_or(FaroError::NoContainer)
}

/// Counts content signals inside the representative node.
///
/// Headings and anchors weigh double; images and hyperlinked anchors add
/// one each.
fn content_signals(node: &Element) -> Result<usize> {
    let headings = node.select(HEADING_OR_ANCHOR_SELECTOR)?.len();
    let images = node.select(IMAGE_SELECTOR)?.len();
    let linked = node.select(LINKED_ANCHOR_SELECTOR)?.len();

    Ok(headings * 2 + images + linked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rich_articles_beat_plain_items() {
        let html = r#"<html><body>
            <div class="item">texto</div>
            <div class="item">texto</div>
            <div class="item">texto</div>
            <article><h2><a href="/n/1">Um</a></h2><img src="/1.jpg"></article>
            <article><h2><a href="/n/2">Dois</a></h2><img src="/2.jpg"></article>
            <article><h2><a href="/n/3">Três</a></h2><img src="/3.jpg"></article>
            <article><h2><a href="/n/4">Quatro</a></h2><img src="/4.jpg"></article>
            <article><h2><a href="/n/5">Cinco</a></h2><img src="/5.jpg"></article>
        </body></html>"#;
        let doc = Document::parse(html).unwrap();

        let found = select_container(&doc).unwrap();
        assert_eq!(found.pattern, "article");
        assert_eq!(found.items.len(), 5);
        // 5 matches + (h2 + a) * 2 + one image + one linked anchor
        assert_eq!(found.score, 11);
    }

    #[test]
    fn test_single_match_is_rejected() {
        let html = r#"<html><body>
            <article><h2><a href="/n/1">Única</a></h2></article>
            <p>nada mais</p>
        </body></html>"#;
        let doc = Document::parse(html).unwrap();

        assert!(matches!(select_container(&doc), Err(FaroError::NoContainer)));
    }

    #[test]
    fn test_empty_page_has_no_container() {
        let doc = Document::parse("<html><body></body></html>").unwrap();
        assert!(matches!(select_container(&doc), Err(FaroError::NoContainer)));
    }

    #[test]
    fn test_tie_keeps_earlier_pattern() {
        // Both candidates score 2 (two empty matches, no signals); .entry
        // comes before .item in the priority list.
        let html = r#"<html><body>
            <div class="item"></div>
            <div class="item"></div>
            <div class="entry"></div>
            <div class="entry"></div>
        </body></html>"#;
        let doc = Document::parse(html).unwrap();

        let found = select_container(&doc).unwrap();
        assert_eq!(found.pattern, ".entry");
        assert_eq!(found.score, 2);
    }

    #[test]
    fn test_class_substring_pattern() {
        let html = r#"<html><body>
            <div class="featured-post-card"><h3><a href="/a">Primeira notícia</a></h3></div>
            <div class="featured-post-card"><h3><a href="/b">Segunda notícia</a></h3></div>
        </body></html>"#;
        let doc = Document::parse(html).unwrap();

        let found = select_container(&doc).unwrap();
        assert_eq!(found.pattern, r#"[class*="post"]"#);
    }

    #[test]
    fn test_first_node_is_the_representative() {
        // Only the first matched node contributes signals; rich later
        // nodes cannot lift a candidate.
        let html = r#"<html><body>
            <div class="entry"></div>
            <div class="entry"><h2><a href="/x">Rica em sinais</a></h2><img src="/x.jpg"></div>
            <article><h5><a href="/1">Um</a></h5></article>
            <article><h5><a href="/2">Dois</a></h5></article>
        </body></html>"#;
        let doc = Document::parse(html).unwrap();

        let found = select_container(&doc).unwrap();
        // article: 2 + (h5 + a) * 2 + linked anchor = 7; .entry: 2 + 0
        assert_eq!(found.pattern, "article");
        assert_eq!(found.score, 7);
    }
}
