//! Per-field selector resolution inside a representative item node.
//!
//! Each of the five item fields has its own ranked pattern list and an
//! acceptance predicate; resolution trusts early, specific patterns over
//! later generic ones and never searches for a globally best match.

use std::sync::LazyLock;

use regex::Regex;

use crate::Result;
use crate::discover::patterns::{FieldKind, MONTH_TOKENS};
use crate::parse::Element;

const TITLE_MIN_CHARS: usize = 10;
const TITLE_MAX_CHARS: usize = 200;
const SUMMARY_MIN_CHARS: usize = 20;

/// Day/month fragment such as "12/08" or "3-9".
const NUMERIC_DATE_PATTERN: &str = r"\d{1,2}[/\-]\d{1,2}";

static NUMERIC_DATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(NUMERIC_DATE_PATTERN).unwrap());

/// Resolves the selector for one field inside the representative node.
///
/// Walks the field's ranked pattern list and returns the first pattern
/// whose **first** match satisfies the field's acceptance predicate.
/// `Ok(None)` means the field stays absent; the record as a whole remains
/// usable without it.
pub fn resolve_field(node: &Element, kind: FieldKind) -> Result<Option<&'static str>> {
    for &pattern in kind.patterns() {
        let matches = node.select(pattern)?;
        let Some(first) = matches.first() else {
            continue;
        };

        if accepts(first, kind) {
            return Ok(Some(pattern));
        }
    }

    Ok(None)
}

/// Field-specific acceptance predicate for a matched element.
///
/// Title and summary are judged by trimmed text length, link and image by
/// attribute presence, date by a numeric day/month fragment or a month
/// abbreviation.
fn accepts(element: &Element, kind: FieldKind) -> bool {
    match kind {
        FieldKind::Title => {
            let len = element.text().trim().chars().count();
            len > TITLE_MIN_CHARS && len < TITLE_MAX_CHARS
        }
        FieldKind::Summary => element.text().trim().chars().count() > SUMMARY_MIN_CHARS,
        FieldKind::Link => element.attr("href").is_some_and(|href| !href.is_empty()),
        FieldKind::Image => element.attr("src").is_some_and(|src| !src.is_empty()),
        FieldKind::Date => {
            let text = element.text();
            let trimmed = text.trim();
            NUMERIC_DATE.is_match(trimmed)
                || MONTH_TOKENS.iter().any(|month| trimmed.to_lowercase().contains(month))
        }
    }
}
