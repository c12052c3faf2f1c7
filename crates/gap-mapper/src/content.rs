//! HTML cell classification.
//!
//! Spreadsheet exports often wrap cells in decorative markup (`<p><br></p>`,
//! inline styles, stray scripts). These helpers decide whether a cell holds
//! anything a reader would see, and pull hyperlinks out of it.

use scraper::{ElementRef, Html, Node};

/// One anchor extracted from an HTML fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub text: String,
    pub href: String,
}

impl Link {
    /// Render the link as a single anchor tag.
    #[must_use]
    pub fn to_anchor(&self) -> String {
        format!(r#"<a href="{}">{}</a>"#, self.href, self.text)
    }
}

/// Visible text of `html` with script and style content removed and
/// whitespace runs collapsed to single spaces.
#[must_use]
pub fn visible_text(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }
    let document = Html::parse_fragment(html);
    let mut words = Vec::new();
    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| matches!(el.name(), "script" | "style"))
        });
        if !hidden {
            words.extend(text.split_whitespace());
        }
    }
    words.join(" ")
}

/// Whether `html` has any user-visible text.
///
/// Empty input is treated as having none.
#[must_use]
pub fn has_visible_content(html: &str) -> bool {
    !visible_text(html).is_empty()
}

/// Anchors in `html` that carry both an `href` and non-empty text.
///
/// Links are keyed by their text: a later anchor with the same text replaces
/// the earlier href but keeps the position where the text was first seen.
#[must_use]
pub fn extract_links(html: &str) -> Vec<Link> {
    if html.is_empty() {
        return Vec::new();
    }
    let document = Html::parse_fragment(html);
    let mut links: Vec<Link> = Vec::new();
    for anchor in document
        .tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "a")
    {
        let Some(href) = anchor.value().attr("href").filter(|h| !h.is_empty()) else {
            continue;
        };
        let text: String = anchor.text().collect();
        if text.is_empty() {
            continue;
        }
        match links.iter_mut().find(|link| link.text == text) {
            Some(existing) => existing.href = href.to_string(),
            None => links.push(Link {
                text,
                href: href.to_string(),
            }),
        }
    }
    links
}

/// Normalise a cell before it is written into a mapped field.
///
/// A cell with links becomes a single anchor built from the last distinct
/// link text. A cell without visible text becomes empty. Anything else is
/// kept as-is.
#[must_use]
pub fn rewrite_cell(value: &str) -> String {
    if let Some(link) = extract_links(value).last() {
        return link.to_anchor();
    }
    if has_visible_content(value) {
        value.to_string()
    } else {
        String::new()
    }
}
