use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::PageContent;
use crate::markup::{Element, Node};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    pub open_graph: OpenGraph,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub site_name: String,
    pub locale: String,
    pub image: Option<String>,
}

impl OpenGraph {
    /// `(property, content)` pairs in the order they are emitted.
    pub fn tags(&self) -> Vec<(&'static str, &str)> {
        let mut tags = vec![
            ("og:title", self.title.as_str()),
            ("og:description", self.description.as_str()),
            ("og:url", self.url.as_str()),
            ("og:type", self.kind.as_str()),
            ("og:site_name", self.site_name.as_str()),
            ("og:locale", self.locale.as_str()),
        ];
        if let Some(image) = &self.image {
            tags.push(("og:image", image.as_str()));
        }
        tags
    }
}

impl Metadata {
    /// Head elements for the hosting layout.
    pub fn head_nodes(&self) -> Vec<Node> {
        let mut nodes: Vec<Node> = vec![
            Element::new("title").text(&self.title).into(),
            Element::new("meta")
                .attr("name", "description")
                .attr("content", &self.description)
                .into(),
            Element::new("link")
                .attr("rel", "canonical")
                .attr("href", &self.canonical_url)
                .into(),
        ];
        nodes.extend(self.open_graph.tags().into_iter().map(|(property, content)| {
            Node::from(
                Element::new("meta")
                    .attr("property", property)
                    .attr("content", content),
            )
        }));
        nodes
    }
}

/// `base_url + slug`, never with a trailing slash. The only place a page URL
/// is produced.
pub fn canonical_url(slug: &str, site: &SiteConfig) -> String {
    format!("{}{}", site.base_url(), slug)
}

pub fn resolve_metadata(page: &PageContent, site: &SiteConfig) -> Metadata {
    let canonical_url = canonical_url(page.slug(), site);
    let description = truncate_description(
        page.description(),
        site.description_max_len,
        &site.truncation_marker,
    );

    Metadata {
        title: page.title().to_string(),
        description: description.clone(),
        canonical_url: canonical_url.clone(),
        open_graph: OpenGraph {
            title: page.title().to_string(),
            description,
            url: canonical_url,
            kind: "website".to_string(),
            site_name: site.site_name.clone(),
            locale: site.locale.clone(),
            image: site.default_og_image.clone(),
        },
    }
}

/// Shortens `text` to at most `max_chars` characters, marker included.
///
/// Whitespace runs collapse to one space. The cut lands after the last whole
/// word that fits, with trailing punctuation dropped before the marker. Only a
/// single word longer than the budget is cut mid-word. A limit too small to
/// hold the marker gets a plain cut with no marker.
pub fn truncate_description(text: &str, max_chars: usize, marker: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let normalized = words.join(" ");
    if normalized.chars().count() <= max_chars {
        return normalized;
    }
    if marker.chars().count() >= max_chars {
        return normalized.chars().take(max_chars).collect();
    }

    let budget = max_chars.saturating_sub(marker.chars().count());
    let mut kept = String::new();
    let mut kept_len = 0;
    for word in &words {
        let word_len = word.chars().count();
        let needed = if kept.is_empty() { word_len } else { kept_len + 1 + word_len };
        if needed > budget {
            break;
        }
        if !kept.is_empty() {
            kept.push(' ');
        }
        kept.push_str(word);
        kept_len = needed;
    }

    if kept.is_empty() {
        kept = normalized.chars().take(budget).collect();
    }
    let kept = kept.trim_end_matches(|c: char| matches!(c, ',' | ';' | ':' | '.' | '-' | '–' | '—'));

    format!("{kept}{marker}")
}
