//! schema.org structured data.
//!
//! Every value here is read from the same validated [`PageContent`] and
//! [`BusinessFacts`] the section renderers use. Nothing is typed twice.

use serde_json::{Map, Value, json};

use crate::business::BusinessFacts;
use crate::config::SiteConfig;
use crate::content::{FaqEntry, PageContent, ServiceFacts};
use crate::metadata::canonical_url;

/// A JSON-LD document with a single `@graph`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonLd(Value);

impl JsonLd {
    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn graph(&self) -> &[Value] {
        self.0["@graph"].as_array().map(Vec::as_slice).unwrap_or_default()
    }

    /// First graph node whose `@type` is `kind`.
    pub fn node(&self, kind: &str) -> Option<&Value> {
        self.graph().iter().find(|node| node["@type"] == kind)
    }

    pub fn to_json(&self) -> String {
        // Serializing a `Value` cannot fail.
        serde_json::to_string_pretty(&self.0).unwrap_or_default()
    }

    /// `<script type="application/ld+json">` block. `</` is escaped so copy
    /// can never close the script element early.
    pub fn to_script_tag(&self) -> String {
        format!(
            "<script type=\"application/ld+json\">\n{}\n</script>",
            self.to_json().replace("</", "<\\/")
        )
    }
}

pub fn practice_id(site: &SiteConfig) -> String {
    format!("{}#practice", site.base_url())
}

/// Builds the page's structured data. Deterministic: the same input always
/// yields byte-identical JSON.
///
/// Every intermediate slug segment gets a breadcrumb, so the host must serve
/// a page at each of them. Use [`synthesize_linked`] when the set of pages is
/// known.
pub fn synthesize(page: &PageContent, site: &SiteConfig, business: &BusinessFacts) -> JsonLd {
    synthesize_linked(page, site, business, |_| true)
}

/// Like [`synthesize`], but an intermediate breadcrumb is only emitted when
/// `has_page` reports a page at that slug.
pub fn synthesize_linked(
    page: &PageContent,
    site: &SiteConfig,
    business: &BusinessFacts,
    has_page: impl Fn(&str) -> bool,
) -> JsonLd {
    let url = canonical_url(page.slug(), site);

    let mut graph = vec![practice_node(business, site)];
    if let Some(service) = page.service() {
        graph.push(service_node(service, page, &url, site));
    }
    graph.push(webpage_node(page, &url, site));
    if let Some(faq) = faq_node(page.faqs(), &url) {
        graph.push(faq);
    }
    graph.push(breadcrumb_node(page, &url, site, &has_page));

    JsonLd(json!({
        "@context": "https://schema.org",
        "@graph": graph,
    }))
}

fn practice_node(business: &BusinessFacts, site: &SiteConfig) -> Value {
    let address = &business.address;
    let mut postal = Map::new();
    postal.insert("@type".into(), json!("PostalAddress"));
    postal.insert("streetAddress".into(), json!(address.street));
    postal.insert("addressLocality".into(), json!(address.locality));
    if let Some(region) = &address.region {
        postal.insert("addressRegion".into(), json!(region));
    }
    postal.insert("postalCode".into(), json!(address.postal_code));
    postal.insert("addressCountry".into(), json!(address.country));

    let hours: Vec<Value> = business
        .opening_hours
        .iter()
        .map(|hours| {
            json!({
                "@type": "OpeningHoursSpecification",
                "dayOfWeek": hours.days.iter().map(|d| d.to_string()).collect::<Vec<_>>(),
                "opens": hours.opens,
                "closes": hours.closes,
            })
        })
        .collect();

    let mut node = json!({
        "@type": ["MedicalBusiness", "Dentist"],
        "@id": practice_id(site),
        "name": business.name,
        "url": site.base_url(),
        "telephone": business.phone,
        "address": Value::Object(postal),
        "geo": {
            "@type": "GeoCoordinates",
            "latitude": business.geo.latitude,
            "longitude": business.geo.longitude,
        },
        "priceRange": business.price_range,
        "potentialAction": {
            "@type": "ReserveAction",
            "target": business.booking_url,
        },
    });
    if !hours.is_empty() {
        node["openingHoursSpecification"] = Value::Array(hours);
    }
    if let Some(email) = &business.email {
        node["email"] = json!(email);
    }
    node
}

fn service_node(service: &ServiceFacts, page: &PageContent, url: &str, site: &SiteConfig) -> Value {
    let mut node = json!({
        "@type": "Service",
        "@id": format!("{url}#service"),
        "name": service.name,
        "description": page.description(),
        "url": url,
        "provider": { "@id": practice_id(site) },
    });
    if let Some(service_type) = &service.service_type {
        node["serviceType"] = json!(service_type);
    }
    if let Some(area) = &service.area_served {
        node["areaServed"] = json!({ "@type": "Place", "name": area });
    }
    node
}

fn webpage_node(page: &PageContent, url: &str, site: &SiteConfig) -> Value {
    json!({
        "@type": "WebPage",
        "@id": url,
        "url": url,
        "name": page.title(),
        "description": page.description(),
        "inLanguage": site.locale.replace('_', "-"),
        "isPartOf": {
            "@type": "WebSite",
            "name": site.site_name,
            "url": site.base_url(),
        },
        "about": { "@id": practice_id(site) },
        "breadcrumb": { "@id": format!("{url}#breadcrumb") },
    })
}

/// `None` for an empty list: an empty FAQPage is worse than none.
fn faq_node(faqs: &[FaqEntry], url: &str) -> Option<Value> {
    if faqs.is_empty() {
        return None;
    }

    let questions: Vec<Value> = faqs
        .iter()
        .map(|faq| {
            json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": faq.answer,
                },
            })
        })
        .collect();

    Some(json!({
        "@type": "FAQPage",
        "@id": format!("{url}#faq"),
        "mainEntity": questions,
    }))
}

fn breadcrumb_node(
    page: &PageContent,
    url: &str,
    site: &SiteConfig,
    has_page: &dyn Fn(&str) -> bool,
) -> Value {
    let segments: Vec<&str> = page.slug().split('/').collect();
    let mut items = vec![("Home".to_string(), site.base_url())];

    for depth in 1..segments.len() {
        let path = segments[..depth].join("/");
        if has_page(&path) {
            items.push((title_case(segments[depth - 1]), canonical_url(&path, site)));
        }
    }
    items.push((page.breadcrumb_label().to_string(), url.to_string()));

    let elements: Vec<Value> = items
        .into_iter()
        .enumerate()
        .map(|(i, (name, item))| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": name,
                "item": item,
            })
        })
        .collect();

    json!({
        "@type": "BreadcrumbList",
        "@id": format!("{url}#breadcrumb"),
        "itemListElement": elements,
    })
}

fn title_case(segment: &str) -> String {
    segment
        .split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{arnold, arnold_raw, business, site};
    use crate::validate::validate;

    #[test]
    fn graph_has_practice_service_page_faq_and_breadcrumbs() {
        let doc = synthesize(&arnold(), &site(), &business());
        let types: Vec<String> = doc.graph().iter().map(|n| n["@type"].to_string()).collect();
        assert_eq!(
            types,
            [
                "[\"MedicalBusiness\",\"Dentist\"]",
                "\"Service\"",
                "\"WebPage\"",
                "\"FAQPage\"",
                "\"BreadcrumbList\"",
            ]
        );
    }

    #[test]
    fn faq_entities_mirror_page_faqs() {
        let page = arnold();
        let doc = synthesize(&page, &site(), &business());
        let entities = doc.node("FAQPage").unwrap()["mainEntity"].as_array().unwrap();

        assert_eq!(entities.len(), page.faqs().len());
        for (entity, faq) in entities.iter().zip(page.faqs()) {
            assert_eq!(entity["name"], faq.question.as_str());
            assert_eq!(entity["acceptedAnswer"]["text"], faq.answer.as_str());
        }
    }

    #[test]
    fn empty_faqs_omit_the_faq_page() {
        let mut raw = arnold_raw();
        raw.faqs.clear();
        let page = validate(&raw, &business()).unwrap();
        let doc = synthesize(&page, &site(), &business());
        assert!(doc.node("FAQPage").is_none());
        assert!(!doc.to_json().contains("FAQPage"));
    }

    #[test]
    fn output_is_byte_identical_across_calls() {
        let (page, site, business) = (arnold(), site(), business());
        assert_eq!(
            synthesize(&page, &site, &business).to_json(),
            synthesize(&page, &site, &business).to_json()
        );
    }

    #[test]
    fn practice_node_uses_shared_business_facts() {
        let facts = business();
        let doc = synthesize(&arnold(), &site(), &facts);
        let practice = &doc.graph()[0];
        assert_eq!(practice["telephone"], "01159312935");
        assert_eq!(practice["@id"], "https://peartree.dental/#practice");
        assert_eq!(practice["address"]["postalCode"], facts.address.postal_code.as_str());
        assert_eq!(practice["openingHoursSpecification"][0]["dayOfWeek"][0], "Monday");
    }

    #[test]
    fn breadcrumbs_follow_the_slug() {
        let doc = synthesize(&arnold(), &site(), &business());
        let items = doc.node("BreadcrumbList").unwrap()["itemListElement"]
            .as_array()
            .unwrap();
        let trail: Vec<(&str, &str)> = items
            .iter()
            .map(|i| (i["name"].as_str().unwrap(), i["item"].as_str().unwrap()))
            .collect();
        assert_eq!(
            trail,
            [
                ("Home", "https://peartree.dental/"),
                ("Reviews", "https://peartree.dental/reviews"),
                ("Arnold", "https://peartree.dental/reviews/arnold"),
            ]
        );
    }

    #[test]
    fn breadcrumbs_skip_segments_without_a_page() {
        let doc = synthesize_linked(&arnold(), &site(), &business(), |slug| slug != "reviews");
        let names: Vec<&str> = doc.node("BreadcrumbList").unwrap()["itemListElement"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["Home", "Arnold"]);
        let positions: Vec<u64> = doc.node("BreadcrumbList").unwrap()["itemListElement"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["position"].as_u64().unwrap())
            .collect();
        assert_eq!(positions, [1, 2]);
    }

    #[test]
    fn interpolated_service_facts_reach_the_service_node() {
        let mut raw = arnold_raw();
        if let Some(service) = raw.service.as_mut() {
            service.service_type = Some("Dentistry for {{ locality }}".into());
            service.area_served = Some("{{ locality }}".into());
        }
        let page = validate(&raw, &business()).unwrap();
        let doc = synthesize(&page, &site(), &business());
        let service = doc.node("Service").unwrap();

        assert_eq!(service["name"], "General dentistry in Arnold");
        assert_eq!(service["serviceType"], "Dentistry for Arnold");
        assert_eq!(service["areaServed"]["name"], "Arnold");
        assert!(!doc.to_json().contains("{{"));
    }

    #[test]
    fn comparison_winners_stay_out_of_structured_data() {
        let json = synthesize(&arnold(), &site(), &business()).to_json();
        assert!(!json.contains("Legacy"));
        assert!(!json.contains("winner"));
    }

    #[test]
    fn script_tag_cannot_be_closed_by_copy() {
        let mut raw = arnold_raw();
        raw.faqs[0].answer = "Yes </script><script>alert(1)".into();
        let page = validate(&raw, &business()).unwrap();
        let tag = synthesize(&page, &site(), &business()).to_script_tag();
        assert_eq!(tag.matches("</script>").count(), 1);
        assert!(tag.ends_with("</script>"));
    }

    #[test]
    fn title_cases_hyphenated_segments() {
        assert_eq!(title_case("west-bridgford"), "West Bridgford");
        assert_eq!(title_case("reviews"), "Reviews");
    }
}
