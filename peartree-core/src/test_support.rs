//! Fixtures shared by unit tests.

use std::collections::BTreeMap;

use serde_json::{Value, json};

use crate::business::{BusinessFacts, GeoCoordinates, OpeningHours, PostalAddress, Weekday};
use crate::config::SiteConfig;
use crate::content::{PageContent, RawFaq, RawPage, RawSection, ServiceFacts};
use crate::validate::validate;

pub fn business() -> BusinessFacts {
    BusinessFacts {
        name: "Peartree Dental".into(),
        phone: "01159312935".into(),
        email: Some("hello@peartree.dental".into()),
        address: PostalAddress {
            street: "12 Mansfield Road".into(),
            locality: "Nottingham".into(),
            region: Some("Nottinghamshire".into()),
            postal_code: "NG5 2BT".into(),
            country: "GB".into(),
        },
        geo: GeoCoordinates {
            latitude: 52.9925,
            longitude: -1.1365,
        },
        opening_hours: vec![
            OpeningHours {
                days: vec![
                    Weekday::Monday,
                    Weekday::Tuesday,
                    Weekday::Wednesday,
                    Weekday::Thursday,
                    Weekday::Friday,
                ],
                opens: "08:45".into(),
                closes: "17:30".into(),
            },
            OpeningHours {
                days: vec![Weekday::Saturday],
                opens: "09:00".into(),
                closes: "13:00".into(),
            },
        ],
        price_range: "££".into(),
        booking_url: "https://peartree.dental/book".into(),
    }
}

pub fn site() -> SiteConfig {
    SiteConfig::default()
}

pub fn raw_section(kind: &str, fields: Value) -> RawSection {
    let Value::Object(fields) = fields else {
        panic!("section fields must be a JSON object");
    };
    RawSection {
        kind: kind.into(),
        fields,
    }
}

fn comparison_row(factor: &str, old: &str, new: &str) -> Value {
    json!({"factor": factor, "values": [old, new], "winner": "Modern"})
}

/// The Arnold review landing page: hero, benefits, a five row comparison,
/// directions and a CTA, plus two questions.
pub fn arnold_raw() -> RawPage {
    RawPage {
        slug: "reviews/arnold".into(),
        title: "Dentist near {{ locality }} | Peartree Dental".into(),
        description: "Patients from {{ locality }} rate our calm, modern practice. \
                      Read what they say and book online."
            .into(),
        breadcrumb_label: Some("{{ locality }}".into()),
        service: Some(ServiceFacts {
            name: "General dentistry in {{ locality }}".into(),
            service_type: Some("General dentistry".into()),
            area_served: Some("Arnold".into()),
        }),
        vars: BTreeMap::from([("locality".to_string(), "Arnold".to_string())]),
        sections: vec![
            raw_section(
                "hero",
                json!({
                    "heading": "The dentist {{ locality }} patients recommend",
                    "eyebrow": "Reviews",
                    "copy": "Ten minutes from {{ locality }}, open early and late.",
                    "actions": [{"label": "Book online", "href": "https://peartree.dental/book"}]
                }),
            ),
            raw_section(
                "benefit_grid",
                json!({
                    "heading": "Why people travel from {{ locality }}",
                    "benefits": [
                        {"title": "Early appointments", "body": "From 08:45 on weekdays.", "icon": "clock"},
                        {"title": "Free parking", "body": "Spaces right outside.", "icon": "map-pin"}
                    ]
                }),
            ),
            raw_section(
                "comparison_table",
                json!({
                    "heading": "How dentistry has changed",
                    "options": ["Legacy", "Modern"],
                    "rows": [
                        comparison_row("Impressions", "Putty trays", "3D scan"),
                        comparison_row("X-rays", "Film", "Low dose digital"),
                        comparison_row("Fillings", "Amalgam", "Tooth coloured"),
                        comparison_row("Anaesthetic", "Needle only", "Numbing gel first"),
                        comparison_row("Reminders", "Postcard", "Text message"),
                    ]
                }),
            ),
            raw_section(
                "directions",
                json!({
                    "from": "{{ locality }}",
                    "steps": ["Head south on the A60", "Turn left after the ring road"],
                    "travel_time": "About 10 minutes by car"
                }),
            ),
            raw_section(
                "cta",
                json!({"heading": "Ready when you are", "body": "New patients welcome."}),
            ),
        ],
        faqs: vec![
            RawFaq {
                question: "How far is the practice from Arnold?".into(),
                answer: "About ten minutes from {{ locality }} by car or bus.".into(),
            },
            RawFaq {
                question: "Do you take new patients?".into(),
                answer: "Yes, adults and children.".into(),
            },
        ],
    }
}

pub fn arnold() -> PageContent {
    match validate(&arnold_raw(), &business()) {
        Ok(page) => page,
        Err(err) => panic!("fixture should validate: {err}"),
    }
}
