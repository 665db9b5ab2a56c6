use std::path::PathBuf;

use peartree_core::markup::element_text;
use peartree_core::{
    BusinessFacts, Config, ContentScanner, RawPage, RenderContext, RendererRegistry, SiteBuilder,
    SiteConfig, compose, render_page, synthesize, validate,
};

fn demo_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../demo")
}

fn demo_config() -> Config {
    Config::read(demo_dir().join("peartree.toml")).unwrap()
}

fn demo_business() -> BusinessFacts {
    demo_config().business().unwrap().clone()
}

fn arnold_raw() -> RawPage {
    let content = ContentScanner::new(demo_dir().join("content")).scan().unwrap();
    content
        .pages
        .into_iter()
        .find(|p| p.raw.slug == "reviews/arnold")
        .unwrap()
        .raw
}

#[test]
fn arnold_review_page_renders_end_to_end() {
    let (site, business) = (demo_config().site, demo_business());
    assert_eq!(business.phone, "01159312935");

    let page = validate(&arnold_raw(), &business).unwrap();
    assert_eq!(page.faqs().len(), 2);

    let rendered = render_page(&page, &site, &business).unwrap();
    assert_eq!(rendered.markup.matches("class=\"faq-item\"").count(), 2);
    assert_eq!(rendered.metadata.canonical_url, "https://peartree.dental/reviews/arnold");
    assert!(rendered.markup.contains("href=\"tel:01159312935\""));

    let faq_page = rendered.json_ld.node("FAQPage").unwrap();
    assert_eq!(faq_page["mainEntity"].as_array().unwrap().len(), 2);
    assert!(rendered.metadata.description.chars().count() <= 160);
}

#[test]
fn visible_questions_match_structured_data() {
    let (site, business) = (demo_config().site, demo_business());
    let page = validate(&arnold_raw(), &business).unwrap();

    let ctx = RenderContext::new(&site).with_business(&business);
    let body = compose(&page, &RendererRegistry::default(), &ctx).unwrap();
    let visible: Vec<String> = body
        .sections()
        .iter()
        .flat_map(|node| node.find_by_class("faq-question"))
        .map(element_text)
        .collect();

    let doc = synthesize(&page, &site, &business);
    let structured: Vec<&str> = doc.node("FAQPage").unwrap()["mainEntity"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["name"].as_str().unwrap())
        .collect();

    assert_eq!(visible, structured);
    assert_eq!(visible[0], "How far is the practice from Arnold?");
}

#[test]
fn traditional_winner_is_rejected() {
    let mut raw = arnold_raw();
    let table = raw
        .sections
        .iter_mut()
        .find(|s| s.kind == "comparison_table")
        .unwrap();
    table.fields["rows"][1]["winner"] = serde_json::json!("Traditional");

    let err = validate(&raw, &demo_business()).unwrap_err();
    assert_eq!(err.violations().len(), 1);
    assert!(err.violations()[0].field.ends_with("rows[1].winner"));
    assert!(err.to_string().contains("X-rays"));
}

#[test]
fn page_without_faqs_has_no_accordion_or_faq_page() {
    let (site, business) = (demo_config().site, demo_business());
    let mut raw = arnold_raw();
    raw.faqs.clear();
    let page = validate(&raw, &business).unwrap();

    let rendered = render_page(&page, &site, &business).unwrap();
    assert!(!rendered.markup.contains("faq-item"));
    assert!(!rendered.markup.contains("Frequently asked questions"));
    assert!(rendered.json_ld.node("FAQPage").is_none());
}

#[test]
fn canonical_url_never_drifts_from_base_and_slug() {
    let business = demo_business();
    let page = validate(&arnold_raw(), &business).unwrap();
    for base in ["https://peartree.dental", "https://staging.peartree.dental/"] {
        let site = SiteConfig {
            base_url: base.into(),
            ..SiteConfig::default()
        };
        let rendered = render_page(&page, &site, &business).unwrap();
        assert_eq!(rendered.metadata.canonical_url, format!("{}{}", site.base_url(), page.slug()));
    }
}

#[test]
fn demo_site_builds_to_disk() {
    let config = demo_config();
    let content = ContentScanner::new(demo_dir().join("content")).scan().unwrap();
    assert!(content.unreadable.is_empty());
    let site = SiteBuilder::new()
        .site_config(config.site.clone())
        .business_facts(demo_business())
        .add_scanned(content)
        .build()
        .unwrap();
    assert_eq!(site.pages().len(), 2);

    let out = tempfile::tempdir().unwrap();
    site.render_all(out.path()).unwrap();

    let arnold = std::fs::read_to_string(out.path().join("reviews/arnold/index.html")).unwrap();
    assert!(arnold.contains("<meta property=\"og:image\" content=\"https://peartree.dental/img/og-default.jpg\">"));
    let bonding =
        std::fs::read_to_string(out.path().join("services/composite-bonding/index.html")).unwrap();
    assert!(bonding.contains("Book a consultation"));
    assert!(!bonding.contains("faq-item"));
    assert!(out.path().join("sitemap.xml").exists());
}
