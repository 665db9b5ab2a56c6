use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::business::BusinessFacts;
use crate::content::{
    BeforeAfterSection, BenefitGridSection, ComparisonTableSection, CtaSection, DirectionsSection,
    FaqEntry, HeroSection, Image, PageContent, PriorityListSection, RawPage, RawSection,
    SectionContent, SectionKind, TestimonialSection,
};
use crate::interpolate::Interpolator;

/// Lowercase words separated by single hyphens, optionally nested with `/`.
static SLUG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*(?:/[a-z0-9]+(?:-[a-z0-9]+)*)*$")
        .expect("slug pattern is a valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every problem found in one record, not just the first.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{page} has {} problem(s):{}", .violations.len(), list_violations(.violations))]
pub struct ValidationError {
    page: String,
    violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new(page: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            page: page.into(),
            violations,
        }
    }

    /// The slug or source file the violations belong to.
    pub fn page(&self) -> &str {
        &self.page
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn mentions(&self, needle: &str) -> bool {
        self.violations
            .iter()
            .any(|v| v.field.contains(needle) || v.message.contains(needle))
    }
}

fn list_violations(violations: &[Violation]) -> String {
    violations.iter().map(|v| format!("\n  - {v}")).collect()
}

#[derive(Debug, Default)]
pub(crate) struct Violations(Vec<Violation>);

impl Violations {
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(Violation {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn require_text(&mut self, field: impl Into<String>, value: &str) {
        if value.trim().is_empty() {
            self.push(field, "must not be empty");
        }
    }

    pub fn into_result<T>(self, page: impl Into<String>, value: T) -> Result<T, ValidationError> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError::new(page, self.0))
        }
    }
}

pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_PATTERN.is_match(slug)
}

/// Turns authored content into a [`PageContent`], or lists everything wrong
/// with it.
pub fn validate(raw: &RawPage, business: &BusinessFacts) -> Result<PageContent, ValidationError> {
    let mut violations = Violations::default();
    let interpolator = Interpolator::new(&raw.vars, business);

    let slug = raw.slug.trim().trim_matches('/').to_string();
    if slug.is_empty() {
        violations.push("slug", "must not be empty");
    } else if !is_valid_slug(&slug) {
        violations.push(
            "slug",
            format!("`{slug}` must be lowercase letters, digits and hyphens, with `/` between segments"),
        );
    }

    let title = interpolator.text("title", &raw.title, &mut violations);
    violations.require_text("title", &title);
    let description = interpolator.text("description", &raw.description, &mut violations);
    violations.require_text("description", &description);

    let breadcrumb_label = match &raw.breadcrumb_label {
        Some(label) => {
            let label = interpolator.text("breadcrumb_label", label, &mut violations);
            violations.require_text("breadcrumb_label", &label);
            label
        }
        None => title.clone(),
    };

    let service = raw.service.clone().map(|mut service| {
        service.name = interpolator.text("service.name", &service.name, &mut violations);
        violations.require_text("service.name", &service.name);
        for (field, value) in [
            ("service.service_type", &mut service.service_type),
            ("service.area_served", &mut service.area_served),
        ] {
            if let Some(text) = value {
                *text = interpolator.text(field, text, &mut violations);
                violations.require_text(field, text);
            }
        }
        service
    });

    let sections: Vec<SectionContent> = raw
        .sections
        .iter()
        .enumerate()
        .filter_map(|(i, section)| resolve_section(i, section, &interpolator, &mut violations))
        .collect();
    check_section_order(raw, &mut violations);

    let faqs: Vec<FaqEntry> = raw
        .faqs
        .iter()
        .enumerate()
        .map(|(i, faq)| {
            let question = interpolator.text(&format!("faqs[{i}].question"), &faq.question, &mut violations);
            let answer = interpolator.text(&format!("faqs[{i}].answer"), &faq.answer, &mut violations);
            violations.require_text(format!("faqs[{i}].question"), &question);
            violations.require_text(format!("faqs[{i}].answer"), &answer);
            FaqEntry {
                question: question.trim().to_string(),
                answer: answer.trim().to_string(),
            }
        })
        .collect();

    let mut seen = HashSet::new();
    for (i, faq) in faqs.iter().enumerate() {
        if !faq.question.is_empty() && !seen.insert(faq.question.to_lowercase()) {
            violations.push(
                format!("faqs[{i}].question"),
                format!("\"{}\" is asked more than once", faq.question),
            );
        }
    }

    let label = if slug.is_empty() { "page".to_string() } else { slug.clone() };
    debug!(page = %label, violations = violations.0.len(), "validated page");

    violations.into_result(
        label,
        PageContent {
            slug,
            title,
            description,
            breadcrumb_label,
            service,
            sections,
            faqs,
        },
    )
}

fn resolve_section(
    index: usize,
    raw: &RawSection,
    interpolator: &Interpolator,
    violations: &mut Violations,
) -> Option<SectionContent> {
    let field = format!("sections[{index}]");
    if raw.kind.trim().is_empty() {
        violations.push(format!("{field}.kind"), "is missing");
        return None;
    }
    let kind: SectionKind = match raw.kind.parse() {
        Ok(kind) => kind,
        Err(err) => {
            violations.push(format!("{field}.kind"), err.to_string());
            return None;
        }
    };

    let value = interpolator.value(&field, Value::Object(raw.fields.clone()), violations);
    let field = format!("{field} ({kind})");
    let section = match kind {
        SectionKind::Hero => shape(&field, value, violations).map(SectionContent::Hero),
        SectionKind::BenefitGrid => shape(&field, value, violations).map(SectionContent::BenefitGrid),
        SectionKind::ComparisonTable => {
            shape(&field, value, violations).map(SectionContent::ComparisonTable)
        }
        SectionKind::PriorityList => shape(&field, value, violations).map(SectionContent::PriorityList),
        SectionKind::Testimonial => shape(&field, value, violations).map(SectionContent::Testimonial),
        SectionKind::BeforeAfter => shape(&field, value, violations).map(SectionContent::BeforeAfter),
        SectionKind::Directions => shape(&field, value, violations).map(SectionContent::Directions),
        SectionKind::Cta => shape(&field, value, violations).map(SectionContent::Cta),
    }?;

    check_section(&field, &section, violations);
    Some(section)
}

fn shape<T: DeserializeOwned>(field: &str, value: Value, violations: &mut Violations) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(section) => Some(section),
        Err(err) => {
            violations.push(field, err.to_string());
            None
        }
    }
}

fn check_section_order(raw: &RawPage, violations: &mut Violations) {
    if raw.sections.is_empty() {
        violations.push("sections", "a page needs at least a hero section");
        return;
    }

    // Judge order on the authored kinds so a malformed hero is not also
    // reported as a missing one.
    let kinds: Vec<Option<SectionKind>> = raw.sections.iter().map(|s| s.kind.parse().ok()).collect();
    if kinds[0] != Some(SectionKind::Hero) {
        violations.push("sections[0]", format!("the first section must be a hero, found `{}`", raw.sections[0].kind));
    }
    let heroes = kinds.iter().filter(|k| **k == Some(SectionKind::Hero)).count();
    if heroes > 1 {
        violations.push("sections", format!("exactly one hero is allowed, found {heroes}"));
    }
}

fn check_section(field: &str, section: &SectionContent, violations: &mut Violations) {
    match section {
        SectionContent::Hero(hero) => check_hero(field, hero, violations),
        SectionContent::BenefitGrid(grid) => check_benefits(field, grid, violations),
        SectionContent::ComparisonTable(table) => check_comparison(field, table, violations),
        SectionContent::PriorityList(list) => check_priorities(field, list, violations),
        SectionContent::Testimonial(testimonial) => check_testimonial(field, testimonial, violations),
        SectionContent::BeforeAfter(before_after) => check_before_after(field, before_after, violations),
        SectionContent::Directions(directions) => check_directions(field, directions, violations),
        SectionContent::Cta(cta) => check_cta(field, cta, violations),
    }
}

fn check_hero(field: &str, hero: &HeroSection, violations: &mut Violations) {
    violations.require_text(format!("{field}.heading"), &hero.heading);
    violations.require_text(format!("{field}.copy"), &hero.copy);
    if let Some(image) = &hero.image {
        check_image(&format!("{field}.image"), image, violations);
    }
    for (i, action) in hero.actions.iter().enumerate() {
        violations.require_text(format!("{field}.actions[{i}].label"), &action.label);
        violations.require_text(format!("{field}.actions[{i}].href"), &action.href);
    }
}

fn check_benefits(field: &str, grid: &BenefitGridSection, violations: &mut Violations) {
    for (i, benefit) in grid.benefits.iter().enumerate() {
        violations.require_text(format!("{field}.benefits[{i}].title"), &benefit.title);
        violations.require_text(format!("{field}.benefits[{i}].body"), &benefit.body);
    }
}

fn check_comparison(field: &str, table: &ComparisonTableSection, violations: &mut Violations) {
    if table.options.len() < 2 {
        violations.push(
            format!("{field}.options"),
            format!("a comparison needs at least two options, found {}", table.options.len()),
        );
    }
    let mut labels = HashSet::new();
    for (i, option) in table.options.iter().enumerate() {
        violations.require_text(format!("{field}.options[{i}]"), option);
        if !labels.insert(option.as_str()) {
            violations.push(format!("{field}.options[{i}]"), format!("`{option}` is listed twice"));
        }
    }

    for (i, row) in table.rows.iter().enumerate() {
        let row_field = format!("{field}.rows[{i}]");
        violations.require_text(format!("{row_field}.factor"), &row.factor);
        if row.values.len() != table.options.len() {
            violations.push(
                format!("{row_field}.values"),
                format!(
                    "row \"{}\" has {} value(s) for {} option(s)",
                    row.factor,
                    row.values.len(),
                    table.options.len()
                ),
            );
        }
        if !table.options.iter().any(|option| row.is_winner(option)) {
            violations.push(
                format!("{row_field}.winner"),
                format!(
                    "row \"{}\" names \"{}\" as winner, which is not one of the compared options [{}]",
                    row.factor,
                    row.winner,
                    table
                        .options
                        .iter()
                        .map(|o| format!("\"{o}\""))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            );
        }
    }
}

fn check_priorities(field: &str, list: &PriorityListSection, violations: &mut Violations) {
    for (i, item) in list.items.iter().enumerate() {
        violations.require_text(format!("{field}.items[{i}].title"), &item.title);
        violations.require_text(format!("{field}.items[{i}].body"), &item.body);
    }
}

fn check_testimonial(field: &str, testimonial: &TestimonialSection, violations: &mut Violations) {
    violations.require_text(format!("{field}.quote"), &testimonial.quote);
    violations.require_text(format!("{field}.author"), &testimonial.author);
    if let Some(rating) = testimonial.rating
        && !(1..=5).contains(&rating)
    {
        violations.push(format!("{field}.rating"), format!("{rating} is outside 1..=5"));
    }
}

fn check_before_after(field: &str, section: &BeforeAfterSection, violations: &mut Violations) {
    check_image(&format!("{field}.before"), &section.before, violations);
    check_image(&format!("{field}.after"), &section.after, violations);
}

fn check_directions(field: &str, directions: &DirectionsSection, violations: &mut Violations) {
    violations.require_text(format!("{field}.from"), &directions.from);
    for (i, step) in directions.steps.iter().enumerate() {
        violations.require_text(format!("{field}.steps[{i}]"), step);
    }
}

fn check_cta(field: &str, cta: &CtaSection, violations: &mut Violations) {
    violations.require_text(format!("{field}.heading"), &cta.heading);
    violations.require_text(format!("{field}.body"), &cta.body);
}

fn check_image(field: &str, image: &Image, violations: &mut Violations) {
    violations.require_text(format!("{field}.src"), &image.src);
    violations.require_text(format!("{field}.alt"), &image.alt);
}
