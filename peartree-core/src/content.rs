//! Content records.
//!
//! `Raw*` types are what authors write (TOML files or a CMS JSON export).
//! They are deliberately loose so that validation can report every problem
//! at once. Everything else in this module is the validated shape produced by
//! [`crate::validate::validate`], which is the only way to obtain a
//! [`PageContent`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawPage {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub breadcrumb_label: Option<String>,
    #[serde(default)]
    pub service: Option<ServiceFacts>,
    /// Values available to `{{ ... }}` placeholders in every string of the page.
    #[serde(default)]
    pub vars: BTreeMap<String, String>,
    #[serde(default)]
    pub sections: Vec<RawSection>,
    #[serde(default)]
    pub faqs: Vec<RawFaq>,
}

/// A section before its kind has been resolved. The remaining keys are kept
/// as JSON so they can be checked against the shape of `kind`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawSection {
    #[serde(default)]
    pub kind: String,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawFaq {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

/// Validated content for a single page.
#[derive(Debug, Clone, Serialize)]
pub struct PageContent {
    pub(crate) slug: String,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) breadcrumb_label: String,
    pub(crate) service: Option<ServiceFacts>,
    pub(crate) sections: Vec<SectionContent>,
    pub(crate) faqs: Vec<FaqEntry>,
}

impl PageContent {
    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn breadcrumb_label(&self) -> &str {
        &self.breadcrumb_label
    }

    pub fn service(&self) -> Option<&ServiceFacts> {
        self.service.as_ref()
    }

    pub fn sections(&self) -> &[SectionContent] {
        &self.sections
    }

    pub fn faqs(&self) -> &[FaqEntry] {
        &self.faqs
    }

    /// The hero copy lives on the hero section; this reads it from there.
    pub fn hero_copy(&self) -> Option<&str> {
        self.sections.iter().find_map(|section| match section {
            SectionContent::Hero(hero) => Some(hero.copy.as_str()),
            _ => None,
        })
    }

    pub fn count_of(&self, kind: SectionKind) -> usize {
        self.sections.iter().filter(|s| s.kind() == kind).count()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServiceFacts {
    pub name: String,
    /// schema.org `serviceType`, e.g. "Composite bonding"
    #[serde(default)]
    pub service_type: Option<String>,
    /// Locality the page targets, e.g. "Arnold"
    #[serde(default)]
    pub area_served: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Hero,
    BenefitGrid,
    ComparisonTable,
    PriorityList,
    Testimonial,
    BeforeAfter,
    Directions,
    Cta,
}

impl SectionKind {
    pub const ALL: [SectionKind; 8] = [
        SectionKind::Hero,
        SectionKind::BenefitGrid,
        SectionKind::ComparisonTable,
        SectionKind::PriorityList,
        SectionKind::Testimonial,
        SectionKind::BeforeAfter,
        SectionKind::Directions,
        SectionKind::Cta,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Hero => "hero",
            SectionKind::BenefitGrid => "benefit_grid",
            SectionKind::ComparisonTable => "comparison_table",
            SectionKind::PriorityList => "priority_list",
            SectionKind::Testimonial => "testimonial",
            SectionKind::BeforeAfter => "before_after",
            SectionKind::Directions => "directions",
            SectionKind::Cta => "cta",
        }
    }

    /// Sections whose markup includes practice contact details.
    pub fn requires_business_facts(&self) -> bool {
        matches!(self, SectionKind::Directions | SectionKind::Cta)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSectionKind(pub String);

impl fmt::Display for UnknownSectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<&str> = SectionKind::ALL.iter().map(|k| k.as_str()).collect();
        write!(
            f,
            "unknown section kind `{}` (expected one of: {})",
            self.0,
            known.join(", ")
        )
    }
}

impl FromStr for SectionKind {
    type Err = UnknownSectionKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        SectionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownSectionKind(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionContent {
    Hero(HeroSection),
    BenefitGrid(BenefitGridSection),
    ComparisonTable(ComparisonTableSection),
    PriorityList(PriorityListSection),
    Testimonial(TestimonialSection),
    BeforeAfter(BeforeAfterSection),
    Directions(DirectionsSection),
    Cta(CtaSection),
}

impl SectionContent {
    pub fn kind(&self) -> SectionKind {
        match self {
            SectionContent::Hero(_) => SectionKind::Hero,
            SectionContent::BenefitGrid(_) => SectionKind::BenefitGrid,
            SectionContent::ComparisonTable(_) => SectionKind::ComparisonTable,
            SectionContent::PriorityList(_) => SectionKind::PriorityList,
            SectionContent::Testimonial(_) => SectionKind::Testimonial,
            SectionContent::BeforeAfter(_) => SectionKind::BeforeAfter,
            SectionContent::Directions(_) => SectionKind::Directions,
            SectionContent::Cta(_) => SectionKind::Cta,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HeroSection {
    pub heading: String,
    #[serde(default)]
    pub eyebrow: Option<String>,
    pub copy: String,
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(default)]
    pub actions: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BenefitGridSection {
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub intro: Option<String>,
    #[serde(default)]
    pub benefits: Vec<Benefit>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Benefit {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub icon: Icon,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    #[default]
    Check,
    Shield,
    Clock,
    Smile,
    Tooth,
    Heart,
    Star,
    Sparkles,
    MapPin,
    Phone,
    Calendar,
    PoundSterling,
    Users,
    Award,
}

impl Icon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::Check => "check",
            Icon::Shield => "shield",
            Icon::Clock => "clock",
            Icon::Smile => "smile",
            Icon::Tooth => "tooth",
            Icon::Heart => "heart",
            Icon::Star => "star",
            Icon::Sparkles => "sparkles",
            Icon::MapPin => "map-pin",
            Icon::Phone => "phone",
            Icon::Calendar => "calendar",
            Icon::PoundSterling => "pound-sterling",
            Icon::Users => "users",
            Icon::Award => "award",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ComparisonTableSection {
    #[serde(default)]
    pub heading: Option<String>,
    /// Column labels, e.g. `["Legacy", "Modern"]`.
    pub options: Vec<String>,
    #[serde(default)]
    pub rows: Vec<ComparisonRow>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ComparisonRow {
    pub factor: String,
    /// One value per option, in option order.
    pub values: Vec<String>,
    /// Must equal one of the table's option labels.
    pub winner: String,
}

impl ComparisonRow {
    pub fn is_winner(&self, option: &str) -> bool {
        self.winner == option
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PriorityListSection {
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub items: Vec<PriorityItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PriorityItem {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TestimonialSection {
    pub quote: String,
    pub author: String,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub rating: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BeforeAfterSection {
    #[serde(default)]
    pub heading: Option<String>,
    pub before: Image,
    pub after: Image,
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DirectionsSection {
    #[serde(default)]
    pub heading: Option<String>,
    /// Where the visitor is travelling from, e.g. "Arnold".
    pub from: String,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub travel_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CtaSection {
    pub heading: String,
    pub body: String,
    #[serde(default)]
    pub button_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Image {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Link {
    pub label: String,
    pub href: String,
}
