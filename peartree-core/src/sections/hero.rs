use crate::content::{HeroSection, SectionContent, SectionKind};
use crate::markup::{Element, Node};

use super::{RenderContext, RenderError, SectionRenderer, heading, section_shell};

pub struct HeroRenderer;

impl SectionRenderer for HeroRenderer {
    fn kind(&self) -> SectionKind {
        SectionKind::Hero
    }

    fn render(
        &self,
        section: &SectionContent,
        _ctx: &RenderContext<'_>,
    ) -> Result<Option<Node>, RenderError> {
        let SectionContent::Hero(hero) = section else {
            return Err(RenderError::unexpected(self.kind(), section));
        };
        Ok(Some(render_hero(hero)))
    }
}

fn render_hero(hero: &HeroSection) -> Node {
    let eyebrow = hero
        .eyebrow
        .as_ref()
        .map(|text| Element::new("p").class("hero-eyebrow").text(text));

    let actions = (!hero.actions.is_empty()).then(|| {
        Element::new("div").class("hero-actions").children(hero.actions.iter().map(|action| {
            Element::new("a")
                .class("button")
                .attr("href", &action.href)
                .text(&action.label)
        }))
    });

    let image = hero.image.as_ref().map(|image| {
        Element::new("img")
            .class("hero-image")
            .attr("src", &image.src)
            .attr("alt", &image.alt)
    });

    section_shell(SectionKind::Hero)
        .maybe_child(eyebrow)
        .child(heading("h1", &hero.heading))
        .child(Element::new("p").class("hero-copy").text(&hero.copy))
        .maybe_child(actions)
        .maybe_child(image)
        .into()
}
