pub mod builder;
pub mod business;
pub mod composer;
pub mod config;
pub mod content;
mod interpolate;
pub mod markup;
pub mod metadata;
pub mod renderer;
pub mod scanner;
pub mod schema;
pub mod sections;
pub mod sitemap;
pub mod template;
pub mod validate;

#[cfg(test)]
mod test_support;

// Re-export main types
pub use builder::{BuildError, OutputError, Site, SiteBuilder};
pub use business::BusinessFacts;
pub use composer::{ComposeError, Page, StructureError, compose};
pub use config::{Config, SiteConfig};
pub use content::{PageContent, RawPage, SectionContent, SectionKind};
pub use metadata::{Metadata, resolve_metadata};
pub use renderer::{RenderedPage, render_page};
pub use scanner::{ContentScanner, ScannedContent, SourcedPage};
pub use schema::{JsonLd, synthesize};
pub use sections::{RenderContext, RenderError, RendererRegistry, SectionRenderer};
pub use template::{TemplateError, TemplateRenderer};
pub use validate::{ValidationError, Violation, validate};
