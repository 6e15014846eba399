use std::sync::Arc;

use anyhow::Context;
use postbox_templates_contracts::{
    RenderedTemplate, Template, TemplateService, BASE_HTML_TEMPLATE, BASE_TEXT_TEMPLATE,
    SENDER_INFO_HTML_TEMPLATE, SENDER_INFO_TEXT_TEMPLATE, TEMPLATES,
};
use tera::Tera;
use tracing::debug;

/// Renders the email templates with tera.
///
/// Html templates are registered with a `.html` suffix so tera escapes
/// everything interpolated into them, plain text templates are rendered as is.
#[derive(Debug, Clone)]
pub struct TemplateServiceImpl {
    tera: Arc<Tera>,
}

impl TemplateServiceImpl {
    pub fn new() -> anyhow::Result<Self> {
        let mut sources = vec![
            ("base.html".to_owned(), BASE_HTML_TEMPLATE),
            ("base.txt".to_owned(), BASE_TEXT_TEMPLATE),
            ("sender_info.html".to_owned(), SENDER_INFO_HTML_TEMPLATE),
            ("sender_info.txt".to_owned(), SENDER_INFO_TEXT_TEMPLATE),
        ];
        for &(name, html, text) in TEMPLATES {
            sources.push((html_name(name), html));
            sources.push((text_name(name), text));
        }

        let mut tera = Tera::default();
        tera.add_raw_templates(sources)
            .context("Failed to load email templates")?;
        debug!(count = TEMPLATES.len(), "loaded email templates");

        Ok(Self { tera: tera.into() })
    }
}

impl TemplateService for TemplateServiceImpl {
    fn render<T: Template>(&self, template: &T) -> anyhow::Result<RenderedTemplate> {
        let context = tera::Context::from_serialize(template)?;
        let html = self
            .tera
            .render(&html_name(T::NAME), &context)
            .with_context(|| format!("Failed to render {}", T::NAME))?;
        let text = self
            .tera
            .render(&text_name(T::NAME), &context)
            .with_context(|| format!("Failed to render {}", T::NAME))?;
        Ok(RenderedTemplate { html, text })
    }
}

fn html_name(name: &str) -> String {
    format!("{name}.html")
}

fn text_name(name: &str) -> String {
    format!("{name}.txt")
}
