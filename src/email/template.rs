//! Handlebars rendering for stored email templates.
//!
//! Templates support `{{field}}` placeholders and `{{#if field}}` sections.
//! Missing fields render as empty strings rather than failing, and a
//! template that does not parse falls back to its raw source so a broken
//! admin edit never blocks delivery.

use handlebars::Handlebars;
use tracing::warn;

pub fn render(source: &str, data: &serde_json::Value) -> String {
    let registry = Handlebars::new();
    match registry.render_template(source, data) {
        Ok(rendered) => rendered,
        Err(err) => {
            warn!(%err, "template rendering failed, using raw source");
            source.to_string()
        }
    }
}
