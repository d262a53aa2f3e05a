//! Rendering of popup markup from a flat property set.

use serde_json::Value;
use strfmt::{strfmt_map, Formatter};

use crate::error::IncidentsError;
use crate::feature::Properties;

/// Popup markup used unless the overlay is given another one.
///
/// Placeholders are `{property-name}`; literal braces are written as `{{` and `}}`.
pub const DEFAULT_TEMPLATE: &str = r#"<div class="nswrfsmajorincidents-popup">
<h4><a href="{link}" target="_blank" rel="noopener">{title}</a></h4>
<dl class="dl-horizontal">
<dt>Alert Level</dt><dd class="text-{alert-level-color}">{alert-level}</dd>
<dt>Status</dt><dd class="text-{status-color}">{status}</dd>
<dt>Location</dt><dd>{location}</dd>
<dt>Council Area</dt><dd>{council-area}</dd>
<dt>Type</dt><dd>{type}</dd>
<dt>Size</dt><dd>{size}</dd>
<dt>Responsible Agency</dt><dd>{responsible-agency}</dd>
</dl>
<p class="text-muted"><small>Current as of <span title="{pub-date}">{current-as-of}</span> ({current-as-of-ago})</small></p>
</div>"#;

/// Renders the template with the properties.
///
/// Missing and `null` properties render as an empty string. Values are HTML escaped.
pub fn render_template(template: &str, properties: &Properties) -> Result<String, IncidentsError> {
    let rendered = strfmt_map(template, |mut fmt: Formatter| {
        let value = properties.get(fmt.key).map(display_value).unwrap_or_default();
        fmt.str(&escape_html(&value))
    })?;

    Ok(rendered)
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }

    escaped
}
