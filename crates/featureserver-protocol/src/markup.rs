//! Positional markup substitution and the small HTML fragments shared by
//! the markup renderings.
//!
//! Markup skeletons use printf-style placeholders that are filled strictly
//! by position:
//!
//! | Placeholder | Conversion |
//! |---|---|
//! | `%s` | string form; a missing value prints `undefined` |
//! | `%d` | numeric form; anything non-numeric prints `NaN` |
//! | `%j` | compact JSON |
//! | `%%` | a literal `%` |
//!
//! Any other `%` is copied through. Arguments beyond the last placeholder
//! are appended, separated by spaces; placeholders left without an
//! argument stay in the output verbatim. The exact output is a contract
//! with clients that scrape these pages, so none of this is validated.

use fs_common::{Envelope, Field};
use serde_json::Value;

const ENVELOPE_TEMPLATE: &str = "<ul>XMin: %d<br/> YMin: %d<br/> \
                                 XMax: %d<br/> YMax: %d<br/> \
                                 Spatial Reference: %d<br/></ul>";

const FIELD_TEMPLATE: &str =
    "<li>%s <i>(type: %s, alias: %s, nullable: %s, editable: %s)</i></li>\n";

const SERVICE_ENTRY_TEMPLATE: &str = "<li><a href=\"%s\">%s</a> (%s)</li>\n";

const LAYER_ENTRY_TEMPLATE: &str = "<li><a href=\"%s\">%s</a> (%d)</li>\n";

const DATA_PROVIDER_ENTRY_TEMPLATE: &str = "<li><a href='%s'>%s</a></li>\n";

/// One positional argument for [`format`].
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    /// A value that was not present at all.
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// Arrays and objects.
    Json(Value),
}

impl FormatArg {
    /// `%s` conversion.
    pub fn to_display_string(&self) -> String {
        match self {
            FormatArg::Undefined => "undefined".to_string(),
            FormatArg::Null => "null".to_string(),
            FormatArg::Bool(b) => b.to_string(),
            FormatArg::Number(n) => format_number(*n),
            FormatArg::Text(s) => s.clone(),
            FormatArg::Json(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::Null => String::new(),
                    other => FormatArg::from(other).to_display_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
            FormatArg::Json(other) => other.to_string(),
        }
    }

    /// `%d` conversion.
    pub fn to_number_string(&self) -> String {
        let n = match self {
            FormatArg::Undefined | FormatArg::Json(_) => f64::NAN,
            FormatArg::Null => 0.0,
            FormatArg::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            FormatArg::Number(n) => *n,
            FormatArg::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(f64::NAN)
                }
            }
        };
        format_number(n)
    }

    /// `%j` conversion.
    pub fn to_json_string(&self) -> String {
        match self {
            FormatArg::Undefined => "undefined".to_string(),
            FormatArg::Null => "null".to_string(),
            FormatArg::Bool(b) => b.to_string(),
            FormatArg::Number(n) if n.is_finite() => format_number(*n),
            FormatArg::Number(_) => "null".to_string(),
            FormatArg::Text(s) => Value::String(s.clone()).to_string(),
            FormatArg::Json(v) => v.to_string(),
        }
    }
}

impl From<&Value> for FormatArg {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => FormatArg::Null,
            Value::Bool(b) => FormatArg::Bool(*b),
            Value::Number(n) => FormatArg::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => FormatArg::Text(s.clone()),
            other => FormatArg::Json(other.clone()),
        }
    }
}

impl From<&str> for FormatArg {
    fn from(s: &str) -> Self {
        FormatArg::Text(s.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(s: String) -> Self {
        FormatArg::Text(s)
    }
}

impl From<f64> for FormatArg {
    fn from(n: f64) -> Self {
        FormatArg::Number(n)
    }
}

impl From<u32> for FormatArg {
    fn from(n: u32) -> Self {
        FormatArg::Number(f64::from(n))
    }
}

impl From<bool> for FormatArg {
    fn from(b: bool) -> Self {
        FormatArg::Bool(b)
    }
}

impl<T: Into<FormatArg>> From<Option<T>> for FormatArg {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FormatArg::Undefined)
    }
}

/// Render a number the way the markup has always shown it: integral
/// values without a fractional part, `NaN`/`Infinity` spelled out, and
/// exponent notation (`1e-7`, `1e+21`) below 1e-6 and from 1e21 up.
pub fn format_number(n: f64) -> String {
    let abs = n.abs();
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n == 0.0 {
        "0".to_string()
    } else if abs < 1e-6 || abs >= 1e21 {
        format_exponent(n)
    } else {
        // Display already prints the shortest digits, without `.0`.
        format!("{}", n)
    }
}

/// Shortest mantissa with a signed exponent, e.g. `1.5e+21`.
fn format_exponent(n: f64) -> String {
    let text = format!("{:e}", n);
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => text,
    }
}

/// Substitute `args` positionally into `template`.
pub fn format(template: &str, args: &[FormatArg]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut remaining = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        match chars.peek().copied() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some(spec @ ('s' | 'd' | 'j')) => {
                chars.next();
                match remaining.next() {
                    Some(arg) => out.push_str(&match spec {
                        's' => arg.to_display_string(),
                        'd' => arg.to_number_string(),
                        _ => arg.to_json_string(),
                    }),
                    None => {
                        out.push('%');
                        out.push(spec);
                    }
                }
            }
            _ => out.push('%'),
        }
    }

    for arg in remaining {
        out.push(' ');
        out.push_str(&arg.to_display_string());
    }

    out
}

/// Render an envelope as the five-line block used on service and layer pages.
pub fn format_envelope(env: &Envelope) -> String {
    format(
        ENVELOPE_TEMPLATE,
        &[
            env.xmin.into(),
            env.ymin.into(),
            env.xmax.into(),
            env.ymax.into(),
            env.spatial_reference.wkid.into(),
        ],
    )
}

/// Render one list item per field, in order. Editability is always
/// reported as `false`.
pub fn format_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| {
            format(
                FIELD_TEMPLATE,
                &[
                    field.name.as_str().into(),
                    field.type_.as_str().into(),
                    field.alias.as_str().into(),
                    field.nullable.into(),
                    false.into(),
                ],
            )
        })
        .collect()
}

/// List item for one entry of the service catalog.
pub(crate) fn service_entry(service: &Value) -> String {
    format(
        SERVICE_ENTRY_TEMPLATE,
        &[
            service.get("url").into(),
            service.get("name").into(),
            service.get("type").into(),
        ],
    )
}

/// List item for one layer of a feature service.
pub(crate) fn layer_entry(layer: &Value, layer_url: String) -> String {
    format(
        LAYER_ENTRY_TEMPLATE,
        &[layer_url.into(), layer.get("name").into(), layer.get("id").into()],
    )
}

/// List item for one registered data provider.
pub(crate) fn data_provider_entry(services_url: String, name: &str) -> String {
    format(DATA_PROVIDER_ENTRY_TEMPLATE, &[services_url.into(), name.into()])
}
