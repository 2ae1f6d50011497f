//! Best-effort normalization of an untrusted settings document.
//!
//! Admin form submissions arrive as loosely-typed JSON: nothing is trusted
//! to be present or to have the right type. [`sanitize_options`] is a total
//! function over that input space: malformed scalars fall back to defaults,
//! malformed channel entries are dropped individually, and the result is
//! always an internally-consistent [`WidgetOptions`]. It never fails.
//!
//! Free text is stripped of markup and control characters here as a
//! secondary defense; the template engine's output escaping remains the
//! authoritative one.

use {serde_json::Value, tracing::debug};

use crate::options::{ChannelEntry, ChannelKind, Position, WidgetOptions};

/// Normalize a raw settings submission into a valid [`WidgetOptions`].
///
/// Idempotent: sanitizing an already-sanitized document is a no-op.
pub fn sanitize_options(raw: &Value) -> WidgetOptions {
    let channels = match raw.get("channels") {
        Some(Value::Array(items)) => items.iter().filter_map(sanitize_channel).collect(),
        _ => Vec::new(),
    };

    WidgetOptions {
        enabled: truthy(raw.get("enabled")),
        position: position(raw.get("position")),
        button_size: button_size(raw.get("button_size")),
        button_color: sanitize_hex_color(&lossy_str(raw.get("button_color"))),
        icon_color: sanitize_hex_color(&lossy_str(raw.get("icon_color"))),
        show_on_mobile: truthy(raw.get("show_on_mobile")),
        show_on_desktop: truthy(raw.get("show_on_desktop")),
        channels,
    }
}

fn sanitize_channel(raw: &Value) -> Option<ChannelEntry> {
    let obj = raw.as_object()?;

    let kind_raw = sanitize_text(&lossy_str(obj.get("type")));
    let Some(kind) = ChannelKind::parse(&kind_raw) else {
        debug!(kind = %kind_raw, "dropping channel entry with unrecognized type");
        return None;
    };

    Some(ChannelEntry {
        kind,
        value: sanitize_text(&lossy_str(obj.get("value"))),
        label: sanitize_text(&lossy_str(obj.get("label"))),
        message: sanitize_multiline(&lossy_str(obj.get("message"))),
        enabled: truthy(obj.get("enabled")),
        show_on_mobile: truthy(obj.get("show_on_mobile").or_else(|| obj.get("show_mobile"))),
        show_on_desktop: truthy(obj.get("show_on_desktop").or_else(|| obj.get("show_desktop"))),
    })
}

/// Checkbox-style coercion: any present, truthy value is `true`.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !matches!(s.as_str(), "" | "0" | "false"),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

fn position(value: Option<&Value>) -> Position {
    match value.and_then(Value::as_str) {
        Some("left") => Position::Left,
        Some("right") => Position::Right,
        _ => Position::default(),
    }
}

fn button_size(value: Option<&Value>) -> u32 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    let size = parsed.map_or(u64::from(WidgetOptions::DEFAULT_BUTTON_SIZE), i64::unsigned_abs);
    size.clamp(
        u64::from(WidgetOptions::MIN_BUTTON_SIZE),
        u64::from(WidgetOptions::MAX_BUTTON_SIZE),
    ) as u32
}

/// Coerce a scalar JSON value to its string form; anything else is empty.
fn lossy_str(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Single-line text rule: strip markup and control characters, collapse
/// whitespace runs, trim.
pub fn sanitize_text(input: &str) -> String {
    let stripped = strip_markup(input);
    let mut out = String::with_capacity(stripped.len());
    let mut pending_space = false;
    for c in stripped.chars() {
        if c.is_control() || c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(c);
    }
    out
}

/// Multi-line variant for message templates: keeps newlines, still strips
/// markup and other control characters.
pub fn sanitize_multiline(input: &str) -> String {
    let stripped = strip_markup(input);
    stripped
        .replace('\r', "")
        .chars()
        .filter(|c| *c == '\n' || !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Accept `#RGB` or `#RRGGBB`; anything else is coerced to empty so raw
/// untrusted text never reaches the emitted CSS.
pub fn sanitize_hex_color(input: &str) -> String {
    let value = input.trim();
    let Some(hex) = value.strip_prefix('#') else {
        return String::new();
    };
    if (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        value.to_string()
    } else {
        String::new()
    }
}

/// Remove `<...>` tag segments. An unterminated tag swallows the rest of
/// the input.
fn strip_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {},
        }
    }
    out
}
