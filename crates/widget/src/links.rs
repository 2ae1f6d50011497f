//! Deep-link resolution for validated channels.
//!
//! Pure and deterministic: one validated [`ChannelEntry`] plus the page
//! context maps to at most one URI. A `None` result means the channel has
//! no usable target and the caller must omit its link element entirely.

use crate::options::{ChannelEntry, ChannelKind};

/// Values the host page supplies per render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    pub url: String,
    pub title: String,
    pub site_name: String,
}

/// Subject template for email channels, substituted before encoding.
pub const EMAIL_SUBJECT_TEMPLATE: &str = "Inquiry from [SITE_NAME]";

const TOKENS: [&str; 3] = ["[PAGE_URL]", "[PAGE_TITLE]", "[SITE_NAME]"];

/// Replace the three reserved tokens with their page-context values.
///
/// Single left-to-right pass over the input: literal, case-sensitive
/// matching, no recursion into substituted values. Unrecognized bracket
/// tokens are left untouched.
pub fn substitute_tokens(text: &str, ctx: &PageContext) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    'scan: while !rest.is_empty() {
        for token in TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(match token {
                    "[PAGE_URL]" => &ctx.url,
                    "[PAGE_TITLE]" => &ctx.title,
                    _ => &ctx.site_name,
                });
                rest = tail;
                continue 'scan;
            }
        }
        // No token starts here; advance one character.
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }
    out
}

impl ChannelEntry {
    /// Resolve the deep-link URI for this channel, or `None` when there is
    /// nothing usable to link to.
    pub fn deep_link(&self, ctx: &PageContext) -> Option<String> {
        let value = self.value.trim();
        if value.is_empty() {
            return None;
        }
        let message = substitute_tokens(&self.message, ctx);

        match self.kind {
            ChannelKind::Whatsapp => {
                let digits = digits_only(value);
                if digits.is_empty() {
                    return None;
                }
                let mut link = format!("https://wa.me/{digits}");
                if !message.is_empty() {
                    link.push_str("?text=");
                    link.push_str(&urlencoding::encode(&message));
                }
                Some(link)
            },
            ChannelKind::Messenger => Some(format!("https://m.me/{value}")),
            ChannelKind::Phone => Some(format!("tel:{value}")),
            ChannelKind::Email => {
                let subject = substitute_tokens(EMAIL_SUBJECT_TEMPLATE, ctx);
                let mut link =
                    format!("mailto:{value}?subject={}", urlencoding::encode(&subject));
                if !message.is_empty() {
                    link.push_str("&body=");
                    link.push_str(&urlencoding::encode(&message));
                }
                Some(link)
            },
            ChannelKind::Telegram => Some(format!("https://t.me/{value}")),
            ChannelKind::Viber => {
                let digits = digits_only(value);
                if digits.is_empty() {
                    return None;
                }
                Some(format!("viber://chat?number={digits}"))
            },
            ChannelKind::Custom => normalize_custom_url(value),
        }
    }
}

fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// URL-safety normalizer for custom links.
///
/// Accepts absolute `http`/`https`/`mailto`/`tel` URLs and site-relative
/// paths. Schemeless values get an `https://` prefix. Anything else, most
/// notably `javascript:` and `data:` schemes, is rejected.
fn normalize_custom_url(value: &str) -> Option<String> {
    const ALLOWED_SCHEMES: [&str; 4] = ["http", "https", "mailto", "tel"];

    if value.starts_with('/') && !value.starts_with("//") {
        return Some(value.to_string());
    }
    match url::Url::parse(value) {
        Ok(parsed) if ALLOWED_SCHEMES.contains(&parsed.scheme()) => Some(parsed.to_string()),
        Ok(_) => None,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let with_scheme = format!("https://{value}");
            match url::Url::parse(&with_scheme) {
                Ok(parsed) if parsed.scheme() == "https" => Some(parsed.to_string()),
                _ => None,
            }
        },
        Err(_) => None,
    }
}
