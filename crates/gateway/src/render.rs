//! Widget snippet rendering.
//!
//! Produces a self-contained HTML fragment: scoped CSS, the toggle button,
//! one anchor per passing channel in stored order, and the toggle script.
//! Device gating is expressed as `fk-hide-*` classes backed by media
//! queries, so one rendered snippet serves both device classes. All free
//! text goes through the template engine's HTML escaping.

use askama::Template;

use floatkit_widget::{ChannelEntry, ChannelKind, Device, PageContext, WidgetOptions};

#[derive(Template)]
#[template(path = "widget.html")]
struct WidgetTemplate<'a> {
    position: &'static str,
    device_class: String,
    button_size: u32,
    button_color: &'a str,
    icon_color: &'a str,
    channels: Vec<ChannelView<'a>>,
}

struct ChannelView<'a> {
    href: String,
    kind: &'static str,
    label: &'a str,
    hide_class: String,
    icon: &'static str,
}

/// Render the widget for one page. Returns an empty string when the widget
/// is disabled; channels that are off or resolve to no link are omitted.
///
/// With a known device class the channel list is filtered server-side
/// through [`WidgetOptions::visible_channels`] and no `fk-hide-*` classes
/// are emitted; without one, a single dual-device snippet carries the
/// gating as media-query classes.
pub fn render_widget(
    options: &WidgetOptions,
    ctx: &PageContext,
    device: Option<Device>,
) -> Result<String, askama::Error> {
    if !options.enabled {
        return Ok(String::new());
    }
    if let Some(device) = device
        && !options.allows_device(device)
    {
        return Ok(String::new());
    }

    let entries: Vec<&ChannelEntry> = match device {
        Some(device) => options.visible_channels(device),
        None => options.channels.iter().filter(|c| c.enabled).collect(),
    };
    let channels = entries
        .into_iter()
        .filter_map(|c| {
            c.deep_link(ctx).map(|href| ChannelView {
                href,
                kind: c.kind.as_str(),
                label: if c.label.is_empty() {
                    c.kind.display_name()
                } else {
                    &c.label
                },
                hide_class: if device.is_some() {
                    String::new()
                } else {
                    hide_class(c.show_on_mobile, c.show_on_desktop)
                },
                icon: icon_svg(c.kind),
            })
        })
        .collect();

    let template = WidgetTemplate {
        position: options.position.as_str(),
        device_class: if device.is_some() {
            String::new()
        } else {
            hide_class(options.show_on_mobile, options.show_on_desktop)
        },
        button_size: options.button_size,
        button_color: effective_color(&options.button_color, WidgetOptions::DEFAULT_BUTTON_COLOR),
        icon_color: effective_color(&options.icon_color, WidgetOptions::DEFAULT_ICON_COLOR),
        channels,
    };
    template.render()
}

fn effective_color<'a>(color: &'a str, fallback: &'a str) -> &'a str {
    if color.is_empty() { fallback } else { color }
}

fn hide_class(show_on_mobile: bool, show_on_desktop: bool) -> String {
    let mut class = String::new();
    if !show_on_mobile {
        class.push_str(" fk-hide-mobile");
    }
    if !show_on_desktop {
        class.push_str(" fk-hide-desktop");
    }
    class
}

/// Inline brand icon per channel kind.
fn icon_svg(kind: ChannelKind) -> &'static str {
    match kind {
        ChannelKind::Whatsapp => {
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 24 24" fill="currentColor"><path d="M17.472 14.382c-.297-.149-1.758-.867-2.03-.967-.273-.099-.471-.148-.67.15-.197.297-.767.966-.94 1.164-.173.199-.347.223-.644.075-.297-.15-1.255-.463-2.39-1.475-.883-.788-1.48-1.761-1.653-2.059-.173-.297-.018-.458.13-.606.134-.133.298-.347.446-.52.149-.174.198-.298.298-.497.099-.198.05-.371-.025-.52-.075-.149-.669-1.612-.916-2.207-.242-.579-.487-.5-.669-.51-.173-.008-.371-.01-.57-.01-.198 0-.52.074-.792.372-.272.297-1.04 1.016-1.04 2.479 0 1.462 1.065 2.875 1.213 3.074.149.198 2.096 3.2 5.077 4.487.709.306 1.262.489 1.694.625.712.227 1.36.195 1.871.118.571-.085 1.758-.719 2.006-1.413.248-.694.248-1.289.173-1.413-.074-.124-.272-.198-.57-.347m-5.421 7.403h-.004a9.87 9.87 0 01-5.031-1.378l-.361-.214-3.741.982.998-3.648-.235-.374a9.86 9.86 0 01-1.51-5.26c.001-5.45 4.436-9.884 9.888-9.884 2.64 0 5.122 1.03 6.988 2.898a9.825 9.825 0 012.893 6.994c-.003 5.45-4.437 9.884-9.885 9.884m8.413-18.297A11.815 11.815 0 0012.05 0C5.495 0 .16 5.335.157 11.892c0 2.096.547 4.142 1.588 5.945L.057 24l6.305-1.654a11.882 11.882 0 005.683 1.448h.005c6.554 0 11.89-5.335 11.893-11.893a11.821 11.821 0 00-3.48-8.413Z"/></svg>"#
        },
        ChannelKind::Messenger => {
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 24 24" fill="currentColor"><path d="M12 0C5.373 0 0 4.975 0 11.111c0 3.497 1.745 6.616 4.472 8.652V24l4.086-2.242c1.09.301 2.246.464 3.442.464 6.627 0 12-4.974 12-11.111C24 4.975 18.627 0 12 0zm1.193 14.963l-3.056-3.259-5.963 3.259L10.733 8l3.13 3.259L19.752 8l-6.559 6.963z"/></svg>"#
        },
        ChannelKind::Phone => {
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M22 16.92v3a2 2 0 0 1-2.18 2 19.79 19.79 0 0 1-8.63-3.07 19.5 19.5 0 0 1-6-6 19.79 19.79 0 0 1-3.07-8.67A2 2 0 0 1 4.11 2h3a2 2 0 0 1 2 1.72 12.84 12.84 0 0 0 .7 2.81 2 2 0 0 1-.45 2.11L8.09 9.91a16 16 0 0 0 6 6l1.27-1.27a2 2 0 0 1 2.11-.45 12.84 12.84 0 0 0 2.81.7A2 2 0 0 1 22 16.92z"></path></svg>"#
        },
        ChannelKind::Email => {
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M4 4h16c1.1 0 2 .9 2 2v12c0 1.1-.9 2-2 2H4c-1.1 0-2-.9-2-2V6c0-1.1.9-2 2-2z"></path><polyline points="22,6 12,13 2,6"></polyline></svg>"#
        },
        ChannelKind::Telegram => {
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 24 24" fill="currentColor"><path d="M11.944 0A12 12 0 0 0 0 12a12 12 0 0 0 12 12 12 12 0 0 0 12-12A12 12 0 0 0 12 0a12 12 0 0 0-.056 0zm4.962 7.224c.1-.002.321.023.465.14a.506.506 0 0 1 .171.325c.016.093.036.306.02.472-.18 1.898-.962 6.502-1.36 8.627-.168.9-.499 1.201-.82 1.23-.696.065-1.225-.46-1.9-.902-1.056-.693-1.653-1.124-2.678-1.8-1.185-.78-.417-1.21.258-1.91.177-.184 3.247-2.977 3.307-3.23.007-.032.014-.15-.056-.212s-.174-.041-.249-.024c-.106.024-1.793 1.14-5.061 3.345-.48.33-.913.49-1.302.48-.428-.008-1.252-.241-1.865-.44-.752-.245-1.349-.374-1.297-.789.027-.216.325-.437.893-.663 3.498-1.524 5.83-2.529 6.998-3.014 3.332-1.386 4.025-1.627 4.476-1.635z"/></svg>"#
        },
        ChannelKind::Viber => {
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 24 24" fill="currentColor"><path d="M11.4 0C9.473.028 5.333.344 3.02 2.467 1.302 4.187.696 6.7.633 9.817.57 12.933.488 18.617 6.55 20.42h.006l-.006 2.381s-.037.98.61 1.179c.777.24 1.236-.5 1.98-1.302.407-.44.97-1.086 1.393-1.58 3.85.326 6.812-.417 7.15-.526.776-.253 5.166-.816 5.883-6.657.74-6.02-.36-9.83-2.34-11.546-.76-.693-2.74-2.39-6.87-2.39h-.013zm.031 1.661h.01c3.6 0 5.37 1.438 6 2.01 1.64 1.49 2.52 4.82 1.87 10.05-.62 5.04-4.17 5.38-4.83 5.59-.28.09-2.96.73-6.25.45 0 0-2.46 2.98-3.23 3.76-.12.13-.26.17-.35.15-.13-.03-.17-.19-.16-.41l.02-4.01c-5.09-1.53-4.78-6.36-4.73-8.99.05-2.63.55-4.77 1.99-6.32 1.96-1.85 5.58-2.17 7.41-2.21z"/></svg>"#
        },
        ChannelKind::Custom => {
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M10 13a5 5 0 0 0 7.54.54l3-3a5 5 0 0 0-7.07-7.07l-1.72 1.71"></path><path d="M14 11a5 5 0 0 0-7.54-.54l-3 3a5 5 0 0 0 7.07 7.07l1.71-1.71"></path></svg>"#
        },
    }
}
