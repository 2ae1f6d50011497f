//! The persisted widget options document.

use serde::{Deserialize, Serialize};

/// Which side of the viewport the widget docks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Left,
    #[default]
    Right,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Left => "left",
            Position::Right => "right",
        }
    }
}

/// The closed set of supported contact channels. Anything outside this set
/// is dropped during sanitization, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Whatsapp,
    Messenger,
    Phone,
    Email,
    Telegram,
    Viber,
    Custom,
}

impl ChannelKind {
    /// Parse a raw type string from a settings submission.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "whatsapp" => Some(Self::Whatsapp),
            "messenger" => Some(Self::Messenger),
            "phone" => Some(Self::Phone),
            "email" => Some(Self::Email),
            "telegram" => Some(Self::Telegram),
            "viber" => Some(Self::Viber),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Whatsapp => "whatsapp",
            Self::Messenger => "messenger",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Telegram => "telegram",
            Self::Viber => "viber",
            Self::Custom => "custom",
        }
    }

    /// Human-readable channel name, used as the default label in admin UIs.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Whatsapp => "WhatsApp",
            Self::Messenger => "Facebook Messenger",
            Self::Phone => "Phone",
            Self::Email => "Email",
            Self::Telegram => "Telegram",
            Self::Viber => "Viber",
            Self::Custom => "Custom Link",
        }
    }
}

/// Device class of the page being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Mobile,
    Desktop,
}

impl Device {
    /// Parse a device query value; anything unrecognized is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "mobile" => Some(Self::Mobile),
            "desktop" => Some(Self::Desktop),
            _ => None,
        }
    }
}

/// One configured contact channel. Order within [`WidgetOptions::channels`]
/// is the display order on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelEntry {
    #[serde(rename = "type")]
    pub kind: ChannelKind,
    /// Phone number, username, or URL depending on `kind`.
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub label: String,
    /// Optional pre-filled message. May contain `[PAGE_URL]`, `[PAGE_TITLE]`
    /// and `[SITE_NAME]` placeholder tokens.
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, alias = "show_mobile")]
    pub show_on_mobile: bool,
    #[serde(default, alias = "show_desktop")]
    pub show_on_desktop: bool,
}

impl ChannelEntry {
    /// Whether this channel's own gate admits the device. The parent-level
    /// gate on [`WidgetOptions`] is checked separately; both must pass.
    pub fn visible_on(&self, device: Device) -> bool {
        match device {
            Device::Mobile => self.show_on_mobile,
            Device::Desktop => self.show_on_desktop,
        }
    }
}

/// The single persisted settings document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetOptions {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub position: Position,
    #[serde(default = "default_button_size")]
    pub button_size: u32,
    #[serde(default)]
    pub button_color: String,
    #[serde(default)]
    pub icon_color: String,
    #[serde(default)]
    pub show_on_mobile: bool,
    #[serde(default)]
    pub show_on_desktop: bool,
    #[serde(default)]
    pub channels: Vec<ChannelEntry>,
}

fn default_button_size() -> u32 {
    WidgetOptions::DEFAULT_BUTTON_SIZE
}

impl WidgetOptions {
    pub const MIN_BUTTON_SIZE: u32 = 40;
    pub const MAX_BUTTON_SIZE: u32 = 80;
    pub const DEFAULT_BUTTON_SIZE: u32 = 60;
    pub const DEFAULT_BUTTON_COLOR: &'static str = "#4482FF";
    pub const DEFAULT_ICON_COLOR: &'static str = "#ffffff";

    /// Whether the parent-level gate admits the device.
    pub fn allows_device(&self, device: Device) -> bool {
        match device {
            Device::Mobile => self.show_on_mobile,
            Device::Desktop => self.show_on_desktop,
        }
    }

    /// Channels that would render for the given device class, in stored
    /// order: the widget is on, the channel is on, and both the parent and
    /// the channel device gates pass. Link resolution is a separate,
    /// render-time concern.
    pub fn visible_channels(&self, device: Device) -> Vec<&ChannelEntry> {
        if !self.enabled || !self.allows_device(device) {
            return Vec::new();
        }
        self.channels
            .iter()
            .filter(|c| c.enabled && c.visible_on(device))
            .collect()
    }
}

impl Default for WidgetOptions {
    /// First-activation defaults: widget on, docked right, 60px button,
    /// brand-blue button with white icon, shown on every device, no
    /// channels configured yet.
    fn default() -> Self {
        Self {
            enabled: true,
            position: Position::Right,
            button_size: Self::DEFAULT_BUTTON_SIZE,
            button_color: Self::DEFAULT_BUTTON_COLOR.to_string(),
            icon_color: Self::DEFAULT_ICON_COLOR.to_string(),
            show_on_mobile: true,
            show_on_desktop: true,
            channels: Vec::new(),
        }
    }
}
