//! Pure widget core: the options model, the settings sanitizer, and the
//! per-channel deep-link resolver. No I/O lives here; persistence and
//! rendering are the store and gateway crates' concern.

pub mod links;
pub mod options;
pub mod sanitize;

pub use {
    links::PageContext,
    options::{ChannelEntry, ChannelKind, Device, Position, WidgetOptions},
    sanitize::sanitize_options,
};
