use super::*;
use crate::style::StyleTable;

pub(crate) const DEFAULT_MARKER_CLASS: &str = "multiselect-widget";
pub(crate) const DEFAULT_NO_OPTIONS_MESSAGE: &str = "There are no options.";

/// Page-wide enhancement settings. Per-element data attributes still take
/// precedence over everything here.
///
/// ```
/// use multiselect_widget::{WidgetConfig, Zone};
///
/// # fn main() -> multiselect_widget::Result<()> {
/// let config = WidgetConfig::default()
///     .with_marker_class("tag-picker")
///     .with_no_options_message("All picked")
///     .with_default_style(Zone::Tag, [("color", "red")]);
/// assert_eq!(config.discovery_selector()?, "select.tag-picker[multiple]");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    marker_class: String,
    no_options_message: String,
    styles: StyleTable,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            marker_class: DEFAULT_MARKER_CLASS.to_string(),
            no_options_message: DEFAULT_NO_OPTIONS_MESSAGE.to_string(),
            styles: StyleTable::default(),
        }
    }
}

impl WidgetConfig {
    /// The class must be a single CSS identifier such as `tag-picker`;
    /// enhancement fails with [`Error::Config`] otherwise.
    pub fn with_marker_class(mut self, class_name: impl Into<String>) -> Self {
        self.marker_class = class_name.into();
        self
    }

    pub fn with_no_options_message(mut self, message: impl Into<String>) -> Self {
        self.no_options_message = message.into();
        self
    }

    /// Replaces the default inline declarations of one zone.
    pub fn with_default_style<I, K, V>(mut self, zone: Zone, declarations: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let declarations = declarations
            .into_iter()
            .map(|(name, value)| (name.into().to_ascii_lowercase(), value.into()))
            .collect();
        self.styles.replace(zone, declarations);
        self
    }

    pub fn marker_class(&self) -> &str {
        &self.marker_class
    }

    pub fn no_options_message(&self) -> &str {
        &self.no_options_message
    }

    pub fn discovery_selector(&self) -> Result<String> {
        if !is_class_identifier(&self.marker_class) {
            return Err(Error::Config(format!(
                "marker class {:?} is not a single class name",
                self.marker_class
            )));
        }
        Ok(format!("select.{}[multiple]", self.marker_class))
    }

    pub(crate) fn styles(&self) -> &StyleTable {
        &self.styles
    }
}

fn is_class_identifier(name: &str) -> bool {
    let body = name.strip_prefix('-').unwrap_or(name);
    let Some(first) = body.chars().next() else {
        return false;
    };
    (first == '-' || !first.is_ascii_digit())
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || !ch.is_ascii())
}
