//! Progressive enhancement of `<select multiple>` into a tag-based picker.
//!
//! A [`Page`] holds an in-memory document parsed from HTML. Calling
//! [`Page::enhance`] replaces every `select.multiselect-widget[multiple]` with a
//! widget made of a closed box of tags and a dropdown of remaining options, while
//! the native control stays (hidden) as the authoritative selection state.
//!
//! ```
//! use multiselect_widget::{DropdownState, Page, WidgetConfig};
//!
//! # fn main() -> multiselect_widget::Result<()> {
//! let mut page = Page::from_html(
//!     r#"<select class="multiselect-widget" multiple>
//!          <option>Red</option><option>Green</option><option>Blue</option>
//!        </select>"#,
//! )?;
//! let widgets = page.enhance(&WidgetConfig::default())?;
//! page.click(".option-item[data-index='1']")?;
//!
//! let snapshot = page.widget(widgets[0])?;
//! assert_eq!(snapshot.tags, vec!["Green".to_string()]);
//! assert_eq!(snapshot.selected, vec![1]);
//! assert_eq!(snapshot.dropdown, DropdownState::Closed);
//! # Ok(())
//! # }
//! ```

use std::collections::{HashMap, HashSet};

mod config;
mod dom;
mod html;
mod page;
mod selector;
mod style;
mod widget;

pub use config::WidgetConfig;
pub use page::Page;
pub use style::Zone;
pub use widget::{DropdownState, WidgetId, WidgetSnapshot};

use dom::{Dom, NodeId};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("html parse error: {0}")]
    HtmlParse(String),

    #[error("selector not found: {0}")]
    SelectorNotFound(String),

    #[error("unsupported selector: {0}")]
    UnsupportedSelector(String),

    #[error("dom error: {0}")]
    Dom(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("unknown widget: {0}")]
    UnknownWidget(usize),

    #[error("option index {index} is out of range for {len} options")]
    OptionIndexOutOfRange { index: usize, len: usize },

    #[error("assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}")]
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
}

#[cfg(test)]
mod tests;
