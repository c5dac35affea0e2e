use super::*;
use crate::style::ResolvedStyles;

mod build;
mod events;
mod selection;

pub(crate) use events::ClickOutcome;

/// Handle to one enhanced `<select>` on a [`Page`](crate::Page).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub(crate) usize);

impl WidgetId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropdownState {
    Open,
    Closed,
}

impl DropdownState {
    pub fn toggled(self) -> Self {
        match self {
            DropdownState::Open => DropdownState::Closed,
            DropdownState::Closed => DropdownState::Open,
        }
    }

    pub(crate) fn display_value(self) -> &'static str {
        match self {
            DropdownState::Open => "block",
            DropdownState::Closed => "none",
        }
    }
}

/// Observable state of a widget at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSnapshot {
    pub dropdown: DropdownState,
    /// Indices whose native `<option>` is selected, in source order.
    pub selected: Vec<usize>,
    /// Tag labels in the order the tags appear in the closed box.
    pub tags: Vec<String>,
    pub visible_rows: Vec<usize>,
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct TagRecord {
    pub(crate) index: usize,
    pub(crate) node: NodeId,
    pub(crate) remove: NodeId,
}

/// One enhanced `<select multiple>`. The native options stay the source of
/// truth for selection; rows, tags and the placeholder are kept in step with
/// them.
#[derive(Debug, Clone)]
pub(crate) struct MultiSelect {
    pub(crate) id: WidgetId,
    pub(crate) source: NodeId,
    pub(crate) options: Vec<NodeId>,
    pub(crate) labels: Vec<String>,
    pub(crate) container: NodeId,
    pub(crate) tag_box: NodeId,
    pub(crate) list: NodeId,
    pub(crate) rows: Vec<NodeId>,
    pub(crate) tags: Vec<TagRecord>,
    pub(crate) placeholder: Option<NodeId>,
    pub(crate) dropdown: DropdownState,
    pub(crate) no_options_message: String,
    pub(crate) styles: ResolvedStyles,
}

impl MultiSelect {
    pub(crate) fn option_count(&self) -> usize {
        self.options.len()
    }

    pub(crate) fn is_option_selected(&self, dom: &Dom, index: usize) -> bool {
        self.options
            .get(index)
            .is_some_and(|option| dom.has_attr(*option, "selected"))
    }

    pub(crate) fn selected_indices(&self, dom: &Dom) -> Vec<usize> {
        (0..self.options.len())
            .filter(|index| self.is_option_selected(dom, *index))
            .collect()
    }

    pub(crate) fn snapshot(&self, dom: &Dom) -> WidgetSnapshot {
        WidgetSnapshot {
            dropdown: self.dropdown,
            selected: self.selected_indices(dom),
            tags: self
                .tags
                .iter()
                .map(|tag| self.labels[tag.index].clone())
                .collect(),
            visible_rows: self
                .rows
                .iter()
                .enumerate()
                .filter(|(_, row)| dom.style_get(**row, "display").as_deref() != Some("none"))
                .map(|(index, _)| index)
                .collect(),
            placeholder: self.placeholder.map(|node| dom.text_content(node)),
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.options.len() {
            return Err(Error::OptionIndexOutOfRange {
                index,
                len: self.options.len(),
            });
        }
        Ok(())
    }
}
