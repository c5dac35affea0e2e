use super::*;
use crate::style::{PLACEHOLDER_STYLE, apply_declarations};
use tracing::debug;

impl MultiSelect {
    /// Marks option `index` selected and adds its tag. Returns `false` when the
    /// option already has a tag.
    pub(crate) fn select(&mut self, dom: &mut Dom, index: usize) -> Result<bool> {
        self.check_index(index)?;
        if self.tag_position(index).is_some() {
            return Ok(false);
        }
        self.insert_tag(dom, index)?;
        debug!(
            event = "widget.option.selected",
            widget = self.id.index(),
            index
        );
        Ok(true)
    }

    /// Clears option `index` and drops its tag. Returns `false` when there was
    /// no tag to remove.
    pub(crate) fn deselect(&mut self, dom: &mut Dom, index: usize) -> Result<bool> {
        self.check_index(index)?;
        let Some(position) = self.tag_position(index) else {
            return Ok(false);
        };

        dom.remove_attr(self.options[index], "selected")?;
        dom.style_set(self.rows[index], "display", "block")?;
        let tag = self.tags.remove(position);
        dom.remove_node(tag.node)?;

        debug!(
            event = "widget.option.deselected",
            widget = self.id.index(),
            index
        );
        Ok(true)
    }

    pub(crate) fn insert_tag(&mut self, dom: &mut Dom, index: usize) -> Result<()> {
        let tag = dom.create_detached_element("div");
        let text = dom.create_detached_element("span");
        let remove = dom.create_detached_element("span");

        dom.class_add(remove, "button-tag")?;
        dom.set_text_content(text, &self.labels[index])?;
        dom.set_attr(tag, "data-index", &index.to_string())?;
        dom.class_add(tag, "option-tag")?;
        dom.append_child(tag, text)?;
        dom.append_child(tag, remove)?;
        dom.append_child(self.tag_box, tag)?;

        dom.style_set(self.rows[index], "display", "none")?;
        self.styles.apply(dom, Zone::Tag, tag)?;
        self.styles.apply(dom, Zone::RemoveControl, remove)?;

        dom.set_attr(self.options[index], "selected", "")?;
        self.tags.push(TagRecord {
            index,
            node: tag,
            remove,
        });
        Ok(())
    }

    /// Shows the "no options" placeholder iff every option is selected.
    /// Returns whether the DOM changed.
    pub(crate) fn sync_placeholder(&mut self, dom: &mut Dom) -> Result<bool> {
        let all_selected = self.selected_indices(dom).len() == self.option_count();
        let changed = match (all_selected, self.placeholder) {
            (true, None) => {
                let message = dom.create_detached_element("a");
                dom.set_text_content(message, &self.no_options_message)?;
                dom.class_add(message, "no-option")?;
                dom.append_child(self.list, message)?;
                apply_declarations(dom, message, PLACEHOLDER_STYLE)?;
                self.placeholder = Some(message);
                true
            }
            (false, Some(message)) => {
                dom.remove_node(message)?;
                self.placeholder = None;
                true
            }
            _ => false,
        };

        if changed {
            debug!(
                event = "widget.placeholder.changed",
                widget = self.id.index(),
                shown = self.placeholder.is_some()
            );
        }
        Ok(changed)
    }

    /// Returns whether the state changed.
    pub(crate) fn set_dropdown(&mut self, dom: &mut Dom, state: DropdownState) -> Result<bool> {
        if self.dropdown == state {
            return Ok(false);
        }
        self.dropdown = state;
        dom.style_set(self.list, "display", state.display_value())?;
        debug!(
            event = "widget.dropdown.toggled",
            widget = self.id.index(),
            open = state == DropdownState::Open
        );
        Ok(true)
    }

    pub(crate) fn tag_position(&self, index: usize) -> Option<usize> {
        self.tags.iter().position(|tag| tag.index == index)
    }
}
