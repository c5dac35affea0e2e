use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ClickOutcome {
    Selected(usize),
    Deselected(usize),
    Toggled(DropdownState),
    Ignored,
}

impl MultiSelect {
    /// Delegated click handler for the container. `target` is the node that
    /// was actually clicked, not the container.
    pub(crate) fn handle_click(&mut self, dom: &mut Dom, target: NodeId) -> Result<ClickOutcome> {
        if let Some(index) = self.rows.iter().position(|row| *row == target) {
            if !self.select(dom, index)? {
                return Ok(ClickOutcome::Ignored);
            }
            self.sync_placeholder(dom)?;
            return Ok(ClickOutcome::Selected(index));
        }

        if let Some(index) = self
            .tags
            .iter()
            .find(|tag| tag.remove == target)
            .map(|tag| tag.index)
        {
            self.deselect(dom, index)?;
            self.sync_placeholder(dom)?;
            self.set_dropdown(dom, DropdownState::Open)?;
            return Ok(ClickOutcome::Deselected(index));
        }

        if self.placeholder == Some(target) {
            return Ok(ClickOutcome::Ignored);
        }

        let next = self.dropdown.toggled();
        self.set_dropdown(dom, next)?;
        Ok(ClickOutcome::Toggled(next))
    }

    /// Returns whether the dropdown was open.
    pub(crate) fn handle_blur(&mut self, dom: &mut Dom) -> Result<bool> {
        self.set_dropdown(dom, DropdownState::Closed)
    }
}
