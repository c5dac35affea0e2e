use super::*;

impl Dom {
    pub(crate) fn can_have_children(&self, node_id: NodeId) -> bool {
        self.nodes
            .get(node_id.0)
            .is_some_and(|node| !matches!(node.node_type, NodeType::Text(_)))
    }

    pub(crate) fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.ensure_insertable(parent, child, "appendChild")?;
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        self.rebuild_id_index();
        Ok(())
    }

    pub(crate) fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: NodeId,
    ) -> Result<()> {
        self.ensure_insertable(parent, child, "insertBefore")?;
        if self.parent(reference) != Some(parent) {
            return Err(Error::Dom(
                "insertBefore reference is not a direct child".into(),
            ));
        }
        if child == reference {
            return Ok(());
        }

        self.detach(child);
        let Some(index) = self.nodes[parent.0]
            .children
            .iter()
            .position(|id| *id == reference)
        else {
            return Err(Error::Dom("insertBefore reference is missing".into()));
        };
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.insert(index, child);
        self.rebuild_id_index();
        Ok(())
    }

    /// Inserts `child` as the next sibling of `target` (`afterend`).
    pub(crate) fn insert_after(&mut self, target: NodeId, child: NodeId) -> Result<()> {
        let Some(parent) = self.parent(target) else {
            return Err(Error::Dom("afterend target is detached".into()));
        };
        let pos = self.nodes[parent.0]
            .children
            .iter()
            .position(|id| *id == target)
            .ok_or_else(|| Error::Dom("afterend target is detached".into()))?;
        let next = self.nodes[parent.0].children.get(pos + 1).copied();
        match next {
            Some(next) if next != child => self.insert_before(parent, child, next),
            Some(_) => Ok(()),
            None => self.append_child(parent, child),
        }
    }

    pub(crate) fn remove_node(&mut self, node: NodeId) -> Result<()> {
        if node == self.root {
            return Err(Error::Dom("cannot remove document root".into()));
        }
        if !self.is_valid_node(node) {
            return Err(Error::Dom("remove target is invalid".into()));
        }
        if self.parent(node).is_none() {
            return Ok(());
        }
        self.detach(node);
        if self
            .active_element
            .is_some_and(|active| active == node || self.is_descendant_of(active, node))
        {
            self.active_element = None;
        }
        self.rebuild_id_index();
        Ok(())
    }

    pub(crate) fn text_content(&self, node_id: NodeId) -> String {
        match self.nodes.get(node_id.0).map(|node| &node.node_type) {
            Some(NodeType::Text(text)) => text.clone(),
            Some(NodeType::Document | NodeType::Element(_)) => {
                let mut out = String::new();
                for child in self.children(node_id) {
                    out.push_str(&self.text_content(*child));
                }
                out
            }
            None => String::new(),
        }
    }

    pub(crate) fn set_text_content(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        if self.element(node_id).is_none() {
            return Err(Error::Dom("textContent target is not an element".into()));
        }
        let old_children = std::mem::take(&mut self.nodes[node_id.0].children);
        for child in old_children {
            self.nodes[child.0].parent = None;
        }
        if !value.is_empty() {
            self.create_text(node_id, value.to_string());
        }
        self.rebuild_id_index();
        Ok(())
    }

    fn ensure_insertable(&self, parent: NodeId, child: NodeId, operation: &str) -> Result<()> {
        if !self.is_valid_node(parent) || !self.is_valid_node(child) {
            return Err(Error::Dom(format!("{operation} node is invalid")));
        }
        if !self.can_have_children(parent) {
            return Err(Error::Dom(format!(
                "{operation} target cannot have children"
            )));
        }
        if child == self.root || child == parent {
            return Err(Error::Dom(format!("invalid {operation} node")));
        }

        // Parent must not be inside child's subtree.
        let mut cursor = Some(parent);
        while let Some(node) = cursor {
            if node == child {
                return Err(Error::Dom(format!("{operation} would create a cycle")));
            }
            cursor = self.parent(node);
        }
        Ok(())
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(old_parent) = self.parent(node) {
            self.nodes[old_parent.0].children.retain(|id| *id != node);
        }
        self.nodes[node.0].parent = None;
    }
}
