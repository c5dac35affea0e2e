use super::*;

mod attrs;
mod query;
mod serialize;
mod tree;

pub(crate) use serialize::truncate_chars;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) enum NodeType {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) node_type: NodeType,
}

#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub(crate) tag_name: String,
    pub(crate) attrs: HashMap<String, String>,
}

/// Arena-backed document tree. Nodes are never freed; removal only detaches
/// them, so a `NodeId` stays valid for the lifetime of the `Dom`.
#[derive(Debug, Clone)]
pub(crate) struct Dom {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
    pub(crate) id_index: HashMap<String, Vec<NodeId>>,
    pub(crate) active_element: Option<NodeId>,
}

impl Dom {
    pub(crate) fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            node_type: NodeType::Document,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            id_index: HashMap::new(),
            active_element: None,
        }
    }

    pub(crate) fn create_node(&mut self, parent: Option<NodeId>, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            node_type,
        });
        if let Some(parent_id) = parent {
            self.nodes[parent_id.0].children.push(id);
        }
        id
    }

    pub(crate) fn create_element(
        &mut self,
        parent: NodeId,
        tag_name: String,
        attrs: HashMap<String, String>,
    ) -> NodeId {
        let id_attr = attrs.get("id").cloned();
        let id = self.create_node(
            Some(parent),
            NodeType::Element(Element { tag_name, attrs }),
        );
        if let Some(id_attr) = id_attr {
            if self.is_connected(id) {
                self.index_id(&id_attr, id);
            }
        }
        id
    }

    pub(crate) fn create_detached_element(&mut self, tag_name: &str) -> NodeId {
        self.create_node(
            None,
            NodeType::Element(Element {
                tag_name: tag_name.to_ascii_lowercase(),
                attrs: HashMap::new(),
            }),
        )
    }

    pub(crate) fn create_text(&mut self, parent: NodeId, text: String) -> NodeId {
        self.create_node(Some(parent), NodeType::Text(text))
    }

    pub(crate) fn is_valid_node(&self, node_id: NodeId) -> bool {
        node_id.0 < self.nodes.len()
    }

    pub(crate) fn element(&self, node_id: NodeId) -> Option<&Element> {
        match &self.nodes.get(node_id.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self, node_id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(node_id.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn expect_element_mut(
        &mut self,
        node_id: NodeId,
        operation: &str,
    ) -> Result<&mut Element> {
        self.element_mut(node_id)
            .ok_or_else(|| Error::Dom(format!("{operation} target is not an element")))
    }

    pub(crate) fn tag_name(&self, node_id: NodeId) -> Option<&str> {
        self.element(node_id).map(|e| e.tag_name.as_str())
    }

    pub(crate) fn is_tag(&self, node_id: NodeId, tag: &str) -> bool {
        self.tag_name(node_id)
            .is_some_and(|name| name.eq_ignore_ascii_case(tag))
    }

    pub(crate) fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes.get(node_id.0)?.parent
    }

    pub(crate) fn children(&self, node_id: NodeId) -> &[NodeId] {
        self.nodes
            .get(node_id.0)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    pub(crate) fn is_descendant_of(&self, node_id: NodeId, ancestor: NodeId) -> bool {
        let mut cursor = self.parent(node_id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    pub(crate) fn is_connected(&self, node_id: NodeId) -> bool {
        node_id == self.root || self.is_descendant_of(node_id, self.root)
    }

    pub(crate) fn active_element(&self) -> Option<NodeId> {
        self.active_element
    }

    pub(crate) fn set_active_element(&mut self, node: Option<NodeId>) {
        self.active_element = node;
    }

    pub(crate) fn by_id_all(&self, id: &str) -> Vec<NodeId> {
        self.id_index.get(id).cloned().unwrap_or_default()
    }

    fn index_id(&mut self, id: &str, node_id: NodeId) {
        if id.is_empty() {
            return;
        }
        self.id_index
            .entry(id.to_string())
            .or_default()
            .push(node_id);
    }

    /// Recomputes the `id` lookup table from connected elements in tree order.
    pub(crate) fn rebuild_id_index(&mut self) {
        let mut elements = Vec::new();
        self.collect_elements_dfs(self.root, &mut elements);
        self.id_index.clear();
        for node_id in elements {
            let Some(id) = self.element(node_id).and_then(|e| e.attrs.get("id")).cloned() else {
                continue;
            };
            self.index_id(&id, node_id);
        }
    }
}
