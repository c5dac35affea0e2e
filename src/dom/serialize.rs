use super::*;
use crate::html::is_void_tag;

impl Dom {
    /// Serializes a node back to markup. Attributes are emitted in sorted order
    /// so the output is deterministic.
    pub(crate) fn dump_node(&self, node_id: NodeId) -> String {
        let mut out = String::new();
        self.dump_into(node_id, &mut out);
        out
    }

    fn dump_into(&self, node_id: NodeId, out: &mut String) {
        let Some(node) = self.nodes.get(node_id.0) else {
            return;
        };
        match &node.node_type {
            NodeType::Document => {
                for child in &node.children {
                    self.dump_into(*child, out);
                }
            }
            NodeType::Text(text) => out.push_str(&escape_html_text(text)),
            NodeType::Element(element) => {
                out.push('<');
                out.push_str(&element.tag_name);
                let mut attrs = element.attrs.iter().collect::<Vec<_>>();
                attrs.sort_by(|(left, _), (right, _)| left.cmp(right));
                for (name, value) in attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_html_attr(value));
                    out.push('"');
                }
                out.push('>');
                if is_void_tag(&element.tag_name) {
                    return;
                }
                for child in &node.children {
                    self.dump_into(*child, out);
                }
                out.push_str("</");
                out.push_str(&element.tag_name);
                out.push('>');
            }
        }
    }
}

fn escape_html_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_html_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

pub(crate) fn truncate_chars(value: &str, max_chars: usize) -> String {
    let mut chars = value.chars();
    let head = chars.by_ref().take(max_chars).collect::<String>();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
