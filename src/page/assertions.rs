use super::*;

impl Page {
    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        stacker::grow(32 * 1024 * 1024, || {
            let target = self.select_one(selector)?;
            let actual = self.dom.text_content(target);
            if actual != expected {
                return Err(Error::AssertionFailed {
                    selector: selector.to_string(),
                    expected: expected.to_string(),
                    actual,
                    dom_snippet: self.node_snippet(target),
                });
            }
            Ok(())
        })
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        stacker::grow(32 * 1024 * 1024, || self.select_one(selector))?;
        Ok(())
    }

    pub fn assert_count(&self, selector: &str, expected: usize) -> Result<()> {
        stacker::grow(32 * 1024 * 1024, || {
            let matches = self.dom.query_selector_all(selector)?;
            if matches.len() != expected {
                return Err(Error::AssertionFailed {
                    selector: selector.to_string(),
                    expected: expected.to_string(),
                    actual: matches.len().to_string(),
                    dom_snippet: matches
                        .first()
                        .map(|node| self.node_snippet(*node))
                        .unwrap_or_default(),
                });
            }
            Ok(())
        })
    }

    pub(crate) fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    pub(crate) fn node_snippet(&self, node_id: NodeId) -> String {
        dom::truncate_chars(&self.dom.dump_node(node_id), 200)
    }
}
