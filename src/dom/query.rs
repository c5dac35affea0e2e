use super::*;
use crate::selector::{
    AttrMatch, Combinator, ComplexSelector, Compound, PseudoClass, SelectorPart,
    parse_selector_list,
};

impl Dom {
    pub(crate) fn collect_elements_dfs(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        if self.element(node_id).is_some() {
            out.push(node_id);
        }
        for child in self.children(node_id) {
            self.collect_elements_dfs(*child, out);
        }
    }

    pub(crate) fn collect_descendant_elements(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        for child in self.children(node_id) {
            self.collect_elements_dfs(*child, out);
        }
    }

    pub(crate) fn child_elements(&self, node_id: NodeId) -> Vec<NodeId> {
        self.children(node_id)
            .iter()
            .copied()
            .filter(|child| self.element(*child).is_some())
            .collect()
    }

    pub(crate) fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }

    pub(crate) fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let groups = parse_selector_list(selector)?;

        if let [single] = groups.as_slice() {
            if let [part] = single.as_slice() {
                if let Some(id) = part.compound.id_only() {
                    return Ok(self.by_id_all(id));
                }
            }
        }

        let mut candidates = Vec::new();
        self.collect_descendant_elements(self.root, &mut candidates);
        Ok(self.filter_matching(candidates, &groups))
    }

    pub(crate) fn closest(&self, node_id: NodeId, selector: &str) -> Result<Option<NodeId>> {
        let groups = parse_selector_list(selector)?;
        let mut cursor = Some(node_id);
        while let Some(current) = cursor {
            if groups
                .iter()
                .any(|complex| self.matches_complex(current, complex))
            {
                return Ok(Some(current));
            }
            cursor = self.parent(current);
        }
        Ok(None)
    }

    fn filter_matching(&self, candidates: Vec<NodeId>, groups: &[ComplexSelector]) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        candidates
            .into_iter()
            .filter(|candidate| {
                groups
                    .iter()
                    .any(|complex| self.matches_complex(*candidate, complex))
                    && seen.insert(*candidate)
            })
            .collect()
    }

    /// Right-to-left match of a compound chain.
    pub(crate) fn matches_complex(&self, node_id: NodeId, complex: &ComplexSelector) -> bool {
        let Some((last, rest)) = complex.split_last() else {
            return false;
        };
        self.matches_compound(node_id, &last.compound)
            && self.matches_relatives(node_id, last.combinator, rest)
    }

    /// `node_id` matched a part joined to `rest` by `combinator`. Descendant and
    /// subsequent-sibling relations backtrack over every candidate relative.
    fn matches_relatives(
        &self,
        node_id: NodeId,
        combinator: Option<Combinator>,
        rest: &[SelectorPart],
    ) -> bool {
        let Some((part, remaining)) = rest.split_last() else {
            return true;
        };
        let fits = |candidate: NodeId| {
            self.matches_compound(candidate, &part.compound)
                && self.matches_relatives(candidate, part.combinator, remaining)
        };

        match combinator.unwrap_or(Combinator::Descendant) {
            Combinator::Child => self.parent(node_id).is_some_and(fits),
            Combinator::NextSibling => self.previous_element_sibling(node_id).is_some_and(fits),
            Combinator::Descendant => {
                let mut cursor = self.parent(node_id);
                while let Some(ancestor) = cursor {
                    if fits(ancestor) {
                        return true;
                    }
                    cursor = self.parent(ancestor);
                }
                false
            }
            Combinator::SubsequentSibling => {
                let mut cursor = self.previous_element_sibling(node_id);
                while let Some(sibling) = cursor {
                    if fits(sibling) {
                        return true;
                    }
                    cursor = self.previous_element_sibling(sibling);
                }
                false
            }
        }
    }

    fn matches_compound(&self, node_id: NodeId, compound: &Compound) -> bool {
        let Some(element) = self.element(node_id) else {
            return false;
        };

        if let Some(tag) = &compound.tag {
            if !element.tag_name.eq_ignore_ascii_case(tag) {
                return false;
            }
        }

        if let Some(id) = &compound.id {
            if element.attrs.get("id") != Some(id) {
                return false;
            }
        }

        if compound
            .classes
            .iter()
            .any(|class_name| !self.class_contains(node_id, class_name))
        {
            return false;
        }

        let attrs_match = compound.attrs.iter().all(|cond| match cond {
            AttrMatch::Exists { key } => element.attrs.contains_key(key),
            AttrMatch::Equals { key, value } => element.attrs.get(key) == Some(value),
            AttrMatch::Prefix { key, value } => element
                .attrs
                .get(key)
                .is_some_and(|attr| !value.is_empty() && attr.starts_with(value.as_str())),
            AttrMatch::Suffix { key, value } => element
                .attrs
                .get(key)
                .is_some_and(|attr| !value.is_empty() && attr.ends_with(value.as_str())),
            AttrMatch::Substring { key, value } => element
                .attrs
                .get(key)
                .is_some_and(|attr| !value.is_empty() && attr.contains(value.as_str())),
            AttrMatch::Includes { key, value } => element
                .attrs
                .get(key)
                .is_some_and(|attr| attr.split_whitespace().any(|token| token == value)),
            AttrMatch::DashMatch { key, value } => element
                .attrs
                .get(key)
                .is_some_and(|attr| attr == value || attr.starts_with(&format!("{value}-"))),
        });
        if !attrs_match {
            return false;
        }

        compound.pseudo_classes.iter().all(|pseudo| match pseudo {
            PseudoClass::FirstChild => self.previous_element_sibling(node_id).is_none(),
            PseudoClass::LastChild => self.next_element_sibling(node_id).is_none(),
            PseudoClass::NthChild(nth) => self
                .element_position(node_id)
                .is_some_and(|position| nth.matches(position)),
            PseudoClass::Not(inner) => !inner
                .iter()
                .any(|complex| self.matches_complex(node_id, complex)),
        })
    }

    /// 1-based position among element siblings.
    fn element_position(&self, node_id: NodeId) -> Option<usize> {
        let parent = self.parent(node_id)?;
        self.child_elements(parent)
            .iter()
            .position(|child| *child == node_id)
            .map(|index| index + 1)
    }

    pub(crate) fn next_element_sibling(&self, node_id: NodeId) -> Option<NodeId> {
        let parent = self.parent(node_id)?;
        let children = self.children(parent);
        let pos = children.iter().position(|id| *id == node_id)?;
        children[pos + 1..]
            .iter()
            .copied()
            .find(|sibling| self.element(*sibling).is_some())
    }

    pub(crate) fn previous_element_sibling(&self, node_id: NodeId) -> Option<NodeId> {
        let parent = self.parent(node_id)?;
        let children = self.children(parent);
        let pos = children.iter().position(|id| *id == node_id)?;
        children[..pos]
            .iter()
            .rev()
            .copied()
            .find(|sibling| self.element(*sibling).is_some())
    }
}

