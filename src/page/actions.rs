use super::*;
use crate::widget::ClickOutcome;

const FOCUSABLE_SELECTOR: &str = "[tabindex]:not([hidden], [disabled]), \
     input:not([hidden], [disabled]), select:not([hidden], [disabled]), \
     textarea:not([hidden], [disabled]), button:not([hidden], [disabled]), \
     a[href]:not([hidden])";

impl Page {
    /// Pointer click: moves focus to the nearest focusable ancestor-or-self of
    /// the target (blurring whatever had it), then dispatches a bubbling click.
    pub fn click(&mut self, selector: &str) -> Result<()> {
        stacker::grow(32 * 1024 * 1024, || {
            let target = self.select_one(selector)?;
            self.click_node(target)
        })
    }

    /// Programmatic focus. A target that cannot take focus is left alone, so
    /// the currently focused element keeps it.
    pub fn focus(&mut self, selector: &str) -> Result<()> {
        stacker::grow(32 * 1024 * 1024, || {
            let target = self.select_one(selector)?;
            if self.focusable_ancestor(target)? != Some(target) {
                return Ok(());
            }
            self.focus_node(target)
        })
    }

    pub fn blur(&mut self, selector: &str) -> Result<()> {
        stacker::grow(32 * 1024 * 1024, || {
            let target = self.select_one(selector)?;
            self.blur_node(target)
        })
    }

    pub(crate) fn click_node(&mut self, target: NodeId) -> Result<()> {
        match self.focusable_ancestor(target)? {
            Some(focusable) => self.focus_node(focusable)?,
            None => {
                if let Some(current) = self.dom.active_element() {
                    self.blur_node(current)?;
                }
            }
        }
        self.dispatch_click(target)
    }

    pub(crate) fn focus_node(&mut self, node: NodeId) -> Result<()> {
        if self.dom.active_element() == Some(node) {
            return Ok(());
        }
        if let Some(current) = self.dom.active_element() {
            self.blur_node(current)?;
        }
        self.dom.set_active_element(Some(node));
        let label = self.describe_node(node);
        self.trace_line(format!("[event] focus target={label}"));
        Ok(())
    }

    /// Blur does not bubble: only listeners on `node` itself run.
    pub(crate) fn blur_node(&mut self, node: NodeId) -> Result<()> {
        if self.dom.active_element() != Some(node) {
            return Ok(());
        }
        let label = self.describe_node(node);
        self.trace_line(format!("[event] blur target={label}"));
        self.invoke_listeners(node, EventKind::Blur, node)?;
        self.dom.set_active_element(None);
        Ok(())
    }

    fn dispatch_click(&mut self, target: NodeId) -> Result<()> {
        let mut path = Vec::new();
        let mut cursor = Some(target);
        while let Some(node) = cursor {
            path.push(node);
            cursor = self.dom.parent(node);
        }

        let label = self.describe_node(target);
        self.trace_line(format!("[event] click target={label} path_len={}", path.len()));
        for node in path {
            self.invoke_listeners(node, EventKind::Click, target)?;
        }
        Ok(())
    }

    fn invoke_listeners(&mut self, node: NodeId, kind: EventKind, target: NodeId) -> Result<()> {
        let listeners = self
            .listeners
            .get(&node)
            .map(|listeners| {
                listeners
                    .iter()
                    .filter(|listener| listener.event == kind)
                    .copied()
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        for listener in listeners {
            let id = listener.widget;
            let widget = self
                .widgets
                .get_mut(id.0)
                .ok_or(Error::UnknownWidget(id.0))?;
            match kind {
                EventKind::Click => {
                    let outcome = widget.handle_click(&mut self.dom, target)?;
                    self.trace_click_outcome(id, outcome);
                }
                EventKind::Blur => {
                    if widget.handle_blur(&mut self.dom)? {
                        self.trace_line(format!("[widget] close id={} reason=blur", id.index()));
                    }
                }
            }
        }
        Ok(())
    }

    fn trace_click_outcome(&mut self, id: WidgetId, outcome: ClickOutcome) {
        let line = match outcome {
            ClickOutcome::Selected(index) => {
                format!("[widget] select id={} index={index}", id.index())
            }
            ClickOutcome::Deselected(index) => {
                format!("[widget] deselect id={} index={index} open=true", id.index())
            }
            ClickOutcome::Toggled(state) => {
                format!("[widget] toggle id={} state={state:?}", id.index())
            }
            ClickOutcome::Ignored => return,
        };
        self.trace_line(line);
    }

    fn focusable_ancestor(&self, node: NodeId) -> Result<Option<NodeId>> {
        self.dom.closest(node, FOCUSABLE_SELECTOR)
    }

    /// Short `tag#id.class` label used in trace lines.
    pub(crate) fn describe_node(&self, node: NodeId) -> String {
        let Some(tag) = self.dom.tag_name(node) else {
            return "#document".to_string();
        };
        let mut label = tag.to_string();
        if let Some(id) = self.dom.attr(node, "id").filter(|id| !id.is_empty()) {
            label.push('#');
            label.push_str(&id);
        }
        if let Some(classes) = self.dom.attr(node, "class") {
            for class_name in classes.split_whitespace() {
                label.push('.');
                label.push_str(class_name);
            }
        }
        label
    }
}
