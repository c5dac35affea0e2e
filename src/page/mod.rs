use super::*;
use crate::widget::MultiSelect;
use tracing::info;

mod actions;
mod assertions;
mod trace;

use trace::TraceState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EventKind {
    Click,
    Blur,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Listener {
    pub(crate) event: EventKind,
    pub(crate) widget: WidgetId,
}

/// An in-memory hosting document: the parsed DOM, the widgets enhancing it,
/// their listeners, and focus.
#[derive(Debug)]
pub struct Page {
    dom: Dom,
    widgets: Vec<MultiSelect>,
    listeners: HashMap<NodeId, Vec<Listener>>,
    trace: TraceState,
}

impl Page {
    pub fn from_html(markup: &str) -> Result<Self> {
        let dom = stacker::grow(32 * 1024 * 1024, || crate::html::parse_html(markup))?;
        Ok(Self {
            dom,
            widgets: Vec::new(),
            listeners: HashMap::new(),
            trace: TraceState::default(),
        })
    }

    /// Enhances every `select.<marker>[multiple]` in the document, in document
    /// order. Selects that already carry a widget are skipped.
    pub fn enhance(&mut self, config: &WidgetConfig) -> Result<Vec<WidgetId>> {
        stacker::grow(32 * 1024 * 1024, || {
            let sources = self.dom.query_selector_all(&config.discovery_selector()?)?;
            self.enhance_sources(sources, config)
        })
    }

    /// Like [`Page::enhance`], restricted to descendants of the elements
    /// matching `scope_selector`.
    pub fn enhance_within(
        &mut self,
        scope_selector: &str,
        config: &WidgetConfig,
    ) -> Result<Vec<WidgetId>> {
        stacker::grow(32 * 1024 * 1024, || {
            let scopes = self.dom.query_selector_all(scope_selector)?;
            if scopes.is_empty() {
                return Err(Error::SelectorNotFound(scope_selector.to_string()));
            }

            let sources = self
                .dom
                .query_selector_all(&config.discovery_selector()?)?
                .into_iter()
                .filter(|source| {
                    scopes
                        .iter()
                        .any(|scope| self.dom.is_descendant_of(*source, *scope))
                })
                .collect();
            self.enhance_sources(sources, config)
        })
    }

    fn enhance_sources(
        &mut self,
        sources: Vec<NodeId>,
        config: &WidgetConfig,
    ) -> Result<Vec<WidgetId>> {
        let mut created = Vec::new();
        for source in sources {
            if self.widgets.iter().any(|widget| widget.source == source) {
                continue;
            }

            let id = WidgetId(self.widgets.len());
            let widget = MultiSelect::render(&mut self.dom, id, source, config)?;
            let container = widget.container;
            self.add_listener(container, EventKind::Click, id);
            self.add_listener(container, EventKind::Blur, id);
            self.trace_line(format!(
                "[widget] enhanced id={} options={} preselected={}",
                id.index(),
                widget.option_count(),
                widget.tags.len()
            ));
            self.widgets.push(widget);
            created.push(id);
        }

        info!(
            event = "page.enhance.completed",
            created = created.len(),
            total = self.widgets.len()
        );
        Ok(created)
    }

    fn add_listener(&mut self, node: NodeId, event: EventKind, widget: WidgetId) {
        self.listeners
            .entry(node)
            .or_default()
            .push(Listener { event, widget });
    }

    pub fn widgets(&self) -> Vec<WidgetId> {
        self.widgets.iter().map(|widget| widget.id).collect()
    }

    pub fn widget(&self, id: WidgetId) -> Result<WidgetSnapshot> {
        let widget = self
            .widgets
            .get(id.0)
            .ok_or(Error::UnknownWidget(id.0))?;
        Ok(stacker::grow(32 * 1024 * 1024, || widget.snapshot(&self.dom)))
    }

    /// Selects option `index` as a row click would, without touching the
    /// dropdown.
    pub fn select_option(&mut self, id: WidgetId, index: usize) -> Result<()> {
        let widget = self
            .widgets
            .get_mut(id.0)
            .ok_or(Error::UnknownWidget(id.0))?;
        let dom = &mut self.dom;
        let changed = stacker::grow(32 * 1024 * 1024, || -> Result<bool> {
            if !widget.select(dom, index)? {
                return Ok(false);
            }
            widget.sync_placeholder(dom)?;
            Ok(true)
        })?;
        if changed {
            self.trace_line(format!("[widget] select id={} index={index}", id.index()));
        }
        Ok(())
    }

    /// Deselects option `index`. Unlike the remove control, this leaves the
    /// dropdown state alone.
    pub fn deselect_option(&mut self, id: WidgetId, index: usize) -> Result<()> {
        let widget = self
            .widgets
            .get_mut(id.0)
            .ok_or(Error::UnknownWidget(id.0))?;
        let dom = &mut self.dom;
        let changed = stacker::grow(32 * 1024 * 1024, || -> Result<bool> {
            if !widget.deselect(dom, index)? {
                return Ok(false);
            }
            widget.sync_placeholder(dom)?;
            Ok(true)
        })?;
        if changed {
            self.trace_line(format!("[widget] deselect id={} index={index}", id.index()));
        }
        Ok(())
    }

    /// The values a form would submit for the `<select>` matching `selector`.
    pub fn selected_values(&self, selector: &str) -> Result<Vec<String>> {
        stacker::grow(32 * 1024 * 1024, || {
            let select = self.select_one(selector)?;
            if !self.dom.is_tag(select, "select") {
                return Err(Error::Dom(format!("{selector} is not a <select>")));
            }

            let mut nodes = Vec::new();
            self.dom.collect_descendant_elements(select, &mut nodes);
            Ok(nodes
                .into_iter()
                .filter(|node| {
                    self.dom.is_tag(*node, "option") && self.dom.has_attr(*node, "selected")
                })
                .map(|option| self.option_value(option))
                .collect())
        })
    }

    fn option_value(&self, option: NodeId) -> String {
        self.dom.attr(option, "value").unwrap_or_else(|| {
            self.dom
                .text_content(option)
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
    }

    pub fn text(&self, selector: &str) -> Result<String> {
        stacker::grow(32 * 1024 * 1024, || {
            let target = self.select_one(selector)?;
            Ok(self.dom.text_content(target))
        })
    }

    pub fn attr(&self, selector: &str, name: &str) -> Result<Option<String>> {
        let target = stacker::grow(32 * 1024 * 1024, || self.select_one(selector))?;
        Ok(self.dom.attr(target, name))
    }

    /// Reads one inline style declaration by CSS property name.
    pub fn style(&self, selector: &str, property: &str) -> Result<Option<String>> {
        let target = stacker::grow(32 * 1024 * 1024, || self.select_one(selector))?;
        Ok(self.dom.style_get(target, property))
    }

    pub fn query_count(&self, selector: &str) -> Result<usize> {
        stacker::grow(32 * 1024 * 1024, || {
            Ok(self.dom.query_selector_all(selector)?.len())
        })
    }

    pub fn outer_html(&self, selector: &str) -> Result<String> {
        stacker::grow(32 * 1024 * 1024, || {
            let target = self.select_one(selector)?;
            Ok(self.dom.dump_node(target))
        })
    }

    pub fn dump(&self) -> String {
        stacker::grow(32 * 1024 * 1024, || self.dom.dump_node(self.dom.root))
    }
}
