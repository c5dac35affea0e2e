use super::*;
use tracing::info;

impl MultiSelect {
    /// Builds the detached widget tree for `source`, styles it, projects the
    /// pre-selected options, then hides `source` and inserts the container
    /// right after it.
    pub(crate) fn render(
        dom: &mut Dom,
        id: WidgetId,
        source: NodeId,
        config: &WidgetConfig,
    ) -> Result<Self> {
        if !dom.is_tag(source, "select") {
            return Err(Error::Dom("multiselect source is not a <select>".into()));
        }

        let options = collect_options(dom, source);
        let labels = options
            .iter()
            .map(|option| dom.text_content(*option))
            .collect::<Vec<_>>();
        let no_options_message = dom
            .attr(source, "data-no-options-msg")
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| config.no_options_message().to_string());

        let list = build_option_list(dom, &labels)?;
        let (container, select_box, tag_box) = build_container(dom, list)?;
        let rows = dom.child_elements(list);

        let mut widget = Self {
            id,
            source,
            options,
            labels,
            container,
            tag_box,
            list,
            rows,
            tags: Vec::new(),
            placeholder: None,
            dropdown: DropdownState::Closed,
            no_options_message,
            styles: ResolvedStyles::resolve(dom, source, config.styles()),
        };

        widget.styles.apply(dom, Zone::Container, container)?;
        widget.styles.apply(dom, Zone::SelectBox, select_box)?;
        for row in widget.rows.clone() {
            widget.styles.apply(dom, Zone::OptionRow, row)?;
        }
        widget.styles.apply(dom, Zone::Dropdown, list)?;
        dom.style_set(list, "display", widget.dropdown.display_value())?;

        for index in widget.selected_indices(dom) {
            widget.insert_tag(dom, index)?;
        }
        widget.sync_placeholder(dom)?;

        dom.set_attr(source, "hidden", "")?;
        dom.insert_after(source, container)?;

        info!(
            event = "widget.enhanced",
            widget = id.index(),
            options = widget.option_count(),
            preselected = widget.tags.len(),
            overridden_zones = Zone::ALL
                .iter()
                .filter(|zone| widget.styles.is_overridden(**zone))
                .count()
        );
        Ok(widget)
    }
}

/// Options in source order, including those nested in `<optgroup>`.
fn collect_options(dom: &Dom, select: NodeId) -> Vec<NodeId> {
    let mut nodes = Vec::new();
    dom.collect_descendant_elements(select, &mut nodes);
    nodes.retain(|node| dom.is_tag(*node, "option"));
    nodes
}

fn build_option_list(dom: &mut Dom, labels: &[String]) -> Result<NodeId> {
    let list = dom.create_detached_element("div");
    dom.class_add(list, "options-box")?;

    for (index, label) in labels.iter().enumerate() {
        let row = dom.create_detached_element("a");
        dom.set_attr(row, "data-index", &index.to_string())?;
        dom.class_add(row, "option-item")?;
        dom.set_text_content(row, label)?;
        dom.append_child(list, row)?;
    }
    Ok(list)
}

fn build_container(dom: &mut Dom, list: NodeId) -> Result<(NodeId, NodeId, NodeId)> {
    let container = dom.create_detached_element("div");
    dom.set_attr(container, "tabindex", "0")?;

    let select_box = dom.create_detached_element("div");
    dom.class_add(select_box, "select-box")?;
    let tag_box = dom.create_detached_element("div");
    dom.class_add(tag_box, "tag-box")?;

    dom.append_child(select_box, tag_box)?;
    dom.append_child(container, select_box)?;
    dom.append_child(container, list)?;
    Ok((container, select_box, tag_box))
}
