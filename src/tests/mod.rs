use super::*;

mod dom_tree;
mod html_parser;

const COLORS_HTML: &str = r#"
<form id="order">
  <label for="colors">Colors</label>
  <select id="colors" name="colors" class="multiselect-widget" multiple>
    <option value="r">Red</option>
    <option value="g">Green</option>
    <option value="b">Blue</option>
  </select>
</form>
<p id="outside">outside</p>
"#;

fn enhanced(html: &str) -> Result<(Page, WidgetId)> {
    let mut page = Page::from_html(html)?;
    let widgets = page.enhance(&WidgetConfig::default())?;
    let id = widgets
        .first()
        .copied()
        .ok_or_else(|| Error::SelectorNotFound("select.multiselect-widget".into()))?;
    Ok((page, id))
}

fn node(dom: &Dom, selector: &str) -> Result<NodeId> {
    dom.query_selector(selector)?
        .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
}
