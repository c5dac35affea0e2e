use super::*;

#[test]
fn nested_elements_and_text_are_preserved() -> Result<()> {
    let dom = html::parse_html("<div id='root'><p>Hello <b>world</b>!</p></div>")?;
    let root = node(&dom, "#root")?;
    assert_eq!(dom.text_content(root), "Hello world!");
    assert_eq!(dom.query_selector_all("div > p > b")?.len(), 1);
    Ok(())
}

#[test]
fn option_and_optgroup_end_tags_are_implied() -> Result<()> {
    let dom = html::parse_html(
        "<select id='s'><option>A<option>B<optgroup label='g'><option>C</select><p id='after'></p>",
    )?;
    let select = node(&dom, "#s")?;
    let children = dom.child_elements(select);
    assert_eq!(children.len(), 3);
    assert!(dom.is_tag(children[0], "option"));
    assert!(dom.is_tag(children[1], "option"));
    assert!(dom.is_tag(children[2], "optgroup"));
    assert_eq!(dom.text_content(children[0]), "A");
    assert_eq!(dom.child_elements(children[2]).len(), 1);

    let after = node(&dom, "#after")?;
    assert_eq!(dom.parent(after), Some(dom.root));
    Ok(())
}

#[test]
fn paragraph_is_closed_by_block_start_tag() -> Result<()> {
    let dom = html::parse_html("<p id='p'>text<div id='d'></div>")?;
    let d = node(&dom, "#d")?;
    assert_eq!(dom.parent(d), Some(dom.root));
    Ok(())
}

#[test]
fn void_and_self_closing_tags_take_no_children() -> Result<()> {
    let dom = html::parse_html("<div id='d'><br><input id='i'><span/>after</div>")?;
    let d = node(&dom, "#d")?;
    assert_eq!(dom.child_elements(d).len(), 3);
    assert_eq!(dom.children(d).len(), 4);
    assert_eq!(dom.text_content(d), "after");
    Ok(())
}

#[test]
fn attribute_forms_are_decoded() -> Result<()> {
    let dom = html::parse_html(
        r#"<a id=plain data-x='single' data-y="dou&quot;ble" hidden DATA-Case="Kept"></a><b id='first' id='second'></b>"#,
    )?;
    let a = node(&dom, "#plain")?;
    assert_eq!(dom.attr(a, "data-x").as_deref(), Some("single"));
    assert_eq!(dom.attr(a, "data-y").as_deref(), Some("dou\"ble"));
    assert_eq!(dom.attr(a, "hidden").as_deref(), Some(""));
    assert_eq!(dom.attr(a, "data-case").as_deref(), Some("Kept"));
    assert!(dom.query_selector("#first")?.is_some());
    assert!(dom.query_selector("#second")?.is_none());
    Ok(())
}

#[test]
fn tag_and_attribute_names_are_lowercased() -> Result<()> {
    let dom = html::parse_html("<DIV ID='Up'><SPAN></SPAN></DIV>")?;
    let up = node(&dom, "#Up")?;
    assert_eq!(dom.tag_name(up), Some("div"));
    assert_eq!(dom.query_selector_all("div span")?.len(), 1);
    Ok(())
}

#[test]
fn character_references_are_decoded() -> Result<()> {
    let dom = html::parse_html("<p id='p'>&lt;tag&gt; &amp; &#65;&#x42; &unknown; &copy; a&b</p>")?;
    let p = node(&dom, "#p")?;
    assert_eq!(dom.text_content(p), "<tag> & AB &unknown; \u{a9} a&b");
    Ok(())
}

#[test]
fn comments_and_doctype_are_skipped() -> Result<()> {
    let dom = html::parse_html(
        "<!DOCTYPE html><!-- <div id='hidden'></div> --><div id='shown'></div>",
    )?;
    assert!(dom.query_selector("#hidden")?.is_none());
    assert_eq!(dom.query_selector_all("div")?.len(), 1);
    Ok(())
}

#[test]
fn script_body_is_raw_text() -> Result<()> {
    let dom = html::parse_html(
        r#"<script id='s'>if (a < b) { x = "</div>"; }</script><div id='after'></div>"#,
    )?;
    let script = node(&dom, "#s")?;
    assert_eq!(dom.text_content(script), r#"if (a < b) { x = "</div>"; }"#);
    assert!(dom.child_elements(script).is_empty());
    assert!(dom.query_selector("#after")?.is_some());
    Ok(())
}

#[test]
fn stray_end_tags_are_ignored() -> Result<()> {
    let dom = html::parse_html("<div id='a'></span><p id='b'></p></div>")?;
    let a = node(&dom, "#a")?;
    let b = node(&dom, "#b")?;
    assert_eq!(dom.parent(b), Some(a));
    Ok(())
}

#[test]
fn undelimited_markup_is_rejected() {
    for markup in [
        "<div><!-- never closed",
        "<div class",
        "<div id='open>",
        "<script>no end",
        "<div></div",
    ] {
        assert!(
            matches!(html::parse_html(markup), Err(Error::HtmlParse(_))),
            "expected parse error for {markup:?}"
        );
    }
}

#[test]
fn void_tag_table_covers_form_inputs() {
    assert!(html::is_void_tag("input"));
    assert!(html::is_void_tag("br"));
    assert!(!html::is_void_tag("select"));
    assert!(!html::is_void_tag("option"));
}
