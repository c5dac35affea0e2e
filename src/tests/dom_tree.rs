use super::*;

#[test]
fn append_child_moves_node_between_parents() -> Result<()> {
    let mut dom = html::parse_html("<div id='a'></div><div id='b'></div>")?;
    let a = node(&dom, "#a")?;
    let b = node(&dom, "#b")?;
    let p = dom.create_detached_element("P");
    assert!(!dom.is_connected(p));
    assert_eq!(dom.tag_name(p), Some("p"));

    dom.append_child(a, p)?;
    assert_eq!(dom.parent(p), Some(a));
    assert!(dom.is_connected(p));

    dom.append_child(b, p)?;
    assert!(dom.children(a).is_empty());
    assert_eq!(dom.children(b), &[p]);
    Ok(())
}

#[test]
fn append_child_rejects_cycles_and_text_parents() -> Result<()> {
    let mut dom = html::parse_html("<div id='outer'><span id='inner'>x</span></div>")?;
    let outer = node(&dom, "#outer")?;
    let inner = node(&dom, "#inner")?;
    let text = dom.children(inner)[0];

    assert!(matches!(dom.append_child(inner, outer), Err(Error::Dom(_))));
    assert!(matches!(dom.append_child(outer, outer), Err(Error::Dom(_))));
    assert!(matches!(dom.append_child(text, outer), Err(Error::Dom(_))));
    assert_eq!(dom.parent(inner), Some(outer));
    Ok(())
}

#[test]
fn insert_after_places_node_as_next_sibling_and_indexes_id() -> Result<()> {
    let mut dom = html::parse_html("<ul id='list'><li id='one'></li><li id='three'></li></ul>")?;
    let list = node(&dom, "#list")?;
    let one = node(&dom, "#one")?;
    let three = node(&dom, "#three")?;

    let two = dom.create_detached_element("li");
    dom.set_attr(two, "id", "two")?;
    assert!(dom.by_id_all("two").is_empty());

    dom.insert_after(one, two)?;
    assert_eq!(dom.child_elements(list), vec![one, two, three]);
    assert_eq!(dom.by_id_all("two"), vec![two]);

    let four = dom.create_detached_element("li");
    dom.insert_after(three, four)?;
    assert_eq!(dom.child_elements(list), vec![one, two, three, four]);
    Ok(())
}

#[test]
fn insert_after_requires_attached_target() -> Result<()> {
    let mut dom = Dom::new();
    let detached = dom.create_detached_element("div");
    let child = dom.create_detached_element("span");
    assert!(matches!(dom.insert_after(detached, child), Err(Error::Dom(_))));
    Ok(())
}

#[test]
fn remove_node_detaches_subtree_and_clears_focus() -> Result<()> {
    let mut dom = html::parse_html("<div id='outer'><button id='inner'>go</button></div>")?;
    let outer = node(&dom, "#outer")?;
    let inner = node(&dom, "#inner")?;
    dom.set_active_element(Some(inner));

    dom.remove_node(outer)?;
    assert_eq!(dom.active_element(), None);
    assert!(!dom.is_connected(inner));
    assert_eq!(dom.query_selector("#inner")?, None);
    assert_eq!(dom.text_content(outer), "go");

    assert!(matches!(dom.remove_node(dom.root), Err(Error::Dom(_))));
    Ok(())
}

#[test]
fn set_text_content_replaces_children() -> Result<()> {
    let mut dom = html::parse_html("<p id='p'>Hello <b>bold</b> world</p>")?;
    let p = node(&dom, "#p")?;
    assert_eq!(dom.text_content(p), "Hello bold world");

    dom.set_text_content(p, "plain")?;
    assert_eq!(dom.text_content(p), "plain");
    assert!(dom.child_elements(p).is_empty());

    dom.set_text_content(p, "")?;
    assert!(dom.children(p).is_empty());
    Ok(())
}

#[test]
fn class_add_keeps_tokens_unique() -> Result<()> {
    let mut dom = html::parse_html("<div id='d' class='a  b'></div>")?;
    let d = node(&dom, "#d")?;

    dom.class_add(d, "c")?;
    dom.class_add(d, "a")?;
    assert_eq!(dom.attr(d, "class").as_deref(), Some("a b c"));
    assert!(dom.class_contains(d, "b"));
    assert!(!dom.class_contains(d, "ab"));
    Ok(())
}

#[test]
fn style_set_updates_in_place_and_drops_empty_values() -> Result<()> {
    let mut dom = html::parse_html("<div id='x' style='color: red; width: 1px'></div>")?;
    let x = node(&dom, "#x")?;

    dom.style_set(x, "color", "blue")?;
    assert_eq!(dom.attr(x, "style").as_deref(), Some("color: blue; width: 1px;"));
    assert_eq!(dom.style_get(x, "COLOR").as_deref(), Some("blue"));

    dom.style_set(x, "width", "")?;
    dom.style_set(x, "display", "none")?;
    assert_eq!(dom.attr(x, "style").as_deref(), Some("color: blue; display: none;"));

    dom.style_set(x, "color", "")?;
    dom.style_set(x, "display", "")?;
    assert_eq!(dom.attr(x, "style").as_deref(), Some(""));
    assert_eq!(dom.style_get(x, "color"), None);
    Ok(())
}

#[test]
fn style_declarations_keep_parenthesized_and_quoted_semicolons() -> Result<()> {
    let mut dom = html::parse_html(
        r#"<div id='x' style="box-shadow: 0 0 rgba(0,0,0;0.2); content: 'a;b'; COLOR: red; color: green"></div>"#,
    )?;
    let x = node(&dom, "#x")?;
    assert_eq!(dom.style_get(x, "box-shadow").as_deref(), Some("0 0 rgba(0,0,0;0.2)"));
    assert_eq!(dom.style_get(x, "content").as_deref(), Some("'a;b'"));
    assert_eq!(dom.style_get(x, "color").as_deref(), Some("green"));

    dom.style_set(x, "box-shadow", "")?;
    dom.style_set(x, "content", "")?;
    assert_eq!(dom.attr(x, "style").as_deref(), Some("color: green;"));
    Ok(())
}

#[test]
fn dump_node_sorts_attributes_and_escapes() -> Result<()> {
    let dom = html::parse_html(r#"<p title='a "q"' id='p'>1 &lt; 2<br></p>"#)?;
    let p = node(&dom, "#p")?;
    assert_eq!(
        dom.dump_node(p),
        r#"<p id="p" title="a &quot;q&quot;">1 &lt; 2<br></p>"#
    );
    Ok(())
}

#[test]
fn truncate_chars_marks_cut_output() {
    assert_eq!(dom::truncate_chars("abcdef", 3), "abc...");
    assert_eq!(dom::truncate_chars("abc", 3), "abc");
}
