use multiselect_widget::{DropdownState, Error, Page, WidgetConfig, WidgetSnapshot};

const COLORS_HTML: &str = r#"
<form id="prefs" action="/save">
  <select id="colors" name="colors" class="multiselect-widget" multiple>
    <option value="red">Red</option>
    <option value="green">Green</option>
    <option value="blue">Blue</option>
  </select>
  <button id="save" type="submit">Save</button>
</form>
"#;

fn colors_page() -> multiselect_widget::Result<(Page, multiselect_widget::WidgetId)> {
    let mut page = Page::from_html(COLORS_HTML)?;
    let ids = page.enhance(&WidgetConfig::default())?;
    assert_eq!(ids.len(), 1);
    Ok((page, ids[0]))
}

#[test]
fn fresh_widget_shows_every_option_and_no_tags() -> multiselect_widget::Result<()> {
    let (page, id) = colors_page()?;
    assert_eq!(
        page.widget(id)?,
        WidgetSnapshot {
            dropdown: DropdownState::Closed,
            selected: vec![],
            tags: vec![],
            visible_rows: vec![0, 1, 2],
            placeholder: None,
        }
    );
    page.assert_count(".option-item", 3)?;
    page.assert_count(".option-tag", 0)?;
    page.assert_count(".no-option", 0)?;
    Ok(())
}

#[test]
fn picking_green_adds_a_tag_and_keeps_dropdown_state() -> multiselect_widget::Result<()> {
    let (mut page, id) = colors_page()?;
    page.click(".option-item[data-index='1']")?;

    let snapshot = page.widget(id)?;
    assert_eq!(snapshot.tags, ["Green"]);
    assert_eq!(snapshot.selected, [1]);
    assert_eq!(snapshot.visible_rows, [0, 2]);
    assert_eq!(snapshot.dropdown, DropdownState::Closed);
    assert_eq!(page.selected_values("#colors")?, ["green"]);
    Ok(())
}

#[test]
fn picking_everything_shows_the_default_message() -> multiselect_widget::Result<()> {
    let (mut page, id) = colors_page()?;
    page.click(".select-box")?;
    for index in 0..3 {
        page.click(&format!(".option-item[data-index='{index}']"))?;
    }

    let snapshot = page.widget(id)?;
    assert_eq!(snapshot.placeholder.as_deref(), Some("There are no options."));
    assert_eq!(snapshot.dropdown, DropdownState::Open);
    page.assert_text(".no-option", "There are no options.")?;

    page.click(".select-box")?;
    assert_eq!(page.widget(id)?.dropdown, DropdownState::Closed);
    page.click(".select-box")?;
    assert_eq!(page.widget(id)?.dropdown, DropdownState::Open);
    Ok(())
}

#[test]
fn removing_a_tag_restores_the_row_and_opens() -> multiselect_widget::Result<()> {
    let (mut page, id) = colors_page()?;
    page.click(".option-item[data-index='1']")?;
    page.click(".option-tag[data-index='1'] .button-tag")?;

    let snapshot = page.widget(id)?;
    assert!(snapshot.tags.is_empty());
    assert!(snapshot.selected.is_empty());
    assert_eq!(snapshot.visible_rows, [0, 1, 2]);
    assert_eq!(snapshot.dropdown, DropdownState::Open);
    assert_eq!(
        page.style(".option-item[data-index='1']", "display")?.as_deref(),
        Some("block")
    );
    Ok(())
}

#[test]
fn leaving_the_widget_closes_it() -> multiselect_widget::Result<()> {
    let (mut page, id) = colors_page()?;
    page.click(".select-box")?;
    assert_eq!(page.widget(id)?.dropdown, DropdownState::Open);

    page.click("#save")?;
    assert_eq!(page.widget(id)?.dropdown, DropdownState::Closed);
    Ok(())
}

#[test]
fn source_select_stays_in_the_form_hidden() -> multiselect_widget::Result<()> {
    let (mut page, id) = colors_page()?;
    page.select_option(id, 0)?;
    page.select_option(id, 2)?;

    page.assert_exists("#prefs > select#colors[hidden]")?;
    page.assert_exists("#prefs > select#colors + div[tabindex='0']")?;
    assert_eq!(page.selected_values("#colors")?, ["red", "blue"]);
    assert_eq!(page.query_count("#colors option[selected]")?, 2);
    Ok(())
}

#[test]
fn outer_html_exposes_generated_markup() -> multiselect_widget::Result<()> {
    let mut page = Page::from_html(
        r#"<select id="s" class="multiselect-widget" multiple
             data-select-container-class="picker" data-select-box-class="box"
             data-select-item-class="item" data-select-list-class="list"
             data-tag-class="tag" data-tag-icon-class="close"><option value="1">One</option></select>"#,
    )?;
    let ids = page.enhance(&WidgetConfig::default())?;
    page.select_option(ids[0], 0)?;

    assert_eq!(
        page.outer_html("#s + div")?,
        concat!(
            r#"<div class="picker" tabindex="0">"#,
            r#"<div class="select-box box"><div class="tag-box">"#,
            r#"<div class="option-tag tag" data-index="0"><span>One</span><span class="button-tag close"></span></div>"#,
            r#"</div></div>"#,
            r#"<div class="options-box list" style="display: none;">"#,
            r#"<a class="option-item item" data-index="0" style="display: none;">One</a>"#,
            r#"<a class="no-option" style="position: relative; padding: .75rem 1.25rem; background-color: #fff; color: #333; text-decoration: none; display: block;">There are no options.</a>"#,
            r#"</div></div>"#,
        )
    );
    Ok(())
}

#[test]
fn errors_are_reported_not_panicked() -> multiselect_widget::Result<()> {
    let (mut page, id) = colors_page()?;
    assert!(matches!(
        page.click("#missing"),
        Err(Error::SelectorNotFound(_))
    ));
    assert!(matches!(
        page.click("div:hover"),
        Err(Error::UnsupportedSelector(_))
    ));
    assert!(matches!(
        page.select_option(id, 10),
        Err(Error::OptionIndexOutOfRange { index: 10, len: 3 })
    ));
    assert!(matches!(
        page.assert_text(".option-item", "Purple"),
        Err(Error::AssertionFailed { .. })
    ));
    assert!(matches!(
        page.assert_count(".option-item", 4),
        Err(Error::AssertionFailed { .. })
    ));
    assert!(matches!(
        Page::from_html("<div><!-- open"),
        Err(Error::HtmlParse(_))
    ));
    Ok(())
}

#[test]
fn assertion_failure_carries_node_snippet() -> multiselect_widget::Result<()> {
    let (page, _) = colors_page()?;
    match page.assert_text(".option-item[data-index='0']", "Blue") {
        Err(Error::AssertionFailed {
            selector,
            expected,
            actual,
            dom_snippet,
        }) => {
            assert_eq!(selector, ".option-item[data-index='0']");
            assert_eq!(expected, "Blue");
            assert_eq!(actual, "Red");
            assert!(dom_snippet.starts_with("<a class=\"option-item\""));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    Ok(())
}

#[test]
fn deeply_nested_markup_is_handled() -> multiselect_widget::Result<()> {
    let depth = 20_000;
    let mut html = String::new();
    for _ in 0..depth {
        html.push_str("<div>");
    }
    html.push_str(
        r#"<select id="deep" class="multiselect-widget" multiple><option>A</option></select>"#,
    );
    for _ in 0..depth {
        html.push_str("</div>");
    }

    let mut page = Page::from_html(&html)?;
    let ids = page.enhance(&WidgetConfig::default())?;
    assert_eq!(page.query_count("div div .option-item")?, 1);
    page.click("#deep + div .select-box")?;
    page.click("#deep + div .option-item")?;
    assert_eq!(page.widget(ids[0])?.tags, ["A"]);
    assert_eq!(page.selected_values("#deep")?, ["A"]);
    page.assert_text(".option-tag", "Ax")?;
    page.assert_count(".no-option", 1)?;
    page.focus("#deep + div")?;
    page.blur("#deep + div")?;
    assert_eq!(page.widget(ids[0])?.dropdown, DropdownState::Closed);

    page.deselect_option(ids[0], 0)?;
    assert!(page.text("div")?.contains('A'));
    assert!(page.outer_html("#deep + div")?.starts_with("<div"));
    assert!(page.dump().len() > depth * 11);
    Ok(())
}
