use super::*;

impl Dom {
    pub(crate) fn attr(&self, node_id: NodeId, name: &str) -> Option<String> {
        self.element(node_id)
            .and_then(|element| element.attrs.get(&name.to_ascii_lowercase()).cloned())
    }

    pub(crate) fn has_attr(&self, node_id: NodeId, name: &str) -> bool {
        self.element(node_id)
            .is_some_and(|element| element.attrs.contains_key(&name.to_ascii_lowercase()))
    }

    pub(crate) fn set_attr(&mut self, node_id: NodeId, name: &str, value: &str) -> Result<()> {
        let lowered = name.to_ascii_lowercase();
        let element = self.expect_element_mut(node_id, "setAttribute")?;
        element.attrs.insert(lowered.clone(), value.to_string());
        if lowered == "id" {
            self.rebuild_id_index();
        }
        Ok(())
    }

    pub(crate) fn remove_attr(&mut self, node_id: NodeId, name: &str) -> Result<()> {
        let lowered = name.to_ascii_lowercase();
        let element = self.expect_element_mut(node_id, "removeAttribute")?;
        element.attrs.remove(&lowered);
        if lowered == "id" {
            self.rebuild_id_index();
        }
        Ok(())
    }

    pub(crate) fn class_contains(&self, node_id: NodeId, class_name: &str) -> bool {
        self.element(node_id)
            .is_some_and(|element| has_class(element, class_name))
    }

    pub(crate) fn class_add(&mut self, node_id: NodeId, class_name: &str) -> Result<()> {
        let element = self.expect_element_mut(node_id, "classList")?;
        let mut classes = class_tokens(element.attrs.get("class").map(String::as_str));
        if !classes.iter().any(|name| name == class_name) {
            classes.push(class_name.to_string());
        }
        set_class_attr(element, &classes);
        Ok(())
    }

    /// Reads one inline declaration; `name` is a CSS property name (`z-index`).
    pub(crate) fn style_get(&self, node_id: NodeId, name: &str) -> Option<String> {
        let element = self.element(node_id)?;
        let name = name.to_ascii_lowercase();
        parse_style_declarations(element.attrs.get("style").map(String::as_str))
            .into_iter()
            .find(|(prop, _)| *prop == name)
            .map(|(_, value)| value)
    }

    pub(crate) fn style_set(&mut self, node_id: NodeId, name: &str, value: &str) -> Result<()> {
        let name = name.to_ascii_lowercase();
        let element = self.expect_element_mut(node_id, "style")?;

        let mut decls = parse_style_declarations(element.attrs.get("style").map(String::as_str));
        if let Some(pos) = decls.iter().position(|(prop, _)| *prop == name) {
            if value.is_empty() {
                decls.remove(pos);
            } else {
                decls[pos].1 = value.to_string();
            }
        } else if !value.is_empty() {
            decls.push((name, value.to_string()));
        }

        if decls.is_empty() {
            // Keep an empty style attribute to match CSSStyleDeclaration behavior.
            element.attrs.insert("style".to_string(), String::new());
        } else {
            element
                .attrs
                .insert("style".to_string(), serialize_style_declarations(&decls));
        }
        Ok(())
    }
}

fn has_class(element: &Element, class_name: &str) -> bool {
    element
        .attrs
        .get("class")
        .is_some_and(|classes| classes.split_whitespace().any(|c| c == class_name))
}

fn class_tokens(class_attr: Option<&str>) -> Vec<String> {
    class_attr
        .map(|value| value.split_whitespace().map(ToOwned::to_owned).collect())
        .unwrap_or_default()
}

fn set_class_attr(element: &mut Element, classes: &[String]) {
    if classes.is_empty() {
        element.attrs.remove("class");
    } else {
        element.attrs.insert("class".to_string(), classes.join(" "));
    }
}

/// Splits a `style` attribute into `(property, value)` pairs. Semicolons inside
/// parentheses or quotes do not terminate a declaration, so values such as
/// `rgba(0,0,0,0.2)` or `url("a;b")` survive intact. Later duplicates win.
fn parse_style_declarations(style_attr: Option<&str>) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let Some(style_attr) = style_attr else {
        return out;
    };

    let bytes = style_attr.as_bytes();
    let mut start = 0usize;
    let mut i = 0usize;
    let mut paren_depth = 0usize;
    let mut quote: Option<u8> = None;

    while i < bytes.len() {
        let ch = bytes[i];
        match quote {
            Some(_) if ch == b'\\' => {
                i += 2;
                continue;
            }
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None => match ch {
                b'\'' | b'"' => quote = Some(ch),
                b'(' => paren_depth += 1,
                b')' => paren_depth = paren_depth.saturating_sub(1),
                b';' if paren_depth == 0 => {
                    push_style_declaration(&style_attr[start..i], &mut out);
                    start = i + 1;
                }
                _ => {}
            },
        }
        i += 1;
    }
    if start < style_attr.len() {
        push_style_declaration(&style_attr[start..], &mut out);
    }
    out
}

fn push_style_declaration(raw_decl: &str, out: &mut Vec<(String, String)>) {
    let decl = raw_decl.trim();
    let Some((name, value)) = decl.split_once(':') else {
        return;
    };
    let name = name.trim().to_ascii_lowercase();
    if name.is_empty() {
        return;
    }
    let value = value.trim().to_string();

    if let Some(pos) = out.iter().position(|(existing, _)| *existing == name) {
        out[pos].1 = value;
    } else {
        out.push((name, value));
    }
}

fn serialize_style_declarations(decls: &[(String, String)]) -> String {
    decls
        .iter()
        .map(|(name, value)| format!("{name}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}
