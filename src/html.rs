use super::*;

/// Parses page markup into a fresh document. The parser is forgiving in the
/// way browsers are about stray end tags and implied `</option>`/`</li>`/`</p>`,
/// but rejects input it cannot delimit (unclosed comments, tags, quotes).
pub(crate) fn parse_html(html: &str) -> Result<Dom> {
    let mut dom = Dom::new();
    let mut stack = vec![dom.root];
    let bytes = html.as_bytes();
    let mut i = 0usize;

    while i < bytes.len() {
        if starts_with_at(bytes, i, b"<!--") {
            let end = find_subslice(bytes, i + 4, b"-->")
                .ok_or_else(|| Error::HtmlParse("unclosed HTML comment".into()))?;
            i = end + 3;
            continue;
        }

        if bytes[i] == b'<' && starts_with_at(bytes, i, b"</") {
            let (tag, next) = parse_end_tag(html, i)?;
            i = next;
            close_open_element(&dom, &mut stack, &tag);
            continue;
        }

        if bytes[i] == b'<' && starts_with_at(bytes, i, b"<!") {
            i = skip_declaration(html, i)?;
            continue;
        }

        if bytes[i] == b'<' && bytes.get(i + 1).is_some_and(u8::is_ascii_alphabetic) {
            let (tag, attrs, self_closing, next) = parse_start_tag(html, i)?;
            i = next;
            close_implied_end_tags(&dom, &mut stack, &tag);

            let parent = *stack
                .last()
                .ok_or_else(|| Error::HtmlParse("missing parent element".into()))?;
            let node = dom.create_element(parent, tag.clone(), attrs);

            if is_raw_text_tag(&tag) && !self_closing {
                let close = find_end_tag_ignore_case(bytes, i, tag.as_bytes())
                    .ok_or_else(|| Error::HtmlParse(format!("unclosed <{tag}>")))?;
                let body = &html[i..close];
                if !body.is_empty() {
                    let text = if tag == "script" || tag == "style" {
                        body.to_string()
                    } else {
                        decode_character_references(body)
                    };
                    dom.create_text(node, text);
                }
                let (_, after_end) = parse_end_tag(html, close)?;
                i = after_end;
                continue;
            }

            if !self_closing && !is_void_tag(&tag) {
                stack.push(node);
            }
            continue;
        }

        let text_start = i;
        i += 1;
        while i < bytes.len() && bytes[i] != b'<' {
            i += 1;
        }
        let parent = *stack
            .last()
            .ok_or_else(|| Error::HtmlParse("missing parent element".into()))?;
        let decoded = decode_character_references(&html[text_start..i]);
        if !decoded.is_empty() {
            dom.create_text(parent, decoded);
        }
    }

    dom.rebuild_id_index();
    Ok(dom)
}

/// Pops up to and including the nearest open element named `tag`. A stray end
/// tag with no open counterpart is ignored.
fn close_open_element(dom: &Dom, stack: &mut Vec<NodeId>, tag: &str) {
    if let Some(index) = (1..stack.len())
        .rev()
        .find(|index| dom.is_tag(stack[*index], tag))
    {
        stack.truncate(index);
    }
}

fn close_implied_end_tags(dom: &Dom, stack: &mut Vec<NodeId>, tag: &str) {
    let (closes, boundaries): (&[&str], &[&str]) = match tag {
        "option" => (&["option"], &["select", "datalist", "optgroup"]),
        "optgroup" => (&["option", "optgroup"], &["select"]),
        "li" => (&["li"], &["ul", "ol", "menu"]),
        "dt" | "dd" => (&["dt", "dd"], &["dl"]),
        tag if closes_paragraph(tag) => (&["p"], &["div", "section", "article", "body"]),
        _ => return,
    };

    loop {
        let Some(&top) = stack.last() else {
            return;
        };
        if stack.len() == 1 || boundaries.iter().any(|boundary| dom.is_tag(top, boundary)) {
            return;
        }
        if closes.iter().any(|name| dom.is_tag(top, name)) {
            stack.pop();
            continue;
        }
        return;
    }
}

fn closes_paragraph(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "div"
            | "ul"
            | "ol"
            | "table"
            | "form"
            | "section"
            | "article"
            | "header"
            | "footer"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "pre"
            | "blockquote"
            | "hr"
    )
}

fn parse_start_tag(
    html: &str,
    at: usize,
) -> Result<(String, HashMap<String, String>, bool, usize)> {
    let bytes = html.as_bytes();
    let mut i = at + 1;

    let tag_start = i;
    while i < bytes.len() && is_tag_byte(bytes[i]) {
        i += 1;
    }
    let tag = html[tag_start..i].to_ascii_lowercase();
    if tag.is_empty() {
        return Err(Error::HtmlParse("empty tag name".into()));
    }

    let mut attrs = HashMap::new();
    let mut self_closing = false;

    loop {
        skip_ws(bytes, &mut i);
        match bytes.get(i) {
            None => return Err(Error::HtmlParse(format!("unclosed start tag <{tag}>"))),
            Some(b'>') => {
                i += 1;
                break;
            }
            Some(b'/') if bytes.get(i + 1) == Some(&b'>') => {
                self_closing = true;
                i += 2;
                break;
            }
            Some(b) if !is_attr_name_byte(*b) => {
                // Skip junk such as a lone `/` or stray quotes between attributes.
                i += 1;
                continue;
            }
            Some(_) => {}
        }

        let name_start = i;
        while i < bytes.len() && is_attr_name_byte(bytes[i]) {
            i += 1;
        }
        let name = html[name_start..i].to_ascii_lowercase();

        skip_ws(bytes, &mut i);
        let value = if bytes.get(i) == Some(&b'=') {
            i += 1;
            skip_ws(bytes, &mut i);
            parse_attr_value(html, &mut i)?
        } else {
            String::new()
        };

        // First occurrence wins, as in browsers.
        attrs.entry(name).or_insert(value);
    }

    Ok((tag, attrs, self_closing, i))
}

fn parse_attr_value(html: &str, i: &mut usize) -> Result<String> {
    let bytes = html.as_bytes();
    let Some(&first) = bytes.get(*i) else {
        return Err(Error::HtmlParse("missing attribute value".into()));
    };

    if first == b'\'' || first == b'"' {
        let start = *i + 1;
        let end = find_byte(bytes, start, first)
            .ok_or_else(|| Error::HtmlParse("unclosed quoted attribute value".into()))?;
        *i = end + 1;
        return Ok(decode_character_references(&html[start..end]));
    }

    let start = *i;
    while *i < bytes.len()
        && !bytes[*i].is_ascii_whitespace()
        && bytes[*i] != b'>'
        && !(bytes[*i] == b'/' && bytes.get(*i + 1) == Some(&b'>'))
    {
        *i += 1;
    }
    Ok(decode_character_references(&html[start..*i]))
}

fn parse_end_tag(html: &str, at: usize) -> Result<(String, usize)> {
    let bytes = html.as_bytes();
    let mut i = at + 2;
    skip_ws(bytes, &mut i);

    let tag_start = i;
    while i < bytes.len() && is_tag_byte(bytes[i]) {
        i += 1;
    }
    let tag = html[tag_start..i].to_ascii_lowercase();

    let close = find_byte(bytes, i, b'>')
        .ok_or_else(|| Error::HtmlParse("unclosed end tag".into()))?;
    Ok((tag, close + 1))
}

fn skip_declaration(html: &str, at: usize) -> Result<usize> {
    find_byte(html.as_bytes(), at + 2, b'>')
        .map(|close| close + 1)
        .ok_or_else(|| Error::HtmlParse("unclosed declaration tag".into()))
}

/// Decodes `&amp;`-style named references and `&#NN;`/`&#xNN;` numeric ones.
/// Unknown references are kept verbatim.
fn decode_character_references(src: &str) -> String {
    if !src.contains('&') {
        return src.to_string();
    }

    let mut out = String::with_capacity(src.len());
    let mut rest = src;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        let decoded = tail.find(';').and_then(|semicolon| {
            let raw = &tail[..semicolon];
            decode_reference(raw).map(|ch| (ch, semicolon + 1))
        });
        match decoded {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_reference(raw: &str) -> Option<char> {
    if let Some(numeric) = raw.strip_prefix('#') {
        let codepoint = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        return char::from_u32(codepoint);
    }
    let ch = match raw {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{00A0}',
        "times" => '×',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        "euro" => '€',
        "pound" => '£',
        "yen" => '¥',
        "hellip" => '…',
        "middot" => '·',
        "ndash" => '–',
        "mdash" => '—',
        "laquo" => '«',
        "raquo" => '»',
        _ => return None,
    };
    Some(ch)
}

pub(crate) fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn is_raw_text_tag(tag: &str) -> bool {
    matches!(tag, "script" | "style" | "textarea" | "title")
}

fn is_tag_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

fn is_attr_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':' || b == b'.'
}

fn skip_ws(bytes: &[u8], i: &mut usize) {
    while *i < bytes.len() && bytes[*i].is_ascii_whitespace() {
        *i += 1;
    }
}

fn starts_with_at(bytes: &[u8], at: usize, needle: &[u8]) -> bool {
    bytes.get(at..at + needle.len()) == Some(needle)
}

fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|b| *b == needle)
        .map(|offset| from + offset)
}

fn find_subslice(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|offset| from + offset)
}

fn find_end_tag_ignore_case(bytes: &[u8], from: usize, tag: &[u8]) -> Option<usize> {
    let mut i = from;
    while let Some(lt) = find_byte(bytes, i, b'<') {
        let name_start = lt + 2;
        let boundary = bytes.get(name_start + tag.len());
        if bytes.get(lt + 1) == Some(&b'/')
            && bytes
                .get(name_start..name_start + tag.len())
                .is_some_and(|name| name.eq_ignore_ascii_case(tag))
            && boundary.is_none_or(|b| b.is_ascii_whitespace() || *b == b'>' || *b == b'/')
        {
            return Some(lt);
        }
        i = lt + 1;
    }
    None
}
