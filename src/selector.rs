use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AttrMatch {
    Exists { key: String },
    Equals { key: String, value: String },
    Prefix { key: String, value: String },
    Suffix { key: String, value: String },
    Substring { key: String, value: String },
    Includes { key: String, value: String },
    DashMatch { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PseudoClass {
    FirstChild,
    LastChild,
    NthChild(NthChild),
    Not(Vec<ComplexSelector>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NthChild {
    Odd,
    Even,
    AnPlusB(i64, i64),
}

impl NthChild {
    pub(crate) fn matches(&self, position: usize) -> bool {
        let position = position as i64;
        match *self {
            Self::Odd => position % 2 == 1,
            Self::Even => position % 2 == 0,
            Self::AnPlusB(0, b) => position == b,
            Self::AnPlusB(a, b) => position
                .checked_sub(b)
                .and_then(|diff| Some((diff.checked_rem(a)?, diff.checked_div(a)?)))
                .is_some_and(|(rem, quotient)| rem == 0 && quotient >= 0),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Compound {
    pub(crate) tag: Option<String>,
    pub(crate) universal: bool,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: Vec<AttrMatch>,
    pub(crate) pseudo_classes: Vec<PseudoClass>,
}

impl Compound {
    pub(crate) fn id_only(&self) -> Option<&str> {
        if !self.universal
            && self.tag.is_none()
            && self.classes.is_empty()
            && self.attrs.is_empty()
            && self.pseudo_classes.is_empty()
        {
            self.id.as_deref()
        } else {
            None
        }
    }

    fn is_empty(&self) -> bool {
        self.tag.is_none()
            && !self.universal
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attrs.is_empty()
            && self.pseudo_classes.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Combinator {
    Descendant,
    Child,
    NextSibling,
    SubsequentSibling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectorPart {
    pub(crate) compound: Compound,
    // Relation to the part on the left.
    pub(crate) combinator: Option<Combinator>,
}

pub(crate) type ComplexSelector = Vec<SelectorPart>;

/// Parses a comma-separated selector list such as
/// `select.multiselect-widget[multiple], .option-item:not([style*="none"])`.
pub(crate) fn parse_selector_list(selector: &str) -> Result<Vec<ComplexSelector>> {
    split_top_level(selector, |ch| ch == ',')?
        .into_iter()
        .map(|group| {
            if group.trim().is_empty() {
                return Err(Error::UnsupportedSelector(selector.into()));
            }
            parse_complex(&group)
        })
        .collect()
}

fn parse_complex(selector: &str) -> Result<ComplexSelector> {
    let selector = selector.trim();
    let mut parts: ComplexSelector = Vec::new();
    let mut pending: Option<Combinator> = None;

    for token in tokenize(selector)? {
        let combinator = match token.as_str() {
            ">" => Some(Combinator::Child),
            "+" => Some(Combinator::NextSibling),
            "~" => Some(Combinator::SubsequentSibling),
            _ => None,
        };
        if let Some(combinator) = combinator {
            if pending.is_some() || parts.is_empty() {
                return Err(Error::UnsupportedSelector(selector.into()));
            }
            pending = Some(combinator);
            continue;
        }

        let compound = parse_compound(&token)?;
        let combinator = if parts.is_empty() {
            None
        } else {
            Some(pending.take().unwrap_or(Combinator::Descendant))
        };
        parts.push(SelectorPart {
            compound,
            combinator,
        });
    }

    if parts.is_empty() || pending.is_some() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }
    Ok(parts)
}

/// Splits on `is_separator` outside brackets, parentheses and quotes.
fn split_top_level(src: &str, is_separator: impl Fn(char) -> bool) -> Result<Vec<String>> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut bracket_depth = 0usize;
    let mut paren_depth = 0usize;
    let mut quote: Option<char> = None;

    for ch in src.chars() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            current.push(ch);
            continue;
        }
        match ch {
            '"' | '\'' => {
                quote = Some(ch);
                current.push(ch);
            }
            '[' => {
                bracket_depth += 1;
                current.push(ch);
            }
            ']' => {
                bracket_depth = bracket_depth
                    .checked_sub(1)
                    .ok_or_else(|| Error::UnsupportedSelector(src.into()))?;
                current.push(ch);
            }
            '(' => {
                paren_depth += 1;
                current.push(ch);
            }
            ')' => {
                paren_depth = paren_depth
                    .checked_sub(1)
                    .ok_or_else(|| Error::UnsupportedSelector(src.into()))?;
                current.push(ch);
            }
            ch if bracket_depth == 0 && paren_depth == 0 && is_separator(ch) => {
                out.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }

    if bracket_depth != 0 || paren_depth != 0 || quote.is_some() {
        return Err(Error::UnsupportedSelector(src.into()));
    }
    out.push(current);
    Ok(out)
}

fn tokenize(selector: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    // Pad combinators so whitespace splitting isolates them.
    let padded = split_top_level(selector, |ch| matches!(ch, '>' | '+' | '~'))?;
    for (idx, chunk) in padded.iter().enumerate() {
        if idx > 0 {
            let combinator = selector_combinator_at(selector, &padded, idx)?;
            tokens.push(combinator.to_string());
        }
        for piece in split_top_level(chunk, |ch| ch.is_ascii_whitespace())? {
            if !piece.is_empty() {
                tokens.push(piece);
            }
        }
    }
    Ok(tokens)
}

/// Recovers which combinator character separated chunk `idx - 1` from chunk `idx`.
fn selector_combinator_at(selector: &str, chunks: &[String], idx: usize) -> Result<char> {
    let offset = chunks[..idx]
        .iter()
        .map(|chunk| chunk.len() + 1)
        .sum::<usize>()
        - 1;
    selector[offset..]
        .chars()
        .next()
        .filter(|ch| matches!(ch, '>' | '+' | '~'))
        .ok_or_else(|| Error::UnsupportedSelector(selector.into()))
}

fn parse_compound(part: &str) -> Result<Compound> {
    let unsupported = || Error::UnsupportedSelector(part.into());
    let bytes = part.as_bytes();
    let mut i = 0usize;
    let mut compound = Compound::default();

    while i < bytes.len() {
        match bytes[i] {
            b'*' => {
                if i != 0 {
                    return Err(unsupported());
                }
                compound.universal = true;
                i += 1;
            }
            b'#' => {
                let (id, next) = parse_ident(part, i + 1).ok_or_else(unsupported)?;
                if compound.id.replace(id).is_some() {
                    return Err(unsupported());
                }
                i = next;
            }
            b'.' => {
                let (class_name, next) = parse_ident(part, i + 1).ok_or_else(unsupported)?;
                compound.classes.push(class_name);
                i = next;
            }
            b'[' => {
                let (attr, next) = parse_attr_match(part, i)?;
                compound.attrs.push(attr);
                i = next;
            }
            b':' => {
                let (pseudo, next) = parse_pseudo_class(part, i)?;
                compound.pseudo_classes.push(pseudo);
                i = next;
            }
            _ => {
                if i != 0 {
                    return Err(unsupported());
                }
                let (tag, next) = parse_ident(part, i).ok_or_else(unsupported)?;
                compound.tag = Some(tag.to_ascii_lowercase());
                i = next;
            }
        }
    }

    if compound.is_empty() {
        return Err(unsupported());
    }
    Ok(compound)
}

fn parse_ident(src: &str, start: usize) -> Option<(String, usize)> {
    let bytes = src.as_bytes();
    let mut end = start;
    while end < bytes.len() && is_ident_byte(bytes[end]) {
        end += 1;
    }
    if end == start {
        return None;
    }
    Some((src.get(start..end)?.to_string(), end))
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b >= 0x80
}

fn parse_attr_match(src: &str, open_bracket: usize) -> Result<(AttrMatch, usize)> {
    let unsupported = || Error::UnsupportedSelector(src.into());
    let bytes = src.as_bytes();
    let mut i = open_bracket + 1;
    skip_ws(bytes, &mut i);

    let key_start = i;
    while i < bytes.len() && (is_ident_byte(bytes[i]) || bytes[i] == b':') {
        i += 1;
    }
    if key_start == i {
        return Err(unsupported());
    }
    let key = src[key_start..i].to_ascii_lowercase();
    skip_ws(bytes, &mut i);

    if bytes.get(i) == Some(&b']') {
        return Ok((AttrMatch::Exists { key }, i + 1));
    }

    let (op, after_op) = match (bytes.get(i), bytes.get(i + 1)) {
        (Some(b'='), _) => (b'=', i + 1),
        (Some(op @ (b'^' | b'$' | b'*' | b'~' | b'|')), Some(b'=')) => (*op, i + 2),
        _ => return Err(unsupported()),
    };
    i = after_op;
    skip_ws(bytes, &mut i);

    let (value, after_value) = parse_attr_value(src, i)?;
    i = after_value;
    skip_ws(bytes, &mut i);
    if bytes.get(i) != Some(&b']') {
        return Err(unsupported());
    }

    let cond = match op {
        b'=' => AttrMatch::Equals { key, value },
        b'^' => AttrMatch::Prefix { key, value },
        b'$' => AttrMatch::Suffix { key, value },
        b'*' => AttrMatch::Substring { key, value },
        b'~' => AttrMatch::Includes { key, value },
        _ => AttrMatch::DashMatch { key, value },
    };
    Ok((cond, i + 1))
}

fn parse_attr_value(src: &str, start: usize) -> Result<(String, usize)> {
    let bytes = src.as_bytes();
    let Some(&first) = bytes.get(start) else {
        return Err(Error::UnsupportedSelector(src.into()));
    };

    if first == b'"' || first == b'\'' {
        let mut i = start + 1;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' => i += 2,
                b if b == first => return Ok((unescape(&src[start + 1..i]), i + 1)),
                _ => i += 1,
            }
        }
        return Err(Error::UnsupportedSelector(src.into()));
    }

    let mut i = start;
    while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b']' {
        i += if bytes[i] == b'\\' { 2 } else { 1 };
    }
    let end = i.min(bytes.len());
    Ok((unescape(&src[start..end]), end))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(ch);
        }
    }
    out
}

fn parse_pseudo_class(src: &str, colon: usize) -> Result<(PseudoClass, usize)> {
    let unsupported = || Error::UnsupportedSelector(src.into());
    let (name, after_name) = parse_ident(src, colon + 1).ok_or_else(unsupported)?;
    let name = name.to_ascii_lowercase();

    match name.as_str() {
        "first-child" => Ok((PseudoClass::FirstChild, after_name)),
        "last-child" => Ok((PseudoClass::LastChild, after_name)),
        "nth-child" | "not" => {
            let (argument, next) = parenthesized_argument(src, after_name)?;
            let pseudo = if name == "not" {
                PseudoClass::Not(parse_selector_list(argument)?)
            } else {
                PseudoClass::NthChild(parse_nth_child(argument).ok_or_else(unsupported)?)
            };
            Ok((pseudo, next))
        }
        _ => Err(unsupported()),
    }
}

fn parenthesized_argument(src: &str, open: usize) -> Result<(&str, usize)> {
    let bytes = src.as_bytes();
    if bytes.get(open) != Some(&b'(') {
        return Err(Error::UnsupportedSelector(src.into()));
    }
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    for (offset, &b) in bytes[open..].iter().enumerate() {
        if let Some(q) = quote {
            if b == q {
                quote = None;
            }
            continue;
        }
        match b {
            b'"' | b'\'' => quote = Some(b),
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    let close = open + offset;
                    return Ok((&src[open + 1..close], close + 1));
                }
            }
            _ => {}
        }
    }
    Err(Error::UnsupportedSelector(src.into()))
}

fn parse_nth_child(raw: &str) -> Option<NthChild> {
    let compact = raw
        .chars()
        .filter(|ch| !ch.is_ascii_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    match compact.as_str() {
        "odd" => return Some(NthChild::Odd),
        "even" => return Some(NthChild::Even),
        "" => return None,
        _ => {}
    }

    let Some((a, b)) = compact.split_once('n') else {
        let exact = compact.parse::<i64>().ok()?;
        return Some(NthChild::AnPlusB(0, exact));
    };
    let a = match a {
        "" | "+" => 1,
        "-" => -1,
        other => other.parse::<i64>().ok()?,
    };
    let b = if b.is_empty() {
        0
    } else {
        if !b.starts_with(['+', '-']) {
            return None;
        }
        b.trim_start_matches('+').parse::<i64>().ok()?
    };
    Some(NthChild::AnPlusB(a, b))
}

fn skip_ws(bytes: &[u8], i: &mut usize) {
    while *i < bytes.len() && bytes[*i].is_ascii_whitespace() {
        *i += 1;
    }
}
