//! Selector micro-parser
//!
//! Splits a compact selector such as `span#main.a.b[data-id="x"]:disabled Some text`
//! into tag, id, classes, attributes, boolean properties and trailing text.
//!
//! Parsing never fails. Each part is scanned independently over the whole raw
//! string (trailing text included), and anything that does not match simply
//! leaves the part empty.

/// Tag used when the selector has no leading alphanumeric run
pub const DEFAULT_TAG: &str = "div";

/// `[key=value]` pair taken from a selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorAttribute {
    pub key: String,
    pub value: String,
}

impl SelectorAttribute {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// Result of [`parse`]. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSelector {
    pub tag: String,
    /// Empty when the selector has no `#id`
    pub id: String,
    /// In source order, duplicates kept
    pub classes: Vec<String>,
    pub attributes: Vec<SelectorAttribute>,
    /// `:name` tokens, applied as self-named attributes
    pub properties: Vec<String>,
    /// Everything after the first space
    pub text: String,
}

impl Default for ParsedSelector {
    fn default() -> Self {
        Self {
            tag: DEFAULT_TAG.to_string(),
            id: String::new(),
            classes: Vec::new(),
            attributes: Vec::new(),
            properties: Vec::new(),
            text: String::new(),
        }
    }
}

impl From<&str> for ParsedSelector {
    fn from(selector: &str) -> Self {
        parse(selector)
    }
}

/// Parse a selector string
pub fn parse(selector: &str) -> ParsedSelector {
    let parsed = ParsedSelector {
        tag: parse_tag(selector),
        id: prefixed_tokens(selector, b'#').next().unwrap_or_default().to_string(),
        classes: prefixed_tokens(selector, b'.').map(str::to_string).collect(),
        attributes: parse_attributes(selector),
        properties: parse_properties(selector),
        text: selector
            .split_once(' ')
            .map(|(_, text)| text.to_string())
            .unwrap_or_default(),
    };
    tracing::trace!("Parsed selector {:?} -> {:?}", selector, parsed);
    parsed
}

#[inline]
fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

/// Every `<prefix>token` match, left to right, prefix stripped
fn prefixed_tokens(selector: &str, prefix: u8) -> impl Iterator<Item = &str> {
    let bytes = selector.as_bytes();
    let mut pos = 0;
    std::iter::from_fn(move || {
        while pos < bytes.len() {
            let start = pos + 1;
            if bytes[pos] != prefix {
                pos += 1;
                continue;
            }
            let mut end = start;
            while end < bytes.len() && is_token_byte(bytes[end]) {
                end += 1;
            }
            pos = end.max(start);
            if end > start {
                return Some(&selector[start..end]);
            }
        }
        None
    })
}

fn parse_tag(selector: &str) -> String {
    let lower = selector.to_lowercase();
    let tag: String = lower
        .chars()
        .take_while(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect();
    if tag.is_empty() {
        DEFAULT_TAG.to_string()
    } else {
        tag
    }
}

#[inline]
fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Shortest `[...]` groups holding at least one character, no line breaks
fn bracket_groups(selector: &str) -> Vec<&str> {
    let mut groups = Vec::new();
    let mut search_from = 0;

    while let Some(offset) = selector[search_from..].find('[') {
        let open = search_from + offset;
        let body_start = open + 1;
        let mut body = selector[body_start..].char_indices();

        // The first body character may itself be ']'.
        let closed = match body.next() {
            Some((_, c)) if !is_line_terminator(c) => body
                .take_while(|&(_, c)| !is_line_terminator(c))
                .find(|&(_, c)| c == ']')
                .map(|(i, _)| body_start + i),
            _ => None,
        };

        match closed {
            Some(close) => {
                groups.push(&selector[body_start..close]);
                search_from = close + 1;
            }
            None => search_from = body_start,
        }
    }
    groups
}

fn strip_outer_quotes(value: &str) -> &str {
    let value = value
        .strip_prefix('\'')
        .or_else(|| value.strip_prefix('"'))
        .unwrap_or(value);
    value
        .strip_suffix('\'')
        .or_else(|| value.strip_suffix('"'))
        .unwrap_or(value)
}

fn parse_attributes(selector: &str) -> Vec<SelectorAttribute> {
    bracket_groups(selector)
        .into_iter()
        .filter_map(|group| {
            let (key, value) = match group.split_once('=') {
                Some((key, value)) => (key, strip_outer_quotes(value)),
                // `[disabled]` is a self-named attribute
                None => (group, group),
            };
            match (key.is_empty(), value.is_empty()) {
                (false, _) => Some(SelectorAttribute::new(key, value)),
                (true, false) => Some(SelectorAttribute::new(value, value)),
                (true, true) => {
                    tracing::trace!("Dropping empty attribute group in {:?}", selector);
                    None
                }
            }
        })
        .collect()
}

/// `:` followed by the longest run of non-digit characters
fn parse_properties(selector: &str) -> Vec<String> {
    let bytes = selector.as_bytes();
    let mut out = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b':' || bytes.get(pos + 1).is_none_or(u8::is_ascii_digit) {
            pos += 1;
            continue;
        }
        let start = pos + 1;
        let end = bytes[start..]
            .iter()
            .position(u8::is_ascii_digit)
            .map_or(bytes.len(), |i| start + i);
        out.push(selector[start..end].to_string());
        pos = end;
    }
    out
}
