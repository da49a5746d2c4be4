//! Element Query
//!
//! Selector subset used by `querySelector`: compound selectors (`tag`, `*`,
//! `#id`, `.class`, `[attr]`, `[attr=value]`) joined by descendant and child
//! combinators, with `,` separated groups.

use crate::{DomTree, ElementData, NodeId};

/// How a compound relates to the one on its left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Whitespace
    Descendant,
    /// `>`
    Child,
}

/// One compound selector, e.g. `div#main.card[data-x=1]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundSelector {
    /// Lower-case tag, `None` for `*` or omitted
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// `(name, expected value)`; `None` means presence only
    pub attrs: Vec<(String, Option<String>)>,
}

impl CompoundSelector {
    pub fn matches(&self, el: &ElementData) -> bool {
        if self.tag.as_deref().is_some_and(|t| t != el.tag) {
            return false;
        }
        if self.id.as_deref().is_some_and(|id| id != el.id) {
            return false;
        }
        if !self.classes.iter().all(|c| el.classes.contains(c)) {
            return false;
        }
        self.attrs.iter().all(|(name, expected)| match (el.get_attr(name), expected) {
            (Some(actual), Some(expected)) => &actual == expected,
            (Some(_), None) => true,
            (None, _) => false,
        })
    }
}

/// Compounds left to right; `combinators[i]` joins `compounds[i]` and `compounds[i + 1]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorChain {
    pub compounds: Vec<CompoundSelector>,
    pub combinators: Vec<Combinator>,
}

impl SelectorChain {
    /// Parse a selector list. Returns `None` for syntax this subset does not know.
    pub fn parse_list(selector: &str) -> Option<Vec<SelectorChain>> {
        let groups: Option<Vec<_>> = selector.split(',').map(Self::parse).collect();
        groups.filter(|g| !g.is_empty())
    }

    /// Parse one complex selector
    pub fn parse(selector: &str) -> Option<SelectorChain> {
        let mut chain = SelectorChain::default();
        let mut pending: Option<Combinator> = None;
        let mut chars = selector.trim().chars().peekable();

        while let Some(&c) = chars.peek() {
            if c.is_whitespace() {
                chars.next();
                if pending.is_none() && !chain.compounds.is_empty() {
                    pending = Some(Combinator::Descendant);
                }
                continue;
            }
            if c == '>' {
                chars.next();
                if chain.compounds.is_empty() {
                    return None;
                }
                pending = Some(Combinator::Child);
                continue;
            }

            let compound = parse_compound(&mut chars)?;
            if !chain.compounds.is_empty() {
                chain.combinators.push(pending.take().unwrap_or(Combinator::Descendant));
            }
            pending = None;
            chain.compounds.push(compound);
        }

        if chain.compounds.is_empty() || pending == Some(Combinator::Child) {
            return None;
        }
        Some(chain)
    }

    /// Check whether `node` matches the whole chain
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        match self.compounds.len() {
            0 => false,
            n => self.matches_from(tree, node, n - 1),
        }
    }

    fn matches_from(&self, tree: &DomTree, node: NodeId, idx: usize) -> bool {
        let Some(el) = tree.get(node).and_then(|n| n.as_element()) else {
            return false;
        };
        if !self.compounds[idx].matches(el) {
            return false;
        }
        if idx == 0 {
            return true;
        }
        match self.combinators[idx - 1] {
            Combinator::Child => tree
                .parent(node)
                .is_some_and(|p| self.matches_from(tree, p, idx - 1)),
            Combinator::Descendant => tree
                .ancestors(node)
                .into_iter()
                .any(|a| self.matches_from(tree, a, idx - 1)),
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut out = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        out.push(c);
        chars.next();
    }
    out
}

fn parse_compound(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<CompoundSelector> {
    let mut compound = CompoundSelector::default();
    let mut any = false;

    match chars.peek() {
        Some('*') => {
            chars.next();
            any = true;
        }
        Some(&c) if is_ident_char(c) => {
            compound.tag = Some(take_ident(chars).to_ascii_lowercase());
            any = true;
        }
        _ => {}
    }

    while let Some(&c) = chars.peek() {
        match c {
            '#' => {
                chars.next();
                let id = take_ident(chars);
                if id.is_empty() {
                    return None;
                }
                compound.id = Some(id);
            }
            '.' => {
                chars.next();
                let class = take_ident(chars);
                if class.is_empty() {
                    return None;
                }
                compound.classes.push(class);
            }
            '[' => {
                chars.next();
                let mut body = String::new();
                loop {
                    match chars.next() {
                        Some(']') => break,
                        Some(c) => body.push(c),
                        None => return None,
                    }
                }
                let (name, value) = match body.split_once('=') {
                    Some((name, value)) => (name.trim(), Some(unquote(value.trim()).to_string())),
                    None => (body.trim(), None),
                };
                if name.is_empty() {
                    return None;
                }
                compound.attrs.push((name.to_string(), value));
            }
            _ => break,
        }
        any = true;
    }

    any.then_some(compound)
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(quote).and_then(|v| v.strip_suffix(quote)) {
            return inner;
        }
    }
    value
}
