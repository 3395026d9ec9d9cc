//! Inline-markup fragments.
//!
//! A deliberately small tokenizer: it splits a fragment into markup tokens
//! (tags, comments, CDATA, processing instructions) and text nodes, keeps
//! track of which elements are open around each text node, lets text nodes be
//! replaced, and serializes the result. Markup is emitted exactly as it came
//! in, as are text nodes that were never replaced.
//!
//! ```text
//! "<a>计算机</a> (<esc>x,</esc>)"
//!   Markup(<a>) Text(计算机) Markup(</a>) Text( () Markup(<esc>) Text(x,)* Markup(</esc>) Text())
//!                                                                 * escaped
//! ```
//!
//! It is not a validating parser. A `<` that does not open a well-formed tag
//! is text; unbalanced end tags are ignored for ancestry purposes.

use std::ops::Range;

/// Reserved element name marking an escape region.
pub const ESCAPE_TAG: &str = "esc";

#[derive(Debug, Clone)]
enum Piece {
    Markup { span: Range<usize>, escape_marker: bool },
    Text { span: Range<usize>, escaped: bool, replaced: Option<String> },
}

/// A parsed fragment whose text nodes can be read and replaced.
#[derive(Debug, Clone)]
pub(crate) struct Fragment<'a> {
    source: &'a str,
    pieces: Vec<Piece>,
}

/// Read-only view of one text node.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TextNode<'a> {
    /// Index to pass back to [`Fragment::replace`].
    pub id: usize,
    /// Raw text as written in the fragment (entities not decoded).
    pub raw: &'a str,
    /// Inside an escape region.
    pub escaped: bool,
}

enum Tag<'a> {
    Start { name: &'a str, self_closing: bool },
    End { name: &'a str },
    Other,
}

impl<'a> Fragment<'a> {
    pub fn parse(source: &'a str) -> Self {
        let mut pieces = Vec::new();
        let mut open: Vec<&'a str> = Vec::new();
        let mut text_start = 0;
        let mut pos = 0;

        while let Some(offset) = source[pos..].find('<') {
            let lt = pos + offset;
            let Some((end, tag)) = scan_markup(source, lt) else {
                pos = lt + 1;
                continue;
            };

            push_text(&mut pieces, text_start..lt, open.contains(&ESCAPE_TAG));

            let escape_marker = match tag {
                Tag::Start { name, self_closing } => {
                    if !self_closing {
                        open.push(name);
                    }
                    name == ESCAPE_TAG
                }
                Tag::End { name } => {
                    if let Some(idx) = open.iter().rposition(|n| *n == name) {
                        open.truncate(idx);
                    }
                    name == ESCAPE_TAG
                }
                Tag::Other => false,
            };
            pieces.push(Piece::Markup { span: lt..end, escape_marker });

            text_start = end;
            pos = end;
        }
        push_text(&mut pieces, text_start..source.len(), open.contains(&ESCAPE_TAG));

        Fragment { source, pieces }
    }

    /// Non-empty text nodes in document order.
    pub fn text_nodes(&self) -> Vec<TextNode<'a>> {
        let source = self.source;
        self.pieces
            .iter()
            .enumerate()
            .filter_map(|(id, piece)| match piece {
                Piece::Text { span, escaped, .. } => {
                    Some(TextNode { id, raw: &source[span.clone()], escaped: *escaped })
                }
                Piece::Markup { .. } => None,
            })
            .collect()
    }

    /// Replace the content of text node `id` with already-decoded `text`.
    pub fn replace(&mut self, id: usize, text: String) {
        if let Some(Piece::Text { replaced, .. }) = self.pieces.get_mut(id) {
            *replaced = Some(text);
        }
    }

    /// Serialize, dropping escape-region marker tags. Replaced text nodes are
    /// re-encoded; everything else is copied verbatim.
    pub fn serialize(&self) -> String {
        let mut out = String::with_capacity(self.source.len() + 16);
        for piece in &self.pieces {
            match piece {
                Piece::Markup { escape_marker: true, .. } => {}
                Piece::Markup { span, .. } => out.push_str(&self.source[span.clone()]),
                Piece::Text { replaced: Some(text), .. } => out.push_str(&html_escape::encode_text(text)),
                Piece::Text { span, .. } => out.push_str(&self.source[span.clone()]),
            }
        }
        out
    }
}

fn push_text(pieces: &mut Vec<Piece>, span: Range<usize>, escaped: bool) {
    if !span.is_empty() {
        pieces.push(Piece::Text { span, escaped, replaced: None });
    }
}

/// Recognise markup starting at `lt` (which holds `<`). Returns the end of the
/// markup token and what it was, or `None` if this `<` is plain text.
fn scan_markup(source: &str, lt: usize) -> Option<(usize, Tag<'_>)> {
    let rest = &source[lt..];
    for (open, close) in [("<!--", "-->"), ("<![CDATA[", "]]>"), ("<?", "?>")] {
        if rest.starts_with(open) {
            let end = rest[open.len()..].find(close)? + open.len() + close.len();
            return Some((lt + end, Tag::Other));
        }
    }
    if rest.starts_with("<!") {
        return Some((lt + rest.find('>')? + 1, Tag::Other));
    }

    let (is_end, name_start) = if rest.starts_with("</") { (true, 2) } else { (false, 1) };
    let name_len = rest[name_start..]
        .char_indices()
        .find(|&(_, c)| !(c.is_alphanumeric() || matches!(c, '-' | '_' | ':' | '.')))
        .map_or(rest.len() - name_start, |(i, _)| i);
    let first = rest[name_start..].chars().next()?;
    if name_len == 0 || !(first.is_alphabetic() || first == '_') {
        return None;
    }
    let name = &rest[name_start..name_start + name_len];

    // Find the closing `>` outside quoted attribute values.
    let mut quote: Option<char> = None;
    for (i, c) in rest[name_start + name_len..].char_indices() {
        let at = name_start + name_len + i;
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '<') => return None,
            (None, '>') => {
                let end = lt + at + 1;
                let tag = if is_end {
                    Tag::End { name }
                } else {
                    Tag::Start { name, self_closing: rest[..at].ends_with('/') }
                };
                return Some((end, tag));
            }
            (None, _) => {}
        }
    }
    None
}
