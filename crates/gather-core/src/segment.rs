//! Free-text segmentation into paragraphs or a bulleted list.
//!
//! A cell that contains a `-` anywhere switches to list mode. In list mode
//! each line is classified in one left-to-right pass: lines before the first
//! `-`-prefixed line are *top*, `-`-prefixed lines are list *items*, and any
//! other line seen after the first item is *bottom*. Output is always top,
//! then the list, then bottom, whatever the original interleaving.
//!
//! The trigger also fires on hyphenated prose. With no `-`-prefixed line the
//! result is the same paragraphs the flat path produces, so such text comes
//! out unchanged.

use gather_model::{Element, Row};

use crate::extract::{content, paragraphs, split_lines};
use crate::session::SheetSession;

const LIST_MARKER: char = '-';

/// Lines of a cell, bucketed for output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segments<'a> {
    /// No list marker anywhere: one paragraph per line.
    Flat(Vec<&'a str>),
    /// List mode.
    Listed {
        top: Vec<&'a str>,
        items: Vec<&'a str>,
        bottom: Vec<&'a str>,
    },
}

/// Classify the lines of `text`.
pub fn segment_text(text: &str) -> Segments<'_> {
    if !text.contains(LIST_MARKER) {
        return Segments::Flat(split_lines(text));
    }
    let mut top = Vec::new();
    let mut items = Vec::new();
    let mut bottom = Vec::new();
    for line in split_lines(text) {
        if line.starts_with(LIST_MARKER) {
            items.push(list_item_text(line));
        } else if items.is_empty() {
            top.push(line);
        } else {
            bottom.push(line);
        }
    }
    Segments::Listed { top, items, bottom }
}

/// Leading markers go, trailing ones stay: `"- 1920-"` is `"1920-"`.
fn list_item_text(line: &str) -> &str {
    line.trim_start_matches(LIST_MARKER).trim()
}

/// Segment the cell at `column` into document nodes.
///
/// Tokens are minted in output order: top paragraphs, list items, bottom
/// paragraphs. An empty cell takes the flat path and yields one empty
/// paragraph.
pub fn segment_cell(session: &mut SheetSession, row: &Row, column: usize) -> Vec<Element> {
    let text = content(row, column);
    let (top, items, bottom) = match segment_text(&text) {
        Segments::Flat(_) => return paragraphs(session, row, column),
        Segments::Listed { top, items, bottom } => (top, items, bottom),
    };

    let mut nodes = Vec::with_capacity(top.len() + bottom.len() + 1);
    for line in top {
        nodes.push(tokened(session, row, column, "p", line));
    }
    if !items.is_empty() {
        let list = Element::new("list").with_children(
            items
                .into_iter()
                .map(|item| tokened(session, row, column, "item", item))
                .collect::<Vec<_>>(),
        );
        nodes.push(list);
    }
    for line in bottom {
        nodes.push(tokened(session, row, column, "p", line));
    }
    nodes
}

fn tokened(
    session: &mut SheetSession,
    row: &Row,
    column: usize,
    tag: &str,
    text: &str,
) -> Element {
    Element::new(tag)
        .with_text(text)
        .with_attrs(session.token_attr(row, column))
}
