use crate::block::{Block, Document, List, Span};
use crate::fence::{self, Segment};
use crate::inline;

/// Render markdown-subset text into a document.
///
/// Fenced code is taken verbatim; everything else goes through line
/// classification and inline formatting. Never fails: anything that is not
/// recognised markup becomes a paragraph.
pub fn parse(content: &str) -> Document {
    let mut blocks = Vec::new();
    for segment in fence::split(content) {
        match segment {
            Segment::Fenced(raw) => blocks.push(fence::code_block(raw)),
            Segment::Prose(text) => blocks.extend(classify(text)),
        }
    }
    blocks
}

/// Classify the lines of a prose segment into blocks.
pub fn classify(prose: &str) -> Vec<Block> {
    prose
        .trim()
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .fold(LineState::default(), LineState::push_line)
        .finish()
}

/// What a single prose line is, before inline formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    Heading(u8, &'a str),
    OrderedItem(&'a str),
    UnorderedItem(&'a str),
    Blank,
    Text(&'a str),
}

impl<'a> LineKind<'a> {
    fn of(line: &'a str) -> Self {
        if let Some(rest) = line.strip_prefix("# ") {
            LineKind::Heading(1, rest)
        } else if let Some(rest) = line.strip_prefix("## ") {
            LineKind::Heading(2, rest)
        } else if let Some(rest) = line.strip_prefix("### ") {
            LineKind::Heading(3, rest)
        } else if let Some(rest) = ordered_item(line) {
            LineKind::OrderedItem(rest)
        } else if let Some(rest) = line.strip_prefix("* ") {
            LineKind::UnorderedItem(rest)
        } else if line.trim().is_empty() {
            LineKind::Blank
        } else {
            LineKind::Text(line)
        }
    }
}

/// Strip a `1. ` style marker: ASCII digits, a period, one whitespace char.
fn ordered_item(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == line.len() {
        return None;
    }
    let mut chars = rest.strip_prefix('.')?.chars();
    chars.next().filter(|c| c.is_whitespace())?;
    Some(chars.as_str())
}

/// Fold accumulator: finished blocks plus the list still collecting items.
#[derive(Default)]
struct LineState {
    blocks: Vec<Block>,
    open_list: Option<List>,
}

impl LineState {
    fn push_line(mut self, line: &str) -> Self {
        match LineKind::of(line) {
            LineKind::Heading(level, rest) => self.push_block(Block::Heading {
                level,
                content: inline::format(rest),
            }),
            LineKind::OrderedItem(rest) => self.push_item(true, inline::format(rest)),
            LineKind::UnorderedItem(rest) => self.push_item(false, inline::format(rest)),
            LineKind::Blank => self.push_block(Block::Spacer),
            LineKind::Text(text) => self.push_block(Block::Paragraph {
                content: inline::format(text),
            }),
        }
        self
    }

    fn push_item(&mut self, ordered: bool, item: Vec<Span>) {
        if self.open_list.as_ref().is_some_and(|list| list.ordered != ordered) {
            self.close_list();
        }
        self.open_list
            .get_or_insert_with(|| List {
                ordered,
                items: Vec::new(),
            })
            .items
            .push(item);
    }

    fn push_block(&mut self, block: Block) {
        self.close_list();
        self.blocks.push(block);
    }

    fn close_list(&mut self) {
        if let Some(list) = self.open_list.take() {
            self.blocks.push(Block::List(list));
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.close_list();
        self.blocks
    }
}
