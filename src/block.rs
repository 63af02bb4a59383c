use serde::Serialize;

/// Inline text spans within a single line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Span {
    Text(String),
    Bold(String),
    Code(String),
}

/// A list (ordered or unordered). Each item is one line of inline content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<Vec<Span>>,
}

/// Block-level elements produced by the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading {
        level: u8,
        content: Vec<Span>,
    },
    Paragraph {
        content: Vec<Span>,
    },
    CodeBlock {
        /// Empty when the fence carried no (or a malformed) tag
        language: String,
        code: String,
    },
    List(List),
    /// A blank line between paragraphs
    Spacer,
}

/// The rendered form of one input string, in input order.
pub type Document = Vec<Block>;
