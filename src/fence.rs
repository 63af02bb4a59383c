use crate::block::Block;

const FENCE: &str = "```";

/// A piece of input text, either outside or inside a fenced code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Prose(&'a str),
    /// Includes the opening and closing fences
    Fenced(&'a str),
}

/// Split text into prose and fenced segments, in input order.
///
/// The first fence after an opening fence closes the block; there is no
/// nesting. An opening fence without a partner stays in the prose.
pub fn split(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(FENCE) {
        let body_start = open + FENCE.len();
        let Some(close) = rest[body_start..].find(FENCE) else {
            break;
        };
        let end = body_start + close + FENCE.len();

        if open > 0 {
            segments.push(Segment::Prose(&rest[..open]));
        }
        segments.push(Segment::Fenced(&rest[open..end]));
        rest = &rest[end..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Prose(rest));
    }

    segments
}

/// Decode a fenced segment into a code block.
///
/// The info line (up to the first newline) is the language tag when it is a
/// single word, otherwise the language is left empty. Without any newline the
/// whole body is code.
pub fn code_block(fenced: &str) -> Block {
    let body = fenced
        .strip_prefix(FENCE)
        .and_then(|s| s.strip_suffix(FENCE))
        .unwrap_or(fenced);

    let split = body
        .split_once('\n')
        .map(|(info, code)| (info.strip_suffix('\r').unwrap_or(info), code));

    let (language, code) = match split {
        Some((info, code)) if is_word(info) => (info, code),
        Some((_, code)) => ("", code),
        None => ("", body),
    };

    Block::CodeBlock {
        language: language.to_string(),
        code: code.trim_end().to_string(),
    }
}

fn is_word(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
