use crate::block::Span;

/// Split one line into plain text, `**bold**` and `` `code` `` spans.
///
/// Spans do not nest: the leftmost complete span wins, trying bold before
/// code at each position. Markers without a closing partner stay plain text.
/// Empty plain runs between spans are not emitted.
pub fn format(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut plain_start = 0;
    let mut cursor = 0;

    while let Some(offset) = line[cursor..].find(['*', '`']) {
        let at = cursor + offset;
        match match_span(&line[at..]) {
            Some((span, len)) => {
                push_text(&mut spans, &line[plain_start..at]);
                spans.push(span);
                cursor = at + len;
                plain_start = cursor;
            }
            None => cursor = at + 1,
        }
    }

    push_text(&mut spans, &line[plain_start..]);
    spans
}

/// Match a span at the very start of `rest`, returning it with its byte length.
fn match_span(rest: &str) -> Option<(Span, usize)> {
    if let Some(body) = rest.strip_prefix("**") {
        if let Some(end) = body.find("**") {
            return Some((Span::Bold(body[..end].to_string()), end + 4));
        }
    }
    let body = rest.strip_prefix('`')?;
    let end = body.find('`')?;
    Some((Span::Code(body[..end].to_string()), end + 2))
}

fn push_text(spans: &mut Vec<Span>, text: &str) {
    if !text.is_empty() {
        spans.push(Span::Text(text.to_string()));
    }
}
