use crate::block::{Block, List, Span};
use crate::config::Config;

/// Convert blocks to a standalone Typst document
pub fn blocks_to_typst(blocks: &[Block], config: &Config) -> String {
    let mut out = String::new();
    preamble(config, &mut out);
    blocks_body(blocks, config, &mut out);
    out
}

/// Page and paragraph settings that open every document
pub fn preamble(config: &Config, out: &mut String) {
    let numbering = if config.page.numbers { "\"1\"" } else { "none" };
    out.push_str(&format!(
        "#set page(paper: {}, numbering: {})\n",
        typst_string(&config.page.paper),
        numbering
    ));
    // Prevent widows/orphans
    out.push_str("#set par(linebreaks: \"optimized\")\n\n");
}

/// Centered document title with an optional subtitle line
pub fn title(title: &str, subtitle: Option<&str>, out: &mut String) {
    out.push_str("#align(center)[#text(size: 18pt, weight: \"bold\")[");
    escape_text(title, out);
    out.push_str("]]\n\n");
    if let Some(subtitle) = subtitle {
        out.push_str("#align(center)[");
        escape_text(subtitle, out);
        out.push_str("]\n\n");
    }
}

/// Emit the markup for a sequence of blocks, without preamble
pub fn blocks_body(blocks: &[Block], config: &Config, out: &mut String) {
    let mut i = 0;
    while i < blocks.len() {
        let block = &blocks[i];

        match block {
            Block::Heading { .. } if config.layout.keep_headings_with_next => {
                // Keep a run of headings with the content that follows them
                out.push_str("#block(breakable: false)[\n");
                emit_block(block, config, out);

                while i + 1 < blocks.len() {
                    i += 1;
                    emit_block(&blocks[i], config, out);
                    if !matches!(blocks[i], Block::Heading { .. }) {
                        break;
                    }
                }
                out.push_str("]\n\n");
            }
            _ => emit_block(block, config, out),
        }

        i += 1;
    }
}

fn emit_block(block: &Block, config: &Config, out: &mut String) {
    match block {
        Block::Heading { level, content } => {
            for _ in 0..*level {
                out.push('=');
            }
            out.push(' ');
            line_to_typst(content, out);
            out.push_str("\n\n");
        }
        Block::Paragraph { content } => {
            line_to_typst(content, out);
            out.push_str("\n\n");
        }
        Block::CodeBlock { language, code } => {
            // Keep code blocks together when possible
            out.push_str("#block(breakable: false)[\n");
            raw_block(code, language, out);
            out.push_str("]\n\n");
        }
        Block::List(list) => {
            // Wrap list to keep together when small, allow breaks when large
            if list.items.len() <= config.layout.small_list_items {
                out.push_str("#block(breakable: false)[\n");
                list_to_typst(list, out);
                out.push_str("]\n\n");
            } else {
                list_to_typst(list, out);
                out.push('\n');
            }
        }
        Block::Spacer => {
            out.push_str(&format!("#v({})\n\n", config.layout.spacer));
        }
    }
}

/// Verbatim code as a `raw` element; the code travels as a string literal so
/// it needs no markup escaping.
fn raw_block(code: &str, language: &str, out: &mut String) {
    out.push_str("#raw(block: true, ");
    if !language.is_empty() {
        out.push_str("lang: ");
        out.push_str(&typst_string(language));
        out.push_str(", ");
    }
    out.push_str(&typst_string(code));
    out.push_str(")\n");
}

fn list_to_typst(list: &List, out: &mut String) {
    let prefix = if list.ordered { "+" } else { "-" };

    for item in &list.items {
        out.push_str(prefix);
        out.push(' ');
        line_to_typst(item, out);
        out.push('\n');
    }
}

/// One line of spans. Text that Typst reads as line markup after any
/// indentation (heading, list or enum marker) is escaped.
fn line_to_typst(spans: &[Span], out: &mut String) {
    let Some((Span::Text(first), rest)) = spans.split_first() else {
        spans_to_typst(spans, out);
        return;
    };

    let body = first.trim_start();
    out.push_str(&first[..first.len() - body.len()]);

    let digits = body.len() - body.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if body.starts_with(['=', '-', '+']) {
        out.push('\\');
        escape_text(body, out);
    } else if digits > 0 && body[digits..].starts_with('.') {
        out.push_str(&body[..digits]);
        out.push_str("\\.");
        escape_text(&body[digits + 1..], out);
    } else {
        escape_text(body, out);
    }

    spans_to_typst(rest, out);
}

fn spans_to_typst(spans: &[Span], out: &mut String) {
    for span in spans {
        span_to_typst(span, out);
    }
}

fn span_to_typst(span: &Span, out: &mut String) {
    match span {
        Span::Text(text) => escape_text(text, out),
        Span::Bold(text) => {
            // `*...*` only works at word boundaries, the function form works anywhere
            if !text.is_empty() {
                out.push_str("#strong[");
                escape_text(text, out);
                out.push_str("];");
            }
        }
        Span::Code(text) => {
            if !text.is_empty() {
                out.push('`');
                out.push_str(text);
                out.push('`');
            }
        }
    }
}

/// Escape special Typst characters in plain text
fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' | '/' | '~' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
}

/// A Typst string literal, quoted
fn typst_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::markdown_to_typst;
    use pretty_assertions::assert_eq;

    const PREAMBLE: &str =
        "#set page(paper: \"a4\", numbering: \"1\")\n#set par(linebreaks: \"optimized\")\n\n";

    #[test]
    fn heading() {
        assert_eq!(
            markdown_to_typst("# Hello"),
            format!("{PREAMBLE}#block(breakable: false)[\n= Hello\n\n]\n\n")
        );
    }

    #[test]
    fn heading_with_following_content() {
        // Heading should be grouped with the next block
        let result = markdown_to_typst("## Title\nSome text.");
        assert!(result.contains("#block(breakable: false)[\n== Title\n\nSome text.\n\n]\n\n"));
    }

    #[test]
    fn heading_grouping_can_be_disabled() {
        let mut config = Config::default();
        config.layout.keep_headings_with_next = false;
        assert_eq!(
            crate::markdown_to_typst_with_config("### Small\ntext", &config),
            format!("{PREAMBLE}=== Small\n\ntext\n\n")
        );
    }

    #[test]
    fn paragraph_per_line_and_spacer() {
        assert_eq!(
            markdown_to_typst("one\ntwo\n\nthree"),
            format!("{PREAMBLE}one\n\ntwo\n\n#v(0.6em)\n\nthree\n\n")
        );
    }

    #[test]
    fn bold_and_code() {
        assert_eq!(
            markdown_to_typst("**bold** and `x[0]`"),
            format!("{PREAMBLE}#strong[bold]; and `x[0]`\n\n")
        );
    }

    #[test]
    fn bold_inside_a_word() {
        assert_eq!(
            markdown_to_typst("The **i**th and a**b**c"),
            format!("{PREAMBLE}The #strong[i];th and a#strong[b];c\n\n")
        );
        assert_eq!(
            markdown_to_typst("**x**.y"),
            format!("{PREAMBLE}#strong[x];.y\n\n")
        );
    }

    #[test]
    fn escapes_indented_line_markup() {
        assert_eq!(
            markdown_to_typst("Steps:\n  - nested note"),
            format!("{PREAMBLE}Steps:\n\n  \\- nested note\n\n")
        );
        assert_eq!(
            markdown_to_typst("intro\n  + plus\n\t3. three\n  = eq"),
            format!("{PREAMBLE}intro\n\n  \\+ plus\n\n\t3\\. three\n\n  \\= eq\n\n")
        );
        assert_eq!(
            markdown_to_typst("2024.5 percent"),
            format!("{PREAMBLE}2024\\.5 percent\n\n")
        );
    }

    #[test]
    fn heading_run_stays_with_content() {
        assert_eq!(
            markdown_to_typst("# A\n## B\nbody\ntail"),
            format!("{PREAMBLE}#block(breakable: false)[\n= A\n\n== B\n\nbody\n\n]\n\ntail\n\n")
        );
    }

    #[test]
    fn empty_spans_emit_nothing() {
        assert_eq!(markdown_to_typst("a****b``c"), format!("{PREAMBLE}abc\n\n"));
    }

    #[test]
    fn code_block() {
        assert_eq!(
            markdown_to_typst("```rust\nlet s = \"hi\";\n```"),
            format!(
                "{PREAMBLE}#block(breakable: false)[\n#raw(block: true, lang: \"rust\", \"let s = \\\"hi\\\";\")\n]\n\n"
            )
        );
    }

    #[test]
    fn untagged_code_block_has_no_lang() {
        assert_eq!(
            markdown_to_typst("```\na\\b\n\tc\n```"),
            format!("{PREAMBLE}#block(breakable: false)[\n#raw(block: true, \"a\\\\b\\n\\tc\")\n]\n\n")
        );
    }

    #[test]
    fn unordered_list() {
        assert_eq!(
            markdown_to_typst("* one\n* two"),
            format!("{PREAMBLE}#block(breakable: false)[\n- one\n- two\n]\n\n")
        );
    }

    #[test]
    fn ordered_list() {
        assert_eq!(
            markdown_to_typst("1. one\n2. two"),
            format!("{PREAMBLE}#block(breakable: false)[\n+ one\n+ two\n]\n\n")
        );
    }

    #[test]
    fn large_list_may_break() {
        let mut config = Config::default();
        config.layout.small_list_items = 1;
        assert_eq!(
            crate::markdown_to_typst_with_config("* a\n* b", &config),
            format!("{PREAMBLE}- a\n- b\n\n")
        );
    }

    #[test]
    fn escapes_special_chars() {
        assert_eq!(markdown_to_typst("a # b"), format!("{PREAMBLE}a \\# b\n\n"));
        assert_eq!(markdown_to_typst("a_b"), format!("{PREAMBLE}a\\_b\n\n"));
        assert_eq!(markdown_to_typst("x // y"), format!("{PREAMBLE}x \\/\\/ y\n\n"));
    }

    #[test]
    fn escapes_line_start_markup() {
        assert_eq!(markdown_to_typst("- dash"), format!("{PREAMBLE}\\- dash\n\n"));
        assert_eq!(markdown_to_typst("= eq"), format!("{PREAMBLE}\\= eq\n\n"));
        assert_eq!(markdown_to_typst("+1 vote"), format!("{PREAMBLE}\\+1 vote\n\n"));
    }

    #[test]
    fn page_settings_from_config() {
        let mut config = Config::default();
        config.page.paper = "us-letter".to_string();
        config.page.numbers = false;
        assert!(
            crate::markdown_to_typst_with_config("x", &config)
                .starts_with("#set page(paper: \"us-letter\", numbering: none)\n")
        );
    }
}
