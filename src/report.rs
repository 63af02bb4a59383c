use crate::analysis::{AnalysisResult, Tab};
use crate::block::{Block, Document, Span};
use crate::config::Config;
use crate::{render, typst};

const NO_OUTPUT: &str = "No output produced or code is incomplete.";

/// A snippet together with the analysis it received.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    /// Language tag of the snippet, e.g. `python`
    pub language: &'a str,
    pub code: &'a str,
    pub analysis: &'a AnalysisResult,
}

impl Report<'_> {
    /// The report body: one section per tab, in tab order.
    pub fn to_document(&self) -> Document {
        let mut blocks = Vec::new();
        for tab in Tab::ALL {
            blocks.push(heading(1, tab.title()));
            match tab {
                Tab::Explanation | Tab::Bugs => {
                    blocks.extend(shift_headings(render(self.analysis.tab_content(tab)), 1));
                }
                Tab::Output => blocks.push(self.output_block()),
            }
        }

        if self.analysis.has_corrections(self.code) {
            blocks.push(heading(2, "Original Code"));
            blocks.push(self.code_block(self.code));
            blocks.push(heading(2, "Corrected Code"));
            blocks.push(self.code_block(&self.analysis.corrected_code));
        }

        blocks
    }

    fn output_block(&self) -> Block {
        let output = &self.analysis.predicted_output;
        if output.trim().is_empty() {
            Block::Paragraph {
                content: vec![Span::Text(NO_OUTPUT.to_string())],
            }
        } else {
            Block::CodeBlock {
                language: String::new(),
                code: output.trim_end().to_string(),
            }
        }
    }

    fn code_block(&self, code: &str) -> Block {
        Block::CodeBlock {
            language: self.language.to_string(),
            code: code.trim_end().to_string(),
        }
    }
}

/// Project a report into a standalone Typst document.
pub fn to_typst(report: &Report, config: &Config) -> String {
    let mut out = String::new();
    typst::preamble(config, &mut out);
    let language = crate::language::find(report.language)
        .map(|l| l.label)
        .unwrap_or(report.language);
    let subtitle = format!("Language: {language}");
    typst::title(&config.report.title, Some(subtitle.as_str()), &mut out);
    typst::blocks_body(&report.to_document(), config, &mut out);
    out
}

fn heading(level: u8, text: &str) -> Block {
    Block::Heading {
        level,
        content: vec![Span::Text(text.to_string())],
    }
}

/// Move rendered headings under the report's own section headings.
fn shift_headings(blocks: Document, by: u8) -> impl Iterator<Item = Block> {
    blocks.into_iter().map(move |block| match block {
        Block::Heading { level, content } => Block::Heading {
            level: level + by,
            content,
        },
        other => other,
    })
}
