use serde::{Deserialize, Serialize};
use serde_json::error::Category;

use crate::error::AnalysisError;

/// What the analysis provider returns for one snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Markdown-subset explanation of the code
    pub explanation: String,
    /// Emulated stdout, or a description of the error the code would raise
    pub predicted_output: String,
    /// Markdown-subset bug report
    pub bugs_and_errors: String,
    /// Raw code, no fences. Equal to the original when nothing needed fixing.
    pub corrected_code: String,
}

impl AnalysisResult {
    /// Validate a provider response.
    ///
    /// All four fields must be present and be strings; extra fields are ignored.
    pub fn from_json(text: &str) -> Result<Self, AnalysisError> {
        serde_json::from_str(text.trim()).map_err(|e| match e.classify() {
            Category::Data => AnalysisError::UnexpectedShape(e),
            Category::Io | Category::Syntax | Category::Eof => AnalysisError::InvalidFormat(e),
        })
    }

    pub fn has_corrections(&self, original: &str) -> bool {
        self.corrected_code.trim() != original.trim()
    }

    pub fn tab_content(&self, tab: Tab) -> &str {
        match tab {
            Tab::Explanation => &self.explanation,
            Tab::Output => &self.predicted_output,
            Tab::Bugs => &self.bugs_and_errors,
        }
    }
}

/// The result views, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Explanation,
    Output,
    Bugs,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Explanation, Tab::Output, Tab::Bugs];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Explanation => "Explanation",
            Tab::Output => "Predicted Output",
            Tab::Bugs => "Bugs & Fixes",
        }
    }
}

/// Build the instruction prompt asking the provider for an [`AnalysisResult`].
pub fn analysis_prompt(code: &str, language: &str) -> String {
    format!(
        r#"You are an expert code analyst and execution engine. Analyze the following {language} code snippet.

**Code Snippet:**
```{language}
{code}
```

**Tasks:**
1. **Explain the code** in Markdown with a high-level summary, a step-by-step breakdown, and potential improvements (state if there are none).
2. **Predict the output:** emulate execution and give the standard output. If there is no output, say so. If the code would fail, describe the error as the output. If the code is incomplete (for example a function that is never called), say that no output is produced.
3. **Identify bugs and errors:** check for syntax errors, runtime errors and logical bugs, and describe them in Markdown with line numbers where possible. If there are none, state "No bugs or errors were found.".
4. **Provide corrected code:** the complete corrected snippet as raw code, not wrapped in a Markdown block. If no corrections are needed, return the original snippet.

Respond with a single JSON object with the string fields "explanation", "predictedOutput", "bugsAndErrors" and "correctedCode", and nothing outside it.
"#
    )
}
