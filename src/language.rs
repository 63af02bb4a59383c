/// A language the user can pick for a snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// Display name
    pub label: &'static str,
    /// Tag sent to the provider and used for code fences
    pub value: &'static str,
}

const fn lang(label: &'static str, value: &'static str) -> Language {
    Language { label, value }
}

pub const LANGUAGES: &[Language] = &[
    lang("JavaScript", "javascript"),
    lang("TypeScript", "typescript"),
    lang("Python", "python"),
    lang("Java", "java"),
    lang("C", "c"),
    lang("C++", "cpp"),
    lang("C#", "csharp"),
    lang("Go", "go"),
    lang("Rust", "rust"),
    lang("Ruby", "ruby"),
    lang("PHP", "php"),
    lang("Swift", "swift"),
    lang("Kotlin", "kotlin"),
    lang("SQL", "sql"),
    lang("Bash", "bash"),
];

/// Look up a language by value or label, ignoring case.
pub fn find(query: &str) -> Option<&'static Language> {
    let query = query.trim();
    LANGUAGES
        .iter()
        .find(|l| l.value.eq_ignore_ascii_case(query) || l.label.eq_ignore_ascii_case(query))
}
