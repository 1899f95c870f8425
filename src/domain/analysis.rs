//! Heuristic scan of a collected failure report.
//!
//! Extraction is line-pattern based and intentionally loose: the input is
//! raw CI log text from arbitrary toolchains, so the goal is a useful
//! digest, not a parse.

use std::sync::LazyLock;

use regex::Regex;

static ERROR_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[r"(?i)error: (.+)", r"ERROR (.+)", r"(?i)failed to (.+)"])
});

static WARNING_PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(&[r"(?i)warning: (.+)", r"WARNING (.+)"]));

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|pattern| Regex::new(pattern).expect("static pattern")).collect()
}

/// Errors, warnings, and remediation hints extracted from log text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogAnalysis {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

impl LogAnalysis {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Analyze raw log text.
pub fn analyze(text: &str) -> LogAnalysis {
    let errors = extract(text, &ERROR_PATTERNS);
    let warnings = extract(text, &WARNING_PATTERNS);
    let suggestions = suggest(&errors);
    LogAnalysis { errors, warnings, suggestions }
}

/// First-match-wins, deduplicated in encounter order.
fn extract(text: &str, patterns: &[Regex]) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for pattern in patterns {
        for capture in pattern.captures_iter(text) {
            if let Some(matched) = capture.get(1) {
                let message = matched.as_str().trim().to_string();
                if !message.is_empty() && !found.contains(&message) {
                    found.push(message);
                }
            }
        }
    }
    found
}

fn suggest(errors: &[String]) -> Vec<String> {
    if errors.is_empty() {
        return Vec::new();
    }
    let text = errors.join(" ").to_lowercase();

    let mut suggestions = Vec::new();
    if text.contains("not found") {
        suggestions.push("Check that referenced files and paths exist".to_string());
    }
    if text.contains("permission") {
        suggestions
            .push("Check file permissions, including the executable bit on scripts".to_string());
    }
    if text.contains("syntax") {
        suggestions.push("Check the workflow YAML and script syntax".to_string());
    }
    if text.contains("dependency") {
        suggestions
            .push("Check that dependencies are installed before the failing step".to_string());
    }
    if text.contains("timeout") || text.contains("timed out") {
        suggestions.push("Raise the step timeout or split slow steps".to_string());
    }
    suggestions
}
