//! Quick HTML approximation of Markdown for on-screen previews.
//!
//! This is a handful of regex substitutions and is independent of the block
//! renderer. It can disagree with the generated document on edge cases.

use regex::Regex;
use std::sync::OnceLock;

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

fn rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            // Headers
            (r"(?m)^### (.*)$", "<h3>$1</h3>"),
            (r"(?m)^## (.*)$", "<h2>$1</h2>"),
            (r"(?m)^# (.*)$", "<h1>$1</h1>"),
            // Emphasis
            (r"\*\*(.*?)\*\*", "<strong>$1</strong>"),
            (r"\*(.*?)\*", "<em>$1</em>"),
            // Code
            (r"(?s)```(.*?)```", "<pre><code>$1</code></pre>"),
            (r"`(.*?)`", "<code>$1</code>"),
            // Lists
            (r"(?m)^\s*- (.*)$", "<li>$1</li>"),
            // Tables
            (r"(?m)^\|(.*)\|$", r#"<div class="table-row">$1</div>"#),
            // Paragraphs and line breaks
            (r"\n\n", "</p><p>"),
            (r"\n", "<br>"),
        ]
        .into_iter()
        .map(|(pattern, replacement)| Rule {
            pattern: Regex::new(pattern).expect("Invalid preview regex"),
            replacement,
        })
        .collect()
    })
}

/// Render a best-effort HTML preview of `markdown`.
pub fn to_html(markdown: &str) -> String {
    let mut html = markdown.to_string();
    for rule in rules() {
        html = rule
            .pattern
            .replace_all(&html, rule.replacement)
            .into_owned();
    }
    format!("<p>{html}</p>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings() {
        assert_eq!(to_html("# One"), "<p><h1>One</h1></p>");
        assert_eq!(
            to_html("## Two\n### Three"),
            "<p><h2>Two</h2><br><h3>Three</h3></p>"
        );
    }

    #[test]
    fn emphasis_and_code() {
        assert_eq!(
            to_html("**b** *i* `c`"),
            "<p><strong>b</strong> <em>i</em> <code>c</code></p>"
        );
    }

    #[test]
    fn fenced_code() {
        assert_eq!(
            to_html("```\nx\n```"),
            "<p><pre><code><br>x<br></code></pre></p>"
        );
    }

    #[test]
    fn list_items() {
        assert_eq!(to_html("- a\n- b"), "<p><li>a</li><br><li>b</li></p>");
    }

    #[test]
    fn table_rows() {
        assert_eq!(
            to_html("| A | B |"),
            r#"<p><div class="table-row"> A | B </div></p>"#
        );
    }

    #[test]
    fn paragraphs() {
        assert_eq!(to_html("a\n\nb\nc"), "<p>a</p><p>b<br>c</p>");
    }
}
