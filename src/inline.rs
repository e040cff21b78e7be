/// A run of text sharing one formatting state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledFragment {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
}

#[derive(Default)]
struct ScanState {
    bold: bool,
    italic: bool,
    code: bool,
    current: String,
    fragments: Vec<StyledFragment>,
}

impl ScanState {
    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        self.fragments.push(StyledFragment {
            text: std::mem::take(&mut self.current),
            bold: self.bold,
            italic: self.italic,
            code: self.code,
        });
    }
}

/// Split one line of raw Markdown into styled fragments.
///
/// `**` toggles bold, a lone `*` toggles italic and a backtick toggles code.
/// Markers flip the state rather than open and close a scope, so an
/// unterminated marker stays in effect until the end of `text`.
pub fn scan(text: &str) -> Vec<StyledFragment> {
    let mut state = ScanState::default();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                state.flush();
                state.bold = !state.bold;
            }
            '*' => {
                state.flush();
                state.italic = !state.italic;
            }
            '`' => {
                state.flush();
                state.code = !state.code;
            }
            _ => state.current.push(ch),
        }
    }

    state.flush();
    state.fragments
}

/// Remove heading markers and inline emphasis symbols, keeping the text.
pub fn strip_markers(text: &str) -> String {
    use regex::Regex;
    use std::sync::OnceLock;

    static PATTERNS: OnceLock<[(Regex, &'static str); 4]> = OnceLock::new();
    let patterns = PATTERNS.get_or_init(|| {
        [
            (Regex::new(r"^\s*#{1,6}\s+").expect("Invalid heading regex"), ""),
            (Regex::new(r"\*\*(.*?)\*\*").expect("Invalid bold regex"), "$1"),
            (Regex::new(r"\*(.*?)\*").expect("Invalid italic regex"), "$1"),
            (Regex::new(r"`(.*?)`").expect("Invalid code regex"), "$1"),
        ]
    });

    let mut out = text.to_string();
    for (pattern, replacement) in patterns {
        out = pattern.replace_all(&out, *replacement).into_owned();
    }
    out.trim().to_string()
}
