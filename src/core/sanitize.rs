//! Filename sanitization.
//!
//! Tag values go through here before they are allowed into a generated
//! filename. Two policies exist:
//! - [`DangerClass::Shell`]: strict; anything a shell might interpret
//! - [`DangerClass::Filesystem`]: only what filesystems actually reject
//!
//! The caller picks the policy (`--rename` vs `--rename-fs`); this module
//! only applies it.
//!
//! Guarantees (the tests lean on these):
//! - idempotent: sanitizing twice equals sanitizing once
//! - never emits two substitutes in a row, nor a leading/trailing one

/// Which characters count as dangerous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DangerClass {
    /// Whitespace and shell metacharacters.
    Shell,
    /// Whitespace and characters rejected by common filesystems.
    Filesystem,
}

impl DangerClass {
    fn is_dangerous(self, c: char) -> bool {
        if c.is_whitespace() {
            return true;
        }
        match self {
            DangerClass::Shell => matches!(
                c,
                '`' | '~'
                    | '!'
                    | '#'
                    | '$'
                    | '%'
                    | '^'
                    | '&'
                    | '*'
                    | '('
                    | ')'
                    | '='
                    | '['
                    | '{'
                    | '}'
                    | '\\'
                    | '|'
                    | ';'
                    | ':'
                    | '"'
                    | ','
                    | '<'
                    | '>'
                    | '/'
                    | '?'
            ),
            DangerClass::Filesystem => {
                matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*')
            }
        }
    }
}

/// Map `value` to a name-safe string.
///
/// - Apostrophes are deleted outright, whatever the class. Replacing a quote
///   with a substitute looks worse than dropping it ("Don't" -> "Dont").
/// - Every run of dangerous characters becomes one `substitute`, or nothing
///   when `substitute` is `None`.
/// - Runs of the substitute collapse to one, and a leading/trailing
///   substitute is trimmed.
/// - An empty result maps to `"_"`. Guard against degenerate
///   all-special-character input; a rename target must not be empty.
pub fn sanitize(value: &str, substitute: Option<char>, class: DangerClass) -> String {
    let mut out = String::with_capacity(value.len());
    let mut last_was_sub = false;

    for c in value.chars() {
        if c == '\'' {
            continue;
        }

        let mapped = if class.is_dangerous(c) { substitute } else { Some(c) };
        match mapped {
            None => {}
            Some(m) if Some(m) == substitute => {
                // Collapse runs, and never start the string with one.
                if !last_was_sub && !out.is_empty() {
                    out.push(m);
                    last_was_sub = true;
                }
            }
            Some(m) => {
                out.push(m);
                last_was_sub = false;
            }
        }
    }

    if let Some(sub) = substitute {
        while out.ends_with(sub) {
            out.pop();
        }
    }

    if out.is_empty() { "_".to_string() } else { out }
}
