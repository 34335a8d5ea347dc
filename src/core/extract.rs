//! Filename -> fields: the matching view of a compiled spec.
//!
//! The token list turns into one anchored regex over the filename stem:
//! - literals are escaped and inserted verbatim
//! - Text placeholders capture greedily (`.+`)
//! - Integer placeholders capture digits (`[0-9]+`)
//!
//! Substitution characters and case modes only matter when rendering; here
//! every placeholder is just a capture group. Groups are handed back to the
//! tag store in token order.

use regex::Regex;

use super::fields::{FieldKind, TagStore};
use super::spec::{CompiledSpec, SpecToken};

/// Build the anchored matcher for a compiled spec.
///
/// Built once per invocation, alongside compilation. The pattern is
/// assembled from escaped literals and fixed group syntax, so construction
/// cannot fail.
pub fn matcher(spec: &CompiledSpec) -> Regex {
    let mut pattern = String::from("^");
    for token in spec.tokens() {
        match token {
            SpecToken::Literal(text) => pattern.push_str(&regex::escape(text)),
            SpecToken::Placeholder(p) => pattern.push_str(match p.field.kind() {
                FieldKind::Text => "(.+)",
                FieldKind::Integer => "([0-9]+)",
            }),
        }
    }
    pattern.push('$');
    Regex::new(&pattern).unwrap()
}

/// Match `stem` against the spec and write captured values into `tags`.
///
/// Returns `false` when the stem does not match (or an integer capture does
/// not fit); the caller reports that per-file and keeps going. On `true`,
/// every placeholder field has been written through the store's setter.
pub fn extract_into(spec: &CompiledSpec, matcher: &Regex, stem: &str, tags: &mut impl TagStore) -> bool {
    let Some(caps) = matcher.captures(stem) else {
        return false;
    };

    let mut group = 1;
    for token in spec.tokens() {
        let SpecToken::Placeholder(p) = token else { continue };
        let text = caps.get(group).map(|m| m.as_str()).unwrap_or("");
        group += 1;

        match p.field.kind() {
            FieldKind::Text => tags.set_text(p.field, text),
            FieldKind::Integer => match text.parse::<u32>() {
                Ok(v) => tags.set_int(p.field, v),
                // Digit run too large to represent; treat as a mismatch.
                Err(_) => return false,
            },
        }
    }

    true
}
