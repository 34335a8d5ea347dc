//! Fields -> filename: the generating view of a compiled spec.
//!
//! One pass per registry field, in registry order: the field's text value is
//! computed once, then dropped into every placeholder slot carrying that
//! field. Each occurrence applies its own case mode and substitution
//! character, so `%_t-%-t` is two independent substitutions of the same
//! value. Substituted values are never re-scanned for placeholders.
//!
//! The result is the filename *stem*; the caller reattaches the extension.

use super::fields::{Field, FieldKind, TagStore};
use super::sanitize::{DangerClass, sanitize};
use super::spec::{CaseMode, CompiledSpec, SpecToken};

/// The text a field contributes to a rendered name.
///
/// - absent fields contribute the empty string
/// - the track number is zero-padded to two digits (so names sort), other
///   integers render as plain decimal
fn field_text(tags: &impl TagStore, field: Field) -> String {
    match field.kind() {
        FieldKind::Text => tags.text(field).unwrap_or_default(),
        FieldKind::Integer => match tags.int(field) {
            None | Some(0) => String::new(),
            Some(v) if field == Field::Track => format!("{v:02}"),
            Some(v) => v.to_string(),
        },
    }
}

/// Render a filename stem from the spec and the file's current tag values.
///
/// `class` is the caller-selected sanitization policy; `None` leaves values
/// untouched (useful for previewing, and what the tests of the raw template
/// behavior use).
pub fn render_name(spec: &CompiledSpec, tags: &impl TagStore, class: Option<DangerClass>) -> String {
    let tokens = spec.tokens();
    let mut slots: Vec<Option<String>> = vec![None; tokens.len()];

    for field in Field::ALL {
        let value = field_text(tags, field);

        for (i, token) in tokens.iter().enumerate() {
            let SpecToken::Placeholder(p) = token else { continue };
            if p.field != field {
                continue;
            }

            let cased = match p.case {
                CaseMode::Preserve => value.clone(),
                CaseMode::Downcase => value.to_lowercase(),
            };
            slots[i] = Some(match class {
                Some(class) => sanitize(&cased, p.substitute, class),
                None => cased,
            });
        }
    }

    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        match token {
            SpecToken::Literal(text) => out.push_str(text),
            SpecToken::Placeholder(_) => {
                if let Some(value) = &slots[i] {
                    out.push_str(value);
                }
            }
        }
    }
    out
}
