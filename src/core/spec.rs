//! The filename-pattern compiler.
//!
//! A spec is a template string mixing literal text and `%`-placeholders:
//!
//! - `%r`   artist, downcased when rendering
//! - `%R`   artist, case preserved
//! - `%_t`  title, dangerous characters become `_`
//! - `%-n`  track, dangerous characters become `-`
//!
//! Compilation happens once per invocation and produces a [`CompiledSpec`]:
//! an ordered token list consumed by two independent views of the same
//! structure — `core::extract` (filename -> fields) and `core::render`
//! (fields -> filename).
//!
//! Tokenizer rules, left to right, non-overlapping:
//! - `%` + letter: a placeholder; the letter must be a registry code in
//!   either case, otherwise compilation fails.
//! - `%` + one non-alphanumeric char + letter: same, with the middle char as
//!   that placeholder's substitution character (underscore counts).
//! - any other `%` (digit after it, nothing after it, mode char with no
//!   letter) stays literal text.

use super::error::SpecError;
use super::fields::Field;

/// Rendering case mode, taken from the placeholder letter's own case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseMode {
    /// Uppercase letter in the spec: use the tag value as-is.
    Preserve,
    /// Lowercase letter in the spec: lowercase the tag value first.
    Downcase,
}

/// One `%`-sequence in a spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    pub field: Field,
    /// `None`: dangerous characters are removed instead of substituted.
    pub substitute: Option<char>,
    pub case: CaseMode,
}

/// One unit of a compiled spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecToken {
    /// Raw spec text, copied verbatim in both directions.
    Literal(String),
    Placeholder(Placeholder),
}

/// An immutable, compiled pattern. Token order is source order; it drives
/// both capture-group order when matching and output order when rendering.
#[derive(Debug, Clone)]
pub struct CompiledSpec {
    source: String,
    tokens: Vec<SpecToken>,
}

impl CompiledSpec {
    /// The spec string this was compiled from (for error reporting).
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[SpecToken] {
        &self.tokens
    }
}

/// Compile a spec string.
///
/// Fails only when a placeholder letter does not resolve to a field code;
/// malformed `%` sequences degrade to literal text instead.
pub fn compile(spec: &str) -> Result<CompiledSpec, SpecError> {
    let chars: Vec<char> = spec.chars().collect();
    let mut tokens: Vec<SpecToken> = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '%' {
            literal.push(chars[i]);
            i += 1;
            continue;
        }

        // Greedy on the optional mode character: a non-alphanumeric char
        // immediately followed by a letter binds as the substitute.
        let (substitute, letter_at) = match chars.get(i + 1) {
            Some(&c) if c.is_alphabetic() => (None, i + 1),
            Some(&c) if !c.is_alphanumeric() && matches!(chars.get(i + 2), Some(l) if l.is_alphabetic()) => {
                (Some(c), i + 2)
            }
            _ => {
                // Not a placeholder; the percent sign is literal text.
                literal.push('%');
                i += 1;
                continue;
            }
        };

        let letter = chars[letter_at];
        let field = Field::from_code(letter).ok_or(SpecError::UnknownField(letter))?;
        let case = if letter.is_lowercase() {
            CaseMode::Downcase
        } else {
            CaseMode::Preserve
        };

        if !literal.is_empty() {
            tokens.push(SpecToken::Literal(std::mem::take(&mut literal)));
        }
        tokens.push(SpecToken::Placeholder(Placeholder { field, substitute, case }));
        i = letter_at + 1;
    }

    if !literal.is_empty() {
        tokens.push(SpecToken::Literal(literal));
    }

    Ok(CompiledSpec { source: spec.to_string(), tokens })
}
