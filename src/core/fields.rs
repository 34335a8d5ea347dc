//! The fixed tag-field registry and the accessor trait.
//!
//! Everything else in the core speaks in terms of [`Field`]:
//! - the spec compiler resolves placeholder letters against it
//! - the extractor writes captured values through it
//! - the renderer reads values through it
//!
//! Rule of thumb:
//! - No filesystem code here
//! - No id3 code here (that lives in `core::tags`)
//!
//! Why a fixed enum instead of a name -> getter map?
//! - The field set is closed (seven entries) and the compiler can reject
//!   unknown letters at spec-compile time instead of at lookup time.

/// One tag field the tool knows how to read, write, and template.
///
/// Declared in registry order. That order is load-bearing:
/// - the renderer substitutes fields one pass per field, in this order
/// - the field listing prints in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Album,
    Artist,
    Comment,
    Genre,
    Title,
    Track,
    Year,
}

/// What kind of value a field holds.
///
/// - `Text` fields are free-form strings (absent = no value)
/// - `Integer` fields are non-negative numbers (absent = no value; zero is
///   treated as absent when printing/rendering)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
}

impl Field {
    /// All fields, in registry order.
    pub const ALL: [Field; 7] = [
        Field::Album,
        Field::Artist,
        Field::Comment,
        Field::Genre,
        Field::Title,
        Field::Track,
        Field::Year,
    ];

    /// Single-letter placeholder code (always lowercase here; specs may use
    /// either case).
    pub fn code(self) -> char {
        match self {
            Field::Album => 'l',
            Field::Artist => 'r',
            Field::Comment => 'c',
            Field::Genre => 'g',
            Field::Title => 't',
            Field::Track => 'n',
            Field::Year => 'y',
        }
    }

    /// Human-readable field name (also the long CLI flag name).
    pub fn name(self) -> &'static str {
        match self {
            Field::Album => "album",
            Field::Artist => "artist",
            Field::Comment => "comment",
            Field::Genre => "genre",
            Field::Title => "title",
            Field::Track => "track",
            Field::Year => "year",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Track | Field::Year => FieldKind::Integer,
            _ => FieldKind::Text,
        }
    }

    /// Resolve a placeholder letter, case-insensitively.
    /// `None` means the letter is not a registry code.
    pub fn from_code(c: char) -> Option<Field> {
        Field::ALL
            .into_iter()
            .find(|f| f.code() == c.to_ascii_lowercase())
    }
}

/// A concrete value for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Int(u32),
}

/// Accessor interface over one file's tag values.
///
/// The template engine only ever reads and writes through this trait; it
/// never owns the storage. `core::tags::TagFile` implements it on top of the
/// `id3` crate, and [`MemTags`] implements it in memory.
pub trait TagStore {
    /// Current value of a Text field, if any.
    fn text(&self, field: Field) -> Option<String>;

    /// Current value of an Integer field, if any. Zero counts as absent.
    fn int(&self, field: Field) -> Option<u32>;

    /// Set a Text field. Setting an empty string clears it.
    fn set_text(&mut self, field: Field, value: &str);

    /// Set an Integer field.
    fn set_int(&mut self, field: Field, value: u32);

    /// Remove a field entirely.
    fn clear(&mut self, field: Field);

    /// The field's value as display text, `None` when absent.
    ///
    /// Integer fields render as plain decimal here; the renderer applies its
    /// own track padding on top.
    fn display(&self, field: Field) -> Option<String> {
        match field.kind() {
            FieldKind::Text => self.text(field).filter(|s| !s.is_empty()),
            FieldKind::Integer => self.int(field).filter(|&v| v != 0).map(|v| v.to_string()),
        }
    }
}

/// In-memory `TagStore`.
///
/// Backs the unit tests and the compile/render/extract round-trip property;
/// also handy as the simplest possible reference implementation of the trait.
#[derive(Debug, Clone, Default)]
pub struct MemTags {
    values: Vec<(Field, FieldValue)>,
}

impl MemTags {
    pub fn new() -> MemTags {
        MemTags::default()
    }

    fn get(&self, field: Field) -> Option<&FieldValue> {
        self.values.iter().find(|(f, _)| *f == field).map(|(_, v)| v)
    }

    fn put(&mut self, field: Field, value: FieldValue) {
        match self.values.iter_mut().find(|(f, _)| *f == field) {
            Some(slot) => slot.1 = value,
            None => self.values.push((field, value)),
        }
    }
}

impl TagStore for MemTags {
    fn text(&self, field: Field) -> Option<String> {
        match self.get(field) {
            Some(FieldValue::Text(s)) => Some(s.clone()),
            _ => None,
        }
    }

    fn int(&self, field: Field) -> Option<u32> {
        match self.get(field) {
            Some(FieldValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    fn set_text(&mut self, field: Field, value: &str) {
        if value.is_empty() {
            self.clear(field);
        } else {
            self.put(field, FieldValue::Text(value.to_string()));
        }
    }

    fn set_int(&mut self, field: Field, value: u32) {
        self.put(field, FieldValue::Int(value));
    }

    fn clear(&mut self, field: Field) {
        self.values.retain(|(f, _)| *f != field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_resolve_case_insensitively() {
        assert_eq!(Field::from_code('r'), Some(Field::Artist));
        assert_eq!(Field::from_code('R'), Some(Field::Artist));
        assert_eq!(Field::from_code('N'), Some(Field::Track));
        assert_eq!(Field::from_code('z'), None);
        assert_eq!(Field::from_code('%'), None);
    }

    #[test]
    fn every_field_round_trips_through_its_code() {
        for field in Field::ALL {
            assert_eq!(Field::from_code(field.code()), Some(field));
        }
    }

    #[test]
    fn kinds_match_the_registry() {
        assert_eq!(Field::Track.kind(), FieldKind::Integer);
        assert_eq!(Field::Year.kind(), FieldKind::Integer);
        assert_eq!(Field::Title.kind(), FieldKind::Text);
    }

    #[test]
    fn mem_tags_last_write_wins() {
        let mut tags = MemTags::new();
        tags.set_text(Field::Album, "Dummy");
        tags.set_text(Field::Album, "Third");
        assert_eq!(tags.text(Field::Album).as_deref(), Some("Third"));

        tags.clear(Field::Album);
        assert_eq!(tags.text(Field::Album), None);
    }

    #[test]
    fn display_hides_zero_integers_and_empty_text() {
        let mut tags = MemTags::new();
        tags.set_int(Field::Track, 0);
        assert_eq!(tags.display(Field::Track), None);

        tags.set_int(Field::Track, 7);
        assert_eq!(tags.display(Field::Track).as_deref(), Some("7"));

        assert_eq!(tags.display(Field::Title), None);
    }
}
