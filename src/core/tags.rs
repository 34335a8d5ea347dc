//! ID3-backed tag access for one file.
//!
//! We use the `id3` crate. [`TagFile`] owns the loaded tag plus the path it
//! came from; the template engine only sees it through the `TagStore` trait.
//!
//! Lifecycle per file: open -> mutate through the trait -> save -> drop.
//! Nothing touches the file between open and save.

use std::path::{Path, PathBuf};

use id3::frame::{Comment, Content};
use id3::{Tag, TagLike, Version};

use super::error::FileError;
use super::fields::{Field, TagStore};

/// One media file's tag, loaded into memory.
#[derive(Debug)]
pub struct TagFile {
    path: PathBuf,
    tag: Tag,
}

impl TagFile {
    /// Open `path` and load its ID3 tag.
    ///
    /// An unopenable file is a per-file error. An openable file with no tag
    /// (or an unreadable one) starts from an empty tag, so a fresh file can
    /// still be tagged.
    pub fn open(path: &Path) -> Result<TagFile, FileError> {
        std::fs::File::open(path).map_err(FileError::Open)?;
        let tag = Tag::read_from_path(path).unwrap_or_else(|_| Tag::new());
        Ok(TagFile { path: path.to_path_buf(), tag })
    }

    /// Write the tag back to the file as ID3v2.4.
    ///
    /// Saving into a `.wav` container is refused outright: rewriting the
    /// RIFF chunk layout around an ID3 tag is a known way to corrupt the
    /// file, so we fail before touching any bytes.
    pub fn save(&mut self) -> Result<(), FileError> {
        if extension(&self.path).as_deref() == Some("wav") {
            return Err(FileError::SaveRefused("wav".to_string()));
        }
        self.tag
            .write_to_path(&self.path, Version::Id3v24)
            .map_err(FileError::Save)
    }

    /// Find the first COMM frame and return its text.
    fn first_comment(&self) -> Option<String> {
        for frame in self.tag.frames() {
            if frame.id() != "COMM" {
                continue;
            }
            if let Content::Comment(c) = frame.content() {
                return Some(c.text.clone());
            }
        }
        None
    }

    /// Replace all COMM frames with a single "eng" comment.
    fn set_comment(&mut self, text: &str) {
        let _ = self.tag.remove("COMM");
        let _ = self.tag.add_frame(Comment {
            lang: "eng".to_string(),
            description: String::new(),
            text: text.to_string(),
        });
    }
}

/// Lowercased file extension, if any.
fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
}

impl TagStore for TagFile {
    fn text(&self, field: Field) -> Option<String> {
        match field {
            Field::Album => self.tag.album().map(str::to_owned),
            Field::Artist => self.tag.artist().map(str::to_owned),
            Field::Comment => self.first_comment(),
            Field::Genre => self.tag.genre().map(str::to_owned),
            Field::Title => self.tag.title().map(str::to_owned),
            Field::Track | Field::Year => None,
        }
    }

    fn int(&self, field: Field) -> Option<u32> {
        match field {
            Field::Track => self.tag.track(),
            Field::Year => self.tag.year().and_then(|y| u32::try_from(y).ok()),
            _ => None,
        }
    }

    fn set_text(&mut self, field: Field, value: &str) {
        // Setting empty text removes the frame, same as clearing.
        if value.is_empty() {
            self.clear(field);
            return;
        }
        match field {
            Field::Album => self.tag.set_album(value),
            Field::Artist => self.tag.set_artist(value),
            Field::Comment => self.set_comment(value),
            Field::Genre => self.tag.set_genre(value),
            Field::Title => self.tag.set_title(value),
            Field::Track | Field::Year => {}
        }
    }

    fn set_int(&mut self, field: Field, value: u32) {
        match field {
            Field::Track => self.tag.set_track(value),
            Field::Year => self.tag.set_year(value as i32),
            _ => {}
        }
    }

    fn clear(&mut self, field: Field) {
        match field {
            Field::Album => self.tag.remove_album(),
            Field::Artist => self.tag.remove_artist(),
            Field::Comment => {
                let _ = self.tag.remove("COMM");
            }
            Field::Genre => self.tag.remove_genre(),
            Field::Title => self.tag.remove_title(),
            Field::Track => self.tag.remove_track(),
            Field::Year => self.tag.remove_year(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_fails_on_a_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TagFile::open(&dir.path().join("nope.mp3")).unwrap_err();
        assert!(matches!(err, FileError::Open(_)));
    }

    #[test]
    fn open_starts_empty_on_an_untagged_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.mp3");
        std::fs::write(&path, b"").unwrap();

        let file = TagFile::open(&path).unwrap();
        for field in Field::ALL {
            assert_eq!(file.display(field), None, "{}", field.name());
        }
    }

    #[test]
    fn values_round_trip_through_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.mp3");
        std::fs::write(&path, b"").unwrap();

        let mut file = TagFile::open(&path).unwrap();
        file.set_text(Field::Artist, "Portishead");
        file.set_text(Field::Comment, "from vinyl");
        file.set_int(Field::Track, 3);
        file.set_int(Field::Year, 1994);
        file.save().unwrap();

        let reloaded = TagFile::open(&path).unwrap();
        assert_eq!(reloaded.text(Field::Artist).as_deref(), Some("Portishead"));
        assert_eq!(reloaded.text(Field::Comment).as_deref(), Some("from vinyl"));
        assert_eq!(reloaded.int(Field::Track), Some(3));
        assert_eq!(reloaded.int(Field::Year), Some(1994));
    }

    #[test]
    fn setting_empty_text_clears_the_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.mp3");
        std::fs::write(&path, b"").unwrap();

        let mut file = TagFile::open(&path).unwrap();
        file.set_text(Field::Title, "Mysterons");
        file.set_text(Field::Title, "");
        assert_eq!(file.text(Field::Title), None);
    }

    #[test]
    fn save_is_refused_for_wav_containers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("take.wav");
        std::fs::write(&path, b"RIFF").unwrap();

        let mut file = TagFile::open(&path).unwrap();
        file.set_text(Field::Title, "Take One");
        let err = file.save().unwrap_err();
        assert!(matches!(err, FileError::SaveRefused(_)));
        // And the file was not touched.
        assert_eq!(std::fs::read(&path).unwrap(), b"RIFF");
    }
}
