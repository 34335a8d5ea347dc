//! Command-line surface.
//!
//! One flag pair per registry field (`-l/--album VALUE` sets, `--no-album`
//! clears), plus the three pattern modes. Flag state folds into an ordered
//! [`Action`] list that the batch loop replays against each file's tag
//! store; later actions win, so `--clear -t "Roads"` wipes everything and
//! then sets the title.

use std::path::PathBuf;

use clap::Parser;

use crate::core::fields::{Field, FieldValue};
use crate::core::sanitize::DangerClass;

#[derive(Parser, Debug)]
#[command(name = "retag", version)]
#[command(about = "Edit ID3 tags and rename MP3s from filename patterns")]
#[command(arg_required_else_help = true)]
#[command(after_help = "\
Patterns mix literal text with %-placeholders, one letter per field
(l album, r artist, c comment, g genre, t title, n track, y year).
An uppercase letter keeps the tag's case; lowercase folds it down.
An optional character between % and the letter replaces unsafe
characters when renaming: `%_t` gives `glory_box`.

Examples:
  retag --extract '%r - %t' *.mp3      fill artist/title from filenames
  retag --rename '%-n-%-t' *.mp3       rename to e.g. 03-glory-box.mp3
  retag -r Portishead -y 1994 *.mp3    set artist and year")]
pub struct Cli {
    /// Set the album
    #[arg(short = 'l', long, value_name = "ALBUM")]
    pub album: Option<String>,
    /// Set the artist
    #[arg(short = 'r', long, value_name = "ARTIST")]
    pub artist: Option<String>,
    /// Set the comment
    #[arg(short = 'c', long, value_name = "COMMENT")]
    pub comment: Option<String>,
    /// Set the genre
    #[arg(short = 'g', long, value_name = "GENRE")]
    pub genre: Option<String>,
    /// Set the title
    #[arg(short = 't', long, value_name = "TITLE")]
    pub title: Option<String>,
    /// Set the track number
    #[arg(short = 'n', long, value_name = "TRACK")]
    pub track: Option<u32>,
    /// Set the year
    #[arg(short = 'y', long, value_name = "YEAR")]
    pub year: Option<u32>,

    /// Clear the album
    #[arg(long)]
    pub no_album: bool,
    /// Clear the artist
    #[arg(long)]
    pub no_artist: bool,
    /// Clear the comment
    #[arg(long)]
    pub no_comment: bool,
    /// Clear the genre
    #[arg(long)]
    pub no_genre: bool,
    /// Clear the title
    #[arg(long)]
    pub no_title: bool,
    /// Clear the track number
    #[arg(long)]
    pub no_track: bool,
    /// Clear the year
    #[arg(long)]
    pub no_year: bool,

    /// Clear every field
    #[arg(long)]
    pub clear: bool,

    /// Fill fields by matching each filename against a pattern
    #[arg(long, value_name = "SPEC")]
    pub extract: Option<String>,

    /// Rename each file from its tags (shell-safe names)
    #[arg(long, value_name = "SPEC", conflicts_with = "rename_fs")]
    pub rename: Option<String>,

    /// Like --rename, but only filesystem-unsafe characters are replaced
    #[arg(long = "rename-fs", value_name = "SPEC")]
    pub rename_fs: Option<String>,

    /// Files to process
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

/// One deferred tag edit, replayed in order per file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Set(Field, FieldValue),
    Clear(Field),
}

impl Cli {
    /// Fold the edit flags into an ordered action list.
    ///
    /// clap cannot report how set and clear flags for the same field were
    /// interleaved on the command line, so the order is fixed: `--clear`
    /// first, then the `--no-*` flags, then explicit sets. Last write wins.
    pub fn actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();

        if self.clear {
            actions.extend(Field::ALL.into_iter().map(Action::Clear));
        }

        let clears = [
            (self.no_album, Field::Album),
            (self.no_artist, Field::Artist),
            (self.no_comment, Field::Comment),
            (self.no_genre, Field::Genre),
            (self.no_title, Field::Title),
            (self.no_track, Field::Track),
            (self.no_year, Field::Year),
        ];
        for (flagged, field) in clears {
            if flagged {
                actions.push(Action::Clear(field));
            }
        }

        let texts = [
            (&self.album, Field::Album),
            (&self.artist, Field::Artist),
            (&self.comment, Field::Comment),
            (&self.genre, Field::Genre),
            (&self.title, Field::Title),
        ];
        for (value, field) in texts {
            if let Some(value) = value {
                actions.push(Action::Set(field, FieldValue::Text(value.clone())));
            }
        }
        if let Some(track) = self.track {
            actions.push(Action::Set(Field::Track, FieldValue::Int(track)));
        }
        if let Some(year) = self.year {
            actions.push(Action::Set(Field::Year, FieldValue::Int(year)));
        }

        actions
    }

    /// The requested rename pattern and its sanitization policy, if any.
    pub fn rename_mode(&self) -> Option<(&str, DangerClass)> {
        if let Some(spec) = &self.rename {
            Some((spec, DangerClass::Shell))
        } else {
            self.rename_fs
                .as_deref()
                .map(|spec| (spec, DangerClass::Filesystem))
        }
    }
}
