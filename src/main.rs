//! retag
//!
//! # What this program is
//! A small CLI that edits ID3 tags on MP3 files and renames files from their
//! tags (or fills tags from filenames) using one pattern language for both
//! directions.
//!
//! # How a run works (mental model)
//! 1. clap parses the flags; bad flag values die here, before any file IO.
//! 2. Any pattern is compiled once into a token list (`core::spec`).
//! 3. Each file goes through the same pipeline, one at a time:
//!    open -> extract -> apply edits -> save -> rename (each step optional).
//! 4. Per-file problems go to stderr and flip a failure flag; the batch
//!    never stops early. Exit 0 only if every file came through clean.
//!
//! With no edit/extract/rename flags, the tool just lists each file's
//! populated fields.

mod cli;
mod core;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use regex::Regex;

use crate::cli::{Action, Cli};
use crate::core::extract::{extract_into, matcher};
use crate::core::render::render_name;
use crate::core::spec::compile;
use crate::core::{
    CompiledSpec, DangerClass, Field, FieldValue, FileError, SpecError, TagFile, TagStore,
};

/// Everything decided before the first file is touched.
#[derive(Debug)]
struct Plan {
    actions: Vec<Action>,
    extract: Option<(CompiledSpec, Regex)>,
    rename: Option<(CompiledSpec, DangerClass)>,
}

impl Plan {
    fn from_cli(cli: &Cli) -> Result<Plan, SpecError> {
        let extract = match &cli.extract {
            Some(spec) => {
                let spec = compile(spec)?;
                let re = matcher(&spec);
                Some((spec, re))
            }
            None => None,
        };
        let rename = match cli.rename_mode() {
            Some((spec, class)) => Some((compile(spec)?, class)),
            None => None,
        };
        Ok(Plan { actions: cli.actions(), extract, rename })
    }

    /// True when no edits were requested at all: list mode.
    fn list_only(&self) -> bool {
        self.actions.is_empty() && self.extract.is_none() && self.rename.is_none()
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let plan = match Plan::from_cli(&cli) {
        Ok(plan) => plan,
        Err(err) => {
            eprintln!("retag: {err}");
            return ExitCode::from(2);
        }
    };

    if run_batch(&cli.files, &plan) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Process every file, reporting per-file errors and carrying on.
///
/// Returns true only if the whole batch came through without a problem;
/// the flag is the only state shared across files.
fn run_batch(files: &[PathBuf], plan: &Plan) -> bool {
    let mut failed = false;
    for path in files {
        if let Err(err) = process_file(path, plan) {
            eprintln!("{}: {err}", path.display());
            failed = true;
        }
    }
    !failed
}

/// Run one file through the pipeline. Any error here is per-file: the
/// caller reports it and moves on to the next file.
fn process_file(path: &Path, plan: &Plan) -> Result<(), FileError> {
    let mut file = TagFile::open(path)?;
    let mut dirty = false;

    if let Some((spec, re)) = &plan.extract {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        if !extract_into(spec, re, stem, &mut file) {
            return Err(FileError::NoMatch(spec.source().to_string()));
        }
        dirty = true;
    }

    for action in &plan.actions {
        match action {
            Action::Set(field, FieldValue::Text(value)) => file.set_text(*field, value),
            Action::Set(field, FieldValue::Int(value)) => file.set_int(*field, *value),
            Action::Clear(field) => file.clear(*field),
        }
        dirty = true;
    }

    if dirty {
        file.save()?;
    }

    if let Some((spec, class)) = &plan.rename {
        let stem = render_name(spec, &file, Some(*class));
        let target = sibling_with_stem(path, &stem);
        // Check-then-act, deliberately: a racing writer can still slip a
        // file in between, and we accept that over taking locks.
        if target.exists() {
            return Err(FileError::Collision(target));
        }
        std::fs::rename(path, &target).map_err(FileError::Rename)?;
    }

    if plan.list_only() {
        print_fields(path, &file);
    }

    Ok(())
}

/// Swap in a new filename stem, keeping directory and extension.
fn sibling_with_stem(path: &Path, stem: &str) -> PathBuf {
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem.to_string(),
    };
    path.with_file_name(name)
}

/// List mode output: the path, then one aligned `name: value` line per
/// populated field.
fn print_fields(path: &Path, file: &TagFile) {
    println!("{}:", path.display());
    for field in Field::ALL {
        if let Some(value) = file.display(field) {
            println!("    {:<10}{}", format!("{}:", field.name()), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(args: &[&str]) -> Plan {
        let cli = Cli::try_parse_from(std::iter::once("retag").chain(args.iter().copied()))
            .unwrap();
        Plan::from_cli(&cli).unwrap()
    }

    fn touch(path: &Path) {
        std::fs::write(path, b"").unwrap();
    }

    #[test]
    fn bad_patterns_fail_before_any_file_io() {
        let cli = Cli::try_parse_from(["retag", "--extract", "%z", "a.mp3"]).unwrap();
        assert_eq!(
            Plan::from_cli(&cli).unwrap_err(),
            SpecError::UnknownField('z')
        );
    }

    #[test]
    fn extraction_fills_tags_from_the_filename() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portishead - glory box.mp3");
        touch(&path);

        process_file(&path, &plan(&["--extract", "%r - %t"])).unwrap();

        let file = TagFile::open(&path).unwrap();
        assert_eq!(file.text(Field::Artist).as_deref(), Some("portishead"));
        assert_eq!(file.text(Field::Title).as_deref(), Some("glory box"));
    }

    #[test]
    fn extraction_mismatch_is_an_error_and_saves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-matching.mp3");
        touch(&path);

        let err = process_file(&path, &plan(&["--extract", "%r - %t"])).unwrap_err();
        assert!(matches!(err, FileError::NoMatch(_)));
        assert_eq!(std::fs::read(&path).unwrap(), b"");
    }

    #[test]
    fn edits_apply_in_order_and_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.mp3");
        touch(&path);

        process_file(&path, &plan(&["-r", "Portishead", "-n", "3", "-y", "1994"])).unwrap();
        // Clear everything, then set just the title.
        process_file(&path, &plan(&["--clear", "-t", "Roads"])).unwrap();

        let file = TagFile::open(&path).unwrap();
        assert_eq!(file.text(Field::Title).as_deref(), Some("Roads"));
        assert_eq!(file.text(Field::Artist), None);
        assert_eq!(file.int(Field::Track), None);
    }

    #[test]
    fn rename_derives_the_name_from_tags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.mp3");
        touch(&path);

        process_file(&path, &plan(&["-r", "Portishead", "-t", "Glory Box"])).unwrap();
        process_file(&path, &plan(&["--rename", "%-r-%-t"])).unwrap();

        assert!(!path.exists());
        assert!(dir.path().join("portishead-glory-box.mp3").exists());
    }

    #[test]
    fn rename_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.mp3");
        let occupied = dir.path().join("taken.mp3");
        touch(&path);
        touch(&occupied);

        // A placeholder-free pattern renders the same stem for any tags.
        let err = process_file(&path, &plan(&["--rename", "taken"])).unwrap_err();
        assert!(matches!(err, FileError::Collision(_)));
        assert!(path.exists());
    }

    #[test]
    fn batch_continues_past_failures_and_reports_them() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("song.mp3");
        let missing = dir.path().join("gone.mp3");
        touch(&good);

        let files = vec![missing, good.clone()];
        assert!(!run_batch(&files, &plan(&["-t", "Roads"])));

        // The failure on the first file did not stop the second.
        let file = TagFile::open(&good).unwrap();
        assert_eq!(file.text(Field::Title).as_deref(), Some("Roads"));

        // A fully clean batch succeeds.
        assert!(run_batch(&[good], &plan(&["-t", "Roads Again"])));
    }

    #[test]
    fn missing_files_report_but_do_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let err = process_file(&dir.path().join("gone.mp3"), &plan(&["-t", "X"])).unwrap_err();
        assert!(matches!(err, FileError::Open(_)));
    }
}
