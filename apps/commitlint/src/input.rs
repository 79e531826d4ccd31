//! Message input: files, glob patterns, stdin, and NUL-separated batches.

use crate::error::Error;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default file git hands to the `commit-msg` hook.
pub const COMMIT_EDITMSG: &str = ".git/COMMIT_EDITMSG";

const SCISSORS: &str = "# ------------------------ >8 ------------------------";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageInput {
    /// Display label: a path relative to the working directory, or `stdin`.
    pub source: String,
    pub raw: String,
}

#[derive(Debug, Clone, Default)]
pub struct InputOptions {
    /// Split every input on NUL bytes (`git log -z --format=%B`).
    pub null_separated: bool,
    /// Strip git comment lines and the scissors section.
    pub strip_comments: bool,
}

/// Read messages from `paths` (`-` is stdin; globs are expanded). With no
/// paths, stdin is read.
pub fn read_inputs(paths: &[String], opts: &InputOptions) -> Result<Vec<MessageInput>, Error> {
    let mut out = Vec::new();
    if paths.is_empty() {
        push_message(&mut out, "stdin".into(), read_stdin()?, opts);
        return Ok(out);
    }
    for p in paths {
        if p == "-" {
            push_message(&mut out, "stdin".into(), read_stdin()?, opts);
        } else if is_glob(p) {
            let entries = glob::glob(p).map_err(|source| Error::Pattern {
                pattern: p.clone(),
                source,
            })?;
            let mut matched: Vec<PathBuf> = entries.filter_map(Result::ok).filter(|e| e.is_file()).collect();
            matched.sort();
            if matched.is_empty() {
                return Err(Error::NoMatches(p.clone()));
            }
            for path in matched {
                let raw = read_file(&path)?;
                push_message(&mut out, display_path(&path), raw, opts);
            }
        } else {
            let path = PathBuf::from(p);
            let raw = read_file(&path)?;
            push_message(&mut out, display_path(&path), raw, opts);
        }
    }
    debug!(messages = out.len(), "inputs read");
    Ok(out)
}

/// Read the commit-msg hook file, stripping git comments.
pub fn read_edit_file(path: &Path, null_separated: bool) -> Result<Vec<MessageInput>, Error> {
    let opts = InputOptions {
        null_separated,
        strip_comments: true,
    };
    let mut out = Vec::new();
    push_message(&mut out, display_path(path), read_file(path)?, &opts);
    Ok(out)
}

fn push_message(out: &mut Vec<MessageInput>, source: String, raw: String, opts: &InputOptions) {
    let clean = |s: &str| {
        if opts.strip_comments {
            strip_git_comments(s)
        } else {
            s.to_string()
        }
    };
    if opts.null_separated {
        let chunks: Vec<&str> = raw.split('\0').filter(|c| !c.trim().is_empty()).collect();
        for (i, chunk) in chunks.iter().enumerate() {
            out.push(MessageInput {
                source: format!("{source}#{}", i + 1),
                raw: clean(chunk.trim_start_matches('\n')),
            });
        }
    } else {
        out.push(MessageInput {
            source,
            raw: clean(&raw),
        });
    }
}

/// Drop `#` comment lines and everything from the scissors line on.
pub fn strip_git_comments(raw: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for line in raw.lines() {
        if line == SCISSORS {
            break;
        }
        if line.starts_with('#') {
            continue;
        }
        kept.push(line);
    }
    kept.join("\n")
}

fn is_glob(p: &str) -> bool {
    p.contains(['*', '?', '['])
}

fn read_file(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::Input {
        path: path.to_string_lossy().to_string(),
        source,
    })
}

fn read_stdin() -> Result<String, Error> {
    let mut s = String::new();
    std::io::stdin()
        .read_to_string(&mut s)
        .map_err(|source| Error::Input {
            path: "stdin".into(),
            source,
        })?;
    Ok(s)
}

fn display_path(path: &Path) -> String {
    let rel = std::env::current_dir()
        .ok()
        .filter(|_| path.is_absolute())
        .and_then(|cwd| pathdiff::diff_paths(path, cwd));
    rel.as_deref().unwrap_or(path).to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn strips_comments_and_scissors() {
        let raw = "fix: a\n\nbody\n# Please enter the commit message\n# ------------------------ >8 ------------------------\ndiff --git a/x b/x\n";
        assert_eq!(strip_git_comments(raw), "fix: a\n\nbody");
    }

    #[test]
    fn reads_files_and_globs_in_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "fix: b").unwrap();
        fs::write(dir.path().join("a.txt"), "fix: a").unwrap();
        let pattern = dir.path().join("*.txt").to_string_lossy().to_string();
        let inputs = read_inputs(&[pattern], &InputOptions::default()).unwrap();
        let raws: Vec<&str> = inputs.iter().map(|i| i.raw.as_str()).collect();
        assert_eq!(raws, vec!["fix: a", "fix: b"]);
    }

    #[test]
    fn null_separated_batch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");
        fs::write(&path, "fix: one\n\0\nfeat: two\n\0").unwrap();
        let opts = InputOptions {
            null_separated: true,
            ..InputOptions::default()
        };
        let inputs = read_inputs(&[path.to_string_lossy().to_string()], &opts).unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].raw, "fix: one\n");
        assert_eq!(inputs[1].raw, "feat: two\n");
        assert!(inputs[1].source.ends_with("#2"));
    }

    #[test]
    fn unmatched_glob_is_an_error() {
        let dir = tempdir().unwrap();
        let pattern = dir.path().join("*.msg").to_string_lossy().to_string();
        let err = read_inputs(&[pattern.clone()], &InputOptions::default()).unwrap_err();
        assert!(matches!(err, Error::NoMatches(p) if p == pattern));
    }

    #[test]
    fn missing_file_is_input_error() {
        let err = read_inputs(&["/definitely/not/here".into()], &InputOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Input { .. }));
    }

    #[test]
    fn edit_file_strips_comments() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("COMMIT_EDITMSG");
        fs::write(&path, "docs: readme\n# comment\n").unwrap();
        let inputs = read_edit_file(&path, false).unwrap();
        assert_eq!(inputs[0].raw, "docs: readme");
    }
}
