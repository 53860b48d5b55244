//! Word search backend
//!
//! Walks the tree with walkdir, filters by bare filename, reads each candidate
//! as UTF-8 and keeps the files that contain every search word. Nothing here
//! prints: unreadable entries are collected into the outcome for the caller
//! to report.

use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

use crate::core::file_reader::read_text;
use crate::core::filter::NameFilter;
use crate::core::model::{FileAccessError, MatchResult, SearchError, SearchOutcome, SearchRequest};
use crate::core::paths::{file_name, normalize_path};

/// Search a directory tree for files containing every word of the request.
///
/// Fails only when the root is not a directory or a glob does not compile;
/// per-file problems end up in [`SearchOutcome::errors`].
pub fn search_files(request: &SearchRequest) -> Result<SearchOutcome, SearchError> {
    if !request.root.is_dir() {
        return Err(SearchError::InvalidRoot {
            path: request.root.clone(),
        });
    }

    let filter = NameFilter::new(request.include.as_deref(), request.exclude.as_deref())?;
    let words = fold_words(&request.words, request.ignore_case);

    let mut outcome = SearchOutcome::default();

    let walker = WalkDir::new(&request.root)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                let path = err
                    .path()
                    .map(normalize_path)
                    .unwrap_or_else(|| normalize_path(&request.root));
                outcome.errors.push(FileAccessError::Walk {
                    path,
                    message: err.to_string(),
                });
                continue;
            }
        };

        let path = entry.path();
        let file_type = entry.file_type();

        // Links are never descended; a link to a directory is not a file either.
        // Dangling links fall through so the failed read gets reported.
        if file_type.is_dir() || (file_type.is_symlink() && path.is_dir()) {
            continue;
        }
        if !file_type.is_file() && !file_type.is_symlink() {
            debug!(path = %path.display(), "skipped special file");
            continue;
        }

        let Some(name) = file_name(path) else {
            continue;
        };
        if !filter.accepts(&name) {
            debug!(path = %path.display(), "skipped by filename filter");
            continue;
        }

        match check_file(path, &words, request.ignore_case) {
            Ok(Some(m)) => outcome.matches.push(m),
            Ok(None) => {}
            Err(err) => outcome.errors.push(err),
        }
    }

    debug!(
        matches = outcome.matches.len(),
        errors = outcome.errors.len(),
        "search finished"
    );
    Ok(outcome)
}

/// Read one file and test it. `Ok(None)` means readable but not a match.
fn check_file(
    path: &Path,
    words: &[String],
    ignore_case: bool,
) -> Result<Option<MatchResult>, FileAccessError> {
    let content = read_text(path)?;

    let matched = if ignore_case {
        contains_all(&content.to_lowercase(), words)
    } else {
        contains_all(&content, words)
    };

    Ok(matched.then(|| MatchResult::new(normalize_path(path), content)))
}

fn fold_words(words: &[String], ignore_case: bool) -> Vec<String> {
    if ignore_case {
        words.iter().map(|w| w.to_lowercase()).collect()
    } else {
        words.to_vec()
    }
}

/// True when every word occurs somewhere in the haystack
pub fn contains_all(haystack: &str, words: &[String]) -> bool {
    words.iter().all(|word| haystack.contains(word.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn words(ws: &[&str]) -> Vec<String> {
        ws.iter().map(|w| w.to_string()).collect()
    }

    fn names(outcome: &SearchOutcome) -> Vec<String> {
        outcome
            .matches
            .iter()
            .map(|m| m.path.rsplit('/').next().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_contains_all() {
        assert!(contains_all("the quick brown fox", &words(&["fox", "quick"])));
        assert!(!contains_all("the quick brown fox", &words(&["fox", "dog"])));
        assert!(contains_all("anything", &[]));
        assert!(contains_all("aaa", &words(&["aa", "aa"])));
    }

    #[test]
    fn test_invalid_root() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("missing");
        let err = search_files(&SearchRequest::new(&missing, words(&["x"]))).unwrap_err();
        assert!(matches!(err, SearchError::InvalidRoot { .. }));

        let file = temp.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        let err = search_files(&SearchRequest::new(&file, words(&["x"]))).unwrap_err();
        assert!(matches!(err, SearchError::InvalidRoot { .. }));
    }

    #[test]
    fn test_all_words_required() {
        let temp = tempdir().unwrap();
        write(temp.path(), "both.txt", b"apple and banana");
        write(temp.path(), "one.txt", b"apple only");
        write(temp.path(), "none.txt", b"cherry");

        let outcome =
            search_files(&SearchRequest::new(temp.path(), words(&["banana", "apple"]))).unwrap();
        assert_eq!(names(&outcome), vec!["both.txt"]);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_recurses_in_deterministic_order() {
        let temp = tempdir().unwrap();
        write(temp.path(), "b.txt", b"needle");
        write(temp.path(), "a/deep/c.txt", b"needle");
        write(temp.path(), "a.txt", b"needle");

        let request = SearchRequest::new(temp.path(), words(&["needle"]));
        let first = search_files(&request).unwrap();
        let second = search_files(&request).unwrap();

        assert_eq!(first.matches.len(), 3);
        assert_eq!(first.matches, second.matches);
        assert!(first.matches.iter().any(|m| m.path.ends_with("a/deep/c.txt")));
    }

    #[test]
    fn test_case_sensitivity_toggle() {
        let temp = tempdir().unwrap();
        write(temp.path(), "greet.txt", b"Hello World");

        let request = SearchRequest::new(temp.path(), words(&["hello"]));
        assert!(search_files(&request).unwrap().is_empty());

        let request = request.with_ignore_case(true);
        let outcome = search_files(&request).unwrap();
        assert_eq!(names(&outcome), vec!["greet.txt"]);
        assert_eq!(outcome.matches[0].content, "Hello World");
    }

    #[test]
    fn test_ignore_case_folds_words_too() {
        let temp = tempdir().unwrap();
        write(temp.path(), "shout.txt", b"all lower case");

        let request = SearchRequest::new(temp.path(), words(&["LOWER"])).with_ignore_case(true);
        assert_eq!(names(&search_files(&request).unwrap()), vec!["shout.txt"]);
    }

    #[test]
    fn test_include_and_exclude() {
        let temp = tempdir().unwrap();
        write(temp.path(), "keep.txt", b"word");
        write(temp.path(), "skip.md", b"word");
        write(temp.path(), "secret.txt", b"word");

        let request = SearchRequest::new(temp.path(), words(&["word"]))
            .with_include("*.txt")
            .with_exclude("secret*");
        assert_eq!(names(&search_files(&request).unwrap()), vec!["keep.txt"]);
    }

    #[test]
    fn test_globs_ignore_directory_part() {
        let temp = tempdir().unwrap();
        write(temp.path(), "logs/app.txt", b"word");
        write(temp.path(), "src/logs.txt", b"word");

        let request = SearchRequest::new(temp.path(), words(&["word"])).with_exclude("logs*");
        assert_eq!(names(&search_files(&request).unwrap()), vec!["app.txt"]);
    }

    #[test]
    fn test_unclosed_bracket_matches_literally() {
        let temp = tempdir().unwrap();
        write(temp.path(), "[draft.txt", b"word");
        write(temp.path(), "draft.txt", b"word");

        let request = SearchRequest::new(temp.path(), words(&["word"])).with_include("[draft*");
        let outcome = search_files(&request).unwrap();
        assert_eq!(names(&outcome), vec!["[draft.txt"]);
    }

    #[test]
    fn test_undecodable_file_is_skipped_and_reported() {
        let temp = tempdir().unwrap();
        write(temp.path(), "a_good.txt", b"needle");
        write(temp.path(), "b_binary.dat", &[0xff, 0xfe, b'n', b'e', b'e', b'd', b'l', b'e']);
        write(temp.path(), "c_good.txt", b"needle here too");

        let outcome = search_files(&SearchRequest::new(temp.path(), words(&["needle"]))).unwrap();
        assert_eq!(names(&outcome), vec!["a_good.txt", "c_good.txt"]);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].path().ends_with("b_binary.dat"));
    }

    #[test]
    fn test_empty_directory() {
        let temp = tempdir().unwrap();
        let outcome = search_files(&SearchRequest::new(temp.path(), words(&["x"]))).unwrap();
        assert!(outcome.is_empty());
        assert!(outcome.errors.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_is_read() {
        let temp = tempdir().unwrap();
        write(temp.path(), "real/target.txt", b"needle");
        std::os::unix::fs::symlink(
            temp.path().join("real/target.txt"),
            temp.path().join("link.txt"),
        )
        .unwrap();

        let outcome = search_files(&SearchRequest::new(temp.path(), words(&["needle"]))).unwrap();
        assert_eq!(names(&outcome), vec!["link.txt", "target.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_reported() {
        let temp = tempdir().unwrap();
        write(temp.path(), "ok.txt", b"needle");
        std::os::unix::fs::symlink(temp.path().join("gone.txt"), temp.path().join("dangling.txt"))
            .unwrap();

        let outcome = search_files(&SearchRequest::new(temp.path(), words(&["needle"]))).unwrap();
        assert_eq!(names(&outcome), vec!["ok.txt"]);
        assert_eq!(outcome.errors.len(), 1);
        assert!(matches!(outcome.errors[0], FileAccessError::Read { .. }));
        assert!(outcome.errors[0].path().ends_with("dangling.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_not_descended() {
        let temp = tempdir().unwrap();
        let outside = tempdir().unwrap();
        write(outside.path(), "hidden.txt", b"needle");
        write(temp.path(), "plain.txt", b"no match here");
        std::os::unix::fs::symlink(outside.path(), temp.path().join("linked")).unwrap();

        let outcome = search_files(&SearchRequest::new(temp.path(), words(&["needle"]))).unwrap();
        assert!(outcome.matches.is_empty());
        assert!(outcome.errors.is_empty());
    }
}
