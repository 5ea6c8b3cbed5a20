//! Containment checks for resolved deletion targets.
//!
//! Validation runs on lexically normalized absolute paths so `..` segments
//! surviving the matcher cannot place a target outside the working
//! directory. Normalization never touches the filesystem: a symlinked target
//! is judged by where it sits, not by where it points.

use super::DeleteError;
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

/// Fold `.` and `..` components out of `path` without consulting the
/// filesystem. `..` at the root stays at the root.
pub(crate) fn normalize(path: &Utf8Path) -> Utf8PathBuf {
    let mut out = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => match out.components().next_back() {
                Some(Utf8Component::Normal(_)) => {
                    out.pop();
                }
                Some(Utf8Component::RootDir | Utf8Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_str()),
        }
    }
    out
}

/// Resolve a matched path against the working directory into a normalized
/// absolute path. Absolute candidates are taken as-is; relative candidates
/// are joined onto the working directory first.
pub(crate) fn resolve(working_directory: &Utf8Path, candidate: &Utf8Path) -> Utf8PathBuf {
    normalize(&working_directory.join(candidate))
}

/// Reject `path` when it equals the working directory or falls outside it.
pub(crate) fn check(path: &Utf8Path, working_directory: &Utf8Path) -> Result<(), DeleteError> {
    if path == working_directory {
        return Err(DeleteError::CurrentDirectoryDeletion {
            path: path.to_owned(),
        });
    }
    if !path.starts_with(working_directory) {
        return Err(DeleteError::OutsideWorkingDirectory {
            path: path.to_owned(),
            working_directory: working_directory.to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::dot_segments("/work/./temp/../a.js", "/work/a.js")]
    #[case::parent_at_root("/../a", "/a")]
    #[case::trailing_dot("/work/temp/.", "/work/temp")]
    #[case::plain("/work/temp/a.js", "/work/temp/a.js")]
    fn normalize_folds_dot_components(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(Utf8Path::new(input)), Utf8Path::new(expected));
    }

    #[rstest]
    #[case::relative("/work", "temp/a.js", "/work/temp/a.js")]
    #[case::dot("/work", ".", "/work")]
    #[case::escaping("/work", "../sibling/a", "/sibling/a")]
    #[case::absolute("/work", "/elsewhere/a", "/elsewhere/a")]
    fn resolve_joins_and_normalizes(
        #[case] base: &str,
        #[case] candidate: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(
            resolve(Utf8Path::new(base), Utf8Path::new(candidate)),
            Utf8Path::new(expected)
        );
    }

    #[test]
    fn check_accepts_proper_descendants() {
        assert!(check(Utf8Path::new("/work/temp/a.js"), Utf8Path::new("/work")).is_ok());
    }

    #[test]
    fn check_rejects_the_working_directory_itself() {
        let error = check(Utf8Path::new("/work"), Utf8Path::new("/work"));
        assert!(matches!(
            error,
            Err(DeleteError::CurrentDirectoryDeletion { .. })
        ));
    }

    #[rstest]
    #[case::sibling("/sibling/a")]
    #[case::prefix_but_not_component("/workspace/a")]
    #[case::parent("/")]
    fn check_rejects_paths_outside_the_working_directory(#[case] path: &str) {
        let error = check(Utf8Path::new(path), Utf8Path::new("/work"));
        assert!(matches!(
            error,
            Err(DeleteError::OutsideWorkingDirectory { .. })
        ));
    }
}
