//! Remote path helpers.
//!
//! Disk paths are `/`-separated and rooted at the app's disk root.

/// Joins a folder and a name into a rooted disk path.
///
/// Leading, trailing and doubled separators in either part are collapsed.
pub fn join_path(folder: &str, name: &str) -> String {
    let mut path = String::new();
    for segment in folder.split('/').chain(name.split('/')) {
        if segment.is_empty() {
            continue;
        }
        path.push('/');
        path.push_str(segment);
    }
    if path.is_empty() {
        path.push('/');
    }
    path
}

/// Makes an album title safe to use as a single folder name.
///
/// Path separators become `_`, so a title like `"2023/24"` cannot create a
/// nested folder. Dot-only titles are replaced as well.
pub fn sanitize_segment(title: &str) -> String {
    let cleaned: String = title
        .trim()
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        return "_".into();
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_simple() {
        assert_eq!(join_path("PublicFolder", "Summer"), "/PublicFolder/Summer");
    }

    #[test]
    fn join_collapses_separators() {
        assert_eq!(join_path("/PublicFolder/", "/a.jpg"), "/PublicFolder/a.jpg");
        assert_eq!(join_path("a//b", "c"), "/a/b/c");
    }

    #[test]
    fn join_empty_is_root() {
        assert_eq!(join_path("", ""), "/");
        assert_eq!(join_path("", "x.jpg"), "/x.jpg");
    }

    #[test]
    fn sanitize_replaces_separators() {
        assert_eq!(sanitize_segment("2023/24"), "2023_24");
        assert_eq!(sanitize_segment(r"a\b"), "a_b");
    }

    #[test]
    fn sanitize_keeps_unicode() {
        assert_eq!(
            sanitize_segment("Фотографии с моей страницы"),
            "Фотографии с моей страницы"
        );
    }

    #[test]
    fn sanitize_rejects_dot_names() {
        assert_eq!(sanitize_segment(".."), "_");
        assert_eq!(sanitize_segment("   "), "_");
    }
}
