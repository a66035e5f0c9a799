//! Path canonicalization used before routing.

/// Returns the canonical URL path for `p`, eliminating `.` and `..` elements.
///
/// The following rules are applied:
///  1. Replace multiple slashes with a single slash.
///  2. Eliminate each `.` path name element (the current directory).
///  3. Eliminate each inner `..` path name element (the parent directory)
///     along with the non-`..` element that precedes it.
///  4. Eliminate `..` elements that begin a rooted path,
///     that is, replace `/..` by `/` at the beginning of a path.
///
/// A trailing slash is kept, and the result always starts with `/`.
///
/// ```rust
/// use muxrouter::path::clean;
///
/// assert_eq!(clean("//api/./v1/../users/"), "/api/users/");
/// assert_eq!(clean("abc/def/.."), "/abc");
/// assert_eq!(clean("/abc/."), "/abc");
/// ```
pub fn clean(p: &str) -> String {
    if p.is_empty() {
        return "/".to_owned();
    }

    // only a literal trailing slash is kept
    let trailing = p.ends_with('/');

    let mut elements: Vec<&str> = Vec::with_capacity(p.len() / 2);
    for element in p.split('/') {
        match element {
            "" | "." => {}
            ".." => {
                elements.pop();
            }
            element => elements.push(element),
        }
    }

    if elements.is_empty() {
        return "/".to_owned();
    }

    let mut buf = String::with_capacity(p.len() + 1);
    for element in elements {
        buf.push('/');
        buf.push_str(element);
    }
    if trailing {
        buf.push('/');
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::clean;

    // path, result
    fn clean_tests() -> Vec<(&'static str, &'static str)> {
        vec![
            // Already clean
            ("/", "/"),
            ("/abc", "/abc"),
            ("/a/b/c", "/a/b/c"),
            ("/abc/", "/abc/"),
            ("/a/b/c/", "/a/b/c/"),
            // missing root
            ("", "/"),
            ("a/", "/a/"),
            ("abc", "/abc"),
            ("abc/def", "/abc/def"),
            ("a/b/c", "/a/b/c"),
            // Remove doubled slash
            ("//", "/"),
            ("/abc//", "/abc/"),
            ("/abc/def//", "/abc/def/"),
            ("/a/b/c//", "/a/b/c/"),
            ("/abc//def//ghi", "/abc/def/ghi"),
            ("//abc", "/abc"),
            ("///abc", "/abc"),
            ("//abc//", "/abc/"),
            // Remove . elements
            (".", "/"),
            ("./", "/"),
            ("/abc/./def", "/abc/def"),
            ("/./abc/def", "/abc/def"),
            ("/abc/.", "/abc"),
            ("/abc/./", "/abc/"),
            // Remove .. elements
            ("..", "/"),
            ("../", "/"),
            ("../../", "/"),
            ("../..", "/"),
            ("../../abc", "/abc"),
            ("/abc/def/ghi/../jkl", "/abc/def/jkl"),
            ("/abc/def/../ghi/../jkl", "/abc/jkl"),
            ("/abc/def/..", "/abc"),
            ("/abc/def/../..", "/"),
            ("/abc/def/../../..", "/"),
            ("/abc/def/../../../ghi/jkl/../../../mno", "/mno"),
            // Combinations
            ("abc/./../def", "/def"),
            ("abc//./../def", "/def"),
            ("abc/../../././../def", "/def"),
        ]
    }

    #[test]
    fn test_path_clean() {
        for (path, want) in clean_tests() {
            assert_eq!(clean(path), want, "clean({:?})", path);
            assert_eq!(clean(want), want, "clean({:?})", want);
        }
    }

    #[test]
    fn test_path_clean_long() {
        for i in 1..300 {
            let ss = "a".repeat(i);
            let correct_path = format!("/{}", ss);
            assert_eq!(clean(&correct_path), correct_path);
            assert_eq!(clean(&ss), correct_path);
            assert_eq!(clean(&format!("//{}", ss)), correct_path);
            assert_eq!(clean(&format!("//{}/b/..", ss)), correct_path);
        }
    }
}
