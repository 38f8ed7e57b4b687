//! Line splitting and joining for text files.

/// Separator used by [`FileSystem::write_lines`](crate::FileSystem::write_lines)
/// unless configured otherwise.
pub const DEFAULT_LINE_SEPARATOR: &str = "\n";

/// Split text into lines, accepting `\n`, `\r\n` and lone `\r` terminators.
///
/// Line endings are normalized before splitting, so a trailing terminator
/// yields a trailing empty element and empty text yields one empty line.
///
/// ```rust
/// use tierfs::lines::split_lines;
///
/// assert_eq!(split_lines("a\r\nb\rc\n"), ["a", "b", "c", ""]);
/// ```
pub fn split_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .split('\n')
        .map(str::to_owned)
        .collect()
}

/// Join lines with `separator`.
///
/// No separator is added after the last element; pass a trailing empty
/// element to end the text with one.
pub fn join_lines<S: AsRef<str>>(lines: &[S], separator: &str) -> String {
    let mut joined = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            joined.push_str(separator);
        }
        joined.push_str(line.as_ref());
    }
    joined
}
