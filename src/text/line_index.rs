//! Sorted table of line-start offsets, patched in place on every edit.
//!
//! Only `'\n'` separates lines. `starts[0] == 0` always holds, and every other
//! entry sits one past a `'\n'` in the document.

/// Incrementally maintained line-start table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl Default for LineIndex {
    fn default() -> Self {
        Self { starts: vec![0] }
    }
}

impl LineIndex {
    /// Index for an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table by scanning chars for `'\n'`.
    pub fn from_chars<I>(chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let mut starts = vec![0];
        starts.extend(
            chars
                .into_iter()
                .enumerate()
                .filter(|&(_, ch)| ch == '\n')
                .map(|(idx, _)| idx + 1),
        );
        Self { starts }
    }

    /// Number of lines (newline count + 1).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Raw table.
    #[must_use]
    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    /// Start offset of `line`, clamped to the last line.
    #[must_use]
    pub fn line_start(&self, line: usize) -> usize {
        self.starts[line.min(self.starts.len() - 1)]
    }

    /// Half-open char range of `line` without its separator.
    ///
    /// `doc_len` bounds the last line. Lines past the end clamp to the last.
    #[must_use]
    pub fn line_span(&self, line: usize, doc_len: usize) -> (usize, usize) {
        let line = line.min(self.starts.len() - 1);
        let start = self.starts[line];
        let end = self
            .starts
            .get(line + 1)
            .map_or(doc_len, |next| next.saturating_sub(1));
        (start, end.max(start))
    }

    /// Line containing `offset` (upper-bound binary search).
    #[must_use]
    pub fn line_of(&self, offset: usize) -> usize {
        self.starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1)
    }

    /// Patch the table after `text` (of `len` chars) was inserted at `index`.
    pub fn on_insert(&mut self, index: usize, text: &str, len: usize) {
        if len == 0 {
            return;
        }
        let first_after = self.starts.partition_point(|&start| start <= index);
        for start in &mut self.starts[first_after..] {
            *start += len;
        }
        // Every new start lands in (index, index + len], i.e. before the
        // shifted tail, so a single splice at the cursor keeps order.
        let new_starts = text
            .chars()
            .enumerate()
            .filter(|&(_, ch)| ch == '\n')
            .map(|(k, _)| index + k + 1);
        self.starts.splice(first_after..first_after, new_starts);
    }

    /// Patch the table after `length` chars were removed at `index`.
    pub fn on_remove(&mut self, index: usize, length: usize) {
        if length == 0 {
            return;
        }
        let end = index + length;
        let lo = self.starts.partition_point(|&start| start <= index);
        let hi = self.starts.partition_point(|&start| start <= end);
        self.starts.drain(lo..hi);
        for start in &mut self.starts[lo..] {
            *start -= length;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_into_empty() {
        let mut index = LineIndex::new();
        index.on_insert(0, "hello\nworld", 11);
        assert_eq!(index.starts(), &[0, 6]);
        assert_eq!(index.line_span(0, 11), (0, 5));
        assert_eq!(index.line_span(1, 11), (6, 11));
    }

    #[test]
    fn test_insert_multiple_newlines_in_order() {
        let mut index = LineIndex::from_chars("ab\ncd".chars());
        // "a" + "1\n2\n3\n" + "b\ncd"
        index.on_insert(1, "1\n2\n3\n", 6);
        assert_eq!(index, LineIndex::from_chars("a1\n2\n3\nb\ncd".chars()));
    }

    #[test]
    fn test_insert_at_line_start_keeps_start() {
        let mut index = LineIndex::from_chars("hello\nworld".chars());
        index.on_insert(6, "x\n", 2);
        assert_eq!(index.starts(), &[0, 6, 8]);
    }

    #[test]
    fn test_remove_single_newline_merges_lines() {
        // "ab\ncd\nef" -> remove "\n" at 2 -> "abcd\nef"
        let mut index = LineIndex::from_chars("ab\ncd\nef".chars());
        assert_eq!(index.starts(), &[0, 3, 6]);
        index.on_remove(2, 1);
        assert_eq!(index.starts(), &[0, 5]);
    }

    #[test]
    fn test_remove_across_lines() {
        let text = "one\ntwo\nthree\nfour";
        let mut index = LineIndex::from_chars(text.chars());
        index.on_remove(2, 8);
        let expected: String = text.chars().take(2).chain(text.chars().skip(10)).collect();
        assert_eq!(index, LineIndex::from_chars(expected.chars()));
    }

    #[test]
    fn test_line_of_upper_bound() {
        let index = LineIndex::from_chars("ab\n\ncd".chars());
        assert_eq!(index.line_of(0), 0);
        assert_eq!(index.line_of(2), 0);
        assert_eq!(index.line_of(3), 1);
        assert_eq!(index.line_of(4), 2);
        assert_eq!(index.line_of(100), 2);
    }

    #[test]
    fn test_empty_line_span() {
        let index = LineIndex::from_chars("ab\n\ncd".chars());
        assert_eq!(index.line_span(1, 6), (3, 3));
        assert_eq!(index.line_span(9, 6), (4, 6));
    }
}
