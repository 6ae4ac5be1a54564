//! Configuration block chunker.
//!
//! Splits a long list of configuration lines into chunks of at least `step`
//! lines without cutting a configuration block in half. A block ends on a
//! sentinel line: the block delimiter (`!` in IOS-style configs) or a blank
//! line. Chunks are produced lazily and borrow from the input.

use log::{debug, info};
use std::fs;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

/// Default block delimiter for IOS-style configurations
pub const DEFAULT_DELIMITER: &str = "!";

/// Errors that can occur while chunking configuration text
#[derive(Debug, thiserror::Error)]
pub enum ChunkError {
    #[error("Invalid step {0}: chunk size must be at least 1 line")]
    InvalidStep(usize),

    #[error("Invalid delimiter: delimiter cannot be empty")]
    EmptyDelimiter,

    #[error("Failed to write chunk file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Strip exactly one trailing line ending (`\r\n`, `\n` or `\r`)
fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .or_else(|| line.strip_suffix('\r'))
        .unwrap_or(line)
}

/// Check if a line marks a safe chunk boundary.
///
/// A sentinel is the delimiter on its own or a blank line, each optionally
/// followed by a single `\n`, `\r` or `\r\n`.
///
/// # Examples
/// ```
/// use libbart::chunker::is_sentinel;
///
/// assert!(is_sentinel("!\r\n", "!"));
/// assert!(is_sentinel("\n", "!"));
/// assert!(!is_sentinel(" !\n", "!"));
/// assert!(!is_sentinel("interface Gi0/1\n", "!"));
/// ```
pub fn is_sentinel(line: &str, delimiter: &str) -> bool {
    let body = strip_line_ending(line);
    body.is_empty() || body == delimiter
}

/// Split text into lines, keeping each line's ending.
///
/// `"a\r\nb\n"` becomes `["a\r\n", "b\n"]`, the same shape a line-by-line
/// file read produces.
pub fn split_lines_inclusive(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..=i]);
                start = i + 1;
            }
            b'\r' => {
                // Lone \r ends a line, \r\n is consumed as one ending
                if i + 1 < bytes.len() && bytes[i + 1] == b'\n' {
                    i += 1;
                }
                lines.push(&text[start..=i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Chunker settings: target chunk size and block delimiter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigChunker {
    step: usize,
    delimiter: String,
}

impl ConfigChunker {
    /// Create a chunker producing chunks of at least `step` lines
    pub fn new(step: usize) -> Result<Self, ChunkError> {
        if step == 0 {
            return Err(ChunkError::InvalidStep(step));
        }
        Ok(Self {
            step,
            delimiter: DEFAULT_DELIMITER.to_string(),
        })
    }

    /// Use a different block delimiter
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Result<Self, ChunkError> {
        let delimiter = delimiter.into();
        if delimiter.is_empty() {
            return Err(ChunkError::EmptyDelimiter);
        }
        self.delimiter = delimiter;
        Ok(self)
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Lazily split `lines` into block-aligned chunks
    pub fn chunks<'a, S: AsRef<str>>(&'a self, lines: &'a [S]) -> ConfigChunks<'a, S> {
        ConfigChunks {
            lines,
            step: self.step,
            delimiter: &self.delimiter,
            start: 0,
            overflow: 0,
        }
    }
}

/// Iterator over block-aligned chunks of a line slice.
///
/// Each chunk holds at least `step` lines, except the last one, and every
/// chunk but the last ends on a sentinel line. The cursor only moves
/// forward, so a pass over `n` lines does `O(n)` work.
#[derive(Debug, Clone)]
pub struct ConfigChunks<'a, S> {
    lines: &'a [S],
    step: usize,
    delimiter: &'a str,
    start: usize,
    overflow: usize,
}

impl<'a, S: AsRef<str>> ConfigChunks<'a, S> {
    /// Lines consumed past `step` by the most recent chunk
    pub fn overflow(&self) -> usize {
        self.overflow
    }

    /// Offset of the first line of the next chunk
    pub fn position(&self) -> usize {
        self.start
    }
}

impl<'a, S: AsRef<str>> Iterator for ConfigChunks<'a, S> {
    type Item = &'a [S];

    fn next(&mut self) -> Option<Self::Item> {
        let total = self.lines.len();
        if self.start >= total {
            return None;
        }

        let start = self.start;
        let naive_end = start.saturating_add(self.step);

        // Last window: emit the remainder as-is
        if naive_end >= total {
            debug!("start={}, overflow={}, emitting final {} line(s)", start, self.overflow, total - start);
            self.overflow = 0;
            self.start = total;
            return Some(&self.lines[start..]);
        }

        let mut end = naive_end;
        while end < total && !is_sentinel(self.lines[end - 1].as_ref(), self.delimiter) {
            end += 1;
        }

        self.overflow = end - naive_end;
        self.start = end;
        debug!("start={}, overflow={}, chunk ends at line {}", start, self.overflow, end);

        Some(&self.lines[start..end])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.lines.len() - self.start;
        if remaining == 0 {
            (0, Some(0))
        } else {
            (1, Some(remaining.div_ceil(self.step)))
        }
    }
}

impl<'a, S: AsRef<str>> FusedIterator for ConfigChunks<'a, S> {}

/// Generator-style entry point with the default `!` delimiter.
///
/// # Examples
/// ```
/// use libbart::chunker::conf_range_gen;
///
/// let lines = ["a", "!", "b", "c", "!", "d"];
/// let chunks: Vec<_> = conf_range_gen(&lines, 1)?.collect();
/// assert_eq!(chunks[0], ["a", "!"]);
/// assert_eq!(chunks.concat(), lines);
/// # Ok::<(), libbart::chunker::ChunkError>(())
/// ```
pub fn conf_range_gen<S: AsRef<str>>(lines: &[S], step: usize) -> Result<ConfigChunks<'_, S>, ChunkError> {
    if step == 0 {
        return Err(ChunkError::InvalidStep(step));
    }
    Ok(ConfigChunks {
        lines,
        step,
        delimiter: DEFAULT_DELIMITER,
        start: 0,
        overflow: 0,
    })
}

/// Chunk a configuration text and write every chunk to its own file.
///
/// Files are named `{prefix}_{n:03}.txt` (1-based) inside `output_dir`,
/// which is created if missing. Returns the written paths in order.
pub fn write_chunks(
    chunker: &ConfigChunker,
    text: &str,
    output_dir: &Path,
    prefix: &str,
) -> Result<Vec<PathBuf>, ChunkError> {
    fs::create_dir_all(output_dir).map_err(|source| ChunkError::Write {
        path: output_dir.display().to_string(),
        source,
    })?;

    let lines = split_lines_inclusive(text);
    let mut written = Vec::new();

    for (index, chunk) in chunker.chunks(&lines).enumerate() {
        let path = output_dir.join(format!("{}_{:03}.txt", prefix, index + 1));
        fs::write(&path, chunk.concat()).map_err(|source| ChunkError::Write {
            path: path.display().to_string(),
            source,
        })?;
        debug!("Wrote {} line(s) to {:?}", chunk.len(), path);
        written.push(path);
    }

    info!("Split {} line(s) into {} chunk file(s) in {:?}", lines.len(), written.len(), output_dir);
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn collect<'a>(lines: &'a [&'a str], step: usize) -> Vec<&'a [&'a str]> {
        conf_range_gen(lines, step).unwrap().collect()
    }

    #[test]
    fn test_sentinel_forms() {
        for line in ["!", "!\n", "!\r", "!\r\n", "", "\n", "\r", "\r\n"] {
            assert!(is_sentinel(line, "!"), "{:?} should be a sentinel", line);
        }
        for line in ["!!", " !", "! \n", "!\n\n", "interface Gi0/1", "x\n"] {
            assert!(!is_sentinel(line, "!"), "{:?} should not be a sentinel", line);
        }
    }

    #[test]
    fn test_feed_then_return_is_not_a_sentinel() {
        assert!(!is_sentinel("\n\r", "!"));
    }

    #[test]
    fn test_custom_delimiter() {
        assert!(is_sentinel("#\n", "#"));
        assert!(!is_sentinel("!\n", "#"));
    }

    #[test]
    fn test_empty_input() {
        let lines: [&str; 0] = [];
        assert!(collect(&lines, 3).is_empty());
    }

    #[test]
    fn test_step_larger_than_input() {
        let lines = ["a", "b", "c", "d", "e"];
        let chunks = collect(&lines, 10);
        assert_eq!(chunks, vec![&lines[..]]);
    }

    #[test]
    fn test_step_equal_to_input() {
        let lines = ["a", "b", "c"];
        assert_eq!(collect(&lines, 3), vec![&lines[..]]);
    }

    #[test]
    fn test_extends_to_next_sentinel() {
        let lines = ["a", "!", "b", "c", "!", "d"];
        let chunks = collect(&lines, 1);
        assert_eq!(chunks, vec![&["a", "!"][..], &["b", "c", "!"][..], &["d"][..]]);
    }

    #[test]
    fn test_single_line_chunks_on_sentinels() {
        let lines = ["!", "!", "!", "x"];
        let chunks = collect(&lines, 1);
        assert_eq!(chunks, vec![&["!"][..], &["!"][..], &["!"][..], &["x"][..]]);
    }

    #[test]
    fn test_no_sentinel_terminates() {
        let lines = ["a", "b", "c", "d", "e"];
        let chunks = collect(&lines, 2);
        assert_eq!(chunks, vec![&lines[..]]);
    }

    #[test]
    fn test_overflow_tracking() {
        let lines = ["a", "b", "c", "!", "d", "e", "f"];
        let mut iter = conf_range_gen(&lines, 2).unwrap();
        assert_eq!(iter.next().unwrap(), ["a", "b", "c", "!"]);
        assert_eq!(iter.overflow(), 2);
        assert_eq!(iter.position(), 4);
        assert_eq!(iter.next().unwrap(), ["d", "e", "f"]);
        assert_eq!(iter.overflow(), 1);
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_zero_step_rejected() {
        let lines = ["a"];
        assert!(matches!(conf_range_gen(&lines, 0), Err(ChunkError::InvalidStep(0))));
        assert!(matches!(ConfigChunker::new(0), Err(ChunkError::InvalidStep(0))));
    }

    #[test]
    fn test_empty_delimiter_rejected() {
        let chunker = ConfigChunker::new(2).unwrap();
        assert!(matches!(chunker.with_delimiter(""), Err(ChunkError::EmptyDelimiter)));
    }

    #[test]
    fn test_blank_lines_split_blocks() {
        let text = "router bgp 65000\n neighbor 1.1.1.1\n\ninterface lo0\n ip address 10.0.0.1\n\n";
        let lines = split_lines_inclusive(text);
        let chunker = ConfigChunker::new(1).unwrap();
        let chunks: Vec<_> = chunker.chunks(&lines).collect();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].concat(), "router bgp 65000\n neighbor 1.1.1.1\n\n");
        assert_eq!(chunks[1].concat(), "interface lo0\n ip address 10.0.0.1\n\n");
    }

    #[test]
    fn test_split_lines_inclusive() {
        assert_eq!(split_lines_inclusive("a\r\nb\nc\rd"), vec!["a\r\n", "b\n", "c\r", "d"]);
        assert_eq!(split_lines_inclusive("\n\n"), vec!["\n", "\n"]);
        assert!(split_lines_inclusive("").is_empty());
    }

    #[test]
    fn test_write_chunks() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("chunks");
        let text = "hostname r1\n!\ninterface lo0\n shutdown\n!\nend\n";
        let chunker = ConfigChunker::new(2).unwrap();

        let paths = write_chunks(&chunker, text, &out, "r1").unwrap();

        assert_eq!(paths.len(), 3);
        assert!(paths[0].ends_with("r1_001.txt"));
        let joined: String = paths.iter().map(|p| fs::read_to_string(p).unwrap()).collect();
        assert_eq!(joined, text);
        assert_eq!(fs::read_to_string(&paths[0]).unwrap(), "hostname r1\n!\n");
        assert_eq!(fs::read_to_string(&paths[2]).unwrap(), "end\n");
    }
}
