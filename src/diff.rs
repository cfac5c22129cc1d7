//! Line-oriented unified diff of strings, line lists and files
//!
//! Each side of a comparison is resolved on its own: a string naming an
//! existing file is compared by the file's content, any other string by its
//! `\n`-separated lines, and a list of lines as given.

use std::ops::Range;
use std::path::PathBuf;

use similar::{DiffOp, DiffTag, TextDiff};

use crate::error::{Error, Result};
use crate::path::PathRef;

/// Header label for literal strings.
pub const TEXT_LABEL: &str = "<str>";
/// Header label for literal line lists.
pub const SEQUENCE_LABEL: &str = "<list>";

/// Number of header lines (`---`, `+++`, first `@@`) in a raw diff.
const META_LINES: usize = 3;

/// Options for [`diff`].
#[derive(Debug, Clone, Default)]
pub struct DiffOptions {
    /// Keep the `---`/`+++`/`@@` lines at the top of the result
    pub show_meta: bool,
    /// Never treat a string as a file path
    pub force_text: bool,
    /// Unchanged lines shown around each change
    pub context: usize,
}

/// Raw value handed to [`diff`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffInput {
    Text(String),
    Lines(Vec<String>),
}

impl From<&str> for DiffInput {
    fn from(s: &str) -> Self {
        DiffInput::Text(s.to_string())
    }
}

impl From<String> for DiffInput {
    fn from(s: String) -> Self {
        DiffInput::Text(s)
    }
}

impl From<&String> for DiffInput {
    fn from(s: &String) -> Self {
        DiffInput::Text(s.clone())
    }
}

impl From<Vec<String>> for DiffInput {
    fn from(lines: Vec<String>) -> Self {
        DiffInput::Lines(lines)
    }
}

impl From<Vec<&str>> for DiffInput {
    fn from(lines: Vec<&str>) -> Self {
        DiffInput::Lines(lines.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for DiffInput {
    fn from(lines: &[&str]) -> Self {
        DiffInput::Lines(lines.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for DiffInput {
    fn from(lines: [&str; N]) -> Self {
        DiffInput::Lines(lines.iter().map(|s| s.to_string()).collect())
    }
}

/// One side of a comparison after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffSide {
    /// Content of an existing file, lines keep their terminators
    FileContent { label: String, lines: Vec<String> },
    LiteralText { label: String, lines: Vec<String> },
    LiteralSequence { label: String, items: Vec<String> },
}

impl DiffSide {
    /// Resolve an input. Fails only when a file's content is not UTF-8.
    pub fn resolve(input: DiffInput, force_text: bool) -> Result<Self> {
        match input {
            DiffInput::Text(text) => {
                let as_path = PathRef::new(text.as_str());
                if !force_text && as_path.is_file() {
                    Ok(DiffSide::FileContent {
                        label: as_path.basename(),
                        lines: read_lines(as_path.absolute())?,
                    })
                } else {
                    Ok(DiffSide::LiteralText {
                        label: TEXT_LABEL.to_string(),
                        lines: text.split('\n').map(String::from).collect(),
                    })
                }
            }
            DiffInput::Lines(items) => Ok(DiffSide::LiteralSequence {
                label: SEQUENCE_LABEL.to_string(),
                items,
            }),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            DiffSide::FileContent { label, .. }
            | DiffSide::LiteralText { label, .. }
            | DiffSide::LiteralSequence { label, .. } => label,
        }
    }

    pub fn lines(&self) -> &[String] {
        match self {
            DiffSide::FileContent { lines, .. } | DiffSide::LiteralText { lines, .. } => lines,
            DiffSide::LiteralSequence { items, .. } => items,
        }
    }
}

fn read_lines(path: PathBuf) -> Result<Vec<String>> {
    let bytes = std::fs::read(&path)?;
    let text = String::from_utf8(bytes).map_err(|_| Error::Decode { path })?;
    Ok(text.split_inclusive('\n').map(String::from).collect())
}

/// Compare `a` with `b` and return the unified diff lines.
///
/// Without `show_meta` the two file headers and the first hunk header are
/// dropped. Identical inputs give an empty result either way.
///
/// ```
/// use cmdkit::{diff, DiffOptions};
///
/// let lines = diff("test1", "test2", &DiffOptions::default()).unwrap();
/// assert_eq!(lines, vec!["-test1", "+test2"]);
/// ```
pub fn diff(
    a: impl Into<DiffInput>,
    b: impl Into<DiffInput>,
    options: &DiffOptions,
) -> Result<Vec<String>> {
    let src = DiffSide::resolve(a.into(), options.force_text)?;
    let dst = DiffSide::resolve(b.into(), options.force_text)?;

    let lines = unified_diff(&src, &dst, options.context);
    if options.show_meta {
        Ok(lines)
    } else {
        Ok(lines.into_iter().skip(META_LINES).collect())
    }
}

/// Render the full unified diff of two resolved sides.
pub fn unified_diff(src: &DiffSide, dst: &DiffSide, context: usize) -> Vec<String> {
    let old: Vec<&str> = src.lines().iter().map(String::as_str).collect();
    let new: Vec<&str> = dst.lines().iter().map(String::as_str).collect();
    let text_diff = TextDiff::from_slices(old.as_slice(), new.as_slice());
    let spans = spans(text_diff.ops());

    let mut out = Vec::new();
    for (i, group) in grouped_spans(&spans, context).iter().enumerate() {
        if i == 0 {
            out.push(format!("--- {}", src.label()));
            out.push(format!("+++ {}", dst.label()));
        }
        out.push(hunk_header(group));
        for span in group {
            if span.tag == DiffTag::Equal {
                out.extend(old[span.old.clone()].iter().map(|l| body_line(' ', l)));
                continue;
            }
            out.extend(old[span.old.clone()].iter().map(|l| body_line('-', l)));
            out.extend(new[span.new.clone()].iter().map(|l| body_line('+', l)));
        }
    }
    out
}

fn body_line(marker: char, line: &str) -> String {
    format!("{}{}", marker, line.trim_end_matches('\n'))
}

/// One diff operation with positions on both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Span {
    tag: DiffTag,
    old: Range<usize>,
    new: Range<usize>,
}

/// Convert diff ops to spans. Positions are accumulated from the op lengths,
/// so an op only contributes how many lines it covers on each side.
fn spans(ops: &[DiffOp]) -> Vec<Span> {
    let (mut old_pos, mut new_pos) = (0, 0);
    ops.iter()
        .map(|op| {
            let old_len = op.old_range().len();
            let new_len = op.new_range().len();
            let span = Span {
                tag: op.tag(),
                old: old_pos..old_pos + old_len,
                new: new_pos..new_pos + new_len,
            };
            old_pos += old_len;
            new_pos += new_len;
            span
        })
        .collect()
}

/// Split spans into hunks with up to `context` unchanged lines around each
/// change. Unchanged runs longer than twice the context separate hunks.
fn grouped_spans(spans: &[Span], context: usize) -> Vec<Vec<Span>> {
    let mut spans = spans.to_vec();
    if spans.iter().all(|s| s.tag == DiffTag::Equal) {
        return Vec::new();
    }

    if let Some(first) = spans.first_mut() {
        if first.tag == DiffTag::Equal {
            first.old.start = first.old.start.max(first.old.end.saturating_sub(context));
            first.new.start = first.new.start.max(first.new.end.saturating_sub(context));
        }
    }
    if let Some(last) = spans.last_mut() {
        if last.tag == DiffTag::Equal {
            last.old.end = last.old.end.min(last.old.start + context);
            last.new.end = last.new.end.min(last.new.start + context);
        }
    }

    let mut groups = Vec::new();
    let mut group = Vec::new();
    for mut span in spans {
        if span.tag == DiffTag::Equal && span.old.len() > context * 2 {
            group.push(Span {
                tag: DiffTag::Equal,
                old: span.old.start..span.old.end.min(span.old.start + context),
                new: span.new.start..span.new.end.min(span.new.start + context),
            });
            groups.push(std::mem::take(&mut group));
            span.old.start = span.old.start.max(span.old.end.saturating_sub(context));
            span.new.start = span.new.start.max(span.new.end.saturating_sub(context));
        }
        group.push(span);
    }
    groups.push(group);
    groups.retain(|g| g.iter().any(|s| s.tag != DiffTag::Equal));
    groups
}

fn hunk_header(group: &[Span]) -> String {
    let old_start = group.first().map_or(0, |s| s.old.start);
    let new_start = group.first().map_or(0, |s| s.new.start);
    let old_len: usize = group.iter().map(|s| s.old.len()).sum();
    let new_len: usize = group.iter().map(|s| s.new.len()).sum();
    format!(
        "@@ -{} +{} @@",
        format_range(old_start, old_len),
        format_range(new_start, new_len)
    )
}

/// Hunk range in unified format: `start` alone for one line, `start,len`
/// otherwise, and the line before the hunk for an empty range.
fn format_range(start: usize, len: usize) -> String {
    match len {
        0 => format!("{},0", start),
        1 => format!("{}", start + 1),
        _ => format!("{},{}", start + 1, len),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn opts(show_meta: bool, force_text: bool, context: usize) -> DiffOptions {
        DiffOptions {
            show_meta,
            force_text,
            context,
        }
    }

    #[test]
    fn test_diff_same() {
        assert!(diff("test", "test", &DiffOptions::default()).unwrap().is_empty());
        assert!(diff("test", "test", &opts(true, false, 3)).unwrap().is_empty());
        assert!(diff(["a", "b"], ["a", "b"], &opts(true, false, 0)).unwrap().is_empty());
    }

    #[test]
    fn test_diff_str() {
        let d = diff("test1", "test2", &DiffOptions::default()).unwrap();
        assert_eq!(d, vec!["-test1", "+test2"]);
    }

    #[test]
    fn test_diff_meta() {
        let d = diff("test1", "test2", &opts(true, false, 0)).unwrap();
        assert_eq!(
            d,
            vec!["--- <str>", "+++ <str>", "@@ -1 +1 @@", "-test1", "+test2"]
        );
    }

    #[test]
    fn test_meta_adds_exactly_three_leading_lines() {
        let a = "one\ntwo\nthree\nfour";
        let b = "one\n2\nthree\nfour\nfive";
        let with = diff(a, b, &opts(true, false, 1)).unwrap();
        let without = diff(a, b, &opts(false, false, 1)).unwrap();
        assert_eq!(with.len(), without.len() + 3);
        assert_eq!(&with[3..], &without[..]);
        assert!(with[0].starts_with("--- "));
        assert!(with[1].starts_with("+++ "));
        assert!(with[2].starts_with("@@ "));
    }

    #[test]
    fn test_diff_list() {
        let d = diff(["a", "c"], ["b", "c"], &DiffOptions::default()).unwrap();
        assert_eq!(d, vec!["-a", "+b"]);
    }

    #[test]
    fn test_diff_context() {
        let d = diff(vec!["a", "c"], vec!["b", "c"], &opts(false, false, 1)).unwrap();
        assert_eq!(d, vec!["-a", "+b", " c"]);
    }

    #[test]
    fn test_list_label() {
        let d = diff(vec!["a"], vec!["b"], &opts(true, false, 0)).unwrap();
        assert_eq!(d[0], "--- <list>");
        assert_eq!(d[1], "+++ <list>");
    }

    #[test]
    fn test_pure_insertion_range() {
        let d = diff(["a", "b"], ["a", "b", "c"], &opts(true, false, 0)).unwrap();
        assert_eq!(d[2], "@@ -2,0 +3 @@");
        assert_eq!(d[3], "+c");
    }

    #[test]
    fn test_multiple_hunks_keep_later_headers() {
        let a: Vec<String> = (0..20).map(|i| i.to_string()).collect();
        let mut b = a.clone();
        b[1] = "x".to_string();
        b[18] = "y".to_string();
        let d = diff(a, b, &DiffOptions::default()).unwrap();
        assert_eq!(d, vec!["-1", "+x", "@@ -19 +19 @@", "-18", "+y"]);
    }

    #[test]
    fn test_diff_file_against_text() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("testfile");
        fs::write(&file, "This file should not changed\n").unwrap();

        let d = diff(
            file.to_str().unwrap(),
            "This file should not changed too",
            &opts(true, false, 0),
        )
        .unwrap();
        assert_eq!(
            d,
            vec![
                "--- testfile",
                "+++ <str>",
                "@@ -1 +1 @@",
                "-This file should not changed",
                "+This file should not changed too",
            ]
        );
    }

    #[test]
    fn test_diff_files() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("testfile");
        let b = dir.path().join("testfile2");
        fs::write(&a, "This file should not changed\n").unwrap();
        fs::write(&b, "This file should not changed too\n").unwrap();

        let d = diff(a.to_str().unwrap(), b.to_str().unwrap(), &DiffOptions::default()).unwrap();
        assert_eq!(
            d,
            vec!["-This file should not changed", "+This file should not changed too"]
        );
        assert!(diff(a.to_str().unwrap(), a.to_str().unwrap(), &DiffOptions::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_diff_force_text() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("testfile");
        let b = dir.path().join("testfile2");
        fs::write(&a, "same\n").unwrap();
        fs::write(&b, "same\n").unwrap();

        let a = a.to_str().unwrap();
        let b = b.to_str().unwrap();
        assert!(diff(a, b, &DiffOptions::default()).unwrap().is_empty());
        let d = diff(a, b, &opts(false, true, 0)).unwrap();
        assert!(d.contains(&format!("-{}", a)), "{d:?}");
    }

    #[test]
    fn test_directory_is_compared_as_text() {
        let dir = TempDir::new().unwrap();
        let side = DiffSide::resolve(dir.path().to_str().unwrap().into(), false).unwrap();
        assert_eq!(side.label(), TEXT_LABEL);
    }

    #[test]
    fn test_non_utf8_file_fails() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("binary.dat");
        fs::write(&file, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let err = diff(file.to_str().unwrap(), "text", &DiffOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }), "{err:?}");
    }

    #[test]
    fn test_file_lines_keep_terminators() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("f.txt");
        fs::write(&file, "a\nb").unwrap();
        let side = DiffSide::resolve(file.to_str().unwrap().into(), false).unwrap();
        assert_eq!(side.lines(), ["a\n".to_string(), "b".to_string()]);
        assert_eq!(side.label(), "f.txt");
    }

    /// Parse `-s,l` / `+s` into a 0-based start and a length.
    fn parse_range(range: &str) -> (usize, usize) {
        let range = &range[1..];
        match range.split_once(',') {
            Some((start, len)) => {
                let start: usize = start.parse().unwrap();
                let len: usize = len.parse().unwrap();
                if len == 0 { (start, 0) } else { (start - 1, len) }
            }
            None => (range.parse::<usize>().unwrap() - 1, 1),
        }
    }

    /// Check every hunk against both inputs: the header ranges must select
    /// exactly the lines the body shows for each side.
    fn assert_hunks_consistent(a: &[String], b: &[String], context: usize) {
        let d = diff(a.to_vec(), b.to_vec(), &opts(true, false, context)).unwrap();
        if d.is_empty() {
            assert_eq!(a, b);
            return;
        }
        let mut i = 2;
        while i < d.len() {
            let header = &d[i];
            let parts: Vec<&str> = header.split(' ').collect();
            assert_eq!(parts.len(), 4, "bad header {header:?} in {d:?}");
            let (old_start, old_len) = parse_range(parts[1]);
            let (new_start, new_len) = parse_range(parts[2]);
            i += 1;

            let mut old_side = Vec::new();
            let mut new_side = Vec::new();
            while i < d.len() && !d[i].starts_with("@@") {
                let (marker, line) = d[i].split_at(1);
                match marker {
                    " " => {
                        old_side.push(line.to_string());
                        new_side.push(line.to_string());
                    }
                    "-" => old_side.push(line.to_string()),
                    "+" => new_side.push(line.to_string()),
                    other => panic!("unexpected marker {other:?} in {d:?}"),
                }
                i += 1;
            }
            assert_eq!(old_side, a[old_start..old_start + old_len], "{header} in {d:?}");
            assert_eq!(new_side, b[new_start..new_start + new_len], "{header} in {d:?}");
        }
    }

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_header_counts_match_body_after_trailing_delete() {
        let a = lines(&["d", "c"]);
        let b = lines(&["b", "a", "d", "d", "d"]);
        let d = diff(a.clone(), b.clone(), &opts(true, false, 3)).unwrap();
        assert_eq!(d[2], "@@ -1,2 +1,5 @@");
        assert_hunks_consistent(&a, &b, 3);
    }

    #[test]
    fn test_reordered_lists_do_not_overflow() {
        let a = lines(&["d", "c", "b", "d", "d"]);
        let b = lines(&["a", "b", "b", "b"]);
        for context in 0..4 {
            assert_hunks_consistent(&a, &b, context);
        }
    }

    #[test]
    fn test_hunk_headers_match_bodies() {
        // Small xorshift generator so the cases are reproducible.
        let mut state: u32 = 0x2545_f491;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state
        };
        let alphabet = ["a", "b", "c", "d"];
        for _ in 0..400 {
            let a_len = (next() % 7) as usize;
            let b_len = (next() % 7) as usize;
            let a: Vec<String> = (0..a_len)
                .map(|_| alphabet[(next() % 4) as usize].to_string())
                .collect();
            let b: Vec<String> = (0..b_len)
                .map(|_| alphabet[(next() % 4) as usize].to_string())
                .collect();
            let context = (next() % 4) as usize;
            assert_hunks_consistent(&a, &b, context);
        }
    }

    #[test]
    fn test_hunks_split_on_long_unchanged_runs() {
        let a: Vec<String> = (0..30).map(|i| i.to_string()).collect();
        let mut b = a.clone();
        b[3] = "x".to_string();
        b.insert(20, "y".to_string());
        b.remove(27);
        for context in 0..5 {
            assert_hunks_consistent(&a, &b, context);
        }
    }

    #[test]
    fn test_format_range() {
        assert_eq!(format_range(0, 1), "1");
        assert_eq!(format_range(0, 2), "1,2");
        assert_eq!(format_range(4, 0), "4,0");
    }
}
