//! Stage-direction extraction.
//!
//! Assistant messages embed expression cues between `*` markers, e.g.
//! `*blushes deeply* H-hello...`. This scans a message for every `*...*`
//! pair, left to right, non-greedy. Unmatched markers are tolerated: a
//! trailing `*` with no partner simply ends the scan.

/// One extracted stage direction, borrowed from the source message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageDirection<'a> {
    /// Text between the markers, untrimmed.
    pub text: &'a str,
    /// Byte offset of the opening `*` in the source message.
    pub start: usize,
    /// Byte offset one past the closing `*`.
    pub end: usize,
}

impl<'a> StageDirection<'a> {
    /// The direction text with surrounding whitespace removed.
    pub fn trimmed(&self) -> &'a str {
        self.text.trim()
    }
}

/// Extract every `*...*` pair from `message` in order of appearance.
///
/// A message with no markers (or a single unmatched marker) yields an
/// empty vec; this is never an error. Empty pairs (`**`) are yielded too,
/// matching non-greedy pair scanning.
pub fn extract_stage_directions(message: &str) -> Vec<StageDirection<'_>> {
    let mut out = Vec::new();
    let mut search_from = 0;

    while let Some(open_rel) = message[search_from..].find('*') {
        let open = search_from + open_rel;
        let body_start = open + 1;
        let Some(close_rel) = message[body_start..].find('*') else {
            break;
        };
        let close = body_start + close_rel;
        out.push(StageDirection {
            text: &message[body_start..close],
            start: open,
            end: close + 1,
        });
        search_from = close + 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_markers() {
        assert!(extract_stage_directions("Hello there!").is_empty());
    }

    #[test]
    fn test_single_direction() {
        let dirs = extract_stage_directions("*waves* hi");
        assert_eq!(dirs.len(), 1);
        assert_eq!(dirs[0].text, "waves");
        assert_eq!(dirs[0].start, 0);
        assert_eq!(dirs[0].end, 7);
    }

    #[test]
    fn test_multiple_directions_in_order() {
        let dirs = extract_stage_directions("*shyly smiles* Hello there! *waves*");
        let texts: Vec<_> = dirs.iter().map(|d| d.text).collect();
        assert_eq!(texts, vec!["shyly smiles", "waves"]);
    }

    #[test]
    fn test_unmatched_trailing_marker() {
        let dirs = extract_stage_directions("*smiles* and then *");
        assert_eq!(dirs.len(), 1);
        assert_eq!(dirs[0].text, "smiles");
    }

    #[test]
    fn test_lone_marker() {
        assert!(extract_stage_directions("a * b").is_empty());
    }

    #[test]
    fn test_empty_pair() {
        let dirs = extract_stage_directions("** hm");
        assert_eq!(dirs.len(), 1);
        assert_eq!(dirs[0].text, "");
    }

    #[test]
    fn test_count_matches_pairs() {
        let msg = "*a* x *b* y *c*";
        assert_eq!(extract_stage_directions(msg).len(), 3);
    }

    #[test]
    fn test_trimmed() {
        let dirs = extract_stage_directions("* blushes deeply *");
        assert_eq!(dirs[0].trimmed(), "blushes deeply");
    }

    #[test]
    fn test_multibyte_text_around_markers() {
        let dirs = extract_stage_directions("ふふ *giggles* ね");
        assert_eq!(dirs.len(), 1);
        assert_eq!(dirs[0].text, "giggles");
    }
}
