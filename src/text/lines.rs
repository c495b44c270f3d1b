//! Hard-line segmentation
//!
//! Splits text at `'\n'` into per-line spans of character offsets. The
//! newline itself belongs to no line.

use crate::models::Span;

/// Character spans of each `'\n'`-separated line, in reading order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardLines {
    spans: Vec<Span>,
}

impl HardLines {
    pub fn split(chars: &[char]) -> Self {
        let mut spans = Vec::new();
        let mut begin = 0;

        for (i, c) in chars.iter().enumerate() {
            if *c == '\n' {
                spans.push(Span::new(begin, i));
                begin = i + 1;
            }
        }
        spans.push(Span::new(begin, chars.len()));

        Self { spans }
    }

    pub fn iter(&self) -> impl Iterator<Item = Span> + '_ {
        self.spans.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> HardLines {
        HardLines::split(&text.chars().collect::<Vec<_>>())
    }

    #[test]
    fn test_split_lines() {
        let split = lines("ab\ncd\n\nef");
        let spans: Vec<Span> = split.iter().collect();
        assert_eq!(
            spans,
            vec![Span::new(0, 2), Span::new(3, 5), Span::new(6, 6), Span::new(7, 9)]
        );
    }

    #[test]
    fn test_empty_text_has_one_line() {
        assert_eq!(lines("").iter().collect::<Vec<_>>(), vec![Span::new(0, 0)]);
    }
}
