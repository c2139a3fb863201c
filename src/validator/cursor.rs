use unicode_segmentation::UnicodeSegmentation;

use super::types::Position;

/// Scan cursor over the extended grapheme clusters of the input.
pub(crate) struct Cursor<'a> {
    clusters: Vec<&'a str>,
    index: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            clusters: input.graphemes(true).collect(),
            index: 0,
        }
    }

    /// Number of clusters in the whole input.
    pub(crate) fn len(&self) -> usize {
        self.clusters.len()
    }

    pub(crate) fn current(&self) -> Option<&'a str> {
        self.peek(0)
    }

    /// Cluster `offset` places ahead of the current one.
    pub(crate) fn peek(&self, offset: usize) -> Option<&'a str> {
        self.clusters.get(self.index + offset).copied()
    }

    pub(crate) fn current_is(&self, cluster: &str) -> bool {
        self.current() == Some(cluster)
    }

    pub(crate) fn advance(&mut self) {
        if self.index < self.clusters.len() {
            self.index += 1;
        }
    }

    pub(crate) fn advance_by(&mut self, count: usize) {
        self.index = (self.index + count).min(self.clusters.len());
    }

    pub(crate) fn position(&self) -> Position {
        Position::new(self.index)
    }

    pub(crate) fn at_end(&self) -> bool {
        self.index >= self.clusters.len()
    }

    /// Whether `cluster` occurs at or after the current position.
    pub(crate) fn is_ahead(&self, cluster: &str) -> bool {
        self.clusters[self.index..].iter().any(|c| *c == cluster)
    }

    /// Whether the upcoming clusters spell `tag`, ignoring ASCII case.
    pub(crate) fn lookahead_eq_ignore_ascii_case(&self, tag: &str) -> bool {
        tag.chars().enumerate().all(|(offset, expected)| {
            self.peek(offset).is_some_and(|cluster| {
                let mut chars = cluster.chars();
                matches!(
                    (chars.next(), chars.next()),
                    (Some(c), None) if c.eq_ignore_ascii_case(&expected)
                )
            })
        })
    }
}
