//! Descriptions of how a single edit moves document positions around.

/// Which side of a replaced range a position sticks to when it sits right
/// at its boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    Before,
    After,
}

/// One replaced range. `new_from` and `new_to` already account for the
/// earlier ranges of the same map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplacedRange {
    pub old_from: usize,
    pub old_to: usize,
    pub new_from: usize,
    pub new_to: usize,
}

impl ReplacedRange {
    #[must_use]
    pub fn old_len(&self) -> usize { self.old_to - self.old_from }

    #[must_use]
    pub fn new_len(&self) -> usize { self.new_to - self.new_from }
}

/// The effect of a single edit on document positions.
pub trait PositionMap {
    /// The replaced ranges in ascending order.
    fn ranges(&self) -> Vec<ReplacedRange>;

    /// Maps a position of the old document to the new one.
    fn map(&self, pos: usize, bias: Bias) -> usize;

    /// The map going from the new document back to the old one.
    #[must_use]
    fn invert(&self) -> Self
    where
        Self: Sized;

    /// Range whose content was restyled without changing size, for edits
    /// that replace nothing (adding a mark, changing node attributes).
    fn restyled_range(&self) -> Option<(usize, usize)> { None }
}

/// Position map stored as `(start, old_size, new_size)` triples, with
/// `start` in old-document coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepMap {
    ranges: Vec<(usize, usize, usize)>,
    restyled: Option<(usize, usize)>,
}

impl StepMap {
    /// # Panics
    ///
    /// If the ranges overlap or are not in ascending order.
    #[must_use]
    pub fn new(ranges: Vec<(usize, usize, usize)>) -> Self {
        assert!(
            ranges
                .windows(2)
                .all(|pair| pair[0].0 + pair[0].1 <= pair[1].0),
            "Step map ranges must be ascending and must not overlap"
        );
        Self {
            ranges,
            restyled: None,
        }
    }

    /// A map replacing `from..to` of the old document with `size` positions.
    #[must_use]
    pub fn replace(from: usize, to: usize, size: usize) -> Self {
        Self::new(vec![(from, to - from, size)])
    }

    /// A map for an edit that keeps every position but changes the styling
    /// of `from..to`.
    #[must_use]
    pub fn restyle(from: usize, to: usize) -> Self {
        Self {
            ranges: Vec::new(),
            restyled: Some((from, to)),
        }
    }

    #[must_use]
    pub fn empty() -> Self { Self::default() }
}

impl PositionMap for StepMap {
    fn ranges(&self) -> Vec<ReplacedRange> {
        let mut new_start = 0;
        let mut old_end = 0;
        self.ranges
            .iter()
            .map(|&(start, old_size, new_size)| {
                new_start += start - old_end;
                let range = ReplacedRange {
                    old_from: start,
                    old_to: start + old_size,
                    new_from: new_start,
                    new_to: new_start + new_size,
                };
                new_start += new_size;
                old_end = start + old_size;
                range
            })
            .collect()
    }

    fn map(&self, pos: usize, bias: Bias) -> usize {
        let mut new_offset = 0;
        let mut old_end = 0;
        for &(start, old_size, new_size) in &self.ranges {
            if start > pos {
                break;
            }
            new_offset += start - old_end;
            let end = start + old_size;
            if pos <= end {
                let side = if old_size == 0 {
                    bias
                } else if pos == start {
                    Bias::Before
                } else if pos == end {
                    Bias::After
                } else {
                    bias
                };
                return match side {
                    Bias::Before => new_offset,
                    Bias::After => new_offset + new_size,
                };
            }
            new_offset += new_size;
            old_end = end;
        }
        new_offset + (pos - old_end)
    }

    fn invert(&self) -> Self {
        Self {
            ranges: self
                .ranges()
                .into_iter()
                .map(|range| (range.new_from, range.new_len(), range.old_len()))
                .collect(),
            restyled: self.restyled,
        }
    }

    fn restyled_range(&self) -> Option<(usize, usize)> { self.restyled }
}

/// A sequence of position maps applied one after the other.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mapping {
    maps: Vec<StepMap>,
}

impl Mapping {
    #[must_use]
    pub fn new(maps: Vec<StepMap>) -> Self { Self { maps } }

    pub fn push(&mut self, map: StepMap) { self.maps.push(map); }

    #[must_use]
    pub fn maps(&self) -> &[StepMap] { &self.maps }

    #[must_use]
    pub fn map(&self, pos: usize, bias: Bias) -> usize {
        self.maps.iter().fold(pos, |pos, map| map.map(pos, bias))
    }
}
