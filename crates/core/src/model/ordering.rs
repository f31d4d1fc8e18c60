//! One-shot list preparation applied before a scheduler is built.
//!
//! Both steps are pure functions over the parsed list so the scheduler itself
//! stays deterministic.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::settings::SettingsError;

/// Default reach of a local shuffle.
pub const DEFAULT_LOCAL_WINDOW: usize = 5;

//
// ─── SEGMENT ───────────────────────────────────────────────────────────────────
//

/// Which part of a list to drill.
///
/// Ranges are half-open and clamped to the list length when applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Segment {
    #[default]
    All,
    Ranges(Vec<Range<usize>>),
}

impl Segment {
    /// Single `[start, end)` selection.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidSegment` if `start > end`.
    pub fn single(start: usize, end: usize) -> Result<Self, SettingsError> {
        Self::multi([start..end])
    }

    /// Several ranges, concatenated in the given order.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidSegment` for any reversed range.
    pub fn multi(ranges: impl IntoIterator<Item = Range<usize>>) -> Result<Self, SettingsError> {
        let ranges: Vec<_> = ranges.into_iter().collect();
        if let Some(bad) = ranges.iter().find(|r| r.start > r.end) {
            return Err(SettingsError::InvalidSegment {
                start: bad.start,
                end: bad.end,
            });
        }
        Ok(Self::Ranges(ranges))
    }

    /// Copies the selected items out of `items`, preserving order.
    #[must_use]
    pub fn select<T: Clone>(&self, items: &[T]) -> Vec<T> {
        match self {
            Segment::All => items.to_vec(),
            Segment::Ranges(ranges) => ranges
                .iter()
                .flat_map(|r| {
                    let end = r.end.min(items.len());
                    let start = r.start.min(end);
                    items[start..end].iter().cloned()
                })
                .collect(),
        }
    }
}

/// Parses `all`, `10-20` or `0-10,40-50`.
impl FromStr for Segment {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(Segment::All);
        }

        let parse_bound = |raw: &str| {
            raw.trim()
                .parse::<usize>()
                .map_err(|_| SettingsError::UnparsableSegment(s.to_owned()))
        };

        let mut ranges = Vec::new();
        for part in s.split(',') {
            let (start, end) = part
                .split_once('-')
                .ok_or_else(|| SettingsError::UnparsableSegment(s.to_owned()))?;
            ranges.push(parse_bound(start)?..parse_bound(end)?);
        }
        Self::multi(ranges)
    }
}

//
// ─── REORDER ───────────────────────────────────────────────────────────────────
//

/// How the selected items are reordered before drilling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reorder {
    #[default]
    None,
    Shuffle,
    /// Each output slot is filled from the next `window` remaining items,
    /// so no item moves earlier by more than `window - 1` places.
    Local { window: usize },
}

impl Reorder {
    #[must_use]
    pub fn local() -> Self {
        Reorder::Local {
            window: DEFAULT_LOCAL_WINDOW,
        }
    }

    pub fn apply<T, R: Rng>(self, mut items: Vec<T>, rng: &mut R) -> Vec<T> {
        match self {
            Reorder::None => items,
            Reorder::Shuffle => {
                items.as_mut_slice().shuffle(rng);
                items
            }
            Reorder::Local { window } => {
                let mut out = Vec::with_capacity(items.len());
                while !items.is_empty() {
                    let reach = window.max(1).min(items.len());
                    let pick = rng.random_range(0..reach);
                    out.push(items.remove(pick));
                }
                out
            }
        }
    }
}

impl fmt::Display for Reorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reorder::None => write!(f, "none"),
            Reorder::Shuffle => write!(f, "shuffle"),
            Reorder::Local { window } => write!(f, "local:{window}"),
        }
    }
}

/// Parses `none`, `shuffle`, `local` or `local:<window>`.
impl FromStr for Reorder {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || SettingsError::UnknownReorder(s.to_owned());
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Reorder::None),
            "shuffle" => Ok(Reorder::Shuffle),
            "local" => Ok(Reorder::local()),
            other => {
                let window = other
                    .strip_prefix("local:")
                    .and_then(|w| w.parse::<usize>().ok())
                    .ok_or_else(unknown)?;
                if window == 0 {
                    return Err(unknown());
                }
                Ok(Reorder::Local { window })
            }
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn single_segment_clamps_to_list() {
        let items: Vec<u32> = (0..10).collect();
        assert_eq!(Segment::single(8, 20).unwrap().select(&items), vec![8, 9]);
        assert!(Segment::single(30, 40).unwrap().select(&items).is_empty());
    }

    #[test]
    fn multi_segment_concatenates_in_order() {
        let items: Vec<u32> = (0..10).collect();
        let segment = Segment::multi([6..8, 1..3]).unwrap();
        assert_eq!(segment.select(&items), vec![6, 7, 1, 2]);
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = Segment::single(5, 2).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidSegment { start: 5, end: 2 }));
    }

    #[test]
    fn segment_parses_from_cli_text() {
        assert_eq!("all".parse::<Segment>().unwrap(), Segment::All);
        assert_eq!(
            "0-10, 20-25".parse::<Segment>().unwrap(),
            Segment::Ranges(vec![0..10, 20..25])
        );
        assert!(matches!(
            "3".parse::<Segment>(),
            Err(SettingsError::UnparsableSegment(_))
        ));
    }

    #[test]
    fn no_reorder_is_identity() {
        let mut rng = StdRng::seed_from_u64(1);
        let items: Vec<u32> = (0..20).collect();
        assert_eq!(Reorder::None.apply(items.clone(), &mut rng), items);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let items: Vec<u32> = (0..50).collect();
        let mut out = Reorder::Shuffle.apply(items.clone(), &mut rng);
        out.sort_unstable();
        assert_eq!(out, items);
    }

    #[test]
    fn local_shuffle_moves_items_forward_by_less_than_window() {
        let items: Vec<usize> = (0..200).collect();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = Reorder::local().apply(items.clone(), &mut rng);
            assert_eq!(out.len(), items.len());
            for (pos, original) in out.iter().enumerate() {
                assert!(pos + DEFAULT_LOCAL_WINDOW > *original);
            }
        }
    }

    #[test]
    fn reorder_parses_from_cli_text() {
        assert_eq!("Shuffle".parse::<Reorder>().unwrap(), Reorder::Shuffle);
        assert_eq!("local".parse::<Reorder>().unwrap(), Reorder::local());
        assert_eq!(
            "local:3".parse::<Reorder>().unwrap(),
            Reorder::Local { window: 3 }
        );
        assert!("local:0".parse::<Reorder>().is_err());
        assert!("sideways".parse::<Reorder>().is_err());
    }
}
