pub mod bubble_sorter;
pub mod insertion_sorter;
pub mod merge_sorter;
pub mod selection_sorter;

pub use bubble_sorter::BubbleSorter;
pub use insertion_sorter::InsertionSorter;
pub use merge_sorter::MergeSorter;
pub use selection_sorter::SelectionSorter;

use std::{fmt, str::FromStr};

use anyhow::bail;

use super::Sorter;

/// The algorithms a session can pick from, in the order a dropdown lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum SortKind {
    #[default]
    Bubble,
    Insertion,
    Merge,
    Selection,
}

impl SortKind {
    pub const ALL: [SortKind; 4] = [
        SortKind::Bubble,
        SortKind::Insertion,
        SortKind::Merge,
        SortKind::Selection,
    ];

    /// The label shown to users, e.g. `"Merge Sort"`.
    pub fn name(self) -> &'static str {
        match self {
            SortKind::Bubble => "Bubble Sort",
            SortKind::Insertion => "Insertion Sort",
            SortKind::Merge => "Merge Sort",
            SortKind::Selection => "Selection Sort",
        }
    }

    pub fn sorter(self) -> &'static dyn Sorter {
        match self {
            SortKind::Bubble => &BubbleSorter,
            SortKind::Insertion => &InsertionSorter,
            SortKind::Merge => &MergeSorter,
            SortKind::Selection => &SelectionSorter,
        }
    }
}

impl fmt::Display for SortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts either the label (`"Insertion Sort"`) or the short name (`"insertion"`), ignoring
/// case.
impl FromStr for SortKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        for kind in SortKind::ALL {
            let short = kind.name().trim_end_matches(" Sort");
            if wanted.eq_ignore_ascii_case(kind.name()) || wanted.eq_ignore_ascii_case(short) {
                return Ok(kind);
            }
        }
        bail!("unknown sorting algorithm: {s:?}")
    }
}
