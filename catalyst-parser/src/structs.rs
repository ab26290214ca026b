use chrono::NaiveDate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A dated catalyst, e.g. a patent expiry or a trial completion.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Event {
    pub date: NaiveDate,
    pub label: String,
}

impl Event {
    pub fn new<S: Into<String>>(date: NaiveDate, label: S) -> Self {
        Self {
            date,
            label: label.into(),
        }
    }

    /// Headline of the label, i.e. everything before the first line break.
    pub fn summary(&self) -> &str {
        self.label.lines().next().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CellState {
    Empty,
    Highlighted,
}

/// What an empty cell shows on hover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TooltipStyle {
    /// The formatted date, e.g. `08 Jan 2036`.
    #[default]
    Verbose,
    /// Nothing.
    Sparse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DayCell {
    pub date: NaiveDate,
    pub week_index: u32,
    /// Monday = 0 through Sunday = 6.
    pub day_of_week: u32,
    pub state: CellState,
    pub tooltip: String,
}

/// Every day of one year, in chronological order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid {
    pub(crate) year: i32,
    pub(crate) cells: Vec<DayCell>,
}
