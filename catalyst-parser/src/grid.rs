use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};

use crate::{CellState, DayCell, Event, Grid, TooltipStyle};

/// Years offered by the dashboard when no event says otherwise.
pub const BASE_YEARS: RangeInclusive<i32> = 2023..=2040;

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Lays out every day of `year` on a week-by-weekday grid and highlights
/// the days that carry an event.
///
/// Events outside `year` are ignored. When several events share a date the
/// first one wins the cell.
pub fn build_grid(year: i32, events: &[Event], tooltips: TooltipStyle) -> Grid {
    let cells = (1..=days_in_year(year))
        .filter_map(|ordinal| NaiveDate::from_yo_opt(year, ordinal))
        .map(|date| {
            let (state, tooltip) = match events.iter().find(|event| event.date == date) {
                Some(event) => (CellState::Highlighted, event.label.clone()),
                None => (CellState::Empty, empty_tooltip(date, tooltips)),
            };

            DayCell {
                date,
                week_index: (date.ordinal() - 1) / 7,
                day_of_week: date.weekday().num_days_from_monday(),
                state,
                tooltip,
            }
        })
        .collect();

    Grid { year, cells }
}

fn empty_tooltip(date: NaiveDate, tooltips: TooltipStyle) -> String {
    match tooltips {
        TooltipStyle::Verbose => date.format("%d %b %Y").to_string(),
        TooltipStyle::Sparse => String::new(),
    }
}

impl Grid {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    pub fn highlighted(&self) -> impl Iterator<Item = &DayCell> {
        self.cells
            .iter()
            .filter(|cell| cell.state == CellState::Highlighted)
    }

    /// Number of week columns.
    pub fn weeks(&self) -> u32 {
        self.cells
            .last()
            .map_or(0, |cell| cell.week_index + 1)
    }

    pub fn cell(&self, week_index: u32, day_of_week: u32) -> Option<&DayCell> {
        self.cells
            .iter()
            .find(|cell| cell.week_index == week_index && cell.day_of_week == day_of_week)
    }
}

/// The base years plus the year of every event, sorted and deduplicated.
pub fn selectable_years(events: &[Event], base: RangeInclusive<i32>) -> Vec<i32> {
    let mut years = base
        .chain(events.iter().map(|event| event.date.year()))
        .collect::<Vec<_>>();

    years.sort_unstable();
    years.dedup();
    years
}

/// The earliest selectable event year, else the first selectable year.
pub fn default_year(events: &[Event], years: &[i32]) -> Option<i32> {
    events
        .iter()
        .map(|event| event.date.year())
        .filter(|year| years.contains(year))
        .min()
        .or_else(|| years.first().copied())
}
