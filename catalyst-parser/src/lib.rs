mod extract;
mod grid;
mod structs;

#[cfg(feature = "ics")]
mod ics;

pub use extract::{extract_dates, extract_expiry};
pub use grid::{build_grid, days_in_year, default_year, is_leap_year, selectable_years, BASE_YEARS};
pub use structs::{CellState, DayCell, Event, Grid, TooltipStyle};

#[cfg(feature = "ics")]
pub use crate::ics::to_ics;
