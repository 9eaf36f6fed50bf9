use chrono::{Days, NaiveDate};

use crate::types::{DateWindow, WindowAdjust};

impl DateWindow {
    /// Build a window, swapping the bounds if they are reversed.
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Clamp both bounds to `today`, then order them.
    ///
    /// Future dates collapse onto today; a reversed window is swapped rather
    /// than rejected.
    #[must_use]
    pub fn normalized(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Self {
        Self::new(start.min(today), end.min(today))
    }

    /// First date of the window.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last date of the window (inclusive).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Day after `end`, for upstreams with half-open ranges.
    #[must_use]
    pub fn end_exclusive(&self) -> NaiveDate {
        self.end.succ_opt().unwrap_or(self.end)
    }

    /// Apply a fallback step's adjustment.
    #[must_use]
    pub fn adjusted(self, adjust: WindowAdjust) -> Self {
        match adjust {
            WindowAdjust::AsRequested => self,
            WindowAdjust::WidenStart { days } => Self {
                start: self
                    .start
                    .checked_sub_days(Days::new(u64::from(days)))
                    .unwrap_or(NaiveDate::MIN),
                end: self.end,
            },
        }
    }

    /// True when `date` falls inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Cache-key fragment, `{start}_{end}` in ISO format.
    #[must_use]
    pub fn cache_fragment(&self) -> String {
        format!("{}_{}", self.start, self.end)
    }
}
