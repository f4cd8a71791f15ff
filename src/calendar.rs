// Availability calendar: a navigable month grid that lets the host page pick
// an available, future-or-present date. The host owns the selected date and
// the unavailable set and feeds both back in; picks are reported through the
// DateSelectionHandler seam.

use chrono::{Datelike, Local, NaiveDate};

use crate::availability::UnavailableDates;

// Day classification, in precedence order: disabled wins over selected,
// selected wins over today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayState {
    Disabled,
    Selected,
    Today,
    Open,
}

// One cell of the rendered month grid; blanks pad the first week up to the
// weekday of the 1st.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCell {
    Blank,
    Day { day: u32, state: DayState },
}

// Contract between the calendar and its host page
pub trait DateSelectionHandler {
    fn date_selected(&mut self, date: NaiveDate);
}

// The displayed month; month is 1-based like chrono
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    pub year: i32,
    pub month: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month: month.clamp(1, 12),
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    // Shift forward one calendar month, rolling December into January
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    // Shift back one calendar month, rolling January into December
    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn days_in_month(self) -> u32 {
        let next = self.next();
        next.first_day()
            .signed_duration_since(self.first_day())
            .num_days() as u32
    }

    // Sunday-based weekday offset of the 1st, i.e. the number of leading
    // blank cells in the grid
    pub fn first_weekday_offset(self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    // Date for a 1-based day number within this month
    pub fn date(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }
}

#[derive(Debug, Clone)]
pub struct Calendar {
    cursor: MonthCursor,
    today: NaiveDate,
    selected: Option<NaiveDate>,
    unavailable: UnavailableDates,
}

impl Calendar {
    pub fn new() -> Self {
        Self::with_today(Local::now().date_naive())
    }

    // Test seam: pins "today" instead of reading the clock
    pub fn with_today(today: NaiveDate) -> Self {
        Self {
            cursor: MonthCursor::of(today),
            today,
            selected: None,
            unavailable: UnavailableDates::new(),
        }
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn set_selected(&mut self, date: Option<NaiveDate>) {
        self.selected = date;
    }

    pub fn set_unavailable(&mut self, dates: UnavailableDates) {
        self.unavailable = dates;
    }

    pub fn next_month(&mut self) {
        self.cursor = self.cursor.next();
    }

    pub fn prev_month(&mut self) {
        self.cursor = self.cursor.prev();
    }

    pub fn classify(&self, date: NaiveDate) -> DayState {
        if date < self.today || self.unavailable.contains(date) {
            DayState::Disabled
        } else if self.selected == Some(date) {
            DayState::Selected
        } else if date == self.today {
            DayState::Today
        } else {
            DayState::Open
        }
    }

    // The full cell list for the displayed month: leading blanks for the
    // weekday offset, then one cell per day.
    pub fn grid(&self) -> Vec<DayCell> {
        let offset = self.cursor.first_weekday_offset();
        let days = self.cursor.days_in_month();

        let mut cells = Vec::with_capacity((offset + days) as usize);
        cells.extend(std::iter::repeat(DayCell::Blank).take(offset as usize));

        for day in 1..=days {
            let state = self
                .cursor
                .date(day)
                .map_or(DayState::Disabled, |d| self.classify(d));
            cells.push(DayCell::Day { day, state });
        }
        cells
    }

    // Picks a day from the displayed month. Disabled days are a silent
    // no-op, mirroring the page behaviour: nothing is signaled, the
    // selection simply does not change.
    pub fn select_day(&mut self, day: u32) -> Option<NaiveDate> {
        let date = self.cursor.date(day)?;
        if self.classify(date) == DayState::Disabled {
            return None;
        }

        self.selected = Some(date);
        Some(date)
    }

    // Same as select_day, but reports the pick to the host. Returns whether
    // the handler was invoked.
    pub fn select_day_with(
        &mut self,
        day: u32,
        handler: &mut dyn DateSelectionHandler,
    ) -> bool {
        match self.select_day(day) {
            Some(date) => {
                handler.date_selected(date);
                true
            }
            None => false,
        }
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new()
    }
}
