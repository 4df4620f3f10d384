//! Calendar rendering for the deadline pick.
//!
//! Renders one month as a grid of labeled buttons keyed by opaque callback
//! payloads, and parses those payloads back into calendar actions. Past
//! days render disabled; the bottom row navigates to adjacent months.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Which month the date picker currently displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarCursor {
    pub year: i32,
    pub month: u32,
}

impl CalendarCursor {
    /// Cursor for the month containing `date`.
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The previous month, wrapping January back to December.
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    /// The next month, wrapping December forward to January.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }
}

/// A parsed button-callback payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackPayload {
    /// Inert cell (header, weekday label, blank or disabled day).
    Ignore,
    /// A tapped day.
    DateSelected(NaiveDate),
    /// A tapped navigation arrow.
    MonthNavigate { year: i32, month: u32 },
}

impl CallbackPayload {
    /// Encodes to the wire form carried in button callback data.
    pub fn encode(&self) -> String {
        match self {
            Self::Ignore => "ignore".to_string(),
            Self::DateSelected(date) => format!("date_{}", date.format("%Y-%m-%d")),
            Self::MonthNavigate { year, month } => format!("month_{}_{}", year, month),
        }
    }

    /// Parses the wire form; unknown payloads yield `None`.
    pub fn parse(data: &str) -> Option<Self> {
        if data == "ignore" {
            return Some(Self::Ignore);
        }
        if let Some(rest) = data.strip_prefix("date_") {
            let date = NaiveDate::parse_from_str(rest, "%Y-%m-%d").ok()?;
            return Some(Self::DateSelected(date));
        }
        if let Some(rest) = data.strip_prefix("month_") {
            let (year, month) = rest.split_once('_')?;
            let year: i32 = year.parse().ok()?;
            let month: u32 = month.parse().ok()?;
            if !(1..=12).contains(&month) {
                return None;
            }
            return Some(Self::MonthNavigate { year, month });
        }
        None
    }
}

/// One tappable cell of the calendar grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarButton {
    pub label: String,
    pub payload: String,
}

impl CalendarButton {
    fn inert(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: CallbackPayload::Ignore.encode(),
        }
    }
}

/// A month rendered as rows of buttons: header, weekday labels, day
/// cells, and a navigation row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarGrid {
    pub rows: Vec<Vec<CalendarButton>>,
}

/// Renders the month under `cursor`, disabling days before `today`.
pub fn render_month(cursor: CalendarCursor, today: NaiveDate) -> CalendarGrid {
    let mut rows = Vec::new();

    let header = format!("{} {}", MONTH_NAMES[cursor.month as usize - 1], cursor.year);
    rows.push(vec![CalendarButton::inert(header)]);

    rows.push(
        ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]
            .iter()
            .map(|day| CalendarButton::inert(*day))
            .collect(),
    );

    let first = NaiveDate::from_ymd_opt(cursor.year, cursor.month, 1)
        .unwrap_or_else(|| today.with_day(1).unwrap_or(today));
    let leading_blanks = first.weekday().num_days_from_monday() as usize;
    let days = days_in_month(cursor.year, cursor.month);

    let mut week: Vec<CalendarButton> = (0..leading_blanks)
        .map(|_| CalendarButton::inert(" "))
        .collect();
    for day in 1..=days {
        let Some(date) = NaiveDate::from_ymd_opt(cursor.year, cursor.month, day) else {
            continue;
        };
        if date < today {
            week.push(CalendarButton::inert("✖"));
        } else {
            week.push(CalendarButton {
                label: day.to_string(),
                payload: CallbackPayload::DateSelected(date).encode(),
            });
        }
        if week.len() == 7 {
            rows.push(std::mem::take(&mut week));
        }
    }
    if !week.is_empty() {
        while week.len() < 7 {
            week.push(CalendarButton::inert(" "));
        }
        rows.push(week);
    }

    let prev = cursor.prev();
    let next = cursor.next();
    rows.push(vec![
        CalendarButton {
            label: "<<".to_string(),
            payload: CallbackPayload::MonthNavigate { year: prev.year, month: prev.month }.encode(),
        },
        CalendarButton {
            label: ">>".to_string(),
            payload: CallbackPayload::MonthNavigate { year: next.year, month: next.month }.encode(),
        },
    ]);

    CalendarGrid { rows }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    first_of_next
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(30)
}
