use chrono::{DateTime, Datelike, Duration, Months, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

const MS_PER_MINUTE: f64 = 60_000.0;
const MS_PER_DAY: f64 = 86_400_000.0;

/// Calendar granularity of one row of timeline labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Year,
    Month,
    Day,
    Minute,
}

/// Step between two consecutive ticks of a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodInterval {
    Years(u32),
    Months(u32),
    Days(u32),
    Minutes(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodSettings {
    pub parent: Option<Period>,
    pub child: Option<Period>,
    /// Ascending candidate intervals.
    pub intervals: &'static [PeriodInterval],
}

const YEAR_INTERVALS: [PeriodInterval; 1] = [PeriodInterval::Years(1)];
const MONTH_INTERVALS: [PeriodInterval; 2] = [PeriodInterval::Months(1), PeriodInterval::Months(3)];
const DAY_INTERVALS: [PeriodInterval; 2] = [PeriodInterval::Days(1), PeriodInterval::Days(7)];
const MINUTE_INTERVALS: [PeriodInterval; 6] = [
    PeriodInterval::Minutes(1),
    PeriodInterval::Minutes(5),
    PeriodInterval::Minutes(15),
    PeriodInterval::Minutes(60),
    PeriodInterval::Minutes(180),
    PeriodInterval::Minutes(360),
];

impl Period {
    /// Coarsest first.
    pub const ALL: [Period; 4] = [Period::Year, Period::Month, Period::Day, Period::Minute];

    #[must_use]
    pub fn settings(self) -> PeriodSettings {
        match self {
            Self::Year => PeriodSettings {
                parent: None,
                child: Some(Self::Month),
                intervals: &YEAR_INTERVALS,
            },
            Self::Month => PeriodSettings {
                parent: Some(Self::Year),
                child: Some(Self::Day),
                intervals: &MONTH_INTERVALS,
            },
            Self::Day => PeriodSettings {
                parent: Some(Self::Month),
                child: Some(Self::Minute),
                intervals: &DAY_INTERVALS,
            },
            Self::Minute => PeriodSettings {
                parent: Some(Self::Day),
                child: None,
                intervals: &MINUTE_INTERVALS,
            },
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Minute => "minute",
        }
    }

    /// Start of the period containing `time`, in UTC.
    #[must_use]
    pub fn floor(self, time: DateTime<Utc>) -> DateTime<Utc> {
        let floored = match self {
            Self::Year => Utc.with_ymd_and_hms(time.year(), 1, 1, 0, 0, 0).single(),
            Self::Month => Utc
                .with_ymd_and_hms(time.year(), time.month(), 1, 0, 0, 0)
                .single(),
            Self::Day => Utc
                .with_ymd_and_hms(time.year(), time.month(), time.day(), 0, 0, 0)
                .single(),
            Self::Minute => time.with_second(0).and_then(|t| t.with_nanosecond(0)),
        };
        floored.unwrap_or(time)
    }

    #[must_use]
    pub fn format_label(self, time: DateTime<Utc>) -> String {
        match self {
            Self::Year => time.format("%Y").to_string(),
            Self::Month => time.format("%B").to_string(),
            Self::Day => ordinal(time.day()),
            Self::Minute => time.format("%H:%M").to_string(),
        }
    }
}

impl PeriodInterval {
    /// Nominal length used for spacing decisions (1 month = 30 days,
    /// 1 year = 365 days).
    #[must_use]
    pub fn nominal_ms(self) -> f64 {
        match self {
            Self::Years(n) => f64::from(n) * 365.0 * MS_PER_DAY,
            Self::Months(n) => f64::from(n) * 30.0 * MS_PER_DAY,
            Self::Days(n) => f64::from(n) * MS_PER_DAY,
            Self::Minutes(n) => f64::from(n) * MS_PER_MINUTE,
        }
    }

    /// Calendar-aware `time + self`; `None` when the result leaves chrono's range.
    #[must_use]
    pub fn add_to(self, time: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Years(n) => time.checked_add_months(Months::new(n.saturating_mul(12))),
            Self::Months(n) => time.checked_add_months(Months::new(n)),
            Self::Days(n) => time.checked_add_signed(Duration::days(i64::from(n))),
            Self::Minutes(n) => time.checked_add_signed(Duration::minutes(i64::from(n))),
        }
    }

    /// Calendar-aware `time - self`.
    #[must_use]
    pub fn subtract_from(self, time: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Years(n) => time.checked_sub_months(Months::new(n.saturating_mul(12))),
            Self::Months(n) => time.checked_sub_months(Months::new(n)),
            Self::Days(n) => time.checked_sub_signed(Duration::days(i64::from(n))),
            Self::Minutes(n) => time.checked_sub_signed(Duration::minutes(i64::from(n))),
        }
    }
}

fn ordinal(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{day}{suffix}")
}
