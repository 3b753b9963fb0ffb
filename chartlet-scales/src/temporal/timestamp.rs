use chartlet_common::time::{from_timestamp_millis, to_timestamp_millis};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday};

use crate::domain::{Domain, ScaleRange};
use crate::error::ChartletScaleError;
use crate::numeric::{ContinuousScale, ScaleOptions};

/// Calendar interval used to round and step naive timestamps
pub trait TimestampInterval: Send + Sync + std::fmt::Debug {
    fn floor(&self, date: &NaiveDateTime) -> NaiveDateTime;
    fn offset(&self, date: NaiveDateTime, step: i64) -> NaiveDateTime;

    fn ceil(&self, date: &NaiveDateTime) -> NaiveDateTime {
        let floored = self.floor(date);
        if &floored == date {
            *date
        } else {
            self.offset(floored, 1)
        }
    }

    /// Floors to a boundary that is a multiple of `step` intervals
    fn floor_every(&self, date: &NaiveDateTime, _step: i64) -> NaiveDateTime {
        self.floor(date)
    }
}

pub mod interval {
    use super::*;

    fn add_delta(date: NaiveDateTime, delta: Option<TimeDelta>) -> NaiveDateTime {
        delta
            .and_then(|d| date.checked_add_signed(d))
            .unwrap_or(NaiveDateTime::MAX)
    }

    fn floor_millis(date: &NaiveDateTime, unit: i64) -> NaiveDateTime {
        let ts = date.and_utc().timestamp_millis();
        DateTime::from_timestamp_millis(ts.div_euclid(unit) * unit)
            .map(|d| d.naive_utc())
            .unwrap_or(*date)
    }

    fn midnight(date: NaiveDate) -> NaiveDateTime {
        date.and_time(NaiveTime::MIN)
    }

    /// Interval with a fixed length in milliseconds (millisecond to hour)
    #[derive(Debug, Clone)]
    pub struct FixedInterval {
        millis: i64,
    }

    #[derive(Debug, Clone)]
    pub struct DayInterval;
    #[derive(Debug, Clone)]
    pub struct WeekInterval {
        weekday: Weekday,
    }
    #[derive(Debug, Clone)]
    pub struct MonthInterval;
    #[derive(Debug, Clone)]
    pub struct YearInterval;

    impl FixedInterval {
        pub fn new(millis: i64) -> Self {
            Self {
                millis: millis.max(1),
            }
        }
    }

    impl WeekInterval {
        pub fn new(weekday: Weekday) -> Self {
            Self { weekday }
        }
    }

    impl TimestampInterval for FixedInterval {
        fn floor(&self, date: &NaiveDateTime) -> NaiveDateTime {
            floor_millis(date, self.millis)
        }

        fn offset(&self, date: NaiveDateTime, step: i64) -> NaiveDateTime {
            add_delta(
                date,
                self.millis
                    .checked_mul(step)
                    .and_then(TimeDelta::try_milliseconds),
            )
        }

        fn floor_every(&self, date: &NaiveDateTime, step: i64) -> NaiveDateTime {
            floor_millis(date, self.millis.saturating_mul(step.max(1)))
        }
    }

    impl TimestampInterval for DayInterval {
        fn floor(&self, date: &NaiveDateTime) -> NaiveDateTime {
            midnight(date.date())
        }

        fn offset(&self, date: NaiveDateTime, step: i64) -> NaiveDateTime {
            add_delta(date, TimeDelta::try_days(step))
        }

        // Aligned on day of month, so a two day step gives the 1st, 3rd, 5th ...
        fn floor_every(&self, date: &NaiveDateTime, step: i64) -> NaiveDateTime {
            let floored = self.floor(date);
            let excess = i64::from(floored.day0()) % step.max(1);
            self.offset(floored, -excess)
        }
    }

    impl TimestampInterval for WeekInterval {
        fn floor(&self, date: &NaiveDateTime) -> NaiveDateTime {
            let days_from_sunday = date.weekday().num_days_from_sunday();
            let target_from_sunday = self.weekday.num_days_from_sunday();
            let days_to_subtract = (days_from_sunday + 7 - target_from_sunday) % 7;

            add_delta(
                midnight(date.date()),
                TimeDelta::try_days(-i64::from(days_to_subtract)),
            )
        }

        fn offset(&self, date: NaiveDateTime, step: i64) -> NaiveDateTime {
            add_delta(date, TimeDelta::try_weeks(step))
        }
    }

    impl TimestampInterval for MonthInterval {
        fn floor(&self, date: &NaiveDateTime) -> NaiveDateTime {
            NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
                .map(midnight)
                .unwrap_or(*date)
        }

        fn offset(&self, date: NaiveDateTime, step: i64) -> NaiveDateTime {
            let total_months = i64::from(date.year()) * 12 + i64::from(date.month0()) + step;
            let new_year = total_months.div_euclid(12);
            let new_month = total_months.rem_euclid(12) + 1;

            i32::try_from(new_year)
                .ok()
                .and_then(|y| NaiveDate::from_ymd_opt(y, new_month as u32, 1))
                .map(midnight)
                .unwrap_or(NaiveDateTime::MAX)
        }

        fn floor_every(&self, date: &NaiveDateTime, step: i64) -> NaiveDateTime {
            let floored = self.floor(date);
            let excess = i64::from(floored.month0()) % step.max(1);
            self.offset(floored, -excess)
        }
    }

    impl TimestampInterval for YearInterval {
        fn floor(&self, date: &NaiveDateTime) -> NaiveDateTime {
            NaiveDate::from_ymd_opt(date.year(), 1, 1)
                .map(midnight)
                .unwrap_or(*date)
        }

        fn offset(&self, date: NaiveDateTime, step: i64) -> NaiveDateTime {
            i32::try_from(i64::from(date.year()) + step)
                .ok()
                .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
                .map(midnight)
                .unwrap_or(NaiveDateTime::MAX)
        }

        fn floor_every(&self, date: &NaiveDateTime, step: i64) -> NaiveDateTime {
            let floored = self.floor(date);
            let excess = i64::from(floored.year()).rem_euclid(step.max(1));
            self.offset(floored, -excess)
        }
    }

    pub fn millisecond() -> Box<dyn TimestampInterval> {
        Box::new(FixedInterval::new(1))
    }

    pub fn second() -> Box<dyn TimestampInterval> {
        Box::new(FixedInterval::new(1_000))
    }

    pub fn minute() -> Box<dyn TimestampInterval> {
        Box::new(FixedInterval::new(60_000))
    }

    pub fn hour() -> Box<dyn TimestampInterval> {
        Box::new(FixedInterval::new(3_600_000))
    }

    pub fn day() -> Box<dyn TimestampInterval> {
        Box::new(DayInterval)
    }

    pub fn week(weekday: Weekday) -> Box<dyn TimestampInterval> {
        Box::new(WeekInterval::new(weekday))
    }

    pub fn week_sunday() -> Box<dyn TimestampInterval> {
        week(Weekday::Sun)
    }

    pub fn month() -> Box<dyn TimestampInterval> {
        Box::new(MonthInterval)
    }

    pub fn year() -> Box<dyn TimestampInterval> {
        Box::new(YearInterval)
    }

    /// The interval used to nice a domain spanning `span`
    pub fn for_span(span: TimeDelta) -> Box<dyn TimestampInterval> {
        if span < TimeDelta::seconds(1) {
            millisecond()
        } else if span < TimeDelta::minutes(1) {
            second()
        } else if span < TimeDelta::hours(1) {
            minute()
        } else if span < TimeDelta::days(1) {
            hour()
        } else if span < TimeDelta::days(30) {
            day()
        } else if span < TimeDelta::days(365) {
            month()
        } else {
            year()
        }
    }
}

const MAX_TICKS: usize = 10_000;

#[derive(Clone, Debug)]
pub struct TimeScaleConfig {
    pub domain: (NaiveDateTime, NaiveDateTime),
    pub range: (f64, f64),
    pub clamp: bool,
    pub range_offset: Option<f64>,
    pub nice: bool,
}

impl Default for TimeScaleConfig {
    fn default() -> Self {
        let epoch = NaiveDateTime::default();
        Self {
            domain: (epoch, epoch + TimeDelta::days(1)),
            range: (0.0, 1.0),
            clamp: false,
            range_offset: None,
            nice: false,
        }
    }
}

/// A scale that maps naive timestamps to a numeric range
#[derive(Clone, Debug, PartialEq)]
pub struct TimeScale {
    domain_start: NaiveDateTime,
    domain_end: NaiveDateTime,
    range_start: f64,
    range_end: f64,
    clamp: bool,
    range_offset: Option<f64>,
}

impl TimeScale {
    pub fn new(config: &TimeScaleConfig) -> Self {
        let mut this = Self {
            domain_start: config.domain.0,
            domain_end: config.domain.1,
            range_start: config.range.0,
            range_end: config.range.1,
            clamp: config.clamp,
            range_offset: config.range_offset,
        };
        if config.nice {
            this = this.nice(None);
        }
        this
    }

    pub fn try_new(config: &TimeScaleConfig) -> Result<Self, ChartletScaleError> {
        for v in [config.range.0, config.range.1] {
            if !v.is_finite() {
                return Err(ChartletScaleError::NonFiniteValue(v));
            }
        }
        Ok(Self::new(config))
    }

    pub fn with_domain(mut self, domain: (NaiveDateTime, NaiveDateTime)) -> Self {
        self.domain_start = domain.0;
        self.domain_end = domain.1;
        self
    }

    pub fn with_range(mut self, range: (f64, f64)) -> Self {
        self.range_start = range.0;
        self.range_end = range.1;
        self
    }

    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn with_range_offset(mut self, range_offset: Option<f64>) -> Self {
        self.range_offset = range_offset;
        self
    }

    /// Extends the domain to calendar boundaries.
    ///
    /// With no explicit interval the interval follows the span, and rounding
    /// repeats until the domain stops changing, so the result is a fixed point.
    pub fn nice(mut self, interval: Option<Box<dyn TimestampInterval>>) -> Self {
        if self.domain_start == self.domain_end {
            return self;
        }

        let reversed = self.domain_end < self.domain_start;
        let (mut start, mut end) = if reversed {
            (self.domain_end, self.domain_start)
        } else {
            (self.domain_start, self.domain_end)
        };

        match interval {
            Some(interval) => {
                start = interval.floor(&start);
                end = interval.ceil(&end);
            }
            None => {
                for _ in 0..10 {
                    let interval = interval::for_span(end - start);
                    let (next_start, next_end) = (interval.floor(&start), interval.ceil(&end));
                    if (next_start, next_end) == (start, end) {
                        break;
                    }
                    start = next_start;
                    end = next_end;
                }
            }
        }

        if reversed {
            self.domain_start = end;
            self.domain_end = start;
        } else {
            self.domain_start = start;
            self.domain_end = end;
        }
        self
    }

    /// Pure nice-rounding of a date domain
    pub fn nice_domain(domain: Domain<NaiveDateTime>) -> Domain<NaiveDateTime> {
        let scale = TimeScale::new(&TimeScaleConfig {
            domain: domain.as_tuple(),
            ..Default::default()
        })
        .nice(None);
        Domain::new(scale.domain_start, scale.domain_end)
    }

    fn timestamps(&self) -> (f64, f64) {
        (
            to_timestamp_millis(&self.domain_start),
            to_timestamp_millis(&self.domain_end),
        )
    }

    fn range_bounds(&self) -> (f64, f64) {
        if self.range_start <= self.range_end {
            (self.range_start, self.range_end)
        } else {
            (self.range_end, self.range_start)
        }
    }
}

impl ContinuousScale<NaiveDateTime> for TimeScale {
    fn domain(&self) -> (NaiveDateTime, NaiveDateTime) {
        (self.domain_start, self.domain_end)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    fn clamp(&self) -> bool {
        self.clamp
    }

    fn scale(&self, value: NaiveDateTime) -> f64 {
        if self.domain_start == self.domain_end || self.range_start == self.range_end {
            return self.range_start;
        }

        let (start_ts, end_ts) = self.timestamps();
        let t = (to_timestamp_millis(&value) - start_ts) / (end_ts - start_ts);
        let v = self.range_start + t * (self.range_end - self.range_start)
            + self.range_offset.unwrap_or(0.0);

        if self.clamp {
            let (range_min, range_max) = self.range_bounds();
            v.clamp(range_min, range_max)
        } else {
            v
        }
    }

    fn invert(&self, value: f64) -> NaiveDateTime {
        if self.domain_start == self.domain_end
            || self.range_start == self.range_end
            || !value.is_finite()
        {
            return self.domain_start;
        }

        let mut v = value - self.range_offset.unwrap_or(0.0);
        if self.clamp {
            let (range_min, range_max) = self.range_bounds();
            v = v.clamp(range_min, range_max);
        }

        let (start_ts, end_ts) = self.timestamps();
        let t = (v - self.range_start) / (self.range_end - self.range_start);
        from_timestamp_millis(start_ts + t * (end_ts - start_ts)).unwrap_or(self.domain_start)
    }

    fn ticks(&self, count: Option<f64>) -> Vec<NaiveDateTime> {
        let count = count.unwrap_or(10.0);
        if !(count > 0.0) {
            return vec![];
        }

        let tick_intervals = [
            (interval::second(), 1, 1_000i64),
            (interval::second(), 5, 5_000),
            (interval::second(), 15, 15_000),
            (interval::second(), 30, 30_000),
            (interval::minute(), 1, 60_000),
            (interval::minute(), 5, 300_000),
            (interval::minute(), 15, 900_000),
            (interval::minute(), 30, 1_800_000),
            (interval::hour(), 1, 3_600_000),
            (interval::hour(), 3, 10_800_000),
            (interval::hour(), 6, 21_600_000),
            (interval::hour(), 12, 43_200_000),
            (interval::day(), 1, 86_400_000),
            (interval::day(), 2, 172_800_000),
            (interval::week_sunday(), 1, 604_800_000),
            (interval::month(), 1, 2_592_000_000),
            (interval::month(), 3, 7_776_000_000),
            (interval::year(), 1, 31_536_000_000),
        ];

        let (start, end) = if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };

        let span_ms = (end - start).num_milliseconds() as f64;
        let target_step = span_ms / count;

        let (interval, step) = tick_intervals
            .into_iter()
            .find(|(_, _, step_ms)| (*step_ms as f64) >= target_step)
            .map(|(interval, step, _)| (interval, step))
            .unwrap_or_else(|| {
                let years = (target_step / 31_536_000_000.0).ceil() as i64;
                (interval::year(), years.max(1))
            });

        let mut tick = interval.floor_every(&start, step);
        if tick < start {
            tick = interval.offset(tick, step);
        }

        let mut ticks = Vec::new();
        while tick <= end && ticks.len() < MAX_TICKS {
            ticks.push(tick);
            let next = interval.offset(tick, step);
            if next <= tick {
                break;
            }
            tick = next;
        }

        if self.domain_end < self.domain_start {
            ticks.reverse();
        }
        ticks
    }
}

/// Builds a time scale from an extent, failing when there is no domain
pub fn make_temporal_scale(
    domain: Option<Domain<NaiveDateTime>>,
    range: impl Into<ScaleRange>,
    opts: &ScaleOptions,
) -> Result<TimeScale, ChartletScaleError> {
    let domain = domain.ok_or(ChartletScaleError::EmptyDomain)?;
    let range = range.into();
    TimeScale::try_new(&TimeScaleConfig {
        domain: domain.as_tuple(),
        range: range.as_tuple(),
        clamp: opts.clamp,
        nice: opts.nice,
        ..Default::default()
    })
}
