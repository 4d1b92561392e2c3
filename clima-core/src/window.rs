//! Selection of the hourly records that belong to a single calendar day.

use chrono::{Duration, NaiveDateTime};

use crate::model::{HourlyObservation, HourlyRecord};

/// Stride used by the hourly strip: one record every three hours.
pub const DEFAULT_STRIDE: usize = 3;

/// Records that carry a local timestamp.
pub trait Timestamped {
    fn timestamp(&self) -> NaiveDateTime;
}

impl Timestamped for HourlyRecord {
    fn timestamp(&self) -> NaiveDateTime {
        self.time
    }
}

impl Timestamped for HourlyObservation {
    fn timestamp(&self) -> NaiveDateTime {
        self.time
    }
}

impl Timestamped for NaiveDateTime {
    fn timestamp(&self) -> NaiveDateTime {
        *self
    }
}

/// Every `stride`-th record in `[day_start, day_start + 24h)`.
///
/// `series` must be sorted ascending; this is not re-checked. When no record
/// reaches the end of the day the window runs to the end of the data. A
/// `day_start` at or past the last timestamp yields nothing. A zero stride is
/// read as 1.
pub fn select_day_hours<T: Timestamped>(
    series: &[T],
    day_start: NaiveDateTime,
    stride: usize,
) -> Vec<&T> {
    match series.last() {
        Some(last) if day_start < last.timestamp() => {}
        _ => return Vec::new(),
    }

    let day_end = day_start + Duration::hours(24);

    let mut start = None;
    let mut end = series.len();
    for (i, record) in series.iter().enumerate() {
        let ts = record.timestamp();
        if start.is_none() && ts >= day_start {
            start = Some(i);
        }
        if ts >= day_end {
            end = i;
            break;
        }
    }

    let Some(start) = start else {
        return Vec::new();
    };
    if start >= end {
        return Vec::new();
    }

    series[start..end].iter().step_by(stride.max(1)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn midnight(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid test date")
    }

    fn hours_from(start: NaiveDateTime, count: i64) -> Vec<NaiveDateTime> {
        (0..count).map(|h| start + Duration::hours(h)).collect()
    }

    fn indices(series: &[NaiveDateTime], picked: &[&NaiveDateTime]) -> Vec<usize> {
        picked
            .iter()
            .map(|p| series.iter().position(|t| t == *p).expect("picked from series"))
            .collect()
    }

    #[test]
    fn first_day_of_two_with_stride_three() {
        let series = hours_from(midnight(1), 48);
        let picked = select_day_hours(&series, midnight(1), 3);

        assert_eq!(indices(&series, &picked), vec![0, 3, 6, 9, 12, 15, 18, 21]);
        assert!(picked.iter().all(|t| **t < midnight(2)));
    }

    #[test]
    fn second_day_starts_mid_series() {
        let series = hours_from(midnight(1), 72);
        let picked = select_day_hours(&series, midnight(2), 3);

        assert_eq!(picked.len(), 8);
        assert_eq!(*picked[0], midnight(2));
        assert!(picked.iter().all(|t| **t >= midnight(2) && **t < midnight(3)));
    }

    #[test]
    fn final_day_runs_to_end_of_data() {
        let series = hours_from(midnight(1), 30);
        let picked = select_day_hours(&series, midnight(2), 1);

        assert_eq!(picked.len(), 6);
        assert_eq!(*picked[5], midnight(2) + Duration::hours(5));
    }

    #[test]
    fn day_after_all_data_is_empty() {
        let series = hours_from(midnight(1), 48);
        assert!(select_day_hours(&series, midnight(5), 3).is_empty());

        let empty: Vec<NaiveDateTime> = Vec::new();
        assert!(select_day_hours(&empty, midnight(1), 3).is_empty());
    }

    #[test]
    fn day_start_at_last_timestamp_is_empty() {
        let series = hours_from(midnight(1), 25);
        assert!(select_day_hours(&series, midnight(2), 3).is_empty());
    }

    #[test]
    fn zero_stride_behaves_as_one() {
        let series = hours_from(midnight(1), 24);
        assert_eq!(select_day_hours(&series, midnight(1), 0).len(), 24);
    }

    #[test]
    fn series_starting_after_day_start_begins_at_first_record() {
        let series = hours_from(midnight(1) + Duration::hours(10), 20);
        let picked = select_day_hours(&series, midnight(1), 3);

        assert_eq!(*picked[0], midnight(1) + Duration::hours(10));
        assert_eq!(picked.len(), 5);
    }
}
