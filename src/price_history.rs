use anyhow::Result;
use chrono::{DateTime, Duration, Months, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Y-axis bounds used when no point is visible
pub const DEFAULT_Y_AXIS: (f64, f64) = (0.0, 100.0);

const Y_AXIS_PADDING: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: DateTime<Utc>, price: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            price,
        }
    }

    /// Synthetic month of closes ending at `now`, oldest first
    pub fn sample_history(now: DateTime<Utc>) -> Vec<PricePoint> {
        [
            (-30, 10.2),
            (-25, 10.5),
            (-20, 10.8),
            (-15, 10.4),
            (-10, 10.9),
            (-5, 11.1),
            (0, 11.2),
        ]
        .into_iter()
        .map(|(days, price)| PricePoint::new(now + Duration::days(days), price))
        .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl TimeRange {
    /// Earliest visible timestamp for this range, counted back from `now`.
    ///
    /// Month-based ranges use calendar months, so the window length varies
    /// with `now`.
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let start = match self {
            TimeRange::Week => now.checked_sub_signed(Duration::days(7)),
            TimeRange::Month => now.checked_sub_months(Months::new(1)),
            TimeRange::Quarter => now.checked_sub_months(Months::new(3)),
            TimeRange::Year => now.checked_sub_months(Months::new(12)),
        };
        // Only out-of-range dates fail; show everything then
        start.unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Days between x-axis labels
    pub fn tick_stride_days(&self) -> u32 {
        match self {
            TimeRange::Week => 1,
            TimeRange::Month => 5,
            TimeRange::Quarter => 15,
            TimeRange::Year => 30,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::Week => "1W",
            TimeRange::Month => "1M",
            TimeRange::Quarter => "3M",
            TimeRange::Year => "1Y",
        }
    }
}

impl FromStr for TimeRange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" | "1w" => Ok(TimeRange::Week),
            "month" | "1m" => Ok(TimeRange::Month),
            "quarter" | "3m" => Ok(TimeRange::Quarter),
            "year" | "1y" => Ok(TimeRange::Year),
            other => Err(anyhow::anyhow!("Invalid time range: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeriesView {
    pub visible_points: Vec<PricePoint>,
    pub y_axis_min: f64,
    pub y_axis_max: f64,
    pub tick_stride_days: u32,
}

pub struct PriceSeriesFilter;

impl PriceSeriesFilter {
    /// Truncate `series` to `range` and compute chart bounds.
    ///
    /// `series` must already be sorted by date; it is not re-sorted.
    pub fn filter(series: &[PricePoint], range: TimeRange, now: DateTime<Utc>) -> PriceSeriesView {
        let start = range.window_start(now);
        let visible_points: Vec<PricePoint> = series
            .iter()
            .filter(|point| point.date >= start)
            .cloned()
            .collect();

        let (y_axis_min, y_axis_max) = y_axis_bounds(&visible_points);

        debug!(
            "Price series {}: {} of {} points visible, y-axis [{:.2}, {:.2}]",
            range.label(),
            visible_points.len(),
            series.len(),
            y_axis_min,
            y_axis_max
        );

        PriceSeriesView {
            visible_points,
            y_axis_min,
            y_axis_max,
            tick_stride_days: range.tick_stride_days(),
        }
    }
}

fn y_axis_bounds(points: &[PricePoint]) -> (f64, f64) {
    if points.is_empty() {
        return DEFAULT_Y_AXIS;
    }

    let lo = points.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
    let hi = points.iter().map(|p| p.price).fold(f64::NEG_INFINITY, f64::max);
    let buffer = (hi - lo) * Y_AXIS_PADDING;

    (lo - buffer, hi + buffer)
}
