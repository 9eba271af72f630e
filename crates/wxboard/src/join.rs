use crate::{HourRecord, UvRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct JoinedHour {
    pub hour: HourRecord,
    pub uv: Option<f64>,
}

/// Pairs each forecast hour with the first UV reading for the same calendar hour.
///
/// Both series hold at most a few dozen entries, so a linear scan per hour is plenty.
pub fn join_series(hours: Vec<HourRecord>, readings: &[UvRecord]) -> Vec<JoinedHour> {
    hours
        .into_iter()
        .map(|hour| {
            let uv = readings
                .iter()
                .find(|reading| reading.stamp == hour.stamp)
                .map(|reading| reading.uv_value);
            JoinedHour { hour, uv }
        })
        .collect()
}
