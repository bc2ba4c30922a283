use crate::filters::{HourSelection, RecordSet};
use crate::models::{HOURS, Histogram};

/// Hour-of-day ramp, yellow at midnight through purple at 23h.
pub const RAMP: [&str; HOURS] = [
    "#F4EC15", "#DAF017", "#BBEC19", "#9DE81B", "#80E41D", "#66E01F", "#4CDC20", "#34D822",
    "#24D249", "#25D042", "#26CC58", "#28C86D", "#29C481", "#2AC093", "#2BBCA4", "#2BB5B8",
    "#2C99B4", "#2D7EB0", "#2D65AC", "#2E4EA4", "#2E38A4", "#3B2FA0", "#4E2F9C", "#603099",
];

pub const HIGHLIGHT: &str = "#FFFFFF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarColor {
    Ramp(u8),
    Highlighted,
}

impl BarColor {
    /// A bar is highlighted when its hour is selected, unless every hour is.
    pub fn for_hour(hour: u8, selection: &HourSelection) -> Self {
        if selection.contains(hour) && !selection.covers_all_hours() {
            Self::Highlighted
        } else {
            Self::Ramp(hour)
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            Self::Ramp(hour) => RAMP[usize::from(hour) % HOURS],
            Self::Highlighted => HIGHLIGHT,
        }
    }
}

/// Counts come from the date-filtered set so the whole day stays visible
/// while some hours are selected.
pub fn build_histogram(date_filtered: &RecordSet<'_>, selection: &HourSelection) -> Histogram {
    let mut counts = [0u64; HOURS];
    for record in date_filtered.iter() {
        counts[usize::from(record.hour())] += 1;
    }

    let hours: [u8; HOURS] = std::array::from_fn(|index| index as u8);
    let colors = hours.map(|hour| BarColor::for_hour(hour, selection).hex());

    let max = counts.iter().copied().max().unwrap_or(0) as f64;

    Histogram {
        hours,
        counts,
        colors,
        y_max: max + max / 4.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetStore;
    use crate::filters::{DateRange, filter_by_date};
    use crate::models::sample_record;

    fn store() -> DatasetStore {
        DatasetStore::from_records(vec![
            sample_record(1, "2020-03-02 05:05:00"),
            sample_record(2, "2020-03-02 05:45:00"),
            sample_record(3, "2020-03-02 20:15:00"),
        ])
        .unwrap()
    }

    #[test]
    fn counts_per_hour() {
        let store = store();
        let range = DateRange::parse("2020-03-01", "2020-03-03").unwrap();
        let set = filter_by_date(&store, &range);
        let histogram = build_histogram(&set, &HourSelection::all());

        assert_eq!(histogram.hours[0], 0);
        assert_eq!(histogram.hours[23], 23);
        assert_eq!(histogram.counts[5], 2);
        assert_eq!(histogram.counts[20], 1);
        assert_eq!(histogram.counts.iter().sum::<u64>(), 3);
        assert_eq!(
            histogram
                .counts
                .iter()
                .enumerate()
                .filter(|(hour, _)| *hour != 5 && *hour != 20)
                .map(|(_, count)| *count)
                .sum::<u64>(),
            0
        );
        assert_eq!(histogram.y_max, 2.5);
    }

    #[test]
    fn counts_ignore_hour_selection() {
        let store = store();
        let range = DateRange::parse("2020-03-01", "2020-03-03").unwrap();
        let set = filter_by_date(&store, &range);
        let histogram = build_histogram(&set, &HourSelection::parse("20").unwrap());
        assert_eq!(histogram.counts[5], 2);
        assert_eq!(histogram.counts[20], 1);
    }

    #[test]
    fn selected_hours_are_highlighted() {
        let store = store();
        let range = DateRange::parse("2020-03-01", "2020-03-03").unwrap();
        let set = filter_by_date(&store, &range);
        let histogram = build_histogram(&set, &HourSelection::parse("5,9").unwrap());

        for hour in 0..HOURS {
            if hour == 5 || hour == 9 {
                assert_eq!(histogram.colors[hour], HIGHLIGHT);
            } else {
                assert_eq!(histogram.colors[hour], RAMP[hour]);
            }
        }
    }

    #[test]
    fn selecting_every_hour_highlights_nothing() {
        let everything = HourSelection::from_hours(0..24).unwrap();
        let store = store();
        let range = DateRange::parse("2020-03-01", "2020-03-03").unwrap();
        let histogram = build_histogram(&filter_by_date(&store, &range), &everything);
        assert_eq!(histogram.colors, RAMP);
    }

    #[test]
    fn empty_set_gives_zero_bars() {
        let store = store();
        let range = DateRange::parse("2021-01-01", "2021-01-02").unwrap();
        let histogram = build_histogram(&filter_by_date(&store, &range), &HourSelection::all());
        assert_eq!(histogram.counts, [0; HOURS]);
        assert_eq!(histogram.colors, RAMP);
        assert_eq!(histogram.y_max, 0.0);
    }

    #[test]
    fn bar_color_rule() {
        let selection = HourSelection::parse("3").unwrap();
        assert_eq!(BarColor::for_hour(3, &selection), BarColor::Highlighted);
        assert_eq!(BarColor::for_hour(4, &selection), BarColor::Ramp(4));
        assert_eq!(BarColor::Ramp(4).hex(), "#80E41D");
    }
}
