use std::cmp::Ordering;

use serde::Serialize;

use crate::models::{finite_or_zero, StationState, TrainState, TrainStatus, TrainType};

use super::section::SectionLayout;

/// Maps a kilometre offset onto `0.0..=1.0` along the section.
pub fn normalized_position(km: f64, total_length_km: f64) -> f64 {
    if !total_length_km.is_finite() || total_length_km <= 0.0 {
        return 0.0;
    }
    (finite_or_zero(km) / total_length_km).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackSpan {
    pub name: &'static str,
    pub start: f64,
    pub end: f64,
}

pub fn bottleneck_spans(layout: &SectionLayout) -> Vec<TrackSpan> {
    layout
        .bottlenecks
        .iter()
        .map(|segment| TrackSpan {
            name: segment.name,
            start: normalized_position(segment.start_km, layout.length_km),
            end: normalized_position(segment.end_km, layout.length_km),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    Forward,
    Reversed,
}

/// Trains that set out from the far end of the section run right to left.
pub fn orientation(train: &TrainState, layout: &SectionLayout) -> Orientation {
    if train.origin == layout.end.code {
        Orientation::Reversed
    } else {
        Orientation::Forward
    }
}

pub fn on_track_trains(trains: &[TrainState]) -> impl Iterator<Item = &TrainState> {
    trains.iter().filter(|train| train.status.is_on_track())
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TrackEntity {
    #[serde(rename_all = "camelCase")]
    Station { code: String, name: String },
    #[serde(rename_all = "camelCase")]
    Train {
        train_number: String,
        train_name: String,
        train_type: TrainType,
        status: TrainStatus,
        speed_kmh: f64,
        delay_minutes: i64,
        orientation: Orientation,
    },
}

/// A station or train placed on the section.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackItem {
    pub km: f64,
    pub position: f64,
    #[serde(flatten)]
    pub entity: TrackEntity,
}

pub fn station_item(station: &StationState, layout: &SectionLayout) -> TrackItem {
    let km = finite_or_zero(station.km);
    TrackItem {
        km,
        position: normalized_position(km, layout.length_km),
        entity: TrackEntity::Station {
            code: station.code.clone(),
            name: station.name.clone(),
        },
    }
}

pub fn train_item(train: &TrainState, layout: &SectionLayout) -> TrackItem {
    let km = finite_or_zero(train.current_km);
    TrackItem {
        km,
        position: normalized_position(km, layout.length_km),
        entity: TrackEntity::Train {
            train_number: train.train_number.clone(),
            train_name: train.train_name.clone(),
            train_type: train.train_type,
            status: train.status,
            speed_kmh: finite_or_zero(train.speed_kmh),
            delay_minutes: train.delay_minutes,
            orientation: orientation(train, layout),
        },
    }
}

/// Stations and on-track trains in one sequence ordered by kilometre.
/// Equal positions keep stations ahead of trains, each in input order.
pub fn merge_track_items(
    trains: &[TrainState],
    stations: &[StationState],
    layout: &SectionLayout,
) -> Vec<TrackItem> {
    let mut items: Vec<TrackItem> = stations
        .iter()
        .map(|station| station_item(station, layout))
        .chain(on_track_trains(trains).map(|train| train_item(train, layout)))
        .collect();

    items.sort_by(|a, b| a.km.partial_cmp(&b.km).unwrap_or(Ordering::Equal));
    items
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::track::section::SOLAPUR_WADI;

    fn train(number: &str, km: f64, status: TrainStatus, origin: &str) -> TrainState {
        TrainState {
            train_number: number.into(),
            train_name: format!("Train {number}"),
            train_type: TrainType::Passenger,
            origin: origin.into(),
            destination: String::new(),
            current_km: km,
            speed_kmh: 60.0,
            delay_minutes: 0,
            status,
        }
    }

    fn station(code: &str, km: f64) -> StationState {
        StationState {
            code: code.into(),
            name: code.to_lowercase(),
            km,
        }
    }

    fn codes(items: &[TrackItem]) -> Vec<String> {
        items
            .iter()
            .map(|item| match &item.entity {
                TrackEntity::Station { code, .. } => code.clone(),
                TrackEntity::Train { train_number, .. } => train_number.clone(),
            })
            .collect()
    }

    #[test]
    fn clamps_to_unit_range() {
        assert_eq!(normalized_position(-5.0, 455.3), 0.0);
        assert_eq!(normalized_position(500.0, 455.3), 1.0);
        assert_eq!(normalized_position(455.3, 455.3), 1.0);
        assert!((normalized_position(227.65, 455.3) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn undefined_positions_sit_at_the_start() {
        assert_eq!(normalized_position(f64::NAN, 455.3), 0.0);
        assert_eq!(normalized_position(10.0, 0.0), 0.0);
    }

    #[test]
    fn bottleneck_spans_follow_the_layout() {
        let spans = bottleneck_spans(&SOLAPUR_WADI);
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].name, "Hotgi-Indi");
        assert!((spans[0].start - 25.3 / 455.3).abs() < 1e-12);
        assert!(spans.iter().all(|span| span.start < span.end));
    }

    #[test]
    fn orientation_depends_on_origin() {
        let eastbound = train("1", 10.0, TrainStatus::Running, "SUR");
        let westbound = train("2", 10.0, TrainStatus::Running, "WDI");
        assert_eq!(orientation(&eastbound, &SOLAPUR_WADI), Orientation::Forward);
        assert_eq!(orientation(&westbound, &SOLAPUR_WADI), Orientation::Reversed);
    }

    #[test]
    fn merge_orders_by_km_and_skips_idle_trains() {
        let trains = vec![
            train("T300", 300.0, TrainStatus::Running, "SUR"),
            train("T-sched", 5.0, TrainStatus::Scheduled, "SUR"),
            train("T100", 100.0, TrainStatus::Stopped, "WDI"),
            train("T-done", 455.3, TrainStatus::Completed, "SUR"),
        ];
        let stations = vec![station("SUR", 0.0), station("GR", 200.0), station("WDI", 455.3)];

        let items = merge_track_items(&trains, &stations, &SOLAPUR_WADI);
        assert_eq!(codes(&items), vec!["SUR", "T100", "GR", "T300", "WDI"]);
    }

    #[test]
    fn ties_keep_stations_before_trains() {
        let trains = vec![
            train("A", 50.0, TrainStatus::Delayed, "SUR"),
            train("B", 50.0, TrainStatus::Running, "SUR"),
        ];
        let stations = vec![station("X", 50.0)];

        let items = merge_track_items(&trains, &stations, &SOLAPUR_WADI);
        assert_eq!(codes(&items), vec!["X", "A", "B"]);
    }

    #[test]
    fn nan_position_does_not_break_ordering() {
        let trains = vec![
            train("late", 20.0, TrainStatus::Running, "SUR"),
            train("lost", f64::NAN, TrainStatus::Running, "SUR"),
        ];
        let items = merge_track_items(&trains, &[], &SOLAPUR_WADI);
        assert_eq!(codes(&items), vec!["lost", "late"]);
        assert_eq!(items[0].position, 0.0);
    }

    #[test]
    fn train_item_serializes_with_kind_tag() {
        let item = train_item(&train("12345", 45.53, TrainStatus::Running, "WDI"), &SOLAPUR_WADI);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], "train");
        assert_eq!(json["trainNumber"], "12345");
        assert_eq!(json["orientation"], "reversed");
    }

    proptest! {
        #[test]
        fn position_is_strictly_monotonic(a in 0.0f64..455.3, b in 0.0f64..455.3) {
            prop_assume!((a - b).abs() > 1e-9);
            let (low, high) = if a < b { (a, b) } else { (b, a) };
            prop_assert!(normalized_position(low, 455.3) < normalized_position(high, 455.3));
        }
    }
}
