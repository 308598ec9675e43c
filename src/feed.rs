//! Simulated detection events for the live monitoring dashboard.

use std::collections::VecDeque;

use chrono::{DateTime, Duration as ChronoDuration, Local};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

pub const FEED_CAPACITY: usize = 10;

pub const DEFAULT_ZONES: [&str; 8] = ["A-1", "A-2", "A-3", "B-1", "B-5", "B-7", "C-2", "C-4"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    Standing,
    LeftSeat,
    MultipleStudents,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [
        EventKind::Standing,
        EventKind::LeftSeat,
        EventKind::MultipleStudents,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Standing => "Student Standing",
            EventKind::LeftSeat => "Left Seat",
            EventKind::MultipleStudents => "Multiple Students",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetectionEvent {
    pub id: u64,
    pub zone: String,
    pub kind: EventKind,
    pub timestamp: DateTime<Local>,
    pub severity: Severity,
}

/// Anything that can stand in for a detector.
///
/// `poll` is called once per emission period and yields at most one event.
/// The sequence is never restarted.
pub trait EventSource: Send {
    fn poll(&mut self, now: DateTime<Local>) -> Option<DetectionEvent>;
}

/// Clamp a probability into `0.0..=1.0`, rejecting NaN and infinities
pub fn clamp_probability(p: f64) -> Option<f64> {
    p.is_finite().then(|| p.clamp(0.0, 1.0))
}

/// Random generator used by the demo dashboard
pub struct RandomEventSource<R: Rng> {
    rng: R,
    zones: Vec<String>,
    probability: f64,
    next_id: u64,
}

impl RandomEventSource<StdRng> {
    /// Seeded for reproducible runs, entropy-backed otherwise
    pub fn from_seed(seed: Option<u64>, zones: Vec<String>, probability: f64) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(rng, zones, probability)
    }
}

impl<R: Rng> RandomEventSource<R> {
    pub fn new(rng: R, zones: Vec<String>, probability: f64) -> Self {
        let zones = if zones.is_empty() {
            DEFAULT_ZONES.iter().map(|z| z.to_string()).collect()
        } else {
            zones
        };
        Self {
            rng,
            zones,
            probability: clamp_probability(probability).unwrap_or(0.0),
            // ids 1 and 2 belong to the seeded events
            next_id: 3,
        }
    }
}

impl<R: Rng + Send> EventSource for RandomEventSource<R> {
    fn poll(&mut self, now: DateTime<Local>) -> Option<DetectionEvent> {
        let draw: f64 = self.rng.gen();
        if draw <= 1.0 - self.probability {
            return None;
        }

        let zone = self.zones.choose(&mut self.rng)?;
        let kind = *EventKind::ALL.choose(&mut self.rng)?;
        let severity = *Severity::ALL.choose(&mut self.rng)?;

        let event = DetectionEvent {
            id: self.next_id,
            zone: format!("Zone {zone}"),
            kind,
            timestamp: now,
            severity,
        };
        self.next_id += 1;
        Some(event)
    }
}

/// Replays a fixed list of poll results; handy for tests and recorded demos.
#[derive(Debug, Default)]
pub struct ScriptedEventSource {
    script: VecDeque<Option<DetectionEvent>>,
}

impl ScriptedEventSource {
    pub fn new(script: impl IntoIterator<Item = Option<DetectionEvent>>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl EventSource for ScriptedEventSource {
    fn poll(&mut self, now: DateTime<Local>) -> Option<DetectionEvent> {
        self.script.pop_front().flatten().map(|mut event| {
            event.timestamp = now;
            event
        })
    }
}

/// Bounded, newest-first list of events
#[derive(Debug, Clone)]
pub struct EventFeed {
    events: VecDeque<DetectionEvent>,
    capacity: usize,
}

impl EventFeed {
    /// Capacity is held to `1..=FEED_CAPACITY`
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, FEED_CAPACITY);
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// The two events the dashboard opens with
    pub fn seeded(capacity: usize, now: DateTime<Local>) -> Self {
        let mut feed = Self::new(capacity);
        feed.push(DetectionEvent {
            id: 2,
            zone: "Zone B-7".to_string(),
            kind: EventKind::LeftSeat,
            timestamp: now - ChronoDuration::minutes(5),
            severity: Severity::High,
        });
        feed.push(DetectionEvent {
            id: 1,
            zone: "Zone A-3".to_string(),
            kind: EventKind::Standing,
            timestamp: now - ChronoDuration::minutes(2),
            severity: Severity::Low,
        });
        feed
    }

    pub fn push(&mut self, event: DetectionEvent) {
        debug!(
            id = event.id,
            zone = %event.zone,
            kind = %event.kind,
            severity = %event.severity,
            "detection event"
        );
        self.events.push_front(event);
        self.events.truncate(self.capacity);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn latest(&self) -> Option<&DetectionEvent> {
        self.events.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DetectionEvent> {
        self.events.iter()
    }

    pub fn has_event_in(&self, zone_label: &str) -> bool {
        self.events.iter().any(|e| e.zone == zone_label)
    }
}

/// Relative age of a timestamp, bucketed into seconds, minutes or hours
pub fn format_time_ago(timestamp: DateTime<Local>, now: DateTime<Local>) -> String {
    let diff = (now - timestamp).num_seconds().max(0);

    match diff {
        d if d < 60 => format!("{d}s ago"),
        d if d < 3600 => format!("{}m ago", d / 60),
        d => format!("{}h ago", d / 3600),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneStatus {
    Alert,
    Occupied,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneCell {
    pub label: String,
    pub status: ZoneStatus,
}

pub const GRID_COLUMNS: usize = 8;

/// Occupancy grid: rows lettered from A, columns numbered from 1.
///
/// A cell alerts when any event in the feed names it; otherwise it is occupied
/// while its index is below the active student count.
pub fn zone_grid(feed: &EventFeed, total_zones: usize, active_students: usize) -> Vec<ZoneCell> {
    (0..total_zones)
        .map(|i| {
            let row = char::from(b'A' + (i / GRID_COLUMNS % 26) as u8);
            let label = format!("{}-{}", row, i % GRID_COLUMNS + 1);
            let status = if feed.has_event_in(&format!("Zone {label}")) {
                ZoneStatus::Alert
            } else if i < active_students {
                ZoneStatus::Occupied
            } else {
                ZoneStatus::Empty
            };
            ZoneCell { label, status }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Local> {
        Local.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn event(id: u64, zone: &str) -> DetectionEvent {
        DetectionEvent {
            id,
            zone: format!("Zone {zone}"),
            kind: EventKind::Standing,
            timestamp: at(0),
            severity: Severity::Medium,
        }
    }

    #[test]
    fn test_feed_is_newest_first_and_bounded() {
        let mut feed = EventFeed::new(FEED_CAPACITY);

        for id in 0..25 {
            feed.push(event(id, "A-1"));
            assert!(feed.len() <= FEED_CAPACITY);
            assert_eq!(feed.latest().unwrap().id, id);
        }

        let ids: Vec<u64> = feed.iter().map(|e| e.id).collect();
        assert_eq!(ids, (15..25).rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_oversized_capacity_is_held_to_ten() {
        let mut feed = EventFeed::new(usize::MAX);
        for id in 0..40 {
            feed.push(event(id, "B-2"));
        }
        assert_eq!(feed.len(), FEED_CAPACITY);

        let mut feed = EventFeed::new(0);
        feed.push(event(1, "B-2"));
        feed.push(event(2, "B-2"));
        assert_eq!(feed.len(), 1);
    }

    #[test]
    fn test_seeded_feed() {
        let now = at(1000);
        let feed = EventFeed::seeded(FEED_CAPACITY, now);

        assert_eq!(feed.len(), 2);
        let first = feed.latest().unwrap();
        assert_eq!(first.zone, "Zone A-3");
        assert_eq!(first.kind, EventKind::Standing);
        assert_eq!(format_time_ago(first.timestamp, now), "2m ago");
    }

    #[test]
    fn test_format_time_ago_buckets() {
        let now = at(10_000);
        assert_eq!(format_time_ago(now, now), "0s ago");
        assert_eq!(format_time_ago(at(10_000 - 59), now), "59s ago");
        assert_eq!(format_time_ago(at(10_000 - 60), now), "1m ago");
        assert_eq!(format_time_ago(at(10_000 - 3599), now), "59m ago");
        assert_eq!(format_time_ago(at(10_000 - 7200), now), "2h ago");
        // clock skew never yields negative ages
        assert_eq!(format_time_ago(at(10_005), now), "0s ago");
    }

    #[test]
    fn test_random_source_certain_emission() {
        let zones: Vec<String> = DEFAULT_ZONES.iter().map(|z| z.to_string()).collect();
        let mut source = RandomEventSource::from_seed(Some(7), zones.clone(), 1.0);

        for _ in 0..50 {
            let event = source.poll(at(0)).expect("probability 1 always emits");
            let label = event.zone.strip_prefix("Zone ").unwrap();
            assert!(zones.iter().any(|z| z == label));
        }
    }

    #[test]
    fn test_clamp_probability_rejects_non_finite() {
        assert_eq!(clamp_probability(0.25), Some(0.25));
        assert_eq!(clamp_probability(f64::NAN), None);
        assert_eq!(clamp_probability(f64::INFINITY), None);
    }

    #[test]
    fn test_random_source_treats_nan_as_silent() {
        let mut source = RandomEventSource::from_seed(Some(9), Vec::new(), f64::NAN);
        assert!((0..50).all(|_| source.poll(at(0)).is_none()));
    }

    #[test]
    fn test_random_source_never_emits_at_zero_probability() {
        let mut source = RandomEventSource::from_seed(Some(7), Vec::new(), 0.0);
        assert!((0..200).all(|_| source.poll(at(0)).is_none()));
    }

    #[test]
    fn test_random_source_ids_increase() {
        let mut source = RandomEventSource::from_seed(Some(1), Vec::new(), 1.0);
        let a = source.poll(at(0)).unwrap();
        let b = source.poll(at(1)).unwrap();
        assert!(b.id > a.id);
        assert_eq!(b.timestamp, at(1));
    }

    #[test]
    fn test_random_source_emission_rate_is_roughly_probability() {
        let mut source = RandomEventSource::from_seed(Some(42), Vec::new(), 0.3);
        let emitted = (0..10_000).filter(|_| source.poll(at(0)).is_some()).count();
        assert!((2_500..3_500).contains(&emitted), "emitted {emitted}");
    }

    #[test]
    fn test_scripted_source_replays_then_goes_quiet() {
        let mut source = ScriptedEventSource::new([None, Some(event(9, "B-1"))]);

        assert!(source.poll(at(0)).is_none());
        let e = source.poll(at(5)).unwrap();
        assert_eq!(e.id, 9);
        assert_eq!(e.timestamp, at(5));
        assert!(source.poll(at(10)).is_none());
    }

    #[test]
    fn test_zone_grid_statuses() {
        let mut feed = EventFeed::new(FEED_CAPACITY);
        feed.push(event(1, "B-7"));

        let grid = zone_grid(&feed, 32, 28);

        assert_eq!(grid.len(), 32);
        assert_eq!(grid[0].label, "A-1");
        assert_eq!(grid[8].label, "B-1");
        assert_eq!(grid[31].label, "D-8");
        assert_eq!(grid[14].label, "B-7");
        assert_eq!(grid[14].status, ZoneStatus::Alert);
        assert_eq!(grid[0].status, ZoneStatus::Occupied);
        assert_eq!(grid[29].status, ZoneStatus::Empty);
    }

    #[test]
    fn test_event_kind_and_severity_names() {
        assert_eq!(EventKind::LeftSeat.to_string(), "left_seat");
        assert_eq!(EventKind::MultipleStudents.label(), "Multiple Students");
        assert_eq!(Severity::High.to_string(), "high");
    }
}
