use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};
use tracing::info;

use crate::config::FeedConfig;
use crate::context::Context;
use crate::feed::{zone_grid, EventFeed, EventSource, ZoneCell, FEED_CAPACITY};
use crate::route::Route;
use crate::timer::IntervalTimer;

/// Live monitoring dashboard: a detection feed refreshed by a periodic emitter
pub struct MonitorView {
    pub feed: EventFeed,
    pub total_zones: usize,
    pub active_students: usize,
    pub compliant_zones: usize,
    source: Box<dyn EventSource>,
    emitter: IntervalTimer,
    back: Route,
}

impl MonitorView {
    pub fn new(cfg: &FeedConfig, source: Box<dyn EventSource>, now: DateTime<Local>) -> Self {
        info!(
            period_secs = cfg.emission_period().as_secs(),
            probability = cfg.emission_probability(),
            "monitoring started"
        );
        Self {
            feed: EventFeed::seeded(FEED_CAPACITY, now),
            total_zones: cfg.total_zones,
            active_students: cfg.active_students,
            compliant_zones: cfg.compliant_zones,
            source,
            emitter: IntervalTimer::new(cfg.emission_period()),
            back: Route::Instructor,
        }
    }

    /// Route that `Esc` leads back to
    pub fn returning_to(mut self, route: Route) -> Self {
        self.back = route;
        self
    }

    pub fn back(&self) -> &Route {
        &self.back
    }

    pub fn emitter_active(&self) -> bool {
        self.emitter.is_active()
    }

    pub fn advance(&mut self, elapsed: Duration, now: DateTime<Local>) {
        for _ in 0..self.emitter.advance(elapsed) {
            if let Some(event) = self.source.poll(now) {
                self.feed.push(event);
            }
        }
    }

    pub fn grid(&self) -> Vec<ZoneCell> {
        zone_grid(&self.feed, self.total_zones, self.active_students)
    }

    pub fn teardown(&mut self) {
        self.emitter.cancel();
        info!(events = self.feed.len(), "monitoring stopped");
    }

    pub fn on_key(&mut self, key: KeyEvent, ctx: &mut Context) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
            ctx.navigate(self.back.clone());
        }
    }
}

impl std::fmt::Debug for MonitorView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonitorView")
            .field("feed", &self.feed)
            .field("emitter", &self.emitter)
            .field("back", &self.back)
            .finish_non_exhaustive()
    }
}
