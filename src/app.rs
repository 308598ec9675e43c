use std::time::Duration;

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::context::Context;
use crate::feed::{EventSource, RandomEventSource};
use crate::route::Route;
use crate::views::{ExamEditor, ExamView, InstructorView, MonitorView, View};

/// Builds the detector used whenever the monitor dashboard opens
pub type SourceFactory = Box<dyn Fn(&Config) -> Box<dyn EventSource>>;

pub struct App {
    pub config: Config,
    pub catalog: Catalog,
    pub route: Route,
    pub view: View,
    pub ctx: Context,
    source_factory: SourceFactory,
}

impl App {
    pub fn new(config: Config, catalog: Catalog, start: Route, seed: Option<u64>) -> Self {
        let factory: SourceFactory = Box::new(move |cfg: &Config| {
            Box::new(RandomEventSource::from_seed(
                seed,
                cfg.feed.zones.clone(),
                cfg.feed.emission_probability(),
            )) as Box<dyn EventSource>
        });
        Self::with_source_factory(config, catalog, start, factory)
    }

    pub fn with_source_factory(
        config: Config,
        catalog: Catalog,
        start: Route,
        source_factory: SourceFactory,
    ) -> Self {
        let ctx = Context::new(config.toast_lifetime());
        let mut app = Self {
            config,
            catalog,
            route: Route::Home,
            view: View::Home,
            ctx,
            source_factory,
        };
        app.navigate(start);
        app
    }

    /// Tear down the current view and open the one for `route`
    pub fn navigate(&mut self, route: Route) {
        self.view.teardown();
        info!(from = %self.route, to = %route, "navigate");
        self.view = self.build_view(&route);
        self.route = route;
    }

    fn build_view(&self, route: &Route) -> View {
        match route {
            Route::Home => View::Home,
            Route::Instructor => View::Instructor(InstructorView::new(&self.catalog)),
            Route::CreateExam => View::CreateExam(ExamEditor::new(self.config.redirect_delay())),
            Route::ExamSession { exam_id } => View::Exam(ExamView::new(
                exam_id.clone(),
                self.catalog.paper_for(exam_id),
                self.config.exam_duration_secs,
            )),
            Route::Monitor => {
                let back = match self.route {
                    Route::Home => Route::Home,
                    _ => Route::Instructor,
                };
                View::Monitor(
                    MonitorView::new(
                        &self.config.feed,
                        (self.source_factory)(&self.config),
                        Local::now(),
                    )
                    .returning_to(back),
                )
            }
            Route::NotFound(path) => {
                warn!(path = %path, "no route matched");
                View::NotFound(path.clone())
            }
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.ctx.quit();
            return;
        }
        self.view.on_key(key, &mut self.ctx);
        self.apply_navigation();
    }

    pub fn on_tick(&mut self, elapsed: Duration) {
        self.ctx.notifier.advance(elapsed);
        self.view.advance(elapsed, Local::now(), &mut self.ctx);
        self.apply_navigation();
    }

    pub fn should_quit(&self) -> bool {
        self.ctx.should_quit()
    }

    /// Release every view-owned timer before the process exits
    pub fn shutdown(&mut self) {
        self.view.teardown();
    }

    fn apply_navigation(&mut self) {
        if let Some(route) = self.ctx.take_navigation() {
            self.navigate(route);
        }
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("route", &self.route)
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}
