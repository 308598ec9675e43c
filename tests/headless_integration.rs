use std::sync::mpsc;
use std::time::Duration;

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use labguard::app::{App, SourceFactory};
use labguard::catalog::Catalog;
use labguard::config::{Config, ConfigStore, FileConfigStore};
use labguard::context::ToastKind;
use labguard::feed::{
    DetectionEvent, EventKind, EventSource, RandomEventSource, ScriptedEventSource, Severity,
};
use labguard::route::Route;
use labguard::runtime::{AppEvent, ChannelEventSource, Runner};
use labguard::views::View;

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

// Drain every queued event through the app the way the binary's loop does
fn drive(app: &mut App, events: Vec<AppEvent>, tick: Duration) {
    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(ChannelEventSource::new(rx), tick);
    let count = events.len();
    for ev in events {
        tx.send(ev).unwrap();
    }

    for _ in 0..count {
        let (event, elapsed) = runner.step();
        app.on_tick(elapsed);
        if let AppEvent::Key(k) = event {
            app.on_key(k);
        }
    }
}

fn app_at(route: &str, config: Config) -> App {
    App::new(config, Catalog::embedded().unwrap(), Route::parse(route), Some(11))
}

// Headless exam flow without a TTY: answer two of three questions and submit
#[test]
fn headless_exam_submission_reports_answer_count() {
    let mut app = app_at("/exam/demo", Config::default());

    drive(
        &mut app,
        vec![
            key(KeyCode::Char('b')), // O(log n)
            key(KeyCode::Right),
            key(KeyCode::Char('b')), // Stack
            key(KeyCode::Right),
            key(KeyCode::Char('s')),
        ],
        Duration::from_millis(5),
    );

    match &app.view {
        View::Exam(view) => {
            assert!(view.session.is_submitted());
            assert_eq!(view.session.answers().len(), 2);
            assert!(!view.countdown_active());
        }
        other => panic!("expected exam view, got {other:?}"),
    }
    let toast = app.ctx.notifier.latest().unwrap();
    assert_eq!(toast.kind, ToastKind::Success);
    assert_eq!(
        toast.message,
        "Exam submitted! You answered 2 out of 3 questions."
    );
}

#[test]
fn headless_exam_times_out_with_no_answers() {
    let config = Config {
        exam_duration_secs: 1,
        ..Config::default()
    };
    let mut app = app_at("/exam/1", config);

    // the runner times out into Tick events; real time drives the countdown
    let (_tx, rx) = mpsc::channel();
    let mut runner = Runner::new(ChannelEventSource::new(rx), Duration::from_millis(20));
    for _ in 0..200u32 {
        let (_, elapsed) = runner.step();
        app.on_tick(elapsed);
        if app.ctx.notifier.latest().is_some() {
            break;
        }
    }

    assert_eq!(
        app.ctx.notifier.latest().unwrap().message,
        "Exam submitted! You answered 0 out of 3 questions."
    );
}

#[test]
fn headless_navigation_round_trip() {
    let mut app = app_at("/", Config::default());

    drive(
        &mut app,
        vec![
            key(KeyCode::Char('i')),
            key(KeyCode::Down),
            key(KeyCode::Char('m')), // scheduled exam: refused
            key(KeyCode::Up),
            key(KeyCode::Char('m')),
        ],
        Duration::from_millis(5),
    );

    assert_eq!(app.route, Route::Monitor);
    assert!(app
        .ctx
        .notifier
        .toasts()
        .any(|t| t.message == "Only active exams can be monitored"));

    drive(
        &mut app,
        vec![key(KeyCode::Esc), key(KeyCode::Esc)],
        Duration::from_millis(5),
    );
    assert_eq!(app.route, Route::Home);
}

#[test]
fn headless_monitor_feed_is_bounded_and_stops_on_exit() {
    let script = (0..30).map(|i| {
        Some(DetectionEvent {
            id: 100 + i,
            zone: "Zone C-2".to_string(),
            kind: EventKind::MultipleStudents,
            timestamp: Local::now(),
            severity: Severity::High,
        })
    });
    let script: Vec<_> = script.collect();
    let factory: SourceFactory = Box::new(move |_cfg: &Config| {
        Box::new(ScriptedEventSource::new(script.clone())) as Box<dyn EventSource>
    });
    let mut app = App::with_source_factory(
        Config::default(),
        Catalog::embedded().unwrap(),
        Route::Monitor,
        factory,
    );

    // one emission per eight seconds of elapsed time
    app.on_tick(Duration::from_secs(8 * 12));

    match &app.view {
        View::Monitor(view) => {
            assert_eq!(view.feed.len(), 10);
            assert_eq!(view.feed.latest().unwrap().id, 111);
        }
        other => panic!("expected monitor view, got {other:?}"),
    }

    // opened at startup, so the way back is home
    app.on_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
    assert_eq!(app.route, Route::Home);
}

#[test]
fn headless_config_file_cannot_widen_the_feed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "feed": { "capacity": 50, "emission_period_secs": 0 } }"#,
    )
    .unwrap();
    let config = FileConfigStore::with_path(&path).load();
    assert_eq!(config.feed.emission_period(), Duration::from_secs(1));

    let always: SourceFactory = Box::new(|cfg: &Config| {
        Box::new(RandomEventSource::from_seed(
            Some(5),
            cfg.feed.zones.clone(),
            1.0,
        )) as Box<dyn EventSource>
    });
    let mut app = App::with_source_factory(
        config,
        Catalog::embedded().unwrap(),
        Route::Monitor,
        always,
    );

    // forty draws at the one second floor
    app.on_tick(Duration::from_secs(40));

    match &app.view {
        View::Monitor(view) => assert_eq!(view.feed.len(), 10),
        other => panic!("expected monitor view, got {other:?}"),
    }
}

#[test]
fn headless_invalid_draft_stays_on_form() {
    let mut app = app_at("/instructor/create-exam", Config::default());

    drive(
        &mut app,
        vec![AppEvent::Key(KeyEvent::new(
            KeyCode::Char('s'),
            KeyModifiers::CONTROL,
        ))],
        Duration::from_millis(5),
    );

    assert_eq!(app.route, Route::CreateExam);
    let toast = app.ctx.notifier.latest().unwrap();
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.message, "Please fill in exam title and description");
}
