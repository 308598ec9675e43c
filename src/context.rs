//! Services shared by every view: the toast channel and navigation requests.
//!
//! Built once at startup and handed to view handlers explicitly; views never
//! reach for global state.

use std::collections::VecDeque;
use std::time::Duration;

use crate::route::Route;

const MAX_TOASTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    remaining: Duration,
}

#[derive(Debug, Clone)]
pub struct Notifier {
    toasts: VecDeque<Toast>,
    lifetime: Duration,
}

impl Notifier {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            lifetime,
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Info, message.into());
    }

    fn push(&mut self, kind: ToastKind, message: String) {
        self.toasts.push_back(Toast {
            kind,
            message,
            remaining: self.lifetime,
        });
        while self.toasts.len() > MAX_TOASTS {
            self.toasts.pop_front();
        }
    }

    /// Age every toast and drop the expired ones
    pub fn advance(&mut self, elapsed: Duration) {
        for toast in self.toasts.iter_mut() {
            toast.remaining = toast.remaining.saturating_sub(elapsed);
        }
        self.toasts.retain(|t| !t.remaining.is_zero());
    }

    pub fn toasts(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.back()
    }
}

#[derive(Debug, Clone)]
pub struct Context {
    pub notifier: Notifier,
    pending_route: Option<Route>,
    quit_requested: bool,
}

impl Context {
    pub fn new(toast_lifetime: Duration) -> Self {
        Self {
            notifier: Notifier::new(toast_lifetime),
            pending_route: None,
            quit_requested: false,
        }
    }

    /// Ask the shell to switch views once the current handler returns
    pub fn navigate(&mut self, route: Route) {
        self.pending_route = Some(route);
    }

    pub fn take_navigation(&mut self) -> Option<Route> {
        self.pending_route.take()
    }

    pub fn quit(&mut self) {
        self.quit_requested = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }
}
