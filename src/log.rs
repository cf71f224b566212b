use std::fmt::Write;

use tracing::{field::Field, Event, Level, Subscriber};
use tracing_subscriber::{layer::Context, prelude::*, EnvFilter, Layer};

static TRACE_ENV: &str = "DIRSIZE_TRACE";

/// Install a stderr subscriber when `DIRSIZE_TRACE` holds a level name such
/// as `debug`. Does nothing if a global subscriber already exists.
pub fn enable_by_env() {
    let Ok(level) = std::env::var(TRACE_ENV) else {
        return;
    };
    if level.parse::<Level>().is_err() {
        return;
    }
    let _ = tracing_subscriber::registry()
        .with(EventLine)
        .with(EnvFilter::from_env(TRACE_ENV))
        .try_init();
}

/// Prints one line per event: `LEVEL message key=value ...`.
struct EventLine;

impl<S: Subscriber> Layer<S> for EventLine {
    fn on_event(&self, event: &Event<'_>, _: Context<'_, S>) {
        let level = event.metadata().level();
        let mut line = if *level <= Level::WARN {
            color::red(level)
        } else if *level == Level::INFO {
            color::green(level)
        } else {
            color::cyan(level)
        };
        event.record(&mut Fields(&mut line));
        eprintln!("{line}");
    }
}

struct Fields<'a>(&'a mut String);

impl tracing::field::Visit for Fields<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let _ = if field.name() == "message" {
            write!(self.0, " {value:?}")
        } else {
            write!(self.0, " {}={value:?}", color::bold(&field.name()))
        };
    }
}

pub mod color {
    const BOLD: &str = "\u{001b}[1m";
    const RED: &str = "\u{001b}[31m";
    const GREEN: &str = "\u{001b}[32m";
    const CYAN: &str = "\u{001b}[36m";
    const RESET: &str = "\u{001b}[0m";

    pub fn bold<T: core::fmt::Display>(s: &T) -> String {
        format!("{BOLD}{s}{RESET}")
    }

    pub fn red<T: core::fmt::Display>(s: &T) -> String {
        format!("{RED}{s}{RESET}")
    }

    pub fn green<T: core::fmt::Display>(s: &T) -> String {
        format!("{GREEN}{s}{RESET}")
    }

    pub fn cyan<T: core::fmt::Display>(s: &T) -> String {
        format!("{CYAN}{s}{RESET}")
    }
}
