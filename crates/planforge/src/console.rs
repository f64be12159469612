//! Colored terminal output for initializer and selector events.
//!
//! [`init`] installs a `tracing` subscriber whose only layer is
//! [`PlanForgeConsoleLayer`]. The layer understands the structured `event`
//! field the solver crates emit and renders one line per known event.

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_FILTER: &str = "planforge_solver=info";

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Installs the console layer as the global subscriber.
///
/// Later calls do nothing. `RUST_LOG` overrides the default
/// `planforge_solver=info` filter.
pub fn init() {
    INSTALLED.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        // Another subscriber may already be installed; keep it.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(PlanForgeConsoleLayer)
            .try_init();
    });
}

/// Renders PlanForge events to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanForgeConsoleLayer;

impl<S: Subscriber> Layer<S> for PlanForgeConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("planforge") {
            return;
        }
        let mut fields = Fields::default();
        event.record(&mut fields);
        if let Some(line) = render(&fields) {
            let _ = writeln!(io::stdout().lock(), "{}", line);
        }
    }
}

/// Field values of one event, keyed by field name.
#[derive(Debug, Default)]
struct Fields {
    text: HashMap<&'static str, String>,
    numbers: HashMap<&'static str, u64>,
    flags: HashMap<&'static str, bool>,
}

impl Fields {
    fn text(&self, name: &str) -> &str {
        self.text.get(name).map(String::as_str).unwrap_or("?")
    }

    fn number(&self, name: &str) -> u64 {
        self.numbers.get(name).copied().unwrap_or(0)
    }

    fn count(&self, name: &str) -> String {
        self.number(name).to_formatted_string(&Locale::en)
    }
}

impl Visit for Fields {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{:?}", value);
        self.text
            .insert(field.name(), rendered.trim_matches('"').to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.text.insert(field.name(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.numbers.insert(field.name(), value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.numbers.insert(field.name(), value.max(0) as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.flags.insert(field.name(), value);
    }
}

fn render(fields: &Fields) -> Option<String> {
    let line = match fields.text.get("event")?.as_str() {
        "phase_start" => format!(
            "{} {} {} phase ({}) started: demand units ({}), entities to build ({})",
            prefix("INFO"),
            format!("[{}]", fields.text("phase")).bright_cyan(),
            fields.text("phase").white().bold(),
            fields.number("phase_index").yellow(),
            fields.count("demand_count").bright_yellow(),
            fields.count("entity_count").bright_yellow(),
        ),
        "phase_end" => {
            let mut line = format!(
                "{} {} {} phase ({}) ended: time spent ({}), score ({}), speed ({}/sec), step total ({}), skipped candidates ({})",
                prefix("INFO"),
                format!("[{}]", fields.text("phase")).bright_cyan(),
                fields.text("phase").white().bold(),
                fields.number("phase_index").yellow(),
                elapsed(Duration::from_millis(fields.number("duration_ms"))).yellow(),
                score(fields.text("score")),
                fields.count("speed").bright_magenta().bold(),
                fields.count("steps"),
                fields.count("skipped"),
            );
            if fields.flags.get("terminated") == Some(&true) {
                line.push_str(&format!(" {}", "(terminated early)".bright_red()));
            }
            line
        }
        "entity_committed" => format!(
            "    {} entity {:>6} <- {} | {}",
            "->".bright_blue(),
            fields.count("entity_id"),
            fields.text("value"),
            score(fields.text("score")),
        ),
        "candidate_skipped" => format!(
            "{} entity {} skipped value {}: {}",
            prefix("WARN"),
            fields.number("entity_id"),
            fields.text("value"),
            fields.text("error"),
        ),
        "selector_built" => format!(
            "{} {} {} selector at {}",
            prefix("DEBUG"),
            "[Selector]".bright_cyan(),
            fields.text("kind").white().bold(),
            fields.text("path"),
        ),
        _ => return None,
    };
    Some(line)
}

/// Clock time within the current day plus the colored level.
fn prefix(level: &str) -> String {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let clock = format!(
        "{:5}.{:03}",
        since_epoch.as_secs() % 100_000,
        since_epoch.subsec_millis()
    );
    let level = match level {
        "INFO" => level.bright_green().to_string(),
        "WARN" => level.bright_yellow().to_string(),
        _ => level.bright_black().to_string(),
    };
    format!("{} {}", clock.bright_black(), level)
}

fn elapsed(duration: Duration) -> String {
    let ms = duration.as_millis();
    match ms {
        0..=999 => format!("{}ms", ms),
        1_000..=59_999 => format!("{:.2}s", duration.as_secs_f64()),
        _ => format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000),
    }
}

/// Colors each `<n><level>` part of a score such as `-2hard/0medium/-5soft`.
fn score(text: &str) -> String {
    text.split('/')
        .map(|part| {
            let negative = part.starts_with('-');
            if part.ends_with("hard") {
                if negative {
                    part.bright_red().to_string()
                } else {
                    part.bright_green().to_string()
                }
            } else if negative {
                part.yellow().to_string()
            } else {
                part.white().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
