//! Colorful console output for planner events.
//!
//! Provides a custom `tracing` layer that formats planning events with colors.
//! Available when the `console` feature is enabled.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_FILTER: &str = "planforge_planner=info";

/// Initializes the planner console output.
///
/// Safe to call multiple times - only the first call has effect.
/// `RUST_LOG` overrides the default `planforge_planner=info` filter.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // Another subscriber may already be installed by the host program.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(PlannerConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let banner = r#"
 ____  _             _____
|  _ \| | __ _ _ __ |  ___|__  _ __ __ _  ___
| |_) | |/ _` | '_ \| |_ / _ \| '__/ _` |/ _ \
|  __/| | (_| | | | |  _| (_) | | | (_| |  __/
|_|   |_|\__,_|_| |_|_|  \___/|_|  \__, |\___|
                                   |___/
"#;

    let version_line = format!(
        "              v{} - Goal-Oriented Action Planner\n",
        env!("CARGO_PKG_VERSION")
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats planner events with colors.
pub struct PlannerConsoleLayer;

impl<S: Subscriber> Layer<S> for PlannerConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let target = event.metadata().target();
        if !target.starts_with("planforge_planner") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_planner_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    goal: Option<String>,
    outcome: Option<String>,
    plan: Option<String>,
    reason: Option<String>,
    cost: Option<f64>,
    iteration_limit: Option<u64>,
    expansions: Option<u64>,
    generated: Option<u64>,
    pruned: Option<u64>,
    steps: Option<u64>,
    duration_ms: Option<u64>,
}

impl EventVisitor {
    fn set_text(&mut self, name: &str, value: String) {
        match name {
            "event" => self.event = Some(value),
            "goal" => self.goal = Some(value),
            "outcome" => self.outcome = Some(value),
            "plan" => self.plan = Some(value),
            "reason" => self.reason = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.set_text(field.name(), s.trim_matches('"').to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_text(field.name(), value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "cost" {
            self.cost = Some(value);
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "iteration_limit" => self.iteration_limit = Some(value),
            "expansions" => self.expansions = Some(value),
            "generated" => self.generated = Some(value),
            "pruned" => self.pruned = Some(value),
            "steps" => self.steps = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        // Counters are never negative; drop anything that is.
        if let Ok(value) = u64::try_from(value) {
            self.record_u64(field, value);
        }
    }
}

fn format_planner_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "plan_start" => format_plan_start(v),
        "plan_end" => format_plan_end(v),
        "plan_selected" => format_plan_selected(v),
        _ => String::new(),
    }
}

fn format_plan_start(v: &EventVisitor) -> String {
    let goal = v.goal.as_deref().unwrap_or("?");
    let limit = v.iteration_limit.unwrap_or(0);

    format!(
        "{} {} {} Planning for {} (iteration limit {})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Planner]".bright_cyan(),
        goal.white().bold(),
        limit.to_formatted_string(&Locale::en).yellow()
    )
}

fn format_plan_end(v: &EventVisitor) -> String {
    let goal = v.goal.as_deref().unwrap_or("?");
    let outcome = v.outcome.as_deref().unwrap_or("unknown");
    let expansions = v.expansions.unwrap_or(0);
    let generated = v.generated.unwrap_or(0);
    let pruned = v.pruned.unwrap_or(0);
    let duration = format_duration_ms(v.duration_ms.unwrap_or(0));

    let result = if outcome == "found" {
        format!(
            "{} cost ({})",
            v.plan.as_deref().unwrap_or("[]").bright_green().bold(),
            format_cost(v.cost.unwrap_or(0.0)).yellow()
        )
    } else {
        format!(
            "{} ({})",
            outcome.bright_red().bold(),
            v.reason.as_deref().unwrap_or("")
        )
    };

    format!(
        "{} {} {} Planning for {} ended: {}, time spent ({}), expansions ({}), generated ({}), pruned ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Planner]".bright_cyan(),
        goal.white().bold(),
        result,
        duration.yellow(),
        expansions.to_formatted_string(&Locale::en).bright_magenta(),
        generated.to_formatted_string(&Locale::en).white(),
        pruned.to_formatted_string(&Locale::en).white()
    )
}

fn format_plan_selected(v: &EventVisitor) -> String {
    let goal = v.goal.as_deref().unwrap_or("?");
    let steps = v.steps.unwrap_or(0);

    format!(
        "    {} Pursuing {} with {} step(s)",
        "->".bright_blue(),
        goal.white().bold(),
        steps.to_formatted_string(&Locale::en).yellow()
    )
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

fn format_cost(cost: f64) -> String {
    if cost.fract() == 0.0 {
        format!("{}", cost as i64)
    } else {
        format!("{:.2}", cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn visitor(event: &str) -> EventVisitor {
        EventVisitor {
            event: Some(event.to_string()),
            goal: Some("has_wood == true".to_string()),
            ..EventVisitor::default()
        }
    }

    #[test]
    fn test_unknown_events_are_silent() {
        assert!(format_planner_event(&visitor("expand")).is_empty());
        assert!(format_planner_event(&EventVisitor::default()).is_empty());
    }

    #[test]
    fn test_plan_end_mentions_plan_and_counters() {
        let mut v = visitor("plan_end");
        v.outcome = Some("found".to_string());
        v.plan = Some("[ChopWood]".to_string());
        v.cost = Some(1.0);
        v.expansions = Some(1234);

        let line = format_planner_event(&v);

        assert!(line.contains("ChopWood"));
        assert!(line.contains("has_wood == true"));
        assert!(line.contains("1,234"));
    }

    #[test]
    fn test_plan_end_failure_shows_outcome() {
        let mut v = visitor("plan_end");
        v.outcome = Some("unreachable".to_string());

        assert!(format_planner_event(&v).contains("unreachable"));
    }

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(5), "5ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_format_cost() {
        assert_eq!(format_cost(3.0), "3");
        assert_eq!(format_cost(2.5), "2.50");
    }

    /// Records the last event seen into an [`EventVisitor`].
    struct Capture(Arc<Mutex<Option<EventVisitor>>>);

    impl<S: Subscriber> Layer<S> for Capture {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = EventVisitor::default();
            event.record(&mut visitor);
            *self.0.lock().unwrap() = Some(visitor);
        }
    }

    fn capture(emit: impl FnOnce()) -> EventVisitor {
        let captured = Arc::new(Mutex::new(None));
        let subscriber = tracing_subscriber::registry().with(Capture(Arc::clone(&captured)));
        tracing::subscriber::with_default(subscriber, emit);
        let visitor = captured.lock().unwrap().take();
        visitor.unwrap()
    }

    #[test]
    fn test_signed_counters() {
        let v = capture(|| {
            tracing::info!(event = "plan_end", expansions = -3i64, pruned = 2i64, cost = 1.5);
        });

        assert_eq!(v.event.as_deref(), Some("plan_end"));
        assert_eq!(v.expansions, None);
        assert_eq!(v.pruned, Some(2));
        assert_eq!(v.cost, Some(1.5));
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
