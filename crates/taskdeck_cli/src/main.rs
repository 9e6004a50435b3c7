//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskdeck_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use chrono::{DateTime, Utc};

fn main() {
    println!("taskdeck_core version={}", taskdeck_core::core_version());

    let reference = DateTime::<Utc>::UNIX_EPOCH;
    let resolved = taskdeck_core::resolve_due_date(Some("2 weeks"), reference);
    println!(
        "taskdeck_core resolve(\"2 weeks\", 1970-01-01)={}",
        resolved.map_or("none".to_string(), |date| date.to_string())
    );
}
