//! Helpers shared by the subcommands.

use std::time::Duration;

use console::style;
use locfetch_core::pipeline::{UnitOutcome, UnitReport};
use locfetch_core::DistConfig;

/// Print the version banner the way the original tools did.
pub fn banner(command: &str) {
    println!("locfetch {command} v{}", env!("CARGO_PKG_VERSION"));
}

pub fn build_config(api_base: &str, proxy: Option<&str>, timeout_secs: u64) -> DistConfig {
    let mut config = DistConfig::new()
        .with_api_base(api_base)
        .with_timeout(Duration::from_secs(timeout_secs));
    if let Some(proxy) = proxy {
        config = config.with_proxy(proxy);
    }
    config
}

/// Print one line per unit and derive the process exit code.
///
/// Multi-unit flows succeed as long as at least one unit persisted; only a
/// run with zero successes exits non-zero.
pub fn summarize(reports: &[UnitReport]) -> i32 {
    for report in reports {
        match &report.outcome {
            UnitOutcome::Persisted => {
                println!("{} {}", style("✓").green(), report.unit);
            }
            UnitOutcome::Failed(e) => {
                println!("{} {}: {e}", style("✗").red(), report.unit);
            }
        }
    }

    let succeeded = reports.iter().filter(|r| r.is_persisted()).count();
    println!(
        "{succeeded}/{} unit(s) completed successfully",
        reports.len()
    );

    if succeeded == 0 && !reports.is_empty() {
        1
    } else {
        0
    }
}
