use indicatif::{ProgressBar, ProgressStyle};

/// Environment variables set by common CI providers.
const CI_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
];

fn is_ci() -> bool {
    CI_VARS.iter().any(|var| std::env::var_os(var).is_some())
}

/// Spinner shown while the schema is retrieved.
///
/// `None` when progress output is disabled; hidden in CI so logs stay clean.
pub fn fetch_spinner(enabled: bool, source: &str) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }

    let pb = if is_ci() {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };

    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .expect("Failed to set progress style"),
    );
    pb.set_message(format!("Fetching schema from {source}..."));
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    Some(pb)
}
