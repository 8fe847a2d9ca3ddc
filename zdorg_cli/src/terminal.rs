//! Terminal detection and capability utilities

use is_terminal::IsTerminal;
use std::env;
use std::io::{stdin, stdout};

/// Check if stdout is connected to an interactive terminal
pub fn is_interactive() -> bool {
    if !stdout().is_terminal() {
        return false;
    }

    // CI runners may allocate a TTY but nobody is watching
    if is_ci_environment() {
        return false;
    }

    if env::var("DEBIAN_FRONTEND").unwrap_or_default() == "noninteractive" {
        return false;
    }

    true
}

/// Check if an operator can answer prompts on stdin
pub fn can_prompt() -> bool {
    stdin().is_terminal() && !is_ci_environment()
}

/// Check if the terminal supports ANSI escape codes for colors
pub fn supports_ansi() -> bool {
    if !is_interactive() {
        return false;
    }

    let term = env::var("TERM").unwrap_or_default();
    if term == "dumb" {
        return false;
    }

    #[cfg(windows)]
    {
        if term.is_empty() {
            return env::var("WT_SESSION").is_ok()
                || env::var("ConEmuANSI").unwrap_or_default() == "ON";
        }
    }

    !term.is_empty()
}

/// Decide whether output should be colored
///
/// `NO_COLOR` always wins over the configuration.
pub fn use_color(color_enabled: bool) -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    color_enabled && supports_ansi()
}

/// Detect if running in a CI environment
fn is_ci_environment() -> bool {
    let ci_vars = [
        "CI",
        "CONTINUOUS_INTEGRATION",
        "JENKINS_URL",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "TRAVIS",
        "CIRCLECI",
        "BUILDKITE",
        "DRONE",
        "TEAMCITY_VERSION",
        "TF_BUILD", // Azure DevOps
    ];

    ci_vars.iter().any(|var| env::var(var).is_ok())
}
