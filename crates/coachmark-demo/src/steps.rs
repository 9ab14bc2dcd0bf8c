#![forbid(unsafe_code)]

//! Built-in step declarations for the home screen.

use coachmark::{Step, StepList, StepSourceOrigin, load_or_fallback, parse_or_fallback};
use std::path::Path;

use crate::home;

/// Declarative step source bundled with the binary.
pub const EMBEDDED_STEPS: &str = include_str!("../assets/walkthrough.json");

/// Steps used when the declared source cannot be read.
pub fn fallback_steps() -> Vec<Step> {
    vec![
        Step::new(
            "step_profile",
            "Profile",
            "Open your profile and account details from here.",
            home::PROFILE,
        ),
        Step::new(
            "step_balance",
            "Balance",
            "Your available balance at a glance.",
            home::BALANCE,
        ),
        Step::new(
            "step_quick_actions",
            "Quick Actions",
            "Reach the actions you use most.",
            home::QUICK_ACTIONS,
        )
        .button_text("Got it!"),
    ]
}

/// Load steps from `path`, or from the embedded source when no path is
/// given. Either way a broken source yields [`fallback_steps`].
pub fn resolve_steps(path: Option<&Path>) -> (StepList, StepSourceOrigin) {
    match path {
        Some(path) => load_or_fallback(path, fallback_steps()),
        None => parse_or_fallback(EMBEDDED_STEPS, fallback_steps()),
    }
}
