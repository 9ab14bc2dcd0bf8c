#![forbid(unsafe_code)]

//! Scripted navigation commands.
//!
//! | Token | Effect |
//! |---|---|
//! | `n` | next control |
//! | `p` | back control |
//! | `f` | finish control (last step only) |
//! | `d` | dismiss control |
//! | `s` | host-side skip |
//! | `g<N>` | jump to step `N` (1-based) |

use std::fmt;
use std::str::FromStr;

use coachmark::{NavAction, WalkthroughState};

/// One scripted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptCommand {
    /// Tap a card control.
    Control(NavAction),
    Skip,
    /// Jump to a 1-based step number.
    GoTo(usize),
}

impl ScriptCommand {
    pub fn apply(self, state: &mut WalkthroughState) {
        match self {
            Self::Control(action) => state.activate(action),
            Self::Skip => state.skip(),
            Self::GoTo(number) => state.go_to_step(number.saturating_sub(1)),
        }
    }
}

impl FromStr for ScriptCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        match token {
            "n" | "next" => Ok(Self::Control(NavAction::Next)),
            "p" | "prev" | "back" => Ok(Self::Control(NavAction::Previous)),
            "f" | "finish" => Ok(Self::Control(NavAction::Finish)),
            "d" | "dismiss" => Ok(Self::Control(NavAction::Dismiss)),
            "s" | "skip" => Ok(Self::Skip),
            _ => match token.strip_prefix('g').map(str::parse::<usize>) {
                Some(Ok(n)) if n > 0 => Ok(Self::GoTo(n)),
                _ => Err(format!("unknown script command {token:?}")),
            },
        }
    }
}

impl fmt::Display for ScriptCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Control(NavAction::Next) => f.write_str("n"),
            Self::Control(NavAction::Previous) => f.write_str("p"),
            Self::Control(NavAction::Finish) => f.write_str("f"),
            Self::Control(NavAction::Dismiss) => f.write_str("d"),
            Self::Skip => f.write_str("s"),
            Self::GoTo(n) => write!(f, "g{n}"),
        }
    }
}

/// Parse a comma-separated command line, skipping empty tokens.
pub fn parse_script(line: &str) -> Result<Vec<ScriptCommand>, String> {
    line.split(',')
        .filter(|t| !t.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// The script used when none is given: forward through every step, then
/// finish.
pub fn default_script(step_count: usize) -> Vec<ScriptCommand> {
    let mut script = vec![ScriptCommand::Control(NavAction::Next); step_count.saturating_sub(1)];
    if step_count > 0 {
        script.push(ScriptCommand::Control(NavAction::Finish));
    }
    script
}

#[cfg(test)]
mod tests {
    use super::*;
    use coachmark::Step;

    #[test]
    fn parses_tokens() {
        assert_eq!(
            parse_script("n, p,f,d,s,g3,,"),
            Ok(vec![
                ScriptCommand::Control(NavAction::Next),
                ScriptCommand::Control(NavAction::Previous),
                ScriptCommand::Control(NavAction::Finish),
                ScriptCommand::Control(NavAction::Dismiss),
                ScriptCommand::Skip,
                ScriptCommand::GoTo(3),
            ])
        );
    }

    #[test]
    fn rejects_unknown_tokens() {
        assert!(parse_script("n,x").is_err());
        assert!("g0".parse::<ScriptCommand>().is_err());
        assert!("g".parse::<ScriptCommand>().is_err());
    }

    #[test]
    fn display_round_trips_short_form() {
        for token in ["n", "p", "f", "d", "s", "g12"] {
            let cmd: ScriptCommand = token.parse().unwrap();
            assert_eq!(cmd.to_string(), token);
        }
    }

    #[test]
    fn default_script_walks_to_the_end() {
        let steps: Vec<Step> = (0..3)
            .map(|i| Step::new(format!("s{i}"), "T", "D", format!("k{i}")))
            .collect();
        let mut state = WalkthroughState::new(steps, true);
        let script = default_script(state.step_count());
        assert_eq!(script.len(), 3);
        for cmd in script {
            cmd.apply(&mut state);
        }
        assert!(!state.is_visible());
        assert!(default_script(0).is_empty());
    }

    #[test]
    fn goto_is_one_based() {
        let steps: Vec<Step> = (0..3)
            .map(|i| Step::new(format!("s{i}"), "T", "D", format!("k{i}")))
            .collect();
        let mut state = WalkthroughState::new(steps, true);
        ScriptCommand::GoTo(3).apply(&mut state);
        assert_eq!(state.current_step_index(), 2);
    }
}
