#![forbid(unsafe_code)]

//! Drives one walkthrough session over the home screen and writes an ASCII
//! frame after every command that leaves the overlay up.

use std::cell::Cell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use coachmark::{
    FinishReason, LayoutPass, MaskRaster, OverlayRenderer, Result, Size, StepList,
    StepSourceOrigin, WalkthroughConfig, WalkthroughEvent, WalkthroughState,
};
use tracing::{info, warn};

use crate::home::HomeScreen;
use crate::script::{ScriptCommand, parse_script};

/// Where commands come from.
pub enum CommandSource<'a> {
    Script(Vec<ScriptCommand>),
    /// One or more comma-separated commands per line; `q` quits.
    Interactive(&'a mut dyn BufRead),
}

/// Session parameters.
#[derive(Debug, Clone)]
pub struct Session {
    pub viewport: Size,
    pub cols: usize,
    pub rows: usize,
    pub config: WalkthroughConfig,
    pub hidden: Vec<String>,
}

/// What happened during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub origin: StepSourceOrigin,
    pub frames: usize,
    pub finished: Option<FinishReason>,
    /// 0-based step the session ended on (or was left at).
    pub last_index: usize,
}

struct Runner<'w, W: Write> {
    state: WalkthroughState,
    renderer: OverlayRenderer,
    session: Session,
    out: &'w mut W,
    frames: usize,
    last_index: usize,
}

impl<W: Write> Runner<'_, W> {
    fn relayout(&self) {
        let screen = self
            .session
            .hidden
            .iter()
            .fold(HomeScreen::new(self.session.viewport), |s, k| s.hide(k.clone()));
        screen.report(LayoutPass::full(self.state.registry()));
    }

    fn draw(&mut self) -> Result<()> {
        let snapshot = self.state.snapshot();
        let Some(frame) = self.renderer.settle(&snapshot, self.session.viewport) else {
            return Ok(());
        };
        let title = snapshot.step.as_ref().map_or("", |s| s.title.as_str());
        writeln!(
            self.out,
            "-- step {}/{}: {} [{:?}] --",
            snapshot.step_number(),
            snapshot.step_count,
            title,
            frame.card.side
        )?;
        let raster = MaskRaster::rasterize(&frame, self.session.cols, self.session.rows);
        writeln!(self.out, "{raster}")?;
        self.frames += 1;
        self.last_index = snapshot.index;
        Ok(())
    }

    fn step(&mut self, command: ScriptCommand) -> Result<bool> {
        command.apply(&mut self.state);
        if !self.state.is_visible() {
            return Ok(false);
        }
        self.draw()?;
        Ok(true)
    }
}

/// Run a session over `steps`, writing frames to `out`.
pub fn run_session(
    steps: StepList,
    origin: StepSourceOrigin,
    session: Session,
    source: CommandSource<'_>,
    out: &mut impl Write,
) -> Result<RunSummary> {
    let renderer = OverlayRenderer::new(session.config.clone());
    let state = WalkthroughState::new(steps, false);

    let finished = Rc::new(Cell::new(None));
    let sink = Rc::clone(&finished);
    let _subscription = state.subscribe(move |event| match event {
        WalkthroughEvent::StepChanged { index, step } => {
            info!(index, id = %step.id, target = %step.target_key, "step changed");
        }
        WalkthroughEvent::Finished { reason } => {
            info!(?reason, "walkthrough finished");
            sink.set(Some(*reason));
        }
    });

    let mut runner = Runner {
        state,
        renderer,
        session,
        out,
        frames: 0,
        last_index: 0,
    };
    runner.relayout();
    runner.state.start();
    runner.draw()?;

    match source {
        CommandSource::Script(commands) => {
            for command in commands {
                if !runner.step(command)? {
                    break;
                }
            }
        }
        CommandSource::Interactive(input) => {
            let mut line = String::new();
            while runner.state.is_visible() {
                write!(runner.out, "> ")?;
                runner.out.flush()?;
                line.clear();
                if input.read_line(&mut line)? == 0 || line.trim() == "q" {
                    break;
                }
                match parse_script(&line) {
                    Ok(commands) => {
                        for command in commands {
                            if !runner.step(command)? {
                                break;
                            }
                        }
                    }
                    Err(err) => {
                        warn!(%err, "ignoring input line");
                        writeln!(runner.out, "{err}")?;
                    }
                }
            }
        }
    }

    let summary = RunSummary {
        origin,
        frames: runner.frames,
        finished: finished.get(),
        last_index: runner.last_index,
    };
    match summary.finished {
        Some(reason) => writeln!(runner.out, "walkthrough finished: {reason:?}")?,
        None => writeln!(
            runner.out,
            "walkthrough left open at step {}",
            summary.last_index + 1
        )?,
    }
    Ok(summary)
}
