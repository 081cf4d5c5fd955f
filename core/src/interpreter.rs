use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::future::Future;
use core::time::Duration;
use futures_util::stream::{self, Stream};
use serde::{Deserialize, Serialize};

use crate::*;

/// Pause between echoing a line and performing its move, so the UI can animate.
pub const STEP_DELAY: Duration = Duration::from_millis(500);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptLine {
    /// 1-based line number in the submitted script.
    pub number: usize,
    pub text: String,
    pub command: Option<Direction>,
}

impl ScriptLine {
    pub fn new(number: usize, text: &str) -> Self {
        Self {
            number,
            text: text.to_string(),
            command: recognize(text),
        }
    }
}

/// First movement token found in `line`, checked right, left, up, down.
pub fn recognize(line: &str) -> Option<Direction> {
    Direction::ALL
        .into_iter()
        .find(|direction| line.contains(direction.token()))
}

/// Splits a script into its non-blank lines, keeping their order.
pub fn parse_script(script: &str) -> Vec<ScriptLine> {
    script
        .lines()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(index, text)| ScriptLine::new(index + 1, text))
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStep {
    /// The line was written to the console; its move (if any) follows after the delay.
    Echoed { line: usize, text: String },
    Moved {
        line: usize,
        direction: Direction,
        outcome: MoveOutcome,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunEnd {
    /// Every line was processed.
    Completed,
    Succeeded,
    OutOfMoves,
    /// The engine was reset or switched variant while the run was pending.
    Abandoned,
}

/// Synchronous stepper over one script run.
///
/// Each line goes through two phases: [`ScriptRun::echo_next`] appends the
/// console entry, then [`ScriptRun::resolve_pending`] performs the move. The
/// caller decides how long to wait in between.
#[derive(Clone, Debug)]
pub struct ScriptRun {
    run: RunId,
    lines: VecDeque<ScriptLine>,
    pending: Option<ScriptLine>,
    end: Option<RunEnd>,
}

impl ScriptRun {
    pub fn start(engine: &mut PuzzleEngine, script: &str) -> Result<Self> {
        let lines = VecDeque::from(parse_script(script));
        let run = engine.begin_run()?;
        log::debug!("run {:?} started with {} lines", run, lines.len());
        Ok(Self {
            run,
            lines,
            pending: None,
            end: None,
        })
    }

    pub fn run_id(&self) -> RunId {
        self.run
    }

    pub fn end(&self) -> Option<RunEnd> {
        self.end
    }

    pub fn is_finished(&self) -> bool {
        self.end.is_some()
    }

    pub fn echo_next(&mut self, engine: &mut PuzzleEngine) -> Option<ExecutionStep> {
        if self.end.is_some() {
            return None;
        }

        let Some(line) = self.lines.pop_front() else {
            return match engine.finish_run(self.run) {
                Ok(()) => self.stop(RunEnd::Completed),
                Err(_) => self.stop(RunEnd::Abandoned),
            };
        };

        if engine.echo(self.run, &line.text).is_err() {
            return self.stop(RunEnd::Abandoned);
        }

        let step = ExecutionStep::Echoed {
            line: line.number,
            text: line.text.clone(),
        };
        self.pending = Some(line);
        Some(step)
    }

    /// Performs the move of the last echoed line. Unrecognized lines yield nothing.
    pub fn resolve_pending(&mut self, engine: &mut PuzzleEngine) -> Option<ExecutionStep> {
        let line = self.pending.take()?;
        let direction = line.command?;

        let outcome = match engine.step(self.run, direction) {
            Ok(outcome) => outcome,
            Err(_) => return self.stop(RunEnd::Abandoned),
        };

        match engine.status() {
            RunStatus::Succeeded => {
                self.stop(RunEnd::Succeeded);
            }
            RunStatus::OutOfMoves => {
                self.stop(RunEnd::OutOfMoves);
            }
            RunStatus::Idle | RunStatus::Running => {}
        }

        Some(ExecutionStep::Moved {
            line: line.number,
            direction,
            outcome,
        })
    }

    /// Runs the remaining lines without any delay.
    pub fn drain(mut self, engine: &mut PuzzleEngine) -> RunEnd {
        while self.echo_next(engine).is_some() {
            self.resolve_pending(engine);
        }
        self.end.unwrap_or(RunEnd::Abandoned)
    }

    fn stop(&mut self, end: RunEnd) -> Option<ExecutionStep> {
        log::debug!("run {:?} ended: {:?}", self.run, end);
        self.end = Some(end);
        self.pending = None;
        None
    }
}

/// Runs `script` to the end without delays.
pub fn run_to_end(engine: &mut PuzzleEngine, script: &str) -> Result<RunEnd> {
    Ok(ScriptRun::start(engine, script)?.drain(engine))
}

/// Source of the pause between echoing a line and moving.
pub trait StepTimer {
    fn sleep(&self, delay: Duration) -> impl Future<Output = ()>;
}

/// Timer that never waits, for headless runs.
#[derive(Copy, Clone, Debug, Default)]
pub struct Immediate;

impl StepTimer for Immediate {
    fn sleep(&self, _delay: Duration) -> impl Future<Output = ()> {
        core::future::ready(())
    }
}

struct Execution<T> {
    engine: Rc<RefCell<PuzzleEngine>>,
    run: ScriptRun,
    timer: T,
    delay: Duration,
    awaiting_move: bool,
}

impl<T: StepTimer> Execution<T> {
    // engine borrows never span the sleep
    async fn advance(&mut self) -> Option<ExecutionStep> {
        if core::mem::take(&mut self.awaiting_move) {
            self.timer.sleep(self.delay).await;
            if let Some(step) = self.run.resolve_pending(&mut self.engine.borrow_mut()) {
                return Some(step);
            }
        }

        let step = self.run.echo_next(&mut self.engine.borrow_mut())?;
        self.awaiting_move = true;
        Some(step)
    }
}

/// Starts a run and returns its steps as a lazy stream.
///
/// Every line is echoed, then the stream sleeps for `delay` on `timer` before
/// performing the line's move. The stream ends after the last line, when the
/// puzzle is solved or out of moves, or as soon as the engine is reset or
/// switched to another variant; a superseded run never touches the engine
/// again. Dropping the stream early leaves the engine in
/// [`RunStatus::Running`] until it is reset.
pub fn execute<T: StepTimer>(
    engine: Rc<RefCell<PuzzleEngine>>,
    script: &str,
    timer: T,
    delay: Duration,
) -> Result<impl Stream<Item = ExecutionStep> + use<T>> {
    let run = ScriptRun::start(&mut engine.borrow_mut(), script)?;
    let execution = Execution {
        engine,
        run,
        timer,
        delay,
        awaiting_move: false,
    };

    Ok(stream::unfold(execution, |mut execution| async move {
        let step = execution.advance().await?;
        Some((step, execution))
    }))
}
