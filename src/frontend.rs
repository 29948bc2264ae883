//! A headless frame loop: steps a session, reveals text at a fixed frame
//! time and acknowledges every finished line by itself.

use tracing::warn;

use crate::battle::session::BattleSession;
use crate::battle::state::BattleOutcome;
use crate::config::BattleConfig;
use crate::input::{FrameInput, InputSource, ModeLog};
use crate::output::{OutputQueue, OutputSink};

pub const DEFAULT_FRAME_TIME: f32 = 1.0 / 60.0;

#[derive(Debug, Clone)]
pub struct HeadlessFrontend {
    pub output: OutputQueue,
    pub modes: ModeLog,
    pub frame_time: f32,
    /// Every line acknowledged so far, in order.
    pub shown: Vec<String>,
    pub frames: usize,
}

impl HeadlessFrontend {
    pub fn new(config: &BattleConfig) -> Self {
        Self {
            output: OutputQueue::new(config),
            modes: ModeLog::default(),
            frame_time: DEFAULT_FRAME_TIME,
            shown: Vec::new(),
            frames: 0,
        }
    }

    /// Steps the session first, then the output, so one press is never
    /// used by both.
    pub fn frame(&mut self, session: &mut BattleSession, input: &dyn InputSource) {
        session.step(&mut self.output, input, &mut self.modes);
        let acknowledge = self.output.is_waiting_for_ack();
        if acknowledge {
            if let Some(line) = self.output.current_line() {
                self.shown.push(line.to_string());
            }
        }
        self.output.update(self.frame_time, acknowledge);
        self.frames += 1;
    }

    /// Runs frames with no input until `done` holds, giving up after
    /// `max_frames`. Returns whether `done` was reached.
    pub fn run_until(
        &mut self,
        session: &mut BattleSession,
        max_frames: usize,
        mut done: impl FnMut(&BattleSession, &OutputQueue) -> bool,
    ) -> bool {
        let idle = FrameInput::none();
        for _ in 0..max_frames {
            if done(session, &self.output) {
                return true;
            }
            self.frame(session, &idle);
        }
        done(session, &self.output)
    }

    /// Runs the battle to its end.
    pub fn run_to_end(
        &mut self,
        session: &mut BattleSession,
        max_frames: usize,
    ) -> Option<BattleOutcome> {
        if !self.run_until(session, max_frames, |session, _| session.is_finished()) {
            warn!(max_frames, phase = ?session.phase(), "battle did not finish");
        }
        session.outcome()
    }
}
