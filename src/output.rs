//! Line-by-line text output with a typewriter reveal.
//!
//! Battle logic only ever enqueues lines and asks whether the queue has
//! drained; pacing comes from the frontend calling [`OutputSink::update`]
//! once per frame.

use std::collections::VecDeque;

use tracing::warn;

use crate::config::BattleConfig;

/// The display side of the engine.
pub trait OutputSink {
    /// Appends a line to be shown after everything already queued.
    fn enqueue(&mut self, line: &str);

    /// Advances the reveal by `elapsed` seconds. A `confirm` press reveals the
    /// current line fully, or acknowledges it if it was already fully shown.
    fn update(&mut self, elapsed: f32, confirm: bool);

    /// True when every queued line was shown and acknowledged.
    fn is_done(&self) -> bool;

    /// True when the current line is fully revealed and waiting for a press.
    fn is_waiting_for_ack(&self) -> bool;
}

/// A bounded FIFO of display lines.
#[derive(Debug, Clone)]
pub struct OutputQueue {
    lines: VecDeque<String>,
    capacity: usize,
    max_line_length: usize,
    typing_speed: f32,
    /// Characters of the head line revealed so far.
    progress: f32,
}

impl OutputQueue {
    pub fn new(config: &BattleConfig) -> Self {
        Self {
            lines: VecDeque::with_capacity(config.output_capacity),
            capacity: config.output_capacity,
            max_line_length: config.max_line_length,
            typing_speed: config.typing_speed,
            progress: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line currently being revealed, in full.
    pub fn current_line(&self) -> Option<&str> {
        self.lines.front().map(String::as_str)
    }

    /// The revealed prefix of the current line.
    pub fn visible_text(&self) -> &str {
        let Some(line) = self.lines.front() else {
            return "";
        };
        let shown = self.progress as usize;
        match line.char_indices().nth(shown) {
            Some((end, _)) => &line[..end],
            None => line,
        }
    }

    fn head_length(&self) -> usize {
        self.lines.front().map_or(0, |line| line.chars().count())
    }
}

impl OutputSink for OutputQueue {
    fn enqueue(&mut self, line: &str) {
        if self.lines.len() >= self.capacity {
            warn!(capacity = self.capacity, line, "output queue full, dropping line");
            return;
        }
        let line = match line.char_indices().nth(self.max_line_length) {
            Some((end, _)) => {
                warn!(max = self.max_line_length, "output line truncated");
                &line[..end]
            }
            None => line,
        };
        self.lines.push_back(line.to_string());
    }

    fn update(&mut self, elapsed: f32, confirm: bool) {
        if self.lines.is_empty() {
            self.progress = 0.0;
            return;
        }
        let length = self.head_length() as f32;
        if confirm {
            if self.progress >= length {
                self.lines.pop_front();
                self.progress = 0.0;
            } else {
                self.progress = length;
            }
            return;
        }
        self.progress = (self.progress + self.typing_speed * elapsed).min(length);
    }

    fn is_done(&self) -> bool {
        self.lines.is_empty()
    }

    fn is_waiting_for_ack(&self) -> bool {
        !self.lines.is_empty() && self.progress >= self.head_length() as f32
    }
}
