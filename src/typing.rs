//! Typewriter effect: phrases are typed out, held, deleted, then the next
//! one starts. Loops forever.

use std::time::Duration;
use thiserror::Error;

use crate::config::TypingConfig;
use crate::scheduler::{Rearm, Task};
use crate::stage::Stage;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypingError {
    #[error("typing cycle needs at least one phrase")]
    NoPhrases,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Typing,
    Deleting,
}

/// Pure state machine behind the typewriter.
///
/// The cursor counts characters, not bytes, so multi-byte phrases are safe.
#[derive(Debug, Clone)]
pub struct TypingCycle {
    phrases: Vec<String>,
    phrase_index: usize,
    cursor: usize,
    mode: Mode,
    type_speed: Duration,
    delete_speed: Duration,
    pause_time: Duration,
    transition: Duration,
}

impl TypingCycle {
    pub fn new(config: &TypingConfig) -> Result<Self, TypingError> {
        if config.words.is_empty() {
            return Err(TypingError::NoPhrases);
        }

        Ok(Self {
            phrases: config.words.clone(),
            phrase_index: 0,
            cursor: 0,
            mode: Mode::Typing,
            type_speed: config.type_speed(),
            delete_speed: config.delete_speed(),
            pause_time: config.pause_time(),
            transition: config.transition(),
        })
    }

    /// Advance one step and return the delay before the next one.
    pub fn tick(&mut self) -> Duration {
        let len = self.phrase_len();

        match self.mode {
            Mode::Typing => {
                // A zero-length phrase is already fully typed
                if self.cursor < len {
                    self.cursor += 1;
                }
                if self.cursor == len {
                    self.mode = Mode::Deleting;
                    self.pause_time
                } else {
                    self.type_speed
                }
            }
            Mode::Deleting => {
                self.cursor = self.cursor.saturating_sub(1);
                if self.cursor == 0 {
                    self.mode = Mode::Typing;
                    self.phrase_index = (self.phrase_index + 1) % self.phrases.len();
                    self.transition
                } else {
                    self.delete_speed
                }
            }
        }
    }

    /// Text currently on display: the first `cursor` characters of the phrase.
    ///
    /// Right after a phrase is fully deleted the index has already moved on,
    /// but the cursor is 0, so this is still the empty string.
    pub fn visible(&self) -> &str {
        let phrase = self.current_phrase();
        match phrase.char_indices().nth(self.cursor) {
            Some((byte, _)) => &phrase[..byte],
            None => phrase,
        }
    }

    pub fn current_phrase(&self) -> &str {
        &self.phrases[self.phrase_index]
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase_index
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    fn phrase_len(&self) -> usize {
        self.current_phrase().chars().count()
    }
}

/// Binds a [`TypingCycle`] to the stage's text display.
pub struct TypingAnimation {
    cycle: TypingCycle,
}

impl TypingAnimation {
    /// Returns `None` when the stage has no text display or the phrase list is
    /// empty. Either way the effect simply does not run.
    pub fn mount(config: &TypingConfig, stage: &Stage) -> Option<Self> {
        if stage.text.is_none() {
            log::debug!("No text display on stage, typing animation disabled");
            return None;
        }

        match TypingCycle::new(config) {
            Ok(cycle) => Some(Self { cycle }),
            Err(e) => {
                log::debug!("Typing animation disabled: {}", e);
                None
            }
        }
    }

    pub fn cycle(&self) -> &TypingCycle {
        &self.cycle
    }
}

impl Task for TypingAnimation {
    fn name(&self) -> &'static str {
        "typing"
    }

    fn run(&mut self, stage: &mut Stage, _now: Duration) -> Rearm {
        let delay = self.cycle.tick();
        if let Some(text) = stage.text.as_mut() {
            text.set(self.cycle.visible());
        }
        Rearm::After(delay)
    }
}
