use crate::analysis::{request_analysis, AnalysisHandle, AnalysisStatus};
use crate::entry_store::EntryStore;
use crate::storage::KeyValueStore;
use std::time::Duration;

pub const EMPTY_ANALYSIS_MESSAGE: &str = "Please type something first.";
pub const EMPTY_JOURNAL_MESSAGE: &str = "Please enter your thoughts before analyzing.";
pub const EMPTY_MOOD_MESSAGE: &str = "Please enter your mood.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Journal,
    Mood,
}

/// Editable text with a cursor measured in chars.
#[derive(Debug, Default, Clone)]
pub struct InputField {
    text: String,
    cursor: usize,
}

impl InputField {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.text.chars().count() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        if self.cursor < self.text.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Text before the cursor, used to place the terminal cursor.
    pub fn before_cursor(&self) -> &str {
        &self.text[..self.byte_index(self.cursor)]
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

/// Everything the UI shows besides the entry list itself.
pub struct App<S: KeyValueStore> {
    pub store: EntryStore<S>,
    pub journal: InputField,
    pub mood: InputField,
    pub focus: Focus,
    tips: Vec<String>,
    analysis: Option<AnalysisHandle>,
    analysis_delay: Duration,
    error: Option<String>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(store: EntryStore<S>, tips: Vec<String>, analysis_delay: Duration) -> Self {
        App {
            store,
            journal: InputField::default(),
            mood: InputField::default(),
            focus: Focus::Journal,
            tips,
            analysis: None,
            analysis_delay,
            error: None,
        }
    }

    pub fn tips(&self) -> &[String] {
        &self.tips
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn analysis_status(&self) -> AnalysisStatus {
        self.analysis
            .as_ref()
            .map(AnalysisHandle::status)
            .unwrap_or(AnalysisStatus::Idle)
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Journal => Focus::Mood,
            Focus::Mood => Focus::Journal,
        };
    }

    /// Applies an edit to the focused input. Emptying the journal resets the
    /// analysis, the same as clearing it.
    pub fn edit(&mut self, edit: impl FnOnce(&mut InputField)) {
        match self.focus {
            Focus::Journal => {
                edit(&mut self.journal);
                if self.journal.text().is_empty() {
                    self.analysis = None;
                }
            }
            Focus::Mood => edit(&mut self.mood),
        }
    }

    /// Starts a new analysis of the journal text, replacing any pending one.
    pub fn analyze(&mut self) {
        // The previous request is cancelled even if the new one is rejected.
        self.analysis = None;
        match request_analysis(self.journal.text(), self.analysis_delay) {
            Ok(handle) => {
                self.analysis = Some(handle);
                self.error = None;
            }
            Err(e) => {
                log::debug!("Analysis rejected: {}", e);
                self.error = Some(EMPTY_ANALYSIS_MESSAGE.to_string());
            }
        }
    }

    /// Saves the journal text. Only a finished insight is attached; a pending
    /// one is dropped with the input.
    pub fn save_entry(&mut self) {
        let status = self.analysis_status();
        let analysis = status.insight().unwrap_or("");
        match self.store.save_journal_entry(self.journal.text(), analysis) {
            Ok(entry) => {
                log::info!("Saved journal entry {}", entry.id());
                self.error = None;
                self.clear_journal();
            }
            Err(e) => {
                log::debug!("Journal entry rejected: {}", e);
                self.error = Some(EMPTY_JOURNAL_MESSAGE.to_string());
            }
        }
    }

    pub fn save_check_in(&mut self) {
        match self.store.save_mood_check_in(self.mood.text()) {
            Ok(entry) => {
                log::info!("Saved mood check-in {}", entry.id());
                self.error = None;
                self.mood.clear();
            }
            Err(e) => {
                log::debug!("Mood check-in rejected: {}", e);
                self.error = Some(EMPTY_MOOD_MESSAGE.to_string());
            }
        }
    }

    /// Clears the journal input and resets the analysis to idle.
    pub fn clear_journal(&mut self) {
        self.journal.clear();
        self.analysis = None;
    }
}
