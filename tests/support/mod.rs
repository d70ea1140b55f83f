#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use things::transport::{ScriptExecutor, ScriptOutput};
use things::Things;

/// Executor that records every script and replays queued responses.
/// With nothing queued it answers with empty stdout.
#[derive(Default)]
pub struct Recorder {
    scripts: RefCell<Vec<String>>,
    responses: RefCell<VecDeque<ScriptOutput>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, output: ScriptOutput) -> &Self {
        self.responses.borrow_mut().push_back(output);
        self
    }

    pub fn respond_with(&self, stdout: &str) -> &Self {
        self.respond(ScriptOutput::success(stdout))
    }

    pub fn scripts(&self) -> Vec<String> {
        self.scripts.borrow().clone()
    }

    pub fn calls(&self) -> usize {
        self.scripts.borrow().len()
    }

    pub fn last_script(&self) -> String {
        self.scripts
            .borrow()
            .last()
            .cloned()
            .expect("at least one script executed")
    }
}

impl ScriptExecutor for Recorder {
    fn execute(&self, script: &str) -> things::Result<ScriptOutput> {
        self.scripts.borrow_mut().push(script.to_string());
        Ok(self
            .responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| ScriptOutput::success("")))
    }
}

pub fn client(recorder: &Recorder) -> Things<&Recorder> {
    Things::new(recorder)
}

/// Join fields with the field delimiter.
pub fn row(fields: &[&str]) -> String {
    fields.join("|||")
}

/// Join rows with the row delimiter.
pub fn rows(rows: &[String]) -> String {
    rows.join("~~~")
}

/// Assert `needles` appear in `haystack` in the given order.
pub fn assert_in_order(haystack: &str, needles: &[&str]) {
    let mut from = 0;
    for needle in needles {
        match haystack[from..].find(needle) {
            Some(pos) => from += pos + needle.len(),
            None => panic!("expected {needle:?} after byte {from} in:\n{haystack}"),
        }
    }
}
