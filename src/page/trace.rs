use super::*;
use std::collections::VecDeque;

#[derive(Debug)]
pub(crate) struct TraceState {
    pub(crate) enabled: bool,
    pub(crate) logs: VecDeque<String>,
    pub(crate) log_limit: usize,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            enabled: false,
            logs: VecDeque::new(),
            log_limit: 10_000,
        }
    }
}

impl Page {
    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace.enabled = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::Config(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.trace.log_limit = max_entries;
        while self.trace.logs.len() > self.trace.log_limit {
            self.trace.logs.pop_front();
        }
        Ok(())
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.trace.logs.drain(..).collect()
    }

    /// Records a line when tracing is on; the oldest line is dropped once the
    /// limit is reached.
    pub(crate) fn trace_line(&mut self, line: String) {
        if !self.trace.enabled {
            return;
        }
        tracing::trace!(target: "multiselect_widget::page", "{line}");
        if self.trace.logs.len() >= self.trace.log_limit {
            self.trace.logs.pop_front();
        }
        self.trace.logs.push_back(line);
    }
}
