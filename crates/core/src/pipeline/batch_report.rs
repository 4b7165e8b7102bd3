use crate::conversion::domain::file_outcome::FileOutcome;

/// Per-file outcomes of one batch, in processing order.
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: FileOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[FileOutcome] {
        &self.outcomes
    }

    pub fn converted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.converted()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    /// Multi-line summary: totals first, then one line per failed input.
    pub fn summary_string(&self) -> String {
        let mut lines = vec![format!(
            "Batch summary ({} files): {} converted, {} failed",
            self.outcomes.len(),
            self.converted(),
            self.failed()
        )];

        for outcome in &self.outcomes {
            if let Err(e) = &outcome.result {
                lines.push(format!(
                    "  #{} {}: {e}",
                    outcome.index,
                    outcome.input.display()
                ));
            }
        }

        lines.join("\n")
    }

    pub fn log_summary(&self) {
        log::info!("{}", self.summary_string());
    }
}
