use serde::Serialize;

/// Completed/total counter for the run in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionProgress {
    /// Number of records that reached a terminal status
    pub completed: usize,
    /// Number of records in the run snapshot
    pub total: usize,
}

impl ConversionProgress {
    pub fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    /// Progress in `[0, 1]`; an empty run reports 0
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f32 / self.total as f32
        }
    }

    /// Progress percentage (0-100) for text output
    pub fn percentage(&self) -> usize {
        if self.total > 0 {
            (self.completed * 100) / self.total
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_and_percentage() {
        let progress = ConversionProgress::new(1, 4);
        assert_eq!(progress.fraction(), 0.25);
        assert_eq!(progress.percentage(), 25);
        assert_eq!(ConversionProgress::new(3, 3).fraction(), 1.0);
    }

    #[test]
    fn empty_run_is_zero() {
        assert_eq!(ConversionProgress::default().fraction(), 0.0);
        assert_eq!(ConversionProgress::default().percentage(), 0);
    }
}
