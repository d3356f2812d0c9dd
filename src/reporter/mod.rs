//!
//! The build progress reporter.
//!

pub mod stage;

use chrono::DateTime;
use chrono::Local;
use colored::Colorize;

use self::stage::Stage;

/// The timestamp format used in banners and the summary.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

///
/// The build progress reporter.
///
/// Purely observational: prints the section banners and collects the stage start
/// times for the final summary table.
///
#[derive(Debug)]
pub struct Reporter {
    /// The process start time.
    started_at: DateTime<Local>,
    /// The stage start times in the order of recording.
    stages: Vec<(Stage, DateTime<Local>)>,
}

impl Reporter {
    ///
    /// A shortcut constructor.
    ///
    pub fn new() -> Self {
        Self {
            started_at: Local::now(),
            stages: Vec::new(),
        }
    }

    ///
    /// Prints a section banner with the current time.
    ///
    pub fn section(&self, title: &str) {
        println!();
        println!(
            "{}",
            format!(
                "=== {} ({}) ===",
                title,
                Local::now().format(TIMESTAMP_FORMAT)
            )
            .bright_green()
            .bold()
        );
    }

    ///
    /// Records the stage start time.
    ///
    pub fn enter(&mut self, stage: Stage) {
        self.stages.push((stage, Local::now()));
    }

    ///
    /// Prints the timestamp summary table.
    ///
    pub fn summary(&self) {
        self.section("Summary");
        println!(
            "{:<12} {}",
            "started",
            self.started_at.format(TIMESTAMP_FORMAT)
        );
        for (stage, time) in self.stages.iter() {
            println!("{:<12} {}", stage.to_string(), time.format(TIMESTAMP_FORMAT));
        }
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::stage::Stage;
    use super::Reporter;

    #[test]
    fn stages_are_recorded_in_order() {
        let mut reporter = Reporter::new();
        reporter.enter(Stage::Download);
        reporter.enter(Stage::Configure);

        let stages: Vec<Stage> = reporter.stages.iter().map(|(stage, _)| *stage).collect();
        assert_eq!(stages, vec![Stage::Download, Stage::Configure]);
    }
}
