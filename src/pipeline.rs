//! Check registry, sequential runner and result aggregation
//!
//! A run is a fixed ordered list of stages, each holding independent
//! checks. Checks share no state: every one takes only the ambient
//! filesystem, returns a [`CheckResult`], and never aborts the run. The
//! final [`PipelineReport`] ANDs the critical outcomes into the process
//! exit code.

use crate::ui;

/// Execution profile selecting how strict the run is.
///
/// The profile is always passed in explicitly; the `CI` environment
/// variable is consulted only by [`Profile::detect`] at the CLI boundary,
/// so severity rules stay testable without touching the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Developer machine: missing tools downgrade to warnings and skips
    Interactive,
    /// CI gate: a missing required tool fails the run
    Ci,
}

impl Profile {
    /// Detect the profile from the conventional `CI` environment marker
    pub fn detect() -> Self {
        match std::env::var("CI") {
            Ok(value) if !value.is_empty() && value != "0" && value != "false" => Profile::Ci,
            _ => Profile::Interactive,
        }
    }

    /// Criticality of a missing-tool condition under this profile
    pub fn tool_criticality(self) -> Criticality {
        match self {
            Profile::Interactive => Criticality::Advisory,
            Profile::Ci => Criticality::Critical,
        }
    }
}

/// Whether a failing check fails the whole run or only warns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criticality {
    Critical,
    Advisory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Passed,
    Failed,
    /// Not run because a prerequisite (usually a tool) was absent
    Skipped,
}

/// Outcome of one check: status plus the diagnostics worth keeping.
///
/// Checks print their findings as they go; `messages` retains the failure
/// lines so the report can restate them without a rerun.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub status: CheckStatus,
    pub messages: Vec<String>,
}

impl CheckResult {
    pub fn pass() -> Self {
        CheckResult {
            status: CheckStatus::Passed,
            messages: Vec::new(),
        }
    }

    pub fn fail(messages: Vec<String>) -> Self {
        CheckResult {
            status: CheckStatus::Failed,
            messages,
        }
    }

    pub fn skip(reason: impl Into<String>) -> Self {
        CheckResult {
            status: CheckStatus::Skipped,
            messages: vec![reason.into()],
        }
    }

    pub fn passed(&self) -> bool {
        self.status == CheckStatus::Passed
    }
}

/// A named unit of verification, defined at assembly time and run once
pub struct Check {
    pub name: &'static str,
    pub criticality: Criticality,
    run: Box<dyn Fn() -> CheckResult>,
}

impl Check {
    pub fn new(
        name: &'static str,
        criticality: Criticality,
        run: impl Fn() -> CheckResult + 'static,
    ) -> Self {
        Check {
            name,
            criticality,
            run: Box::new(run),
        }
    }
}

/// Cosmetic grouping of checks under one banner
struct Stage {
    title: &'static str,
    checks: Vec<Check>,
}

/// Result of one executed check, kept for aggregation
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub criticality: Criticality,
    pub result: CheckResult,
}

/// Aggregate of all check outcomes for one run
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub outcomes: Vec<CheckOutcome>,
}

impl PipelineReport {
    /// AND over critical outcomes; skips never fail a run
    pub fn overall_success(&self) -> bool {
        self.failed_critical().is_empty()
    }

    /// Names of critical checks that failed
    pub fn failed_critical(&self) -> Vec<&'static str> {
        self.outcomes
            .iter()
            .filter(|o| o.criticality == Criticality::Critical && o.result.status == CheckStatus::Failed)
            .map(|o| o.name)
            .collect()
    }

    pub fn exit_code(&self) -> i32 {
        if self.overall_success() {
            0
        } else {
            1
        }
    }

    fn count(&self, status: CheckStatus) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.result.status == status)
            .count()
    }

    /// Print the end-of-run summary and verdict
    pub fn print_summary(&self) {
        ui::banner("Summary");
        ui::info(&format!(
            "{} passed, {} failed, {} skipped",
            self.count(CheckStatus::Passed),
            self.count(CheckStatus::Failed),
            self.count(CheckStatus::Skipped),
        ));
        let failed = self.failed_critical();
        if failed.is_empty() {
            ui::ok("all critical checks passed");
        } else {
            for name in &failed {
                ui::fail(&format!("critical check failed: {name}"));
            }
        }
    }
}

/// The fixed ordered sequence of checks executed per run
pub struct Pipeline {
    profile: Profile,
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn new(profile: Profile) -> Self {
        Pipeline {
            profile,
            stages: Vec::new(),
        }
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Append a stage with its checks
    pub fn stage(&mut self, title: &'static str, checks: Vec<Check>) -> &mut Self {
        self.stages.push(Stage { title, checks });
        self
    }

    /// Run every check sequentially and collect the report.
    ///
    /// A failing check never halts the run; all diagnostics are printed
    /// where they occur and the verdict is computed at the end.
    pub fn run(&self) -> PipelineReport {
        let mut report = PipelineReport::default();

        for stage in &self.stages {
            ui::stage(stage.title);
            for check in &stage.checks {
                let result = (check.run)();
                report.outcomes.push(CheckOutcome {
                    name: check.name,
                    criticality: check.criticality,
                    result,
                });
            }
        }

        report
    }
}
