#![forbid(unsafe_code)]

pub mod budget;
pub mod classify;
pub mod report;
pub mod wire;

use attr_debug_contracts::outcome::RegistrationOutcome;
use attr_debug_contracts::report::DebugReport;

pub use budget::DebugBudgetLedger;
pub use report::{DebugReportConfig, DebugReportRuntime};
pub use wire::{AggregatableReportRequest, AggregationRequestError};

/// Convenience entry point over a default-configured runtime: classifies the
/// outcome and assembles the debug report, consulting the operation-allowed
/// oracle at most once.
pub fn classify_and_report(
    outcome: &RegistrationOutcome,
    is_operation_allowed: impl FnOnce() -> bool,
) -> Option<DebugReport> {
    DebugReportRuntime::new(DebugReportConfig::mvp_v1()).run(outcome, is_operation_allowed)
}
