#![forbid(unsafe_code)]

use serde::Serialize;

/// Every debuggable outcome category. The serde form is the fixed wire
/// string carried in the verbose report's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DebugDataType {
    SourceChannelCapacityLimit,
    SourceDestinationGlobalRateLimit,
    SourceDestinationLimit,
    SourceDestinationRateLimit,
    SourceNoised,
    SourceReportingOriginLimit,
    SourceReportingOriginPerSiteLimit,
    SourceStorageLimit,
    SourceSuccess,
    SourceTriggerStateCardinalityLimit,
    SourceUnknownError,
    TriggerAggregateAttributionsPerSourceDestinationLimit,
    TriggerAggregateDeduplicated,
    TriggerAggregateExcessiveReports,
    TriggerAggregateInsufficientBudget,
    TriggerAggregateNoContributions,
    TriggerAggregateReportWindowPassed,
    TriggerAggregateStorageLimit,
    TriggerEventAttributionsPerSourceDestinationLimit,
    TriggerEventDeduplicated,
    TriggerEventExcessiveReports,
    TriggerEventLowPriority,
    TriggerEventNoMatchingConfigurations,
    TriggerEventNoMatchingTriggerData,
    TriggerEventNoise,
    TriggerEventReportWindowNotStarted,
    TriggerEventReportWindowPassed,
    TriggerEventStorageLimit,
    TriggerNoMatchingFilterData,
    TriggerNoMatchingSource,
    TriggerReportingOriginLimit,
    TriggerUnknownError,
}

impl DebugDataType {
    pub fn as_str(self) -> &'static str {
        match self {
            DebugDataType::SourceChannelCapacityLimit => "source-channel-capacity-limit",
            DebugDataType::SourceDestinationGlobalRateLimit => {
                "source-destination-global-rate-limit"
            }
            DebugDataType::SourceDestinationLimit => "source-destination-limit",
            DebugDataType::SourceDestinationRateLimit => "source-destination-rate-limit",
            DebugDataType::SourceNoised => "source-noised",
            DebugDataType::SourceReportingOriginLimit => "source-reporting-origin-limit",
            DebugDataType::SourceReportingOriginPerSiteLimit => {
                "source-reporting-origin-per-site-limit"
            }
            DebugDataType::SourceStorageLimit => "source-storage-limit",
            DebugDataType::SourceSuccess => "source-success",
            DebugDataType::SourceTriggerStateCardinalityLimit => {
                "source-trigger-state-cardinality-limit"
            }
            DebugDataType::SourceUnknownError => "source-unknown-error",
            DebugDataType::TriggerAggregateAttributionsPerSourceDestinationLimit => {
                "trigger-aggregate-attributions-per-source-destination-limit"
            }
            DebugDataType::TriggerAggregateDeduplicated => "trigger-aggregate-deduplicated",
            DebugDataType::TriggerAggregateExcessiveReports => {
                "trigger-aggregate-excessive-reports"
            }
            DebugDataType::TriggerAggregateInsufficientBudget => {
                "trigger-aggregate-insufficient-budget"
            }
            DebugDataType::TriggerAggregateNoContributions => {
                "trigger-aggregate-no-contributions"
            }
            DebugDataType::TriggerAggregateReportWindowPassed => {
                "trigger-aggregate-report-window-passed"
            }
            DebugDataType::TriggerAggregateStorageLimit => "trigger-aggregate-storage-limit",
            DebugDataType::TriggerEventAttributionsPerSourceDestinationLimit => {
                "trigger-event-attributions-per-source-destination-limit"
            }
            DebugDataType::TriggerEventDeduplicated => "trigger-event-deduplicated",
            DebugDataType::TriggerEventExcessiveReports => "trigger-event-excessive-reports",
            DebugDataType::TriggerEventLowPriority => "trigger-event-low-priority",
            DebugDataType::TriggerEventNoMatchingConfigurations => {
                "trigger-event-no-matching-configurations"
            }
            DebugDataType::TriggerEventNoMatchingTriggerData => {
                "trigger-event-no-matching-trigger-data"
            }
            DebugDataType::TriggerEventNoise => "trigger-event-noise",
            DebugDataType::TriggerEventReportWindowNotStarted => {
                "trigger-event-report-window-not-started"
            }
            DebugDataType::TriggerEventReportWindowPassed => {
                "trigger-event-report-window-passed"
            }
            DebugDataType::TriggerEventStorageLimit => "trigger-event-storage-limit",
            DebugDataType::TriggerNoMatchingFilterData => "trigger-no-matching-filter-data",
            DebugDataType::TriggerNoMatchingSource => "trigger-no-matching-source",
            DebugDataType::TriggerReportingOriginLimit => "trigger-reporting-origin-limit",
            DebugDataType::TriggerUnknownError => "trigger-unknown-error",
        }
    }
}
