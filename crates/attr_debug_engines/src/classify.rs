#![forbid(unsafe_code)]

use attr_debug_contracts::debug_data::DebugDataType;
use attr_debug_contracts::outcome::{AggregatableResult, EventLevelResult, StoreSourceResult};

/// Maps a stored-source result onto its debug category. `None` means the
/// outcome is not debug-reportable through this path.
pub fn classify_source(result: StoreSourceResult, is_noised: bool) -> Option<DebugDataType> {
    match result {
        StoreSourceResult::Success => {
            if is_noised {
                Some(DebugDataType::SourceNoised)
            } else {
                Some(DebugDataType::SourceSuccess)
            }
        }
        StoreSourceResult::InternalError => Some(DebugDataType::SourceUnknownError),
        StoreSourceResult::InsufficientSourceCapacity => Some(DebugDataType::SourceStorageLimit),
        StoreSourceResult::InsufficientUniqueDestinationCapacity => {
            Some(DebugDataType::SourceDestinationLimit)
        }
        StoreSourceResult::ExcessiveReportingOrigins => {
            Some(DebugDataType::SourceReportingOriginLimit)
        }
        StoreSourceResult::ProhibitedByBrowserPolicy => None,
        // Both rows share one category: a reporting-limit hit is reported the
        // same way whether or not the global limit was hit as well.
        StoreSourceResult::DestinationReportingLimitReached
        | StoreSourceResult::DestinationBothLimitsReached => {
            Some(DebugDataType::SourceDestinationRateLimit)
        }
        StoreSourceResult::DestinationGlobalLimitReached => {
            Some(DebugDataType::SourceDestinationGlobalRateLimit)
        }
        StoreSourceResult::ReportingOriginsPerSiteLimitReached => {
            Some(DebugDataType::SourceReportingOriginPerSiteLimit)
        }
        StoreSourceResult::ExceedsMaxChannelCapacity => {
            Some(DebugDataType::SourceChannelCapacityLimit)
        }
        StoreSourceResult::ExceedsMaxTriggerStateCardinality => {
            Some(DebugDataType::SourceTriggerStateCardinalityLimit)
        }
    }
}

/// Maps the event-level half of a trigger outcome onto its debug category.
pub fn classify_event_level(result: EventLevelResult) -> Option<DebugDataType> {
    match result {
        EventLevelResult::Success
        | EventLevelResult::SuccessDroppedLowerPriority
        | EventLevelResult::ProhibitedByBrowserPolicy
        | EventLevelResult::NotRegistered => None,
        EventLevelResult::InternalError => Some(DebugDataType::TriggerUnknownError),
        EventLevelResult::NoCapacityForConversionDestination => {
            Some(DebugDataType::TriggerEventStorageLimit)
        }
        EventLevelResult::NoMatchingImpressions => Some(DebugDataType::TriggerNoMatchingSource),
        EventLevelResult::Deduplicated => Some(DebugDataType::TriggerEventDeduplicated),
        EventLevelResult::ExcessiveAttributions => {
            Some(DebugDataType::TriggerEventAttributionsPerSourceDestinationLimit)
        }
        EventLevelResult::PriorityTooLow => Some(DebugDataType::TriggerEventLowPriority),
        // Both noise outcomes collapse onto one category so the report does
        // not reveal which kind of noise was applied.
        EventLevelResult::NeverAttributedSource | EventLevelResult::FalselyAttributedSource => {
            Some(DebugDataType::TriggerEventNoise)
        }
        EventLevelResult::ExcessiveReportingOrigins => {
            Some(DebugDataType::TriggerReportingOriginLimit)
        }
        EventLevelResult::NoMatchingSourceFilterData => {
            Some(DebugDataType::TriggerNoMatchingFilterData)
        }
        EventLevelResult::NoMatchingConfigurations => {
            Some(DebugDataType::TriggerEventNoMatchingConfigurations)
        }
        EventLevelResult::ExcessiveReports => Some(DebugDataType::TriggerEventExcessiveReports),
        EventLevelResult::ReportWindowPassed => {
            Some(DebugDataType::TriggerEventReportWindowPassed)
        }
        EventLevelResult::ReportWindowNotStarted => {
            Some(DebugDataType::TriggerEventReportWindowNotStarted)
        }
        EventLevelResult::NoMatchingTriggerData => {
            Some(DebugDataType::TriggerEventNoMatchingTriggerData)
        }
    }
}

/// Maps the aggregatable half of a trigger outcome onto its debug category.
/// Several categories are shared with the event-level table; the encoder
/// deduplicates before lookup.
pub fn classify_aggregatable(result: AggregatableResult) -> Option<DebugDataType> {
    match result {
        AggregatableResult::Success
        | AggregatableResult::ProhibitedByBrowserPolicy
        | AggregatableResult::NotRegistered => None,
        AggregatableResult::InternalError => Some(DebugDataType::TriggerUnknownError),
        AggregatableResult::NoCapacityForConversionDestination => {
            Some(DebugDataType::TriggerAggregateStorageLimit)
        }
        AggregatableResult::NoMatchingImpressions => Some(DebugDataType::TriggerNoMatchingSource),
        AggregatableResult::ExcessiveAttributions => {
            Some(DebugDataType::TriggerAggregateAttributionsPerSourceDestinationLimit)
        }
        AggregatableResult::ExcessiveReportingOrigins => {
            Some(DebugDataType::TriggerReportingOriginLimit)
        }
        AggregatableResult::NoHistograms => Some(DebugDataType::TriggerAggregateNoContributions),
        AggregatableResult::InsufficientBudget => {
            Some(DebugDataType::TriggerAggregateInsufficientBudget)
        }
        AggregatableResult::NoMatchingSourceFilterData => {
            Some(DebugDataType::TriggerNoMatchingFilterData)
        }
        AggregatableResult::Deduplicated => Some(DebugDataType::TriggerAggregateDeduplicated),
        AggregatableResult::ReportWindowPassed => {
            Some(DebugDataType::TriggerAggregateReportWindowPassed)
        }
        AggregatableResult::ExcessiveReports => {
            Some(DebugDataType::TriggerAggregateExcessiveReports)
        }
    }
}
