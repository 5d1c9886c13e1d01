#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use crate::common::UnixTimeMs;
use crate::config::{DebugReportingConfig, SourceDebugReportingConfig};
use crate::origin::{Origin, Site};
use crate::{ContractViolation, SchemaVersion, Validate};

pub const OUTCOME_CONTRACT_VERSION: SchemaVersion = SchemaVersion(1);

/// Outcome of storing a source registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreSourceResult {
    Success,
    InternalError,
    InsufficientSourceCapacity,
    InsufficientUniqueDestinationCapacity,
    ExcessiveReportingOrigins,
    ProhibitedByBrowserPolicy,
    DestinationReportingLimitReached,
    DestinationGlobalLimitReached,
    DestinationBothLimitsReached,
    ReportingOriginsPerSiteLimitReached,
    ExceedsMaxChannelCapacity,
    ExceedsMaxTriggerStateCardinality,
}

/// Outcome of the event-level half of trigger attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventLevelResult {
    Success,
    SuccessDroppedLowerPriority,
    InternalError,
    NoCapacityForConversionDestination,
    NoMatchingImpressions,
    Deduplicated,
    ExcessiveAttributions,
    PriorityTooLow,
    NeverAttributedSource,
    FalselyAttributedSource,
    ExcessiveReportingOrigins,
    NoMatchingSourceFilterData,
    ProhibitedByBrowserPolicy,
    NoMatchingConfigurations,
    ExcessiveReports,
    ReportWindowPassed,
    NotRegistered,
    ReportWindowNotStarted,
    NoMatchingTriggerData,
}

/// Outcome of the aggregatable half of trigger attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregatableResult {
    Success,
    InternalError,
    NoCapacityForConversionDestination,
    NoMatchingImpressions,
    ExcessiveAttributions,
    ExcessiveReportingOrigins,
    NoHistograms,
    InsufficientBudget,
    NoMatchingSourceFilterData,
    NotRegistered,
    ProhibitedByBrowserPolicy,
    Deduplicated,
    ReportWindowPassed,
    ExcessiveReports,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOutcome {
    pub schema_version: SchemaVersion,
    pub result: StoreSourceResult,
    pub is_noised: bool,
    pub source_time: UnixTimeMs,
    pub source_origin: Origin,
    pub destination_sites: Vec<Site>,
    pub reporting_origin: Origin,
    pub is_within_fenced_frame: bool,
    pub config: DebugReportingConfig,
    pub aggregation_coordinator_origin: Option<Origin>,
}

impl SourceOutcome {
    #[allow(clippy::too_many_arguments)]
    pub fn v1(
        result: StoreSourceResult,
        is_noised: bool,
        source_time: UnixTimeMs,
        source_origin: Origin,
        destination_sites: Vec<Site>,
        reporting_origin: Origin,
        is_within_fenced_frame: bool,
        config: DebugReportingConfig,
        aggregation_coordinator_origin: Option<Origin>,
    ) -> Result<Self, ContractViolation> {
        let o = Self {
            schema_version: OUTCOME_CONTRACT_VERSION,
            result,
            is_noised,
            source_time,
            source_origin,
            destination_sites,
            reporting_origin,
            is_within_fenced_frame,
            config,
            aggregation_coordinator_origin,
        };
        o.validate()?;
        Ok(o)
    }
}

impl Validate for SourceOutcome {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != OUTCOME_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "source_outcome.schema_version",
                reason: "must match OUTCOME_CONTRACT_VERSION",
            });
        }
        self.source_origin.validate()?;
        self.reporting_origin.validate()?;
        if self.destination_sites.is_empty() {
            return Err(ContractViolation::InvalidValue {
                field: "source_outcome.destination_sites",
                reason: "must not be empty",
            });
        }
        let mut seen: BTreeSet<&Site> = BTreeSet::new();
        for site in &self.destination_sites {
            site.validate()?;
            if !seen.insert(site) {
                return Err(ContractViolation::InvalidValue {
                    field: "source_outcome.destination_sites",
                    reason: "entries must be unique",
                });
            }
        }
        self.config.validate()?;
        if let Some(origin) = &self.aggregation_coordinator_origin {
            origin.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerOutcome {
    pub schema_version: SchemaVersion,
    pub event_level_result: EventLevelResult,
    pub aggregatable_result: AggregatableResult,
    pub trigger_time: UnixTimeMs,
    pub destination_origin: Origin,
    pub reporting_origin: Origin,
    pub is_within_fenced_frame: bool,
    pub config: DebugReportingConfig,
    pub aggregation_coordinator_origin: Option<Origin>,
    pub matched_source: Option<SourceDebugReportingConfig>,
}

impl TriggerOutcome {
    #[allow(clippy::too_many_arguments)]
    pub fn v1(
        event_level_result: EventLevelResult,
        aggregatable_result: AggregatableResult,
        trigger_time: UnixTimeMs,
        destination_origin: Origin,
        reporting_origin: Origin,
        is_within_fenced_frame: bool,
        config: DebugReportingConfig,
        aggregation_coordinator_origin: Option<Origin>,
        matched_source: Option<SourceDebugReportingConfig>,
    ) -> Result<Self, ContractViolation> {
        let o = Self {
            schema_version: OUTCOME_CONTRACT_VERSION,
            event_level_result,
            aggregatable_result,
            trigger_time,
            destination_origin,
            reporting_origin,
            is_within_fenced_frame,
            config,
            aggregation_coordinator_origin,
            matched_source,
        };
        o.validate()?;
        Ok(o)
    }
}

impl Validate for TriggerOutcome {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != OUTCOME_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "trigger_outcome.schema_version",
                reason: "must match OUTCOME_CONTRACT_VERSION",
            });
        }
        self.destination_origin.validate()?;
        self.reporting_origin.validate()?;
        self.config.validate()?;
        if let Some(origin) = &self.aggregation_coordinator_origin {
            origin.validate()?;
        }
        if let Some(source) = &self.matched_source {
            source.validate()?;
        }
        Ok(())
    }
}

/// Exactly one registration outcome is processed per engine call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Source(SourceOutcome),
    Trigger(TriggerOutcome),
}

impl Validate for RegistrationOutcome {
    fn validate(&self) -> Result<(), ContractViolation> {
        match self {
            RegistrationOutcome::Source(o) => o.validate(),
            RegistrationOutcome::Trigger(o) => o.validate(),
        }
    }
}
