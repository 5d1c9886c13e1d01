#![forbid(unsafe_code)]

use crate::common::UnixTimeMs;
use crate::debug_data::DebugDataType;
use crate::origin::{Origin, Site};
use crate::{ContractViolation, SchemaVersion, Validate};

pub const REPORT_CONTRACT_VERSION: SchemaVersion = SchemaVersion(1);

/// One encoded contribution carried by an assembled report, paired with the
/// category it was encoded for. The verbose body and the aggregatable
/// payload both read from this list independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportContribution {
    pub data_type: DebugDataType,
    pub bucket: u64,
    pub value: u32,
}

impl Validate for ReportContribution {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.value == 0 {
            return Err(ContractViolation::InvalidValue {
                field: "report_contribution.value",
                reason: "must be > 0",
            });
        }
        Ok(())
    }
}

/// An assembled debug report. Immutable once constructed; `contributions`
/// may be empty (a deliberate null report).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugReport {
    pub schema_version: SchemaVersion,
    pub contributions: Vec<ReportContribution>,
    pub context_site: Site,
    pub reporting_origin: Origin,
    pub effective_destination: Site,
    pub aggregation_coordinator_origin: Option<Origin>,
    pub scheduled_report_time: UnixTimeMs,
}

impl DebugReport {
    pub fn v1(
        contributions: Vec<ReportContribution>,
        context_site: Site,
        reporting_origin: Origin,
        effective_destination: Site,
        aggregation_coordinator_origin: Option<Origin>,
        scheduled_report_time: UnixTimeMs,
    ) -> Result<Self, ContractViolation> {
        let r = Self {
            schema_version: REPORT_CONTRACT_VERSION,
            contributions,
            context_site,
            reporting_origin,
            effective_destination,
            aggregation_coordinator_origin,
            scheduled_report_time,
        };
        r.validate()?;
        Ok(r)
    }

    /// Total budget this report would charge against the source's cap.
    /// Informational: enforcement belongs to the caller's ledger.
    pub fn budget_required(&self) -> u32 {
        self.contributions
            .iter()
            .fold(0u32, |acc, c| acc.saturating_add(c.value))
    }
}

impl Validate for DebugReport {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != REPORT_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "debug_report.schema_version",
                reason: "must match REPORT_CONTRACT_VERSION",
            });
        }
        for contribution in &self.contributions {
            contribution.validate()?;
        }
        self.context_site.validate()?;
        self.reporting_origin.validate()?;
        self.effective_destination.validate()?;
        if let Some(origin) = &self.aggregation_coordinator_origin {
            origin.validate()?;
        }
        Ok(())
    }
}
