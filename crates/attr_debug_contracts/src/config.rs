#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use crate::debug_data::DebugDataType;
use crate::{ContractViolation, SchemaVersion, Validate};

pub const CONFIG_CONTRACT_VERSION: SchemaVersion = SchemaVersion(1);

/// One histogram contribution: an opaque bucket-key fragment and the
/// privacy-budget cost charged when it is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    pub key_piece: u64,
    pub value: u32,
}

impl Contribution {
    pub fn v1(key_piece: u64, value: u32) -> Result<Self, ContractViolation> {
        let c = Self { key_piece, value };
        c.validate()?;
        Ok(c)
    }
}

impl Validate for Contribution {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.value == 0 {
            return Err(ContractViolation::InvalidValue {
                field: "contribution.value",
                reason: "must be > 0",
            });
        }
        Ok(())
    }
}

/// Debug-reporting configuration attached to a source or trigger
/// registration. An empty `data` map means debug reporting is disabled for
/// that registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugReportingConfig {
    pub schema_version: SchemaVersion,
    pub key_piece: u64,
    pub data: BTreeMap<DebugDataType, Contribution>,
}

impl DebugReportingConfig {
    pub fn v1(
        key_piece: u64,
        data: BTreeMap<DebugDataType, Contribution>,
    ) -> Result<Self, ContractViolation> {
        let c = Self {
            schema_version: CONFIG_CONTRACT_VERSION,
            key_piece,
            data,
        };
        c.validate()?;
        Ok(c)
    }
}

impl Validate for DebugReportingConfig {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != CONFIG_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "debug_reporting_config.schema_version",
                reason: "must match CONFIG_CONTRACT_VERSION",
            });
        }
        for contribution in self.data.values() {
            contribution.validate()?;
        }
        Ok(())
    }
}

/// Source-level wrapper: adds the total budget the source may spend across
/// every debug report it ever contributes to. Enforcement of the cumulative
/// cap lives with the caller's ledger, not in this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDebugReportingConfig {
    pub schema_version: SchemaVersion,
    pub budget: u32,
    pub config: DebugReportingConfig,
}

impl SourceDebugReportingConfig {
    pub fn v1(budget: u32, config: DebugReportingConfig) -> Result<Self, ContractViolation> {
        let c = Self {
            schema_version: CONFIG_CONTRACT_VERSION,
            budget,
            config,
        };
        c.validate()?;
        Ok(c)
    }
}

impl Validate for SourceDebugReportingConfig {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != CONFIG_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "source_debug_reporting_config.schema_version",
                reason: "must match CONFIG_CONTRACT_VERSION",
            });
        }
        if self.budget == 0 {
            return Err(ContractViolation::InvalidValue {
                field: "source_debug_reporting_config.budget",
                reason: "must be > 0",
            });
        }
        self.config.validate()
    }
}
