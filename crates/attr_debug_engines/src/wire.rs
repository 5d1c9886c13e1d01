#![forbid(unsafe_code)]

use attr_debug_contracts::debug_data::DebugDataType;
use attr_debug_contracts::origin::Origin;
use attr_debug_contracts::report::DebugReport;
use serde::Serialize;
use serde_json::Value;

use crate::report::DebugReportConfig;

pub const VERBOSE_REPORT_PATH: &str = "/.well-known/attribution-reporting/debug/verbose";
pub const AGGREGATION_API_IDENTIFIER: &str = "attribution-reporting-debug";
pub const AGGREGATION_API_VERSION: &str = "0.1";

/// Endpoint the verbose report body is POSTed to.
pub fn report_url(report: &DebugReport) -> String {
    format!("{}{VERBOSE_REPORT_PATH}", report.reporting_origin.as_str())
}

#[derive(Serialize)]
struct VerboseBodyFields<'a> {
    attribution_destination: &'a str,
}

#[derive(Serialize)]
struct VerboseBodyEntry<'a> {
    body: VerboseBodyFields<'a>,
    #[serde(rename = "type")]
    data_type: DebugDataType,
}

/// Verbose report body: one entry per contribution the encoder produced.
/// A null report serializes to an empty array.
pub fn report_body(report: &DebugReport) -> Value {
    let entries: Vec<VerboseBodyEntry<'_>> = report
        .contributions
        .iter()
        .map(|c| VerboseBodyEntry {
            body: VerboseBodyFields {
                attribution_destination: report.effective_destination.as_str(),
            },
            data_type: c.data_type,
        })
        .collect();
    serde_json::to_value(entries).expect("verbose body entries must serialize")
}

#[derive(Debug, Clone, PartialEq)]
pub enum AggregationRequestError {
    CoordinatorNotAllowed { origin: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationOperation {
    Histogram,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMode {
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DebugMode {
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramContribution {
    pub bucket: u64,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregationSharedInfo {
    pub api: &'static str,
    pub api_version: &'static str,
    pub attribution_destination: String,
    pub debug_mode: DebugMode,
    pub report_id: String,
    pub reporting_origin: Origin,
    pub scheduled_report_time: u64,
}

/// Payload handed to the aggregation-service submitter. Built from a
/// `DebugReport`; fails only when the report names a coordinator origin that
/// is not on the configured allow-list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatableReportRequest {
    pub operation: AggregationOperation,
    pub aggregation_mode: AggregationMode,
    pub max_contributions_allowed: u8,
    pub contributions: Vec<HistogramContribution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation_coordinator_origin: Option<Origin>,
    pub shared_info: AggregationSharedInfo,
}

impl AggregatableReportRequest {
    pub fn build(
        report: &DebugReport,
        config: &DebugReportConfig,
    ) -> Result<Self, AggregationRequestError> {
        if let Some(origin) = &report.aggregation_coordinator_origin {
            if !config.allowed_coordinator_origins.contains(origin) {
                return Err(AggregationRequestError::CoordinatorNotAllowed {
                    origin: origin.as_str().to_string(),
                });
            }
        }

        let contributions = report
            .contributions
            .iter()
            .take(config.max_aggregatable_contributions as usize)
            .map(|c| HistogramContribution {
                bucket: c.bucket,
                value: c.value,
            })
            .collect();

        Ok(Self {
            operation: AggregationOperation::Histogram,
            aggregation_mode: AggregationMode::Default,
            max_contributions_allowed: config.max_aggregatable_contributions,
            contributions,
            aggregation_coordinator_origin: report.aggregation_coordinator_origin.clone(),
            shared_info: AggregationSharedInfo {
                api: AGGREGATION_API_IDENTIFIER,
                api_version: AGGREGATION_API_VERSION,
                attribution_destination: report.effective_destination.as_str().to_string(),
                debug_mode: DebugMode::Disabled,
                report_id: new_report_id(),
                reporting_origin: report.reporting_origin.clone(),
                scheduled_report_time: report.scheduled_report_time.0,
            },
        })
    }

    pub fn payload(&self) -> Value {
        serde_json::to_value(self).expect("aggregatable report request must serialize")
    }
}

fn new_report_id() -> String {
    let bits: u128 = rand::random();
    format!("{bits:032x}")
}
