#![forbid(unsafe_code)]

use attr_debug_contracts::config::DebugReportingConfig;
use attr_debug_contracts::debug_data::DebugDataType;
use attr_debug_contracts::origin::{Origin, Site};
use attr_debug_contracts::outcome::{RegistrationOutcome, SourceOutcome, TriggerOutcome};
use attr_debug_contracts::report::{DebugReport, ReportContribution, REPORT_CONTRACT_VERSION};
use url::Url;

use crate::classify::{classify_aggregatable, classify_event_level, classify_source};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugReportConfig {
    pub max_aggregatable_contributions: u8,
    pub allowed_coordinator_origins: Vec<Origin>,
}

impl DebugReportConfig {
    pub fn mvp_v1() -> Self {
        Self {
            max_aggregatable_contributions: 2,
            allowed_coordinator_origins: vec![Origin::v1(
                "https://publickeyservice.msmt.aws.privacysandboxservices.com",
            )
            .expect("default coordinator origin must parse")],
        }
    }
}

#[derive(Debug, Clone)]
pub struct DebugReportRuntime {
    config: DebugReportConfig,
}

impl DebugReportRuntime {
    pub fn new(config: DebugReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DebugReportConfig {
        &self.config
    }

    /// Decides whether the outcome yields a debug report and assembles it.
    ///
    /// The oracle is consulted at most once, and only after the fenced-frame
    /// and empty-config checks. Once the gate passes, a report is always
    /// returned; it may carry zero contributions (a deliberate null report).
    pub fn run(
        &self,
        outcome: &RegistrationOutcome,
        is_operation_allowed: impl FnOnce() -> bool,
    ) -> Option<DebugReport> {
        match outcome {
            RegistrationOutcome::Source(o) => self.run_source(o, is_operation_allowed),
            RegistrationOutcome::Trigger(o) => self.run_trigger(o, is_operation_allowed),
        }
    }

    fn run_source(
        &self,
        outcome: &SourceOutcome,
        is_operation_allowed: impl FnOnce() -> bool,
    ) -> Option<DebugReport> {
        gate(
            outcome.is_within_fenced_frame,
            &outcome.config,
            is_operation_allowed,
        )?;

        let categories: Vec<_> = classify_source(outcome.result, outcome.is_noised)
            .into_iter()
            .collect();
        let contributions = encode(&categories, &outcome.config, None);

        let context_site = site_of(&outcome.source_origin);
        // Validated non-empty, so min() always exists.
        let effective_destination = outcome.destination_sites.iter().min()?.clone();

        Some(DebugReport {
            schema_version: REPORT_CONTRACT_VERSION,
            contributions,
            context_site,
            reporting_origin: outcome.reporting_origin.clone(),
            effective_destination,
            aggregation_coordinator_origin: outcome.aggregation_coordinator_origin.clone(),
            scheduled_report_time: outcome.source_time,
        })
    }

    fn run_trigger(
        &self,
        outcome: &TriggerOutcome,
        is_operation_allowed: impl FnOnce() -> bool,
    ) -> Option<DebugReport> {
        gate(
            outcome.is_within_fenced_frame,
            &outcome.config,
            is_operation_allowed,
        )?;

        // Dedup by category before lookup: event-level and aggregatable
        // results that collapse onto one category yield one contribution.
        let mut categories = Vec::with_capacity(2);
        for category in [
            classify_event_level(outcome.event_level_result),
            classify_aggregatable(outcome.aggregatable_result),
        ]
        .into_iter()
        .flatten()
        {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }

        let source_key_piece = outcome
            .matched_source
            .as_ref()
            .map(|s| s.config.key_piece);
        let contributions = encode(&categories, &outcome.config, source_key_piece);

        let destination_site = site_of(&outcome.destination_origin);

        Some(DebugReport {
            schema_version: REPORT_CONTRACT_VERSION,
            contributions,
            context_site: destination_site.clone(),
            reporting_origin: outcome.reporting_origin.clone(),
            effective_destination: destination_site,
            aggregation_coordinator_origin: outcome.aggregation_coordinator_origin.clone(),
            scheduled_report_time: outcome.trigger_time,
        })
    }
}

/// Sequential short-circuit checks of the enablement gate. `None` means the
/// call produces no report at all.
fn gate(
    is_within_fenced_frame: bool,
    config: &DebugReportingConfig,
    is_operation_allowed: impl FnOnce() -> bool,
) -> Option<()> {
    if is_within_fenced_frame {
        return None;
    }
    if config.data.is_empty() {
        return None;
    }
    if !is_operation_allowed() {
        return None;
    }
    Some(())
}

/// Looks up each unique category in the config and encodes its bucket as the
/// OR of the base key, the category key, and the matched source's key (when
/// one exists). Categories without a config entry are silently skipped.
fn encode(
    categories: &[DebugDataType],
    config: &DebugReportingConfig,
    source_key_piece: Option<u64>,
) -> Vec<ReportContribution> {
    categories
        .iter()
        .filter_map(|category| {
            config.data.get(category).map(|entry| ReportContribution {
                data_type: *category,
                bucket: config.key_piece | entry.key_piece | source_key_piece.unwrap_or(0),
                value: entry.value,
            })
        })
        .collect()
}

// Infallible for contract-valid origins: Origin::validate already requires
// a parseable url with a host, so the gate's outcome alone decides whether
// a report exists.
fn site_of(origin: &Origin) -> Site {
    let parsed =
        Url::parse(origin.as_str()).expect("origin contract guarantees a parseable url");
    let host = parsed
        .host_str()
        .expect("origin contract guarantees a host");
    let text = match parsed.port() {
        Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
        None => format!("{}://{}", parsed.scheme(), host),
    };
    Site::v1(text).expect("derived site text must satisfy the site contract")
}

#[cfg(test)]
mod tests {
    use super::*;
    use attr_debug_contracts::common::UnixTimeMs;
    use attr_debug_contracts::config::{Contribution, SourceDebugReportingConfig};
    use attr_debug_contracts::outcome::{
        AggregatableResult, EventLevelResult, StoreSourceResult,
    };
    use std::cell::Cell;
    use std::collections::BTreeMap;

    fn runtime() -> DebugReportRuntime {
        DebugReportRuntime::new(DebugReportConfig::mvp_v1())
    }

    fn reporting_config(
        key_piece: u64,
        entries: &[(DebugDataType, u64, u32)],
    ) -> DebugReportingConfig {
        let mut data = BTreeMap::new();
        for (data_type, entry_key, value) in entries {
            data.insert(*data_type, Contribution::v1(*entry_key, *value).unwrap());
        }
        DebugReportingConfig::v1(key_piece, data).unwrap()
    }

    fn source_outcome(
        result: StoreSourceResult,
        is_noised: bool,
        is_within_fenced_frame: bool,
        config: DebugReportingConfig,
    ) -> RegistrationOutcome {
        RegistrationOutcome::Source(
            SourceOutcome::v1(
                result,
                is_noised,
                UnixTimeMs(1_700_000_000_000),
                Origin::v1("https://source.test").unwrap(),
                vec![
                    Site::v1("https://d2.test").unwrap(),
                    Site::v1("https://d1.test").unwrap(),
                ],
                Origin::v1("https://a.test").unwrap(),
                is_within_fenced_frame,
                config,
                None,
            )
            .unwrap(),
        )
    }

    fn trigger_outcome(
        event_level_result: EventLevelResult,
        aggregatable_result: AggregatableResult,
        config: DebugReportingConfig,
        matched_source: Option<SourceDebugReportingConfig>,
    ) -> RegistrationOutcome {
        RegistrationOutcome::Trigger(
            TriggerOutcome::v1(
                event_level_result,
                aggregatable_result,
                UnixTimeMs(1_700_000_100_000),
                Origin::v1("https://b.test").unwrap(),
                Origin::v1("https://a.test").unwrap(),
                false,
                config,
                None,
                matched_source,
            )
            .unwrap(),
        )
    }

    fn full_source_config() -> DebugReportingConfig {
        reporting_config(
            1,
            &[
                (DebugDataType::SourceSuccess, 2, 3),
                (DebugDataType::SourceNoised, 4, 5),
                (DebugDataType::SourceUnknownError, 8, 7),
            ],
        )
    }

    #[test]
    fn at_dbg_01_fenced_frame_suppresses_report_unconditionally() {
        let outcome = source_outcome(
            StoreSourceResult::Success,
            false,
            true,
            full_source_config(),
        );
        assert_eq!(runtime().run(&outcome, || true), None);
    }

    #[test]
    fn at_dbg_02_empty_config_suppresses_report_without_oracle_call() {
        let outcome = source_outcome(
            StoreSourceResult::Success,
            false,
            false,
            reporting_config(1, &[]),
        );
        let calls = Cell::new(0u32);
        let result = runtime().run(&outcome, || {
            calls.set(calls.get() + 1);
            true
        });
        assert_eq!(result, None);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn at_dbg_03_denying_oracle_suppresses_report() {
        let outcome = source_outcome(
            StoreSourceResult::Success,
            false,
            false,
            full_source_config(),
        );
        assert_eq!(runtime().run(&outcome, || false), None);
    }

    #[test]
    fn at_dbg_04_oracle_is_consulted_exactly_once() {
        let outcome = source_outcome(
            StoreSourceResult::Success,
            false,
            false,
            full_source_config(),
        );
        let calls = Cell::new(0u32);
        let result = runtime().run(&outcome, || {
            calls.set(calls.get() + 1);
            true
        });
        assert!(result.is_some());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn at_dbg_05_source_bucket_is_or_of_base_and_entry_keys() {
        let outcome = source_outcome(
            StoreSourceResult::Success,
            false,
            false,
            reporting_config(3, &[(DebugDataType::SourceSuccess, 5, 3)]),
        );
        let report = runtime().run(&outcome, || true).unwrap();
        assert_eq!(report.contributions.len(), 1);
        assert_eq!(report.contributions[0].bucket, 7);
        assert_eq!(report.contributions[0].value, 3);
    }

    #[test]
    fn at_dbg_06_budget_required_tracks_contribution_value() {
        let outcome = source_outcome(
            StoreSourceResult::Success,
            false,
            false,
            reporting_config(1, &[(DebugDataType::SourceSuccess, 2, 3)]),
        );
        let report = runtime().run(&outcome, || true).unwrap();
        assert_eq!(report.contributions[0].bucket, 3);
        assert_eq!(report.budget_required(), 3);
    }

    #[test]
    fn at_dbg_07_unmatched_category_yields_null_report() {
        // Config is populated, but not for the category this outcome maps to.
        let outcome = source_outcome(
            StoreSourceResult::InsufficientSourceCapacity,
            false,
            false,
            reporting_config(1, &[(DebugDataType::SourceSuccess, 2, 3)]),
        );
        let report = runtime().run(&outcome, || true).unwrap();
        assert!(report.contributions.is_empty());
        assert_eq!(report.budget_required(), 0);
    }

    #[test]
    fn at_dbg_08_unmapped_outcome_never_contributes() {
        let config = reporting_config(
            1,
            &[
                (DebugDataType::SourceSuccess, 2, 3),
                (DebugDataType::SourceNoised, 4, 5),
                (DebugDataType::SourceUnknownError, 8, 7),
                (DebugDataType::SourceStorageLimit, 16, 9),
            ],
        );
        let outcome = source_outcome(
            StoreSourceResult::ProhibitedByBrowserPolicy,
            false,
            false,
            config,
        );
        let report = runtime().run(&outcome, || true).unwrap();
        assert!(report.contributions.is_empty());
    }

    #[test]
    fn at_dbg_09_matched_source_key_widens_trigger_bucket() {
        let config = reporting_config(5, &[(DebugDataType::TriggerEventDeduplicated, 3, 6)]);

        let without_source = trigger_outcome(
            EventLevelResult::Deduplicated,
            AggregatableResult::Success,
            config.clone(),
            None,
        );
        let report = runtime().run(&without_source, || true).unwrap();
        assert_eq!(report.contributions[0].bucket, 7);

        let matched = SourceDebugReportingConfig::v1(
            100,
            DebugReportingConfig::v1(9, BTreeMap::new()).unwrap(),
        )
        .unwrap();
        let with_source = trigger_outcome(
            EventLevelResult::Deduplicated,
            AggregatableResult::Success,
            config,
            Some(matched),
        );
        let report = runtime().run(&with_source, || true).unwrap();
        assert_eq!(report.contributions[0].bucket, 15);
    }

    #[test]
    fn at_dbg_10_distinct_trigger_categories_produce_two_contributions() {
        let config = reporting_config(
            1,
            &[
                (DebugDataType::TriggerEventDeduplicated, 2, 3),
                (DebugDataType::TriggerAggregateDeduplicated, 4, 9),
            ],
        );
        let outcome = trigger_outcome(
            EventLevelResult::Deduplicated,
            AggregatableResult::Deduplicated,
            config,
            None,
        );
        let report = runtime().run(&outcome, || true).unwrap();
        assert_eq!(report.contributions.len(), 2);
        let buckets: Vec<u64> = report.contributions.iter().map(|c| c.bucket).collect();
        assert!(buckets.contains(&3));
        assert!(buckets.contains(&5));
        assert_eq!(report.budget_required(), 12);
    }

    #[test]
    fn at_dbg_11_shared_category_is_not_double_counted() {
        // Event-level and aggregatable halves both collapse onto
        // trigger-no-matching-source; exactly one contribution results.
        let config = reporting_config(1, &[(DebugDataType::TriggerNoMatchingSource, 2, 3)]);
        let outcome = trigger_outcome(
            EventLevelResult::NoMatchingImpressions,
            AggregatableResult::NoMatchingImpressions,
            config,
            None,
        );
        let report = runtime().run(&outcome, || true).unwrap();
        assert_eq!(report.contributions.len(), 1);
        assert_eq!(report.contributions[0].bucket, 3);
        assert_eq!(report.budget_required(), 3);
    }

    #[test]
    fn at_dbg_12_source_effective_destination_is_smallest_site() {
        let outcome = source_outcome(
            StoreSourceResult::Success,
            false,
            false,
            full_source_config(),
        );
        let report = runtime().run(&outcome, || true).unwrap();
        assert_eq!(report.effective_destination.as_str(), "https://d1.test");
        assert_eq!(report.context_site.as_str(), "https://source.test");
        assert_eq!(report.reporting_origin.as_str(), "https://a.test");
        assert_eq!(report.scheduled_report_time, UnixTimeMs(1_700_000_000_000));
    }

    #[test]
    fn at_dbg_13_trigger_destination_site_is_context_and_destination() {
        let config = reporting_config(1, &[(DebugDataType::TriggerNoMatchingSource, 2, 3)]);
        let outcome = trigger_outcome(
            EventLevelResult::NoMatchingImpressions,
            AggregatableResult::Success,
            config,
            None,
        );
        let report = runtime().run(&outcome, || true).unwrap();
        assert_eq!(report.context_site.as_str(), "https://b.test");
        assert_eq!(report.effective_destination.as_str(), "https://b.test");
        assert_eq!(report.scheduled_report_time, UnixTimeMs(1_700_000_100_000));
    }

    #[test]
    fn at_dbg_14_fully_successful_trigger_yields_null_report() {
        let config = reporting_config(
            1,
            &[
                (DebugDataType::TriggerNoMatchingSource, 2, 3),
                (DebugDataType::TriggerEventDeduplicated, 4, 5),
                (DebugDataType::TriggerAggregateDeduplicated, 8, 7),
            ],
        );
        let outcome = trigger_outcome(
            EventLevelResult::Success,
            AggregatableResult::Success,
            config,
            None,
        );
        let report = runtime().run(&outcome, || true).unwrap();
        assert!(report.contributions.is_empty());
        assert_eq!(report.budget_required(), 0);
    }

    #[test]
    fn at_dbg_15_noised_source_reports_source_noised() {
        let outcome = source_outcome(
            StoreSourceResult::Success,
            true,
            false,
            full_source_config(),
        );
        let report = runtime().run(&outcome, || true).unwrap();
        assert_eq!(report.contributions.len(), 1);
        assert_eq!(
            report.contributions[0].data_type,
            DebugDataType::SourceNoised
        );
        // base 1 | entry 4
        assert_eq!(report.contributions[0].bucket, 5);
    }

    #[test]
    fn at_dbg_16_gate_pass_always_yields_a_report_for_valid_origins() {
        // Once the gate passes, the report must exist for every origin shape
        // the contract admits, including hosts with explicit ports.
        let outcome = RegistrationOutcome::Source(
            SourceOutcome::v1(
                StoreSourceResult::Success,
                false,
                UnixTimeMs(1),
                Origin::v1("https://source.test:8443").unwrap(),
                vec![Site::v1("https://d.test").unwrap()],
                Origin::v1("https://a.test").unwrap(),
                false,
                full_source_config(),
                None,
            )
            .unwrap(),
        );
        let calls = Cell::new(0u32);
        let report = runtime()
            .run(&outcome, || {
                calls.set(calls.get() + 1);
                true
            })
            .expect("gate passed, report must be constructed");
        assert_eq!(calls.get(), 1);
        assert_eq!(report.context_site.as_str(), "https://source.test:8443");
    }
}
