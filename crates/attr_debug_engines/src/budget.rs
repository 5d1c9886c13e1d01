#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::sync::Mutex;

use attr_debug_contracts::common::SourceId;
use attr_debug_contracts::origin::Site;

/// In-memory ledger for the cumulative debug budget a source may spend per
/// destination site. The engine only computes a report's cost; the caller
/// checks that cost here before delivery.
#[derive(Debug, Default)]
pub struct DebugBudgetLedger {
    spent: Mutex<BTreeMap<(SourceId, Site), u32>>,
}

impl DebugBudgetLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically records `amount` against `(source_id, site)` if the spend
    /// stays within `budget`. Returns whether the spend was accepted; a
    /// rejected spend leaves the ledger unchanged.
    pub fn consume(&self, source_id: SourceId, site: &Site, amount: u32, budget: u32) -> bool {
        let mut spent = match self.spent.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let used = spent.entry((source_id, site.clone())).or_insert(0);
        match used.checked_add(amount) {
            Some(total) if total <= budget => {
                *used = total;
                true
            }
            _ => false,
        }
    }

    /// Budget already recorded for `(source_id, site)`.
    pub fn spent(&self, source_id: SourceId, site: &Site) -> u32 {
        let spent = match self.spent.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        spent
            .get(&(source_id, site.clone()))
            .copied()
            .unwrap_or(0)
    }
}
