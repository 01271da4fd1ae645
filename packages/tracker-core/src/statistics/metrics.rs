use serde::Serialize;

/// Counters of the requests handled by the tracker during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub init_reports_handled: u64,
    pub want_files_handled: u64,
    pub unknown_files_replied: u64,
    pub swarm_refreshes_handled: u64,
    pub file_completes_handled: u64,
    pub seeds_added: u64,
    pub duplicate_completions: u64,
    pub all_dones_handled: u64,
    pub requests_ignored: u64,
}
