use crate::statistics::event::Event;
use crate::statistics::metrics::Metrics;

pub fn handle_event(event: Event, metrics: &mut Metrics) {
    match event {
        Event::InitReport => {
            metrics.init_reports_handled += 1;
        }
        Event::WantFile { known } => {
            metrics.want_files_handled += 1;

            if !known {
                metrics.unknown_files_replied += 1;
            }
        }
        Event::SwarmRefresh => {
            metrics.swarm_refreshes_handled += 1;
        }
        Event::FileComplete { new_seed } => {
            metrics.file_completes_handled += 1;

            if new_seed {
                metrics.seeds_added += 1;
            } else {
                metrics.duplicate_completions += 1;
            }
        }
        Event::AllDone => {
            metrics.all_dones_handled += 1;
        }
        Event::Ignored { kind } => {
            tracing::debug!(%kind, "request ignored");
            metrics.requests_ignored += 1;
        }
    }

    tracing::debug!("stats: {metrics:?}");
}
