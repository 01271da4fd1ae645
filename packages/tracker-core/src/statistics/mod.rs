//! Tracker statistics.
//!
//! The coordinator sends an [`Event`](event::Event) to the event handler
//! after handling each request. The handler updates the [`Metrics`](metrics::Metrics)
//! which end up in the tracker run report.
//!
//! | Counter                     | Increased when                                       |
//! |-----------------------------|------------------------------------------------------|
//! | `init_reports_handled`      | a bootstrap report is registered                     |
//! | `want_files_handled`        | a `WantFile` request is answered                     |
//! | `unknown_files_replied`     | a `WantFile` request is answered with an unknown file |
//! | `swarm_refreshes_handled`   | a `SwarmRefresh` request is answered                 |
//! | `file_completes_handled`    | a `FileComplete` notification is handled             |
//! | `seeds_added`               | a completion adds a new seed                         |
//! | `duplicate_completions`     | a completion comes from a peer that is already seed  |
//! | `all_dones_handled`         | an `AllDone` notification is handled                 |
//! | `requests_ignored`          | a request is dropped                                 |
pub mod event;
pub mod metrics;
