//! The tracker coordinator.
//!
//! The coordinator is the tracker control loop. It owns the swarm registry,
//! the termination set and the shutdown broadcast, and it is the only task
//! that mutates them. A run goes through two phases:
//!
//! 1. **Bootstrap**. Every peer reports the files it owns. Reports are
//!    processed in increasing peer id order, whatever order they arrive in,
//!    and each peer is acknowledged right after its report is registered.
//!    Peers can't download anything before they get the acknowledgement, so
//!    every owned file is in the registry before the first `WantFile`.
//!    Requests from peers acknowledged early are kept until the last report
//!    is registered, and handled first once serving starts.
//! 2. **Serving**. Requests are handled in the order they arrive until
//!    every peer of the population has sent `AllDone`.
//!
//! When the run terminates the coordinator builds its report and sends the
//! shutdown signal to every peer, exactly once.
//!
//! ```text
//! let container = Arc::new(TrackerCoreContainer::initialize());
//! let (tracker, shutdown_receivers) = Tracker::new(&container, &population);
//! let report = tracker.run(inbox).await?;
//! ```
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use serde::Serialize;
use swarm_sim_primitives::{FileDescriptor, PeerId, SwarmMetadata};
use swarm_sim_protocol::{InitAck, TrackerInbox, TrackerRequest};
use tokio::sync::oneshot;

use crate::announce_handler::Completion;
use crate::container::TrackerCoreContainer;
use crate::error::{Phase, TrackerError};
use crate::shutdown::{ShutdownBroadcast, ShutdownReceiver};
use crate::statistics::event::handler::handle_event;
use crate::statistics::event::Event;
use crate::statistics::metrics::Metrics;
use crate::termination::{Mark, TerminationSet};

/// The result of a tracker run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrackerReport {
    /// The final registry, ordered by file name.
    pub files: BTreeMap<String, SwarmMetadata>,

    /// The tracker statistics.
    pub metrics: Metrics,

    /// The number of peers that received the shutdown signal.
    pub shutdowns_delivered: usize,
}

pub struct Tracker {
    container: Arc<TrackerCoreContainer>,
    termination: TerminationSet,
    shutdown: ShutdownBroadcast,
    metrics: Metrics,
}

type PendingReport = (Vec<FileDescriptor>, oneshot::Sender<InitAck>);

impl Tracker {
    /// Creates the tracker for the given population.
    ///
    /// It also returns the shutdown receiver of each peer.
    #[must_use]
    pub fn new(container: &Arc<TrackerCoreContainer>, population: &[PeerId]) -> (Self, BTreeMap<PeerId, ShutdownReceiver>) {
        let (shutdown, receivers) = ShutdownBroadcast::new(population.iter().copied());

        let tracker = Self {
            container: container.clone(),
            termination: TerminationSet::new(population.iter().copied()),
            shutdown,
            metrics: Metrics::default(),
        };

        (tracker, receivers)
    }

    /// Runs the bootstrap and the serving phases, then broadcasts the
    /// shutdown signal.
    ///
    /// # Errors
    ///
    /// Will return a [`TrackerError::InboxClosed`] if every sender of the
    /// inbox is dropped before the run terminates. The shutdown signal is
    /// not sent in that case; the receivers observe the dropped senders.
    pub async fn run(mut self, mut inbox: TrackerInbox) -> Result<TrackerReport, TrackerError> {
        tracing::info!(peers = self.termination.population().len(), "tracker bootstrap started");

        let deferred = self.bootstrap(&mut inbox).await?;

        tracing::info!(
            files = self.container.in_memory_swarm_repository.len(),
            deferred = deferred.len(),
            "tracker serving started"
        );

        for request in deferred {
            self.handle_request(request);
        }

        while !self.termination.is_complete() {
            match inbox.recv().await {
                Some(request) => self.handle_request(request),
                None => {
                    let pending = self.termination.remaining().iter().map(PeerId::value).collect();
                    return Err(TrackerError::inbox_closed(Phase::Serving, pending));
                }
            }
        }

        tracing::info!("every peer is done, shutting the swarm down");

        let files = self.container.scrape_handler.scrape().files;
        let metrics = self.metrics;
        let shutdowns_delivered = self.shutdown.broadcast();

        Ok(TrackerReport {
            files,
            metrics,
            shutdowns_delivered,
        })
    }

    /// Registers the report of every peer, in id order.
    ///
    /// Peers acknowledged early may send serving requests while the others
    /// are still reporting. Those are returned in arrival order, to be
    /// handled before anything else in the inbox.
    async fn bootstrap(&mut self, inbox: &mut TrackerInbox) -> Result<VecDeque<TrackerRequest>, TrackerError> {
        let order: Vec<PeerId> = self.termination.population().iter().copied().collect();
        let mut pending: BTreeMap<PeerId, PendingReport> = BTreeMap::new();
        let mut deferred = VecDeque::new();

        for (position, peer) in order.iter().enumerate() {
            let (files, ack) = loop {
                if let Some(report) = pending.remove(peer) {
                    break report;
                }

                let Some(request) = inbox.recv().await else {
                    let pending = order[position..].iter().map(PeerId::value).collect();
                    return Err(TrackerError::inbox_closed(Phase::Bootstrap, pending));
                };

                self.buffer_bootstrap_request(request, &order[position..], &mut pending, &mut deferred);
            };

            self.container.bootstrap_handler.register_owned_files(*peer, &files);
            self.record(Event::InitReport);

            if ack.send(InitAck).is_err() {
                tracing::warn!(%peer, "peer is gone, bootstrap acknowledgement not delivered");
            }

            tracing::debug!(%peer, files = files.len(), "peer bootstrapped");
        }

        Ok(deferred)
    }

    fn buffer_bootstrap_request(
        &mut self,
        request: TrackerRequest,
        waiting: &[PeerId],
        pending: &mut BTreeMap<PeerId, PendingReport>,
        deferred: &mut VecDeque<TrackerRequest>,
    ) {
        let kind = request.kind();
        let peer = request.peer();

        match request {
            TrackerRequest::InitReport { peer, files, ack } if waiting.contains(&peer) && !pending.contains_key(&peer) => {
                pending.insert(peer, (files, ack));
            }
            TrackerRequest::InitReport { .. } => {
                tracing::warn!(%peer, %kind, "unexpected bootstrap report, dropping it");
                self.record(Event::Ignored { kind });
            }
            _ if self.termination.is_member(peer) => {
                tracing::debug!(%peer, %kind, "request received during bootstrap, deferring it");
                deferred.push_back(request);
            }
            _ => {
                tracing::warn!(%peer, %kind, "request from a peer outside the swarm, dropping it");
                self.record(Event::Ignored { kind });
            }
        }
    }

    fn handle_request(&mut self, request: TrackerRequest) {
        let kind = request.kind();
        let peer = request.peer();

        if !self.termination.is_member(peer) {
            tracing::warn!(%peer, %kind, "request from a peer outside the swarm, dropping it");
            self.record(Event::Ignored { kind });
            return;
        }

        tracing::debug!(%peer, %kind, "handling request");

        match request {
            TrackerRequest::InitReport { .. } => {
                tracing::warn!(%peer, %kind, "bootstrap report after bootstrap, dropping it");
                self.record(Event::Ignored { kind });
            }
            TrackerRequest::WantFile { filename, reply, .. } => {
                let file_info = self.container.announce_handler.want_file(&filename);
                let known = file_info.segment_count() > 0;

                if reply.send(file_info).is_err() {
                    tracing::debug!(%peer, file = %filename, "peer is gone, file info not delivered");
                }

                self.record(Event::WantFile { known });
            }
            TrackerRequest::SwarmRefresh { filename, reply, .. } => {
                let seeds = self.container.scrape_handler.refresh_swarm(&filename);

                if reply.send(seeds).is_err() {
                    tracing::debug!(%peer, file = %filename, "peer is gone, seed list not delivered");
                }

                self.record(Event::SwarmRefresh);
            }
            TrackerRequest::FileComplete { filename, .. } => {
                match self.container.announce_handler.announce_completion(peer, &filename) {
                    Completion::NewSeed => self.record(Event::FileComplete { new_seed: true }),
                    Completion::AlreadySeed => self.record(Event::FileComplete { new_seed: false }),
                    Completion::UnknownFile => self.record(Event::Ignored { kind }),
                }
            }
            TrackerRequest::AllDone { .. } => match self.termination.mark_done(peer) {
                Mark::Marked => {
                    tracing::info!(%peer, remaining = self.termination.remaining().len(), "peer is done");
                    self.record(Event::AllDone);
                }
                Mark::AlreadyDone | Mark::NotAMember => {
                    tracing::warn!(%peer, "repeated all done notification, ignoring it");
                    self.record(Event::Ignored { kind });
                }
            },
        }
    }

    fn record(&mut self, event: Event) {
        handle_event(event, &mut self.metrics);
    }
}
