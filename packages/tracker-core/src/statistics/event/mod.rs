use swarm_sim_protocol::RequestKind;

pub mod handler;

/// An event generated by the tracker coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    InitReport,
    WantFile { known: bool },
    SwarmRefresh,
    FileComplete { new_seed: bool },
    AllDone,

    /// A request dropped without being handled, for example a `WantFile`
    /// received during bootstrap or a report from a peer outside the
    /// population.
    Ignored { kind: RequestKind },
}
