use thiserror::Error;

/// Fatal conditions that stop a solve before it starts.
///
/// Rejected, illegal and disconnecting moves are not errors; they are
/// ordinary outcomes of the search and never surface here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnnealError {
    #[error("invalid anneal configuration: {0}")]
    InvalidConfig(String),

    #[error("cannot anneal a graph with no vertices")]
    EmptyGraph,

    #[error("initial graph is disconnected; repair it before annealing")]
    Disconnected,

    #[error("topology repair left the graph disconnected")]
    RepairFailed,

    #[error("origin vertex {vertex} out of range for {count} vertices")]
    OriginOutOfRange { vertex: usize, count: usize },
}
