use std::sync::Arc;

use service::pieces::{PieceRepository, PieceService};

/// Shared handler state. The storage backend is chosen at startup.
#[derive(Clone)]
pub struct ServerState {
    pub pieces: Arc<PieceService<dyn PieceRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn PieceRepository>) -> Self {
        Self { pieces: Arc::new(PieceService::new(repo)) }
    }
}
