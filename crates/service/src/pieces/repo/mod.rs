pub mod memory;
pub mod seaorm;

pub use memory::MemoryPieceRepository;
pub use seaorm::SeaOrmPieceRepository;
