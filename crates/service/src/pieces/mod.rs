//! Piece module: three-layer architecture (domain + validation, repository, service).

pub mod domain;
pub mod validation;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{NewPiece, Piece};
pub use repository::PieceRepository;
pub use service::{PieceService, PIECE_NOT_FOUND_ERR};
