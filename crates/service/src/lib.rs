//! Service layer for the pieces API.
//! - `pieces::validation` checks raw input at the boundary.
//! - `pieces::repository` abstracts storage, with SeaORM and in-memory backends.
//! - `pieces::service` enforces existence rules and maps absence to `NotFound`.

pub mod errors;
pub mod pieces;
#[cfg(test)]
pub mod test_support;
