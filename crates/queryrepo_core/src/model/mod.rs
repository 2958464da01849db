//! Statement storage model.
//!
//! # Responsibility
//! - Define the per-collection statement store used by the repository.
//!
//! # Invariants
//! - Statement names are unique inside one collection.
//! - Statement text is stored verbatim and never interpreted.

pub mod collection;
