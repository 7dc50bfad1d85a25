//! Space-time colocation of satellite probe records against ground-reference stations.
//!
//! For every probe point the crate finds all reference observations inside a coincidence
//! envelope in longitude, latitude and time ([`match_colocated`]), then optionally reduces
//! each probe's matches to summary statistics ([`aggregate`]). Matching scales to
//! million-point records by cutting the time-sorted probe record at large time gaps and
//! pre-filtering each chunk with 1-D nearest-neighbour queries before the exact geometric
//! test.

pub mod aggregate;
pub mod chunking;
mod coarse;
pub mod colocate_errors;
pub mod constants;
pub mod geo;
pub mod geofence;
pub mod index_map;
pub mod matcher;

pub use aggregate::{aggregate, ColocationSummary};
pub use colocate_errors::ColocateError;
pub use constants::MatchSet;
pub use geofence::SiteCategory;
pub use matcher::{match_colocated, MatchConfig, ProbeBatch, ReferenceBatch};
