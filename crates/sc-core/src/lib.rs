//! `sc-core` — foundational types for the site-coverage scoring engine.
//!
//! This crate is a dependency of every other `sc-*` crate.  It has no
//! `sc-*` dependencies and minimal external ones (only `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `EdgeId`                                    |
//! | [`geo`]         | `GeoPoint`, haversine distance, destination, projection |
//! | [`units`]       | `Speed`, mile/metre conversions, `round_half_away`    |
//! | [`time`]        | `Deadline`                                            |
//! | [`config`]      | `ScoringConfig`, `DeductionMode`                      |
//! | [`diagnostic`]  | `Diagnostic` (absorbed per-item failures)             |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod geo;
pub mod ids;
pub mod time;
pub mod units;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DeductionMode, ScoringConfig};
pub use diagnostic::Diagnostic;
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{EdgeId, NodeId};
pub use time::Deadline;
pub use units::{METRES_PER_MILE, Speed, miles_to_metres, round_half_away};
