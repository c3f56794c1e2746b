//! `sc-demand` — areal demand units and how they map onto the road graph.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`geometry`] | `Geometry` (polygon / multi-polygon), largest-polygon pick |
//! | [`unit`]     | `Population`, `DemandUnit`                                 |
//! | [`sample`]   | `DemandSample`, `ResolvedUnit`, `CandidateSamples`         |
//! | [`index`]    | `DemandIndex` (radius mode, polygon-sampling mode)         |
//! | [`source`]   | `DemandSource` trait, `InMemoryDemandSource`               |
//! | [`loader`]   | `load_population_csv`, `load_population_reader`, `PopulationTable` |
//! | [`error`]    | `DemandError`, `DemandResult<T>`                           |
//!
//! # Two selection modes
//!
//! ```text
//! radius mode   : unit boundary within radius (planar, equidistant projection)
//!                 → centroid snapped to nearest node
//!                 → flagged in-radius if centroid is within radius (geodesic)
//! sampling mode : unit boundary intersects the candidate's geodesic circle
//!                 (or contains the candidate)
//!                 → every node inside the unit's largest polygon is a sample
//!                   carrying the unit's population
//! ```

pub mod error;
pub mod geometry;
pub mod index;
pub mod loader;
pub mod sample;
pub mod source;
pub mod unit;


pub use error::{DemandError, DemandResult};
pub use geometry::Geometry;
pub use index::DemandIndex;
pub use loader::{PopulationTable, load_population_csv, load_population_reader};
pub use sample::{CandidateSamples, DemandSample, ResolvedUnit};
pub use source::{DemandSource, InMemoryDemandSource};
pub use unit::{DemandUnit, Population};
