//! `sc-spatial` — road network, nearest-node indexing, and shortest paths.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                   |
//! |-------------------|------------------------------------------------------------|
//! | [`network`]       | `RoadNetwork` (CSR out/in + R-tree), `RoadNetworkBuilder`  |
//! | [`handle`]        | `RoadNetworkHandle`, `NetworkSource`                       |
//! | [`shortest_path`] | `ShortestPathEngine`, `ShortestPathTree`, `PathDistance`   |
//! | [`route`]         | `Route`, `RouteCollector`                                  |
//! | [`error`]         | `SpatialError`, `SpatialResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `serde`   | Derives `Serialize`/`Deserialize` on public value types.   |
//! | `fx-hash` | FxHash instead of SipHash for the external-id index.       |

pub mod error;
pub mod handle;
pub mod network;
pub mod route;
pub mod shortest_path;


pub use error::{SpatialError, SpatialResult};
pub use handle::{NetworkSource, RoadNetworkHandle};
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use route::{Route, RouteCollector};
pub use shortest_path::{PathDistance, SearchDirection, ShortestPathEngine, ShortestPathTree};
