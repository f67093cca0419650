//! Point-of-interest catalog and ranked retrieval.
//!
//! Startup: [`DatasetPayloads`] → [`normalize`] → [`Catalog`].
//! Per query: [`resolve_origin`] against a [`Gazetteer`] → [`retrieve`] over one
//! catalog [`Pool`](harbourguide_common::Pool).

pub mod catalog;
pub mod gazetteer;
pub mod nearby;
pub mod normalize;
pub mod payload;
pub mod planner;
pub mod ranker;

pub use catalog::Catalog;
pub use gazetteer::Gazetteer;
pub use nearby::{nearby, NearbyFilter};
pub use normalize::{normalize, RawRecord};
pub use payload::DatasetPayloads;
pub use planner::{resolve_origin, Origin, OriginKind};
pub use ranker::{retrieve, text_score, RetrieveParams, ScoredCandidate};
