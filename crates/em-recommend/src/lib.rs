//! `em-recommend` — turns a traffic snapshot and the existing sites into a
//! short, justified list of new pickup/drop-off locations.
//!
//! # Pipeline
//!
//! ```text
//! CandidateGrid(center, radius, h)      (2h+1)² points, row-major
//!   ① clearance  : drop points closer than min_clearance_m to any site
//!   ② score      : PointScorer: base 7 + flow term − incident penalty
//!                  + spacing bonus, clamped to [0, 10]
//!                  (parallel with the `parallel` feature)
//!   ③ threshold  : keep score > score_threshold
//!   ④ rank       : stable sort by descending score, take top_k
//! ```
//!
//! # Crate layout
//!
//! | Module     | Contents                                                 |
//! |------------|----------------------------------------------------------|
//! | [`grid`]   | `CandidateGrid`, `GridIter`                              |
//! | [`scorer`] | `PointScorer`, `PointScore`, `score_point`               |
//! | [`reason`] | `Reason`, `recommendation_reasons`                       |
//! | [`ranker`] | `Recommender`, `CandidateSite`, `recommend`              |
//! | [`config`] | `RecommendConfig`, `ScoringWeights`                      |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Scores candidates on Rayon's thread pool.              |
//! | `serde`    | Derives `Serialize`/`Deserialize` on config and output. |

pub mod config;
pub mod grid;
pub mod ranker;
pub mod reason;
pub mod scorer;


pub use config::{RecommendConfig, ScoringWeights};
pub use grid::{CandidateGrid, DEFAULT_GRID_HALF_SIZE, GridIter};
pub use ranker::{CandidateSite, Recommender, recommend};
pub use reason::{Reason, recommendation_reasons};
pub use scorer::{PointScore, PointScorer, ScoreBreakdown, score_point};
