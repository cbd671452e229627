//! Human-readable justification tags for a scored candidate.
//!
//! Tags are advisory output only.  Nothing in the scoring path reads them.

use em_traffic::{IncidentKind, TrafficSnapshot};

/// Score above which a candidate is tagged [`Reason::OptimalTraffic`].
pub const OPTIMAL_ABOVE: f64 = 8.0;

/// Score above which a candidate is tagged [`Reason::GoodSpacing`].
pub const GOOD_SPACING_ABOVE: f64 = 7.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Reason {
    OptimalTraffic,
    GoodSpacing,
    LowCongestion,
    /// Emitted only when no other tag applies.
    GenerallyFavorable,
}

impl Reason {
    pub fn label(self) -> &'static str {
        match self {
            Reason::OptimalTraffic     => "Optimal traffic conditions",
            Reason::GoodSpacing        => "Good spacing from existing points",
            Reason::LowCongestion      => "Low congestion area",
            Reason::GenerallyFavorable => "Generally favorable conditions",
        }
    }
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

/// Tags for a final `score` under `snapshot`, in fixed order.
///
/// The congestion check looks at every incident in the snapshot, not just
/// those near the candidate.
pub fn recommendation_reasons(score: f64, snapshot: &TrafficSnapshot) -> Vec<Reason> {
    let mut reasons = Vec::with_capacity(3);
    if score > OPTIMAL_ABOVE {
        reasons.push(Reason::OptimalTraffic);
    }
    if score > GOOD_SPACING_ABOVE {
        reasons.push(Reason::GoodSpacing);
    }
    if !snapshot.has_incident_kind(IncidentKind::Congestion) {
        reasons.push(Reason::LowCongestion);
    }
    if reasons.is_empty() {
        reasons.push(Reason::GenerallyFavorable);
    }
    reasons
}
