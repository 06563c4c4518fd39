use crate::core::{mean_point, ObjectId, PointId, Quat, Vec3};

/// One receiver/target pairing found during a single attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchCandidate {
    pub receiver: PointId,
    pub target: PointId,
    /// Topmost ancestor of the target's owner: the object the movable welds to
    pub stationary: ObjectId,
    pub receiver_position: Vec3,
    pub target_position: Vec3,
    /// Receiver position in the movable object's frame
    pub receiver_local: Vec3,
    /// Target position in the stationary object's frame
    pub target_local: Vec3,
    /// World orientation of the stationary object
    pub stationary_rotation: Quat,
    pub distance: f32,
}

/// Every candidate within tolerance from one attempt, plus the closest one.
///
/// Never empty: `collect` returns `None` instead of building an empty set.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchSet {
    candidates: Vec<MatchCandidate>,
    best: usize,
    /// Mean movable-frame position of all the movable's receivers, matched or not
    receiver_layout_centre: Vec3,
}

impl MatchSet {
    /// Gather candidates in encounter order. On exactly equal distances the
    /// first one seen stays best.
    pub(crate) fn collect<I>(candidates: I) -> Option<Self>
    where
        I: IntoIterator<Item = MatchCandidate>,
    {
        let mut out: Vec<MatchCandidate> = Vec::new();
        let mut best = 0usize;
        for c in candidates {
            if !out.is_empty() && c.distance < out[best].distance {
                best = out.len();
            }
            out.push(c);
        }
        (!out.is_empty()).then_some(Self {
            candidates: out,
            best,
            receiver_layout_centre: Vec3::ZERO,
        })
    }

    pub(crate) fn with_receiver_layout_centre(mut self, centre: Vec3) -> Self {
        self.receiver_layout_centre = centre;
        self
    }

    pub fn best(&self) -> &MatchCandidate {
        &self.candidates[self.best]
    }

    pub fn best_index(&self) -> usize {
        self.best
    }

    pub fn candidates(&self) -> &[MatchCandidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Object the movable attaches to.
    pub fn stationary(&self) -> ObjectId {
        self.best().stationary
    }

    /// Distinct receivers, first-seen order.
    pub fn receivers(&self) -> Vec<PointId> {
        distinct(self.candidates.iter().map(|c| c.receiver))
    }

    /// Distinct targets, first-seen order.
    pub fn targets(&self) -> Vec<PointId> {
        distinct(self.candidates.iter().map(|c| c.target))
    }

    /// Mean world position of the distinct matched targets.
    pub fn anchor(&self) -> Vec3 {
        self.mean_over_targets(|c| c.target_position)
    }

    /// Mean stationary-frame position of the distinct matched targets.
    pub fn mean_target_local(&self) -> Vec3 {
        self.mean_over_targets(|c| c.target_local)
    }

    /// Mean movable-frame position of the distinct matched receivers.
    pub fn mean_receiver_local(&self) -> Vec3 {
        let mut seen = Vec::new();
        mean_point(self.candidates.iter().filter_map(|c| {
            (!seen.contains(&c.receiver)).then(|| {
                seen.push(c.receiver);
                c.receiver_local
            })
        }))
        .unwrap_or(Vec3::ZERO)
    }

    /// Mean movable-frame position of every receiver the movable declares.
    /// Zero unless the matcher filled it in.
    pub fn receiver_layout_centre(&self) -> Vec3 {
        self.receiver_layout_centre
    }

    fn mean_over_targets(&self, pick: impl Fn(&MatchCandidate) -> Vec3) -> Vec3 {
        let mut seen = Vec::new();
        mean_point(self.candidates.iter().filter_map(|c| {
            (!seen.contains(&c.target)).then(|| {
                seen.push(c.target);
                pick(c)
            })
        }))
        .unwrap_or(Vec3::ZERO)
    }
}

fn distinct(ids: impl Iterator<Item = PointId>) -> Vec<PointId> {
    let mut out: Vec<PointId> = Vec::new();
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

/// Where the movable object goes and how its visual model is corrected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlignmentTransform {
    /// Mean of the matched target positions, before any lift or offset
    pub anchor: Vec3,
    /// World position for the movable object's origin
    pub target_position: Vec3,
    pub target_rotation: Quat,
    /// Added to the visual model's local position; `None` leaves it as is
    pub model_correction: Option<Vec3>,
}


#[cfg(test)]
mod tests {
    use super::fixtures::candidate;
    use super::*;

    #[test]
    fn empty_input_gives_no_set() {
        assert!(MatchSet::collect(Vec::new()).is_none());
    }

    #[test]
    fn best_is_the_minimum_distance() {
        let set = MatchSet::collect(vec![
            candidate(1, 10, Vec3::X, 0.04),
            candidate(1, 11, Vec3::Y, 0.02),
            candidate(2, 12, Vec3::Z, 0.03),
        ])
        .unwrap();
        assert_eq!(set.best().target, PointId(11));
        assert!(set.candidates().iter().all(|c| set.best().distance <= c.distance));
    }

    // Exactly equal distances: first encountered wins. Accepted behaviour,
    // not a tie-break rule callers should rely on beyond determinism.
    #[test]
    fn exact_tie_keeps_first_encountered() {
        let set = MatchSet::collect(vec![
            candidate(1, 10, Vec3::X, 0.02),
            candidate(2, 11, Vec3::Y, 0.02),
        ])
        .unwrap();
        assert_eq!(set.best_index(), 0);
    }

    #[test]
    fn single_candidate_is_best() {
        let set = MatchSet::collect(std::iter::once(candidate(1, 10, Vec3::X, 0.01))).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.best_index(), 0);
        assert_eq!(set.receiver_layout_centre(), Vec3::ZERO);
    }

    #[test]
    fn shared_target_counts_once_in_anchor() {
        let set = MatchSet::collect(vec![
            candidate(1, 10, Vec3::new(1.0, 0.0, 0.0), 0.01),
            candidate(2, 10, Vec3::new(1.0, 0.0, 0.0), 0.02),
            candidate(3, 11, Vec3::new(3.0, 0.0, 0.0), 0.03),
        ])
        .unwrap();
        assert_eq!(set.anchor(), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(set.targets(), vec![PointId(10), PointId(11)]);
        assert_eq!(set.receivers(), vec![PointId(1), PointId(2), PointId(3)]);
    }
}
