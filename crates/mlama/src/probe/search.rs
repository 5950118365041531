//! Choosing how many mask tokens an object needs.

/// The model's best token at one masked position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionPrediction {
    pub token: u32,
    pub log_prob: f32,
}

/// Token ids the model may never predict, indexed by id.
///
/// ```
/// use mlama::probe::VocabMask;
///
/// let mask = VocabMask::new(&[2, 5]);
/// assert!(mask.contains(5));
/// assert!(!mask.contains(3));
/// assert!(!mask.contains(1_000));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabMask {
    banned: Vec<bool>,
}

impl VocabMask {
    pub fn new(restricted: &[u32]) -> Self {
        let Some(len) = restricted.iter().max().and_then(|&max| usize::try_from(max).ok()) else {
            return Self::default();
        };
        let mut banned = vec![false; len + 1];
        for &id in restricted {
            if let Some(slot) = usize::try_from(id).ok().and_then(|id| banned.get_mut(id)) {
                *slot = true;
            }
        }
        Self { banned }
    }

    pub fn contains(&self, id: usize) -> bool {
        self.banned.get(id).copied().unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        !self.banned.contains(&true)
    }
}

/// Removes `restricted` tokens, renormalizes with a log-softmax and returns
/// the best remaining token.
///
/// Ties go to the lowest token id. Returns `None` when no token is left.
pub fn restrict_and_argmax(scores: &[f32], restricted: &VocabMask) -> Option<PositionPrediction> {
    let allowed = || {
        scores
            .iter()
            .copied()
            .enumerate()
            .filter(|(id, score)| score.is_finite() && !restricted.contains(*id))
    };

    let (best, max) = allowed().fold(None, |best: Option<(usize, f32)>, (id, score)| match best {
        Some((_, top)) if top >= score => best,
        _ => Some((id, score)),
    })?;

    let sum: f32 = allowed().map(|(_, score)| (score - max).exp()).sum();
    let log_sum_exp = max + sum.ln();

    Some(PositionPrediction {
        token: u32::try_from(best).ok()?,
        log_prob: max - log_sum_exp,
    })
}

/// Mean log-probability over the masked positions, or `None` if there are
/// none.
pub fn mean_log_prob(predictions: &[PositionPrediction]) -> Option<f64> {
    if predictions.is_empty() {
        return None;
    }
    let total: f64 = predictions.iter().map(|p| f64::from(p.log_prob)).sum();
    Some(total / predictions.len() as f64)
}

/// Index of the largest score, keeping the first on ties. Missing and NaN
/// scores never win.
fn stable_argmax(scores: impl IntoIterator<Item = Option<f64>>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, score) in scores.into_iter().enumerate() {
        let Some(score) = score.filter(|s| !s.is_nan()) else {
            continue;
        };
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((index, score));
        }
    }
    best.map(|(index, _)| index)
}

/// Picks the mask count with the highest mean log-probability.
///
/// `means[i]` is the score of the rendering with `i + 1` masks; the returned
/// value is that mask count. Ties resolve to the smaller count.
///
/// ```
/// use mlama::probe::select_mask_count;
///
/// assert_eq!(select_mask_count(&[Some(-3.0), Some(-2.5), Some(-0.4), Some(-0.4)]), Some(3));
/// assert_eq!(select_mask_count(&[None, None]), None);
/// ```
pub fn select_mask_count(means: &[Option<f64>]) -> Option<usize> {
    stable_argmax(means.iter().copied()).map(|index| index + 1)
}

/// One rendering of a fact with a given number of masks, with the model's
/// predictions at the masked positions.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskCandidate {
    pub num_mask: usize,
    /// Model input ids, unpadded.
    pub input_ids: Vec<u32>,
    pub predictions: Vec<PositionPrediction>,
}

impl MaskCandidate {
    pub fn mean_log_prob(&self) -> Option<f64> {
        mean_log_prob(&self.predictions)
    }

    pub fn predicted_ids(&self) -> Vec<u32> {
        self.predictions.iter().map(|p| p.token).collect()
    }
}

/// The candidate with the highest mean log-probability.
///
/// Ties go to the smaller mask count, whatever order the candidates come in.
pub fn choose_best(candidates: &[MaskCandidate]) -> Option<&MaskCandidate> {
    let mut best: Option<(&MaskCandidate, f64)> = None;
    for candidate in candidates {
        let Some(score) = candidate.mean_log_prob().filter(|s| !s.is_nan()) else {
            continue;
        };
        let better = best.is_none_or(|(top, top_score)| {
            score > top_score || (score == top_score && candidate.num_mask < top.num_mask)
        });
        if better {
            best = Some((candidate, score));
        }
    }
    best.map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    #[test]
    fn restricted_tokens_are_never_predicted() {
        let prediction = restrict_and_argmax(&[0.0, 5.0, 1.0], &VocabMask::new(&[1])).unwrap();
        assert_eq!(prediction.token, 2);
        assert!(prediction.log_prob < 0.0);
    }

    #[test]
    fn fully_restricted_distribution_has_no_prediction() {
        assert_eq!(restrict_and_argmax(&[1.0, 2.0], &VocabMask::new(&[0, 1])), None);
    }

    #[test]
    fn log_prob_is_normalized() {
        let prediction = restrict_and_argmax(&[0.0, 0.0], &VocabMask::default()).unwrap();
        assert_eq!(prediction.token, 0);
        assert!((prediction.log_prob - 0.5_f32.ln()).abs() < 1e-6);
    }

    #[test]
    fn large_restricted_list_over_full_vocabulary() {
        let restricted: Vec<u32> = (20_000..119_547).collect();
        let mask = VocabMask::new(&restricted);

        let mut scores = vec![0.0_f32; 119_547];
        scores[119_000] = 50.0;
        scores[7] = 3.0;

        let started = Instant::now();
        for _ in 0..20 {
            let prediction = restrict_and_argmax(&scores, &mask).unwrap();
            assert_eq!(prediction.token, 7);
        }
        assert!(started.elapsed() < Duration::from_secs(2));

        let prediction = restrict_and_argmax(&scores, &mask).unwrap();
        let expected = 3.0 - (3.0_f32.exp() + 19_999.0).ln();
        assert!((prediction.log_prob - expected).abs() < 1e-4);
    }

    #[test]
    fn restricted_ids_beyond_the_vocabulary_are_ignored() {
        let mask = VocabMask::new(&[500, 0]);
        let prediction = restrict_and_argmax(&[9.0, 1.0, 2.0], &mask).unwrap();
        assert_eq!(prediction.token, 2);
        assert!(!mask.is_empty());
        assert!(VocabMask::new(&[]).is_empty());
    }

    #[test]
    fn nan_scores_never_win() {
        assert_eq!(select_mask_count(&[Some(f64::NAN), Some(-1.0)]), Some(2));
    }
}
