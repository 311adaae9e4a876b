//! Precision from true/false positive pair counts.

/// True- and false-positive ingroup pair counts for one tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairCounts {
    pub true_positives: usize,
    pub false_positives: usize,
}

impl PairCounts {
    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives
    }

    /// See [`precision`].
    pub fn precision(&self) -> Option<f64> {
        precision(self.true_positives, self.false_positives)
    }
}

/// `tp / (tp + fp)`, or `None` when there is nothing to divide.
///
/// ```
/// # use family_precision::precision::precision;
/// assert_eq!(precision(3, 1), Some(0.75));
/// assert_eq!(precision(0, 0), None);
/// ```
pub fn precision(true_positives: usize, false_positives: usize) -> Option<f64> {
    let total = true_positives + false_positives;
    if total == 0 {
        return None;
    }
    Some(true_positives as f64 / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precision_is_a_fraction() {
        assert_eq!(precision(3, 1), Some(0.75));
        assert_eq!(precision(0, 4), Some(0.0));
        assert_eq!(precision(5, 0), Some(1.0));
    }

    #[test]
    fn precision_stays_in_unit_interval() {
        for tp in 0..20 {
            for fp in 0..20 {
                if let Some(p) = precision(tp, fp) {
                    assert!((0.0..=1.0).contains(&p), "tp={tp} fp={fp} gave {p}");
                }
            }
        }
    }

    #[test]
    fn no_pairs_has_no_precision() {
        let counts = PairCounts::default();
        assert_eq!(counts.total(), 0);
        assert_eq!(counts.precision(), None);
    }
}
