use colswap_core::Value;
use colswap_plan::PermutationPolicy;
use rand::Rng;

/// Assignment of group slots to the slots they take their value from.
///
/// `sources()[i] == j` means the column in slot `i` receives the value held
/// by the column in slot `j` of the same row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    sources: Vec<usize>,
}

impl Permutation {
    pub fn identity(len: usize) -> Self {
        Self {
            sources: (0..len).collect(),
        }
    }

    /// Build from an explicit slot assignment; `None` unless it is a bijection.
    pub fn from_sources(sources: Vec<usize>) -> Option<Self> {
        let mut seen = vec![false; sources.len()];
        for &source in &sources {
            if source >= sources.len() || seen[source] {
                return None;
            }
            seen[source] = true;
        }
        Some(Self { sources })
    }

    pub fn sources(&self) -> &[usize] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.sources
            .iter()
            .enumerate()
            .all(|(slot, &source)| slot == source)
    }

    pub fn has_fixed_point(&self) -> bool {
        self.sources
            .iter()
            .enumerate()
            .any(|(slot, &source)| slot == source)
    }

    pub fn satisfies(&self, policy: PermutationPolicy) -> bool {
        match policy {
            PermutationPolicy::Any => true,
            PermutationPolicy::NonIdentity => !self.is_identity(),
            PermutationPolicy::Derangement => !self.has_fixed_point(),
        }
    }

    /// Write `source[columns[sources[i]]]` into `target[columns[i]]`.
    ///
    /// `source` and `target` are full rows; `columns` maps group slots to row
    /// positions and must have the permutation's length.
    pub fn apply(&self, columns: &[usize], source: &[Value], target: &mut [Value]) {
        for (slot, &column) in columns.iter().enumerate() {
            target[column] = source[columns[self.sources[slot]]].clone();
        }
    }
}

/// Draw a permutation of `len` slots that satisfies `policy`.
///
/// Fisher-Yates from the last slot down: slot `i` swaps with a slot drawn
/// uniformly from `0..=i`, sampled as `u32` so the stream does not depend on
/// pointer width. Restricted policies redraw until satisfied. Groups with
/// fewer than two slots cannot be permuted and yield the identity without
/// consuming randomness.
pub fn draw_permutation<R: Rng + ?Sized>(
    len: usize,
    policy: PermutationPolicy,
    rng: &mut R,
) -> Permutation {
    if len < 2 {
        return Permutation::identity(len);
    }

    loop {
        let mut sources: Vec<usize> = (0..len).collect();
        for i in (1..len).rev() {
            let j = rng.random_range(0..=i as u32) as usize;
            sources.swap(i, j);
        }
        let candidate = Permutation { sources };
        if candidate.satisfies(policy) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn from_sources_rejects_non_bijections() {
        assert!(Permutation::from_sources(vec![1, 0, 2]).is_some());
        assert!(Permutation::from_sources(vec![1, 1]).is_none());
        assert!(Permutation::from_sources(vec![0, 2]).is_none());
    }

    #[test]
    fn every_ordering_of_three_is_reachable() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..600 {
            seen.insert(draw_permutation(3, PermutationPolicy::Any, &mut rng).sources);
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn single_slot_returns_identity() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let permutation = draw_permutation(1, PermutationPolicy::Derangement, &mut rng);
        assert!(permutation.is_identity());
    }
}
