use std::fmt;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{SeedableRng, rng};

/// Produces an ordering of `0..len` for a `Shuffler::Custom`.
pub type PermutationFn = Arc<dyn Fn(usize) -> Vec<usize> + Send + Sync>;

/// Injectable shuffle step used when preparing questions and options.
///
/// Games never call into `rand` directly; they ask the shuffler for a
/// permutation, so tests can pin the order with `Identity`, `Reversed`,
/// `Seeded` or a hand-written `Custom` permutation.
#[derive(Clone, Default)]
pub enum Shuffler {
    #[default]
    Random,
    Seeded(StdRng),
    Identity,
    Reversed,
    Custom(PermutationFn),
}

impl Shuffler {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::Seeded(StdRng::seed_from_u64(seed))
    }

    /// Wraps a permutation function.
    ///
    /// The function receives the slice length and must return each index of
    /// `0..len` exactly once. Anything else leaves the order unchanged.
    #[must_use]
    pub fn custom(f: impl Fn(usize) -> Vec<usize> + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    /// Returns the order in which `len` items should be presented.
    ///
    /// Position `k` of the result holds the source index shown at slot `k`.
    pub fn permutation(&mut self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        match self {
            Shuffler::Random => order.shuffle(&mut rng()),
            Shuffler::Seeded(seeded) => order.shuffle(seeded),
            Shuffler::Identity => {}
            Shuffler::Reversed => order.reverse(),
            Shuffler::Custom(f) => {
                let candidate = f(len);
                if is_permutation(&candidate, len) {
                    order = candidate;
                } else {
                    tracing::warn!(
                        len,
                        got = ?candidate,
                        "custom shuffle is not a permutation, keeping bank order"
                    );
                }
            }
        }
        order
    }

    /// Reorders `items` in place according to [`Shuffler::permutation`].
    pub fn shuffle<T>(&mut self, items: &mut Vec<T>) {
        let order = self.permutation(items.len());
        let mut slots: Vec<Option<T>> = items.drain(..).map(Some).collect();
        items.extend(order.into_iter().filter_map(|idx| slots[idx].take()));
    }
}

fn is_permutation(candidate: &[usize], len: usize) -> bool {
    if candidate.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &idx in candidate {
        match seen.get_mut(idx) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

impl fmt::Debug for Shuffler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shuffler::Random => "Random",
            Shuffler::Seeded(_) => "Seeded",
            Shuffler::Identity => "Identity",
            Shuffler::Reversed => "Reversed",
            Shuffler::Custom(_) => "Custom",
        };
        f.debug_tuple("Shuffler").field(&name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_and_reversed_are_deterministic() {
        let mut items = vec!['a', 'b', 'c'];
        Shuffler::Identity.shuffle(&mut items);
        assert_eq!(items, vec!['a', 'b', 'c']);

        Shuffler::Reversed.shuffle(&mut items);
        assert_eq!(items, vec!['c', 'b', 'a']);
    }

    #[test]
    fn custom_permutation_is_applied() {
        let mut shuffler = Shuffler::custom(|len| (0..len).map(|i| (i + 1) % len).collect());
        let mut items = vec![10, 20, 30, 40];
        shuffler.shuffle(&mut items);
        assert_eq!(items, vec![20, 30, 40, 10]);
    }

    #[test]
    fn invalid_custom_permutation_keeps_order() {
        let mut shuffler = Shuffler::custom(|len| vec![0; len]);
        let mut items = vec![1, 2, 3];
        shuffler.shuffle(&mut items);
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn seeded_shuffles_repeat_for_same_seed() {
        let mut a = Shuffler::seeded(42);
        let mut b = Shuffler::seeded(42);
        assert_eq!(a.permutation(16), b.permutation(16));
    }

    #[test]
    fn random_permutation_keeps_every_index() {
        let mut order = Shuffler::Random.permutation(20);
        order.sort_unstable();
        assert_eq!(order, (0..20).collect::<Vec<_>>());
    }
}
