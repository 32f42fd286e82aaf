use rand::Rng;

/// Shuffles `slice` in place with the [Fisher-Yates](https://en.wikipedia.org/wiki/Fisher%E2%80%93Yates_shuffle)
/// algorithm.
///
/// Walks from the back of the slice and swaps each position with a uniformly chosen position at
/// or before it, so every permutation is equally likely. The elements themselves are untouched;
/// only their order changes.
///
/// # Usage
///```
/// use rand::{rngs::StdRng, SeedableRng};
/// use sortviz_core::model::fisher_yates;
///
/// let mut slice = [1, 2, 3, 4, 5];
/// fisher_yates(&mut slice, &mut StdRng::seed_from_u64(42));
///
/// let mut check = slice;
/// check.sort();
/// assert_eq!(check, [1, 2, 3, 4, 5]);
///```
pub fn fisher_yates<T, R>(slice: &mut [T], rng: &mut R)
where
    R: Rng + ?Sized,
{
    let mut unshuffled = slice.len();
    while unshuffled > 1 {
        unshuffled -= 1;
        let pick = rng.gen_range(0..=unshuffled);
        slice.swap(pick, unshuffled);
    }
}
