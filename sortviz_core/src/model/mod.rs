//! The array of bar heights that every sorter works on.
//!
//! An [`ArrayModel`] owns `N` heights and the "evaluated" cursor used to highlight the bar a
//! sorter is currently looking at. The heights are generated deterministically by
//! [`ArrayModel::new`] as an evenly increasing staircase and then scrambled with
//! [`ArrayModel::shuffle`]; after that the sort engine only rearranges them with swaps and
//! relocations, so the array stays a permutation of the same heights during a run.
//!
//! # Example
//!
//! ```
//! use sortviz_core::model::ArrayModel;
//!
//! let mut model = ArrayModel::new(5, 100.0);
//! assert_eq!(model.values(), &[20.0, 40.0, 60.0, 80.0, 100.0]);
//!
//! model.shuffle();
//! assert_eq!(model.len(), 5);
//! ```

mod shuffle;

pub use shuffle::fisher_yates;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::Rng;

use crate::engine::{Frame, StepKind};

/// The heights being sorted plus the index currently under evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayModel {
    values: Vec<f32>,
    evaluated: Option<usize>,
    max_height: f32,
}

impl ArrayModel {
    /// Builds a model of `size` evenly increasing heights topping out at `max_height`.
    ///
    /// A `size` of zero is bumped to one; the array is never empty.
    pub fn new(size: usize, max_height: f32) -> Self {
        let mut model = Self {
            values: Vec::new(),
            evaluated: None,
            max_height,
        };
        model.initialize(size);
        model
    }

    /// Wraps existing heights. Used to replay a particular arrangement.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn from_values(values: Vec<f32>) -> Self {
        assert!(!values.is_empty(), "an array model needs at least one bar");

        let max_height = values.iter().copied().fold(f32::MIN, f32::max);
        Self {
            values,
            evaluated: None,
            max_height,
        }
    }

    /// Rebuilds the heights for `size` bars and clears the evaluated cursor.
    ///
    /// Bar `i` gets `max_height / size * (i + 1)`, so the same `size` always produces the same
    /// multiset of heights. Call [`shuffle`](Self::shuffle) afterwards.
    pub fn initialize(&mut self, size: usize) {
        let size = if size == 0 {
            log::warn!("array size 0 requested, using a single bar instead");
            1
        } else {
            size
        };

        let increment = self.max_height / size as f32;
        self.values = (0..size).map(|i| increment * (i + 1) as f32).collect();
        self.evaluated = None;
    }

    /// Reorders the current heights into a uniformly random permutation.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    /// Same as [`shuffle`](Self::shuffle) but draws from the given generator.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        fisher_yates(&mut self.values, rng);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; the model holds at least one bar. Present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn evaluated(&self) -> Option<usize> {
        self.evaluated
    }

    /// Returns `true` if the heights are in non-decreasing order.
    pub fn is_sorted(&self) -> bool {
        self.values.windows(2).all(|w| w[0] <= w[1])
    }

    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn get(&self, index: usize) -> f32 {
        self.check_bounds(index);
        self.values[index]
    }

    /// Overwrites the height at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set(&mut self, index: usize, value: f32) {
        self.check_bounds(index);
        self.values[index] = value;
    }

    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.check_bounds(a);
        self.check_bounds(b);
        self.values.swap(a, b);
    }

    /// Takes the bar at `from` out and reinserts it at `to`, sliding the bars in `to..from` one
    /// slot to the right. A no-op when `from == to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range or `to > from`.
    pub fn relocate(&mut self, from: usize, to: usize) {
        self.check_bounds(from);
        assert!(to <= from, "can only relocate a bar towards the front ({from} -> {to})");
        self.values[to..=from].rotate_right(1);
    }

    /// Moves the highlight cursor, or removes it with `None`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is `Some` and out of range.
    pub fn set_evaluated(&mut self, index: Option<usize>) {
        if let Some(index) = index {
            self.check_bounds(index);
        }
        self.evaluated = index;
    }

    /// Takes an owned snapshot for the renderer.
    pub fn frame(&self, step: Option<StepKind>) -> Frame {
        Frame {
            values: self.values.clone(),
            evaluated: self.evaluated,
            step,
        }
    }

    /// Moves the model behind a lock so it can be shared with a sorting task.
    pub fn into_shared(self) -> SharedModel {
        SharedModel(Arc::new(Mutex::new(self)))
    }

    // Indices always come from the engine, so a bad one is a bug there and not bad input.
    fn check_bounds(&self, index: usize) {
        assert!(
            index < self.values.len(),
            "index {index} out of range for an array of {} bars",
            self.values.len()
        );
    }
}

/// An [`ArrayModel`] shared between the controller and the sorting task.
///
/// The lock is only held while a single step mutates the array, never across a pacing delay.
#[derive(Debug, Clone)]
pub struct SharedModel(Arc<Mutex<ArrayModel>>);

impl SharedModel {
    /// Locks the model. A poisoned lock is recovered: a panicking sorter can only have left the
    /// array mid-swap, which is still a valid arrangement of bars.
    pub fn lock(&self) -> MutexGuard<'_, ArrayModel> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> Frame {
        self.lock().frame(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn sorted(values: &[f32]) -> Vec<f32> {
        let mut values = values.to_vec();
        values.sort_by(f32::total_cmp);
        values
    }

    #[test]
    fn initialize_is_an_even_staircase() {
        let model = ArrayModel::new(4, 100.0);
        assert_eq!(model.values(), &[25.0, 50.0, 75.0, 100.0]);
        assert_eq!(model.evaluated(), None);
        assert!(model.is_sorted());
    }

    #[test]
    fn initialize_is_deterministic() {
        assert_eq!(ArrayModel::new(37, 480.0), ArrayModel::new(37, 480.0));
    }

    #[test]
    fn initialize_clears_the_cursor() {
        let mut model = ArrayModel::new(8, 100.0);
        model.set_evaluated(Some(3));
        model.initialize(12);
        assert_eq!(model.len(), 12);
        assert_eq!(model.evaluated(), None);
    }

    #[test]
    fn zero_size_becomes_one_bar() {
        let model = ArrayModel::new(0, 100.0);
        assert_eq!(model.values(), &[100.0]);
    }

    #[test]
    fn shuffle_keeps_the_same_heights() {
        for size in [1, 2, 3, 10, 257] {
            let fresh = ArrayModel::new(size, 300.0);
            let mut shuffled = fresh.clone();
            shuffled.shuffle();
            assert_eq!(sorted(shuffled.values()), fresh.values());
        }
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut a = ArrayModel::new(50, 100.0);
        let mut b = ArrayModel::new(50, 100.0);
        a.shuffle_with(&mut StdRng::seed_from_u64(7));
        b.shuffle_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert!(!a.is_sorted());
    }

    #[test]
    fn swap_and_set() {
        let mut model = ArrayModel::from_values(vec![1.0, 2.0, 3.0]);
        model.swap(0, 2);
        assert_eq!(model.values(), &[3.0, 2.0, 1.0]);
        model.set(1, 9.0);
        assert_eq!(model.get(1), 9.0);
    }

    #[test]
    fn relocate_slides_the_rest_right() {
        let mut model = ArrayModel::from_values(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        model.relocate(3, 1);
        assert_eq!(model.values(), &[1.0, 4.0, 2.0, 3.0, 5.0]);

        model.relocate(2, 2);
        assert_eq!(model.values(), &[1.0, 4.0, 2.0, 3.0, 5.0]);
    }

    #[test]
    #[should_panic(expected = "towards the front")]
    fn relocate_backwards() {
        let mut model = ArrayModel::new(5, 100.0);
        model.relocate(1, 3);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn swap_out_of_range() {
        let mut model = ArrayModel::new(3, 100.0);
        model.swap(0, 3);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn set_out_of_range() {
        let mut model = ArrayModel::new(3, 100.0);
        model.set(5, 1.0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn evaluated_out_of_range() {
        let mut model = ArrayModel::new(3, 100.0);
        model.set_evaluated(Some(3));
    }

    #[test]
    fn frame_copies_the_state() {
        let mut model = ArrayModel::from_values(vec![2.0, 1.0]);
        model.set_evaluated(Some(1));
        let frame = model.frame(Some(StepKind::Inspect));
        assert_eq!(frame.values, vec![2.0, 1.0]);
        assert_eq!(frame.evaluated, Some(1));
        assert_eq!(frame.step, Some(StepKind::Inspect));
    }
}
