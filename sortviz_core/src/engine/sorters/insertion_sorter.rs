use futures::{future::BoxFuture, FutureExt};

use crate::engine::{Cancelled, Sorter, StepKind, Stepper};

/// An implementation of [Insertion Sort](https://en.wikipedia.org/wiki/Insertion_sort)
///
/// # Explanation
///
/// Insertion sort is a simple sorting algorithm that builds the final sorted array (or list) one
/// item at a time
///
/// Insertion sort iterates, consuming one input element each repetition, and grows a sorted output
/// list. At each iteration, insertion sort removes one element from the input data, finds the
/// location it belongs within the sorted list, and inserts it there. It repeats until no input
/// elements remain.
///
/// Sorting is typically done in-place, by iterating up the array, growing the sorted list behind
/// it. At each array-position, it checks the value there against the largest value in the sorted
/// list (which happens to be next to it, in the previous array- position checked). If larger, it
/// leaves the element in place and moves to the next. If smaller, it finds the correct position
/// within the sorted list, shifts all the larger values up to make a space, and inserts into that
/// correct position.
///
/// # Steps
///
/// The key is walked to the front by swapping it with each larger neighbour, so every one-slot
/// shift of a larger bar to the right is a step that moves. Settling the key in its final slot is
/// one more step that moves nothing. An already sorted list therefore takes exactly `n - 1` steps.
///
/// Swapping instead of holding the key aside keeps every bar on screen at every step, so a run
/// cancelled halfway still shows each height exactly once.
pub struct InsertionSorter;

impl Sorter for InsertionSorter {
    fn sort<'a>(&'a self, stepper: &'a mut Stepper) -> BoxFuture<'a, Result<(), Cancelled>> {
        async move {
            let n = stepper.len();

            for unsorted in 1..n {
                let mut i = unsorted;
                while i > 0 && stepper.read(|model| model.get(i - 1) > model.get(i))? {
                    stepper
                        .step(|model| {
                            model.swap(i - 1, i);
                            model.set_evaluated(Some(i - 1));
                            StepKind::Move
                        })
                        .await?;
                    i -= 1;
                }

                stepper
                    .step(|model| {
                        model.set_evaluated(Some(i));
                        StepKind::Inspect
                    })
                    .await?;
            }
            Ok(())
        }
        .boxed()
    }
}
