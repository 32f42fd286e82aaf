use futures::{future::BoxFuture, FutureExt};

use crate::engine::{Cancelled, Sorter, StepKind, Stepper};

/// An implementation of [Selection Sort](https://en.wikipedia.org/wiki/Selection_sort)
///
/// # Explanation
///
/// Selection sort is an in-place comparison sorting
/// algorithm. It has an O(n2) time complexity, which
/// makes it inefficient on large  lists, and generally
/// performs worse than the similar insertion sort. Selection sort is noted for its
/// simplicity and has performance advantages over more complicated algorithms
/// in certain situations, particularly where auxiliary memory is
/// limited.
///
/// # Algorithm
///
/// The algorithm divides the input list into two parts:
/// a sorted sublist of items which is built
/// up from left to right at the front (
/// left) of the list and a sublist of
/// the remaining unsorted items that occupy the rest of
/// the list. Initially, the sorted sublist is
/// empty and the unsorted sublist is the entire input
/// list. The algorithm proceeds by finding the smallest
/// (or largest, depending on sorting order)
/// element in the unsorted sublist, exchanging (swapping
/// ) it with the leftmost unsorted element (putting
/// it in sorted order), and moving the sublist
/// boundaries one element to the right.
///
/// # Steps
///
/// Every comparison made while scanning for the smallest bar is a step, with the scanned bar
/// highlighted. The exchange at the end of each scan is one more step, which only moves when the
/// smallest bar is not already in place. The step count depends on `n` alone:
/// `n * (n - 1) / 2 + (n - 1)`.
pub struct SelectionSorter;

impl Sorter for SelectionSorter {
    fn sort<'a>(&'a self, stepper: &'a mut Stepper) -> BoxFuture<'a, Result<(), Cancelled>> {
        async move {
            let n = stepper.len();

            for unsorted in 0..n.saturating_sub(1) {
                let mut smallest_in_rest = unsorted;

                for i in (unsorted + 1)..n {
                    stepper
                        .step(|model| {
                            model.set_evaluated(Some(i));
                            if model.get(i) < model.get(smallest_in_rest) {
                                smallest_in_rest = i;
                            }
                            StepKind::Inspect
                        })
                        .await?;
                }

                stepper
                    .step(|model| {
                        if unsorted == smallest_in_rest {
                            StepKind::Inspect
                        } else {
                            model.swap(unsorted, smallest_in_rest);
                            StepKind::Move
                        }
                    })
                    .await?;
            }
            Ok(())
        }
        .boxed()
    }
}
