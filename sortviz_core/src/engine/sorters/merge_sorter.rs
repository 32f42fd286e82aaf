use futures::{future::BoxFuture, FutureExt};

use crate::engine::{Cancelled, Sorter, StepKind, Stepper};

/// An implementation of [Merge Sort](https://en.wikipedia.org/wiki/Merge_sort)
///
/// # Explanation
///
/// Merge sort is an efficient, general-purpose, comparison-based sorting algorithm. It is a
/// divide-and-conquer algorithm that was invented by John von Neumann in 1945. Conceptually it
/// works as follows:
///
/// 1. Divide the unsorted list into halves until every sublist holds a single element, which is
///    trivially sorted.
/// 2. Repeatedly merge sorted sublists to produce new sorted sublists until only one remains.
///
/// The merge keeps taking the smaller head of the two halves, preferring the left half on ties,
/// which makes the sort stable.
///
/// # Steps
///
/// Every slot filled while merging `[left, right]` is one step with that slot highlighted,
/// including the tail left over once one half runs out. The merge is done in place: when the
/// upper half has the smaller head, that bar is lifted out and dropped into the slot while the
/// rest of the lower half slides one place right. Only those slides count as moves; a slot that
/// already holds the right bar is just inspected, so merging already ordered halves is silent.
/// A buffered merge would tick on every write; this one ticks once per bar taken from the upper
/// half.
///
/// Working in place means every bar is on screen exactly once at every step, and a cancelled run
/// leaves a shuffled but complete set of heights.
///
/// Cancellation is checked at the start of every recursive call as well as on every step, so a
/// cancelled run unwinds the whole recursion instead of finishing the pending merges.
pub struct MergeSorter;

impl Sorter for MergeSorter {
    fn sort<'a>(&'a self, stepper: &'a mut Stepper) -> BoxFuture<'a, Result<(), Cancelled>> {
        async move {
            let n = stepper.len();
            merge_sort(stepper, 0, n.saturating_sub(1)).await
        }
        .boxed()
    }
}

// Sorts the inclusive range `[left, right]`.
fn merge_sort(
    stepper: &mut Stepper,
    left: usize,
    right: usize,
) -> BoxFuture<'_, Result<(), Cancelled>> {
    async move {
        if left >= right {
            return Ok(());
        }
        stepper.check()?;

        let mid = left + (right - left) / 2;
        merge_sort(stepper, left, mid).await?;
        merge_sort(stepper, mid + 1, right).await?;
        merge(stepper, left, mid, right).await
    }
    .boxed()
}

// Merges the sorted runs `[left, mid]` and `[mid + 1, right]`.
async fn merge(
    stepper: &mut Stepper,
    left: usize,
    mid: usize,
    right: usize,
) -> Result<(), Cancelled> {
    // What is left of the lower run sits in `[slot, upper)`, the upper run in `[upper, right]`.
    let mut upper = mid + 1;
    for slot in left..=right {
        stepper
            .step(|model| {
                model.set_evaluated(Some(slot));
                let lower_done = slot == upper;
                let upper_done = upper > right;
                if !lower_done && !upper_done && model.get(upper) < model.get(slot) {
                    model.relocate(upper, slot);
                    upper += 1;
                    StepKind::Move
                } else {
                    StepKind::Inspect
                }
            })
            .await?;
    }
    Ok(())
}
