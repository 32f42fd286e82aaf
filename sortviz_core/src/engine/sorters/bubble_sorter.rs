use futures::{future::BoxFuture, FutureExt};

use crate::engine::{Cancelled, Sorter, StepKind, Stepper};

/// An implementation of [Bubble Sort](https://en.wikipedia.org/wiki/Bubble_sort)
///
/// # Explanation
///
/// Bubble sort, sometimes referred to as sinking sort,
/// is a simple sorting algorithm that repeatedly steps
/// through the list, compares adjacent elements and swaps
/// them if they are in the wrong order. The pass through
/// the list is repeated until the list is sorted. The
/// algorithm, which is a comparison sort, is named for the
/// way smaller or larger elements "bubble" to the top of the list.
///
/// # Steps
///
/// Every comparison of `slice[i]` with `slice[i + 1]` is one step with `i` highlighted. A
/// comparison that swaps is followed by a second, non-moving step, so a swap costs two delays.
/// This is what makes bubble sort visibly crawl on a reversed list.
///
/// Always makes `n - 1` passes, the last pass being `1` comparison long.
///
/// # Algorithm
///
/// ```
/// let mut slice = vec![5, 3, 1, 4, 2];
/// let n = slice.len();
///
/// for pass in 0..n - 1 {
///     for i in 0..n - pass - 1 {
///         // swap the elements at index if the current element is
///         // bigger that the next element.
///         if slice[i] > slice[i + 1] {
///             slice.swap(i, i + 1);
///         }
///     }
/// }
/// assert_eq!(slice, [1, 2, 3, 4, 5]);
/// ```
#[derive(Default)]
pub struct BubbleSorter;

impl Sorter for BubbleSorter {
    fn sort<'a>(&'a self, stepper: &'a mut Stepper) -> BoxFuture<'a, Result<(), Cancelled>> {
        async move {
            let n = stepper.len();

            for pass in 0..n.saturating_sub(1) {
                for i in 0..n - pass - 1 {
                    let step = stepper
                        .step(|model| {
                            model.set_evaluated(Some(i));
                            if model.get(i) > model.get(i + 1) {
                                model.swap(i, i + 1);
                                StepKind::Move
                            } else {
                                StepKind::Inspect
                            }
                        })
                        .await?;

                    if step == StepKind::Move {
                        stepper.step(|_| StepKind::Inspect).await?;
                    }
                }
            }
            Ok(())
        }
        .boxed()
    }
}
