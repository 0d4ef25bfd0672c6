//! Touch batch assembly
//!
//! The Java side flattens a `MotionEvent` into parallel arrays
//! (`getPointerId(i)`, `getX(i)`, `getY(i)`) so a whole batch crosses JNI
//! in one call.

use relay_platform::Pointer;
use smallvec::SmallVec;

/// Pointers of one batch; four contacts fit inline
pub type PointerBatch = SmallVec<[Pointer; 4]>;

/// Zip parallel pointer arrays into a batch
///
/// Arrays of unequal length are truncated to the shortest one.
pub fn pointers_from_arrays(ids: &[i32], xs: &[f32], ys: &[f32]) -> PointerBatch {
    if ids.len() != xs.len() || ids.len() != ys.len() {
        tracing::warn!(
            ids = ids.len(),
            xs = xs.len(),
            ys = ys.len(),
            "pointer arrays differ in length"
        );
    }
    ids.iter()
        .zip(xs)
        .zip(ys)
        .map(|((&id, &x), &y)| Pointer::new(i64::from(id), x, y))
        .collect()
}
