//! Shell sort over integer slices.

/// Sort `values` in place, ascending, using Shell's original gap sequence
/// `n/2, n/4, ..., 1`.
///
/// Each pass runs a gapped insertion sort: the element at `i` is held out
/// while larger left neighbors at stride `gap` shift one slot right, then it
/// is placed at the settled index. Not a stable sort; callers must not rely
/// on the relative order of equal values.
pub fn shell_sort(values: &mut [i64]) {
    let n = values.len();
    let mut gap = n / 2;

    while gap > 0 {
        for i in gap..n {
            let temp = values[i];
            let mut j = i;
            while j >= gap && values[j - gap] > temp {
                values[j] = values[j - gap];
                j -= gap;
            }
            values[j] = temp;
        }
        gap /= 2;
    }
}
