use std::cmp::Ordering;

#[inline]
pub fn insertion_sort_by<T, F>(data: &mut [T], compare: &F)
where
    F: Fn(&T, &T) -> Ordering + ?Sized,
{
    for i in 1..data.len() {
        let mut j = i;
        while j > 0 && compare(&data[j - 1], &data[i]) == Ordering::Greater {
            j -= 1;
        }
        if j < i {
            data[j..=i].rotate_right(1);
        }
    }
}

#[inline]
pub fn sort3_by<T, F>(data: &mut [T], a: usize, b: usize, c: usize, compare: &F)
where
    F: Fn(&T, &T) -> Ordering + ?Sized,
{
    if compare(&data[a], &data[b]) == Ordering::Greater {
        data.swap(a, b);
    }
    if compare(&data[b], &data[c]) == Ordering::Greater {
        data.swap(b, c);
        if compare(&data[a], &data[b]) == Ordering::Greater {
            data.swap(a, b);
        }
    }
}

/// Hoare partition around the median of the first, middle and last elements.
///
/// Returns `(left_end, right_start)`: every element of `data[..left_end]` is
/// `<=` the pivot, every element of `data[right_start..]` is `>=` it, and the
/// elements in between (at most one) equal it and are already in place. Both
/// sides are strictly shorter than `data`.
pub fn partition_hoare_by<T, F>(data: &mut [T], compare: &F) -> (usize, usize)
where
    F: Fn(&T, &T) -> Ordering + ?Sized,
{
    debug_assert!(data.len() >= 2);

    let last = data.len() - 1;
    let mid = last >> 1;
    sort3_by(data, 0, mid, last, compare);

    // The pivot is tracked by position; it follows its element through swaps.
    let mut pivot = mid;
    let mut i = 0usize;
    let mut j = last;

    loop {
        // data[0] <= pivot and data[last] >= pivot act as sentinels, and every
        // swap plants a new pair, so neither scan can leave the slice.
        while compare(&data[i], &data[pivot]) == Ordering::Less {
            i += 1;
        }
        while compare(&data[j], &data[pivot]) == Ordering::Greater {
            j -= 1;
        }

        match i.cmp(&j) {
            Ordering::Less => {
                data.swap(i, j);
                if pivot == i {
                    pivot = j;
                } else if pivot == j {
                    pivot = i;
                }
                i += 1;
                j -= 1;
            }
            Ordering::Equal => return (i, i + 1),
            Ordering::Greater => return (j + 1, i),
        }
    }
}

pub fn heap_sort_by<T, F>(data: &mut [T], compare: &F)
where
    F: Fn(&T, &T) -> Ordering + ?Sized,
{
    let len = data.len();
    if len < 2 {
        return;
    }

    let mut start = (len - 2) / 2;
    loop {
        sift_down_by(data, start, len, compare);
        if start == 0 {
            break;
        }
        start -= 1;
    }

    let mut end = len - 1;
    while end > 0 {
        data.swap(0, end);
        sift_down_by(data, 0, end, compare);
        end -= 1;
    }
}

#[inline]
fn sift_down_by<T, F>(data: &mut [T], mut root: usize, end: usize, compare: &F)
where
    F: Fn(&T, &T) -> Ordering + ?Sized,
{
    loop {
        let child = root * 2 + 1;
        if child >= end {
            break;
        }

        let mut swap_idx = child;
        if child + 1 < end && compare(&data[child], &data[child + 1]) == Ordering::Less {
            swap_idx = child + 1;
        }

        if compare(&data[root], &data[swap_idx]) != Ordering::Less {
            break;
        }

        data.swap(root, swap_idx);
        root = swap_idx;
    }
}

#[inline]
pub fn floor_log2(n: usize) -> usize {
    if n <= 1 {
        0
    } else {
        usize::BITS as usize - 1 - n.leading_zeros() as usize
    }
}

/// Partition levels allowed before a range is handed to heap sort.
#[inline]
pub fn depth_limit(n: usize) -> usize {
    floor_log2(n) * 5 / 2 + 1
}

#[inline]
pub fn is_sorted_by<T, F>(data: &[T], compare: &F) -> bool
where
    F: Fn(&T, &T) -> Ordering + ?Sized,
{
    data.windows(2)
        .all(|w| compare(&w[0], &w[1]) != Ordering::Greater)
}
