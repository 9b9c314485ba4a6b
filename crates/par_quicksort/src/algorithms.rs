pub(crate) mod common;
pub(crate) mod parallel_quick_sort;
