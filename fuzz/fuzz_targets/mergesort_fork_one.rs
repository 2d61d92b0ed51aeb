#![no_main]

use libfuzzer_sys::fuzz_target;

use fork_join_sort::stable::mergesort_fork_one as test_sort;

fuzz_target!(|data: &[u8]| {
    let mut v = data.to_vec();
    test_sort::sort(&mut v);
});
