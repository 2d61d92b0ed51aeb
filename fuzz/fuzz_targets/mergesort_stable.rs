#![no_main]

use libfuzzer_sys::fuzz_target;

use fork_join_sort::{ForkStrategy, MergeSort};

#[path = "../src/util.rs"]
mod util;

fuzz_target!(|data: &[u8]| {
    let Some((&config, rest)) = data.split_first() else {
        return;
    };

    // Low bits pick the crossover, the high bit the fork strategy.
    let crossover = usize::from(config & 0x7f);
    let strategy = if config & 0x80 == 0 {
        ForkStrategy::SpawnBoth
    } else {
        ForkStrategy::SpawnOne
    };

    // Few distinct keys, so stability is actually exercised.
    let mut v: Vec<(i32, usize)> = util::u8_as_i32(rest)
        .into_iter()
        .enumerate()
        .map(|(i, x)| (x % 8, i))
        .collect();
    let mut expected = v.clone();
    expected.sort_by_key(|pair| pair.0);

    MergeSort::new()
        .crossover(crossover)
        .strategy(strategy)
        .sort_by_key(&mut v, |pair| pair.0);

    assert_eq!(v, expected);
});
