//! Property-based tests for Sumhash512 using proptest.

use proptest::prelude::*;
use sumlith_sumhash::{sumhash512, sumhash512_salted, SumhashState};

fn finish(mut state: SumhashState) -> [u8; 64] {
    let mut out = [0u8; 64];
    state.finalize_into(&mut out);
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Splitting the input anywhere gives the same digest.
    #[test]
    fn split_point_irrelevant(
        data in prop::collection::vec(any::<u8>(), 0..400),
        cut in any::<prop::sample::Index>(),
    ) {
        let at = cut.index(data.len() + 1);
        let mut state = SumhashState::new();
        state.update(&data[..at]);
        state.update(&data[at..]);
        prop_assert_eq!(finish(state), sumhash512(&data));
    }

    /// Finalizing a clone leaves the original usable.
    #[test]
    fn clone_then_continue(
        a in prop::collection::vec(any::<u8>(), 0..200),
        b in prop::collection::vec(any::<u8>(), 0..200),
    ) {
        let mut state = SumhashState::new();
        state.update(&a);
        let snapshot = finish(state.clone());
        prop_assert_eq!(snapshot, sumhash512(&a));

        state.update(&b);
        let whole: Vec<u8> = a.iter().chain(b.iter()).copied().collect();
        prop_assert_eq!(finish(state), sumhash512(&whole));
    }

    /// Salted and unsalted digests of the same input differ.
    #[test]
    fn salt_separates(data in prop::collection::vec(any::<u8>(), 0..200), salt in any::<[u8; 32]>()) {
        let mut full = [0u8; 64];
        full[..32].copy_from_slice(&salt);
        full[32] = 1;
        prop_assert_ne!(sumhash512_salted(&data, &full), sumhash512(&data));
    }
}
