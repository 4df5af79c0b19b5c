use importer_map::similarity_score;
use proptest::prelude::*;

proptest! {
    #[test]
    fn identical_strings_score_one(a in "[A-Za-z]{1,8}( [A-Za-z]{1,8}){0,2}") {
        prop_assert_eq!(similarity_score(&a, &a), 1.0);
    }

    #[test]
    fn score_is_symmetric(a in "[a-zA-Z ]{0,16}", b in "[a-zA-Z ]{0,16}") {
        prop_assert_eq!(similarity_score(&a, &b), similarity_score(&b, &a));
    }

    #[test]
    fn score_is_bounded(a in "\\PC{0,16}", b in "\\PC{0,16}") {
        let score = similarity_score(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score));
    }
}
