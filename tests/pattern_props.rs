//! Property tests for pattern compilation and matching.

use docweave::core::PatternSet;
use proptest::prelude::*;

proptest! {
    #[test]
    fn bare_names_match_at_any_depth(
        name in "[a-z][a-z0-9]{0,7}",
        dirs in prop::collection::vec("[a-z]{1,4}", 0..4),
    ) {
        let set = PatternSet::compile(&[name.clone()]);

        let mut path = dirs.join("/");
        if !path.is_empty() {
            path.push('/');
        }
        path.push_str(&name);

        prop_assert!(set.is_match(&path), "pattern {:?} must match {:?}", name, path);
    }

    #[test]
    fn bare_names_do_not_match_other_names(
        name in "[a-z]{1,8}",
        other in "[a-z]{1,8}",
    ) {
        prop_assume!(name != other);
        let set = PatternSet::compile(&[name.clone()]);

        prop_assert!(!set.is_match(&other));
        let nested = format!("{}/{}", name, other);
        prop_assert!(!set.is_match(&nested));
    }

    #[test]
    fn directory_patterns_cover_dir_and_contents(
        name in "[a-z]{1,8}",
        child in "[a-z]{1,8}",
    ) {
        let set = PatternSet::compile(&[format!("{}/", name)]);

        prop_assert!(set.is_match(&name));
        let direct_child = format!("{}/{}", name, child);
        prop_assert!(set.is_match(&direct_child));
        let nested_child = format!("top/{}/{}", name, child);
        prop_assert!(set.is_match(&nested_child));
    }

    #[test]
    fn arbitrary_patterns_never_panic(
        pattern in "[\\[\\]{}()*?a-z/.-]{0,12}",
        path in "[a-z/.]{0,12}",
    ) {
        let set = PatternSet::compile(&[pattern]);
        let _ = set.is_match(&path);
    }

    #[test]
    fn case_knob_controls_matching(name in "[a-z]{1,8}") {
        let upper = name.to_uppercase();

        let sensitive = PatternSet::compile(&[upper.clone()]);
        prop_assert!(!sensitive.is_match(&name));

        let insensitive = PatternSet::compile_with_case(&[upper], true);
        prop_assert!(insensitive.is_match(&name));
    }
}
