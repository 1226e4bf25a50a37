//! Property tests for the metadata bag and condition chains.

use proptest::prelude::*;

use stagecue::{Condition, DetailValue, MetadataBag};

proptest! {
    /// Writing the same key repeatedly keeps only the last value.
    #[test]
    fn last_write_wins(key in "[A-Za-z][A-Za-z0-9_]{0,12}", values in prop::collection::vec(any::<i64>(), 1..8)) {
        let mut bag = MetadataBag::new();
        for value in &values {
            bag.add_detail(key.as_str(), *value);
        }

        prop_assert_eq!(bag.len(), 1);
        prop_assert_eq!(bag.get_int(&key, i64::MIN), *values.last().unwrap());
    }

    /// Distinct keys never clobber each other.
    #[test]
    fn distinct_keys_are_independent(entries in prop::collection::hash_map("[a-z]{1,8}", any::<i64>(), 0..16)) {
        let mut bag = MetadataBag::new();
        for (key, value) in &entries {
            bag.add_detail(key.as_str(), *value);
        }

        prop_assert_eq!(bag.len(), entries.len());
        for (key, value) in &entries {
            prop_assert_eq!(bag.try_get_detail(key), Some(&DetailValue::Int(*value)));
        }
    }

    /// Clearing empties the bag regardless of prior contents.
    #[test]
    fn clear_empties(entries in prop::collection::vec(("[a-z]{1,8}", any::<i64>()), 0..16)) {
        let mut bag = MetadataBag::new();
        for (key, value) in &entries {
            bag.add_detail(key.as_str(), *value);
        }

        bag.clear_details();
        prop_assert!(bag.is_empty());
    }

    /// Serialization round-trips the bag exactly.
    #[test]
    fn serde_round_trip(entries in prop::collection::vec(("[a-z]{1,8}", any::<i64>()), 0..8)) {
        let mut bag = MetadataBag::new();
        for (key, value) in &entries {
            bag.add_detail(key.as_str(), *value);
        }

        let json = serde_json::to_string(&bag).unwrap();
        let back: MetadataBag = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(bag, back);
    }

    /// A conjunction over arbitrary members agrees with `&&` folding, and
    /// never holds when any member is false.
    #[test]
    fn conjunction_matches_fold(members in prop::collection::vec(any::<bool>(), 0..8)) {
        let expected = members.iter().all(|m| *m);
        let conditions: Vec<Condition> = members
            .iter()
            .map(|m| if *m { Condition::always() } else { Condition::never() })
            .collect();

        prop_assert_eq!(Condition::all("chain", conditions).evaluate(), expected);
    }
}
