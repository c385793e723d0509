#[cfg(test)]
mod tests {
    use crate::action::{action_to_index, index_to_action, Action, A, SCORE_BASE};
    use crate::category::{Category, NUM_CATS};

    #[test]
    fn index_order_is_upper_then_lower() {
        for (i, c) in Category::ALL.into_iter().enumerate() {
            assert_eq!(c.index(), i);
            assert_eq!(Category::from_index(i), Some(c));
            assert_eq!(c.is_upper(), i < 6);
        }
        assert_eq!(Category::from_index(NUM_CATS), None);
        assert_eq!(Category::Fours.upper_face(), Some(4));
        assert_eq!(Category::Chance.upper_face(), None);
    }

    #[test]
    fn parse_accepts_keys_labels_and_snake_case() {
        for c in Category::ALL {
            assert_eq!(c.key().parse::<Category>().unwrap(), c);
            assert_eq!(c.label().parse::<Category>().unwrap(), c);
        }
        assert_eq!(
            "three_of_a_kind".parse::<Category>().unwrap(),
            Category::ThreeOfAKind
        );
        assert_eq!("FULL-HOUSE".parse::<Category>().unwrap(), Category::FullHouse);
        assert!("pair".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn serde_uses_camel_case_keys() {
        let s = serde_json::to_string(&Category::SmallStraight).unwrap();
        assert_eq!(s, "\"smallStraight\"");
        let c: Category = serde_json::from_str("\"fourOfAKind\"").unwrap();
        assert_eq!(c, Category::FourOfAKind);
    }

    #[test]
    fn action_index_roundtrip() {
        for idx in 0..A {
            assert_eq!(action_to_index(index_to_action(idx)), idx);
        }
        assert_eq!(index_to_action(0), Action::Roll);
        assert_eq!(index_to_action(3), Action::ToggleHold(2));
        assert_eq!(
            index_to_action(SCORE_BASE),
            Action::Score(Category::Ones)
        );
        assert_eq!(A, 19);
    }

    #[test]
    #[should_panic]
    fn index_to_action_out_of_range_panics() {
        let _ = index_to_action(A);
    }
}
