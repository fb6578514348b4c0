//! Property tests for turn resolution and the strength order.

use std::cmp::Ordering;

use proptest::prelude::*;

use crate::domain::test_gens;
use crate::domain::test_prelude;
use crate::domain::turns::{resolve_turn, PlayStrength};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Strength comparison between special plays is a total order.
    #[test]
    fn prop_special_order_is_total(
        a in test_gens::special_piece_set(),
        b in test_gens::special_piece_set(),
        c in test_gens::special_piece_set(),
    ) {
        let (sa, sb, sc) = (PlayStrength::of(&a), PlayStrength::of(&b), PlayStrength::of(&c));

        prop_assert_eq!(sa.cmp(&sb), sb.cmp(&sa).reverse());
        if sa <= sb && sb <= sc {
            prop_assert!(sa <= sc);
        }
        if sa.cmp(&sb) == Ordering::Equal {
            prop_assert_eq!(&sa.special_values, &sb.special_values);
            prop_assert_eq!(sa.total, sb.total);
        }
    }

    /// Any special piece outranks every plain play.
    #[test]
    fn prop_special_beats_plain(
        special in test_gens::special_piece_set(),
        plain in test_gens::plain_piece_set(),
    ) {
        prop_assert!(PlayStrength::of(&special) > PlayStrength::of(&plain));
    }

    /// The winner is valid, no valid play is stronger, and every earlier
    /// valid play is strictly weaker.
    #[test]
    fn prop_winner_is_strongest_and_earliest(plays in test_gens::four_plays()) {
        match resolve_turn(&plays) {
            None => prop_assert!(plays.iter().all(|p| !p.is_valid())),
            Some(w) => {
                prop_assert!(plays[w].is_valid());
                let best = plays[w].strength();
                for (idx, play) in plays.iter().enumerate().filter(|(_, p)| p.is_valid()) {
                    let s = play.strength();
                    prop_assert!(s <= best);
                    if idx < w {
                        prop_assert!(s < best);
                    }
                }
                if plays.iter().any(|p| p.is_valid() && p.strength().has_special) {
                    prop_assert!(best.has_special);
                }
            }
        }
    }
}
