/// PROPERTY-BASED TESTS: Stash tab ordering invariants
///
/// Any sequence of insert, remove and option updates keeps the sort orders a
/// dense permutation of 0..len, and matches a plain list where insert means
/// "take the tab out, put it back at min(position, len)".

use proptest::prelude::*;
use stronghold_shared::{PrototypeId, StashConfig, StashTabOptionsUpdate, StashTabs};
use stronghold_test::assert_dense_permutation;

#[derive(Debug, Clone)]
enum StashOp {
    Insert(u64, i32),
    Remove(u64),
    Update(u64),
}

fn stash_op_strategy() -> impl Strategy<Value = StashOp> {
    prop_oneof![
        4 => (1u64..8, -2i32..12).prop_map(|(tab, position)| StashOp::Insert(tab, position)),
        1 => (1u64..8).prop_map(StashOp::Remove),
        1 => (1u64..8).prop_map(StashOp::Update),
    ]
}

fn model_insert(model: &mut Vec<PrototypeId>, tab_id: PrototypeId, position: usize) {
    model.retain(|other| *other != tab_id);
    let position = position.min(model.len());
    model.insert(position, tab_id);
}

proptest! {
    #[test]
    fn prop_orders_stay_dense(ops in prop::collection::vec(stash_op_strategy(), 1..60)) {
        let mut stash_tabs = StashTabs::new(StashConfig::default());
        let mut model: Vec<PrototypeId> = Vec::new();

        for op in ops {
            let before = stash_tabs.tabs_in_order();
            match op {
                StashOp::Insert(tab, position) => {
                    let tab_id = PrototypeId::new(tab);
                    let already_there = model.iter().position(|other| *other == tab_id)
                        == Some(position.max(0) as usize);
                    let result = stash_tabs.insert(tab_id, position);

                    if position < 0 || already_there {
                        prop_assert!(result.is_err());
                        prop_assert_eq!(stash_tabs.tabs_in_order(), before);
                    } else {
                        prop_assert!(result.is_ok());
                        model_insert(&mut model, tab_id, position as usize);
                    }
                }
                StashOp::Remove(tab) => {
                    let tab_id = PrototypeId::new(tab);
                    let result = stash_tabs.remove(tab_id);
                    prop_assert_eq!(result.is_ok(), model.contains(&tab_id));
                    model.retain(|other| *other != tab_id);
                }
                StashOp::Update(tab) => {
                    let tab_id = PrototypeId::new(tab);
                    let update = StashTabOptionsUpdate {
                        tab_id,
                        display_name: Some(format!("Tab {}", tab)),
                        ..Default::default()
                    };
                    prop_assert!(stash_tabs.update_options(&update).is_ok());
                    if !model.contains(&tab_id) {
                        model.push(tab_id);
                    }
                }
            }

            assert_dense_permutation!(stash_tabs);
            prop_assert_eq!(stash_tabs.tabs_in_order(), model.clone());
        }
    }
}
