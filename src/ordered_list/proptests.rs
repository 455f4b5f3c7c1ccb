use super::*;

use proptest::prelude::*;

fn validate_list(list: &OrderedList) {
    let occupied: Vec<i64> = list.slots.iter().flatten().copied().collect();
    assert_eq!(occupied.len(), list.len, "len must match occupied slots");
    assert!(
        occupied.windows(2).all(|w| w[0] <= w[1]),
        "occupied slots must be non-decreasing"
    );
    assert!(list.capacity() >= list.len);

    if list.capacity() == 0 {
        assert_eq!(list.block_size, 0);
        assert_eq!(list.tree_height, 0);
        return;
    }

    assert_eq!(
        list.block_size,
        block_size_for(list.len),
        "block size must follow the element count"
    );
    assert_eq!(
        list.capacity(),
        list.block_size << list.tree_height,
        "store must be a complete tree of leaves"
    );
    assert!(list.leaf_count().is_power_of_two());
}

#[derive(Debug, Clone)]
enum Op {
    Include(i64),
    Erase(i64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-50i64..50).prop_map(Op::Include),
        2 => (-50i64..50).prop_map(Op::Erase),
    ]
}

proptest! {
    #[test]
    fn invariants_hold_after_every_op(ops in prop::collection::vec(op_strategy(), 0..400)) {
        let mut list = OrderedList::new();
        for op in ops {
            match op {
                Op::Include(x) => list.include(x).unwrap(),
                Op::Erase(x) => list.erase(x).unwrap(),
            }
            validate_list(&list);
        }
    }

    #[test]
    fn invariants_hold_for_long_ascending_runs(n in 0usize..600) {
        let mut list = OrderedList::new();
        for x in 0..n as i64 {
            list.include(x).unwrap();
        }
        validate_list(&list);
        for x in 0..n as i64 {
            list.erase(x).unwrap();
        }
        validate_list(&list);
        prop_assert!(list.is_empty());
    }
}
