#![no_main]
use libfuzzer_sys::fuzz_target;
use oblivion::OrderedList;

fuzz_target!(|ops: Vec<(bool, i16)>| {
    let mut list = OrderedList::new();
    let mut model: Vec<i64> = Vec::new();

    for (insert, x) in ops {
        let x = i64::from(x);
        if insert {
            list.include(x).unwrap();
            let at = model.partition_point(|&v| v <= x);
            model.insert(at, x);
        } else {
            list.erase(x).unwrap();
            if let Ok(at) = model.binary_search(&x) {
                model.remove(at);
            }
        }

        assert_eq!(list.len(), model.len());
        let expected = model.iter().copied().find(|&v| v > x);
        assert_eq!(list.successor(x), expected, "successor of {x}");
    }

    assert!(list.iter().eq(model.iter().copied()));
});
