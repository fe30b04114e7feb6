use proptest::prelude::*;
use rideshare_core::queue::PriorityQueue;

fn by_key(item: &(u8, usize)) -> u8 {
    item.0
}

proptest! {
    #[test]
    fn removal_order_is_sorted_and_stable(keys in prop::collection::vec(0u8..8, 0..200)) {
        let mut queue = PriorityQueue::<(u8, usize), u8>::with_key(by_key);
        for (seq, key) in keys.iter().enumerate() {
            queue.add((*key, seq));
        }
        prop_assert_eq!(queue.len(), keys.len());

        let mut drained = Vec::with_capacity(keys.len());
        while let Ok(item) = queue.remove() {
            drained.push(item);
        }

        // A stable sort of the insertion sequence is exactly the expected order.
        let mut expected: Vec<(u8, usize)> = keys.iter().copied().zip(0..).collect();
        expected.sort_by_key(|item| item.0);
        prop_assert_eq!(drained, expected);
        prop_assert!(queue.is_empty());
    }

    #[test]
    fn interleaved_adds_never_return_a_larger_key_first(
        ops in prop::collection::vec(prop::option::of(0u8..16), 1..150)
    ) {
        // `Some(k)` adds, `None` removes; every removal yields the current minimum.
        let mut queue = PriorityQueue::<(u8, usize), u8>::with_key(by_key);
        let mut shadow: Vec<(u8, usize)> = Vec::new();
        for (seq, op) in ops.into_iter().enumerate() {
            match op {
                Some(key) => {
                    queue.add((key, seq));
                    shadow.push((key, seq));
                }
                None => {
                    let min = shadow
                        .iter()
                        .enumerate()
                        .min_by_key(|(_, item)| (item.0, item.1))
                        .map(|(pos, _)| pos);
                    match min {
                        Some(pos) => {
                            let expected = shadow.remove(pos);
                            prop_assert_eq!(queue.remove().ok(), Some(expected));
                        }
                        None => prop_assert!(queue.remove().is_err()),
                    }
                }
            }
        }
        prop_assert_eq!(queue.len(), shadow.len());
    }
}
