/*!
 * Property Tests
 * Registry behaves like an insertion-ordered set of listeners
 */

use multicast_delegate::CallbackRegistry;
use proptest::prelude::*;
use std::cell::RefCell;

thread_local! {
    static ORDER: RefCell<Vec<(usize, u16)>> = RefCell::new(Vec::new());
}

fn l0(v: u16) {
    ORDER.with(|o| o.borrow_mut().push((0, v)));
}
fn l1(v: u16) {
    ORDER.with(|o| o.borrow_mut().push((1, v)));
}
fn l2(v: u16) {
    ORDER.with(|o| o.borrow_mut().push((2, v)));
}
fn l3(v: u16) {
    ORDER.with(|o| o.borrow_mut().push((3, v)));
}

fn take_order() -> Vec<(usize, u16)> {
    ORDER.with(|o| std::mem::take(&mut *o.borrow_mut()))
}

#[derive(Debug, Clone)]
enum Op {
    Add(usize),
    Remove(usize),
    RemoveAll,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..4).prop_map(Op::Add),
        2 => (0usize..4).prop_map(Op::Remove),
        1 => Just(Op::RemoveAll),
    ]
}

fn add(registry: &mut CallbackRegistry<(u16,)>, which: usize) -> bool {
    match which {
        0 => registry.add_listener(l0),
        1 => registry.add_listener(l1),
        2 => registry.add_listener(l2),
        _ => registry.add_listener(l3),
    }
}

fn remove(registry: &mut CallbackRegistry<(u16,)>, which: usize) -> bool {
    match which {
        0 => registry.remove_listener(l0),
        1 => registry.remove_listener(l1),
        2 => registry.remove_listener(l2),
        _ => registry.remove_listener(l3),
    }
}

proptest! {
    #[test]
    fn prop_registry_matches_ordered_set(ops in prop::collection::vec(op_strategy(), 0..40), value in any::<u16>()) {
        take_order();
        let mut registry = CallbackRegistry::<(u16,)>::new();
        let mut model: Vec<usize> = Vec::new();

        for op in ops {
            match op {
                Op::Add(which) => {
                    let added = add(&mut registry, which);
                    prop_assert_eq!(added, !model.contains(&which));
                    if added {
                        model.push(which);
                    }
                }
                Op::Remove(which) => {
                    let removed = remove(&mut registry, which);
                    let position = model.iter().position(|&m| m == which);
                    prop_assert_eq!(removed, position.is_some());
                    if let Some(index) = position {
                        model.remove(index);
                    }
                }
                Op::RemoveAll => {
                    registry.remove_all();
                    model.clear();
                }
            }
            prop_assert_eq!(registry.len(), model.len());
        }

        registry.broadcast((value,));
        let expected: Vec<(usize, u16)> = model.iter().map(|&m| (m, value)).collect();
        prop_assert_eq!(take_order(), expected);
    }

    #[test]
    fn prop_repeated_add_is_idempotent(repeats in 1usize..20, value in any::<u16>()) {
        take_order();
        let mut registry = CallbackRegistry::<(u16,)>::new();
        for _ in 0..repeats {
            registry.add_listener(l2);
        }
        registry.broadcast((value,));
        prop_assert_eq!(take_order(), vec![(2, value)]);
        prop_assert_eq!(registry.stats().duplicates_ignored, (repeats - 1) as u64);
    }
}
