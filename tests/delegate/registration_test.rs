/*!
 * Registration Tests
 * Duplicate detection for functions and bound methods
 */

use multicast_delegate::{declare_delegate, instance, CallbackRegistry, ListenerKind};
use pretty_assertions::assert_eq;
use std::cell::RefCell;

declare_delegate!(SumDelegate, i32, i32);

thread_local! {
    static LOG: RefCell<Vec<i32>> = RefCell::new(Vec::new());
}

fn log_sum(a: i32, b: i32) {
    LOG.with(|log| log.borrow_mut().push(a + b));
}

fn log_product(a: i32, b: i32) {
    LOG.with(|log| log.borrow_mut().push(a * b));
}

fn take_log() -> Vec<i32> {
    LOG.with(|log| std::mem::take(&mut *log.borrow_mut()))
}

struct Accumulator {
    total: i32,
}

impl Accumulator {
    fn add(&mut self, a: i32, b: i32) {
        self.total += a + b;
    }

    fn sub(&mut self, a: i32, b: i32) {
        self.total -= a + b;
    }
}

#[test]
fn test_sum_example() {
    take_log();
    let acc = instance(Accumulator { total: 0 });
    let mut delegate = SumDelegate::new();

    delegate.add_listener(log_sum);
    delegate.add_method_listener(&acc, Accumulator::add);
    delegate.broadcast((2, 3));

    assert_eq!(take_log(), vec![5]);
    assert_eq!(acc.lock().total, 5);

    // Registering log_sum again changes nothing
    assert!(!delegate.add_listener(log_sum));
    delegate.broadcast((2, 3));
    assert_eq!(take_log(), vec![5]);
    assert_eq!(acc.lock().total, 10);
}

#[test]
fn test_same_function_registered_once() {
    take_log();
    let mut delegate = SumDelegate::new();
    assert!(delegate.add_listener(log_sum));
    assert!(!delegate.add_listener(log_sum));
    assert!(!delegate.add_listener(log_sum));
    assert_eq!(delegate.len(), 1);

    delegate.broadcast((1, 1));
    assert_eq!(take_log(), vec![2]);
}

#[test]
fn test_distinct_functions_both_registered() {
    take_log();
    let mut delegate = SumDelegate::new();
    assert!(delegate.add_listener(log_sum));
    assert!(delegate.add_listener(log_product));

    delegate.broadcast((3, 4));
    assert_eq!(take_log(), vec![7, 12]);
}

#[test]
fn test_same_method_same_instance_registered_once() {
    let acc = instance(Accumulator { total: 0 });
    let mut delegate = SumDelegate::new();
    assert!(delegate.add_method_listener(&acc, Accumulator::add));
    assert!(!delegate.add_method_listener(&acc, Accumulator::add));
    assert!(!delegate.add_method_listener(&acc.clone(), Accumulator::add));

    delegate.broadcast((1, 2));
    assert_eq!(acc.lock().total, 3);
    assert_eq!(delegate.stats().duplicates_ignored, 2);
}

#[test]
fn test_same_method_two_instances() {
    let first = instance(Accumulator { total: 0 });
    let second = instance(Accumulator { total: 100 });
    let mut delegate = SumDelegate::new();
    assert!(delegate.add_method_listener(&first, Accumulator::add));
    assert!(delegate.add_method_listener(&second, Accumulator::add));

    delegate.broadcast((1, 2));
    assert_eq!(first.lock().total, 3);
    assert_eq!(second.lock().total, 103);
    assert_eq!(delegate.stats().invocations, 2);
}

#[test]
fn test_two_methods_same_instance() {
    let acc = instance(Accumulator { total: 0 });
    let mut delegate = SumDelegate::new();
    assert!(delegate.add_method_listener(&acc, Accumulator::add));
    assert!(delegate.add_method_listener(&acc, Accumulator::sub));

    delegate.broadcast((5, 5));
    assert_eq!(acc.lock().total, 0);
    assert_eq!(delegate.len(), 2);
}

#[test]
fn test_contains_queries() {
    let acc = instance(Accumulator { total: 0 });
    let other = instance(Accumulator { total: 0 });
    let mut delegate = SumDelegate::new();
    delegate.add_listener(log_sum);
    delegate.add_method_listener(&acc, Accumulator::add);

    assert!(delegate.contains_listener(log_sum));
    assert!(!delegate.contains_listener(log_product));
    assert!(delegate.contains_method_listener(&acc, Accumulator::add));
    assert!(!delegate.contains_method_listener(&acc, Accumulator::sub));
    assert!(!delegate.contains_method_listener(&other, Accumulator::add));
}

#[test]
fn test_non_capturing_closures_have_identity() {
    let mut delegate = CallbackRegistry::<(u8,)>::new();
    for _ in 0..3 {
        delegate.add_listener(|_: u8| {});
    }
    assert!(delegate.add_listener(|_: u8| {}));
    assert_eq!(delegate.len(), 2);
}

#[test]
fn test_keys_report_kinds_and_targets() {
    let acc = instance(Accumulator { total: 0 });
    let mut delegate = SumDelegate::new();
    delegate.add_listener(log_sum);
    delegate.add_method_listener(&acc, Accumulator::add);

    let keys: Vec<_> = delegate.keys().copied().collect();
    assert_eq!(keys[0].kind(), ListenerKind::Function);
    assert!(keys[0].target.is_none());
    assert_eq!(keys[1].kind(), ListenerKind::Method);
    assert!(keys[1].target.is_some());
    assert!(keys[1].invoker.name().contains("add"));
}
