use std::thread;

use dynarith::{BoxedNumber, Dispatcher, NumericKind, OperatorKind, PromotionTable};
use strum::IntoEnumIterator;

fn all_results(dispatcher: &Dispatcher<'_>) -> Vec<dynarith::Result<BoxedNumber>> {
    let mut results = Vec::new();
    for left in NumericKind::iter() {
        for right in NumericKind::iter() {
            for op in OperatorKind::iter() {
                let lhs = BoxedNumber::from_i128(left, 7).unwrap_or(BoxedNumber::one(left));
                let rhs = BoxedNumber::one(right);
                results.push(dispatcher.compute(op, &lhs, &rhs));
            }
        }
    }
    results
}

#[test]
fn standard_table_is_shared_between_threads() {
    let expected = all_results(&Dispatcher::new());

    let from_threads: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| all_results(&Dispatcher::new())))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("dispatch thread panicked"))
            .collect()
    });

    for results in from_threads {
        assert_eq!(results, expected);
    }
    assert!(std::ptr::eq(
        PromotionTable::standard(),
        Dispatcher::new().table()
    ));
}

#[test]
fn custom_table_is_borrowed_across_threads() {
    let mut table = PromotionTable::empty();
    for kind in NumericKind::iter() {
        table.insert(kind, kind, kind).unwrap();
    }
    let dispatcher = Dispatcher::with_table(&table);

    thread::scope(|scope| {
        for kind in NumericKind::iter() {
            scope.spawn(move || {
                let one = BoxedNumber::one(kind);
                assert_eq!(dispatcher.mul(&one, &one), Ok(one.clone()));
                assert!(
                    dispatcher
                        .add(&one, &BoxedNumber::zero(NumericKind::Dec))
                        .is_err()
                        || kind == NumericKind::Dec
                );
            });
        }
    });
}
