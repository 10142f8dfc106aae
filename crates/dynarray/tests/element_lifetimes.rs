//! Integration test: every element the array ever holds is dropped exactly
//! once, whichever operation removes it.

use dynarray::DynamicArray;
use dynarray_test_utils::DropLedger;

#[test]
fn dropping_array_drops_all_elements() {
    let ledger = DropLedger::new();
    {
        let mut array = DynamicArray::with_capacity(1).unwrap();
        for v in 0..100 {
            array.append(ledger.track(v)).unwrap();
        }
        assert_eq!(ledger.live(), 100);
    }
    assert_eq!(ledger.created(), 100);
    assert_eq!(ledger.dropped(), 100);
}

#[test]
fn reallocation_moves_without_dropping() {
    let ledger = DropLedger::new();
    let mut array = DynamicArray::with_capacity(2).unwrap();
    for v in 0..17 {
        array.append(ledger.track(v)).unwrap();
    }
    array.resize(64).unwrap();
    array.shrink_to_fit().unwrap();
    assert_eq!(ledger.dropped(), 0);
    assert_eq!(array.len(), 17);
}

#[test]
fn erase_hands_element_to_caller() {
    let ledger = DropLedger::new();
    let mut array = DynamicArray::from_sequence(ledger.track_all(0..3)).unwrap();
    let removed = array.erase(1).unwrap();
    assert_eq!(*removed.value(), 1);
    assert_eq!(ledger.dropped(), 0);
    drop(removed);
    assert_eq!(ledger.dropped(), 1);
}

#[test]
fn clear_and_truncating_resize_drop_removed_elements() {
    let ledger = DropLedger::new();
    let mut array = DynamicArray::from_sequence(ledger.track_all(0..10)).unwrap();

    array.resize(4).unwrap();
    assert_eq!(ledger.dropped(), 6);
    assert_eq!(array.len(), 4);

    array.clear();
    assert_eq!(ledger.dropped(), 10);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn insert_swap_sort_keep_every_element_alive() {
    let ledger = DropLedger::new();
    let mut array = DynamicArray::with_capacity(1).unwrap();
    for v in [5, 3, 8, 1] {
        array.insert(ledger.track(v), 0).unwrap();
    }
    array.swap(0, 3).unwrap();
    array.sort();
    assert_eq!(ledger.live(), 4);
    let values: Vec<i32> = array.iter().map(|t| *t.value()).collect();
    assert_eq!(values, vec![1, 3, 5, 8]);
}

#[test]
fn assignment_releases_previous_contents() {
    let ledger = DropLedger::new();
    let source = DynamicArray::from_sequence(ledger.track_all([1, 2])).unwrap();
    let mut target = DynamicArray::from_sequence(ledger.track_all([7, 8, 9])).unwrap();

    target.assign_from(&source).unwrap();

    // Three originals dropped, two clones created.
    assert_eq!(ledger.dropped(), 3);
    assert_eq!(ledger.live(), 4);
    drop(source);
    drop(target);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn into_iter_transfers_ownership() {
    let ledger = DropLedger::new();
    let array = DynamicArray::from_sequence(ledger.track_all(0..5)).unwrap();
    let mut kept = Vec::new();
    for item in array.into_iter().rev().take(2) {
        kept.push(item);
    }
    assert_eq!(ledger.live(), 2);
    let values: Vec<i32> = kept.iter().map(|t| *t.value()).collect();
    assert_eq!(values, vec![4, 3]);
}

#[test]
fn clone_from_drops_every_element_once() {
    let ledger = DropLedger::new();
    let source = DynamicArray::from_sequence(ledger.track_all(0..3)).unwrap();
    let mut target = DynamicArray::from_sequence(ledger.track_all(10..15)).unwrap();

    target.clone_from(&source);
    assert_eq!(ledger.dropped(), 5);
    assert_eq!(ledger.live(), 6);

    drop(target);
    drop(source);
    assert_eq!(ledger.created(), 11);
    assert_eq!(ledger.dropped(), ledger.created());
}
