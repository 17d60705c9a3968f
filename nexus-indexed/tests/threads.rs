//! Random operation sequences checked against a `Vec` model.
//!
//! After every step the primary sequence must match the model, and both
//! threads must be the model sorted, over both storage backends.

use nexus_indexed::{Error, FixedIndexedList, IndexedList, Key, Node, Storage};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const OPS: usize = 4_000;
const VALUES: u32 = 32;

fn check<S, K: Key>(list: &IndexedList<u32, S, K>, model: &[u32])
where
    S: Storage<Node<u32, K>, Key = K>,
{
    assert_eq!(list.len(), model.len());
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), model);
    assert_eq!(list.iter().rev().count(), model.len());

    let mut sorted = model.to_vec();
    sorted.sort_unstable();
    assert_eq!(list.iter_asc().copied().collect::<Vec<_>>(), sorted);
    assert_eq!(list.smallest(), sorted.first());
    assert_eq!(list.largest(), sorted.last());

    sorted.reverse();
    assert_eq!(list.iter_desc().copied().collect::<Vec<_>>(), sorted);
}

fn run<S, K: Key>(mut list: IndexedList<u32, S, K>, seed: u64, capacity: usize)
where
    S: Storage<Node<u32, K>, Key = K>,
{
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut model: Vec<u32> = Vec::new();

    for _ in 0..OPS {
        let op = rng.random_range(0..100);
        let value = rng.random_range(0..VALUES);

        if op < 20 {
            match list.try_push_back(value) {
                Ok(_) => model.push(value),
                Err(full) => {
                    assert_eq!(model.len(), capacity);
                    assert_eq!(full.into_inner(), value);
                }
            }
        } else if op < 35 {
            match list.try_push_front(value) {
                Ok(_) => model.insert(0, value),
                Err(_) => assert_eq!(model.len(), capacity),
            }
        } else if op < 50 {
            let pos = rng.random_range(0..=model.len() + 1);
            match list.insert(pos, value) {
                Ok(_) => model.insert(pos, value),
                Err(Error::OutOfRange { index, len }) => {
                    assert_eq!((index, len), (pos, model.len()));
                    assert!(pos > model.len());
                }
                Err(Error::Full) => assert_eq!(model.len(), capacity),
                Err(other) => unreachable!("insert reported {other}"),
            }
        } else if op < 60 {
            let expected = if model.is_empty() {
                Err(Error::Empty)
            } else {
                Ok(model.remove(0))
            };
            assert_eq!(list.pop_front(), expected);
        } else if op < 68 {
            assert_eq!(list.pop_back(), model.pop().ok_or(Error::Empty));
        } else if op < 78 {
            let pos = rng.random_range(0..=model.len());
            if pos < model.len() {
                assert_eq!(list.erase(pos), Ok(model.remove(pos)));
            } else {
                assert_eq!(
                    list.erase(pos),
                    Err(Error::OutOfRange {
                        index: pos,
                        len: model.len()
                    })
                );
            }
        } else if op < 84 {
            let before = model.len();
            model.retain(|&v| v != value);
            assert_eq!(list.remove(&value), before - model.len());
        } else if op < 88 {
            list.reverse();
            model.reverse();
        } else if op < 91 {
            list.sort();
            model.sort();
        } else if op < 94 {
            let before = model.len();
            model.dedup();
            assert_eq!(list.unique(), before - model.len());
        } else if op < 97 {
            let count = rng.random_range(0..=model.len());
            list.assign(count, value);
            for slot in model.iter_mut().take(count) {
                *slot = value;
            }
        } else {
            assert_eq!(list.find(&value), model.iter().position(|&v| v == value));
        }

        check(&list, &model);
    }

    list.clear();
    check(&list, &[]);
}

#[test]
fn random_ops_slab_storage() {
    for seed in [1, 7, 12345] {
        let list: IndexedList<u32> = IndexedList::new();
        run(list, seed, usize::MAX);
    }
}

#[test]
fn random_ops_fixed_storage() {
    for seed in [2, 99999] {
        let list: FixedIndexedList<u32> = FixedIndexedList::with_capacity(48);
        run(list, seed, 48);
    }
}

#[test]
fn merge_and_splice_keep_threads() {
    let mut rng = SmallRng::seed_from_u64(42);

    for _ in 0..50 {
        let mut a: Vec<u32> = (0..rng.random_range(0..20))
            .map(|_| rng.random_range(0..VALUES))
            .collect();
        let mut b: Vec<u32> = (0..rng.random_range(0..20))
            .map(|_| rng.random_range(0..VALUES))
            .collect();
        a.sort_unstable();
        b.sort_unstable();

        let la: IndexedList<u32> = IndexedList::from(a.clone());
        let lb: IndexedList<u32> = IndexedList::from(b.clone());
        let merged = IndexedList::merge(&la, &lb);

        let mut expected = [a.clone(), b.clone()].concat();
        expected.sort_unstable();
        check(&merged, &expected);

        let mut host: IndexedList<u32> = IndexedList::from(b.clone());
        let mut donor: IndexedList<u32> = IndexedList::from(a.clone());
        let pos = rng.random_range(0..=b.len());
        host.splice(pos, &mut donor).unwrap();

        let spliced = [&b[..pos], &a[..], &b[pos..]].concat();
        check(&host, &spliced);
        check(&donor, &[]);
    }
}

#[test]
fn resize_grows_with_defaults() {
    let mut list: IndexedList<u32> = IndexedList::from([9, 3]);
    list.resize(5).unwrap();
    check(&list, &[9, 3, 0, 0, 0]);

    let mut fixed: FixedIndexedList<u32> = FixedIndexedList::with_capacity(3);
    fixed.try_push_back(4).unwrap();
    assert_eq!(fixed.resize(4), Err(Error::Full));
    check(&fixed, &[4]);
    fixed.resize(3).unwrap();
    check(&fixed, &[4, 0, 0]);
}
