#![no_main]

use libfuzzer_sys::fuzz_target;
use shelfkit::store::InventoryStore;

// Fuzz arbitrary operation sequences on InventoryStore
//
// Random add / add_redistributing / restock / delete / purchase calls with
// arbitrary ids and amounts. Every operation must leave the store satisfying
// check_invariants (heap property, capacity bound, index consistency) and
// within its fixed capacity.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut store: InventoryStore<4, 3> = InventoryStore::new();
    let mut day: u64 = 0;

    let mut idx = 0;
    while idx + 3 < data.len() {
        let op = data[idx] % 5;
        let id = u64::from(data[idx + 1] % 32);
        // Mostly small amounts, occasionally near-u64::MAX so the unsigned
        // stock/demand arithmetic is exercised past the i64 boundary.
        let amount = match data[idx + 2] {
            byte @ 0..=215 => u64::from(byte),
            byte => u64::MAX - u64::from(byte),
        };
        let demand = u64::from(data[idx + 3] % 16);
        day += 1;

        match op {
            0 => {
                let had = store.contains(id);
                store.add(id, "fuzz", amount, day, demand).unwrap();
                if !had {
                    assert!(store.contains(id));
                }
            }
            1 => {
                let had = store.contains(id);
                store.add_redistributing(id, "fuzz", amount, day, demand).unwrap();
                if !had {
                    assert!(store.contains(id));
                }
            }
            2 => {
                let found = store.restock(id, amount as i64).unwrap();
                assert_eq!(found, store.contains(id));
            }
            3 => {
                let had = store.contains(id);
                let removed = store.delete(id).unwrap();
                assert_eq!(had, removed.is_some());
                assert!(!store.contains(id));
            }
            4 => {
                let stock_before = store.get(id).map(|item| item.stock());
                let outcome = store.purchase(id, day, amount).unwrap();
                match stock_before {
                    None => assert_eq!(outcome, shelfkit::store::PurchaseOutcome::NotFound),
                    Some(stock) if stock < amount => {
                        assert_eq!(
                            outcome,
                            shelfkit::store::PurchaseOutcome::InsufficientStock {
                                available: stock
                            }
                        );
                    }
                    Some(stock) => {
                        assert_eq!(
                            outcome,
                            shelfkit::store::PurchaseOutcome::Completed {
                                remaining_stock: stock - amount
                            }
                        );
                    }
                }
            }
            _ => unreachable!(),
        }

        store.check_invariants().unwrap();
        assert!(store.len() <= store.capacity());
        idx += 4;
    }
});
