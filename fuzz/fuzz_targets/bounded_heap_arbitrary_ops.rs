#![no_main]

use libfuzzer_sys::fuzz_target;
use shelfkit::ds::BoundedMinHeap;
use shelfkit::item::Item;

// Fuzz arbitrary primitive sequences on BoundedMinHeap
//
// Drives random sequences of push_back+swim, evict-root, pop_back, swap+resift,
// and positional reads. The heap must either reject an out-of-sequence call
// with an error or keep its invariants; it must never panic or corrupt state.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut heap: BoundedMinHeap<Item, 5> = BoundedMinHeap::new();
    let mut next_id: u64 = 0;

    let mut idx = 0;
    while idx + 2 < data.len() {
        let op = data[idx] % 5;
        let a = data[idx + 1] as u64;
        let b = data[idx + 2] as usize;

        match op {
            0 => {
                // insert recipe: push_back + swim
                if !heap.is_full() {
                    let old_len = heap.len();
                    heap.push_back(Item::new(next_id, "fuzz", 1, a, a)).unwrap();
                    next_id += 1;
                    heap.swim(heap.len()).unwrap();
                    assert_eq!(heap.len(), old_len + 1);
                }
            }
            1 => {
                // evict-root recipe
                if !heap.is_empty() {
                    let min_rank = heap.iter().map(|item| item.popularity()).min().unwrap();
                    let len = heap.len();
                    heap.swap(1, len).unwrap();
                    let evicted = heap.pop_back().unwrap();
                    if !heap.is_empty() {
                        heap.sink(1).unwrap();
                    }
                    assert_eq!(evicted.popularity(), min_rank);
                }
            }
            2 => {
                // raw pop_back on an empty heap must underflow, not panic
                let was_empty = heap.is_empty();
                let result = heap.pop_back();
                assert_eq!(was_empty, result.is_err());
            }
            3 => {
                // positional read with an arbitrary (possibly invalid) index
                let pos = b % 8;
                let result = heap.get(pos);
                assert_eq!(result.is_ok(), pos >= 1 && pos <= heap.len());
            }
            4 => {
                // delete-at-position recipe: swap with last, pop, resift
                let pos = 1 + b % 5;
                if pos <= heap.len() {
                    let len = heap.len();
                    heap.swap(pos, len).unwrap();
                    heap.pop_back().unwrap();
                    if pos <= heap.len() {
                        let settled = heap.swim(pos).unwrap();
                        if settled == pos {
                            heap.sink(pos).unwrap();
                        }
                    }
                }
            }
            _ => unreachable!(),
        }

        // Recipes above always leave a consistent heap
        heap.check_invariants().unwrap();
        idx += 3;
    }
});
