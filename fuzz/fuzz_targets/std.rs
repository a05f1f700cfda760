#![no_main]

use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use probemap::{
    DoubleHashing, HashTable, LinearProbing, ProbeCapacity, ProbeStrategy, QuadraticProbing,
};
use std::collections::HashMap as StdHashMap;

#[derive(Debug, Clone, Copy, Arbitrary)]
enum Operation<K, V> {
    Insert(K, V),
    Remove(K),
    Get(K),
    Peek(K),
    Contains(K),
    Update(K, V),
    Clear,
    Len,
    IsEmpty,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    capacity: u8,
    load_factor: u8,
    // Small keys keep the probe sequences crowded.
    operations: Vec<Operation<u8, u32>>,
}

fn fuzz_table<P>(input: &FuzzInput)
where
    P: ProbeStrategy<u8> + Default,
{
    // Load factors between 0.1 and 2.5.
    let load_factor = f64::from(input.load_factor % 25 + 1) / 10.0;
    let capacity = usize::from(input.capacity).max(1);

    let mut std_map = StdHashMap::new();
    let mut table = HashTable::<u8, u32, P>::with_capacity_and_load_factor(capacity, load_factor)
        .expect("valid configuration");

    for &op in &input.operations {
        match op {
            Operation::Insert(k, v) => {
                assert_eq!(std_map.insert(k, v), table.insert(k, v));
            }
            Operation::Remove(k) => {
                assert_eq!(std_map.remove(&k), table.remove(&k));
            }
            Operation::Get(k) => {
                assert_eq!(std_map.get(&k), table.get(&k));
            }
            Operation::Peek(k) => {
                assert_eq!(std_map.get(&k), table.peek(&k));
            }
            Operation::Contains(k) => {
                assert_eq!(std_map.contains_key(&k), table.contains_key(&k));
            }
            Operation::Update(k, v) => {
                let std_result = std_map.get_mut(&k).map(|e| {
                    *e = e.wrapping_add(v);
                    *e
                });
                let table_result = table.get_mut(&k).map(|e| {
                    *e = e.wrapping_add(v);
                    *e
                });
                assert_eq!(std_result, table_result);
            }
            Operation::Clear => {
                std_map.clear();
                table.clear();
            }
            Operation::Len => {
                assert_eq!(std_map.len(), table.len());
            }
            Operation::IsEmpty => {
                assert_eq!(std_map.is_empty(), table.is_empty());
            }
        }

        assert!(table.used_buckets() >= table.len());
        assert!(table.used_buckets() <= table.capacity());
    }

    // Final consistency checks
    for (k, v) in std_map.iter() {
        assert_eq!(Some(v), table.peek(k));
    }
    assert_eq!(std_map.len(), table.len());
    assert_eq!(std_map.len(), table.iter().count());
    assert_eq!(
        table.capacity(),
        table.probing().adjust_capacity(table.capacity())
    );
}

fuzz_target!(|data: FuzzInput| {
    fuzz_table::<LinearProbing>(&data);
    fuzz_table::<QuadraticProbing>(&data);
    fuzz_table::<DoubleHashing>(&data);
});
