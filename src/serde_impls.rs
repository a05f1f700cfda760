use serde::de::{Error, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use std::fmt::{self, Formatter};
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;

use crate::probe::{ProbeCapacity, ProbeStrategy};
use crate::HashTable;

struct MapVisitor<K, V, P, S> {
    _marker: PhantomData<HashTable<K, V, P, S>>,
}

impl<K, V, P, S> Serialize for HashTable<K, V, P, S>
where
    K: Serialize,
    V: Serialize,
    P: ProbeCapacity,
{
    fn serialize<Sr>(&self, serializer: Sr) -> Result<Sr::Ok, Sr::Error>
    where
        Sr: Serializer,
    {
        serializer.collect_map(self)
    }
}

impl<'de, K, V, P, S> Deserialize<'de> for HashTable<K, V, P, S>
where
    K: Deserialize<'de> + Hash + Eq,
    V: Deserialize<'de>,
    P: ProbeStrategy<K> + Default,
    S: Default + BuildHasher,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(MapVisitor::new())
    }
}

impl<K, V, P, S> MapVisitor<K, V, P, S> {
    pub(crate) fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<'de, K, V, P, S> Visitor<'de> for MapVisitor<K, V, P, S>
where
    K: Deserialize<'de> + Hash + Eq,
    V: Deserialize<'de>,
    P: ProbeStrategy<K> + Default,
    S: Default + BuildHasher,
{
    type Value = HashTable<K, V, P, S>;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "a map")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut values = match access.size_hint() {
            // Size the table so the entries fit without resizing.
            Some(size) => {
                let capacity = (size as f64 / crate::raw::DEFAULT_LOAD_FACTOR) as usize + 1;
                HashTable::with_capacity_and_hasher(capacity, S::default()).map_err(M::Error::custom)?
            }
            None => HashTable::default(),
        };

        while let Some((key, value)) = access.next_entry()? {
            values.insert(key, value);
        }

        Ok(values)
    }
}

#[cfg(test)]
mod test {
    use crate::{DoubleHashingHashTable, LinearProbingHashTable, QuadraticProbingHashTable};

    #[test]
    fn test_map() {
        let mut map: LinearProbingHashTable<u8, u8> = LinearProbingHashTable::new();

        map.insert(0, 4);
        map.insert(1, 3);
        map.insert(2, 2);
        map.insert(3, 1);
        map.insert(4, 0);

        let serialized = serde_json::to_string(&map).unwrap();
        let deserialized: LinearProbingHashTable<u8, u8> = serde_json::from_str(&serialized).unwrap();

        assert_eq!(map, deserialized);
    }

    #[test]
    fn test_across_strategies() {
        let mut map: QuadraticProbingHashTable<String, u32> = QuadraticProbingHashTable::new();
        for i in 0..50 {
            map.insert(format!("key{i}"), i);
        }
        map.remove("key7");

        let serialized = serde_json::to_string(&map).unwrap();
        let mut deserialized: DoubleHashingHashTable<String, u32> =
            serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized.len(), 49);
        assert_eq!(deserialized.get("key7"), None);
        for i in (0..50).filter(|&i| i != 7) {
            assert_eq!(deserialized.get(format!("key{i}").as_str()), Some(&i));
        }
    }

    #[test]
    fn test_empty() {
        let deserialized: LinearProbingHashTable<u8, u8> = serde_json::from_str("{}").unwrap();
        assert!(deserialized.is_empty());
        assert_eq!(deserialized.capacity(), 7);
    }
}
