//! Faster (but not DoS-resistant) hashmap
use farmhash;
use std::collections::HashMap;
use std::hash::{Hash, Hasher, BuildHasherDefault};

/// Chain farmhash over every write
///
/// Farmhash isn't a streaming hash, so each chunk is hashed with the running state as its seed.
/// String keys arrive as two writes (bytes, then a 0xff terminator) and a pair of strings as
/// four, so keeping only the last chunk would collapse every key onto one bucket.
pub struct FarmChain (u64);

impl Default for FarmChain {
    #[inline]
    fn default() -> FarmChain { FarmChain(0) }
}

impl Hasher for FarmChain {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.0 = farmhash::hash64_with_seed(bytes, self.0);
    }
}

pub type Farm = BuildHasherDefault<FarmChain>;
pub type FarmMap<X, Y> = HashMap<X, Y, Farm>;

pub fn new_farm<X: Hash+Eq, Y>() -> FarmMap<X, Y> {
    Default::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::BuildHasher;

    fn hash_of<T: Hash>(t: &T) -> u64 {
        let mut h = Farm::default().build_hasher();
        t.hash(&mut h);
        h.finish()
    }

    #[test]
    fn distinct_strings_hash_apart() {
        assert_ne!(hash_of(&"germany"), hash_of(&"france"));
        assert_ne!(hash_of(&("a", "bc")), hash_of(&("ab", "c")));
    }

    #[test]
    fn hashing_is_reproducible() {
        assert_eq!(hash_of(&"germany"), hash_of(&"germany".to_string()));
    }

    #[test]
    fn farm_map_counts() {
        let mut m: FarmMap<String, usize> = new_farm();
        *m.entry("x".into()).or_insert(0) += 1;
        *m.entry("x".into()).or_insert(0) += 1;
        assert_eq!(m["x"], 2);
    }
}
