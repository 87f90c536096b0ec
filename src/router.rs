//! Key ownership: which shard holds which key.

use std::collections::BTreeMap;

const VIRTUAL_NODES_PER_SHARD: usize = 100;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Consistent hash ring mapping keys to shard indexes.
///
/// Every shard places a fixed number of virtual nodes on the ring. A key
/// belongs to the first node at or after its own hash, wrapping around to
/// the start. Two routers built for the same shard count always agree.
#[derive(Debug, Clone)]
pub struct ShardRouter {
    ring: BTreeMap<u64, usize>,
    shards: usize,
}

impl ShardRouter {
    pub fn new(shards: usize) -> Self {
        let mut ring = BTreeMap::new();

        for shard in 0..shards {
            for node in 0..VIRTUAL_NODES_PER_SHARD {
                let label = format!("SHARD-{}-VN-{}", shard, node);
                ring.insert(hash(label.as_bytes()), shard);
            }
        }

        Self { ring, shards }
    }

    pub fn owner_of(&self, key: &[u8]) -> usize {
        if self.shards <= 1 {
            return 0;
        }

        let point = hash(key);

        self.ring
            .range(point..)
            .next()
            .or_else(|| self.ring.iter().next())
            .map(|(_, shard)| *shard)
            .unwrap_or(0)
    }
}

/// 64-bit FNV-1a, followed by the SplitMix64 finaliser to spread nearby
/// inputs across the whole ring.
fn hash(data: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for &byte in data {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }

    hash ^= hash >> 30;
    hash = hash.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    hash ^= hash >> 27;
    hash = hash.wrapping_mul(0x94d0_49bb_1331_11eb);
    hash ^ (hash >> 31)
}
