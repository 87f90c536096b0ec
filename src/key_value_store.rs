//! Per-shard value store.
//!
//! Every key holds exactly one [`DataType`]. Operations that address a key
//! holding another type fail with [`StoreError::TypeMismatch`] and leave the
//! store untouched; absent keys are never an error. Collections that become
//! empty are removed immediately, and expired keys are removed the next time
//! they are touched.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;
use tokio::time::Instant;

use crate::sorted_set::SortedSet;

#[derive(Error, Debug, PartialEq, Clone)]
pub enum StoreError {
    #[error("WRONGTYPE Operation against a key holding the wrong kind of value")]
    TypeMismatch,
}

#[derive(Debug, Clone)]
pub enum DataType {
    String(Bytes),
    List(VecDeque<Bytes>),
    Set(BTreeSet<Bytes>),
    Hash(BTreeMap<Bytes, Bytes>),
    SortedSet(SortedSet),
}

impl DataType {
    /// Name reported by the TYPE command.
    pub fn type_name(&self) -> &'static str {
        match self {
            DataType::String(_) => "string",
            DataType::List(_) => "list",
            DataType::Set(_) => "set",
            DataType::Hash(_) => "hash",
            DataType::SortedSet(_) => "zset",
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            DataType::String(_) => false,
            DataType::List(list) => list.is_empty(),
            DataType::Set(set) => set.is_empty(),
            DataType::Hash(hash) => hash.is_empty(),
            DataType::SortedSet(zset) => zset.is_empty(),
        }
    }

    fn as_string(&self) -> Option<&Bytes> {
        match self {
            DataType::String(s) => Some(s),
            _ => None,
        }
    }

    fn as_list(&self) -> Option<&VecDeque<Bytes>> {
        match self {
            DataType::List(list) => Some(list),
            _ => None,
        }
    }

    fn as_list_mut(&mut self) -> Option<&mut VecDeque<Bytes>> {
        match self {
            DataType::List(list) => Some(list),
            _ => None,
        }
    }

    fn as_set(&self) -> Option<&BTreeSet<Bytes>> {
        match self {
            DataType::Set(set) => Some(set),
            _ => None,
        }
    }

    fn as_set_mut(&mut self) -> Option<&mut BTreeSet<Bytes>> {
        match self {
            DataType::Set(set) => Some(set),
            _ => None,
        }
    }

    fn as_hash(&self) -> Option<&BTreeMap<Bytes, Bytes>> {
        match self {
            DataType::Hash(hash) => Some(hash),
            _ => None,
        }
    }

    fn as_hash_mut(&mut self) -> Option<&mut BTreeMap<Bytes, Bytes>> {
        match self {
            DataType::Hash(hash) => Some(hash),
            _ => None,
        }
    }

    fn as_sorted_set(&self) -> Option<&SortedSet> {
        match self {
            DataType::SortedSet(zset) => Some(zset),
            _ => None,
        }
    }

    fn as_sorted_set_mut(&mut self) -> Option<&mut SortedSet> {
        match self {
            DataType::SortedSet(zset) => Some(zset),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Value {
    pub data: DataType,
    pub expiration: Option<Instant>,
}

impl Value {
    pub fn new(data: DataType) -> Self {
        Self {
            data,
            expiration: None,
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.expiration.is_some_and(|deadline| deadline <= now)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEnd {
    Head,
    Tail,
}

/// Time to live of a key, as answered by TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    Missing,
    Persistent,
    Remaining(Duration),
}

#[derive(Debug, Default)]
pub struct KeyValueStore {
    entries: HashMap<Bytes, Value>,
}

impl KeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stores a string, replacing whatever `key` held. Any previous deadline
    /// is replaced by `ttl`.
    pub fn set(&mut self, key: Bytes, value: Bytes, ttl: Option<Duration>) {
        let mut value = Value::new(DataType::String(value));
        value.expiration = ttl.and_then(|ttl| Instant::now().checked_add(ttl));
        self.entries.insert(key, value);
    }

    pub fn get(&mut self, key: &[u8]) -> Result<Option<Bytes>, StoreError> {
        Ok(self.read(key, DataType::as_string)?.cloned())
    }

    /// Removes `key` whatever it holds. Returns whether something was removed.
    pub fn del(&mut self, key: &[u8]) -> bool {
        self.live(key).is_some() && self.entries.remove(key).is_some()
    }

    pub fn key_type(&mut self, key: &[u8]) -> &'static str {
        self.live(key)
            .map(|value| value.data.type_name())
            .unwrap_or("none")
    }

    /// Sets a deadline `seconds` from now. A non-positive delay deletes the
    /// key right away. Returns whether the key existed.
    pub fn expire(&mut self, key: &[u8], seconds: i64) -> bool {
        let Some(value) = self.live(key) else {
            return false;
        };

        if seconds <= 0 {
            self.entries.remove(key);
            return true;
        }

        // A deadline too far away to represent is no deadline at all.
        value.expiration = Instant::now().checked_add(Duration::from_secs(seconds as u64));
        true
    }

    pub fn ttl(&mut self, key: &[u8]) -> Ttl {
        match self.live(key) {
            None => Ttl::Missing,
            Some(Value {
                expiration: None, ..
            }) => Ttl::Persistent,
            Some(Value {
                expiration: Some(deadline),
                ..
            }) => Ttl::Remaining(deadline.saturating_duration_since(Instant::now())),
        }
    }

    /// Pushes `values` one at a time onto the chosen end of the list, creating
    /// it if needed. Returns the new length.
    ///
    /// Pushing `a b c` onto the head leaves the list as `c b a`.
    pub fn push(&mut self, key: &Bytes, values: Vec<Bytes>, end: ListEnd) -> Result<usize, StoreError> {
        let list = self.write(key, DataType::as_list_mut, || {
            DataType::List(VecDeque::new())
        })?;

        for value in values {
            match end {
                ListEnd::Head => list.push_front(value),
                ListEnd::Tail => list.push_back(value),
            }
        }

        Ok(list.len())
    }

    pub fn pop(&mut self, key: &[u8], end: ListEnd) -> Result<Option<Bytes>, StoreError> {
        let popped = self.modify(key, DataType::as_list_mut, |list| match end {
            ListEnd::Head => list.pop_front(),
            ListEnd::Tail => list.pop_back(),
        })?;

        Ok(popped.flatten())
    }

    /// Pops up to `count` elements. `None` means the key does not exist.
    pub fn pop_many(
        &mut self,
        key: &[u8],
        end: ListEnd,
        count: usize,
    ) -> Result<Option<Vec<Bytes>>, StoreError> {
        self.modify(key, DataType::as_list_mut, |list| {
            let count = count.min(list.len());
            match end {
                ListEnd::Head => list.drain(..count).collect(),
                ListEnd::Tail => (0..count).filter_map(|_| list.pop_back()).collect(),
            }
        })
    }

    pub fn llen(&mut self, key: &[u8]) -> Result<usize, StoreError> {
        Ok(self.read(key, DataType::as_list)?.map_or(0, VecDeque::len))
    }

    pub fn lrange(&mut self, key: &[u8], start: i64, stop: i64) -> Result<Vec<Bytes>, StoreError> {
        let Some(list) = self.read(key, DataType::as_list)? else {
            return Ok(Vec::new());
        };

        match resolve_range_indexes(list.len(), start, stop) {
            Some((start, stop)) => Ok(list.range(start..=stop).cloned().collect()),
            None => Ok(Vec::new()),
        }
    }

    /// Returns how many members were not already present.
    pub fn sadd(&mut self, key: &Bytes, members: Vec<Bytes>) -> Result<usize, StoreError> {
        let set = self.write(key, DataType::as_set_mut, || DataType::Set(BTreeSet::new()))?;

        Ok(members
            .into_iter()
            .filter(|member| set.insert(member.clone()))
            .count())
    }

    pub fn srem(&mut self, key: &[u8], members: &[Bytes]) -> Result<usize, StoreError> {
        let removed = self.modify(key, DataType::as_set_mut, |set| {
            members.iter().filter(|member| set.remove(*member)).count()
        })?;

        Ok(removed.unwrap_or(0))
    }

    pub fn smembers(&mut self, key: &[u8]) -> Result<Vec<Bytes>, StoreError> {
        Ok(self
            .read(key, DataType::as_set)?
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default())
    }

    pub fn scard(&mut self, key: &[u8]) -> Result<usize, StoreError> {
        Ok(self.read(key, DataType::as_set)?.map_or(0, BTreeSet::len))
    }

    /// Returns how many fields were created, as opposed to overwritten.
    pub fn hset(&mut self, key: &Bytes, pairs: Vec<(Bytes, Bytes)>) -> Result<usize, StoreError> {
        let hash = self.write(key, DataType::as_hash_mut, || DataType::Hash(BTreeMap::new()))?;

        Ok(pairs
            .into_iter()
            .filter(|(field, value)| hash.insert(field.clone(), value.clone()).is_none())
            .count())
    }

    pub fn hget(&mut self, key: &[u8], field: &[u8]) -> Result<Option<Bytes>, StoreError> {
        Ok(self
            .read(key, DataType::as_hash)?
            .and_then(|hash| hash.get(field).cloned()))
    }

    pub fn hgetall(&mut self, key: &[u8]) -> Result<Vec<(Bytes, Bytes)>, StoreError> {
        Ok(self
            .read(key, DataType::as_hash)?
            .map(|hash| {
                hash.iter()
                    .map(|(field, value)| (field.clone(), value.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    pub fn hlen(&mut self, key: &[u8]) -> Result<usize, StoreError> {
        Ok(self.read(key, DataType::as_hash)?.map_or(0, BTreeMap::len))
    }

    pub fn hdel(&mut self, key: &[u8], fields: &[Bytes]) -> Result<usize, StoreError> {
        let removed = self.modify(key, DataType::as_hash_mut, |hash| {
            fields
                .iter()
                .filter(|field| hash.remove(*field).is_some())
                .count()
        })?;

        Ok(removed.unwrap_or(0))
    }

    /// Returns how many members were added, not counting score updates.
    pub fn zadd(&mut self, key: &Bytes, entries: Vec<(f64, Bytes)>) -> Result<usize, StoreError> {
        let zset = self.write(key, DataType::as_sorted_set_mut, || {
            DataType::SortedSet(SortedSet::new())
        })?;

        Ok(entries
            .into_iter()
            .filter(|(score, member)| zset.insert(member.clone(), *score))
            .count())
    }

    pub fn zrange(&mut self, key: &[u8], start: i64, stop: i64) -> Result<Vec<(Bytes, f64)>, StoreError> {
        let Some(zset) = self.read(key, DataType::as_sorted_set)? else {
            return Ok(Vec::new());
        };

        match resolve_range_indexes(zset.len(), start, stop) {
            Some((start, stop)) => Ok(zset
                .range(start, stop)
                .map(|(member, score)| (member.clone(), score))
                .collect()),
            None => Ok(Vec::new()),
        }
    }

    pub fn zrem(&mut self, key: &[u8], members: &[Bytes]) -> Result<usize, StoreError> {
        let removed = self.modify(key, DataType::as_sorted_set_mut, |zset| {
            members.iter().filter(|member| zset.remove(member)).count()
        })?;

        Ok(removed.unwrap_or(0))
    }

    pub fn zcard(&mut self, key: &[u8]) -> Result<usize, StoreError> {
        Ok(self.read(key, DataType::as_sorted_set)?.map_or(0, SortedSet::len))
    }

    pub fn zscore(&mut self, key: &[u8], member: &[u8]) -> Result<Option<f64>, StoreError> {
        Ok(self
            .read(key, DataType::as_sorted_set)?
            .and_then(|zset| zset.score(member)))
    }

    /// Looks `key` up, dropping it first if its deadline has passed.
    fn live(&mut self, key: &[u8]) -> Option<&mut Value> {
        let expired = self
            .entries
            .get(key)
            .is_some_and(|value| value.is_expired(Instant::now()));

        if expired {
            self.entries.remove(key);
            return None;
        }

        self.entries.get_mut(key)
    }

    fn read<T, F>(&mut self, key: &[u8], project: F) -> Result<Option<&T>, StoreError>
    where
        F: FnOnce(&DataType) -> Option<&T>,
    {
        match self.live(key) {
            Some(value) => project(&value.data)
                .map(Some)
                .ok_or(StoreError::TypeMismatch),
            None => Ok(None),
        }
    }

    /// Projects the collection at `key`, creating it with `create` if absent.
    fn write<T, F, C>(&mut self, key: &Bytes, project: F, create: C) -> Result<&mut T, StoreError>
    where
        F: FnOnce(&mut DataType) -> Option<&mut T>,
        C: FnOnce() -> DataType,
    {
        self.live(key);

        let value = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| Value::new(create()));

        project(&mut value.data).ok_or(StoreError::TypeMismatch)
    }

    /// Applies `operation` to an existing collection and deletes the key if
    /// that left the collection empty. `None` means the key does not exist.
    fn modify<T, F, O, R>(&mut self, key: &[u8], project: F, operation: O) -> Result<Option<R>, StoreError>
    where
        F: FnOnce(&mut DataType) -> Option<&mut T>,
        O: FnOnce(&mut T) -> R,
    {
        let Some(value) = self.live(key) else {
            return Ok(None);
        };

        let collection = project(&mut value.data).ok_or(StoreError::TypeMismatch)?;
        let result = operation(collection);

        if value.data.is_empty() {
            self.entries.remove(key);
        }

        Ok(Some(result))
    }
}

/// Normalizes an inclusive `start..=stop` range over a collection of `len`
/// elements.
///
/// Negative indexes count from the end (`-1` is the last element). The range
/// is clamped to the collection; `None` means it selects nothing.
///
/// ```text
/// // For a collection of length 5:
/// // resolve_range_indexes(5, 0, 2)   -> Some((0, 2))
/// // resolve_range_indexes(5, -2, -1) -> Some((3, 4))
/// // resolve_range_indexes(5, 5, 10)  -> None
/// ```
pub fn resolve_range_indexes(len: usize, start: i64, stop: i64) -> Option<(usize, usize)> {
    let len = len as i64;

    if len == 0 {
        return None;
    }

    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };

    if start >= len || stop < 0 || start > stop {
        return None;
    }

    Some((start as usize, stop as usize))
}
