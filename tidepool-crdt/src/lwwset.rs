use serde::{Deserialize, Serialize};

use crate::timestamp::WallTimestamp;

#[derive(Debug, thiserror::Error)]
#[error("The empty value cannot be stored in or looked up from the set.")]
pub struct EmptyValue;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A single journal record: the value a replica touched and when it did so.
pub struct Entry {
    pub value: String,
    pub timestamp: WallTimestamp,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A last-writer-wins element set.
///
/// The set keeps two insertion-ordered journals, one for additions and one
/// for removals. A value is a member if it appears in the add journal and
/// either has no removal recorded against it, or its addition is strictly
/// later than the latest removal. Exact timestamp ties go to the removal.
///
/// Membership is resolved lazily: every read or mutation first normalizes
/// the set, evicting values whose addition has lost to a removal from *both*
/// journals. Dropping the stale tombstone as well is what allows a removed
/// value to be added again later and immediately count as a member.
///
/// Two replicas that exchange snapshots converge because [`LwwSet::merge`]
/// is a commutative, associative and idempotent union: entries keep the
/// timestamp their author recorded, and when both sides carry the same value
/// in the same journal the later stamp wins.
///
/// Note that the tie-break uses the timestamp alone, with no per-replica
/// discriminator. Two replicas issuing conflicting operations within the
/// same clock tick resolve on whichever side produced the later nanosecond
/// reading, which is inherent to a timestamp-only LWW design.
///
/// ## Example
/// ```rust
/// use tidepool_crdt::{LwwSet, WallTimestamp};
///
/// let mut replica_a = LwwSet::default();
/// let mut replica_b = LwwSet::default();
///
/// // Two replicas record conflicting operations against the same value.
/// replica_a.add_at("apple", WallTimestamp::new(10)).unwrap();
/// replica_b.remove_at("apple", WallTimestamp::new(20)).unwrap();
///
/// // Merging in either order converges: the later removal wins.
/// replica_a.merge(replica_b.clone());
/// replica_b.merge(replica_a.clone());
///
/// assert!(!replica_a.lookup("apple").unwrap());
/// assert!(!replica_b.lookup("apple").unwrap());
/// ```
pub struct LwwSet {
    add: Vec<Entry>,
    remove: Vec<Entry>,
}

impl LwwSet {
    /// Creates a new, empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value` as added at the current wall-clock time.
    ///
    /// Adding a value that is already present in the add journal is a no-op
    /// and does *not* refresh its timestamp. The empty value is rejected and
    /// the set is left untouched.
    pub fn add(&mut self, value: &str) -> Result<(), EmptyValue> {
        self.add_at(value, WallTimestamp::now())
    }

    /// Records `value` as added at an explicit instant.
    pub fn add_at(&mut self, value: &str, ts: WallTimestamp) -> Result<(), EmptyValue> {
        if value.is_empty() {
            return Err(EmptyValue);
        }

        self.normalize();

        if !is_present(&self.add, value) {
            self.add.push(Entry {
                value: value.to_string(),
                timestamp: ts,
            });
        }

        Ok(())
    }

    /// Records `value` as removed at the current wall-clock time.
    ///
    /// Symmetric to [`LwwSet::add`]: repeated removals are a no-op, the
    /// empty value is rejected.
    pub fn remove(&mut self, value: &str) -> Result<(), EmptyValue> {
        self.remove_at(value, WallTimestamp::now())
    }

    /// Records `value` as removed at an explicit instant.
    pub fn remove_at(
        &mut self,
        value: &str,
        ts: WallTimestamp,
    ) -> Result<(), EmptyValue> {
        if value.is_empty() {
            return Err(EmptyValue);
        }

        self.normalize();

        if !is_present(&self.remove, value) {
            self.remove.push(Entry {
                value: value.to_string(),
                timestamp: ts,
            });
        }

        Ok(())
    }

    /// The current members of the set, in add-journal insertion order.
    pub fn list(&mut self) -> Vec<String> {
        self.normalize();
        self.add.iter().map(|entry| entry.value.clone()).collect()
    }

    /// Whether `value` is currently a member of the set.
    pub fn lookup(&mut self, value: &str) -> Result<bool, EmptyValue> {
        if value.is_empty() {
            return Err(EmptyValue);
        }

        self.normalize();

        Ok(is_present(&self.add, value))
    }

    /// Folds another replica's snapshot into this set.
    ///
    /// Every entry keeps the timestamp its author recorded; when both sides
    /// carry the same value within a journal, the later stamp wins. Empty
    /// values smuggled in by a malformed snapshot are skipped.
    pub fn merge(&mut self, other: LwwSet) {
        for entry in other.add {
            if entry.value.is_empty() {
                continue;
            }
            fold(&mut self.add, entry);
        }

        for entry in other.remove {
            if entry.value.is_empty() {
                continue;
            }
            fold(&mut self.remove, entry);
        }

        self.normalize();
    }

    /// Merges any number of snapshots into a single set.
    pub fn merge_all(sets: impl IntoIterator<Item = LwwSet>) -> LwwSet {
        let mut merged = LwwSet::default();
        for set in sets {
            merged.merge(set);
        }
        merged
    }

    /// Wipes both journals.
    ///
    /// This is a plain reset, not a replicated removal: a cleared set simply
    /// forgets its history. Used to reset state between tests and on
    /// reinitialization.
    pub fn clear(&mut self) {
        self.add.clear();
        self.remove.clear();
    }

    /// Resolves the membership rule over the add journal, evicting every
    /// value whose addition has lost to a removal from both journals.
    fn normalize(&mut self) {
        let mut evicted = Vec::new();

        for entry in &self.add {
            if let Some(removed_at) = latest_timestamp(&self.remove, &entry.value) {
                // The addition must be strictly later to keep membership.
                if entry.timestamp <= removed_at {
                    evicted.push(entry.value.clone());
                }
            }
        }

        for value in evicted {
            delete(&mut self.add, &value);
            delete(&mut self.remove, &value);
        }
    }
}

/// Upserts an entry into a journal, keeping the later timestamp when the
/// value is already present.
fn fold(journal: &mut Vec<Entry>, entry: Entry) {
    match journal.iter_mut().find(|e| e.value == entry.value) {
        Some(existing) => {
            if existing.timestamp < entry.timestamp {
                existing.timestamp = entry.timestamp;
            }
        },
        None => journal.push(entry),
    }
}

fn is_present(journal: &[Entry], value: &str) -> bool {
    journal.iter().any(|entry| entry.value == value)
}

fn latest_timestamp(journal: &[Entry], value: &str) -> Option<WallTimestamp> {
    journal
        .iter()
        .filter(|entry| entry.value == value)
        .map(|entry| entry.timestamp)
        .max()
}

fn delete(journal: &mut Vec<Entry>, value: &str) {
    journal.retain(|entry| entry.value != value);
}
