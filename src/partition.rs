//! # Index Collections and Partitions
//!
//! An [`IndexCollection`] is a sorted set of non-negative positions, as
//! returned by sampling or grouping code. An [`IndexPartition`] groups
//! positions into disjoint parts keyed by an identifier, as produced by
//! clustering or by splitting a categorical variable into its levels.
//!
//! Partitions are compared in one of three [`PartitionMode`]s:
//! - `Ordered`: identifier sequences and parts must match position by position
//! - `SameItems`: the same `(identifier, part)` pairs, in any order
//! - `SameGroups`: the same multiset of parts, identifiers ignored

use crate::error::{both_present, ComparisonError, Result};
use crate::matcher::{check_same_items, check_sequence};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::ops::Range;

/// A sorted, duplicate-free collection of indexes.
///
/// Deserialization rejects index lists that are unsorted or repeat an index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawIndexCollection")]
pub struct IndexCollection {
    indexes: Vec<usize>,
}

#[derive(Deserialize)]
struct RawIndexCollection {
    indexes: Vec<usize>,
}

impl TryFrom<RawIndexCollection> for IndexCollection {
    type Error = ComparisonError;

    fn try_from(raw: RawIndexCollection) -> Result<Self> {
        if let Some(pos) = raw.indexes.windows(2).position(|w| w[0] >= w[1]) {
            return Err(ComparisonError::InvalidInput(format!(
                "indexes must be strictly increasing, found {} before {}",
                raw.indexes[pos],
                raw.indexes[pos + 1]
            )));
        }
        Ok(Self { indexes: raw.indexes })
    }
}

impl IndexCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// The collection `range.start..range.end`.
    pub fn from_range(range: Range<usize>) -> Self {
        Self {
            indexes: range.collect(),
        }
    }

    /// Number of indexes.
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    /// Whether the collection holds no index.
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// Whether `index` belongs to the collection.
    pub fn contains(&self, index: usize) -> bool {
        self.indexes.binary_search(&index).is_ok()
    }

    /// Add an index, keeping the collection sorted. Returns false if it was
    /// already present.
    pub fn insert(&mut self, index: usize) -> bool {
        match self.indexes.binary_search(&index) {
            Ok(_) => false,
            Err(pos) => {
                self.indexes.insert(pos, index);
                true
            }
        }
    }

    /// Indexes in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indexes.iter().copied()
    }

    /// Indexes as a sorted slice.
    pub fn as_slice(&self) -> &[usize] {
        &self.indexes
    }

    fn overlaps(&self, other: &IndexCollection) -> bool {
        self.iter().any(|i| other.contains(i))
    }
}

impl FromIterator<usize> for IndexCollection {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut indexes: Vec<usize> = iter.into_iter().collect();
        indexes.sort_unstable();
        indexes.dedup();
        Self { indexes }
    }
}

/// How two partitions or lists of index collections are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartitionMode {
    /// Identifiers and parts must match position by position
    #[default]
    Ordered,

    /// The same identifier/part pairs, in any order
    SameItems,

    /// The same multiset of parts; identifiers are not compared
    SameGroups,
}

/// Disjoint index collections keyed by identifier, in insertion order.
///
/// Deserialization goes through [`IndexPartition::insert`], so duplicate
/// identifiers and overlapping parts are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawIndexPartition<Id>",
    bound(deserialize = "Id: Deserialize<'de> + PartialEq + Clone + Debug")
)]
pub struct IndexPartition<Id> {
    parts: Vec<(Id, IndexCollection)>,
}

#[derive(Deserialize)]
struct RawIndexPartition<Id> {
    parts: Vec<(Id, IndexCollection)>,
}

impl<Id: PartialEq + Clone + Debug> TryFrom<RawIndexPartition<Id>> for IndexPartition<Id> {
    type Error = ComparisonError;

    fn try_from(raw: RawIndexPartition<Id>) -> Result<Self> {
        let mut partition = Self::new();
        for (id, part) in raw.parts {
            partition.insert(id, part)?;
        }
        Ok(partition)
    }
}

impl<Id> Default for IndexPartition<Id> {
    fn default() -> Self {
        Self { parts: Vec::new() }
    }
}

impl<Id: PartialEq + Clone + Debug> IndexPartition<Id> {
    /// Create an empty partition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Group positions by label.
    ///
    /// Position `i` goes to the part of `labels[i]`; identifiers appear in
    /// order of first occurrence.
    pub fn from_labels(labels: &[Id]) -> Self {
        let mut parts: Vec<(Id, IndexCollection)> = Vec::new();
        for (i, label) in labels.iter().enumerate() {
            match parts.iter_mut().find(|(id, _)| id == label) {
                Some((_, part)) => {
                    part.insert(i);
                }
                None => parts.push((label.clone(), IndexCollection::from_iter([i]))),
            }
        }
        Self { parts }
    }

    /// Add a part.
    ///
    /// # Errors
    ///
    /// * `ComparisonError::InvalidInput` if `id` is already used or `part`
    ///   shares an index with an existing part
    pub fn insert(&mut self, id: Id, part: IndexCollection) -> Result<()> {
        if self.parts.iter().any(|(existing, _)| *existing == id) {
            return Err(ComparisonError::InvalidInput(format!(
                "identifier {:?} already has a part",
                id
            )));
        }
        if let Some((other, _)) = self.parts.iter().find(|(_, p)| p.overlaps(&part)) {
            return Err(ComparisonError::InvalidInput(format!(
                "part {:?} overlaps part {:?}",
                id, other
            )));
        }
        self.parts.push((id, part));
        Ok(())
    }

    /// The part of `id`, if any.
    pub fn get(&self, id: &Id) -> Option<&IndexCollection> {
        self.parts.iter().find(|(i, _)| i == id).map(|(_, p)| p)
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the partition has no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Identifiers in order.
    pub fn identifiers(&self) -> Vec<Id> {
        self.parts.iter().map(|(id, _)| id.clone()).collect()
    }

    /// Parts in identifier order.
    pub fn parts(&self) -> Vec<&IndexCollection> {
        self.parts.iter().map(|(_, p)| p).collect()
    }

    /// `(identifier, part)` pairs in order.
    pub fn entries(&self) -> &[(Id, IndexCollection)] {
        &self.parts
    }
}

/// Check two optional index collections for equality.
pub fn check_index_collections(
    expected: Option<&IndexCollection>,
    actual: Option<&IndexCollection>,
) -> Result<()> {
    let Some((expected, actual)) = both_present("index collection", expected, actual)? else {
        return Ok(());
    };
    if expected.len() != actual.len() {
        return Err(ComparisonError::LengthMismatch {
            kind: "index collection",
            expected: expected.len(),
            actual: actual.len(),
        });
    }
    match expected.iter().zip(actual.iter()).position(|(e, a)| e != a) {
        None => Ok(()),
        Some(k) => {
            tracing::debug!(position = k, "index collection mismatch");
            Err(ComparisonError::value_mismatch(
                format!("[{}]", k),
                expected.as_slice()[k],
                actual.as_slice()[k],
                0.0,
            ))
        }
    }
}

/// Check two optional lists of index collections.
///
/// `Ordered` compares the lists position by position; the other modes
/// accept any order.
pub fn check_index_collection_lists(
    expected: Option<&[IndexCollection]>,
    actual: Option<&[IndexCollection]>,
    mode: PartitionMode,
) -> Result<()> {
    match mode {
        PartitionMode::Ordered => check_sequence(expected, actual, |e, a| e == a),
        PartitionMode::SameItems | PartitionMode::SameGroups => {
            check_same_items(expected, actual, |e, a| e == a)
        }
    }
}

/// Check two optional partitions under `mode`.
///
/// # Errors
///
/// * `ComparisonError::NullMismatch` if exactly one side is absent
/// * `ComparisonError::LengthMismatch` if the part counts differ
/// * `ComparisonError::NameMismatch` if identifiers differ (`Ordered`)
/// * matcher errors for the unordered modes
pub fn check_partitions<Id: PartialEq + Clone + Debug>(
    expected: Option<&IndexPartition<Id>>,
    actual: Option<&IndexPartition<Id>>,
    mode: PartitionMode,
) -> Result<()> {
    let Some((expected, actual)) = both_present("partition", expected, actual)? else {
        return Ok(());
    };
    if expected.len() != actual.len() {
        return Err(ComparisonError::LengthMismatch {
            kind: "partition",
            expected: expected.len(),
            actual: actual.len(),
        });
    }

    match mode {
        PartitionMode::Ordered => {
            for (k, ((id_e, part_e), (id_a, part_a))) in
                expected.entries().iter().zip(actual.entries()).enumerate()
            {
                if id_e != id_a {
                    return Err(ComparisonError::NameMismatch {
                        what: format!("partition identifiers at position {}", k),
                        expected: Some(format!("{:?}", id_e)),
                        actual: Some(format!("{:?}", id_a)),
                    });
                }
                check_index_collections(Some(part_e), Some(part_a))
                    .map_err(|err| err.within(&format!("part {:?} ", id_e)))?;
            }
            Ok(())
        }
        PartitionMode::SameItems => {
            check_same_items(Some(expected.entries()), Some(actual.entries()), |e, a| e == a)
        }
        PartitionMode::SameGroups => {
            check_same_items(Some(&expected.parts()[..]), Some(&actual.parts()[..]), |e, a| e == a)
        }
    }
}
