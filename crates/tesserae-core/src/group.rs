//! Disjoint-set partition of pieces into connected groups.
//!
//! Groups only ever merge. Each piece points directly at its group's root, and
//! every root keeps the list of its members, so lookups are O(1) and a merge
//! only touches the members of the smaller group.

use std::collections::HashMap;

use crate::{GroupId, PieceId};

/// Result of merging two groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merge {
    /// Root of the combined group.
    pub root: PieceId,
    /// Pieces that moved from the absorbed group into `root`'s group.
    pub absorbed: Vec<PieceId>,
}

/// A partition of `0..len` piece identities into groups.
///
/// # Examples
///
/// ```
/// use tesserae_core::{GroupSets, PieceId};
///
/// let mut groups = GroupSets::singletons(4);
/// groups.union(PieceId(0), PieceId(1));
/// groups.union(PieceId(3), PieceId(1));
/// assert!(groups.same_group(PieceId(0), PieceId(3)));
/// assert!(!groups.same_group(PieceId(0), PieceId(2)));
/// assert_eq!(groups.group_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSets {
    root: Vec<PieceId>,
    members: Vec<Vec<PieceId>>,
    group_count: usize,
}

impl GroupSets {
    /// Creates a partition where every piece is alone in its group.
    #[must_use]
    pub fn singletons(len: usize) -> Self {
        let ids: Vec<_> = (0..len).map(PieceId::from_index).collect();
        Self {
            members: ids.iter().map(|&id| vec![id]).collect(),
            root: ids,
            group_count: len,
        }
    }

    /// Creates a partition from per-piece labels, indexed by piece identity.
    ///
    /// Pieces sharing a label end up in the same group; the label values
    /// themselves are not kept.
    #[must_use]
    pub fn from_labels(labels: &[GroupId]) -> Self {
        let mut sets = Self::singletons(labels.len());
        let mut first_with_label = HashMap::new();
        for (index, label) in labels.iter().enumerate() {
            let id = PieceId::from_index(index);
            match first_with_label.get(label) {
                Some(&first) => {
                    sets.union(first, id);
                }
                None => {
                    first_with_label.insert(*label, id);
                }
            }
        }
        sets
    }

    /// Returns the number of pieces in the partition.
    #[must_use]
    pub fn len(&self) -> usize {
        self.root.len()
    }

    /// Returns `true` if the partition holds no pieces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Returns the number of distinct groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Returns the root piece of the group containing `id`.
    #[must_use]
    pub fn root(&self, id: PieceId) -> PieceId {
        self.root[id.index()]
    }

    /// Returns the label of the group containing `id`.
    #[must_use]
    pub fn label(&self, id: PieceId) -> GroupId {
        self.root(id).into()
    }

    /// Returns every member of the group containing `id`, root first.
    #[must_use]
    pub fn members(&self, id: PieceId) -> &[PieceId] {
        &self.members[self.root(id).index()]
    }

    /// Returns `true` if both pieces belong to the same group.
    #[must_use]
    pub fn same_group(&self, a: PieceId, b: PieceId) -> bool {
        self.root(a) == self.root(b)
    }

    /// Iterates over the root of every group.
    pub fn roots(&self) -> impl Iterator<Item = PieceId> + '_ {
        self.root
            .iter()
            .enumerate()
            .filter(|&(index, root)| root.index() == index)
            .map(|(_, &root)| root)
    }

    /// Merges the groups containing `a` and `b`.
    ///
    /// The larger group absorbs the smaller one; ties keep `a`'s root.
    /// Returns `None` if both already share a group.
    pub fn union(&mut self, a: PieceId, b: PieceId) -> Option<Merge> {
        let (mut keep, mut other) = (self.root(a), self.root(b));
        if keep == other {
            return None;
        }
        if self.members[keep.index()].len() < self.members[other.index()].len() {
            (keep, other) = (other, keep);
        }
        let absorbed = std::mem::take(&mut self.members[other.index()]);
        for &id in &absorbed {
            self.root[id.index()] = keep;
        }
        self.members[keep.index()].extend_from_slice(&absorbed);
        self.group_count -= 1;
        Some(Merge {
            root: keep,
            absorbed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_absorbs_smaller_group() {
        let mut sets = GroupSets::singletons(5);
        sets.union(PieceId(3), PieceId(4));
        let merge = sets.union(PieceId(0), PieceId(4)).unwrap();
        assert_eq!(merge.root, PieceId(3));
        assert_eq!(merge.absorbed, vec![PieceId(0)]);
        assert_eq!(sets.members(PieceId(0)), &[PieceId(3), PieceId(4), PieceId(0)]);
        assert_eq!(sets.label(PieceId(4)), GroupId(3));
    }

    #[test]
    fn test_union_of_same_group_is_none() {
        let mut sets = GroupSets::singletons(3);
        sets.union(PieceId(0), PieceId(1));
        assert_eq!(sets.union(PieceId(1), PieceId(0)), None);
        assert_eq!(sets.group_count(), 2);
    }

    #[test]
    fn test_from_labels() {
        let labels = [GroupId(7), GroupId(1), GroupId(7), GroupId(9), GroupId(1)];
        let sets = GroupSets::from_labels(&labels);
        assert_eq!(sets.group_count(), 3);
        assert!(sets.same_group(PieceId(0), PieceId(2)));
        assert!(sets.same_group(PieceId(1), PieceId(4)));
        assert!(!sets.same_group(PieceId(0), PieceId(3)));
        let mut roots: Vec<_> = sets.roots().collect();
        roots.sort();
        assert_eq!(roots, vec![PieceId(0), PieceId(1), PieceId(3)]);
    }
}
