//! Persistent goal sequences.
//!
//! A [`Goals`] value is an immutable singly-linked list of `(identifier, goal)` pairs. The
//! head is the goal in focus. Consing shares the tail, so tactics can derive new sequences
//! from old ones in O(1) without copying.
use std::sync::Arc;

use hykernel::name::Name;

use crate::{
    error::{TacticError, TacticResult},
    goal::Goal,
};

struct GoalsNode {
    id: Name,
    goal: Goal,
    tail: Goals,
    len: usize,
}

/// Immutable ordered list of open goals.
#[derive(Clone, Default)]
pub struct Goals {
    head: Option<Arc<GoalsNode>>,
}

impl Goals {
    /// The empty sequence.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A new sequence with `(id, goal)` in front of `rest`.
    pub fn cons<N: Into<Name>>(id: N, goal: Goal, rest: &Goals) -> Self {
        Self {
            head: Some(Arc::new(GoalsNode {
                id: id.into(),
                goal,
                len: rest.len() + 1,
                tail: rest.clone(),
            })),
        }
    }

    pub fn singleton<N: Into<Name>>(id: N, goal: Goal) -> Self {
        Self::cons(id, goal, &Goals::empty())
    }

    /// The goal in focus.
    pub fn head(&self) -> TacticResult<(&Name, &Goal)> {
        self.head
            .as_deref()
            .map(|n| (&n.id, &n.goal))
            .ok_or(TacticError::EmptyGoalSequence)
    }

    /// Everything after the head.
    pub fn tail(&self) -> TacticResult<Goals> {
        self.head
            .as_deref()
            .map(|n| n.tail.clone())
            .ok_or(TacticError::EmptyGoalSequence)
    }

    /// O(1).
    pub fn len(&self) -> usize {
        self.head.as_deref().map_or(0, |n| n.len)
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn iter(&self) -> GoalsIter<'_> {
        GoalsIter {
            next: self.head.as_deref(),
        }
    }

    /// First goal registered under `id`.
    pub fn find(&self, id: &Name) -> Option<&Goal> {
        self.iter().find(|(n, _)| *n == id).map(|(_, g)| g)
    }

    pub fn ids(&self) -> impl Iterator<Item = &Name> {
        self.iter().map(|(n, _)| n)
    }
}

impl Drop for Goals {
    // Unlink iteratively so dropping a long sequence does not recurse once per node.
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(mut node) => next = node.tail.head.take(),
                Err(_) => break,
            }
        }
    }
}

/// Iterator over a [`Goals`] sequence, in list order.
pub struct GoalsIter<'a> {
    next: Option<&'a GoalsNode>,
}

impl<'a> Iterator for GoalsIter<'a> {
    type Item = (&'a Name, &'a Goal);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.tail.head.as_deref();
        Some((&node.id, &node.goal))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.next.map_or(0, |n| n.len);
        (len, Some(len))
    }
}

impl ExactSizeIterator for GoalsIter<'_> {}

impl<'a> IntoIterator for &'a Goals {
    type Item = (&'a Name, &'a Goal);
    type IntoIter = GoalsIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<N: Into<Name>> FromIterator<(N, Goal)> for Goals {
    /// Keeps the iteration order: the first item becomes the head.
    fn from_iter<I: IntoIterator<Item = (N, Goal)>>(iter: I) -> Self {
        let items: Vec<(N, Goal)> = iter.into_iter().collect();
        items
            .into_iter()
            .rev()
            .fold(Goals::empty(), |rest, (id, goal)| Goals::cons(id, goal, &rest))
    }
}

impl PartialEq for Goals {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for Goals {}

impl std::fmt::Debug for Goals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
