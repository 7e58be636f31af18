//! Hierarchical global identifiers.
//!
//! A [`Name`] is a dot-separated path such as `nat.add` or `main`. Components are either
//! strings or numbers. A leading numeric component prints as `%N`, any later one as
//! `prefix.N`.
use std::sync::Arc;

/// A single component of a [`Name`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NamePart {
    // Boxed to keep the enum small
    Str(Box<str>),

    /// Generated component, used for fresh names
    Num(u64),
}

/// Hierarchical identifier shared by reference.
///
/// Cloning is O(1). The empty name is the anonymous name and prints as `[anonymous]`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Name {
    parts: Arc<[NamePart]>,
}

impl Name {
    /// The anonymous (empty) name.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_anonymous(&self) -> bool {
        self.parts.is_empty()
    }

    /// Extend this name with a string component.
    pub fn append_str(&self, s: &str) -> Self {
        self.append(NamePart::Str(s.into()))
    }

    /// Extend this name with a numeric component.
    pub fn append_num(&self, n: u64) -> Self {
        self.append(NamePart::Num(n))
    }

    fn append(&self, part: NamePart) -> Self {
        let mut parts = self.parts.to_vec();
        parts.push(part);
        Self {
            parts: parts.into(),
        }
    }

    pub fn parts(&self) -> &[NamePart] {
        &self.parts
    }

    /// The last component, if any.
    pub fn last(&self) -> Option<&NamePart> {
        self.parts.last()
    }
}

impl From<&str> for Name {
    /// Splits on `.`; empty components are dropped.
    fn from(s: &str) -> Self {
        let parts: Vec<NamePart> = s
            .split('.')
            .filter(|p| !p.is_empty())
            .map(|p| NamePart::Str(p.into()))
            .collect();
        Self {
            parts: parts.into(),
        }
    }
}

impl From<String> for Name {
    fn from(s: String) -> Self {
        Name::from(s.as_str())
    }
}

impl From<u64> for Name {
    fn from(n: u64) -> Self {
        Name::anonymous().append_num(n)
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.parts.is_empty() {
            return write!(f, "[anonymous]");
        }

        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            match part {
                NamePart::Str(s) => write!(f, "{}", s)?,
                NamePart::Num(n) if i == 0 => write!(f, "%{}", n)?,
                NamePart::Num(n) => write!(f, "{}", n)?,
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}`", self)
    }
}
