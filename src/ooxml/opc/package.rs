//! In-memory OPC package assembled before serialization.

use crate::ooxml::opc::part::Part;
use crate::ooxml::opc::rel::Relationships;

/// A package under construction: package-level relationships plus parts in
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct OpcPackage {
    rels: Relationships,
    parts: Vec<Part>,
}

impl OpcPackage {
    /// Create a new empty package.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a part to the package.
    pub fn add_part(&mut self, part: Part) {
        self.parts.push(part);
    }

    /// Iterate over all parts in insertion order.
    pub fn iter_parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter()
    }

    /// Find a part by its absolute part name.
    pub fn part(&self, partname: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.partname() == partname)
    }

    #[inline]
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Package-level relationships (`_rels/.rels`).
    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    #[inline]
    pub fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }
}
