use super::ids::ResidueId;

/// Represents a chain of residues in the placeholder topology.
///
/// A sampling run uses exactly one chain; the type stays general because
/// the container does not care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    /// Chain identifier (e.g., 'A').
    pub id: char,
    pub(crate) residues: Vec<ResidueId>,
}

impl Chain {
    pub(crate) fn new(id: char) -> Self {
        Self {
            id,
            residues: Vec::new(),
        }
    }

    pub(crate) fn add_residue(&mut self, residue_id: ResidueId) {
        self.residues.push(residue_id);
    }

    /// Returns the IDs of all residues in this chain, in insertion order.
    pub fn residues(&self) -> &[ResidueId] {
        &self.residues
    }
}
