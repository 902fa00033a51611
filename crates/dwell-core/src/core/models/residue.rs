use super::ids::{ChainId, ParticleId};
use std::collections::HashMap;

/// Represents a residue grouping particles within a chain.
///
/// For ensemble sampling the residue carries no chemical meaning; the
/// dynamics engine's topology schema requires one, so a single placeholder
/// residue holds every particle in the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    /// Residue sequence number within its chain.
    pub number: isize,
    /// Name of the residue (e.g., "SMP" for sampling particles).
    pub name: String,
    /// ID of the parent chain.
    pub chain_id: ChainId,
    pub(crate) particles: Vec<ParticleId>,
    particle_name_map: HashMap<String, ParticleId>,
}

impl Residue {
    pub(crate) fn new(number: isize, name: &str, chain_id: ChainId) -> Self {
        Self {
            number,
            name: name.to_string(),
            chain_id,
            particles: Vec::new(),
            particle_name_map: HashMap::new(),
        }
    }

    pub(crate) fn add_particle(&mut self, particle_name: &str, particle_id: ParticleId) {
        self.particles.push(particle_id);
        self.particle_name_map
            .insert(particle_name.to_string(), particle_id);
    }

    /// Returns the IDs of all particles in this residue, in insertion order.
    pub fn particles(&self) -> &[ParticleId] {
        &self.particles
    }

    /// Looks up a particle in this residue by name.
    pub fn particle_by_name(&self, name: &str) -> Option<ParticleId> {
        self.particle_name_map.get(name).copied()
    }
}
