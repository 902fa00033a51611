use super::chain::Chain;
use super::ids::{ChainId, ParticleId, ResidueId};
use super::particle::Particle;
use super::residue::Residue;
use nalgebra::Point3;
use slotmap::SlotMap;
use std::collections::HashMap;

/// Represents the complete ensemble of sampling particles and their topology.
///
/// This struct is the central data structure for a sampling run. It stores
/// chains, residues, and particles in slot maps for stable IDs, and keeps
/// lookup maps so callers can resolve chains by character ID and residues
/// by (chain, number). The topology is a bookkeeping placeholder required
/// by the dynamics-engine schema; the physics only ever touches particle
/// positions, velocities, and masses.
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: SlotMap<ParticleId, Particle>,
    residues: SlotMap<ResidueId, Residue>,
    chains: SlotMap<ChainId, Chain>,
    residue_id_map: HashMap<(ChainId, isize), ResidueId>,
    chain_id_map: HashMap<char, ChainId>,
}

impl ParticleSystem {
    /// Creates a new, empty particle system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a chain with the given character identifier.
    ///
    /// # Return
    ///
    /// Returns the new chain's ID, or `None` if a chain with that
    /// identifier already exists.
    pub fn add_chain(&mut self, id: char) -> Option<ChainId> {
        if self.chain_id_map.contains_key(&id) {
            return None;
        }
        let chain_id = self.chains.insert(Chain::new(id));
        self.chain_id_map.insert(id, chain_id);
        Some(chain_id)
    }

    /// Adds a residue to an existing chain.
    ///
    /// # Arguments
    ///
    /// * `chain_id` - The ID of the parent chain.
    /// * `number` - The residue sequence number within the chain.
    /// * `name` - The residue name.
    ///
    /// # Return
    ///
    /// Returns the new residue's ID, or `None` if the chain does not exist
    /// or already holds a residue with that number.
    pub fn add_residue(&mut self, chain_id: ChainId, number: isize, name: &str) -> Option<ResidueId> {
        if !self.chains.contains_key(chain_id) {
            return None;
        }
        if self.residue_id_map.contains_key(&(chain_id, number)) {
            return None;
        }
        let residue_id = self.residues.insert(Residue::new(number, name, chain_id));
        self.residue_id_map.insert((chain_id, number), residue_id);
        self.chains[chain_id].add_residue(residue_id);
        Some(residue_id)
    }

    /// Adds a particle to an existing residue.
    ///
    /// The particle's `residue_id` field is overwritten with `residue_id`
    /// so the back-reference always matches the owning residue.
    ///
    /// # Return
    ///
    /// Returns the new particle's ID, or `None` if the residue does not exist.
    pub fn add_particle_to_residue(
        &mut self,
        residue_id: ResidueId,
        mut particle: Particle,
    ) -> Option<ParticleId> {
        if !self.residues.contains_key(residue_id) {
            return None;
        }
        particle.residue_id = residue_id;
        let name = particle.name.clone();
        let particle_id = self.particles.insert(particle);
        self.residues[residue_id].add_particle(&name, particle_id);
        Some(particle_id)
    }

    /// Retrieves an immutable reference to a particle by its ID.
    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id)
    }

    /// Retrieves a mutable reference to a particle by its ID.
    pub fn particle_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.particles.get_mut(id)
    }

    /// Retrieves an immutable reference to a residue by its ID.
    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    /// Retrieves an immutable reference to a chain by its ID.
    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    /// Finds a chain ID by its character identifier.
    pub fn find_chain_by_id(&self, id: char) -> Option<ChainId> {
        self.chain_id_map.get(&id).copied()
    }

    /// Finds a residue ID by its parent chain and sequence number.
    pub fn find_residue_by_number(&self, chain_id: ChainId, number: isize) -> Option<ResidueId> {
        self.residue_id_map.get(&(chain_id, number)).copied()
    }

    /// Returns an iterator over all particles in the system.
    pub fn particles_iter(&self) -> impl Iterator<Item = (ParticleId, &Particle)> {
        self.particles.iter()
    }

    /// Returns a mutable iterator over all particles in the system.
    pub fn particles_iter_mut(&mut self) -> impl Iterator<Item = (ParticleId, &mut Particle)> {
        self.particles.iter_mut()
    }

    /// Returns the number of particles in the system.
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Collects the current particle positions in residue insertion order.
    ///
    /// Order matters: the dynamics engine indexes particles by registration
    /// order, which the driver keeps identical to insertion order here.
    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.residues
            .values()
            .flat_map(|residue| residue.particles())
            .map(|&id| self.particles[id].position)
            .collect()
    }

    /// Writes back particle positions in residue insertion order.
    ///
    /// # Return
    ///
    /// Returns `false` if `positions` does not match the particle count.
    pub fn set_positions(&mut self, positions: &[Point3<f64>]) -> bool {
        if positions.len() != self.particles.len() {
            return false;
        }
        let ids: Vec<ParticleId> = self
            .residues
            .values()
            .flat_map(|residue| residue.particles())
            .copied()
            .collect();
        for (id, position) in ids.into_iter().zip(positions) {
            self.particles[id].position = *position;
        }
        true
    }
}
