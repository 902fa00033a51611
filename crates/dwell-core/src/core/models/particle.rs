use super::element::Element;
use super::ids::ResidueId;
use nalgebra::{Point3, Vector3};

/// Represents a single sampling particle in the ensemble.
///
/// Particles are mutually non-interacting: each one evolves independently
/// under the shared external potential. Identity is fixed at construction;
/// only position and velocity change over the course of a run. The third
/// coordinate exists to satisfy the dynamics engine's 3D state layout and
/// is pinned near zero by the harmonic restraint in the force expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// The name of the particle within its residue (e.g., "P1").
    pub name: String,
    /// The ID of the parent residue this particle belongs to.
    pub residue_id: ResidueId,
    /// The placeholder element mandated by the engine's topology schema.
    pub element: Element,
    /// The mass used for integration, in reduced units.
    pub mass: f64,
    /// The current position.
    pub position: Point3<f64>,
    /// The current velocity.
    pub velocity: Vector3<f64>,
}

impl Particle {
    /// Creates a new particle at rest at the given position.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the particle.
    /// * `residue_id` - The ID of the residue this particle belongs to.
    /// * `mass` - The integration mass in reduced units.
    /// * `position` - The initial position.
    pub fn new(name: &str, residue_id: ResidueId, mass: f64, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            residue_id,
            element: Element::default(),
            mass,
            position,
            velocity: Vector3::zeros(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::ResidueId;

    #[test]
    fn new_particle_starts_at_rest_with_placeholder_element() {
        let particle = Particle::new("P1", ResidueId::default(), 1.0, Point3::new(1.0, 2.0, 0.0));
        assert_eq!(particle.name, "P1");
        assert_eq!(particle.mass, 1.0);
        assert_eq!(particle.element, Element::Argon);
        assert_eq!(particle.velocity, Vector3::zeros());
        assert_eq!(particle.position, Point3::new(1.0, 2.0, 0.0));
    }
}
