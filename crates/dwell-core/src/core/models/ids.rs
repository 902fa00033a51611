use slotmap::new_key_type;

new_key_type! {
    pub struct ParticleId;
    pub struct ResidueId;
    pub struct ChainId;
}
