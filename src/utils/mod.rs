/// Structural checks on loaded data, run before it is turned into components.
pub trait Verify {
    fn verify(&self) -> eyre::Result<()>;
}
