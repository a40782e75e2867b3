/// A propagator-local identifier for one of its registered variables.
///
/// The solver reports notifications in terms of the [`LocalId`] the propagator chose at
/// registration, so the propagator can tell its variables apart without bookkeeping of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LocalId(u32);

impl LocalId {
    pub const fn from(value: u32) -> Self {
        LocalId(value)
    }

    pub fn unpack(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for LocalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
