use crate::engine::variables::DomainId;

/// A three-valued Boolean variable, backed by a 0/1 integer domain.
///
/// A literal is `True` when its domain is fixed to one, `False` when fixed to zero, and
/// `Unassigned` while both values remain. Literals have dedicated became-true and became-false
/// subscription channels, distinct from the generic any-modification channel of the underlying
/// domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Literal {
    domain_id: DomainId,
}

impl Literal {
    pub(crate) fn new(domain_id: DomainId) -> Literal {
        Literal { domain_id }
    }

    pub fn domain_id(&self) -> DomainId {
        self.domain_id
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "b{}", self.domain_id.id())
    }
}

/// The three truth states of a [`Literal`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoolValue {
    True,
    False,
    Unassigned,
}
