//! Identity issuing for domain objects.
//!
//! Every Variable, Goal and Action created through a [`Domain`](crate::Domain)
//! receives a [`Uid`] from that domain's [`UidSource`]. Uids carry no meaning
//! beyond uniqueness and creation order.

use std::fmt;

/// A unique, creation-ordered identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uid(u32);

impl Uid {
    /// Returns the raw identity value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issues strictly increasing [`Uid`]s.
///
/// # Example
///
/// ```
/// use planforge_core::UidSource;
///
/// let mut uids = UidSource::new();
/// let a = uids.next_uid();
/// let b = uids.next_uid();
/// assert!(a < b);
/// ```
#[derive(Debug, Default)]
pub struct UidSource {
    next: u32,
}

impl UidSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh identity, greater than every identity issued before.
    pub fn next_uid(&mut self) -> Uid {
        let uid = Uid(self.next);
        self.next += 1;
        uid
    }

    /// Returns how many identities have been issued.
    pub fn issued(&self) -> u32 {
        self.next
    }
}
