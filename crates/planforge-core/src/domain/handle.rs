//! Copyable handles to domain objects.

use std::fmt;

use crate::uid::Uid;

macro_rules! domain_handle {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name {
            uid: Uid,
            slot: u32,
        }

        impl $name {
            pub(crate) fn new(uid: Uid, slot: usize) -> Self {
                // Slots never outnumber uids, which are u32.
                Self {
                    uid,
                    slot: slot as u32,
                }
            }

            /// Returns the identity assigned when the object was created.
            #[inline]
            pub fn uid(self) -> Uid {
                self.uid
            }

            #[inline]
            pub(crate) fn slot(self) -> usize {
                self.slot as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.uid)
            }
        }
    };
}

domain_handle!(
    /// Handle to a variable registered in a [`Domain`](super::Domain).
    VariableId,
    "var"
);

domain_handle!(
    /// Handle to an interned goal.
    ///
    /// Goals are interned per `(variable, value)`, so handle equality is goal equality.
    GoalId,
    "goal"
);

domain_handle!(
    /// Handle to an action registered in a [`Domain`](super::Domain).
    ActionId,
    "action"
);
