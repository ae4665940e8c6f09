//! Sign-in generations.
//!
//! Every sign-in and sign-out moves the counter on. Replies carry the stamp
//! that was current when their request left, so a reply from an earlier
//! session can be dropped instead of landing in the next user's view.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Session(u64);

impl Session {
    /// Start a new generation and return its stamp.
    pub fn advance(&mut self) -> Session {
        self.0 = self.0.wrapping_add(1);
        *self
    }

    pub fn accepts(&self, stamp: Session) -> bool {
        *self == stamp
    }
}
