//! The drone identifier newtype.
//!
//! Route files are named after this id (`<id>.csv`), and every diagnostic
//! event carries it, so it is worth a real type rather than a bare `u32`.

use std::fmt;

/// Identifier of one drone in the fleet.
///
/// `Display` prints the bare number; diagnostics and route-file names use
/// the id verbatim.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct DroneId(pub u32);

impl fmt::Display for DroneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for DroneId {
    #[inline]
    fn from(id: u32) -> Self {
        DroneId(id)
    }
}
