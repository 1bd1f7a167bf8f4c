use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

#[derive(
    Serialize,
    Deserialize,
    Debug,
    Default,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
)]
#[serde(transparent)]
/// A wall-clock instant recorded by the replica that authored an operation.
///
/// Stored as whole nanoseconds since the Unix epoch and serialized as a bare
/// integer, so a snapshot round-trips bit-exact over the wire. Losing
/// precision here would change how timestamp ties resolve, which in turn
/// changes what the replicas converge to.
///
/// There is no logical counter and no replica id attached: conflicts are
/// resolved on the timestamp alone, with removal winning exact ties.
pub struct WallTimestamp(u64);

impl WallTimestamp {
    pub fn new(nanos: u64) -> Self {
        Self(nanos)
    }

    /// The current wall-clock time on the local replica.
    pub fn now() -> Self {
        Self(get_unix_timestamp_nanos())
    }

    #[inline]
    pub fn nanos(&self) -> u64 {
        self.0
    }
}

impl Display for WallTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WallTimestamp {
    type Err = InvalidFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let nanos = s.parse::<u64>().map_err(|_| InvalidFormat)?;
        Ok(Self(nanos))
    }
}

#[derive(Debug, Copy, Clone)]
pub struct InvalidFormat;
impl Display for InvalidFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "InvalidFormat")
    }
}
impl Error for InvalidFormat {}

pub fn get_unix_timestamp_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos() as u64
}
