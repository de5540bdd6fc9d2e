//! Manipulator lifecycle state.

use std::fmt;

/// What a manipulator is doing this tick.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ManipulatorState {
    /// Not moving and not handling a carrier.  May still have a target it
    /// has just arrived at, with the follow-up operation pending.
    #[default]
    Idle,
    /// Travelling along the rail toward its target.
    Moving,
    /// Raising a carrier out of a station.
    Lifting,
    /// Lowering a carrier into a station.
    Submerging,
    /// Holding a lifted carrier over its station while it drips.
    Dripping,
    /// At its target with a carrier, waiting for the station to empty.
    Holding,
    /// Taking a carrier off the entry station.
    Loading,
}

impl ManipulatorState {
    /// Timed operations during which collision avoidance may not displace
    /// the manipulator.
    #[inline]
    pub fn is_protected(self) -> bool {
        matches!(
            self,
            ManipulatorState::Lifting | ManipulatorState::Submerging | ManipulatorState::Dripping
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ManipulatorState::Idle       => "idle",
            ManipulatorState::Moving     => "moving",
            ManipulatorState::Lifting    => "lifting",
            ManipulatorState::Submerging => "submerging",
            ManipulatorState::Dripping   => "dripping",
            ManipulatorState::Holding    => "holding",
            ManipulatorState::Loading    => "loading",
        }
    }
}

impl fmt::Display for ManipulatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
