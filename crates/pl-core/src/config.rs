//! Line-wide configuration.

use crate::{Millimetres, PlError, PlResult};

/// Motion constants shared by every manipulator, plus the run's safety
/// ceiling.
///
/// The defaults are the production line's figures: 0.6 m/s rail speed,
/// 16 s to lift or submerge a carrier, 1 s to take a carrier off the loader,
/// and a 10 000 s ceiling after which the run is declared stalled.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineConfig {
    /// Rail distance covered in one tick.
    pub speed_mm_per_tick: i64,

    /// Ticks needed to lift a carrier out of a station, and equally to
    /// lower one in.
    pub lift_ticks: u32,

    /// Ticks needed to take a carrier off the entry station.
    pub load_ticks: u32,

    /// Safety ceiling.  A run that has not finished every carrier after this
    /// many ticks ends as stalled.
    pub max_ticks: u64,
}

impl LineConfig {
    /// The per-tick rail increment as a distance.
    #[inline]
    pub fn speed(&self) -> Millimetres {
        Millimetres(self.speed_mm_per_tick)
    }

    /// Reject values that would make the simulation meaningless.
    pub fn validate(&self) -> PlResult<()> {
        if self.speed_mm_per_tick <= 0 {
            return Err(PlError::Config(format!(
                "speed_mm_per_tick must be positive, got {}",
                self.speed_mm_per_tick
            )));
        }
        if self.max_ticks == 0 {
            return Err(PlError::Config("max_ticks must be non-zero".into()));
        }
        Ok(())
    }
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            speed_mm_per_tick: 600,
            lift_ticks:        16,
            load_ticks:        1,
            max_ticks:         10_000,
        }
    }
}
