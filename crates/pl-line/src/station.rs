//! Stations ("baths") and the registry that owns them.

use pl_core::{CarrierId, IdAllocator, Millimetres, StationId};

use crate::{LineError, LineResult};

// ── StationSpec ───────────────────────────────────────────────────────────────

/// Configuration record for one station, in line order.
///
/// The station's ID is implicit: it is the record's position in the list.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StationSpec {
    pub name:        String,
    /// Distance from the line entry, in metres.
    pub distance_m:  f64,
    /// `false` for special positions (loader, unloader) that cannot take a
    /// submerged carrier.
    pub submersible: bool,
}

impl StationSpec {
    pub fn new(name: impl Into<String>, distance_m: f64, submersible: bool) -> Self {
        Self {
            name: name.into(),
            distance_m,
            submersible,
        }
    }
}

// ── Station ───────────────────────────────────────────────────────────────────

/// A fixed line position with capacity 1.
#[derive(Clone, Debug)]
pub struct Station {
    pub id:          StationId,
    pub name:        String,
    pub distance:    Millimetres,
    pub submersible: bool,
    occupant:        Option<CarrierId>,
    /// Carrier that has been tasked to be put down here next.
    claimed_by:      Option<CarrierId>,
}

impl Station {
    /// The carrier currently in the station, if any.
    #[inline]
    pub fn occupant(&self) -> Option<CarrierId> {
        self.occupant
    }

    /// The carrier that holds the downstream claim on this station, if any.
    #[inline]
    pub fn claimed_by(&self) -> Option<CarrierId> {
        self.claimed_by
    }

    /// Empty and not promised to any carrier.
    #[inline]
    pub fn is_free(&self) -> bool {
        self.occupant.is_none() && self.claimed_by.is_none()
    }
}

// ── StationRegistry ───────────────────────────────────────────────────────────

/// Every station on the line, indexed by `StationId` (= line order).
///
/// The first station is the line entry and the last is the exit.  Built with
/// [`StationRegistryBuilder`], which checks the layout.
#[derive(Clone, Debug)]
pub struct StationRegistry {
    stations: Vec<Station>,
}

impl StationRegistry {
    /// The loader position.  Always station 0.
    #[inline]
    pub fn entry(&self) -> StationId {
        StationId(0)
    }

    /// The unloader position.  Always the last station.
    #[inline]
    pub fn exit(&self) -> StationId {
        StationId(self.stations.len() as u32 - 1)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: StationId) -> bool {
        id.index() < self.stations.len()
    }

    pub fn get(&self, id: StationId) -> LineResult<&Station> {
        self.stations.get(id.index()).ok_or(LineError::UnknownStation(id))
    }

    fn get_mut(&mut self, id: StationId) -> LineResult<&mut Station> {
        self.stations.get_mut(id.index()).ok_or(LineError::UnknownStation(id))
    }

    /// Stations in line order.
    pub fn iter(&self) -> impl Iterator<Item = &Station> + '_ {
        self.stations.iter()
    }

    #[inline]
    pub fn distance(&self, id: StationId) -> LineResult<Millimetres> {
        self.get(id).map(|s| s.distance)
    }

    #[inline]
    pub fn occupant(&self, id: StationId) -> LineResult<Option<CarrierId>> {
        self.get(id).map(|s| s.occupant)
    }

    /// Put `carrier` into station `id`.
    ///
    /// Fails with [`LineError::StationOccupied`] if the station already holds
    /// a carrier; the capacity-1 invariant is never relaxed.  A claim held by
    /// `carrier` itself is consumed.
    pub fn place(&mut self, id: StationId, carrier: CarrierId) -> LineResult<()> {
        let station = self.get_mut(id)?;
        if let Some(occupant) = station.occupant {
            return Err(LineError::StationOccupied { station: id, occupant });
        }
        station.occupant = Some(carrier);
        if station.claimed_by == Some(carrier) {
            station.claimed_by = None;
        }
        Ok(())
    }

    /// Remove and return the occupant of station `id`.
    pub fn take(&mut self, id: StationId) -> LineResult<Option<CarrierId>> {
        Ok(self.get_mut(id)?.occupant.take())
    }

    /// Reserve station `id` as the next drop-off point for `carrier`.
    pub fn claim(&mut self, id: StationId, carrier: CarrierId) -> LineResult<()> {
        let station = self.get_mut(id)?;
        match station.claimed_by {
            Some(claimant) if claimant != carrier => {
                Err(LineError::StationClaimed { station: id, claimant })
            }
            _ => {
                station.claimed_by = Some(carrier);
                Ok(())
            }
        }
    }
}

// ── StationRegistryBuilder ────────────────────────────────────────────────────

/// Builds a [`StationRegistry`] from specs given in line order.
///
/// ```rust
/// use pl_line::{StationRegistryBuilder, StationSpec};
///
/// let stations = StationRegistryBuilder::new()
///     .station(StationSpec::new("loader", 0.0, false))
///     .station(StationSpec::new("rinse", 2.752, true))
///     .station(StationSpec::new("unloader", 6.0, false))
///     .build()
///     .unwrap();
/// assert_eq!(stations.len(), 3);
/// ```
#[derive(Default)]
pub struct StationRegistryBuilder {
    alloc:    IdAllocator<StationId>,
    stations: Vec<Station>,
}

impl StationRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next station in line order.
    pub fn station(mut self, spec: StationSpec) -> Self {
        self.push(spec);
        self
    }

    /// Append many stations in line order.
    pub fn stations<I: IntoIterator<Item = StationSpec>>(mut self, specs: I) -> Self {
        for spec in specs {
            self.push(spec);
        }
        self
    }

    fn push(&mut self, spec: StationSpec) {
        let id = self.alloc.allocate();
        self.stations.push(Station {
            id,
            name:        spec.name,
            distance:    Millimetres::from_metres(spec.distance_m),
            submersible: spec.submersible,
            occupant:    None,
            claimed_by:  None,
        });
    }

    /// Check the layout and return the registry.
    ///
    /// The line needs at least an entry and an exit, both non-submersible,
    /// and distances must strictly increase in line order.
    pub fn build(self) -> LineResult<StationRegistry> {
        let stations = self.stations;
        if stations.len() < 2 {
            return Err(LineError::MalformedLine(format!(
                "a line needs an entry and an exit, got {} station(s)",
                stations.len()
            )));
        }
        for endpoint in [&stations[0], &stations[stations.len() - 1]] {
            if endpoint.submersible {
                return Err(LineError::MalformedLine(format!(
                    "endpoint station {} ({:?}) must not be submersible",
                    endpoint.id, endpoint.name
                )));
            }
        }
        for pair in stations.windows(2) {
            if pair[1].distance <= pair[0].distance {
                return Err(LineError::MalformedLine(format!(
                    "station {} at {} is not past station {} at {}",
                    pair[1].id, pair[1].distance, pair[0].id, pair[0].distance
                )));
            }
        }
        Ok(StationRegistry { stations })
    }
}
