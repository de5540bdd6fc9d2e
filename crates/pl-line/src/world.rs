//! The shared simulation context.

use pl_core::{CarrierId, StationId};

use crate::{Carrier, Carriers, LineResult, StationRegistry};

/// Stations and carriers, passed explicitly into every scheduler and
/// manipulator operation.
pub struct World {
    pub stations: StationRegistry,
    pub carriers: Carriers,
}

impl World {
    pub fn new(stations: StationRegistry, carriers: Carriers) -> Self {
        Self { stations, carriers }
    }

    /// The carrier sitting in `station`, if any.
    pub fn occupant_of(&self, station: StationId) -> LineResult<Option<&Carrier>> {
        match self.stations.occupant(station)? {
            Some(id) => self.carriers.get(id).map(Some),
            None => Ok(None),
        }
    }

    #[inline]
    pub fn carrier(&self, id: CarrierId) -> LineResult<&Carrier> {
        self.carriers.get(id)
    }

    #[inline]
    pub fn carrier_mut(&mut self, id: CarrierId) -> LineResult<&mut Carrier> {
        self.carriers.get_mut(id)
    }

    /// Carriers currently inside stations, in station order.
    pub fn stationed(&self) -> impl Iterator<Item = (StationId, CarrierId)> + '_ {
        self.stations
            .iter()
            .filter_map(|s| s.occupant().map(|c| (s.id, c)))
    }
}
