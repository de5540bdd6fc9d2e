//! The queue of carriers waiting to be put on the loader.

use std::collections::VecDeque;

use pl_core::{CarrierId, SimRng, TemplateId};

use crate::{Carriers, LineError, LineResult, TemplateLibrary};

/// FIFO of carriers not yet admitted to the line.
///
/// Carriers are created (and receive their IDs) when the work order is
/// built, so IDs follow admission order.
#[derive(Clone, Debug, Default)]
pub struct WorkOrder {
    queue: VecDeque<CarrierId>,
    total: usize,
}

impl WorkOrder {
    /// One carrier per entry of `templates`, admitted in that order.
    pub fn from_templates(
        library:   &TemplateLibrary,
        templates: &[TemplateId],
        carriers:  &mut Carriers,
    ) -> LineResult<Self> {
        let mut queue = VecDeque::with_capacity(templates.len());
        for &t in templates {
            let template = library.get(t)?;
            queue.push_back(carriers.spawn(template));
        }
        Ok(Self { total: queue.len(), queue })
    }

    /// `count` carriers whose templates are drawn uniformly from `library`.
    ///
    /// Equal seeds give equal orders.
    pub fn mixed(
        library:  &TemplateLibrary,
        count:    usize,
        rng:      &mut SimRng,
        carriers: &mut Carriers,
    ) -> LineResult<Self> {
        if library.is_empty() && count > 0 {
            return Err(LineError::EmptyLibrary);
        }
        let ids = library.ids();
        let picks: Vec<TemplateId> = (0..count)
            .filter_map(|_| rng.choose(&ids).copied())
            .collect();
        Self::from_templates(library, &picks, carriers)
    }

    /// Take the next carrier to admit.
    pub fn pop_next(&mut self) -> Option<CarrierId> {
        self.queue.pop_front()
    }

    /// `true` once every carrier has been admitted.
    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }

    /// Carriers still waiting, in admission order.
    pub fn pending(&self) -> impl Iterator<Item = CarrierId> + '_ {
        self.queue.iter().copied()
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Number of carriers the order was built with.
    pub fn total(&self) -> usize {
        self.total
    }
}
