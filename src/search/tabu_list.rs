//! Short-term move memory.
//!
//! Each accepted move records the `(customer, vacated facility)` pair(s) it
//! reversed, with an expiry drawn uniformly from the configured tenure
//! window. Entries are stored in a flat customer-by-facility arena and
//! checked lazily: a key is tabu exactly while the current iteration is
//! below its expiry, and stale entries are simply overwritten on the next
//! record rather than pruned.

use rand::Rng;

use super::moves::Move;

/// Flat `(customer, facility) -> expiry iteration` arena.
#[derive(Debug, Clone)]
pub struct TabuList {
    expiry: Vec<usize>,
    num_facilities: usize,
}

impl TabuList {
    pub fn new(num_customers: usize, num_facilities: usize) -> Self {
        Self {
            expiry: vec![0; num_customers * num_facilities],
            num_facilities,
        }
    }

    fn slot(&self, customer: usize, facility: usize) -> usize {
        customer * self.num_facilities + facility
    }

    fn active(&self, customer: usize, facility: usize, iteration: usize) -> bool {
        iteration < self.expiry[self.slot(customer, facility)]
    }

    /// Whether the move re-enters a prohibited `(customer, facility)` pair.
    ///
    /// A relocate is tabu while its customer is barred from leaving its
    /// current facility; a swap is tabu if either participant is.
    pub fn is_tabu(&self, mv: &Move, iteration: usize) -> bool {
        match *mv {
            Move::Relocate { customer, from, .. } => self.active(customer, from, iteration),
            Move::Swap {
                first,
                second,
                first_facility,
                second_facility,
            } => {
                self.active(first, first_facility, iteration)
                    || self.active(second, second_facility, iteration)
            }
        }
    }

    /// Records the facilities the move's customers just vacated, each with
    /// an independently drawn tenure from `[tenure_min, tenure_max]`.
    pub fn record<R: Rng>(
        &mut self,
        mv: &Move,
        iteration: usize,
        tenure_min: usize,
        tenure_max: usize,
        rng: &mut R,
    ) {
        match *mv {
            Move::Relocate { customer, from, .. } => {
                let tenure = rng.random_range(tenure_min..=tenure_max);
                let slot = self.slot(customer, from);
                self.expiry[slot] = iteration + tenure;
            }
            Move::Swap {
                first,
                second,
                first_facility,
                second_facility,
            } => {
                for (customer, vacated) in [(first, first_facility), (second, second_facility)] {
                    let tenure = rng.random_range(tenure_min..=tenure_max);
                    let slot = self.slot(customer, vacated);
                    self.expiry[slot] = iteration + tenure;
                }
            }
        }
    }
}
