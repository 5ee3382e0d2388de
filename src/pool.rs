use rand::RngCore;
use serde::Serialize;
use thiserror::Error;

use crate::report::{EntryLine, PoolReport};

/// Design revision of the pool semantics: unsigned ticket counts and
/// set-to mutation. Revision 1 used signed counters and additive deltas;
/// it is not implemented here.
pub const VERSION: u32 = 2;

/// One slot in the pool: a distinct item and its ticket count.
///
/// Stored entries always have `tickets > 0`; setting a count to zero removes
/// the entry instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry<T> {
    pub item: T,
    pub tickets: u32,
}

/// Why a draw produced no item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DrawError {
    /// The pool holds no tickets at all.
    #[error("cannot draw from an empty pool")]
    EmptyPool,
    /// No entry window contained the reduced key. Cannot happen while the
    /// pool invariants hold; kept distinguishable for caller logs.
    #[error("no entry matched draw key {key} out of {total} tickets")]
    KeyUnmatched { key: u32, total: u32 },
}

/// Weighted-random-selection pool.
///
/// Holds distinct items, each with a positive ticket count, and draws one
/// item with probability proportional to its tickets. Entries keep insertion
/// order, and the running total is cached so a draw costs one modulo plus a
/// single pass over the pool.
///
/// Randomness is injected: [`TicketBox::draw`] takes any [`RngCore`], and
/// [`TicketBox::draw_keyed`] takes the raw value directly, which makes every
/// draw reproducible in tests.
#[derive(Debug, Clone)]
pub struct TicketBox<T> {
    pool: Vec<Entry<T>>,
    total: u32,
}

impl<T> TicketBox<T> {
    /// Upper bound on the ticket total. Updates that would push the total
    /// past this are skipped rather than wrapped.
    pub const CAPACITY: u32 = u32::MAX;

    pub fn new() -> Self {
        Self {
            pool: Vec::new(),
            total: 0,
        }
    }

    /// Total tickets across all entries.
    pub fn total_tickets(&self) -> u32 {
        self.total
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Read-only view of the entries in insertion order.
    pub fn entries(&self) -> &[Entry<T>] {
        &self.pool
    }

    /// Remove every entry and reset the total to zero.
    pub fn clear(&mut self) {
        self.pool.clear();
        self.total = 0;
    }

    pub fn version(&self) -> u32 {
        VERSION
    }

    /// Diagnostic snapshot of the pool: total, capacity, and per-entry ticket
    /// counts with 1-based indexes. The caller decides where to route it;
    /// the text format is not a stable contract.
    pub fn report(&self) -> PoolReport {
        PoolReport {
            total_tickets: self.total,
            capacity: Self::CAPACITY,
            entries: self
                .pool
                .iter()
                .enumerate()
                .map(|(i, entry)| EntryLine {
                    index: i + 1,
                    tickets: entry.tickets,
                })
                .collect(),
        }
    }

    /// Draw the item whose cumulative-ticket window contains `raw % total`.
    ///
    /// Scans entries in insertion order, keeping a running `[low, high)`
    /// prefix-sum window per entry; the first window containing the key wins.
    /// The windows partition `[0, total)`, so for a uniformly distributed
    /// `raw` each entry is drawn with probability `tickets / total`.
    ///
    /// Pure with respect to the pool: the same key against the same pool
    /// always returns the same item.
    pub fn draw_keyed(&self, raw: u32) -> Result<&T, DrawError> {
        if self.total == 0 {
            return Err(DrawError::EmptyPool);
        }
        let key = raw % self.total;

        // Prefix sums never exceed `total`, so `low + tickets` cannot wrap.
        let mut low = 0u32;
        for entry in &self.pool {
            let high = low + entry.tickets;
            if key < high {
                return Ok(&entry.item);
            }
            low = high;
        }
        Err(DrawError::KeyUnmatched {
            key,
            total: self.total,
        })
    }

    /// Draw with a fresh raw value from `rng`. Fails only on an empty pool.
    pub fn draw(&self, rng: &mut dyn RngCore) -> Result<&T, DrawError> {
        self.draw_keyed(rng.next_u32())
    }
}

impl<T: PartialEq> TicketBox<T> {
    /// Ticket count stored for `item`, or 0 if absent.
    pub fn tickets(&self, item: &T) -> u32 {
        self.pool
            .iter()
            .find(|entry| &entry.item == item)
            .map_or(0, |entry| entry.tickets)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.pool.iter().any(|entry| &entry.item == item)
    }

    /// Set `item`'s ticket count, replacing (not adding to) any stored count.
    ///
    /// - `tickets == 0` removes the entry; removing an absent item is a no-op.
    /// - An update keeps the entry's position; an insert appends at the tail.
    /// - If the new total would exceed [`Self::CAPACITY`], the pair is
    ///   skipped and the pool is left untouched.
    pub fn set(&mut self, item: T, tickets: u32) {
        match self.pool.iter().position(|entry| entry.item == item) {
            Some(idx) => {
                if tickets == 0 {
                    self.total -= self.pool[idx].tickets;
                    self.pool.remove(idx);
                    return;
                }
                let rest = self.total - self.pool[idx].tickets;
                match rest.checked_add(tickets) {
                    Some(new_total) => {
                        self.total = new_total;
                        self.pool[idx].tickets = tickets;
                    }
                    None => {
                        tracing::warn!("skipped ticket update to {tickets}: pool capacity exceeded");
                    }
                }
            }
            None => {
                if tickets == 0 {
                    return;
                }
                match self.total.checked_add(tickets) {
                    Some(new_total) => {
                        self.total = new_total;
                        self.pool.push(Entry { item, tickets });
                    }
                    None => {
                        tracing::warn!("skipped ticket insert of {tickets}: pool capacity exceeded");
                    }
                }
            }
        }
    }

    /// Apply [`TicketBox::set`] to each pair in iteration order.
    ///
    /// Pairs succeed or are skipped independently; there is no rollback
    /// across the batch. Accepts anything iterating as `(item, tickets)`,
    /// including slices of pairs and maps.
    pub fn set_many(&mut self, pairs: impl IntoIterator<Item = (T, u32)>) {
        for (item, tickets) in pairs {
            self.set(item, tickets);
        }
    }
}

impl<T> Default for TicketBox<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> FromIterator<(T, u32)> for TicketBox<T> {
    fn from_iter<I: IntoIterator<Item = (T, u32)>>(iter: I) -> Self {
        let mut pool = Self::new();
        pool.set_many(iter);
        pool
    }
}

impl<'a, T> IntoIterator for &'a TicketBox<T> {
    type Item = &'a Entry<T>;
    type IntoIter = std::slice::Iter<'a, Entry<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pool.iter()
    }
}
