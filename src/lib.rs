//! Weighted-random-selection pool.
//!
//! A [`TicketBox`] holds distinct items, each with a positive ticket count,
//! and draws one item with probability proportional to its tickets — the
//! building block for loot tables, lotteries, and weighted sampling.
//!
//! Mutation is set-to, not additive: `set(item, n)` makes the stored count
//! exactly `n`, and `set(item, 0)` removes the entry. The ticket total is
//! capped at `u32::MAX`; updates that would overflow it are skipped.
//! Randomness is injected per draw, so behavior is fully reproducible.
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//! use ticketbox::TicketBox;
//!
//! let mut pool = TicketBox::new();
//! pool.set_many([("sword", 1), ("shield", 2), ("potion", 7)]);
//!
//! // Deterministic draw: key 0 falls in sword's window.
//! assert_eq!(pool.draw_keyed(0).unwrap(), &"sword");
//!
//! // Unattended draw with any RngCore.
//! let mut rng = SmallRng::seed_from_u64(42);
//! let loot = pool.draw(&mut rng).unwrap();
//! assert!(pool.contains(loot));
//! ```

pub mod pool;
pub mod report;

pub use pool::{DrawError, Entry, TicketBox, VERSION};
pub use report::{EntryLine, PoolReport};
