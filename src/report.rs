use std::fmt;

use serde::Serialize;

/// Diagnostic snapshot of a pool, produced by `TicketBox::report`.
///
/// Carries only counts, never the items themselves, so it exists for any
/// item type. The `Display` text is human-oriented and may change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolReport {
    pub total_tickets: u32,
    pub capacity: u32,
    pub entries: Vec<EntryLine>,
}

/// One line of a report: an entry's 1-based position and its ticket count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntryLine {
    pub index: usize,
    pub tickets: u32,
}

impl fmt::Display for PoolReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "total tickets {}, capacity {}",
            self.total_tickets, self.capacity
        )?;
        for line in &self.entries {
            writeln!(f, "entry {}: {} tickets", line.index, line.tickets)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::pool::TicketBox;

    #[test]
    fn report_reflects_pool_state() {
        let mut pool = TicketBox::new();
        pool.set("a", 3);
        pool.set("b", 7);

        let report = pool.report();
        assert_eq!(report.total_tickets, 10);
        assert_eq!(report.capacity, u32::MAX);
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.entries[0].index, 1);
        assert_eq!(report.entries[0].tickets, 3);
        assert_eq!(report.entries[1].index, 2);
        assert_eq!(report.entries[1].tickets, 7);
    }

    #[test]
    fn report_on_empty_pool_has_no_lines() {
        let pool: TicketBox<u8> = TicketBox::new();
        let report = pool.report();
        assert_eq!(report.total_tickets, 0);
        assert!(report.entries.is_empty());
    }

    #[test]
    fn display_lists_every_entry() {
        let mut pool = TicketBox::new();
        pool.set("a", 3);
        pool.set("b", 7);

        let text = pool.report().to_string();
        assert!(text.contains("total tickets 10"));
        assert!(text.contains("entry 1: 3 tickets"));
        assert!(text.contains("entry 2: 7 tickets"));
    }

    #[test]
    fn report_does_not_touch_the_pool() {
        let mut pool = TicketBox::new();
        pool.set("a", 3);
        let _ = pool.report();
        let _ = pool.report().to_string();
        assert_eq!(pool.total_tickets(), 3);
        assert_eq!(pool.len(), 1);
    }
}
