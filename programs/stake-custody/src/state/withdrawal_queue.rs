//! Failed-withdrawal queue state
//!
//! Failure-as-data: a payout that cannot be delivered is recorded as an
//! append-only queue entry instead of aborting the batch. Every entry keeps
//! its index forever; settlement only shrinks `amount_owed`. The pointer
//! bounds a contiguous fully-settled prefix, so `pointer..number` is the
//! live window a drain has to scan.

use anchor_lang::prelude::*;

use crate::error::CustodyError;

/// One undelivered payout obligation.
///
/// Lifecycle: pending (`amount_owed > 0`) until settled (`amount_owed == 0`).
/// `amount_owed` is denominated in wrapped base units and never grows.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct FailedWithdrawal {
    pub receiver: Pubkey,
    pub amount_owed: u64,
}

impl FailedWithdrawal {
    pub const LEN: usize = 32 + 8;

    pub fn is_settled(&self) -> bool {
        self.amount_owed == 0
    }
}

/// A settlement decided during a drain, to be delivered after all queue
/// bookkeeping is committed (checks-effects-interactions).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettledWithdrawal {
    pub index: u64,
    pub receiver: Pubkey,
    pub amount: u64,
}

/// Failed-withdrawal queue state account.
///
/// PDA Seeds: `[b"withdrawal_queue", custody_config.key().as_ref()]`
#[account]
pub struct WithdrawalQueue {
    /// Reference to parent custody config
    pub custody: Pubkey,

    /// Maximum entries this account was sized for (immutable after init)
    pub capacity: u32,

    /// Next free index; equals the number of entries ever recorded
    pub number_of_failed_withdrawals: u64,

    /// All entries below this index are fully settled
    pub failed_withdrawals_pointer: u64,

    /// Append-only entry log; entries are never removed
    pub entries: Vec<FailedWithdrawal>,
}

impl WithdrawalQueue {
    /// Account space for a queue sized to `capacity` entries.
    pub fn space(capacity: u32) -> usize {
        8                                           // discriminator
            + 32                                    // custody
            + 4                                     // capacity
            + 8                                     // number_of_failed_withdrawals
            + 8                                     // failed_withdrawals_pointer
            + 4 + FailedWithdrawal::LEN * capacity as usize // entries (vec)
    }

    /// Initialize the queue with empty state.
    pub fn initialize(&mut self, custody: Pubkey, capacity: u32) {
        self.custody = custody;
        self.capacity = capacity;
        self.number_of_failed_withdrawals = 0;
        self.failed_withdrawals_pointer = 0;
        self.entries = Vec::new();
    }

    /// Record an undelivered payout, returning its queue index.
    pub fn record_failure(&mut self, receiver: Pubkey, amount: u64) -> Result<u64> {
        require!(
            (self.entries.len() as u32) < self.capacity,
            CustodyError::QueueFull
        );

        let index = self.number_of_failed_withdrawals;
        self.entries.push(FailedWithdrawal {
            receiver,
            amount_owed: amount,
        });
        self.number_of_failed_withdrawals = index
            .checked_add(1)
            .ok_or(error!(CustodyError::ArithmeticOverflow))?;
        Ok(index)
    }

    pub fn entry(&self, index: u64) -> Result<&FailedWithdrawal> {
        require!(
            index < self.number_of_failed_withdrawals,
            CustodyError::WithdrawalIndexOutOfRange
        );
        Ok(&self.entries[index as usize])
    }

    /// Reduce the owed amount of `index` by `amount`.
    ///
    /// Returns the remaining owed amount. When the entry becomes settled and
    /// sits at the pointer, the pointer advances across it and any already
    /// settled immediate successors; settling past the pointer never moves it.
    pub fn settle(&mut self, index: u64, amount: u64) -> Result<u64> {
        require!(
            index < self.number_of_failed_withdrawals,
            CustodyError::WithdrawalIndexOutOfRange
        );

        let entry = &mut self.entries[index as usize];
        require!(!entry.is_settled(), CustodyError::WithdrawalAlreadySettled);
        require!(amount <= entry.amount_owed, CustodyError::AmountExceedsOwed);

        entry.amount_owed -= amount;
        let remaining = entry.amount_owed;

        if remaining == 0 && index == self.failed_withdrawals_pointer {
            self.advance_pointer();
        }
        Ok(remaining)
    }

    /// Advance the pointer over the contiguous settled prefix.
    fn advance_pointer(&mut self) {
        while self.failed_withdrawals_pointer < self.number_of_failed_withdrawals
            && self.entries[self.failed_withdrawals_pointer as usize].is_settled()
        {
            self.failed_withdrawals_pointer += 1;
        }
    }

    /// Attempt full settlement of up to `max` entries starting at the pointer.
    ///
    /// `deliverable` inspects an entry and decides (without side effects on
    /// the queue) whether its full owed amount can be delivered right now;
    /// typically it reserves backing from a running balance. Entries it
    /// declines keep their position and owed amount. With `stop_on_failure`
    /// the scan ends at the first declined entry, otherwise it keeps trying
    /// subsequent entries; either way the pointer only crosses the settled
    /// prefix.
    ///
    /// Returns the settlements in index order so the caller can perform the
    /// external deliveries after all bookkeeping is committed.
    pub fn drain<F>(
        &mut self,
        max: u64,
        stop_on_failure: bool,
        mut deliverable: F,
    ) -> Result<Vec<SettledWithdrawal>>
    where
        F: FnMut(u64, &FailedWithdrawal) -> bool,
    {
        let mut settled = Vec::new();
        let mut index = self.failed_withdrawals_pointer;
        let mut attempted = 0u64;

        while attempted < max && index < self.number_of_failed_withdrawals {
            let entry = &self.entries[index as usize];
            if entry.is_settled() {
                // Settled gap past the pointer; costs no attempt.
                index += 1;
                continue;
            }

            let amount = entry.amount_owed;
            let receiver = entry.receiver;
            attempted += 1;

            if deliverable(index, entry) {
                self.settle(index, amount)?;
                settled.push(SettledWithdrawal {
                    index,
                    receiver,
                    amount,
                });
            } else if stop_on_failure {
                break;
            }
            index += 1;
        }

        Ok(settled)
    }

    /// Quantified invariant: pointer never passes the end, and everything
    /// below it is settled. Exercised after every mutation in tests.
    pub fn settled_prefix_invariant_holds(&self) -> bool {
        self.failed_withdrawals_pointer <= self.number_of_failed_withdrawals
            && self.entries[..self.failed_withdrawals_pointer as usize]
                .iter()
                .all(FailedWithdrawal::is_settled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_queue(capacity: u32) -> WithdrawalQueue {
        let mut queue = WithdrawalQueue {
            custody: Pubkey::default(),
            capacity: 0,
            number_of_failed_withdrawals: 0,
            failed_withdrawals_pointer: 0,
            entries: vec![],
        };
        queue.initialize(Pubkey::default(), capacity);
        queue
    }

    #[test]
    fn test_space_matches_capacity() {
        assert_eq!(
            WithdrawalQueue::space(10),
            8 + 32 + 4 + 8 + 8 + 4 + 40 * 10
        );
    }

    #[test]
    fn test_record_failure_assigns_sequential_indices() {
        let mut queue = empty_queue(4);
        assert_eq!(queue.record_failure(Pubkey::new_unique(), 10).unwrap(), 0);
        assert_eq!(queue.record_failure(Pubkey::new_unique(), 20).unwrap(), 1);
        assert_eq!(queue.number_of_failed_withdrawals, 2);
        assert!(queue.settled_prefix_invariant_holds());
    }

    #[test]
    fn test_queue_capacity_enforced() {
        let mut queue = empty_queue(1);
        queue.record_failure(Pubkey::new_unique(), 1).unwrap();
        assert!(queue.record_failure(Pubkey::new_unique(), 1).is_err());
    }

    #[test]
    fn test_pointer_stuck_behind_unsettled_entry() {
        let mut queue = empty_queue(4);
        queue.record_failure(Pubkey::new_unique(), 10).unwrap();
        queue.record_failure(Pubkey::new_unique(), 20).unwrap();

        // Settling a later entry must not move the pointer.
        queue.settle(1, 20).unwrap();
        assert_eq!(queue.failed_withdrawals_pointer, 0);
        assert!(queue.settled_prefix_invariant_holds());

        // Settling the pointer entry sweeps across the settled successor.
        queue.settle(0, 10).unwrap();
        assert_eq!(queue.failed_withdrawals_pointer, 2);
        assert!(queue.settled_prefix_invariant_holds());
    }

    #[test]
    fn test_partial_settlement_is_monotone() {
        let mut queue = empty_queue(4);
        queue.record_failure(Pubkey::new_unique(), 100).unwrap();

        assert_eq!(queue.settle(0, 30).unwrap(), 70);
        assert_eq!(queue.failed_withdrawals_pointer, 0);
        assert_eq!(queue.settle(0, 70).unwrap(), 0);
        assert_eq!(queue.failed_withdrawals_pointer, 1);
    }

    #[test]
    fn test_settle_rejections() {
        let mut queue = empty_queue(4);
        queue.record_failure(Pubkey::new_unique(), 10).unwrap();

        assert!(queue.settle(1, 1).is_err()); // out of range
        assert!(queue.settle(0, 11).is_err()); // exceeds owed
        queue.settle(0, 10).unwrap();
        assert!(queue.settle(0, 1).is_err()); // already settled
    }

    #[test]
    fn test_drain_stops_on_failure_when_asked() {
        let mut queue = empty_queue(4);
        for owed in [10u64, 20, 30] {
            queue.record_failure(Pubkey::new_unique(), owed).unwrap();
        }

        // Only 25 units of backing: entry 0 settles, entry 1 blocks the scan.
        let mut available = 25u64;
        let settled = queue
            .drain(5, true, |_, entry| {
                if entry.amount_owed <= available {
                    available -= entry.amount_owed;
                    true
                } else {
                    false
                }
            })
            .unwrap();

        assert_eq!(settled.len(), 1);
        assert_eq!(settled[0].index, 0);
        assert_eq!(queue.failed_withdrawals_pointer, 1);
        assert!(queue.settled_prefix_invariant_holds());
    }

    #[test]
    fn test_drain_skips_failures_in_retry_mode() {
        let mut queue = empty_queue(4);
        for owed in [30u64, 10, 10] {
            queue.record_failure(Pubkey::new_unique(), owed).unwrap();
        }

        // Entry 0 does not fit; later entries settle but the pointer stays.
        let mut available = 20u64;
        let settled = queue
            .drain(5, false, |_, entry| {
                if entry.amount_owed <= available {
                    available -= entry.amount_owed;
                    true
                } else {
                    false
                }
            })
            .unwrap();

        assert_eq!(settled.len(), 2);
        assert_eq!(settled[0].index, 1);
        assert_eq!(settled[1].index, 2);
        assert_eq!(queue.failed_withdrawals_pointer, 0);
        assert!(queue.settled_prefix_invariant_holds());

        // Once entry 0 settles, the pointer sweeps the whole prefix.
        queue.settle(0, 30).unwrap();
        assert_eq!(queue.failed_withdrawals_pointer, 3);
    }

    #[test]
    fn test_drain_respects_max() {
        let mut queue = empty_queue(8);
        for _ in 0..5 {
            queue.record_failure(Pubkey::new_unique(), 1).unwrap();
        }

        let settled = queue.drain(2, true, |_, _| true).unwrap();
        assert_eq!(settled.len(), 2);
        assert_eq!(queue.failed_withdrawals_pointer, 2);
    }

    #[test]
    fn test_drain_does_not_recount_settled_gaps() {
        let mut queue = empty_queue(4);
        for owed in [10u64, 20, 30] {
            queue.record_failure(Pubkey::new_unique(), owed).unwrap();
        }
        queue.settle(1, 20).unwrap();

        // max = 2 attempts must reach entry 2 across the settled gap at 1.
        let settled = queue.drain(2, true, |_, _| true).unwrap();
        let indices: Vec<u64> = settled.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 2]);
        assert_eq!(queue.failed_withdrawals_pointer, 3);
    }
}
