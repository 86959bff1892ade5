use anchor_lang::prelude::*;

use crate::constants::MAX_PARTICIPANTS;
use crate::error::LotteryError;

/// One ticket holder. Entries keep first-purchase order, which fixes the
/// holder's range in the flattened ticket index space.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct Entry {
    pub participant: Pubkey,
    pub tickets: u64,
    /// Set once the holder reclaimed their payment from a cancelled draw.
    pub refunded: bool,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct ParticipantLedger {
    #[max_len(MAX_PARTICIPANTS)]
    pub entries: Vec<Entry>,
    pub total_tickets: u64,
}

impl ParticipantLedger {
    /// Records a payment of `amount_paid` lamports and returns the
    /// participant's new ticket count. Nothing is written on error.
    pub fn record_purchase(
        &mut self,
        participant: Pubkey,
        amount_paid: u64,
        ticket_price: u64,
    ) -> Result<u64> {
        require!(
            ticket_price > 0 && amount_paid > 0 && amount_paid % ticket_price == 0,
            LotteryError::InvalidPayment
        );
        let tickets = amount_paid / ticket_price;
        let total_tickets = self
            .total_tickets
            .checked_add(tickets)
            .ok_or(LotteryError::MathOverflow)?;

        let count = match self.entries.iter_mut().find(|e| e.participant == participant) {
            Some(entry) => {
                entry.tickets = entry
                    .tickets
                    .checked_add(tickets)
                    .ok_or(LotteryError::MathOverflow)?;
                entry.tickets
            }
            None => {
                require!(
                    self.entries.len() < MAX_PARTICIPANTS,
                    LotteryError::LedgerFull
                );
                self.entries.push(Entry {
                    participant,
                    tickets,
                    refunded: false,
                });
                tickets
            }
        };

        self.total_tickets = total_tickets;
        Ok(count)
    }

    pub fn ticket_count_of(&self, participant: &Pubkey) -> u64 {
        self.entry(participant).map_or(0, |e| e.tickets)
    }

    pub fn total_tickets(&self) -> u64 {
        self.total_tickets
    }

    pub fn entry(&self, participant: &Pubkey) -> Option<&Entry> {
        self.entries.iter().find(|e| &e.participant == participant)
    }

    pub(crate) fn entry_mut(&mut self, participant: &Pubkey) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| &e.participant == participant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_err<T: std::fmt::Debug>(result: Result<T>, expected: LotteryError) {
        assert_eq!(result.unwrap_err(), anchor_lang::error::Error::from(expected));
    }

    #[test]
    fn test_repeat_purchases_accumulate_on_one_entry() {
        let mut ledger = ParticipantLedger::default();
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();

        assert_eq!(ledger.record_purchase(alice, 20, 10).unwrap(), 2);
        assert_eq!(ledger.record_purchase(bob, 10, 10).unwrap(), 1);
        assert_eq!(ledger.record_purchase(alice, 30, 10).unwrap(), 5);

        assert_eq!(ledger.entries.len(), 2);
        assert_eq!(ledger.entries[0].participant, alice);
        assert_eq!(ledger.entries[1].participant, bob);
        assert_eq!(ledger.ticket_count_of(&alice), 5);
        assert_eq!(ledger.total_tickets(), 6);
    }

    #[test]
    fn test_unknown_participant_has_no_tickets() {
        let ledger = ParticipantLedger::default();
        assert_eq!(ledger.ticket_count_of(&Pubkey::new_unique()), 0);
        assert_eq!(ledger.total_tickets(), 0);
    }

    #[test]
    fn test_rejects_payment_not_multiple_of_price() {
        let mut ledger = ParticipantLedger::default();
        let alice = Pubkey::new_unique();

        assert_err(ledger.record_purchase(alice, 0, 10), LotteryError::InvalidPayment);
        assert_err(ledger.record_purchase(alice, 15, 10), LotteryError::InvalidPayment);
        assert_err(ledger.record_purchase(alice, 5, 10), LotteryError::InvalidPayment);
        assert_eq!(ledger, ParticipantLedger::default());
    }

    #[test]
    fn test_total_matches_sum_of_purchases() {
        let mut ledger = ParticipantLedger::default();
        let buyers: Vec<Pubkey> = (0..5).map(|_| Pubkey::new_unique()).collect();
        let mut expected = 0;
        for (round, amount) in [3u64, 1, 4, 1, 5, 9, 2, 6].iter().enumerate() {
            let buyer = buyers[round % buyers.len()];
            ledger.record_purchase(buyer, amount * 7, 7).unwrap();
            expected += amount;
        }

        let summed: u64 = ledger.entries.iter().map(|e| e.tickets).sum();
        assert_eq!(ledger.total_tickets(), expected);
        assert_eq!(summed, expected);
    }

    #[test]
    fn test_ledger_full() {
        let mut ledger = ParticipantLedger::default();
        for _ in 0..MAX_PARTICIPANTS {
            ledger.record_purchase(Pubkey::new_unique(), 1, 1).unwrap();
        }
        let existing = ledger.entries[0].participant;

        assert_err(
            ledger.record_purchase(Pubkey::new_unique(), 1, 1),
            LotteryError::LedgerFull,
        );
        assert_eq!(ledger.record_purchase(existing, 1, 1).unwrap(), 2);
        assert_eq!(ledger.total_tickets(), MAX_PARTICIPANTS as u64 + 1);
    }

    #[test]
    fn test_overflow_leaves_ledger_untouched() {
        let mut ledger = ParticipantLedger::default();
        let alice = Pubkey::new_unique();
        ledger.record_purchase(alice, u64::MAX, 1).unwrap();
        let before = ledger.clone();

        assert_err(
            ledger.record_purchase(Pubkey::new_unique(), 1, 1),
            LotteryError::MathOverflow,
        );
        assert_eq!(ledger, before);
    }
}
