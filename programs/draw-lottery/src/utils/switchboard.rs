use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::draw::{RandomnessOracle, RequestId};
use crate::error::LotteryError;

/// Switchboard on-demand randomness seen through `RandomnessOracle`.
///
/// A request is a commit on the configured randomness account made in the
/// previous slot; its `seed_slot` becomes the request id.
pub struct SwitchboardOracle<'a, 'info> {
    randomness_account: AccountInfo<'info>,
    expected: Pubkey,
    clock: &'a Clock,
}

impl<'a, 'info> SwitchboardOracle<'a, 'info> {
    pub fn new(randomness_account: AccountInfo<'info>, expected: Pubkey, clock: &'a Clock) -> Self {
        Self {
            randomness_account,
            expected,
            clock,
        }
    }
}

impl RandomnessOracle for SwitchboardOracle<'_, '_> {
    fn request(&mut self) -> Result<RequestId> {
        require_keys_eq!(
            self.randomness_account.key(),
            self.expected,
            LotteryError::IncorrectRandomnessAccount
        );

        let randomness_data = RandomnessAccountData::parse(self.randomness_account.data.borrow())
            .map_err(|_| LotteryError::IncorrectRandomnessAccount)?;
        if randomness_data.seed_slot != self.clock.slot.saturating_sub(1) {
            msg!("Seed slot: {}", randomness_data.seed_slot);
            msg!("Current slot: {}", self.clock.slot);
            return err!(LotteryError::RandomnessAlreadyRevealed);
        }

        Ok(randomness_data.seed_slot)
    }
}

/// Reads the revealed value of a randomness account. Returns the commit's
/// `seed_slot` alongside so the caller can match it to the pending request.
pub fn revealed_value(
    randomness_account: &AccountInfo,
    clock: &Clock,
) -> Result<(RequestId, [u8; 32])> {
    let randomness_data = RandomnessAccountData::parse(randomness_account.data.borrow())
        .map_err(|_| LotteryError::IncorrectRandomnessAccount)?;
    let revealed_random_value = randomness_data
        .get_value(clock)
        .map_err(|_| LotteryError::RandomnessNotResolved)?;

    Ok((randomness_data.seed_slot, revealed_random_value))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISCRIMINATOR: [u8; 8] = [10, 66, 229, 135, 220, 239, 217, 114];
    const SEED_SLOT_OFFSET: usize = 8 + 32 * 3;
    const REVEAL_SLOT_OFFSET: usize = SEED_SLOT_OFFSET + 8 + 32;
    const VALUE_OFFSET: usize = REVEAL_SLOT_OFFSET + 8;

    struct RandomnessFixture {
        key: Pubkey,
        owner: Pubkey,
        lamports: u64,
        data: Vec<u8>,
    }

    impl RandomnessFixture {
        fn committed(seed_slot: u64) -> Self {
            let mut data = vec![0u8; RandomnessAccountData::size()];
            data[..8].copy_from_slice(&DISCRIMINATOR);
            data[SEED_SLOT_OFFSET..SEED_SLOT_OFFSET + 8].copy_from_slice(&seed_slot.to_le_bytes());
            Self {
                key: Pubkey::new_unique(),
                owner: Pubkey::new_unique(),
                lamports: 1,
                data,
            }
        }

        fn revealed(seed_slot: u64, reveal_slot: u64, value: [u8; 32]) -> Self {
            let mut fixture = Self::committed(seed_slot);
            fixture.data[REVEAL_SLOT_OFFSET..REVEAL_SLOT_OFFSET + 8]
                .copy_from_slice(&reveal_slot.to_le_bytes());
            fixture.data[VALUE_OFFSET..VALUE_OFFSET + 32].copy_from_slice(&value);
            fixture
        }

        fn info(&mut self) -> AccountInfo<'_> {
            AccountInfo::new(
                &self.key,
                false,
                false,
                &mut self.lamports,
                &mut self.data,
                &self.owner,
                false,
                0,
            )
        }
    }

    fn at_slot(slot: u64) -> Clock {
        Clock {
            slot,
            ..Clock::default()
        }
    }

    fn assert_err<T: std::fmt::Debug>(result: Result<T>, expected: LotteryError) {
        assert_eq!(result.unwrap_err(), anchor_lang::error::Error::from(expected));
    }

    #[test]
    fn test_fresh_commit_returns_seed_slot() {
        let mut account = RandomnessFixture::committed(41);
        let key = account.key;
        let clock = at_slot(42);

        let mut oracle = SwitchboardOracle::new(account.info(), key, &clock);
        assert_eq!(oracle.request().unwrap(), 41);
    }

    #[test]
    fn test_stale_commit_is_rejected() {
        let mut account = RandomnessFixture::committed(40);
        let key = account.key;
        let clock = at_slot(42);

        let mut oracle = SwitchboardOracle::new(account.info(), key, &clock);
        assert_err(oracle.request(), LotteryError::RandomnessAlreadyRevealed);
    }

    #[test]
    fn test_other_randomness_account_is_rejected() {
        let mut account = RandomnessFixture::committed(41);
        let clock = at_slot(42);

        let mut oracle = SwitchboardOracle::new(account.info(), Pubkey::new_unique(), &clock);
        assert_err(oracle.request(), LotteryError::IncorrectRandomnessAccount);
    }

    #[test]
    fn test_foreign_account_data_is_rejected() {
        let mut account = RandomnessFixture::committed(41);
        account.data[0] ^= 0xff;
        let key = account.key;
        let clock = at_slot(42);

        let mut oracle = SwitchboardOracle::new(account.info(), key, &clock);
        assert_err(oracle.request(), LotteryError::IncorrectRandomnessAccount);
    }

    #[test]
    fn test_revealed_value_in_reveal_slot() {
        let value = [7u8; 32];
        let mut account = RandomnessFixture::revealed(41, 45, value);

        assert_eq!(revealed_value(&account.info(), &at_slot(45)).unwrap(), (41, value));
    }

    #[test]
    fn test_revealed_value_outside_reveal_slot() {
        let mut account = RandomnessFixture::revealed(41, 45, [7u8; 32]);
        let info = account.info();

        assert_err(revealed_value(&info, &at_slot(46)), LotteryError::RandomnessNotResolved);
        assert_err(revealed_value(&info, &at_slot(44)), LotteryError::RandomnessNotResolved);
    }
}
