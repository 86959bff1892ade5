use anchor_lang::prelude::*;

use crate::error::LotteryError;

/// Identifier the oracle hands out when randomness is requested. For
/// Switchboard on-demand this is the commit's `seed_slot`.
pub type RequestId = u64;

/// Outbound half of the randomness protocol. Delivery comes back later
/// through `Lottery::deliver_randomness`.
pub trait RandomnessOracle {
    fn request(&mut self) -> Result<RequestId>;
}

/// Tracks the single outstanding randomness request of a draw.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct RandomnessCoordinator {
    pub pending: Option<u64>,
    /// Unix timestamp of the last issued request.
    pub requested_at: i64,
    pub requests_issued: u32,
}

impl RandomnessCoordinator {
    pub fn request_randomness<O: RandomnessOracle>(
        &mut self,
        oracle: &mut O,
        window_closed: bool,
        now: i64,
    ) -> Result<RequestId> {
        require!(self.pending.is_none(), LotteryError::RequestAlreadyPending);
        require!(window_closed, LotteryError::WindowNotClosed);

        let request_id = oracle.request()?;
        self.track(request_id, now)?;
        Ok(request_id)
    }

    /// Replaces the pending request with a fresh one. Returns the stale id
    /// and the new id; the stale id can no longer be resolved.
    pub fn reissue<O: RandomnessOracle>(
        &mut self,
        oracle: &mut O,
        now: i64,
    ) -> Result<(RequestId, RequestId)> {
        let stale = self.pending.ok_or(LotteryError::NotAwaitingRandomness)?;
        let request_id = oracle.request()?;
        self.track(request_id, now)?;
        Ok((stale, request_id))
    }

    /// Consumes the pending request if `request_id` matches it.
    pub fn resolve(&mut self, request_id: RequestId, random_value: [u8; 32]) -> Result<[u8; 32]> {
        match self.pending {
            Some(pending) if pending == request_id => {
                self.pending = None;
                Ok(random_value)
            }
            _ => err!(LotteryError::UnknownRequest),
        }
    }

    pub fn is_timed_out(&self, now: i64, timeout: i64) -> bool {
        self.pending.is_some() && now >= self.requested_at.saturating_add(timeout)
    }

    /// Drops the pending request without resolving it.
    pub fn abandon(&mut self) -> Option<RequestId> {
        self.pending.take()
    }

    fn track(&mut self, request_id: RequestId, now: i64) -> Result<()> {
        self.requests_issued = self
            .requests_issued
            .checked_add(1)
            .ok_or(LotteryError::MathOverflow)?;
        self.pending = Some(request_id);
        self.requested_at = now;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// In-process oracle handing out sequential ids.
    #[derive(Debug, Default)]
    pub(crate) struct FakeOracle {
        pub next_id: RequestId,
        pub calls: u32,
        pub fail: bool,
    }

    impl FakeOracle {
        pub(crate) fn starting_at(next_id: RequestId) -> Self {
            Self {
                next_id,
                ..Self::default()
            }
        }
    }

    impl RandomnessOracle for FakeOracle {
        fn request(&mut self) -> Result<RequestId> {
            if self.fail {
                return err!(LotteryError::RandomnessAlreadyRevealed);
            }
            self.calls += 1;
            let id = self.next_id;
            self.next_id += 1;
            Ok(id)
        }
    }

    fn assert_err<T: std::fmt::Debug>(result: Result<T>, expected: LotteryError) {
        assert_eq!(result.unwrap_err(), anchor_lang::error::Error::from(expected));
    }

    #[test]
    fn test_request_tracks_single_pending_id() {
        let mut coordinator = RandomnessCoordinator::default();
        let mut oracle = FakeOracle::starting_at(40);

        let id = coordinator.request_randomness(&mut oracle, true, 1_000).unwrap();

        assert_eq!(id, 40);
        assert_eq!(coordinator.pending, Some(40));
        assert_eq!(coordinator.requested_at, 1_000);
        assert_eq!(coordinator.requests_issued, 1);
        assert_eq!(oracle.calls, 1);
    }

    #[test]
    fn test_second_request_while_pending_is_rejected() {
        let mut coordinator = RandomnessCoordinator::default();
        let mut oracle = FakeOracle::starting_at(1);
        coordinator.request_randomness(&mut oracle, true, 0).unwrap();

        assert_err(
            coordinator.request_randomness(&mut oracle, true, 5),
            LotteryError::RequestAlreadyPending,
        );
        assert_eq!(coordinator.pending, Some(1));
        assert_eq!(oracle.calls, 1);
    }

    #[test]
    fn test_request_before_window_closes_is_rejected() {
        let mut coordinator = RandomnessCoordinator::default();
        let mut oracle = FakeOracle::default();

        assert_err(
            coordinator.request_randomness(&mut oracle, false, 0),
            LotteryError::WindowNotClosed,
        );
        assert_eq!(coordinator, RandomnessCoordinator::default());
        assert_eq!(oracle.calls, 0);
    }

    #[test]
    fn test_oracle_failure_leaves_no_pending_request() {
        let mut coordinator = RandomnessCoordinator::default();
        let mut oracle = FakeOracle {
            fail: true,
            ..FakeOracle::default()
        };

        assert!(coordinator.request_randomness(&mut oracle, true, 0).is_err());
        assert_eq!(coordinator.pending, None);
    }

    #[test]
    fn test_resolve_is_one_shot() {
        let mut coordinator = RandomnessCoordinator::default();
        let mut oracle = FakeOracle::starting_at(9);
        coordinator.request_randomness(&mut oracle, true, 0).unwrap();

        assert_err(coordinator.resolve(8, [1; 32]), LotteryError::UnknownRequest);
        assert_eq!(coordinator.pending, Some(9));

        assert_eq!(coordinator.resolve(9, [7; 32]).unwrap(), [7; 32]);
        assert_eq!(coordinator.pending, None);
        assert_err(coordinator.resolve(9, [7; 32]), LotteryError::UnknownRequest);
    }

    #[test]
    fn test_reissue_makes_previous_id_stale() {
        let mut coordinator = RandomnessCoordinator::default();
        let mut oracle = FakeOracle::starting_at(100);
        coordinator.request_randomness(&mut oracle, true, 10).unwrap();

        let (stale, fresh) = coordinator.reissue(&mut oracle, 50).unwrap();

        assert_eq!((stale, fresh), (100, 101));
        assert_eq!(coordinator.requested_at, 50);
        assert_eq!(coordinator.requests_issued, 2);
        assert_err(coordinator.resolve(100, [0; 32]), LotteryError::UnknownRequest);
        assert!(coordinator.resolve(101, [0; 32]).is_ok());
    }

    #[test]
    fn test_timeout_only_counts_while_pending() {
        let mut coordinator = RandomnessCoordinator::default();
        assert!(!coordinator.is_timed_out(i64::MAX, 1));

        let mut oracle = FakeOracle::default();
        coordinator.request_randomness(&mut oracle, true, 100).unwrap();
        assert!(!coordinator.is_timed_out(159, 60));
        assert!(coordinator.is_timed_out(160, 60));

        assert_eq!(coordinator.abandon(), Some(0));
        assert!(!coordinator.is_timed_out(160, 60));
    }
}
