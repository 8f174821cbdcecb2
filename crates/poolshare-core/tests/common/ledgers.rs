//! Value ledgers with test-only behavior

use poolshare_core::{
    Address, Amount, CoreResult, InMemoryLedger, LedgerError, PositionId, PositionRegistry,
    ValueLedger,
};

/// Records every transfer, optionally refusing all of them
#[derive(Debug, Default)]
pub struct RecordingLedger {
    pub transfers: Vec<(Address, Amount)>,
    pub refuse: bool,
}

impl RecordingLedger {
    pub fn refusing() -> Self {
        Self {
            transfers: Vec::new(),
            refuse: true,
        }
    }

    pub fn total_paid(&self) -> Amount {
        self.transfers.iter().map(|(_, amount)| amount).sum()
    }
}

impl ValueLedger for RecordingLedger {
    fn transfer(
        &mut self,
        _registry: &mut PositionRegistry,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if self.refuse {
            return Err(LedgerError::Rejected("ledger paused".to_string()));
        }
        self.transfers.push((*to, amount));
        Ok(())
    }
}

/// Calls back into the registry during the transfer, claiming the same
/// position again before paying
#[derive(Debug)]
pub struct ReentrantLedger {
    pub claimant: Address,
    pub target: PositionId,
    pub observed_rewards: Option<Amount>,
    pub reentry: Option<CoreResult<Amount>>,
    pub inner: InMemoryLedger,
    pub transfers: Vec<(Address, Amount)>,
}

impl ReentrantLedger {
    pub fn new(claimant: Address, target: PositionId) -> Self {
        Self {
            claimant,
            target,
            observed_rewards: None,
            reentry: None,
            inner: InMemoryLedger::with_reserve(Amount::MAX),
            transfers: Vec::new(),
        }
    }
}

impl ValueLedger for ReentrantLedger {
    fn transfer(
        &mut self,
        registry: &mut PositionRegistry,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.observed_rewards = registry
            .get_position(self.target)
            .ok()
            .map(|position| position.accumulated_rewards);
        self.reentry = Some(registry.claim_rewards(&self.claimant, self.target, &mut self.inner));
        self.transfers.push((*to, amount));
        Ok(())
    }
}

/// Runs `action` against the registry while the transfer is in progress,
/// keeps its result, then pays or refuses
pub struct InterferingLedger<F> {
    action: F,
    refuse: bool,
    pub outcome: Option<CoreResult<()>>,
}

impl<F> InterferingLedger<F>
where
    F: FnMut(&mut PositionRegistry) -> CoreResult<()>,
{
    pub fn refusing(action: F) -> Self {
        Self {
            action,
            refuse: true,
            outcome: None,
        }
    }

    pub fn paying(action: F) -> Self {
        Self {
            action,
            refuse: false,
            outcome: None,
        }
    }
}

impl<F> ValueLedger for InterferingLedger<F>
where
    F: FnMut(&mut PositionRegistry) -> CoreResult<()>,
{
    fn transfer(
        &mut self,
        registry: &mut PositionRegistry,
        _to: &Address,
        _amount: Amount,
    ) -> Result<(), LedgerError> {
        self.outcome = Some((self.action)(registry));
        if self.refuse {
            return Err(LedgerError::Rejected("transfer refused".to_string()));
        }
        Ok(())
    }
}
