// tests/support/mocks/locks.rs
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use wiredesk::application::ApplicationResult;
use wiredesk::application::ports::lock::LockManager;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockCall {
    Acquire(String),
    Renew(String),
    Release(String),
}

/// Lock manager that records every call. `busy` refuses the acquire;
/// `renewals_before_loss` makes renew fail after that many successes.
#[derive(Default)]
pub struct ScriptedLocks {
    busy: bool,
    renewals_before_loss: Option<usize>,
    calls: Mutex<Vec<LockCall>>,
}

impl ScriptedLocks {
    pub fn free() -> Self {
        Self::default()
    }

    pub fn busy() -> Self {
        Self {
            busy: true,
            ..Self::default()
        }
    }

    pub fn losing_after(renewals: usize) -> Self {
        Self {
            renewals_before_loss: Some(renewals),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<LockCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn released(&self) -> bool {
        self.calls()
            .iter()
            .any(|call| matches!(call, LockCall::Release(_)))
    }

    pub fn renewals(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, LockCall::Renew(_)))
            .count()
    }
}

#[async_trait]
impl LockManager for ScriptedLocks {
    async fn acquire(&self, name: &str, _ttl: Duration) -> ApplicationResult<bool> {
        self.calls
            .lock()
            .unwrap()
            .push(LockCall::Acquire(name.to_owned()));
        Ok(!self.busy)
    }

    async fn renew(&self, name: &str, _ttl: Duration) -> ApplicationResult<bool> {
        let mut calls = self.calls.lock().unwrap();
        let previous = calls
            .iter()
            .filter(|call| matches!(call, LockCall::Renew(_)))
            .count();
        calls.push(LockCall::Renew(name.to_owned()));
        Ok(self
            .renewals_before_loss
            .is_none_or(|limit| previous < limit))
    }

    async fn release(&self, name: &str) -> ApplicationResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push(LockCall::Release(name.to_owned()));
        Ok(())
    }
}
