// src/domain/workflow.rs
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeskId(pub i64);

impl DeskId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::validation("desk id must be positive"))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<DeskId> for i64 {
    fn from(value: DeskId) -> Self {
        value.0
    }
}

impl fmt::Display for DeskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageId(pub i64);

impl StageId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::validation("stage id must be positive"))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<StageId> for i64 {
    fn from(value: StageId) -> Self {
        value.0
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Desk {
    pub id: DeskId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub id: StageId,
    pub desk_id: DeskId,
    pub name: String,
}

/// Where an article currently sits in the editorial queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowPosition {
    pub desk: Option<DeskId>,
    pub stage: Option<StageId>,
    pub last_desk: Option<DeskId>,
    pub last_stage: Option<StageId>,
}

impl WorkflowPosition {
    pub fn at(desk: DeskId, stage: StageId) -> Self {
        Self {
            desk: Some(desk),
            stage: Some(stage),
            last_desk: None,
            last_stage: None,
        }
    }

    /// Returns the position after sending the item to `desk`/`stage`,
    /// remembering where it came from.
    #[must_use]
    pub fn send_to(self, desk: DeskId, stage: StageId) -> Self {
        Self {
            desk: Some(desk),
            stage: Some(stage),
            last_desk: self.desk,
            last_stage: self.stage,
        }
    }
}

#[async_trait]
pub trait WorkflowRepository: Send + Sync {
    async fn find_desk_by_name(&self, name: &str) -> DomainResult<Option<Desk>>;
    async fn find_stage(&self, desk: DeskId, name: &str) -> DomainResult<Option<Stage>>;
}
