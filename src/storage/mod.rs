// Persistence for generated plans

pub mod postgres;

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::models::{PlanDraft, PlanTree};

pub use postgres::PgPlanStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Failed to create {0} record")]
    CreateFailed(&'static str),
}

/// Where the plan generator reads plan numbers from and commits plans to.
///
/// `persist_plan` is all-or-nothing: when it returns an error, none of the
/// draft's records may be visible to any later read.
pub trait PlanStore: Send + Sync {
    /// Number of the most recently created plan for this person.
    fn latest_plan_number(
        &self,
        person_id: Uuid,
    ) -> impl Future<Output = Result<Option<i32>, StoreError>> + Send;

    fn persist_plan(
        &self,
        draft: &PlanDraft,
    ) -> impl Future<Output = Result<PlanTree, StoreError>> + Send;
}

impl<S: PlanStore> PlanStore for Arc<S> {
    fn latest_plan_number(
        &self,
        person_id: Uuid,
    ) -> impl Future<Output = Result<Option<i32>, StoreError>> + Send {
        (**self).latest_plan_number(person_id)
    }

    fn persist_plan(
        &self,
        draft: &PlanDraft,
    ) -> impl Future<Output = Result<PlanTree, StoreError>> + Send {
        (**self).persist_plan(draft)
    }
}
