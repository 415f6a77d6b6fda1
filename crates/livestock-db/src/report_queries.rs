//! Time-sliced reconstruction of historical stock positions from the ledger.
//!
//! Every query here reads the ledger directly; none consult the stored
//! snapshot except [`ReportQueries::verify_consistency`], whose entire job
//! is to compare the two. This keeps reports stable even when late-arriving
//! events are appended with past timestamps.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use livestock_types::{
    AnimalCategory, AnimalMovement, AnimalCategoryId, ConsistencyReport, FarmId,
    MovementStatistics,
};
use sqlx::PgPool;

use crate::error::{DbError, ServiceError};
use crate::movement_store::SumBound;
use crate::{balance_store, movement_store};

/// Read-only historical reconstruction over the ledger.
#[derive(Clone)]
pub struct ReportQueries {
    pool: PgPool,
}

/// Start of the UTC day containing `date`. `NaiveDate::and_time` is
/// infallible, so this never needs to panic on a malformed wall-clock time.
fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// End of the UTC day containing `date` (23:59:59, inclusive).
fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date) + Duration::hours(23) + Duration::minutes(59) + Duration::seconds(59)
}

impl ReportQueries {
    /// Builds a service bound to `pool`.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The balance as of the start of `start_date`: signed ledger sum over
    /// everything strictly before that instant, clamped at zero for display.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] on a connection failure.
    pub async fn opening_stock(
        &self,
        farm_id: FarmId,
        animal_category_id: AnimalCategoryId,
        start_date: NaiveDate,
    ) -> Result<i32, DbError> {
        let sum = movement_store::signed_sum(
            &self.pool,
            farm_id,
            animal_category_id,
            Some(start_of_day(start_date)),
            SumBound::Exclusive,
        )
        .await?;
        Ok(sum.max(0))
    }

    /// The balance at the end of `end_date`: opening stock plus the signed
    /// sum of everything in `[start_date, end_date]`, clamped at zero.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] on a connection failure.
    pub async fn closing_stock(
        &self,
        farm_id: FarmId,
        animal_category_id: AnimalCategoryId,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<i32, DbError> {
        let opening = self.opening_stock(farm_id, animal_category_id, start_date).await?;
        let period_movements = self
            .period_movements(farm_id, animal_category_id, start_date, end_date)
            .await?;
        let period_delta = period_movements.iter().fold(0i32, |acc, mv| {
            let signed = match mv.movement_type {
                livestock_types::MovementType::Entry => mv.quantity,
                livestock_types::MovementType::Exit => mv.quantity.saturating_neg(),
            };
            acc.saturating_add(signed)
        });
        Ok(opening.saturating_add(period_delta).max(0))
    }

    /// Full ledger rows for `(farm, category)` whose timestamp falls in the
    /// inclusive calendar-day range `[start_date, end_date]`, ordered by
    /// timestamp ascending.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] on a connection failure.
    pub async fn period_movements(
        &self,
        farm_id: FarmId,
        animal_category_id: AnimalCategoryId,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<AnimalMovement>, DbError> {
        movement_store::period_movements(
            &self.pool,
            farm_id,
            animal_category_id,
            start_of_day(start_date),
            end_of_day(end_date),
        )
        .await
    }

    /// Ledger rows for `(farm, category)` strictly before `before_date`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] on a connection failure.
    pub async fn pre_period_movements(
        &self,
        farm_id: FarmId,
        animal_category_id: AnimalCategoryId,
        before_date: NaiveDate,
    ) -> Result<Vec<AnimalMovement>, DbError> {
        movement_store::pre_period_movements(
            &self.pool,
            farm_id,
            animal_category_id,
            start_of_day(before_date),
        )
        .await
    }

    /// Recomputes the balance for `(farm, category)` directly from the
    /// ledger, independent of the stored snapshot, optionally bounded to
    /// movements at or before `as_of`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] on a connection failure.
    pub async fn reconcile(
        &self,
        farm_id: FarmId,
        animal_category_id: AnimalCategoryId,
        as_of: Option<DateTime<Utc>>,
    ) -> Result<i32, DbError> {
        let sum = movement_store::signed_sum(
            &self.pool,
            farm_id,
            animal_category_id,
            as_of,
            SumBound::Inclusive,
        )
        .await?;
        Ok(sum.max(0))
    }

    /// Compares the stored snapshot against [`Self::reconcile`] and reports
    /// whether they agree. Never self-heals — drift is surfaced, not
    /// corrected.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Domain`] with `STOCK_BALANCE_NOT_FOUND` if no
    /// balance row exists for the pair; [`ServiceError::Db`] on a connection
    /// failure.
    pub async fn verify_consistency(
        &self,
        farm_id: FarmId,
        animal_category_id: AnimalCategoryId,
    ) -> Result<ConsistencyReport, ServiceError> {
        let balance = balance_store::read(&self.pool, farm_id, animal_category_id).await?;
        let reconciled = self.reconcile(farm_id, animal_category_id, None).await.map_err(ServiceError::from)?;

        Ok(ConsistencyReport {
            farm_id,
            animal_category_id,
            stored_quantity: balance.current_quantity,
            reconciled_quantity: reconciled,
            discrepancy: balance.current_quantity.saturating_sub(reconciled),
        })
    }

    /// Current balances for every active category on one farm.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] on a connection failure.
    pub async fn farm_stock_summary(
        &self,
        farm_id: FarmId,
    ) -> Result<Vec<(AnimalCategory, i32)>, DbError> {
        balance_store::farm_stock_summary(&self.pool, farm_id).await
    }

    /// Aggregate entry/exit counts for a farm, optionally filtered to one
    /// category and/or a timestamp range.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] on a connection failure.
    pub async fn movement_statistics(
        &self,
        farm_id: FarmId,
        animal_category_id: Option<AnimalCategoryId>,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<MovementStatistics, DbError> {
        movement_store::movement_statistics(&self.pool, farm_id, animal_category_id, start, end).await
    }
}
