//! PostgreSQL-backed `ParcelRepository` implementation using Diesel.
//!
//! Natural order is `created_at, id`. Create relies on the primary key to
//! detect duplicates; update and delete inspect the affected rows to report
//! missing parcels. Stats reads every aggregate from one repeatable-read
//! snapshot.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::dsl::{count_star, sum};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use tracing::debug;

use crate::domain::ports::{ParcelRepository, ParcelRepositoryError};
use crate::domain::{PageRequest, Parcel, ParcelFilter, ParcelId, ParcelStats, ParcelTally};

use super::models::{NewParcelRow, ParcelChangeset, ParcelRow};
use super::pool::{DbPool, PoolError};
use super::schema::parcels;

diesel::define_sql_function! {
    /// SQL `lower(text)`.
    fn lower(value: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

/// Diesel-backed implementation of the `ParcelRepository` port.
#[derive(Clone)]
pub struct DieselParcelRepository {
    pool: DbPool,
}

impl DieselParcelRepository {
    /// Create a repository using the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ParcelRepositoryError {
    ParcelRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: DieselError) -> ParcelRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => ParcelRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => ParcelRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ParcelRepositoryError::connection("database connection error")
        }
        _ => ParcelRepositoryError::query("database error"),
    }
}

fn map_insert_error(error: DieselError, id: &ParcelId) -> ParcelRepositoryError {
    if matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    ) {
        debug!(parcel_id = %id, "parcel insert hit the primary key");
        return ParcelRepositoryError::duplicate_id(id.to_string());
    }
    map_diesel_error(error)
}

fn row_to_parcel(row: ParcelRow) -> Result<Parcel, ParcelRepositoryError> {
    let id = row.id.clone();
    Parcel::try_from(row).map_err(|err| {
        ParcelRepositoryError::query(format!("stored parcel {id} is invalid: {err}"))
    })
}

fn rows_to_parcels(rows: Vec<ParcelRow>) -> Result<Vec<Parcel>, ParcelRepositoryError> {
    rows.into_iter().map(row_to_parcel).collect()
}

fn to_sql_bound(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn to_count(value: i64) -> Result<u64, ParcelRepositoryError> {
    u64::try_from(value).map_err(|_| ParcelRepositoryError::query("negative row count"))
}

#[async_trait]
impl ParcelRepository for DieselParcelRepository {
    async fn list(&self, page: PageRequest) -> Result<Vec<Parcel>, ParcelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ParcelRow> = parcels::table
            .select(ParcelRow::as_select())
            .order((parcels::created_at.asc(), parcels::id.asc()))
            .offset(to_sql_bound(page.skip()))
            .limit(to_sql_bound(page.limit()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_parcels(rows)
    }

    async fn find_by_id(&self, id: &ParcelId) -> Result<Option<Parcel>, ParcelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ParcelRow> = parcels::table
            .find(id.as_str())
            .select(ParcelRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_parcel).transpose()
    }

    async fn search(&self, filter: &ParcelFilter) -> Result<Vec<Parcel>, ParcelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = parcels::table
            .select(ParcelRow::as_select())
            .order((parcels::created_at.asc(), parcels::id.asc()))
            .into_boxed();
        if let Some(canton) = filter.canton.as_deref() {
            query = query.filter(lower(parcels::canton).eq(canton.to_lowercase()));
        }
        if let Some(buildable) = filter.buildable {
            query = query.filter(parcels::is_buildable.eq(buildable));
        }

        let rows: Vec<ParcelRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows_to_parcels(rows)
    }

    async fn stats(&self) -> Result<ParcelStats, ParcelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (total, total_area, buildable) = conn
            .build_transaction()
            .repeatable_read()
            .read_only()
            .run(|conn| {
                async move {
                    let (total, total_area): (i64, Option<f64>) = parcels::table
                        .select((count_star(), sum(parcels::area_m2)))
                        .get_result(conn)
                        .await?;
                    let buildable: i64 = parcels::table
                        .filter(parcels::is_buildable.eq(true))
                        .count()
                        .get_result(conn)
                        .await?;
                    Ok::<_, DieselError>((total, total_area, buildable))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(ParcelStats::from_tally(ParcelTally {
            total: to_count(total)?,
            buildable: to_count(buildable)?,
            total_area_m2: total_area.unwrap_or(0.0),
        }))
    }

    async fn create(&self, parcel: &Parcel) -> Result<Parcel, ParcelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: ParcelRow = diesel::insert_into(parcels::table)
            .values(NewParcelRow::from(parcel))
            .returning(ParcelRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, parcel.id()))?;

        row_to_parcel(row)
    }

    async fn update(
        &self,
        id: &ParcelId,
        parcel: &Parcel,
    ) -> Result<Parcel, ParcelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ParcelRow> = diesel::update(parcels::table.find(id.as_str()))
            .set(ParcelChangeset::from(parcel))
            .returning(ParcelRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let row = row.ok_or_else(|| ParcelRepositoryError::not_found(id.to_string()))?;
        row_to_parcel(row)
    }

    async fn delete(&self, id: &ParcelId) -> Result<(), ParcelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(parcels::table.find(id.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if affected == 0 {
            return Err(ParcelRepositoryError::not_found(id.to_string()));
        }
        Ok(())
    }
}
