//! Storage backend for the film catalog.
//!
//! `Catalog` implements the generic `create`/`get`/`update`/`delete`/`list_joined`
//! contract over any sea-orm connection. Mandatory columns, foreign keys and
//! cascades are taken from the [`SchemaRegistry`], so every entity follows the
//! same rules.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use anyhow::Result;
use sea_orm::sea_query::{Alias, Asterisk, Expr, Func, Order, Query};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait,
    DatabaseConnection, EntityTrait, FromQueryResult, IdenStatic, IntoActiveModel, Iterable,
    QueryFilter, Set, Statement, TransactionTrait, Value,
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::entities::{
    film_actors, film_composers, film_country, film_editors, film_genres, film_keywords,
    film_operators, film_painters, film_producers, film_screenwriters, film_stage_directors,
};
use crate::error::CatalogError;
use crate::schema::{
    CatalogEntity, ForeignKey, JoinTable, LookupDeletePolicy, SchemaRegistry, Table, TableKind,
};

/// A lookup row reached through a join table.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct LookupEntry {
    pub id: i32,
    pub label: Option<String>,
}

/// Rows removed by one `delete`, per table. Includes the target row itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeReport {
    pub table: Table,
    pub id: i32,
    pub removed: BTreeMap<Table, u64>,
}

impl CascadeReport {
    fn new(table: Table, id: i32) -> Self {
        Self {
            table,
            id,
            removed: BTreeMap::new(),
        }
    }

    fn record(&mut self, table: Table, rows: u64) {
        if rows > 0 {
            *self.removed.entry(table).or_default() += rows;
        }
    }

    #[must_use]
    pub fn removed_from(&self, table: Table) -> u64 {
        self.removed.get(&table).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.removed.values().sum()
    }
}

#[derive(Clone)]
pub struct Catalog {
    conn: DatabaseConnection,
    registry: Arc<SchemaRegistry>,
    write_lock: Arc<Mutex<()>>,
}

impl Catalog {
    #[must_use]
    pub fn new(conn: DatabaseConnection, registry: Arc<SchemaRegistry>) -> Self {
        Self {
            conn,
            registry,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Connects to the configured database, applies migrations and builds the
    /// schema registry.
    pub async fn connect(config: &Config) -> Result<Self> {
        let conn = super::connect(
            &config.general.database_url,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let registry = SchemaRegistry::film_catalog(config.catalog.lookup_delete_policy);
        Ok(Self::new(conn, Arc::new(registry)))
    }

    /// Private in-memory SQLite catalog.
    pub async fn in_memory(policy: LookupDeletePolicy) -> Result<Self> {
        let conn = super::connect("sqlite::memory:", 1, 1).await?;
        Ok(Self::new(
            conn,
            Arc::new(SchemaRegistry::film_catalog(policy)),
        ))
    }

    #[must_use]
    pub const fn conn(&self) -> &DatabaseConnection {
        &self.conn
    }

    #[must_use]
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub async fn ping(&self) -> Result<(), CatalogError> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// Inserts `record` under a freshly assigned id.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Validation`] if a mandatory column is not set
    /// - [`CatalogError::ReferentialIntegrity`] if a foreign key does not resolve
    /// - [`CatalogError::Conflict`] if the same film/lookup pair is already linked
    pub async fn create<A>(
        &self,
        mut record: A,
    ) -> Result<<A::Entity as EntityTrait>::Model, CatalogError>
    where
        A: ActiveModelTrait + ActiveModelBehavior + Send,
        A::Entity: CatalogEntity,
        <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    {
        let table = <A::Entity as CatalogEntity>::TABLE;
        record.not_set(<A::Entity as CatalogEntity>::id_column());
        let keys = self.collect_keys(&record)?;

        let _guard = self.write_lock.lock().await;
        let txn = self.conn.begin().await?;
        self.verify_keys(&txn, table, &keys, None).await?;
        let model = record.insert(&txn).await?;
        txn.commit().await?;

        debug!(table = %table, "Row created");
        Ok(model)
    }

    /// Fetches one row by id.
    pub async fn get<E>(&self, id: i32) -> Result<E::Model, CatalogError>
    where
        E: CatalogEntity,
    {
        E::find()
            .filter(E::id_column().eq(id))
            .one(&self.conn)
            .await?
            .ok_or(CatalogError::not_found(E::TABLE, id))
    }

    /// Applies every `Set` column of `changes` to the stored row. The id never
    /// changes; the merged row is validated like a new one.
    pub async fn update<A>(
        &self,
        id: i32,
        changes: A,
    ) -> Result<<A::Entity as EntityTrait>::Model, CatalogError>
    where
        A: ActiveModelTrait + ActiveModelBehavior + Send,
        A::Entity: CatalogEntity,
        <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    {
        let table = <A::Entity as CatalogEntity>::TABLE;
        let id_column = <A::Entity as CatalogEntity>::id_column();

        let _guard = self.write_lock.lock().await;
        let txn = self.conn.begin().await?;

        let existing = <A::Entity as EntityTrait>::find()
            .filter(id_column.eq(id))
            .one(&txn)
            .await?
            .ok_or(CatalogError::not_found(table, id))?;

        let mut merged: A = existing.clone().into_active_model();
        let mut changed = false;
        for column in <<A::Entity as EntityTrait>::Column as Iterable>::iter() {
            if column.as_str() == id_column.as_str() {
                continue;
            }
            if let ActiveValue::Set(value) = changes.get(column) {
                merged.set(column, value);
                changed = true;
            }
        }

        if !changed {
            return Ok(existing);
        }

        let keys = self.collect_keys(&merged)?;
        self.verify_keys(&txn, table, &keys, Some(id)).await?;
        let model = merged.update(&txn).await?;
        txn.commit().await?;

        debug!(table = %table, id, "Row updated");
        Ok(model)
    }

    pub async fn delete<E>(&self, id: i32) -> Result<CascadeReport, CatalogError>
    where
        E: CatalogEntity,
    {
        self.delete_in(E::TABLE, id).await
    }

    /// Deletes a row and everything that depends on it, in one transaction.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] if the row does not exist
    /// - [`CatalogError::Conflict`] if `table` is a lookup table, the lookup
    ///   policy is restrict, and the row is still referenced
    pub async fn delete_in(&self, table: Table, id: i32) -> Result<CascadeReport, CatalogError> {
        let _guard = self.write_lock.lock().await;
        let txn = self.conn.begin().await?;

        if !row_exists(&txn, table, id).await? {
            return Err(CatalogError::not_found(table, id));
        }

        let plan = self.plan_cascade(&txn, table, id).await?;

        let mut report = CascadeReport::new(table, id);
        for &(target, row_id) in plan.iter().rev() {
            let rows = delete_row(&txn, target, row_id).await?;
            report.record(target, rows);
        }
        txn.commit().await?;

        info!(
            table = %table,
            id,
            removed = report.total(),
            "Deleted row with cascade"
        );
        Ok(report)
    }

    /// Lookup rows attached to `film_id` through `join`, in link order.
    pub async fn list_joined(
        &self,
        film_id: i32,
        join: JoinTable,
    ) -> Result<Vec<LookupEntry>, CatalogError> {
        if !row_exists(&self.conn, Table::Films, film_id).await? {
            return Err(CatalogError::not_found(Table::Films, film_id));
        }

        let link = Alias::new(join.table().name());
        let lookup = Alias::new(join.lookup().name());

        let stmt = Query::select()
            .expr_as(
                Expr::col((lookup.clone(), Alias::new("id"))),
                Alias::new("id"),
            )
            .expr_as(
                Expr::col((lookup.clone(), Alias::new(join.label_column()))),
                Alias::new("label"),
            )
            .from(link.clone())
            .inner_join(
                lookup.clone(),
                Expr::col((lookup, Alias::new("id")))
                    .equals((link.clone(), Alias::new(join.lookup_key()))),
            )
            .and_where(Expr::col((link.clone(), Alias::new("film_id"))).eq(film_id))
            .order_by((link, Alias::new("id")), Order::Asc)
            .to_owned();

        let backend = self.conn.get_database_backend();
        let entries = LookupEntry::find_by_statement(backend.build(&stmt))
            .all(&self.conn)
            .await?;
        Ok(entries)
    }

    /// Links a film to a lookup row through `join`. Same rules as `create`.
    pub async fn link(
        &self,
        film_id: i32,
        join: JoinTable,
        lookup_id: i32,
    ) -> Result<i32, CatalogError> {
        let id = match join {
            JoinTable::Countries => {
                self.create(film_country::ActiveModel {
                    film_id: Set(film_id),
                    country_id: Set(lookup_id),
                    ..Default::default()
                })
                .await?
                .id
            }
            JoinTable::Genres => {
                self.create(film_genres::ActiveModel {
                    film_id: Set(film_id),
                    genre_id: Set(lookup_id),
                    ..Default::default()
                })
                .await?
                .id
            }
            JoinTable::Actors => {
                self.create(film_actors::ActiveModel {
                    film_id: Set(film_id),
                    actor_id: Set(lookup_id),
                    ..Default::default()
                })
                .await?
                .id
            }
            JoinTable::Keywords => {
                self.create(film_keywords::ActiveModel {
                    film_id: Set(film_id),
                    keyword_id: Set(lookup_id),
                    ..Default::default()
                })
                .await?
                .id
            }
            JoinTable::Screenwriters => {
                self.create(film_screenwriters::ActiveModel {
                    film_id: Set(film_id),
                    screenwriter_id: Set(lookup_id),
                    ..Default::default()
                })
                .await?
                .id
            }
            JoinTable::Producers => {
                self.create(film_producers::ActiveModel {
                    film_id: Set(film_id),
                    producer_id: Set(lookup_id),
                    ..Default::default()
                })
                .await?
                .id
            }
            JoinTable::StageDirectors => {
                self.create(film_stage_directors::ActiveModel {
                    film_id: Set(film_id),
                    stage_director_id: Set(lookup_id),
                    ..Default::default()
                })
                .await?
                .id
            }
            JoinTable::Operators => {
                self.create(film_operators::ActiveModel {
                    film_id: Set(film_id),
                    operator_id: Set(lookup_id),
                    ..Default::default()
                })
                .await?
                .id
            }
            JoinTable::Composers => {
                self.create(film_composers::ActiveModel {
                    film_id: Set(film_id),
                    composer_id: Set(lookup_id),
                    ..Default::default()
                })
                .await?
                .id
            }
            JoinTable::Painters => {
                self.create(film_painters::ActiveModel {
                    film_id: Set(film_id),
                    painter_id: Set(lookup_id),
                    ..Default::default()
                })
                .await?
                .id
            }
            JoinTable::Editors => {
                self.create(film_editors::ActiveModel {
                    film_id: Set(film_id),
                    editor_id: Set(lookup_id),
                    ..Default::default()
                })
                .await?
                .id
            }
        };
        Ok(id)
    }

    pub async fn exists(&self, table: Table, id: i32) -> Result<bool, CatalogError> {
        row_exists(&self.conn, table, id).await
    }

    pub async fn count(&self, table: Table) -> Result<u64, CatalogError> {
        let stmt = Query::select()
            .expr_as(Func::count(Expr::col(Asterisk)), Alias::new("total"))
            .from(Alias::new(table.name()))
            .to_owned();

        let backend = self.conn.get_database_backend();
        let total = match self.conn.query_one(backend.build(&stmt)).await? {
            Some(row) => row.try_get::<i64>("", "total")?,
            None => 0,
        };
        Ok(u64::try_from(total).unwrap_or(0))
    }

    /// Checks mandatory columns and reads the foreign-key values of `record`.
    fn collect_keys<A>(&self, record: &A) -> Result<Vec<(&ForeignKey, Option<i32>)>, CatalogError>
    where
        A: ActiveModelTrait,
        A::Entity: CatalogEntity,
    {
        let table = <A::Entity as CatalogEntity>::TABLE;
        let def = self.registry.table(table);

        for &name in def.required {
            let present = column::<A::Entity>(name)
                .map(|col| record.get(col))
                .is_some_and(|value| value.is_set() || value.is_unchanged());
            if !present {
                return Err(CatalogError::Validation {
                    table,
                    column: name,
                });
            }
        }

        let mut keys = Vec::with_capacity(def.foreign_keys.len());
        for fk in &def.foreign_keys {
            let value = column::<A::Entity>(fk.column).and_then(|col| key_value(record.get(col)));
            if value.is_none() && fk.required {
                return Err(CatalogError::Validation {
                    table,
                    column: fk.column,
                });
            }
            keys.push((fk, value));
        }
        Ok(keys)
    }

    async fn verify_keys<C>(
        &self,
        db: &C,
        table: Table,
        keys: &[(&ForeignKey, Option<i32>)],
        current_id: Option<i32>,
    ) -> Result<(), CatalogError>
    where
        C: ConnectionTrait,
    {
        for &(fk, value) in keys {
            let Some(id) = value else { continue };
            if !row_exists(db, fk.references, id).await? {
                return Err(CatalogError::ReferentialIntegrity {
                    table,
                    column: fk.column,
                    references: fk.references,
                    id,
                });
            }
        }

        if self.registry.table(table).kind == TableKind::Join {
            let mut pair = keys.iter().filter_map(|&(fk, value)| Some((fk.column, value?)));
            if let (Some(film), Some(lookup)) = (pair.next(), pair.next())
                && let Some(existing) = find_link(db, table, film, lookup).await?
                && Some(existing) != current_id
            {
                return Err(CatalogError::Conflict(format!(
                    "{table} already links {} {} to {} {} (row {existing})",
                    film.0, film.1, lookup.0, lookup.1
                )));
            }
        }

        Ok(())
    }

    /// Every `(table, id)` the delete has to remove, parents before children.
    async fn plan_cascade<C>(
        &self,
        db: &C,
        table: Table,
        id: i32,
    ) -> Result<Vec<(Table, i32)>, CatalogError>
    where
        C: ConnectionTrait,
    {
        let mut plan = vec![(table, id)];
        let mut seen = HashSet::from([(table, id)]);
        let mut cursor = 0;

        while cursor < plan.len() {
            let (parent, parent_id) = plan[cursor];
            cursor += 1;

            for (child, fk) in self.registry.dependents(parent) {
                let ids = referencing_ids(db, child.table, fk.column, parent_id).await?;
                if ids.is_empty() {
                    continue;
                }

                if self.registry.restricts_delete(parent) {
                    warn!(
                        table = %parent,
                        id = parent_id,
                        referenced_by = %child.table,
                        "Refusing to delete referenced lookup row"
                    );
                    return Err(CatalogError::Conflict(format!(
                        "{parent} row {parent_id} is still referenced by {} row(s) in {}.{}",
                        ids.len(),
                        child.table,
                        fk.column
                    )));
                }

                for child_id in ids {
                    if seen.insert((child.table, child_id)) {
                        plan.push((child.table, child_id));
                    }
                }
            }
        }

        Ok(plan)
    }
}

fn column<E: EntityTrait>(name: &str) -> Option<E::Column> {
    <E::Column as Iterable>::iter().find(|col| col.as_str() == name)
}

fn key_value(value: ActiveValue<Value>) -> Option<i32> {
    match value {
        ActiveValue::Set(value) | ActiveValue::Unchanged(value) => match value {
            Value::Int(id) => id,
            Value::BigInt(id) => id.and_then(|id| i32::try_from(id).ok()),
            _ => None,
        },
        ActiveValue::NotSet => None,
    }
}

async fn row_exists<C: ConnectionTrait>(db: &C, table: Table, id: i32) -> Result<bool, CatalogError> {
    let stmt = Query::select()
        .expr(Expr::val(1))
        .from(Alias::new(table.name()))
        .and_where(Expr::col(Alias::new("id")).eq(id))
        .limit(1)
        .to_owned();

    let backend = db.get_database_backend();
    Ok(db.query_one(backend.build(&stmt)).await?.is_some())
}

async fn referencing_ids<C: ConnectionTrait>(
    db: &C,
    table: Table,
    column: &str,
    parent_id: i32,
) -> Result<Vec<i32>, CatalogError> {
    let stmt = Query::select()
        .column(Alias::new("id"))
        .from(Alias::new(table.name()))
        .and_where(Expr::col(Alias::new(column)).eq(parent_id))
        .order_by(Alias::new("id"), Order::Asc)
        .to_owned();

    let backend = db.get_database_backend();
    let rows = db.query_all(backend.build(&stmt)).await?;
    rows.iter()
        .map(|row| row.try_get::<i32>("", "id").map_err(CatalogError::from))
        .collect()
}

async fn find_link<C: ConnectionTrait>(
    db: &C,
    table: Table,
    (film_column, film_id): (&str, i32),
    (lookup_column, lookup_id): (&str, i32),
) -> Result<Option<i32>, CatalogError> {
    let stmt = Query::select()
        .column(Alias::new("id"))
        .from(Alias::new(table.name()))
        .and_where(Expr::col(Alias::new(film_column)).eq(film_id))
        .and_where(Expr::col(Alias::new(lookup_column)).eq(lookup_id))
        .limit(1)
        .to_owned();

    let backend = db.get_database_backend();
    match db.query_one(backend.build(&stmt)).await? {
        Some(row) => Ok(Some(row.try_get::<i32>("", "id")?)),
        None => Ok(None),
    }
}

async fn delete_row<C: ConnectionTrait>(db: &C, table: Table, id: i32) -> Result<u64, CatalogError> {
    let stmt = Query::delete()
        .from_table(Alias::new(table.name()))
        .and_where(Expr::col(Alias::new("id")).eq(id))
        .to_owned();

    let backend = db.get_database_backend();
    Ok(db.execute(backend.build(&stmt)).await?.rows_affected())
}
