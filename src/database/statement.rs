use std::time::Instant;

use serde::Serialize;
use sqlx::sqlite::{SqliteArguments, SqlitePool, SqliteRow};
use sqlx::{FromRow, Sqlite};

use crate::database::manager::DatabaseError;

/// A value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Null,
    Bool(bool),
    Integer(i64),
    Text(String),
}

impl From<bool> for Param {
    fn from(v: bool) -> Self {
        Param::Bool(v)
    }
}

impl From<i64> for Param {
    fn from(v: i64) -> Self {
        Param::Integer(v)
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Param::Text(v)
    }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Param::Text(v.to_string())
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Param::Null)
    }
}

/// Metadata returned by a mutating statement.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RunResult {
    pub success: bool,
    pub meta: RunMeta,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RunMeta {
    /// Rows inserted, updated or deleted
    pub changes: u64,
    pub last_row_id: i64,
    /// Wall time in milliseconds
    pub duration: f64,
}

/// One SQL statement plus its positional arguments. Consumed by `all` or `run`.
#[derive(Debug)]
pub struct Statement<'p> {
    pool: &'p SqlitePool,
    sql: String,
    params: Vec<Param>,
}

impl<'p> Statement<'p> {
    pub(crate) fn new(pool: &'p SqlitePool, sql: String) -> Self {
        Self {
            pool,
            sql,
            params: Vec::new(),
        }
    }

    pub fn bind(mut self, value: impl Into<Param>) -> Self {
        self.params.push(value.into());
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Execute and collect every row.
    pub async fn all<T>(self) -> Result<Vec<T>, DatabaseError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let Statement { pool, sql, params } = self;

        let mut q = sqlx::query_as::<_, T>(&sql);
        for p in params {
            q = bind_param_query_as(q, p);
        }
        let rows = q.fetch_all(pool).await?;
        Ok(rows)
    }

    /// Execute a mutation and report what it changed.
    pub async fn run(self) -> Result<RunResult, DatabaseError> {
        let Statement { pool, sql, params } = self;
        let started = Instant::now();

        let mut q = sqlx::query(&sql);
        for p in params {
            q = bind_param_query(q, p);
        }
        let result = q.execute(pool).await?;

        Ok(RunResult {
            success: true,
            meta: RunMeta {
                changes: result.rows_affected(),
                last_row_id: result.last_insert_rowid(),
                duration: started.elapsed().as_secs_f64() * 1000.0,
            },
        })
    }
}

fn bind_param_query<'q>(
    q: sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>,
    v: Param,
) -> sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>> {
    match v {
        Param::Null => q.bind(None::<String>),
        Param::Bool(b) => q.bind(b),
        Param::Integer(i) => q.bind(i),
        Param::Text(s) => q.bind(s),
    }
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    v: Param,
) -> sqlx::query::QueryAs<'q, Sqlite, O, SqliteArguments<'q>>
where
    O: for<'r> FromRow<'r, SqliteRow>,
{
    match v {
        Param::Null => q.bind(None::<String>),
        Param::Bool(b) => q.bind(b),
        Param::Integer(i) => q.bind(i),
        Param::Text(s) => q.bind(s),
    }
}
