use crate::db::models::{Collection, CollectionStats, Issue, NewCollection, NewIssue};
use crate::db::schema::SQLITE_INIT;
use crate::error::ShelfError;
use crate::types::payload::{CollectionPatch, IssuePatch};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{ConnectOptions, Connection, QueryBuilder, Row, Sqlite};
use std::str::FromStr;
use tracing::{debug, warn};

const COLLECTION_COLUMNS: &str = "id, title, volume, publication_years, cover_image_url";
const ISSUE_COLUMNS: &str =
    "id, collection_id, issue_number, is_owned, title, cover_image_url, release_date";

/// Handle to the database location. Holds no connection of its own.
#[derive(Clone, Debug)]
pub struct Store {
    options: SqliteConnectOptions,
}

impl Store {
    pub fn new(database_url: &str) -> Result<Self, ShelfError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        Ok(Self { options })
    }

    /// Open a connection scoped to one request.
    pub async fn session(&self) -> Result<Session, ShelfError> {
        let conn = self.options.connect().await?;
        Ok(Session { conn })
    }

    /// Create both tables if they are absent.
    pub async fn init_schema(&self) -> Result<(), ShelfError> {
        let mut session = self.session().await?;
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&mut session.conn).await?;
        }
        session.close().await
    }
}

/// One open connection. Every statement auto-commits.
///
/// Dropping a session closes its connection, so early returns through `?` release it too;
/// `close` and `finish` are the explicit forms for the success path.
pub struct Session {
    conn: SqliteConnection,
}

impl Session {
    pub async fn close(self) -> Result<(), ShelfError> {
        self.conn.close().await?;
        Ok(())
    }

    /// Close once the request's statements have committed. A failure here cannot undo them,
    /// so it is logged rather than returned.
    pub async fn finish(self) {
        if let Err(e) = self.conn.close().await {
            warn!(error = %e, "failed to close connection after commit");
        }
    }

    pub async fn insert_collection(&mut self, new: NewCollection) -> Result<Collection, ShelfError> {
        let id = sqlx::query(
            r#"INSERT INTO collections (title, volume, publication_years, cover_image_url)
               VALUES (?, ?, ?, ?)"#,
        )
        .bind(new.title)
        .bind(new.volume)
        .bind(new.publication_years)
        .bind(new.cover_image_url)
        .execute(&mut self.conn)
        .await?
        .last_insert_rowid();

        let row = sqlx::query_as::<_, Collection>(&format!(
            "SELECT {COLLECTION_COLUMNS} FROM collections WHERE id = ?"
        ))
        .bind(id)
        .fetch_one(&mut self.conn)
        .await?;
        Ok(row)
    }

    pub async fn list_collections(&mut self) -> Result<Vec<Collection>, ShelfError> {
        let rows = sqlx::query_as::<_, Collection>(&format!(
            "SELECT {COLLECTION_COLUMNS} FROM collections ORDER BY title, id"
        ))
        .fetch_all(&mut self.conn)
        .await?;
        Ok(rows)
    }

    pub async fn find_collection(&mut self, id: i64) -> Result<Option<Collection>, ShelfError> {
        let row = sqlx::query_as::<_, Collection>(&format!(
            "SELECT {COLLECTION_COLUMNS} FROM collections WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&mut self.conn)
        .await?;
        Ok(row)
    }

    /// Issues of one collection, ordered by `issue_number` as text ("10" before "2").
    pub async fn list_issues_for(&mut self, collection_id: i64) -> Result<Vec<Issue>, ShelfError> {
        let rows = sqlx::query(&format!(
            "SELECT {ISSUE_COLUMNS} FROM issues WHERE collection_id = ? ORDER BY issue_number, id"
        ))
        .bind(collection_id)
        .fetch_all(&mut self.conn)
        .await?;
        rows.into_iter().map(Self::row_to_issue).collect()
    }

    /// Apply the present fields of `patch`. Returns `None` when no such collection exists.
    pub async fn update_collection(
        &mut self,
        id: i64,
        patch: &CollectionPatch,
    ) -> Result<Option<Collection>, ShelfError> {
        if patch.is_empty() {
            return self.find_collection(id).await;
        }

        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE collections SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(title) = &patch.title {
                set.push("title = ").push_bind_unseparated(title.clone());
            }
            if let Some(volume) = &patch.volume {
                set.push("volume = ").push_bind_unseparated(volume.clone());
            }
            if let Some(years) = &patch.publication_years {
                set.push("publication_years = ")
                    .push_bind_unseparated(years.clone());
            }
            if let Some(url) = &patch.cover_image_url {
                set.push("cover_image_url = ")
                    .push_bind_unseparated(url.clone());
            }
        }
        qb.push(" WHERE id = ").push_bind(id);
        debug!(sql = qb.sql(), "updating collection");

        let affected = qb.build().execute(&mut self.conn).await?.rows_affected();
        if affected == 0 {
            return Ok(None);
        }
        self.find_collection(id).await
    }

    /// Remove a collection; its issues go with it. Returns false when nothing matched.
    pub async fn delete_collection(&mut self, id: i64) -> Result<bool, ShelfError> {
        let affected = sqlx::query("DELETE FROM collections WHERE id = ?")
            .bind(id)
            .execute(&mut self.conn)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }

    pub async fn collection_stats(
        &mut self,
        collection_id: i64,
    ) -> Result<CollectionStats, ShelfError> {
        let (total, owned): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(is_owned), 0) FROM issues WHERE collection_id = ?",
        )
        .bind(collection_id)
        .fetch_one(&mut self.conn)
        .await?;
        Ok(CollectionStats::from_counts(collection_id, total, owned))
    }

    pub async fn insert_issue(
        &mut self,
        collection_id: i64,
        new: NewIssue,
    ) -> Result<Issue, ShelfError> {
        let id = sqlx::query(
            r#"INSERT INTO issues (
                collection_id, issue_number, is_owned, title, cover_image_url, release_date
            ) VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(collection_id)
        .bind(new.issue_number)
        .bind(new.is_owned)
        .bind(new.title)
        .bind(new.cover_image_url)
        .bind(new.release_date)
        .execute(&mut self.conn)
        .await?
        .last_insert_rowid();

        let row = sqlx::query(&format!("SELECT {ISSUE_COLUMNS} FROM issues WHERE id = ?"))
            .bind(id)
            .fetch_one(&mut self.conn)
            .await?;
        Self::row_to_issue(row)
    }

    pub async fn find_issue(&mut self, id: i64) -> Result<Option<Issue>, ShelfError> {
        let row = sqlx::query(&format!("SELECT {ISSUE_COLUMNS} FROM issues WHERE id = ?"))
            .bind(id)
            .fetch_optional(&mut self.conn)
            .await?;
        row.map(Self::row_to_issue).transpose()
    }

    /// Apply the present fields of `patch`; `collection_id` is never written.
    pub async fn update_issue(
        &mut self,
        id: i64,
        patch: &IssuePatch,
    ) -> Result<Option<Issue>, ShelfError> {
        if patch.is_empty() {
            return self.find_issue(id).await;
        }

        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE issues SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(number) = &patch.issue_number {
                set.push("issue_number = ")
                    .push_bind_unseparated(number.clone());
            }
            if let Some(owned) = patch.is_owned {
                set.push("is_owned = ").push_bind_unseparated(owned);
            }
            if let Some(title) = &patch.title {
                set.push("title = ").push_bind_unseparated(title.clone());
            }
            if let Some(url) = &patch.cover_image_url {
                set.push("cover_image_url = ")
                    .push_bind_unseparated(url.clone());
            }
            if let Some(date) = &patch.release_date {
                set.push("release_date = ")
                    .push_bind_unseparated(date.clone());
            }
        }
        qb.push(" WHERE id = ").push_bind(id);
        debug!(sql = qb.sql(), "updating issue");

        let affected = qb.build().execute(&mut self.conn).await?.rows_affected();
        if affected == 0 {
            return Ok(None);
        }
        self.find_issue(id).await
    }

    pub async fn delete_issue(&mut self, id: i64) -> Result<bool, ShelfError> {
        let affected = sqlx::query("DELETE FROM issues WHERE id = ?")
            .bind(id)
            .execute(&mut self.conn)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }

    fn row_to_issue(row: SqliteRow) -> Result<Issue, ShelfError> {
        let id: i64 = row.try_get("id")?;
        let collection_id: i64 = row.try_get("collection_id")?;
        let issue_number: String = row.try_get("issue_number")?;
        let is_owned_i: i64 = row.try_get("is_owned")?;
        let title: Option<String> = row.try_get("title")?;
        let cover_image_url: Option<String> = row.try_get("cover_image_url")?;
        let release_date: Option<String> = row.try_get("release_date")?;

        Ok(Issue {
            id,
            collection_id,
            issue_number,
            is_owned: is_owned_i != 0,
            title,
            cover_image_url,
            release_date,
        })
    }
}
