//! Content repository contract and SQLite implementation.
//!
//! # Invariants
//! - Inserts fail with `MissingOwner` when the owner account is absent.
//! - Updates never change `owner_uuid`; an attempt fails with `OwnerChanged`.

use crate::model::account::AccountId;
use crate::model::content::{Content, ContentId};
use crate::repo::sqlite_store::{
    bool_to_int, is_foreign_key_violation, is_primary_key_violation, read_flag, read_uuid,
    SqliteStore,
};
use crate::repo::{RecordKind, RepoError, RepoResult};
use rusqlite::{params, Row};

const CONTENT_SELECT_SQL: &str = "SELECT
    uuid,
    owner_uuid,
    title,
    description,
    is_published,
    is_important
FROM contents";

/// Store capability for content records.
pub trait ContentRepository {
    fn create_content(&self, content: &Content) -> RepoResult<ContentId>;
    fn update_content(&self, content: &Content) -> RepoResult<()>;
    fn get_content(&self, id: ContentId) -> RepoResult<Option<Content>>;
    /// Items owned by `owner`, oldest first.
    fn list_contents_by_owner(&self, owner: AccountId) -> RepoResult<Vec<Content>>;
    fn count_contents_by_owner(&self, owner: AccountId) -> RepoResult<u64>;
    /// Existence check: at least one item has `is_important = true`.
    fn any_important_content(&self) -> RepoResult<bool>;
    /// Removes every important item and returns how many were removed.
    fn delete_important_contents(&self) -> RepoResult<usize>;
}

impl<T: ContentRepository + ?Sized> ContentRepository for &T {
    fn create_content(&self, content: &Content) -> RepoResult<ContentId> {
        (**self).create_content(content)
    }

    fn update_content(&self, content: &Content) -> RepoResult<()> {
        (**self).update_content(content)
    }

    fn get_content(&self, id: ContentId) -> RepoResult<Option<Content>> {
        (**self).get_content(id)
    }

    fn list_contents_by_owner(&self, owner: AccountId) -> RepoResult<Vec<Content>> {
        (**self).list_contents_by_owner(owner)
    }

    fn count_contents_by_owner(&self, owner: AccountId) -> RepoResult<u64> {
        (**self).count_contents_by_owner(owner)
    }

    fn any_important_content(&self) -> RepoResult<bool> {
        (**self).any_important_content()
    }

    fn delete_important_contents(&self) -> RepoResult<usize> {
        (**self).delete_important_contents()
    }
}

impl ContentRepository for SqliteStore<'_> {
    fn create_content(&self, content: &Content) -> RepoResult<ContentId> {
        content.validate()?;

        self.conn
            .execute(
                "INSERT INTO contents (
                    uuid,
                    owner_uuid,
                    title,
                    description,
                    is_published,
                    is_important
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    content.uuid.to_string(),
                    content.owner_uuid.to_string(),
                    content.title.as_deref(),
                    content.description.as_deref(),
                    bool_to_int(content.is_published),
                    bool_to_int(content.is_important),
                ],
            )
            .map_err(|err| {
                if is_foreign_key_violation(&err) {
                    RepoError::MissingOwner(content.owner_uuid)
                } else if is_primary_key_violation(&err) {
                    RepoError::Duplicate {
                        kind: RecordKind::Content,
                        id: content.uuid,
                    }
                } else {
                    RepoError::from(err)
                }
            })?;

        Ok(content.uuid)
    }

    fn update_content(&self, content: &Content) -> RepoResult<()> {
        content.validate()?;

        let changed = self.conn.execute(
            "UPDATE contents
             SET
                title = ?1,
                description = ?2,
                is_published = ?3,
                is_important = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?5 AND owner_uuid = ?6;",
            params![
                content.title.as_deref(),
                content.description.as_deref(),
                bool_to_int(content.is_published),
                bool_to_int(content.is_important),
                content.uuid.to_string(),
                content.owner_uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            let exists = self.exists(
                "SELECT 1 FROM contents WHERE uuid = ?1",
                [content.uuid.to_string()],
            )?;
            return Err(if exists {
                RepoError::OwnerChanged(content.uuid)
            } else {
                RepoError::NotFound {
                    kind: RecordKind::Content,
                    id: content.uuid,
                }
            });
        }
        Ok(())
    }

    fn get_content(&self, id: ContentId) -> RepoResult<Option<Content>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTENT_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_content_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_contents_by_owner(&self, owner: AccountId) -> RepoResult<Vec<Content>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CONTENT_SELECT_SQL}
             WHERE owner_uuid = ?1
             ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([owner.to_string()])?;
        let mut contents = Vec::new();
        while let Some(row) = rows.next()? {
            contents.push(parse_content_row(row)?);
        }
        Ok(contents)
    }

    fn count_contents_by_owner(&self, owner: AccountId) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM contents WHERE owner_uuid = ?1;",
            [owner.to_string()],
            |row| row.get(0),
        )?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative content count `{count}`")))
    }

    fn any_important_content(&self) -> RepoResult<bool> {
        self.exists("SELECT 1 FROM contents WHERE is_important = 1", [])
    }

    fn delete_important_contents(&self) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM contents WHERE is_important = 1;", [])?;
        Ok(removed)
    }
}

fn parse_content_row(row: &Row<'_>) -> RepoResult<Content> {
    let content = Content {
        uuid: read_uuid(row, "contents", "uuid")?,
        owner_uuid: read_uuid(row, "contents", "owner_uuid")?,
        title: row.get("title")?,
        description: row.get("description")?,
        is_published: read_flag(row, "contents", "is_published")?,
        is_important: read_flag(row, "contents", "is_important")?,
    };
    content.validate().map_err(|err| {
        RepoError::InvalidData(format!("content {} failed validation: {err}", content.uuid))
    })?;
    Ok(content)
}
