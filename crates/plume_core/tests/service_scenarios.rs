use plume_core::db::{open_db_in_memory, DbError};
use plume_core::{
    Account, AccountId, AccountRepository, AccountService, Content, ContentId,
    ContentRepository, ContentService, MemoryStore, NewAccount, RepoError, RepoResult,
    ServiceError, SqliteStore, DISPLAY_NAME_FIELD,
};
use uuid::Uuid;

#[test]
fn authoring_content_grows_the_owned_collection() {
    let conn = open_db_in_memory().unwrap();
    let accounts = AccountService::new(SqliteStore::new(&conn));

    let account = accounts
        .register_account(&NewAccount::new("writer").privileged(false).enabled(true))
        .unwrap();
    assert_eq!(accounts.owned_content_count(account.uuid).unwrap(), 0);

    let content = accounts.author_content(account.uuid).unwrap();

    assert_eq!(accounts.owned_content_count(account.uuid).unwrap(), 1);
    assert_eq!(content.owner_uuid, account.uuid);
    assert!(!content.is_published);
    assert!(!content.is_important);
    assert_eq!(content.title, None);
    assert_eq!(content.description, None);
    assert_eq!(accounts.owned_contents(account.uuid).unwrap(), vec![content]);
}

#[test]
fn authoring_for_unknown_account_fails() {
    let accounts = AccountService::new(MemoryStore::new());
    let missing = Uuid::new_v4();

    let err = accounts.author_content(missing).unwrap_err();
    assert!(matches!(err, ServiceError::AccountNotFound(id) if id == missing));
}

#[test]
fn privileged_and_ordinary_accounts_differ_on_deletion_rights() {
    let accounts = AccountService::new(MemoryStore::new());

    let root = accounts
        .register_account(&NewAccount::new("root").privileged(true))
        .unwrap();
    let member = accounts
        .register_account(&NewAccount::new("member"))
        .unwrap();

    assert!(accounts.can_delete_others_content(root.uuid).unwrap());
    assert!(!accounts.can_delete_others_content(member.uuid).unwrap());
    assert!(accounts.rules().system_has_privileged_account().unwrap());
}

#[test]
fn reserved_display_name_is_rejected_before_persisting() {
    let conn = open_db_in_memory().unwrap();
    let accounts = AccountService::new(SqliteStore::new(&conn));

    let err = accounts
        .register_account(&NewAccount::new("bad_man"))
        .unwrap_err();

    match err {
        ServiceError::Validation(errors) => {
            assert_eq!(errors.messages_for(DISPLAY_NAME_FIELD), vec!["Invalid username"]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(accounts.list_accounts().unwrap().is_empty());
}

#[test]
fn renaming_to_reserved_name_is_rejected() {
    let accounts = AccountService::new(MemoryStore::new());
    let mut account = accounts.register_account(&NewAccount::new("alice")).unwrap();

    account.display_name = "bad_man".to_string();
    let err = accounts.update_account(&account).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(
        accounts.get_account(account.uuid).unwrap().display_name,
        "alice"
    );
}

#[test]
fn visibility_follows_owner_state_and_publish_flag() {
    let store = MemoryStore::new();
    let accounts = AccountService::new(&store);
    let contents = ContentService::new(&store);

    let mut owner = accounts.register_account(&NewAccount::new("author")).unwrap();
    let content = accounts.author_content(owner.uuid).unwrap();

    // enabled, unpublished
    assert!(!contents.is_visible_to_others(content.uuid).unwrap());

    // enabled, published
    contents.set_published(content.uuid, true).unwrap();
    assert!(contents.is_visible_to_others(content.uuid).unwrap());

    // disabled, published
    owner.is_enabled = false;
    accounts.update_account(&owner).unwrap();
    assert!(!contents.is_visible_to_others(content.uuid).unwrap());

    // disabled, unpublished
    contents.set_published(content.uuid, false).unwrap();
    assert!(!contents.is_visible_to_others(content.uuid).unwrap());
}

#[test]
fn unresolvable_owner_is_a_dangling_reference() {
    let conn = open_db_in_memory().unwrap();
    let owner_id = Uuid::new_v4();
    let content_id = Uuid::new_v4();
    conn.execute_batch("PRAGMA foreign_keys = OFF;").unwrap();
    conn.execute(
        "INSERT INTO contents (uuid, owner_uuid, is_published) VALUES (?1, ?2, 1);",
        [content_id.to_string(), owner_id.to_string()],
    )
    .unwrap();

    let contents = ContentService::new(SqliteStore::new(&conn));
    let err = contents.is_visible_to_others(content_id).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::DanglingReference { content, owner }
            if content == content_id && owner == owner_id
    ));
}

#[test]
fn unknown_content_is_reported_as_not_found() {
    let contents = ContentService::new(MemoryStore::new());
    let missing = Uuid::new_v4();
    let err = contents.is_visible_to_others(missing).unwrap_err();
    assert!(matches!(err, ServiceError::ContentNotFound(id) if id == missing));
}

#[test]
fn important_content_check_is_system_wide() {
    let store = MemoryStore::new();
    let accounts = AccountService::new(&store);
    let contents = ContentService::new(&store);

    let alice = accounts.register_account(&NewAccount::new("alice")).unwrap();
    let bob = accounts.register_account(&NewAccount::new("bob")).unwrap();
    assert!(!accounts.has_important_content_anywhere().unwrap());

    let bobs = accounts.author_content(bob.uuid).unwrap();
    contents.set_important(bobs.uuid, true).unwrap();

    // Alice owns nothing important, yet the answer is still true.
    assert_eq!(accounts.owned_content_count(alice.uuid).unwrap(), 0);
    assert!(accounts.has_important_content_anywhere().unwrap());

    assert_eq!(contents.purge_important_contents().unwrap(), 1);
    assert!(!accounts.has_important_content_anywhere().unwrap());
    assert_eq!(accounts.owned_content_count(bob.uuid).unwrap(), 0);
}

#[test]
fn content_edits_are_persisted() {
    let store = MemoryStore::new();
    let accounts = AccountService::new(&store);
    let contents = ContentService::new(&store);

    let owner = accounts.register_account(&NewAccount::new("author")).unwrap();
    let mut content = accounts.author_content(owner.uuid).unwrap();
    content.title = Some("Title".to_string());
    content.description = Some("Body".to_string());
    contents.update_content(&content).unwrap();

    assert_eq!(contents.get_content(content.uuid).unwrap(), content);
    assert_eq!(contents.owner_of(&content).unwrap(), owner);
}

/// Store whose every call fails at the storage layer.
struct UnavailableStore;

fn unavailable<T>() -> RepoResult<T> {
    Err(RepoError::Db(DbError::UnsupportedSchemaVersion {
        db_version: 99,
        latest_supported: 2,
    }))
}

impl AccountRepository for UnavailableStore {
    fn create_account(&self, _account: &Account) -> RepoResult<AccountId> {
        unavailable()
    }
    fn update_account(&self, _account: &Account) -> RepoResult<()> {
        unavailable()
    }
    fn get_account(&self, _id: AccountId) -> RepoResult<Option<Account>> {
        unavailable()
    }
    fn list_accounts(&self) -> RepoResult<Vec<Account>> {
        unavailable()
    }
    fn any_privileged_account(&self) -> RepoResult<bool> {
        unavailable()
    }
}

impl ContentRepository for UnavailableStore {
    fn create_content(&self, _content: &Content) -> RepoResult<ContentId> {
        unavailable()
    }
    fn update_content(&self, _content: &Content) -> RepoResult<()> {
        unavailable()
    }
    fn get_content(&self, _id: ContentId) -> RepoResult<Option<Content>> {
        unavailable()
    }
    fn list_contents_by_owner(&self, _owner: AccountId) -> RepoResult<Vec<Content>> {
        unavailable()
    }
    fn count_contents_by_owner(&self, _owner: AccountId) -> RepoResult<u64> {
        unavailable()
    }
    fn any_important_content(&self) -> RepoResult<bool> {
        unavailable()
    }
    fn delete_important_contents(&self) -> RepoResult<usize> {
        unavailable()
    }
}

#[test]
fn store_failures_propagate_as_persistence_errors() {
    let accounts = AccountService::new(UnavailableStore);

    let err = accounts
        .register_account(&NewAccount::new("root"))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Persistence(RepoError::Db(DbError::UnsupportedSchemaVersion { .. }))
    ));

    let err = accounts.has_important_content_anywhere().unwrap_err();
    assert!(matches!(err, ServiceError::Persistence(_)));

    let err = accounts.rules().system_has_privileged_account().unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
}
