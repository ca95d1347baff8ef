use bridge_core::model::{
    Course, Email, PostDraft, ProfileDraft, ProfileUpdate, TodoDraft, UserId, UserProfile,
    UserProgress, sample_posts,
};
use bridge_core::scoring::IqScore;
use bridge_core::time::fixed_now;
use chrono::Duration;
use storage::repository::{
    CredentialRecord, CredentialRepository, ForumRepository, ProfileRepository,
    ProgressRepository, StorageError, TodoRepository,
};
use storage::sqlite::SqliteRepository;

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

fn profile(email: &str) -> UserProfile {
    ProfileDraft {
        first_name: "Grace".into(),
        last_name: "Hopper".into(),
        email: email.into(),
    }
    .validate(UserId::generate())
    .unwrap()
}

fn credential(profile: &UserProfile) -> CredentialRecord {
    CredentialRecord {
        user_id: profile.id(),
        email: profile.email().clone(),
        password_hash: "$argon2id$fake".into(),
        created_at: fixed_now(),
    }
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = connect("memdb_migrate_twice").await;
    repo.migrate().await.expect("second migrate");
    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_migrations")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(applied, 1);
}

#[tokio::test]
async fn profile_and_credentials_round_trip() {
    let repo = connect("memdb_profiles").await;
    let grace = profile("grace@example.com");
    repo.register_account(&grace, &credential(&grace))
        .await
        .unwrap();

    assert_eq!(repo.get_profile(grace.id()).await.unwrap(), Some(grace.clone()));

    let dup = profile("grace@example.com");
    assert!(matches!(
        repo.insert_profile(&dup).await,
        Err(StorageError::Conflict)
    ));

    let renamed = grace
        .apply(ProfileUpdate {
            email: Some("g.hopper@example.com".into()),
            ..ProfileUpdate::default()
        })
        .unwrap();
    repo.update_profile(&renamed).await.unwrap();

    let old = Email::parse("grace@example.com").unwrap();
    let new = Email::parse("g.hopper@example.com").unwrap();
    assert!(repo.find_credential_by_email(&old).await.unwrap().is_none());
    let found = repo.find_credential_by_email(&new).await.unwrap().unwrap();
    assert_eq!(found.user_id, grace.id());
}

#[tokio::test]
async fn failed_registration_leaves_email_free() {
    let repo = connect("memdb_register_rollback").await;
    sqlx::query(
        r"
        CREATE TRIGGER reject_credentials BEFORE INSERT ON credentials
        BEGIN SELECT RAISE(ABORT, 'disk hiccup'); END
        ",
    )
    .execute(repo.pool())
    .await
    .unwrap();

    let grace = profile("grace@example.com");
    let err = repo
        .register_account(&grace, &credential(&grace))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Connection(_)));
    assert!(repo.get_profile(grace.id()).await.unwrap().is_none());

    sqlx::query("DROP TRIGGER reject_credentials")
        .execute(repo.pool())
        .await
        .unwrap();

    let retry = profile("grace@example.com");
    repo.register_account(&retry, &credential(&retry))
        .await
        .unwrap();
    let found = repo
        .find_credential_by_email(retry.email())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.user_id, retry.id());
}

#[tokio::test]
async fn progress_upsert_keeps_gate_fields() {
    let repo = connect("memdb_progress").await;
    let user = profile("p@example.com");
    repo.insert_profile(&user).await.unwrap();

    let mut row = UserProgress::new_default(user.id());
    repo.insert_progress(&row).await.unwrap();
    assert!(matches!(
        repo.insert_progress(&row).await,
        Err(StorageError::Conflict)
    ));

    row.iq_score = Some(IqScore::new(110));
    row.selected_course = Some(Course::Gre);
    row.record_quiz(90);
    repo.upsert_progress(&row).await.unwrap();

    let stored = repo.get_progress(user.id()).await.unwrap().unwrap();
    assert_eq!(stored, row);
    assert!(stored.gate_state().is_fully_onboarded());
}

#[tokio::test]
async fn todos_are_owner_scoped() {
    let repo = connect("memdb_todos").await;
    let alice = profile("alice@example.com");
    let bob = profile("bob@example.com");
    repo.insert_profile(&alice).await.unwrap();
    repo.insert_profile(&bob).await.unwrap();

    let today = fixed_now().date_naive();
    let draft = |title: &str, days: i64| {
        TodoDraft::new(title, Some(today + Duration::days(days)))
    };
    let later = repo
        .insert_todo(&draft("later", 2).validate(alice.id(), today, fixed_now()).unwrap())
        .await
        .unwrap();
    let first = repo
        .insert_todo(&draft("first", 0).validate(alice.id(), today, fixed_now()).unwrap())
        .await
        .unwrap();

    let listed = repo.list_todos_for_user(alice.id()).await.unwrap();
    assert_eq!(listed.iter().map(|t| t.id()).collect::<Vec<_>>(), [first, later]);
    assert!(repo.list_todos_for_user(bob.id()).await.unwrap().is_empty());

    let mut todo = repo.get_todo(alice.id(), first).await.unwrap().unwrap();
    todo.toggle();
    repo.update_todo(&todo).await.unwrap();
    assert!(
        repo.get_todo(alice.id(), first)
            .await
            .unwrap()
            .unwrap()
            .is_completed()
    );

    assert!(repo.get_todo(bob.id(), first).await.unwrap().is_none());
    assert!(matches!(
        repo.delete_todo(bob.id(), first).await,
        Err(StorageError::NotFound)
    ));
    repo.delete_todo(alice.id(), first).await.unwrap();
    assert_eq!(repo.list_todos_for_user(alice.id()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn forum_posts_keep_tag_order_and_likes() {
    let repo = connect("memdb_forum").await;
    for post in sample_posts(fixed_now()) {
        repo.insert_post(&post).await.unwrap();
    }
    let mine = PostDraft {
        title: "Krebs cycle mnemonics".into(),
        content: "Share yours!".into(),
        tags: vec!["Biology".into(), "memorization".into()],
    }
    .validate(None, "Grace Hopper", "grace@example.com", fixed_now())
    .unwrap();
    let id = repo.insert_post(&mine).await.unwrap();

    let recent = repo.list_recent_posts().await.unwrap();
    assert_eq!(recent.len(), 5);
    assert_eq!(repo.count_posts().await.unwrap(), 5);
    assert_eq!(repo.count_posts_tagged("biology").await.unwrap(), 2);
    assert_eq!(repo.count_posts_tagged("study-groups").await.unwrap(), 0);
    assert_eq!(recent[0].id(), id);
    assert_eq!(recent[1].title(), "Tips for memorizing cell structures?");
    assert_eq!(recent[1].tags(), ["biology", "study-tips", "memorization"]);
    assert_eq!(recent[4].title(), "How do you approach problem-based questions?");

    let fetched = repo.get_post(id).await.unwrap().unwrap();
    assert_eq!(fetched.tags(), ["biology", "memorization"]);
    assert_eq!(repo.increment_likes(id).await.unwrap(), 1);
    assert!(matches!(
        repo.increment_likes(bridge_core::model::PostId::new(999)).await,
        Err(StorageError::NotFound)
    ));
    assert!(repo.get_post(bridge_core::model::PostId::new(999)).await.unwrap().is_none());
}
