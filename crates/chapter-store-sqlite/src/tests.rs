//! Integration tests for `SqliteStore` against an in-memory database.

use chapter_core::{
  document::{Document, Staged},
  record::{
    Event, EventStatus, NewEvent, NewNews, NewTeamMember, News, TeamMember,
  },
  store::DocumentStore,
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn event(title: &str, date: &str, status: EventStatus) -> NewEvent {
  NewEvent {
    title: title.into(),
    date: Some(date.parse().unwrap()),
    status,
    ..NewEvent::default()
  }
}

// ─── Insert / get ────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_assigns_id_and_get_returns_it() {
  let s = store().await;

  let stored: Event = s
    .insert::<Event>(event("Study Jam", "2024-06-01", EventStatus::Ongoing))
    .await
    .unwrap();
  assert!(!stored.id.is_empty());

  let fetched = s.get::<Event>(stored.id.clone()).await.unwrap();
  assert_eq!(fetched, Some(stored));
}

#[tokio::test]
async fn insert_assigns_distinct_ids() {
  let s = store().await;
  let a: Event = s
    .insert::<Event>(event("A", "2024-01-01", EventStatus::Past))
    .await
    .unwrap();
  let b: Event = s
    .insert::<Event>(event("A", "2024-01-01", EventStatus::Past))
    .await
    .unwrap();
  assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  let result = s.get::<Event>("nope".into()).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn fields_survive_storage() {
  let s = store().await;

  let draft = NewEvent {
    title:       "DevFest".into(),
    date:        Some("2024-11-02T09:30:00Z".parse().unwrap()),
    description: Some("All-day conference".into()),
    image:       Some("https://example.com/devfest.png".into()),
    link:        Some("https://example.com/devfest".into()),
    status:      EventStatus::Upcoming,
  };
  let stored: Event = s.insert::<Event>(draft).await.unwrap();

  let all = s.list::<Event>().await.unwrap();
  assert_eq!(all.len(), 1);
  let e = &all[0];
  assert_eq!(e.id, stored.id);
  assert_eq!(e.title, "DevFest");
  assert_eq!(e.description.as_deref(), Some("All-day conference"));
  assert_eq!(e.link.as_deref(), Some("https://example.com/devfest"));
  assert_eq!(e.date, stored.date);
  assert_eq!(e.status(), Some(EventStatus::Upcoming));
}

// ─── List ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_empty_collection() {
  let s = store().await;
  let all = s.list::<News>().await.unwrap();
  assert!(all.is_empty());
}

#[tokio::test]
async fn list_keeps_insertion_order_not_date_order() {
  let s = store().await;
  for (title, date) in
    [("third", "2024-03-01"), ("first", "2024-01-01"), ("second", "2024-02-01")]
  {
    s.insert::<Event>(event(title, date, EventStatus::Upcoming))
      .await
      .unwrap();
  }

  let titles: Vec<_> = s
    .list::<Event>()
    .await
    .unwrap()
    .into_iter()
    .map(|e| e.title)
    .collect();
  assert_eq!(titles, ["third", "first", "second"]);
}

#[tokio::test]
async fn collections_are_isolated() {
  let s = store().await;

  let member: TeamMember = s
    .insert::<TeamMember>(NewTeamMember {
      name: "Ada".into(),
      role: Some("Organizer".into()),
      is_lead: true,
      ..NewTeamMember::default()
    })
    .await
    .unwrap();
  s.insert::<News>(NewNews {
    title: "Hiring".into(),
    kind: Some("job".into()),
    ..NewNews::default()
  })
  .await
  .unwrap();

  assert_eq!(s.list::<TeamMember>().await.unwrap(), vec![member.clone()]);
  assert_eq!(s.list::<News>().await.unwrap().len(), 1);
  assert!(s.list::<Event>().await.unwrap().is_empty());

  // An id from one collection is not reachable through another.
  assert!(s.get::<News>(member.id.clone()).await.unwrap().is_none());
  assert!(!s.remove::<Event>(member.id.clone()).await.unwrap());
  assert!(s.get::<TeamMember>(member.id).await.unwrap().is_some());
}

// ─── Remove ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn remove_existing_then_missing() {
  let s = store().await;
  let stored: News = s
    .insert::<News>(NewNews {
      title: "Announcement".into(),
      ..NewNews::default()
    })
    .await
    .unwrap();

  assert!(s.remove::<News>(stored.id().to_owned()).await.unwrap());
  assert!(s.list::<News>().await.unwrap().is_empty());
  assert!(!s.remove::<News>(stored.id().to_owned()).await.unwrap());
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn reopening_a_file_store_keeps_documents() {
  let dir = std::env::temp_dir().join(format!(
    "chapter-store-test-{}",
    uuid::Uuid::new_v4()
  ));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("chapter.db");

  let stored: Event = {
    let s = SqliteStore::open(&path).await.unwrap();
    s.insert::<Event>(event("Kept", "2024-05-05", EventStatus::Past))
      .await
      .unwrap()
  };

  let reopened = SqliteStore::open(&path).await.unwrap();
  let all = reopened.list::<Event>().await.unwrap();
  assert_eq!(all, vec![stored]);

  drop(reopened);
  std::fs::remove_dir_all(&dir).ok();
}

// ─── Corruption ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn non_object_body_is_reported_as_malformed() {
  let s = store().await;
  s.conn_for_tests()
    .call(|conn| {
      conn.execute(
        "INSERT INTO documents (id, collection, body, created_at)
         VALUES ('bad', 'events', '[1, 2]', '2024-01-01T00:00:00Z')",
        [],
      )?;
      Ok(())
    })
    .await
    .unwrap();

  let err = s.list::<Event>().await.unwrap_err();
  assert!(matches!(err, Error::Malformed { ref id, .. } if id == "bad"));
}
