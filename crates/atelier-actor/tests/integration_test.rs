use async_trait::async_trait;
use atelier_actor::{
    ActorEntity, FrameworkError, JsonFileStorage, ResourceActor, Storage, StorageError,
};
use std::cmp::Ordering;
use std::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
struct Pattern {
    id: u32,
    name: String,
    pieces: u32,
    archived: bool,
}

#[derive(Debug)]
struct PatternCreate {
    name: String,
    pieces: u32,
}

#[derive(Debug)]
struct PatternUpdate {
    name: Option<String>,
}

#[derive(Debug)]
enum PatternAction {
    Archive,
    AddPieces(u32),
}

#[derive(Debug, thiserror::Error)]
enum PatternError {
    #[error("pattern name must not be empty")]
    EmptyName,
    #[error("pattern already archived")]
    AlreadyArchived,
}

#[async_trait]
impl ActorEntity for Pattern {
    type Id = u32;
    type Create = PatternCreate;
    type Update = PatternUpdate;
    type Action = PatternAction;
    type ActionResult = u32;
    type Context = ();
    type Error = PatternError;

    fn id(&self) -> &u32 {
        &self.id
    }

    fn from_create_params(id: u32, params: PatternCreate) -> Result<Self, PatternError> {
        if params.name.is_empty() {
            return Err(PatternError::EmptyName);
        }
        Ok(Self {
            id,
            name: params.name,
            pieces: params.pieces,
            archived: false,
        })
    }

    // Newest first
    fn listing_order(&self, other: &Self) -> Ordering {
        other.id.cmp(&self.id)
    }

    async fn on_update(&mut self, update: PatternUpdate, _ctx: &()) -> Result<(), PatternError> {
        if let Some(name) = update.name {
            if name.is_empty() {
                return Err(PatternError::EmptyName);
            }
            self.name = name;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: PatternAction, _ctx: &()) -> Result<u32, PatternError> {
        match action {
            PatternAction::Archive => {
                if self.archived {
                    return Err(PatternError::AlreadyArchived);
                }
                self.archived = true;
                Ok(self.pieces)
            }
            PatternAction::AddPieces(n) => {
                self.pieces += n;
                Ok(self.pieces)
            }
        }
    }
}

fn sequential_ids() -> impl Fn() -> u32 + Send + Sync + 'static {
    let counter = AtomicU32::new(1);
    move || counter.fetch_add(1, AtomicOrdering::SeqCst)
}

fn create(name: &str, pieces: u32) -> PatternCreate {
    PatternCreate {
        name: name.to_string(),
        pieces,
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::<Pattern>::new(10, sequential_ids());
    let handle = tokio::spawn(actor.run(()));

    // 1. Create
    let id = client.create(create("Wrap skirt", 4)).await.unwrap();
    assert_eq!(id, 1);

    // 2. Action mutates and is persisted
    let pieces = client.perform_action(id, PatternAction::AddPieces(2)).await.unwrap();
    assert_eq!(pieces, 6);
    let stored = client.get(id).await.unwrap().unwrap();
    assert_eq!(stored.pieces, 6);

    // 3. Update
    let updated = client
        .update(
            id,
            PatternUpdate {
                name: Some("Wrap skirt v2".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Wrap skirt v2");

    // 4. Delete
    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_list_uses_listing_order() {
    let (actor, client) = ResourceActor::<Pattern>::new(10, sequential_ids());
    tokio::spawn(actor.run(()));

    for name in ["Blouse", "Coat", "Trousers"] {
        client.create(create(name, 1)).await.unwrap();
    }

    let names: Vec<String> = client
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Trousers", "Coat", "Blouse"]);
}

#[tokio::test]
async fn test_missing_records_are_not_found() {
    let (actor, client) = ResourceActor::<Pattern>::new(10, sequential_ids());
    tokio::spawn(actor.run(()));

    let update = client.update(42, PatternUpdate { name: None }).await;
    assert!(matches!(update, Err(FrameworkError::NotFound(id)) if id == "42"));

    let delete = client.delete(42).await;
    assert!(matches!(delete, Err(FrameworkError::NotFound(_))));

    let action = client.perform_action(42, PatternAction::Archive).await;
    assert!(matches!(action, Err(FrameworkError::NotFound(_))));
}

#[tokio::test]
async fn test_failed_hook_leaves_record_untouched() {
    let (actor, client) = ResourceActor::<Pattern>::new(10, sequential_ids());
    tokio::spawn(actor.run(()));

    let rejected = client.create(create("", 1)).await;
    match rejected {
        Err(FrameworkError::EntityError(e)) => {
            assert!(matches!(
                e.downcast_ref::<PatternError>(),
                Some(PatternError::EmptyName)
            ));
        }
        other => panic!("expected entity error, got {:?}", other),
    }
    assert!(client.list().await.unwrap().is_empty());

    let id = client.create(create("Jacket", 9)).await.unwrap();
    client.perform_action(id, PatternAction::Archive).await.unwrap();
    let again = client.perform_action(id, PatternAction::Archive).await;
    assert!(matches!(again, Err(FrameworkError::EntityError(_))));

    let rename = client
        .update(
            id,
            PatternUpdate {
                name: Some(String::new()),
            },
        )
        .await;
    assert!(rename.is_err());
    assert_eq!(client.get(id).await.unwrap().unwrap().name, "Jacket");
}

#[tokio::test]
async fn test_concurrent_actions_are_serialized() {
    let (actor, client) = ResourceActor::<Pattern>::new(64, sequential_ids());
    tokio::spawn(actor.run(()));
    let id = client.create(create("Shirt", 0)).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..50 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.perform_action(id, PatternAction::AddPieces(1)).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(client.get(id).await.unwrap().unwrap().pieces, 50);
}

#[tokio::test]
async fn test_actor_over_json_file_storage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("patterns.json");

    let storage = JsonFileStorage::<Pattern>::open(&path).await.unwrap();
    let (actor, client) = ResourceActor::<Pattern>::with_storage(10, storage, sequential_ids());
    let handle = tokio::spawn(actor.run(()));
    let id = client.create(create("Dress", 7)).await.unwrap();
    client.perform_action(id, PatternAction::AddPieces(1)).await.unwrap();
    drop(client);
    handle.await.unwrap();

    let reopened = JsonFileStorage::<Pattern>::open(&path).await.unwrap();
    let stored = reopened.fetch(&id).await.unwrap().unwrap();
    assert_eq!(stored.pieces, 8);
}

struct BrokenStorage;

#[async_trait]
impl Storage<Pattern> for BrokenStorage {
    async fn insert(&mut self, _: Pattern) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disk unplugged".into()))
    }
    async fn fetch(&self, _: &u32) -> Result<Option<Pattern>, StorageError> {
        Err(StorageError::Unavailable("disk unplugged".into()))
    }
    async fn replace(&mut self, _: Pattern) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disk unplugged".into()))
    }
    async fn remove(&mut self, _: &u32) -> Result<bool, StorageError> {
        Err(StorageError::Unavailable("disk unplugged".into()))
    }
    async fn list(&self) -> Result<Vec<Pattern>, StorageError> {
        Err(StorageError::Unavailable("disk unplugged".into()))
    }
    fn len(&self) -> usize {
        0
    }
}

#[tokio::test]
async fn test_storage_errors_reach_the_caller() {
    let (actor, client) = ResourceActor::<Pattern>::with_storage(10, BrokenStorage, sequential_ids());
    tokio::spawn(actor.run(()));

    let created = client.create(create("Vest", 2)).await;
    assert!(matches!(
        created,
        Err(FrameworkError::Storage(StorageError::Unavailable(_)))
    ));
    assert!(matches!(
        client.list().await,
        Err(FrameworkError::Storage(_))
    ));
    assert!(matches!(client.get(1).await, Err(FrameworkError::Storage(_))));
}
