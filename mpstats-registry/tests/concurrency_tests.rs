mod common;

use common::FlakyStore;
use mpstats_registry::{GameService, Registry, RegistryError, RegistryResult};
use mpstats_store::{EntityStore, MemoryStore, SqliteStore, StoreResult};
use mpstats_types::{Category, Game, NewCategory, NewGame, RepositoryId};
use std::collections::HashSet;
use std::sync::{Arc, Barrier, Mutex, OnceLock, mpsc};
use std::thread;
use std::time::Duration;

const CALLERS: usize = 16;

#[test]
fn racing_get_or_create_inserts_once() {
    common::init_tracing();
    let store = FlakyStore::<Category>::new();
    let registry = Arc::new(Registry::new(store.clone() as Arc<dyn EntityStore<Category>>).unwrap());
    let barrier = Arc::new(Barrier::new(CALLERS));

    let handles: Vec<_> = (0..CALLERS)
        .map(|i| {
            let registry = registry.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                // Vary the case per caller; it is still one logical name.
                let name = if i % 2 == 0 { "Contended" } else { "CONTENDED" };
                barrier.wait();
                registry.get_or_create(NewCategory::new(name)).unwrap()
            })
        })
        .collect();

    let ids: HashSet<_> = handles
        .into_iter()
        .map(|h| h.join().unwrap().repository_id)
        .collect();

    assert_eq!(ids.len(), 1);
    assert_eq!(store.insert_calls(), 1);
    assert_eq!(store.inner.insert_count(), 1);
    assert_eq!(registry.len(), 1);
}

#[test]
fn racing_get_or_create_on_different_names() {
    let store = FlakyStore::<Category>::new();
    let registry = Arc::new(Registry::new(store.clone() as Arc<dyn EntityStore<Category>>).unwrap());
    let barrier = Arc::new(Barrier::new(CALLERS));

    let handles: Vec<_> = (0..CALLERS)
        .map(|i| {
            let registry = registry.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                // Two callers per name.
                registry
                    .get_or_create(NewCategory::new(format!("category-{}", i / 2)))
                    .unwrap()
            })
        })
        .collect();

    let ids: HashSet<_> = handles
        .into_iter()
        .map(|h| h.join().unwrap().repository_id)
        .collect();

    assert_eq!(ids.len(), CALLERS / 2);
    assert_eq!(store.insert_calls(), CALLERS / 2);
    assert_eq!(registry.len(), CALLERS / 2);
}

#[test]
fn readers_see_either_nothing_or_the_committed_record() {
    let store = FlakyStore::<Category>::new();
    let registry = Arc::new(Registry::new(store.clone() as Arc<dyn EntityStore<Category>>).unwrap());
    let barrier = Arc::new(Barrier::new(2));

    let reader = {
        let registry = registry.clone();
        let barrier = barrier.clone();
        thread::spawn(move || {
            barrier.wait();
            for _ in 0..1_000 {
                if let Some(found) = registry.get("late") {
                    // Anything visible must already be in the store.
                    assert!(registry.has("LATE"));
                    return Some(found.repository_id);
                }
                thread::yield_now();
            }
            None
        })
    };

    barrier.wait();
    let created = registry.get_or_create(NewCategory::new("Late")).unwrap();
    if let Some(seen) = reader.join().unwrap() {
        assert_eq!(seen, created.repository_id);
    }
    assert!(store.inner.find_by_name("late").unwrap().is_some());
}

#[test]
fn racing_get_or_create_game_on_sqlite() {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    let service = Arc::new(GameService::with_store(store.clone()).unwrap());
    let barrier = Arc::new(Barrier::new(CALLERS));

    let handles: Vec<_> = (0..CALLERS)
        .map(|_| {
            let service = service.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                service
                    .get_or_create_game("W1", "RaceGame", "C1", "RaceCategory")
                    .unwrap()
            })
        })
        .collect();

    let ids: HashSet<_> = handles
        .into_iter()
        .map(|h| h.join().unwrap().repository_id)
        .collect();

    assert_eq!(ids.len(), 1);
    assert_eq!(store.count::<Game>().unwrap(), 1);
    assert_eq!(store.count::<Category>().unwrap(), 1);
}

/// Game store that runs a callback right before each insert.
#[derive(Default)]
struct HookedGameStore {
    inner: MemoryStore<Game>,
    before_insert: OnceLock<Box<dyn Fn(&NewGame) + Send + Sync>>,
}

impl EntityStore<Game> for HookedGameStore {
    fn insert(&self, attributes: &NewGame) -> StoreResult<RepositoryId> {
        if let Some(hook) = self.before_insert.get() {
            hook(attributes);
        }
        self.inner.insert(attributes)
    }

    fn find_by_name(&self, name: &str) -> StoreResult<Option<Game>> {
        self.inner.find_by_name(name)
    }

    fn find_by_id(&self, id: RepositoryId) -> StoreResult<Option<Game>> {
        self.inner.find_by_id(id)
    }

    fn list_all(&self) -> StoreResult<Vec<Game>> {
        self.inner.list_all()
    }

    fn delete_by_name(&self, name: &str) -> StoreResult<()> {
        self.inner.delete_by_name(name)
    }
}

#[test]
fn delete_category_cannot_slip_between_category_and_game_creation() {
    common::init_tracing();
    let game_store = Arc::new(HookedGameStore::default());
    let category_store: Arc<dyn EntityStore<Category>> = Arc::new(MemoryStore::<Category>::new());
    let service = Arc::new(
        GameService::new(game_store.clone() as Arc<dyn EntityStore<Game>>, category_store).unwrap(),
    );

    // Once the category exists and the game insert is under way, another
    // thread tries to delete that category.
    let deleter: Arc<Mutex<Option<thread::JoinHandle<RegistryResult<()>>>>> = Arc::default();
    {
        let service = Arc::downgrade(&service);
        let deleter = deleter.clone();
        let hook = move |attributes: &NewGame| {
            let Some(service) = service.upgrade() else {
                return;
            };
            let category = attributes.category_name.clone();
            let (done_tx, done_rx) = mpsc::channel();
            let handle = thread::spawn(move || {
                let result = service.delete_category(&category);
                let _ = done_tx.send(());
                result
            });
            // Let an unblocked deleter finish before the game row is written.
            let _ = done_rx.recv_timeout(Duration::from_millis(200));
            *deleter.lock().unwrap() = Some(handle);
        };
        assert!(game_store.before_insert.set(Box::new(hook)).is_ok());
    }

    let game = service
        .get_or_create_game("W1", "GAME1", "C1", "CATEGORY1")
        .unwrap();
    let handle = deleter.lock().unwrap().take().expect("insert hook did not run");
    let deleted = handle.join().unwrap();

    assert!(
        matches!(deleted, Err(RegistryError::InUse { references: 1, .. })),
        "unexpected delete result: {deleted:?}"
    );
    assert!(service.has_category(&game.category_name));
    assert_eq!(service.get_game("game1"), Some(game));
}
