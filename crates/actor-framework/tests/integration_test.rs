use actor_framework::{ActorEntity, FrameworkError, ResourceActor};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Station {
    id: String,
    cooks: u32,
    open: bool,
}

#[derive(Debug)]
struct StationCreate {
    name: String,
    cooks: u32,
}

#[derive(Debug)]
struct StationUpdate {
    cooks: Option<u32>,
}

#[derive(Debug)]
enum StationAction {
    Open,
    Close,
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum StationError {
    #[error("station needs at least one cook")]
    NoCooks,
    #[error("station {0} is open")]
    StillOpen(String),
}

#[async_trait]
impl ActorEntity for Station {
    type Id = String;
    type Create = StationCreate;
    type Update = StationUpdate;
    type Action = StationAction;
    type ActionResult = bool;
    type Context = Arc<AtomicUsize>;
    type Error = StationError;

    fn assign_id(params: &StationCreate, _sequence: u64) -> String {
        params.name.clone()
    }

    fn from_create_params(id: String, params: StationCreate) -> Result<Self, Self::Error> {
        if params.cooks == 0 {
            return Err(StationError::NoCooks);
        }
        Ok(Self {
            id,
            cooks: params.cooks,
            open: false,
        })
    }

    async fn on_update(
        &mut self,
        update: StationUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(cooks) = update.cooks {
            self.cooks = cooks;
        }
        Ok(())
    }

    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        if self.open {
            return Err(StationError::StillOpen(self.id.clone()));
        }
        Ok(())
    }

    async fn on_shutdown(&mut self, ctx: &Self::Context) {
        ctx.fetch_add(1, Ordering::SeqCst);
    }

    async fn handle_action(
        &mut self,
        action: StationAction,
        _ctx: &Self::Context,
    ) -> Result<bool, Self::Error> {
        let was_open = self.open;
        self.open = matches!(action, StationAction::Open);
        Ok(was_open != self.open)
    }
}

fn spawn_stations() -> (
    actor_framework::ResourceClient<Station>,
    Arc<AtomicUsize>,
    tokio::task::JoinHandle<()>,
) {
    let shutdowns = Arc::new(AtomicUsize::new(0));
    let (actor, client) = ResourceActor::new(10);
    let handle = tokio::spawn(actor.run(shutdowns.clone()));
    (client, shutdowns, handle)
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (client, _, _) = spawn_stations();

    // 1. Create, keyed by name
    let id = client
        .create(StationCreate {
            name: "grill".into(),
            cooks: 2,
        })
        .await
        .unwrap();
    assert_eq!(id, "grill");

    // 2. Action changes state once
    assert!(client
        .perform_action(id.clone(), StationAction::Open)
        .await
        .unwrap());
    assert!(!client
        .perform_action(id.clone(), StationAction::Open)
        .await
        .unwrap());

    // 3. on_delete can veto
    let err = client.delete(id.clone()).await.unwrap_err();
    assert_eq!(
        err.into_entity_error::<StationError>().unwrap(),
        StationError::StillOpen("grill".into())
    );

    // 4. Update
    let updated = client
        .update(id.clone(), StationUpdate { cooks: Some(3) })
        .await
        .unwrap();
    assert_eq!(updated.cooks, 3);

    // 5. Delete once closed
    client
        .perform_action(id.clone(), StationAction::Close)
        .await
        .unwrap();
    client.delete(id.clone()).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_id_is_rejected() {
    let (client, _, _) = spawn_stations();

    let create = || StationCreate {
        name: "fryer".into(),
        cooks: 1,
    };
    client.create(create()).await.unwrap();
    let err = client.create(create()).await.unwrap_err();
    assert!(matches!(err, FrameworkError::AlreadyExists(ref id) if id == "fryer"));
}

#[tokio::test]
async fn test_create_error_is_typed() {
    let (client, _, _) = spawn_stations();

    let err = client
        .create(StationCreate {
            name: "pastry".into(),
            cooks: 0,
        })
        .await
        .unwrap_err();
    assert_eq!(
        err.into_entity_error::<StationError>().unwrap(),
        StationError::NoCooks
    );
    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_is_ordered_by_id() {
    let (client, _, _) = spawn_stations();

    for name in ["wok", "grill", "salad"] {
        client
            .create(StationCreate {
                name: name.into(),
                cooks: 1,
            })
            .await
            .unwrap();
    }

    let ids: Vec<String> = client
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec!["grill", "salad", "wok"]);
}

#[tokio::test]
async fn test_missing_entity_reports_not_found() {
    let (client, _, _) = spawn_stations();

    let err = client
        .perform_action("nowhere".into(), StationAction::Open)
        .await
        .unwrap_err();
    assert!(matches!(err, FrameworkError::NotFound(ref id) if id == "nowhere"));
}

#[tokio::test]
async fn test_shutdown_runs_hook_for_every_entity() {
    let (client, shutdowns, handle) = spawn_stations();

    for name in ["grill", "wok"] {
        client
            .create(StationCreate {
                name: name.into(),
                cooks: 1,
            })
            .await
            .unwrap();
    }

    // A weak client alone does not keep the actor running.
    let weak = client.downgrade();
    drop(client);
    handle.await.unwrap();

    assert_eq!(shutdowns.load(Ordering::SeqCst), 2);
    assert!(weak.upgrade().is_none());
}
