use crate::clients::ProductClient;
use crate::product_actor;
use crate::settings::{Settings, StorageBackend};
use crate::state::CatalogState;
use atelier_actor::{JsonFileStorage, StorageError};
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

/// Runtime owner of the catalog's actors.
///
/// ```ignore
/// let system = CatalogSystem::start(&Settings::load()?).await?;
/// let id = system.product_client.create_product(params).await?;
/// system.shutdown().await?;
/// ```
pub struct CatalogSystem {
    /// Client for interacting with the Product actor
    pub product_client: ProductClient,

    handles: Vec<JoinHandle<()>>,
}

impl CatalogSystem {
    /// Opens the configured storage and spawns the product actor.
    ///
    /// Fails when the `json_file` document exists but cannot be read or parsed.
    pub async fn start(settings: &Settings) -> Result<Self, StorageError> {
        let buffer_size = settings.actor.buffer_size;
        let (actor, client) = match settings.storage.backend {
            StorageBackend::Memory => product_actor::new(buffer_size),
            StorageBackend::JsonFile => {
                let storage = JsonFileStorage::open(&settings.storage.path).await?;
                product_actor::with_storage(buffer_size, storage)
            }
        };
        info!(
            backend = ?settings.storage.backend,
            buffer_size,
            "Starting catalog system"
        );

        let product_handle = tokio::spawn(actor.run(()));

        Ok(Self {
            product_client: ProductClient::new(client),
            handles: vec![product_handle],
        })
    }

    /// A fresh state container over this system's product client.
    pub fn state(&self) -> CatalogState {
        CatalogState::new(self.product_client.clone())
    }

    /// Drops the system's client and waits for the actors to finish.
    ///
    /// Every other client clone must be dropped first, or this waits forever.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down catalog system...");
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(e);
            }
        }

        info!("Catalog system shutdown complete.");
        Ok(())
    }
}
