//! # Generic Messages
//!
//! The request type carried from a `ResourceClient` to its `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Request sent to the actor.
///
/// The variants map to the CRUD lifecycle of a stored record plus `List` for the
/// whole collection and `Action` for record-specific operations. Every variant carries
/// its own `respond_to` channel, so each request is answered exactly once.
///
/// - **Create**: builds a record from [`ActorEntity::Create`] and stores it.
/// - **Get**: fetches one record by ID.
/// - **List**: returns every record, sorted by [`ActorEntity::listing_order`].
/// - **Update**: applies [`ActorEntity::Update`] and stores the result.
/// - **Delete**: removes a record.
/// - **Action**: runs an [`ActorEntity::Action`] and stores the result.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
