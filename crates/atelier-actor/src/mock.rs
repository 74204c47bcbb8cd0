//! # Mock Framework & Testing Guide
//!
//! Client wrappers (such as a product client that turns actions into typed results) can be
//! tested without spawning a real `ResourceActor`.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | Mock | Real Actor |
//! |---------|------|------------|
//! | **Speed** | Instant | Fast (tokio spawn) |
//! | **State** | None, scripted replies | Real storage |
//! | **Use Case** | Logic *around* the client | The entity hooks or the whole system |
//! | **Error Injection** | Easy (`return_err`) | Needs a failing storage backend |
//!
//! ## Two styles
//!
//! **Receiver style**: [`create_mock_client`] hands back the raw request receiver, and the
//! `expect_*` helpers pull the next request off it so the test can inspect the payload and
//! answer through `respond_to`.
//!
//! ```rust,ignore
//! let (client, mut receiver) = create_mock_client::<Product>(10);
//! let task = tokio::spawn(async move { ProductClient::new(client).add_image(id, image).await });
//! let (id, action, responder) = expect_action(&mut receiver).await.unwrap();
//! responder.send(Ok(ProductActionResult::ImageAdded(image_id))).unwrap();
//! ```
//!
//! **Scripted style**: [`MockClient`] answers requests in order from a queue of
//! expectations and panics on a mismatch; call [`MockClient::verify`] at the end.
//!
//! ```rust,ignore
//! let mut mock = MockClient::<Product>::new();
//! mock.expect_list().return_ok(vec![product]);
//! mock.expect_get(id).return_err(FrameworkError::ActorClosed);
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A scripted reply, consumed in FIFO order by [`MockClient`].
enum Expectation<T: ActorEntity> {
    Get {
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Update {
        response: Result<T, FrameworkError>,
    },
    Delete {
        response: Result<(), FrameworkError>,
    },
    Action {
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<(Option<<T as ActorEntity>::Id>, Expectation<T>)>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations that name an ID assert that the incoming request targets that ID.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().unwrap().pop_front();
                let Some((expected_id, expectation)) = next else {
                    panic!("Unexpected request: {:?}", request);
                };

                match (request, expectation) {
                    (ResourceRequest::Get { id, respond_to }, Expectation::Get { response }) => {
                        assert_id(expected_id, id);
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to }, Expectation::List { response }) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Expectation::Create { response },
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Expectation::Update { response },
                    ) => {
                        assert_id(expected_id, id);
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Expectation::Delete { response },
                    ) => {
                        assert_id(expected_id, id);
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Expectation::Action { response },
                    ) => {
                        assert_id(expected_id, id);
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Request does not match the next expectation: {:?}", request);
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(Some(id), |response| Expectation::Get { response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(None, |response| Expectation::List { response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(None, |response| Expectation::Create { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(Some(id), |response| Expectation::Update { response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(Some(id), |response| Expectation::Delete { response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(Some(id), |response| Expectation::Action { response })
    }

    /// Panics if any expectation is still queued.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn builder<R>(
        &self,
        id: Option<T::Id>,
        wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            id,
            wrap,
            expectations: self.expectations.clone(),
        }
    }
}

fn assert_id<Id: PartialEq + std::fmt::Debug>(expected: Option<Id>, actual: Id) {
    if let Some(expected) = expected {
        assert_eq!(expected, actual, "request targeted an unexpected id");
    }
}

/// Completes an expectation with its reply.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    id: Option<T::Id>,
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    expectations: Queue<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Reply with a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Reply with an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.wrap)(response);
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.id, expectation));
    }
}

// =============================================================================
// RECEIVER-STYLE HELPERS
// =============================================================================

/// Creates a client together with the receiver its requests arrive on.
///
/// The test plays the actor: pull requests with the `expect_*` helpers below, assert on
/// their payloads and answer through the returned responder.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

type Responder<R> = oneshot::Sender<Result<R, FrameworkError>>;

/// Next message must be a Create request.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, Responder<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next message must be a Get request.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Responder<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message must be a List request.
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<Responder<Vec<T>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Next message must be an Update request.
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, Responder<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Next message must be an Action request.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Responder<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Swatch {
        id: u32,
        color: String,
    }

    #[derive(Debug)]
    struct SwatchCreate {
        color: String,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("swatch error")]
    struct SwatchError;

    #[async_trait]
    impl ActorEntity for Swatch {
        type Id = u32;
        type Create = SwatchCreate;
        type Update = ();
        type Action = ();
        type ActionResult = ();
        type Context = ();
        type Error = SwatchError;

        fn id(&self) -> &u32 {
            &self.id
        }

        fn from_create_params(id: u32, params: SwatchCreate) -> Result<Self, SwatchError> {
            Ok(Self {
                id,
                color: params.color,
            })
        }

        async fn on_update(&mut self, _: (), _: &()) -> Result<(), SwatchError> {
            Ok(())
        }

        async fn handle_action(&mut self, _: (), _: &()) -> Result<(), SwatchError> {
            Ok(())
        }
    }

    fn swatch(id: u32, color: &str) -> Swatch {
        Swatch {
            id,
            color: color.to_string(),
        }
    }

    #[tokio::test]
    async fn test_receiver_style_create() {
        let (client, mut receiver) = create_mock_client::<Swatch>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(SwatchCreate {
                    color: "ochre".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.color, "ochre");
        responder.send(Ok(3)).unwrap();

        let result = create_task.await.unwrap();
        assert!(matches!(result, Ok(3)));
    }

    #[tokio::test]
    async fn test_scripted_replies_in_order() {
        let mut mock = MockClient::<Swatch>::new();
        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(swatch(1, "teal")));
        mock.expect_list()
            .return_ok(vec![swatch(1, "teal"), swatch(2, "rust")]);
        mock.expect_delete(2).return_err(FrameworkError::NotFound("2".into()));

        let client = mock.client();

        let id = client
            .create(SwatchCreate {
                color: "teal".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);
        assert_eq!(client.get(1).await.unwrap(), Some(swatch(1, "teal")));
        assert_eq!(client.list().await.unwrap().len(), 2);
        assert!(matches!(
            client.delete(2).await,
            Err(FrameworkError::NotFound(id)) if id == "2"
        ));

        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_verify_reports_unmet_expectations() {
        let mut mock = MockClient::<Swatch>::new();
        mock.expect_list().return_ok(Vec::new());
        mock.verify();
    }
}
