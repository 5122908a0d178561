use async_trait::async_trait;
use namespace_sync::common::{DEFAULT_NAMESPACE_NAME, WILDCARD_NAMESPACE};
use namespace_sync::namespace::{
    ensure_deleted, ensure_exists, namespace_id, CrossNamespacePolicy, NamespaceError,
    NamespaceReconciler, AUTO_GENERATED_DESCRIPTION, DELETION_TIMESTAMP_KEY,
};
use resource_service::mock::{MockCall, MockResourceClient};
use resource_service::tenancy::Namespace;
use resource_service::{Code, RequestContext, Resource, ResourceError, ResourceServiceClient};
use std::collections::HashMap;
use std::error::Error as _;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const PARTITION: &str = "ap1";

fn live(name: &str) -> Resource {
    let mut resource = Resource::new(namespace_id(PARTITION, name));
    resource.version = "3".to_string();
    resource
}

fn marked(name: &str, stamp: &str) -> Resource {
    live(name).with_metadata(DELETION_TIMESTAMP_KEY, stamp)
}

#[tokio::test]
async fn test_reserved_names_never_reach_the_client() {
    let mock = MockResourceClient::new();
    let ctx = RequestContext::default();

    for name in [WILDCARD_NAMESPACE, DEFAULT_NAMESPACE_NAME] {
        ensure_deleted(&ctx, &mock, PARTITION, name).await.unwrap();
        assert!(!ensure_exists(&ctx, &mock, PARTITION, name).await.unwrap());
    }

    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_ensure_deleted_absent_is_ok() {
    let mock = MockResourceClient::new();
    mock.expect_read(namespace_id(PARTITION, "team-a"))
        .return_err(ResourceError::not_found("no namespace"));

    ensure_deleted(&RequestContext::default(), &mock, PARTITION, "team-a")
        .await
        .unwrap();

    mock.verify();
    assert_eq!(mock.calls().len(), 1);
}

#[tokio::test]
async fn test_ensure_deleted_marked_is_ok_without_delete() {
    let mock = MockResourceClient::new();
    mock.expect_read(namespace_id(PARTITION, "team-a"))
        .return_ok(marked("team-a", ""));

    ensure_deleted(&RequestContext::default(), &mock, PARTITION, "team-a")
        .await
        .unwrap();

    mock.verify();
    assert_eq!(mock.calls().len(), 1);
}

#[tokio::test]
async fn test_ensure_deleted_live_issues_one_unconditional_delete() {
    let mock = MockResourceClient::new();
    let id = namespace_id(PARTITION, "team-a");
    mock.expect_read(id.clone()).return_ok(live("team-a"));
    mock.expect_delete(id.clone()).return_ok();

    let ctx = RequestContext::default().with_header("authorization", "token");
    ensure_deleted(&ctx, &mock, PARTITION, "team-a").await.unwrap();

    mock.verify();
    let calls = mock.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[1],
        MockCall::Delete {
            ctx,
            id,
            version: None
        }
    );
}

#[tokio::test]
async fn test_ensure_deleted_twice_never_errors() {
    let mock = MockResourceClient::new();
    let id = namespace_id(PARTITION, "team-a");
    mock.expect_read(id.clone()).return_ok(live("team-a"));
    mock.expect_delete(id.clone()).return_ok();
    mock.expect_read(id.clone()).return_ok(marked("team-a", "1760600000"));
    mock.expect_read(id).return_err(ResourceError::not_found("gone"));

    let ctx = RequestContext::default();
    for _ in 0..3 {
        ensure_deleted(&ctx, &mock, PARTITION, "team-a").await.unwrap();
    }
    mock.verify();
}

#[tokio::test]
async fn test_ensure_deleted_wraps_read_failure() {
    let mock = MockResourceClient::new();
    mock.expect_read(namespace_id(PARTITION, "team-a"))
        .return_err(ResourceError::unavailable("connection refused"));

    let err = ensure_deleted(&RequestContext::default(), &mock, PARTITION, "team-a")
        .await
        .unwrap_err();

    assert!(matches!(err, NamespaceError::Read(_)));
    assert!(err.to_string().starts_with("namespace read failed: "));
    assert_eq!(err.code(), Some(Code::Unavailable));
    let cause = err.source().and_then(|s| s.downcast_ref::<ResourceError>()).unwrap();
    assert_eq!(cause, &ResourceError::unavailable("connection refused"));
}

#[tokio::test]
async fn test_ensure_deleted_wraps_delete_failure() {
    let mock = MockResourceClient::new();
    let id = namespace_id(PARTITION, "team-a");
    mock.expect_read(id.clone()).return_ok(live("team-a"));
    mock.expect_delete(id)
        .return_err(ResourceError::new(Code::Internal, "raft apply failed"));

    let err = ensure_deleted(&RequestContext::default(), &mock, PARTITION, "team-a")
        .await
        .unwrap_err();

    assert!(matches!(err, NamespaceError::Delete(_)));
    assert_eq!(
        err.to_string(),
        "namespace delete failed: internal: raft apply failed"
    );
}

#[tokio::test]
async fn test_ensure_exists_creates_absent_namespace() {
    let mock = MockResourceClient::new();
    let id = namespace_id(PARTITION, "team-a");
    mock.expect_read(id.clone())
        .return_err(ResourceError::not_found("no namespace"));
    mock.expect_write().return_ok();

    let ctx = RequestContext::default();
    let created = ensure_exists(&ctx, &mock, PARTITION, "team-a").await.unwrap();
    assert!(created);
    mock.verify();

    let calls = mock.calls();
    assert_eq!(calls.len(), 2);
    let MockCall::Write { resource, .. } = &calls[1] else {
        panic!("expected a write, got {:?}", calls[1]);
    };
    assert_eq!(resource.id, id);
    assert!(resource.version.is_empty());
    assert_eq!(
        resource.metadata,
        HashMap::from([("external-source".to_string(), "kubernetes".to_string())])
    );
    let payload: Namespace = resource.data.as_ref().unwrap().to().unwrap();
    assert_eq!(payload.description, AUTO_GENERATED_DESCRIPTION);
}

#[tokio::test]
async fn test_ensure_exists_live_is_noop() {
    let mock = MockResourceClient::new();
    mock.expect_read(namespace_id(PARTITION, "team-a"))
        .return_ok(live("team-a"));

    let created = ensure_exists(&RequestContext::default(), &mock, PARTITION, "team-a")
        .await
        .unwrap();

    assert!(!created);
    mock.verify();
    assert_eq!(mock.calls().len(), 1);
}

#[tokio::test]
async fn test_ensure_exists_refuses_while_deleting() {
    let mock = MockResourceClient::new();
    mock.expect_read(namespace_id(PARTITION, "team-a"))
        .return_ok(marked("team-a", "1760600000"));

    let err = ensure_exists(&RequestContext::default(), &mock, PARTITION, "team-a")
        .await
        .unwrap_err();

    assert!(matches!(err, NamespaceError::DeletionInProgress(ref ns) if ns == "team-a"));
    assert!(err.to_string().contains("team-a"));
    assert!(mock
        .calls()
        .iter()
        .all(|c| !matches!(c, MockCall::Write { .. })));
}

#[tokio::test]
async fn test_ensure_exists_wraps_read_failure() {
    let mock = MockResourceClient::new();
    mock.expect_read(namespace_id(PARTITION, "team-a"))
        .return_err(ResourceError::new(Code::DeadlineExceeded, "deadline exceeded"));

    let err = ensure_exists(&RequestContext::default(), &mock, PARTITION, "team-a")
        .await
        .unwrap_err();

    assert!(matches!(err, NamespaceError::ExistsRead(_)));
    assert_eq!(err.code(), Some(Code::DeadlineExceeded));
    assert_eq!(mock.calls().len(), 1);
}

#[tokio::test]
async fn test_read_failures_name_the_operation() {
    let mock = MockResourceClient::new();
    let id = namespace_id(PARTITION, "team-a");
    mock.expect_read(id.clone())
        .return_err(ResourceError::new(Code::Internal, "boom"));
    mock.expect_read(id)
        .return_err(ResourceError::new(Code::Internal, "boom"));

    let ctx = RequestContext::default();
    let exists = ensure_exists(&ctx, &mock, PARTITION, "team-a")
        .await
        .unwrap_err();
    let deleted = ensure_deleted(&ctx, &mock, PARTITION, "team-a")
        .await
        .unwrap_err();

    assert_eq!(
        exists.to_string(),
        "consul namespace read failed: internal: boom"
    );
    assert_eq!(deleted.to_string(), "namespace read failed: internal: boom");
    mock.verify();
}

#[tokio::test]
async fn test_ensure_exists_wraps_write_failure() {
    let mock = MockResourceClient::new();
    mock.expect_read(namespace_id(PARTITION, "team-a"))
        .return_err(ResourceError::not_found("no namespace"));
    mock.expect_write()
        .return_err(ResourceError::new(Code::AlreadyExists, "lost the race"));

    let err = ensure_exists(&RequestContext::default(), &mock, PARTITION, "team-a")
        .await
        .unwrap_err();

    assert!(matches!(err, NamespaceError::Create(_)));
    assert_eq!(
        err.to_string(),
        "consul namespace creation failed: already exists: lost the race"
    );
    assert_eq!(err.code(), Some(Code::AlreadyExists));
}

#[tokio::test]
async fn test_context_reaches_every_call_unchanged() {
    let mock = MockResourceClient::new();
    let id = namespace_id(PARTITION, "team-a");
    mock.expect_read(id.clone())
        .return_err(ResourceError::not_found("no namespace"));
    mock.expect_write().return_ok();

    let ctx = RequestContext::default()
        .with_header("authorization", "Bearer secret")
        .with_header("x-request-id", "7");
    ensure_exists(&ctx, &mock, PARTITION, "team-a").await.unwrap();

    for call in mock.calls() {
        let seen = match call {
            MockCall::Read { ctx, .. } | MockCall::Write { ctx, .. } => ctx,
            MockCall::Delete { ctx, .. } => ctx,
        };
        assert_eq!(seen, ctx);
    }
}

#[derive(Default)]
struct CountingPolicy {
    created: AtomicUsize,
}

#[async_trait]
impl CrossNamespacePolicy for CountingPolicy {
    async fn on_namespace_created(
        &self,
        _ctx: &RequestContext,
        _client: &dyn ResourceServiceClient,
        partition: &str,
        namespace: &str,
    ) -> Result<(), NamespaceError> {
        assert_eq!(partition, PARTITION);
        assert_eq!(namespace, "team-a");
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[tokio::test]
async fn test_policy_hook_runs_for_every_live_namespace() {
    let mock = MockResourceClient::new();
    let id = namespace_id(PARTITION, "team-a");
    mock.expect_read(id.clone())
        .return_err(ResourceError::not_found("no namespace"));
    mock.expect_write().return_ok();
    mock.expect_read(id).return_ok(live("team-a"));

    let policy = Arc::new(CountingPolicy::default());
    let reconciler = NamespaceReconciler::with_policy(mock.clone(), policy.clone());
    let ctx = RequestContext::default();

    assert!(reconciler.ensure_exists(&ctx, PARTITION, "team-a").await.unwrap());
    assert!(!reconciler.ensure_exists(&ctx, PARTITION, "team-a").await.unwrap());
    assert!(!reconciler
        .ensure_exists(&ctx, PARTITION, DEFAULT_NAMESPACE_NAME)
        .await
        .unwrap());

    assert_eq!(policy.created.load(Ordering::SeqCst), 2);
    mock.verify();
}

#[derive(Default)]
struct FlakyPolicy {
    calls: AtomicUsize,
}

#[async_trait]
impl CrossNamespacePolicy for FlakyPolicy {
    async fn on_namespace_created(
        &self,
        _ctx: &RequestContext,
        _client: &dyn ResourceServiceClient,
        _partition: &str,
        _namespace: &str,
    ) -> Result<(), NamespaceError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            return Err(NamespaceError::Policy("transient".to_string()));
        }
        Ok(())
    }
}

#[tokio::test]
async fn test_failed_policy_is_retried_on_next_call() {
    let mock = MockResourceClient::new();
    let id = namespace_id(PARTITION, "team-a");
    mock.expect_read(id.clone())
        .return_err(ResourceError::not_found("no namespace"));
    mock.expect_write().return_ok();
    mock.expect_read(id).return_ok(live("team-a"));

    let policy = Arc::new(FlakyPolicy::default());
    let reconciler = NamespaceReconciler::with_policy(mock.clone(), policy.clone());
    let ctx = RequestContext::default();

    let err = reconciler
        .ensure_exists(&ctx, PARTITION, "team-a")
        .await
        .unwrap_err();
    assert!(matches!(err, NamespaceError::Policy(_)));
    assert!(!reconciler.ensure_exists(&ctx, PARTITION, "team-a").await.unwrap());

    assert_eq!(policy.calls.load(Ordering::SeqCst), 2);
    mock.verify();
}

async fn create_with<C: ResourceServiceClient>(client: C) -> bool {
    NamespaceReconciler::new(client)
        .ensure_exists(&RequestContext::default(), PARTITION, "team-a")
        .await
        .unwrap()
}

#[tokio::test]
async fn test_borrowed_client_satisfies_the_trait() {
    let mock = MockResourceClient::new();
    mock.expect_read(namespace_id(PARTITION, "team-a"))
        .return_err(ResourceError::not_found("no namespace"));
    mock.expect_write().return_ok();

    assert!(create_with(&mock).await);
    mock.verify();
}

struct RejectingPolicy;

#[async_trait]
impl CrossNamespacePolicy for RejectingPolicy {
    async fn on_namespace_created(
        &self,
        _ctx: &RequestContext,
        _client: &dyn ResourceServiceClient,
        _partition: &str,
        namespace: &str,
    ) -> Result<(), NamespaceError> {
        Err(NamespaceError::Policy(format!("no policy for {namespace}")))
    }
}

#[tokio::test]
async fn test_policy_failure_is_returned() {
    let mock = MockResourceClient::new();
    mock.expect_read(namespace_id(PARTITION, "team-a"))
        .return_err(ResourceError::not_found("no namespace"));
    mock.expect_write().return_ok();

    let reconciler = NamespaceReconciler::with_policy(mock, RejectingPolicy);
    let err = reconciler
        .ensure_exists(&RequestContext::default(), PARTITION, "team-a")
        .await
        .unwrap_err();

    assert!(matches!(err, NamespaceError::Policy(_)));
}
