use resource_service::tenancy::{Namespace, NAMESPACE_TYPE};
use resource_service::{
    Any, RequestContext, Resource, ResourceId, ResourceServiceActor, ResourceServiceClient,
    Tenancy,
};

fn namespace(name: &str, partition: &str, description: &str) -> Resource {
    let id = ResourceId::new(name, NAMESPACE_TYPE, Tenancy::partition(partition));
    let data = Any::new(&Namespace {
        description: description.to_string(),
    })
    .unwrap();
    Resource::new(id).with_data(data)
}

/// Many tasks writing the same identity without a version: every write is
/// accepted and exactly one record remains.
#[tokio::test]
async fn test_racing_unconditional_writes_leave_one_record() {
    let (actor, client) = ResourceServiceActor::new(4);
    let handle = tokio::spawn(actor.run());

    let mut tasks = Vec::new();
    for i in 0..16 {
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            let resource = namespace("team-a", "default", &format!("writer {i}"));
            client.write(&RequestContext::default(), resource).await
        }));
    }
    for task in tasks {
        task.await.unwrap().expect("unconditional write rejected");
    }

    let id = ResourceId::new("team-a", NAMESPACE_TYPE, Tenancy::partition("default"));
    let stored = client.read(&RequestContext::default(), &id).await.unwrap();
    assert_eq!(stored.version, "16");
    let payload: Namespace = stored.data.unwrap().to().unwrap();
    assert!(payload.description.starts_with("writer "));

    drop(client);
    handle.await.unwrap();
}

/// Identities in different partitions never collide.
#[tokio::test]
async fn test_partitions_are_isolated() {
    let (actor, client) = ResourceServiceActor::new(4);
    let handle = tokio::spawn(actor.run());
    let ctx = RequestContext::default();

    client
        .write(&ctx, namespace("team-a", "ap1", "first"))
        .await
        .unwrap();

    let other = ResourceId::new("team-a", NAMESPACE_TYPE, Tenancy::partition("ap2"));
    assert!(client.read(&ctx, &other).await.unwrap_err().is_not_found());

    client.delete(&ctx, &other, None).await.unwrap();
    let first = ResourceId::new("team-a", NAMESPACE_TYPE, Tenancy::partition("ap1"));
    assert!(client.read(&ctx, &first).await.is_ok());

    drop(client);
    handle.await.unwrap();
}
