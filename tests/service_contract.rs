//! Integration tests exercising backends through the `SecretsService` trait object.

use secrets_api::{
    AuditedSecretsService, Context, InMemorySecretsService, Secret, SecretsError, SecretsService,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

fn backends() -> Vec<(&'static str, Arc<dyn SecretsService>)> {
    let plain: Arc<dyn SecretsService> = Arc::new(InMemorySecretsService::new());
    let audited: Arc<dyn SecretsService> =
        Arc::new(AuditedSecretsService::new(InMemorySecretsService::new()));
    vec![("in-memory", plain), ("audited", audited)]
}

#[tokio::test]
async fn test_full_lifecycle() {
    for (label, service) in backends() {
        let ctx = Context::background().with_timeout(Duration::from_secs(5));

        let secret = Secret::new("db-pass", "admin", "s3cr3t", "db credential")
            .with_label("env", "prod");
        let id = service.create_secret(&ctx, secret).await.unwrap();
        assert!(!id.is_empty(), "{}: empty id", label);

        let stored = service.inspect_secret(&ctx, &id).await.unwrap();
        assert_eq!(stored.id(), id, "{}", label);
        assert_eq!(stored.label("env"), Some("prod"), "{}", label);
        assert_eq!(stored.cred_string().unwrap(), r#"{"password":"s3cr3t","username":"admin"}"#);

        let listed = service.list_secrets(&ctx).await.unwrap();
        assert_eq!(listed.len(), 1, "{}", label);
        assert_eq!(listed[0].id(), id, "{}", label);

        service.delete_secret(&ctx, &id, false).await.unwrap();
        let err = service.inspect_secret(&ctx, &id).await.unwrap_err();
        assert!(err.is_not_found(), "{}: {}", label, err);
    }
}

#[tokio::test]
async fn test_inspect_output_never_leaks_credentials() {
    let service = InMemorySecretsService::new();
    let ctx = Context::background();

    let id = service
        .create_secret(&ctx, Secret::new("api-token", "svc-user", "tok-9f8e7d", "ci token"))
        .await
        .unwrap();

    let json = service.inspect_secret(&ctx, &id).await.unwrap().to_json().unwrap();
    assert!(json.contains(&id));
    assert!(!json.contains("svc-user"));
    assert!(!json.contains("tok-9f8e7d"));
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_ids() {
    let service: Arc<dyn SecretsService> = Arc::new(InMemorySecretsService::new());
    let ctx = Context::background();

    let mut handles = Vec::new();
    for i in 0..32 {
        let service = service.clone();
        let ctx = ctx.clone();
        handles.push(tokio::spawn(async move {
            service
                .create_secret(&ctx, Secret::new(format!("secret-{}", i), "user", "pass", ""))
                .await
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap().unwrap());
    }

    assert_eq!(ids.len(), 32);
    assert_eq!(service.list_secrets(&ctx).await.unwrap().len(), 32);
}

#[tokio::test]
async fn test_concurrent_duplicate_names_admit_one_winner() {
    let service: Arc<dyn SecretsService> = Arc::new(InMemorySecretsService::new());
    let ctx = Context::background();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let service = service.clone();
        let ctx = ctx.clone();
        handles.push(tokio::spawn(async move {
            service.create_secret(&ctx, Secret::new("shared", "user", "pass", "")).await
        }));
    }

    let mut created = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(SecretsError::AlreadyExists { .. }) => rejected += 1,
            Err(e) => panic!("unexpected error: {}", e),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(rejected, 15);
}

#[tokio::test]
async fn test_cancelling_parent_stops_in_flight_calls() {
    let service = Arc::new(InMemorySecretsService::new().with_latency(Duration::from_secs(30)));
    let parent = Context::background();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let service = service.clone();
        let ctx = parent.child();
        handles.push(tokio::spawn(async move { service.list_secrets(&ctx).await }));
    }

    tokio::time::sleep(Duration::from_millis(20)).await;
    parent.cancel();

    for handle in handles {
        let result = tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("call did not observe cancellation")
            .unwrap();
        assert!(matches!(result, Err(SecretsError::Cancelled)));
    }
}

#[tokio::test]
async fn test_deadline_bounds_slow_backend() {
    let service = InMemorySecretsService::new().with_latency(Duration::from_secs(30));
    let ctx = Context::background().with_timeout(Duration::from_millis(50));

    let started = std::time::Instant::now();
    let err = service.inspect_secret(&ctx, "anything").await.unwrap_err();

    assert!(matches!(err, SecretsError::DeadlineExceeded));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_already_cancelled_context_fails_every_operation() {
    let service = InMemorySecretsService::new();
    let ctx = Context::background();
    ctx.cancel();

    assert!(service.create_secret(&ctx, Secret::default()).await.unwrap_err().is_cancellation());
    assert!(service.inspect_secret(&ctx, "id").await.unwrap_err().is_cancellation());
    assert!(service.list_secrets(&ctx).await.unwrap_err().is_cancellation());
    assert!(service.delete_secret(&ctx, "id", true).await.unwrap_err().is_cancellation());

    assert!(service.list_secrets(&Context::background()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_name_is_left_to_backend() {
    let service = InMemorySecretsService::new();
    let ctx = Context::background();

    let id = service.create_secret(&ctx, Secret::new("", "u", "p", "")).await.unwrap();
    assert_eq!(service.inspect_secret(&ctx, &id).await.unwrap().name(), "");
}
