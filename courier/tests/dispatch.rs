use courier::{
    CancellationToken, ContainerBuilder, Error, Getter, Mediator, Sender, testing::CallLog,
};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

mod common;
use common::{
    CountingResolver, CreateUser, CreateUserHandler, FixedNameHandler, GetUserName,
    GetUserNameHandler, mediator, strings,
};

#[tokio::test]
async fn test_send_returns_handler_response() {
    let log = CallLog::new();
    let mediator = mediator(|c| {
        c.add_request_handler::<GetUserName, _>(GetUserNameHandler { log: log.clone() })
    });

    let name = mediator
        .send(&GetUserName { id: 42 }, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(name, "user-42");
    assert_eq!(log.count("handler"), 1);
}

#[tokio::test]
async fn test_get_runs_query() {
    let mediator = mediator(|c| {
        c.add_request_handler::<GetUserName, _>(GetUserNameHandler { log: CallLog::new() })
    });

    let name = mediator
        .get(&GetUserName { id: 3 }, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(name, "user-3");
}

#[tokio::test]
async fn test_send_command() {
    let log = CallLog::new();
    let mediator = mediator(|c| {
        c.add_request_handler::<CreateUser, _>(CreateUserHandler { log: log.clone() })
    });

    mediator
        .send_command(
            &CreateUser {
                name: "ada".into(),
            },
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(log.entries(), strings(&["created ada"]));
}

#[tokio::test]
async fn test_missing_handler_is_not_found() {
    let mediator = mediator(|c| c);

    let err = mediator
        .send(&GetUserName { id: 1 }, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound(_)));
    assert_eq!(mediator.cached_pipelines(), 0);
}

#[tokio::test]
async fn test_two_handlers_are_ambiguous() {
    let mediator = mediator(|c| {
        c.add_request_handler::<GetUserName, _>(FixedNameHandler("first"))
            .add_request_handler::<GetUserName, _>(FixedNameHandler("second"))
    });

    let err = mediator
        .send(&GetUserName { id: 1 }, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Ambiguous { count: 2, .. }));
}

#[tokio::test]
async fn test_pipeline_is_built_once_per_type() {
    let lookups = Arc::new(AtomicUsize::new(0));
    let resolver = CountingResolver {
        inner: ContainerBuilder::new()
            .add_request_handler::<GetUserName, _>(GetUserNameHandler { log: CallLog::new() })
            .build(),
        lookups: lookups.clone(),
    };
    let mediator = Mediator::new(Arc::new(resolver));
    let cancel = CancellationToken::new();

    mediator.send(&GetUserName { id: 1 }, &cancel).await.unwrap();
    let after_first = lookups.load(Ordering::SeqCst);
    assert!(after_first > 0);

    mediator.send(&GetUserName { id: 2 }, &cancel).await.unwrap();
    mediator.get(&GetUserName { id: 3 }, &cancel).await.unwrap();

    assert_eq!(lookups.load(Ordering::SeqCst), after_first);
    assert_eq!(mediator.cached_pipelines(), 1);
}

#[tokio::test]
async fn test_failed_build_is_retried() {
    let lookups = Arc::new(AtomicUsize::new(0));
    let resolver = CountingResolver {
        inner: ContainerBuilder::new().build(),
        lookups: lookups.clone(),
    };
    let mediator = Mediator::new(Arc::new(resolver));
    let cancel = CancellationToken::new();

    assert!(mediator.send(&GetUserName { id: 1 }, &cancel).await.is_err());
    let after_first = lookups.load(Ordering::SeqCst);
    assert!(mediator.send(&GetUserName { id: 1 }, &cancel).await.is_err());

    assert!(lookups.load(Ordering::SeqCst) > after_first);
}

#[tokio::test]
async fn test_caches_are_per_mediator() {
    let container = Arc::new(
        ContainerBuilder::new()
            .add_request_handler::<GetUserName, _>(GetUserNameHandler { log: CallLog::new() })
            .build(),
    );
    let first = Mediator::new(container.clone());
    let second = Mediator::new(container);

    first
        .send(&GetUserName { id: 1 }, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(first.cached_pipelines(), 1);
    assert_eq!(second.cached_pipelines(), 0);
}

#[tokio::test]
async fn test_concurrent_first_use_invokes_handler_once_per_call() {
    let log = CallLog::new();
    let mediator = Arc::new(mediator(|c| {
        c.add_request_handler::<GetUserName, _>(GetUserNameHandler { log: log.clone() })
    }));

    let tasks: Vec<_> = (0..8)
        .map(|id| {
            let mediator = mediator.clone();
            tokio::spawn(async move {
                mediator
                    .send(&GetUserName { id }, &CancellationToken::new())
                    .await
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(log.count("handler"), 8);
    assert_eq!(mediator.cached_pipelines(), 1);
}

#[test]
fn test_builder_rejects_empty_default_strategy() {
    let container = Arc::new(ContainerBuilder::new().build());
    let result = Mediator::builder(container).default_strategy("  ").build();

    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}
