use courier::{
    AnyEvent, CancellationToken, ConcurrentDelivery, Disposable, Error, Mediator, Publisher,
    testing::{CallLog, CountingEventHandler},
};
use std::sync::Arc;

mod common;
use common::{RecordingStrategy, Routed, UserCreated, UserDeleted, container, mediator, strings};

#[tokio::test]
async fn test_publish_without_handlers_succeeds_under_both_strategies() {
    let sequential = mediator(|c| c);
    let concurrent = Mediator::builder(Arc::new(container(|c| c)))
        .default_strategy(ConcurrentDelivery::NAME)
        .build()
        .unwrap();
    let cancel = CancellationToken::new();

    sequential.publish(&UserCreated { id: 1 }, &cancel).await.unwrap();
    concurrent.publish(&UserCreated { id: 1 }, &cancel).await.unwrap();
}

#[tokio::test]
async fn test_publish_reaches_every_handler_in_order() {
    let log = CallLog::new();
    let mediator = mediator(|c| {
        c.add_event_handler::<UserCreated, _>(CountingEventHandler::new("welcome", log.clone()))
            .add_event_handler::<UserCreated, _>(CountingEventHandler::new("toast", log.clone()))
            .add_event_handler::<UserDeleted, _>(CountingEventHandler::new("goodbye", log.clone()))
    });

    mediator
        .publish(&UserCreated { id: 1 }, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(log.entries(), strings(&["welcome", "toast"]));
}

#[tokio::test]
async fn test_event_declared_strategy_is_used() {
    let log = CallLog::new();
    let mediator = mediator(|c| {
        c.add_strategy("custom", RecordingStrategy { name: "custom", log: log.clone() })
            .add_event_handler::<Routed, _>(CountingEventHandler::new("handler", log.clone()))
    });

    mediator
        .publish(&Routed { strategy: "custom" }, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(log.entries(), strings(&["custom", "handler"]));
}

#[tokio::test]
async fn test_configured_default_strategy_is_used() {
    let log = CallLog::new();
    let container = container(|c| {
        c.add_strategy("audited", RecordingStrategy { name: "audited", log: log.clone() })
            .add_event_handler::<UserCreated, _>(CountingEventHandler::new("handler", log.clone()))
    });
    let mediator = Mediator::builder(Arc::new(container))
        .default_strategy("audited")
        .build()
        .unwrap();
    assert_eq!(mediator.default_strategy(), "audited");

    mediator
        .publish(&UserCreated { id: 1 }, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(log.entries(), strings(&["audited", "handler"]));
}

#[tokio::test]
async fn test_unknown_strategy_is_not_found() {
    let log = CallLog::new();
    let mediator = mediator(|c| {
        c.add_event_handler::<Routed, _>(CountingEventHandler::new("handler", log.clone()))
    });

    let err = mediator
        .publish(&Routed { strategy: "missing" }, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::KeyedNotFound { ref key, .. } if key == "missing"));
    assert!(log.is_empty());
}

#[tokio::test]
async fn test_subscribed_handlers_follow_resolved_ones() {
    let log = CallLog::new();
    let mediator = mediator(|c| {
        c.add_event_handler::<UserCreated, _>(CountingEventHandler::new("static", log.clone()))
    });
    let dynamic = Arc::new(CountingEventHandler::new("dynamic", log.clone()));

    let subscription = mediator
        .registries()
        .register_handler::<UserCreated, _>(dynamic.clone())
        .unwrap();

    let cancel = CancellationToken::new();
    mediator.publish(&UserCreated { id: 1 }, &cancel).await.unwrap();
    assert_eq!(log.entries(), strings(&["static", "dynamic"]));

    subscription.dispose().unwrap();
    mediator.publish(&UserCreated { id: 2 }, &cancel).await.unwrap();

    assert_eq!(dynamic.count(), 1);
    assert_eq!(log.count("static"), 2);
}

#[tokio::test]
async fn test_handler_both_resolved_and_subscribed_runs_once() {
    let log = CallLog::new();
    let shared = Arc::new(CountingEventHandler::new("shared", log.clone()));
    let mediator = mediator(|c| c.add_shared_event_handler::<UserCreated, _>(shared.clone()));
    let _subscription = mediator
        .registries()
        .register_handler::<UserCreated, _>(shared.clone())
        .unwrap();

    mediator
        .publish(&UserCreated { id: 1 }, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(shared.count(), 1);
    assert_eq!(log.entries(), strings(&["shared"]));
}

#[tokio::test]
async fn test_publish_dyn_dispatches_on_concrete_type() {
    let log = CallLog::new();
    let mediator = mediator(|c| {
        c.add_event_handler::<UserCreated, _>(CountingEventHandler::new("created", log.clone()))
            .add_event_handler::<UserDeleted, _>(CountingEventHandler::new("deleted", log.clone()))
    });

    let events: Vec<Box<dyn AnyEvent>> = vec![
        Box::new(UserCreated { id: 1 }),
        Box::new(UserDeleted { id: 1 }),
        Box::new(UserCreated { id: 2 }),
    ];

    let cancel = CancellationToken::new();
    for event in &events {
        mediator.publish_dyn(&**event, &cancel).await.unwrap();
    }

    assert_eq!(log.entries(), strings(&["created", "deleted", "created"]));
    assert!(events[1].event_type().ends_with("UserDeleted"));
}
