#![allow(dead_code)]

use courier::{
    CancellationToken, Container, ContainerBuilder, Delivery, DeliveryStrategy, Error, Event,
    EventHandler, Mediator, Message, Query, Request, RequestHandler, Service, ServiceResolver,
    testing::{CallLog, TestFailure},
};
use std::{
    any::TypeId,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

// ============================================================================
// Test Message Types
// ============================================================================

#[derive(Clone, Debug)]
pub struct GetUserName {
    pub id: u64,
}

impl Message for GetUserName {}
impl Request for GetUserName {
    type Response = String;
}
impl Query for GetUserName {}

#[derive(Clone, Debug)]
pub struct CreateUser {
    pub name: String,
}

impl Message for CreateUser {}
impl Request for CreateUser {
    type Response = ();
}

#[derive(Clone, Debug)]
pub struct UserCreated {
    pub id: u64,
}

impl Message for UserCreated {}
impl Event for UserCreated {}

#[derive(Clone, Debug)]
pub struct UserDeleted {
    pub id: u64,
}

impl Message for UserDeleted {}
impl Event for UserDeleted {}

/// An event that names its delivery strategy.
#[derive(Clone, Debug)]
pub struct Routed {
    pub strategy: &'static str,
}

impl Message for Routed {}
impl Event for Routed {
    fn strategy(&self) -> Option<&str> {
        Some(self.strategy)
    }
}

// ============================================================================
// Test Handlers
// ============================================================================

pub struct GetUserNameHandler {
    pub log: CallLog,
}

impl RequestHandler<GetUserName> for GetUserNameHandler {
    async fn handle(
        &self,
        query: &GetUserName,
        _cancel: &CancellationToken,
    ) -> Result<String, Error> {
        self.log.push("handler");
        Ok(format!("user-{}", query.id))
    }
}

/// Answers with a fixed name, for tests that register several handlers.
pub struct FixedNameHandler(pub &'static str);

impl RequestHandler<GetUserName> for FixedNameHandler {
    async fn handle(
        &self,
        _query: &GetUserName,
        _cancel: &CancellationToken,
    ) -> Result<String, Error> {
        Ok(self.0.to_owned())
    }
}

pub struct FailingQueryHandler {
    pub log: CallLog,
}

impl RequestHandler<GetUserName> for FailingQueryHandler {
    async fn handle(
        &self,
        _query: &GetUserName,
        _cancel: &CancellationToken,
    ) -> Result<String, Error> {
        self.log.push("handler");
        Err(Error::handler(TestFailure("query failed")))
    }
}

pub struct CreateUserHandler {
    pub log: CallLog,
}

impl RequestHandler<CreateUser> for CreateUserHandler {
    async fn handle(&self, command: &CreateUser, _cancel: &CancellationToken) -> Result<(), Error> {
        self.log.push(format!("created {}", command.name));
        Ok(())
    }
}

/// Sleeps before completing, to observe how handlers overlap.
pub struct SlowHandler {
    pub delay: Duration,
    pub calls: Arc<AtomicUsize>,
}

impl<E: Event> EventHandler<E> for SlowHandler {
    async fn handle(&self, _event: &E, _cancel: &CancellationToken) -> Result<(), Error> {
        tokio::time::sleep(self.delay).await;
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Test Strategy and Resolver
// ============================================================================

/// Logs its name, then delivers in order.
pub struct RecordingStrategy {
    pub name: &'static str,
    pub log: CallLog,
}

impl DeliveryStrategy for RecordingStrategy {
    async fn deliver<'a>(
        &'a self,
        deliveries: Vec<Delivery<'a>>,
        _cancel: &'a CancellationToken,
    ) -> Result<(), Error> {
        self.log.push(self.name);
        for delivery in deliveries {
            delivery.invoke().await?;
        }
        Ok(())
    }
}

/// Counts role lookups made against the wrapped container.
pub struct CountingResolver {
    pub inner: Container,
    pub lookups: Arc<AtomicUsize>,
}

impl ServiceResolver for CountingResolver {
    fn services(&self, role: TypeId) -> Vec<Service> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.services(role)
    }

    fn keyed_service(&self, role: TypeId, key: &str) -> Option<Service> {
        self.inner.keyed_service(role, key)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// A container with the default strategies, extended by `configure`.
pub fn container(configure: impl FnOnce(ContainerBuilder) -> ContainerBuilder) -> Container {
    configure(ContainerBuilder::new().with_default_strategies()).build()
}

pub fn mediator(configure: impl FnOnce(ContainerBuilder) -> ContainerBuilder) -> Mediator {
    Mediator::new(Arc::new(container(configure)))
}

pub fn strings(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|entry| entry.to_string()).collect()
}
