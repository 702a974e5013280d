use courier_core::{CancellationToken, Delivery, DeliveryStrategy, Error};

/// A sequential delivery strategy.
///
/// Invokes handlers one by one in the order given, awaiting each before
/// starting the next. Stops at the first handler failure, and checks the
/// cancellation token before every handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialDelivery;

impl SequentialDelivery {
    /// Name this strategy is registered under by default.
    pub const NAME: &'static str = "sequential";
}

impl DeliveryStrategy for SequentialDelivery {
    async fn deliver<'a>(
        &'a self,
        deliveries: Vec<Delivery<'a>>,
        cancel: &'a CancellationToken,
    ) -> Result<(), Error> {
        for delivery in deliveries {
            cancel.error_if_cancelled()?;

            let handler = delivery.handler();
            if let Err(error) = delivery.invoke().await {
                tracing::debug!(handler, %error, "sequential delivery stopped");
                return Err(error);
            }
        }
        Ok(())
    }
}
