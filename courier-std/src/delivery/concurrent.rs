use courier_core::{CancellationToken, Delivery, DeliveryStrategy, Error};
use futures::future::join_all;

/// A concurrent delivery strategy.
///
/// Starts every handler at once and waits for all of them. Handlers still
/// run to completion when one fails. The reported error is the first failure
/// in registration order; the others are logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConcurrentDelivery;

impl ConcurrentDelivery {
    /// Name this strategy is registered under by default.
    pub const NAME: &'static str = "concurrent";
}

impl DeliveryStrategy for ConcurrentDelivery {
    async fn deliver<'a>(
        &'a self,
        deliveries: Vec<Delivery<'a>>,
        _cancel: &'a CancellationToken,
    ) -> Result<(), Error> {
        let names: Vec<_> = deliveries.iter().map(Delivery::handler).collect();
        let results = join_all(deliveries.into_iter().map(Delivery::invoke)).await;

        let mut first = None;
        for (handler, result) in names.into_iter().zip(results) {
            if let Err(error) = result {
                if first.is_none() {
                    first = Some(error);
                } else {
                    tracing::warn!(handler, %error, "additional handler failure");
                }
            }
        }

        first.map_or(Ok(()), Err)
    }
}
