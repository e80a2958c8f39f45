use crate::{
    error::Result,
    network::network::Network,
    train::item::TrainingItem,
};

/// One online pass over `items` in the given order.
///
/// Returns the mean of the per-sample errors measured before each update.
/// Stops at the first item that does not fit the network.
pub fn train_network(network: &mut Network, items: &[TrainingItem]) -> Result<f64> {
    train_in_order(network, items, 0..items.len())
}

/// Same as [`train_network`] but visits `items` in the order given by `order`.
pub(crate) fn train_in_order<I>(network: &mut Network, items: &[TrainingItem], order: I) -> Result<f64>
where
    I: IntoIterator<Item = usize>,
{
    let mut total_loss = 0.0;
    let mut seen = 0usize;

    for idx in order {
        total_loss += network.train_measured(&items[idx])?;
        seen += 1;
    }

    if seen == 0 {
        return Ok(0.0);
    }
    Ok(total_loss / seen as f64)
}
