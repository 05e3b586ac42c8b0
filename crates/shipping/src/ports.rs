use async_trait::async_trait;

use crate::domain::{Shipping, ShippingId};
use crate::error::RepositoryError;

#[async_trait]
pub trait ShippingRepository: Send + Sync {
    async fn get(&self, id: ShippingId) -> Result<Shipping, RepositoryError>;

    async fn save(&self, shipping: &mut Shipping) -> Result<(), RepositoryError>;
}
