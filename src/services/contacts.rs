use tracing::info;

use crate::models::ContactMessage;
use crate::store::{FlatFileStore, StoreError};

pub struct ContactService {
    store: FlatFileStore,
}

impl ContactService {
    #[must_use]
    pub const fn new(store: FlatFileStore) -> Self {
        Self { store }
    }

    pub async fn submit(&self, message: ContactMessage) -> Result<(), StoreError> {
        self.store.run(move |s| s.append(message)).await?;

        metrics::counter!("recipebox_contacts_received_total").increment(1);
        info!("Contact message stored");
        Ok(())
    }
}
