use std::time::Duration;

use alloy::primitives::Address;
use moka::future::Cache;

/// Total byte cost each store may hold before TinyLFU eviction kicks in.
const MAX_COST: u64 = 1 << 30;

/// How long an analytics window stays valid; the indexer refreshes on a
/// comparable cadence.
const ANALYTICS_TTL: Duration = Duration::from_secs(60);

/// Two namespaced byte stores shared by every in-flight request.
///
/// Pool and token metadata cannot change after deployment, so the metadata
/// store has no expiration and is keyed by canonical lower-case address.
/// Analytics windows are keyed by request path and expire after a minute.
/// Eviction is approximate and weighted by serialized size; a miss for an
/// entry that should still be live is a normal refetch, never an error.
pub struct ResponseCache {
    metadata: Cache<String, Vec<u8>>,
    analytics: Cache<String, Vec<u8>>,
}

impl ResponseCache {
    pub fn new() -> ResponseCache {
        let weigher = |_key: &String, value: &Vec<u8>| -> u32 {
            value.len().try_into().unwrap_or(u32::MAX)
        };

        ResponseCache {
            metadata: Cache::builder()
                .max_capacity(MAX_COST)
                .weigher(weigher)
                .build(),
            analytics: Cache::builder()
                .max_capacity(MAX_COST)
                .time_to_live(ANALYTICS_TTL)
                .weigher(weigher)
                .build(),
        }
    }

    pub async fn get_metadata(&self, address: &Address) -> Option<Vec<u8>> {
        self.metadata.get(&metadata_key(address)).await
    }

    pub async fn set_metadata(&self, address: &Address, value: Vec<u8>) {
        self.metadata.insert(metadata_key(address), value).await;
    }

    pub async fn get_analytics(&self, path: &str) -> Option<Vec<u8>> {
        self.analytics.get(path).await
    }

    pub async fn set_analytics(&self, path: &str, value: Vec<u8>) {
        self.analytics.insert(path.to_owned(), value).await;
    }
}

impl Default for ResponseCache {
    fn default() -> ResponseCache {
        ResponseCache::new()
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("metadata_entries", &self.metadata.entry_count())
            .field("analytics_entries", &self.analytics.entry_count())
            .finish()
    }
}

fn metadata_key(address: &Address) -> String {
    address.to_string().to_lowercase()
}
