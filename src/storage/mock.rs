use super::*;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Configuration recorded for a bucket held by [`InMemoryStorage`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketRecord {
    pub region: String,
    pub encryption: Option<EncryptionAlgorithm>,
    pub public_access_block: Option<PublicAccessBlock>,
}

#[derive(Debug, Default)]
struct StorageState {
    buckets: BTreeMap<String, BucketRecord>,
    reject_with: Option<String>,
    configuration_calls: usize,
}

/// In-memory [`ObjectStorage`] for testing
///
/// Behaves like a single-account object store: a second creation of the
/// same name reports [`BucketCreationError::AlreadyExists`].
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    state: Arc<Mutex<StorageState>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend a bucket was created earlier, outside this process
    pub fn with_existing_bucket(self, name: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .buckets
            .insert(name.to_string(), BucketRecord::default());
        self
    }

    /// Refuse every creation with `reason`
    pub fn rejecting(self, reason: &str) -> Self {
        self.state.lock().unwrap().reject_with = Some(reason.to_string());
        self
    }

    /// State of a bucket, if it exists
    pub fn bucket(&self, name: &str) -> Option<BucketRecord> {
        self.state.lock().unwrap().buckets.get(name).cloned()
    }

    /// Number of encryption and access block calls made so far
    pub fn configuration_calls(&self) -> usize {
        self.state.lock().unwrap().configuration_calls
    }

    fn configure(&self, name: &str, apply: impl FnOnce(&mut BucketRecord)) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.configuration_calls += 1;
        let record = state
            .buckets
            .get_mut(name)
            .ok_or_else(|| DevenvError::storage(format!("NoSuchBucket: {name}")))?;
        apply(record);
        Ok(())
    }
}

impl ObjectStorage for InMemoryStorage {
    fn create_private_bucket(
        &self,
        name: &str,
        region: &str,
    ) -> std::result::Result<(), BucketCreationError> {
        let mut state = self.state.lock().unwrap();
        if let Some(reason) = &state.reject_with {
            return Err(BucketCreationError::Rejected(reason.clone()));
        }
        if state.buckets.contains_key(name) {
            return Err(BucketCreationError::AlreadyExists);
        }
        state.buckets.insert(
            name.to_string(),
            BucketRecord {
                region: region.to_string(),
                ..BucketRecord::default()
            },
        );
        Ok(())
    }

    fn set_default_encryption(&self, name: &str, algorithm: EncryptionAlgorithm) -> Result<()> {
        self.configure(name, |record| record.encryption = Some(algorithm))
    }

    fn set_public_access_block(&self, name: &str, flags: PublicAccessBlock) -> Result<()> {
        self.configure(name, |record| record.public_access_block = Some(flags))
    }
}
