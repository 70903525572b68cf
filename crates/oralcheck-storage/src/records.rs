//! Typed JSON records on top of [`ObjectStore`].

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use oralcheck_core::models::live_assessment::LiveAssessment;
use oralcheck_core::s3_keys;

use crate::error::StorageError;
use crate::objects::{ObjectStore, WriteCondition};

fn encode<T: Serialize>(key: &str, value: &T) -> Result<Vec<u8>, StorageError> {
    serde_json::to_vec_pretty(value).map_err(|source| StorageError::Serialization {
        key: key.to_string(),
        source,
    })
}

fn decode<T: DeserializeOwned>(key: &str, body: &[u8]) -> Result<T, StorageError> {
    serde_json::from_slice(body).map_err(|source| StorageError::Serialization {
        key: key.to_string(),
        source,
    })
}

/// Load one record with the ETag needed for a later conditional save.
pub async fn load<T: DeserializeOwned>(
    store: &ObjectStore,
    key: &str,
) -> Result<(T, String), StorageError> {
    let object = store.get(key).await?;
    let value = decode(key, &object.body)?;
    Ok((value, object.etag))
}

/// Load every record under `prefix`, in key order.
pub async fn load_all<T: DeserializeOwned>(
    store: &ObjectStore,
    prefix: &str,
) -> Result<Vec<T>, StorageError> {
    let mut keys = store.list(prefix).await?;
    keys.sort();

    let mut values = Vec::with_capacity(keys.len());
    for key in &keys {
        let object = store.get(key).await?;
        values.push(decode(key, &object.body)?);
    }
    Ok(values)
}

/// Write a record that must not exist yet.
pub async fn create<T: Serialize>(
    store: &ObjectStore,
    key: &str,
    value: &T,
) -> Result<String, StorageError> {
    store
        .put(key, encode(key, value)?, WriteCondition::IfAbsent)
        .await
}

/// Replace a record only if it is unchanged since it was loaded.
pub async fn save_if_match<T: Serialize>(
    store: &ObjectStore,
    key: &str,
    value: &T,
    etag: &str,
) -> Result<String, StorageError> {
    store
        .put(key, encode(key, value)?, WriteCondition::IfMatch(etag))
        .await
}

/// Drop the patient's in-progress claim if it is held by `assessment_id`.
/// Returns whether a claim was removed.
pub async fn release_live_assessment(
    store: &ObjectStore,
    patient_id: Uuid,
    assessment_id: Uuid,
) -> Result<bool, StorageError> {
    let key = s3_keys::live_assessment(patient_id);
    match load::<LiveAssessment>(store, &key).await {
        Ok((held, _)) if held.assessment_id == assessment_id => {
            store.delete(&key).await?;
            Ok(true)
        }
        Ok(_) | Err(StorageError::NotFound { .. }) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Remove a patient together with every record filed under them.
pub async fn delete_patient(store: &ObjectStore, patient_id: Uuid) -> Result<usize, StorageError> {
    let mut removed = 0;
    for prefix in s3_keys::patient_record_prefixes(patient_id) {
        removed += store.delete_prefix(&prefix).await?;
    }
    store.delete(&s3_keys::live_assessment(patient_id)).await?;
    store.delete(&s3_keys::patient(patient_id)).await?;
    tracing::info!(%patient_id, records = removed, "patient deleted");
    Ok(removed)
}
