//! Generic CRUD facade instantiated once per roster resource.
//!
//! One service type covers students, teachers, and personal trainers: the
//! [`RosterResource`] implementation supplies the collection path, label,
//! and draft rules. Every method delegates to the transport and surfaces
//! its classification unchanged; the service only adds local validation,
//! which short-circuits before any request is issued.

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;

use crate::domain::ports::{ApiTransport, HttpMethod, decode_payload, encode_payload};
use crate::domain::{ApiError, ApiResult, RosterDraft, RosterResource};

/// CRUD operations for one roster resource over a shared transport.
pub struct ResourceService<T, C> {
    transport: Arc<C>,
    _resource: PhantomData<fn() -> T>,
}

impl<T, C> ResourceService<T, C> {
    /// Create the service over a shared transport.
    pub fn new(transport: Arc<C>) -> Self {
        Self {
            transport,
            _resource: PhantomData,
        }
    }
}

impl<T, C> ResourceService<T, C>
where
    T: RosterResource,
    C: ApiTransport,
{
    /// Fetch every record in the collection.
    pub async fn list(&self) -> ApiResult<Vec<T>> {
        let payload = self
            .transport
            .request(HttpMethod::Get, T::COLLECTION_PATH, None)
            .await?;
        decode_payload(payload, &format!("{} list", T::LABEL))
    }

    /// Fetch one record by id.
    pub async fn get(&self, id: i64) -> ApiResult<T> {
        let path = record_path::<T>(id)?;
        let payload = self
            .transport
            .request(HttpMethod::Get, &path, None)
            .await?;
        decode_payload(payload, T::LABEL)
    }

    /// Create a record from a validated draft.
    pub async fn create(&self, draft: &T::Draft) -> ApiResult<T> {
        let body = validated_body::<T>(draft)?;
        let payload = self
            .transport
            .request(HttpMethod::Post, T::COLLECTION_PATH, Some(body))
            .await?;
        decode_payload(payload, T::LABEL)
    }

    /// Replace the record identified by `id` with the draft's fields.
    pub async fn update(&self, id: i64, draft: &T::Draft) -> ApiResult<T> {
        let path = record_path::<T>(id)?;
        let body = validated_body::<T>(draft)?;
        let payload = self
            .transport
            .request(HttpMethod::Put, &path, Some(body))
            .await?;
        decode_payload(payload, T::LABEL)
    }

    /// Delete the record identified by `id`.
    pub async fn remove(&self, id: i64) -> ApiResult<()> {
        let path = record_path::<T>(id)?;
        self.transport
            .request(HttpMethod::Delete, &path, None)
            .await?;
        Ok(())
    }
}

fn record_path<T: RosterResource>(id: i64) -> ApiResult<String> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "{} id must be a positive integer",
            T::LABEL
        )));
    }
    Ok(format!("{}/{id}", T::COLLECTION_PATH))
}

fn validated_body<T: RosterResource>(draft: &T::Draft) -> ApiResult<Value> {
    draft
        .validate()
        .map_err(|error| ApiError::validation(format!("invalid {} payload: {error}", T::LABEL)))?;
    encode_payload(draft, T::LABEL)
}

#[cfg(test)]
#[path = "resource_service_tests.rs"]
mod tests;
