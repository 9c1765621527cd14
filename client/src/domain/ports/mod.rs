//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod api_transport;
mod key_value_storage;

#[cfg(test)]
pub use api_transport::MockApiTransport;
pub use api_transport::{
    ApiTransport, FixtureApiTransport, HttpMethod, decode_payload, encode_payload,
};
#[cfg(test)]
pub use key_value_storage::MockKeyValueStorage;
pub use key_value_storage::{FixtureKeyValueStorage, KeyValueStorage, KeyValueStorageError};
