//! Client-wide error taxonomy.
//!
//! Every operation exposed by this crate resolves to an [`ApiError`] value
//! rather than a panic or an opaque boxed error. Callers branch on the
//! variant to decide presentation: validation problems never reached the
//! network, HTTP errors carry the server's verdict, and storage errors come
//! from the durable session cache rather than the remote service.

use crate::domain::ports::define_port_error;

define_port_error! {
    /// Failure classification shared by every client operation.
    pub enum ApiError {
        /// Input rejected locally before any request was issued.
        Validation { message: String } =>
            "validation failed: {message}",
        /// Transport-level failure; no HTTP response was received.
        Network { message: String } =>
            "network request failed: {message}",
        /// Server responded with a status outside the 2xx range.
        Http { status: u16, message: String } =>
            "server returned status {status}: {message}",
        /// A 2xx response body did not match the expected JSON shape.
        Decode { message: String } =>
            "response decode failed: {message}",
        /// Durable session storage could not be read or written.
        Storage { message: String } =>
            "session storage failed: {message}",
    }
}

impl ApiError {
    /// Return whether this error is the server rejecting the credentials.
    ///
    /// Useful for callers deciding whether to drop a cached session and
    /// return to the login flow.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }
}
