use std::borrow::Cow;

/// The only method the server acts on.
pub const GET: &str = "GET";

/// Resource served when the client asks for `/`.
pub const INDEX_RESOURCE: &str = "/index.html";

/// A request line reduced to the two tokens the server looks at.
///
/// Headers and body may follow in the raw bytes but are never consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The method token exactly as sent (always `GET` once parsed).
    pub method: String,
    /// The requested resource bytes after `/` has been normalized.
    ///
    /// Kept as sent so names that are not UTF-8 still reach the filesystem.
    pub resource: Vec<u8>,
}

impl Request {
    /// Creates a request, rewriting the bare root to the index page.
    pub fn new(method: impl Into<String>, resource: impl Into<Vec<u8>>) -> Self {
        let resource = resource.into();
        let resource = if resource == b"/" {
            INDEX_RESOURCE.as_bytes().to_vec()
        } else {
            resource
        };

        Self {
            method: method.into(),
            resource,
        }
    }

    /// The resource as text, for the access log and diagnostics.
    pub fn path(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.resource)
    }
}
