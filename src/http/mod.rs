//! HTTP handling for a single request per connection.
//!
//! # Architecture
//!
//! - **`connection`**: per-connection state machine; owns the stream
//! - **`parser`**: reads the method and resource from the request line
//! - **`request`**: the parsed request and its normalization rules
//! - **`response`**: the 200 / 404 / 400 responses and their builder
//! - **`writer`**: serializes a response and writes it to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← one bounded read of the request
//!        └──────┬──────┘
//!               │ bytes received          (EOF / read error → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← parse, load file, record access log line
//!        └──────┬───────────┘
//!               │ response ready          (file load abandoned → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← send response
//!        └──────┬───────────┘
//!               ▼
//!            Closed
//! ```
//!
//! There is no keep-alive: every response carries `Connection: close`.

pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
