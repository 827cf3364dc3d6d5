// Adapters layer: concrete implementations of the domain ports (forecast site over HTTP, SMTP delivery).

pub mod http;
pub mod smtp;

pub use http::{HttpFetcher, DEFAULT_BASE_URL};
pub use smtp::{SmtpMailer, SmtpSettings};
