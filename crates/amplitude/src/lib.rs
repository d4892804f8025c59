//! Amplitude HTTP API event logger for Rust.
//!
//! # Example
//!
//! ```rust,ignore
//! use amplitude::EventLogger;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), amplitude::Error> {
//!     let logger = EventLogger::builder("api_key")
//!         .api_uri("https://api.amplitude.com/2/httpapi")
//!         .build()?;
//!
//!     logger.track("signup")
//!         .user_id("usr_123")
//!         .event_property("plan", "pro")
//!         .send()
//!         .await?;
//!
//!     let events = vec![
//!         logger.event("page_view").device_id("dev_abc").build()?,
//!         logger.event("page_view").device_id("dev_def").build()?,
//!     ];
//!     logger.track_batch(events).await?;
//!     Ok(())
//! }
//! ```

mod builders;
mod client;
mod config;
mod error;
mod transport;
pub mod types;

pub use builders::EventBuilder;
pub use client::{EventLogger, SendableTrack};
pub use config::{Config, LoggerBuilder, DEFAULT_API_URI};
pub use error::Error;
pub use types::{DeliveryOptions, Event, EventPackage};
