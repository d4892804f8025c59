//! Event logger implementation.

use crate::builders::EventBuilder;
use crate::config::{Config, LoggerBuilder};
use crate::transport::HttpTransport;
use crate::types::{DeliveryOptions, Event, EventPackage};
use crate::Error;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, instrument};

/// Amplitude HTTP API event logger.
///
/// Each logger owns its API key, endpoint, HTTP client and logging switch,
/// so several loggers with different keys can live in one process. While
/// logging is disabled, sends are skipped and return `Ok(None)`.
///
/// # Example
///
/// ```rust,no_run
/// use amplitude::EventLogger;
///
/// #[tokio::main]
/// async fn main() -> Result<(), amplitude::Error> {
///     let logger = EventLogger::new("api_key")?;
///
///     let response = logger
///         .track("watch_tutorial")
///         .user_id("john_doe@gmail.com")
///         .user_property("Cohort", "Test A")
///         .send()
///         .await?;
///
///     if let Some(response) = response {
///         println!("status: {}", response.status());
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct EventLogger {
    config: Config,
    transport: HttpTransport,
    is_logging: AtomicBool,
}

impl EventLogger {
    /// Create a logger for the default endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self, Error> {
        Self::builder(api_key).build()
    }

    /// Create a new builder with the given API key.
    pub fn builder(api_key: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(api_key)
    }

    pub(crate) fn from_config(config: Config) -> Result<Self, Error> {
        let transport = HttpTransport::new(&config)?;
        let is_logging = AtomicBool::new(config.logging());

        Ok(Self {
            config,
            transport,
            is_logging,
        })
    }

    /// Get the logger configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn enable_logging(&self) {
        self.is_logging.store(true, Ordering::SeqCst);
    }

    pub fn disable_logging(&self) {
        self.is_logging.store(false, Ordering::SeqCst);
    }

    /// Whether sends currently reach the network.
    pub fn is_logging(&self) -> bool {
        self.is_logging.load(Ordering::SeqCst)
    }

    /// Start building an event. Call `build()` on the result to validate it.
    pub fn event(&self, event_type: impl Into<String>) -> EventBuilder {
        EventBuilder::new(event_type)
    }

    /// Wrap events in a package keyed by this logger's API key.
    ///
    /// Empty options are dropped so that `options` is left out of the body.
    pub fn build_event_package(
        &self,
        events: Vec<Event>,
        options: Option<DeliveryOptions>,
    ) -> EventPackage {
        EventPackage {
            api_key: self.config.api_key().to_owned(),
            events,
            options: options.filter(|options| !options.is_empty()),
        }
    }

    /// Post a package.
    ///
    /// Fails with [`Error::EmptyPackage`] when the package has no events, even
    /// while logging is disabled. Returns `Ok(None)` without touching the
    /// network when logging is disabled; otherwise the raw response, whatever
    /// its status.
    #[instrument(skip(self, package), fields(event_count = package.events.len()))]
    pub async fn send(
        &self,
        package: &EventPackage,
    ) -> Result<Option<reqwest::Response>, Error> {
        if package.is_empty() {
            return Err(Error::EmptyPackage);
        }

        if !self.is_logging() {
            debug!("logging disabled, skipping send");
            return Ok(None);
        }

        let response = self.transport.post(package).await?;
        Ok(Some(response))
    }

    /// Track a single event.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use amplitude::EventLogger;
    /// # async fn example(logger: &EventLogger) -> Result<(), amplitude::Error> {
    /// logger
    ///     .track("login")
    ///     .device_id("dev_abc")
    ///     .event_property("method", "password")
    ///     .min_id_length(3)
    ///     .send()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn track(&self, event_type: impl Into<String>) -> SendableTrack<'_> {
        SendableTrack {
            builder: EventBuilder::new(event_type),
            options: DeliveryOptions::default(),
            logger: self,
        }
    }

    /// Send already built events in one package.
    ///
    /// No size limit is applied here.
    pub async fn track_batch(
        &self,
        events: Vec<Event>,
    ) -> Result<Option<reqwest::Response>, Error> {
        let package = self.build_event_package(events, None);
        self.send(&package).await
    }
}

impl LoggerBuilder {
    /// Build the event logger.
    pub fn build(self) -> Result<EventLogger, Error> {
        let config = self.build_config()?;
        EventLogger::from_config(config)
    }
}

/// Sendable track event builder.
pub struct SendableTrack<'a> {
    builder: EventBuilder,
    options: DeliveryOptions,
    logger: &'a EventLogger,
}

impl<'a> SendableTrack<'a> {
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.builder = self.builder.user_id(user_id);
        self
    }

    pub fn device_id(mut self, device_id: impl Into<String>) -> Self {
        self.builder = self.builder.device_id(device_id);
        self
    }

    /// Replace all event properties. Must be a JSON object.
    pub fn event_properties(mut self, properties: impl Into<Value>) -> Self {
        self.builder = self.builder.event_properties(properties);
        self
    }

    /// Add an event property.
    pub fn event_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.builder = self.builder.event_property(key, value);
        self
    }

    /// Replace all user properties. Must be a JSON object.
    pub fn user_properties(mut self, properties: impl Into<Value>) -> Self {
        self.builder = self.builder.user_properties(properties);
        self
    }

    /// Add a user property.
    pub fn user_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.builder = self.builder.user_property(key, value);
        self
    }

    /// Set custom event time (milliseconds since epoch).
    pub fn time(mut self, time_ms: i64) -> Self {
        self.builder = self.builder.time(time_ms);
        self
    }

    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.builder = self.builder.platform(platform);
        self
    }

    /// Set `options.min_id_length` on the outgoing package.
    pub fn min_id_length(mut self, length: u32) -> Self {
        self.options.min_id_length = Some(length);
        self
    }

    /// Validate the event and send it in a single-event package.
    pub async fn send(self) -> Result<Option<reqwest::Response>, Error> {
        let event = self.builder.build()?;
        let package = self
            .logger
            .build_event_package(vec![event], Some(self.options));
        self.logger.send(&package).await
    }
}
