//! Session-level limits consumed by message sinks.
//!
//! Sinks read the size limit through [`SessionLimits`] on every frame rather
//! than caching it at construction, so a limit changed between messages takes
//! effect without rebuilding the sink.

use std::{
    num::NonZeroUsize,
    sync::{
        Arc,
        atomic::{AtomicI64, Ordering},
    },
};

/// Default cap on an assembled binary message: 64 KiB.
pub const DEFAULT_MAX_BINARY_MESSAGE_SIZE: i64 = 65_536;

/// Source of the limits a sink enforces.
pub trait SessionLimits {
    /// Maximum size of an assembled binary message in bytes.
    ///
    /// Zero or a negative value disables the check.
    fn max_binary_message_size(&self) -> i64;
}

impl<T: SessionLimits + ?Sized> SessionLimits for Arc<T> {
    fn max_binary_message_size(&self) -> i64 { (**self).max_binary_message_size() }
}

impl<T: SessionLimits + ?Sized> SessionLimits for &T {
    fn max_binary_message_size(&self) -> i64 { (**self).max_binary_message_size() }
}

/// Interpreted message size limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageSizeLimit {
    /// No cap on accumulated bytes.
    Unlimited,
    /// Accumulated bytes must not exceed this many.
    Bounded(NonZeroUsize),
}

impl MessageSizeLimit {
    /// Interpret a raw configured value; zero and negatives mean unlimited.
    ///
    /// ```
    /// use framesink::session::MessageSizeLimit;
    ///
    /// assert_eq!(MessageSizeLimit::from_raw(0), MessageSizeLimit::Unlimited);
    /// assert_eq!(MessageSizeLimit::from_raw(-5), MessageSizeLimit::Unlimited);
    /// assert!(MessageSizeLimit::from_raw(10).is_exceeded_by(11));
    /// ```
    #[must_use]
    pub fn from_raw(raw: i64) -> Self {
        usize::try_from(raw)
            .ok()
            .and_then(NonZeroUsize::new)
            .map_or(Self::Unlimited, Self::Bounded)
    }

    /// Whether `size` accumulated bytes break this limit.
    #[must_use]
    pub fn is_exceeded_by(self, size: usize) -> bool {
        match self {
            Self::Unlimited => false,
            Self::Bounded(limit) => size > limit.get(),
        }
    }

    /// Bound in bytes, if any.
    #[must_use]
    pub fn get(self) -> Option<NonZeroUsize> {
        match self {
            Self::Unlimited => None,
            Self::Bounded(limit) => Some(limit),
        }
    }
}

/// Shareable session settings with an atomically updatable size limit.
///
/// # Examples
///
/// ```
/// use framesink::session::{SessionConfig, SessionLimits};
///
/// let config = SessionConfig::default().with_max_binary_message_size(10);
/// assert_eq!(config.max_binary_message_size(), 10);
/// config.set_max_binary_message_size(-1);
/// assert_eq!(config.max_binary_message_size(), -1);
/// ```
#[derive(Debug)]
pub struct SessionConfig {
    max_binary_message_size: AtomicI64,
}

impl SessionConfig {
    /// Create settings with the given raw size limit.
    #[must_use]
    pub fn new(max_binary_message_size: i64) -> Self {
        Self {
            max_binary_message_size: AtomicI64::new(max_binary_message_size),
        }
    }

    /// Builder-style setter used while assembling configuration.
    #[must_use]
    pub fn with_max_binary_message_size(self, size: i64) -> Self {
        self.set_max_binary_message_size(size);
        self
    }

    /// Replace the size limit. Frames accepted afterwards observe the new value.
    pub fn set_max_binary_message_size(&self, size: i64) {
        self.max_binary_message_size.store(size, Ordering::Relaxed);
    }
}

impl Default for SessionConfig {
    fn default() -> Self { Self::new(DEFAULT_MAX_BINARY_MESSAGE_SIZE) }
}

impl SessionLimits for SessionConfig {
    fn max_binary_message_size(&self) -> i64 { self.max_binary_message_size.load(Ordering::Relaxed) }
}
