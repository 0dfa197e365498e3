//! Platform Alert Surfaces
//!
//! Implementations of the `emergency` collaborator traits: delayed local
//! notifications, a broadcast toast bus standing in for the UI layer, and
//! a `tel:` URI handoff for outbound calls.

mod dialer;
mod local;
mod toast;

pub use dialer::TelUriDialer;
pub use local::{DeliveredNotification, LocalNotifier};
pub use toast::{Toast, ToastBus};
