//! Status channel between the audio service and the session
//!
//! Each loaded track gets its own channel. The session holds the receiving
//! end for as long as the track is loaded; dropping it on teardown is the
//! unsubscribe. Publishers can tell from a failed send that nobody listens
//! anymore and stop reporting.

use crate::service::PlaybackHandle;
use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};

/// Periodic playback status reported by the audio service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlaybackStatus {
    /// Current position in milliseconds
    pub position_ms: u64,

    /// Track duration in milliseconds
    pub duration_ms: u64,

    /// Whether audio is currently audible
    pub is_playing: bool,

    /// Set once when the track reaches its natural end
    pub did_just_finish: bool,
}

/// Events delivered on a track's status channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioEvent {
    /// Loading finished, track is playable
    Loaded {
        /// Track duration in milliseconds
        duration_ms: u64,
    },

    /// Loading failed after the service accepted the request
    LoadFailed {
        /// Failure description from the service
        reason: String,
    },

    /// Periodic status while loaded
    Status(PlaybackStatus),
}

/// Sending half, kept by the audio service
#[derive(Debug, Clone)]
pub struct StatusPublisher {
    handle: PlaybackHandle,
    sender: Sender<AudioEvent>,
}

impl StatusPublisher {
    /// Handle this publisher reports for
    pub fn handle(&self) -> PlaybackHandle {
        self.handle
    }

    /// Deliver an event
    ///
    /// Returns false once the subscriber is gone.
    pub fn publish(&self, event: AudioEvent) -> bool {
        self.sender.send(event).is_ok()
    }
}

/// Receiving half, owned by the session for one loaded track
#[derive(Debug)]
pub struct StatusSubscription {
    receiver: Receiver<AudioEvent>,
}

impl StatusSubscription {
    /// Next pending event without blocking
    ///
    /// `None` when nothing is queued or the publisher is gone.
    pub fn try_next(&self) -> Option<AudioEvent> {
        self.receiver.try_recv().ok()
    }
}

/// Create the channel for a newly loaded track
pub fn subscribe(handle: PlaybackHandle) -> (StatusPublisher, StatusSubscription) {
    let (sender, receiver) = unbounded();
    (
        StatusPublisher { handle, sender },
        StatusSubscription { receiver },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_arrive_in_order() {
        let (publisher, subscription) = subscribe(PlaybackHandle::new(1));

        assert!(publisher.publish(AudioEvent::Loaded { duration_ms: 1000 }));
        assert!(publisher.publish(AudioEvent::Status(PlaybackStatus {
            position_ms: 500,
            duration_ms: 1000,
            is_playing: true,
            did_just_finish: false,
        })));

        assert_eq!(
            subscription.try_next(),
            Some(AudioEvent::Loaded { duration_ms: 1000 })
        );
        assert!(matches!(subscription.try_next(), Some(AudioEvent::Status(_))));
        assert_eq!(subscription.try_next(), None);
    }

    #[test]
    fn publish_fails_after_unsubscribe() {
        let (publisher, subscription) = subscribe(PlaybackHandle::new(7));
        assert_eq!(publisher.handle(), PlaybackHandle::new(7));
        assert!(publisher.publish(AudioEvent::Loaded { duration_ms: 1 }));

        drop(subscription);

        assert!(!publisher.publish(AudioEvent::Loaded { duration_ms: 1 }));
    }

    #[test]
    fn try_next_is_none_once_publisher_dropped() {
        let (publisher, subscription) = subscribe(PlaybackHandle::new(3));
        publisher.publish(AudioEvent::Loaded { duration_ms: 10 });
        drop(publisher);

        assert_eq!(
            subscription.try_next(),
            Some(AudioEvent::Loaded { duration_ms: 10 })
        );
        assert_eq!(subscription.try_next(), None);
    }
}
