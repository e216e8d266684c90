//! Inbound configuration messages from the companion side.
//!
//! One message type exists: a key byte plus a little-endian i32 value.
//! Key 0 carries the animations flag. The inbox holds 54 bytes; the outbound
//! direction is open but unused, so its budget is zero. Unknown keys are
//! skipped silently and bytes past the inbox budget are dropped (and
//! counted).

use heapless::Deque;

pub const INBOX_SIZE: usize = 54;
pub const OUTBOX_SIZE: usize = 0;

pub const KEY_ANIMATIONS: u8 = 0;

const FRAME_LEN: usize = 5;

/// A decoded configuration message.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigMessage {
    pub animations: Option<i32>,
}

/// Byte accumulator between the transport and the application.
pub struct Inbox {
    buf: Deque<u8, INBOX_SIZE>,
    dropped: u32,
}

impl Default for Inbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Inbox {
    pub fn new() -> Self {
        Self {
            buf: Deque::new(),
            dropped: 0,
        }
    }

    pub fn push(&mut self, byte: u8) {
        if self.buf.push_back(byte).is_err() {
            self.dropped = self.dropped.saturating_add(1);
        }
    }

    pub fn push_slice(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.push(b);
        }
    }

    /// Decode at most one complete frame. Unknown keys are consumed and
    /// skipped so a bad frame cannot wedge the inbox.
    pub fn poll(&mut self) -> Option<ConfigMessage> {
        while self.buf.len() >= FRAME_LEN {
            let key = self.buf.pop_front()?;
            let mut value = [0u8; 4];
            for b in &mut value {
                *b = self.buf.pop_front()?;
            }
            let value = i32::from_le_bytes(value);
            if key == KEY_ANIMATIONS {
                return Some(ConfigMessage {
                    animations: Some(value),
                });
            }
        }
        None
    }

    /// Bytes discarded because the inbox budget was exceeded.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

/// Encode a configuration frame; the simulator uses this to inject input.
pub fn encode_animations(value: i32) -> [u8; FRAME_LEN] {
    let v = value.to_le_bytes();
    [KEY_ANIMATIONS, v[0], v[1], v[2], v[3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_frame() {
        let mut inbox = Inbox::new();
        inbox.push_slice(&encode_animations(1));
        assert_eq!(
            inbox.poll(),
            Some(ConfigMessage {
                animations: Some(1)
            })
        );
        assert_eq!(inbox.poll(), None);
    }

    #[test]
    fn partial_frames_wait_for_the_rest() {
        let mut inbox = Inbox::new();
        let frame = encode_animations(0);
        inbox.push_slice(&frame[..3]);
        assert_eq!(inbox.poll(), None);
        inbox.push_slice(&frame[3..]);
        assert_eq!(
            inbox.poll(),
            Some(ConfigMessage {
                animations: Some(0)
            })
        );
    }

    #[test]
    fn unknown_keys_are_skipped() {
        let mut inbox = Inbox::new();
        inbox.push_slice(&[0x7F, 1, 0, 0, 0]);
        inbox.push_slice(&encode_animations(1));
        // The unknown frame is consumed, the valid one decodes.
        assert_eq!(
            inbox.poll(),
            Some(ConfigMessage {
                animations: Some(1)
            })
        );
    }

    #[test]
    fn overflow_drops_and_counts() {
        let mut inbox = Inbox::new();
        for _ in 0..(INBOX_SIZE + 10) {
            inbox.push(0xAA);
        }
        assert_eq!(inbox.dropped(), 10);
    }

    #[test]
    fn negative_values_survive_the_wire() {
        let mut inbox = Inbox::new();
        inbox.push_slice(&encode_animations(-2));
        assert_eq!(
            inbox.poll(),
            Some(ConfigMessage {
                animations: Some(-2)
            })
        );
    }
}
