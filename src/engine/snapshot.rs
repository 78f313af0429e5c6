use std::sync::Arc;

#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, RingBuffer};

/*
Realtime Handoff
================

Two threads touch each band: the control thread rebuilds tables, the audio
thread reads a gain value once per sample. Mutating the live table in place
would let the audio thread observe a half-rewritten cycle, so tables are
never mutated after publication. Instead the control thread publishes a
snapshot - the shared table handle plus the two scalars the callback needs -
through a single-producer single-consumer ring, and the audio thread drains
the ring to the most recent snapshot once per block:

    control thread                      audio thread
    --------------                      ------------
    rebuild into fresh Vec
    publisher.publish(snapshot)  --->   cursor.process_block(buffer)
                                          drain to newest snapshot
                                          per sample: advance + interpolate

If the ring is momentarily full the push is dropped; the engine still holds
the latest state and the next publish lands it. The audio side keeps
whatever snapshot it last received, so it always has a complete table.
*/

/// Everything the audio callback needs from one band's engine.
#[derive(Debug, Clone)]
pub struct BandSnapshot {
    /// Published gain table, immutable once shared.
    pub table: Arc<[f32]>,
    /// Phase advance per sample, in table entries.
    pub increment: f32,
    /// Read-position pre-rotation for inter-band staggering, in entries.
    pub phase_offset: f32,
}

#[cfg(feature = "rtrb")]
const SNAPSHOT_QUEUE_SIZE: usize = 8;

/// Control-thread side of a band's snapshot channel.
#[cfg(feature = "rtrb")]
pub struct SnapshotPublisher {
    tx: Producer<BandSnapshot>,
}

#[cfg(feature = "rtrb")]
impl SnapshotPublisher {
    /// Non-blocking publish; dropped if the ring is full.
    pub fn publish(&mut self, snapshot: BandSnapshot) {
        let _ = self.tx.push(snapshot);
    }
}

/// Audio-thread side: a phase cursor over the most recently published table.
#[cfg(feature = "rtrb")]
pub struct BandCursor {
    rx: Consumer<BandSnapshot>,
    current: BandSnapshot,
    position: f64,
}

#[cfg(feature = "rtrb")]
impl BandCursor {
    /// Create a connected publisher/cursor pair seeded with `initial`.
    pub fn channel(initial: BandSnapshot) -> (SnapshotPublisher, BandCursor) {
        let (tx, rx) = RingBuffer::<BandSnapshot>::new(SNAPSHOT_QUEUE_SIZE);
        let publisher = SnapshotPublisher { tx };
        let cursor = BandCursor {
            rx,
            current: initial,
            position: 0.0,
        };
        (publisher, cursor)
    }

    fn drain(&mut self) {
        while let Ok(snapshot) = self.rx.pop() {
            self.current = snapshot; // keep most recent
        }
    }

    /// Advance one sample and return the interpolated gain.
    pub fn next_gain(&mut self) -> f32 {
        let table = &self.current.table;
        if table.is_empty() {
            return 1.0;
        }
        let len = table.len() as f64;

        let read = (self.position + self.current.phase_offset as f64) % len;
        let index = read as usize;
        let frac = (read - index as f64) as f32;
        let next = (index + 1) % table.len();
        let gain = table[index] + frac * (table[next] - table[index]);

        self.position = (self.position + self.current.increment as f64) % len;
        gain
    }

    /// Scale a buffer in place by this band's gain envelope.
    ///
    /// Picks up newly published snapshots once per block, then runs
    /// allocation-free per sample.
    pub fn process_block(&mut self, buffer: &mut [f32]) {
        self.drain();
        for sample in buffer.iter_mut() {
            *sample *= self.next_gain();
        }
    }
}

#[cfg(all(test, feature = "rtrb"))]
mod tests {
    use super::*;

    fn snapshot_from(table: Vec<f32>, increment: f32, phase_offset: f32) -> BandSnapshot {
        BandSnapshot {
            table: table.into(),
            increment,
            phase_offset,
        }
    }

    #[test]
    fn cursor_walks_the_table_at_the_increment() {
        let table: Vec<f32> = (0..8).map(|i| i as f32).collect();
        let snapshot = snapshot_from(table, 2.0, 0.0);
        let (_publisher, mut cursor) = BandCursor::channel(snapshot);

        assert_eq!(cursor.next_gain(), 0.0);
        assert_eq!(cursor.next_gain(), 2.0);
        assert_eq!(cursor.next_gain(), 4.0);
        assert_eq!(cursor.next_gain(), 6.0);
        // Wraps modulo table length.
        assert_eq!(cursor.next_gain(), 0.0);
    }

    #[test]
    fn phase_offset_rotates_the_read_position() {
        let table: Vec<f32> = (0..8).map(|i| i as f32).collect();
        let snapshot = snapshot_from(table, 1.0, 3.0);
        let (_publisher, mut cursor) = BandCursor::channel(snapshot);

        assert_eq!(cursor.next_gain(), 3.0);
        assert_eq!(cursor.next_gain(), 4.0);
    }

    #[test]
    fn fractional_positions_interpolate() {
        let table = vec![0.0, 1.0, 0.0, 1.0];
        let snapshot = snapshot_from(table, 0.5, 0.0);
        let (_publisher, mut cursor) = BandCursor::channel(snapshot);

        assert_eq!(cursor.next_gain(), 0.0);
        assert_eq!(cursor.next_gain(), 0.5);
        assert_eq!(cursor.next_gain(), 1.0);
        assert_eq!(cursor.next_gain(), 0.5);
    }

    #[test]
    fn published_snapshot_takes_effect_next_block() {
        let quiet = snapshot_from(vec![0.25; 16], 1.0, 0.0);
        let loud = snapshot_from(vec![1.0; 16], 1.0, 0.0);
        let (mut publisher, mut cursor) = BandCursor::channel(quiet);

        let mut block = [1.0f32; 4];
        cursor.process_block(&mut block);
        assert!(block.iter().all(|&s| (s - 0.25).abs() < 1e-6));

        publisher.publish(loud);
        let mut block = [1.0f32; 4];
        cursor.process_block(&mut block);
        assert!(block.iter().all(|&s| (s - 1.0).abs() < 1e-6));
    }

    #[test]
    fn drain_keeps_only_the_newest_snapshot() {
        let initial = snapshot_from(vec![0.0; 8], 1.0, 0.0);
        let (mut publisher, mut cursor) = BandCursor::channel(initial);

        for gain in [0.1, 0.2, 0.3] {
            publisher.publish(snapshot_from(vec![gain; 8], 1.0, 0.0));
        }

        let mut block = [1.0f32; 2];
        cursor.process_block(&mut block);
        assert!(block.iter().all(|&s| (s - 0.3).abs() < 1e-6));
    }

    #[test]
    fn full_ring_drops_the_push_without_blocking() {
        let initial = snapshot_from(vec![1.0; 4], 1.0, 0.0);
        let (mut publisher, _cursor) = BandCursor::channel(initial);

        // Twice the queue capacity; the overflow is silently dropped.
        for i in 0..16 {
            publisher.publish(snapshot_from(vec![i as f32; 4], 1.0, 0.0));
        }
    }
}
