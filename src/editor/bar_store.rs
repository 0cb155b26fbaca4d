// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Ordered store of bars bound to their views.

use tracing::debug;

use super::view::{BarView, ViewFactory};
use crate::error::{EditorError, Result};
use crate::track::{BarRecord, Note, SongConstants};

/// A bar record paired with its view and on-axis placement
#[derive(Debug, Clone)]
pub struct BoundBar<V> {
    record: BarRecord,
    view: V,
    position: f64,
}

impl<V: BarView> BoundBar<V> {
    /// The bar's data
    pub fn record(&self) -> &BarRecord {
        &self.record
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Placement along the scroll axis relative to the timeline origin
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn index(&self) -> usize {
        self.record.index
    }

    pub fn beats_per_minute(&self) -> u32 {
        self.record.beats_per_minute
    }

    /// Snapshot of the record with the view's current notes
    fn snapshot(&self) -> BarRecord {
        BarRecord {
            index: self.record.index,
            beats_per_minute: self.record.beats_per_minute,
            notes: self.view.export_notes(),
        }
    }
}

/// Append-only bar collection
///
/// Records and views live in the same entries, so they can never drift out
/// of alignment.
#[derive(Debug, Clone)]
pub struct BarStore<V> {
    bars: Vec<BoundBar<V>>,
    bar_width: f64,
}

impl<V: BarView> BarStore<V> {
    /// Create an empty store for bars of the given width
    pub fn new(bar_width: f64) -> Self {
        Self {
            bars: Vec::new(),
            bar_width,
        }
    }

    pub fn bar_width(&self) -> f64 {
        self.bar_width
    }

    /// Bind a record to a fresh view at the end of the store
    ///
    /// `placement_index` must equal the current length and the record's own
    /// index, so the store never has gaps.
    pub fn append<F>(
        &mut self,
        record: BarRecord,
        placement_index: usize,
        factory: &mut F,
        song: &SongConstants,
    ) -> Result<()>
    where
        F: ViewFactory<View = V>,
    {
        if placement_index != self.bars.len() {
            return Err(EditorError::invalid_state(format!(
                "cannot place bar at {} in a store of {} bars",
                placement_index,
                self.bars.len()
            )));
        }
        if record.index != placement_index {
            return Err(EditorError::invalid_state(format!(
                "bar record index {} does not match placement {}",
                record.index, placement_index
            )));
        }

        let position = placement_index as f64 * self.bar_width;
        let mut view = factory.create_view();
        view.bind_data(placement_index, &song.key);
        view.set_local_position(position);

        debug!(index = placement_index, bpm = record.beats_per_minute, position, "bound bar");
        self.bars.push(BoundBar {
            record,
            view,
            position,
        });
        Ok(())
    }

    /// Get the bar at `index`
    pub fn get(&self, index: usize) -> Result<&BoundBar<V>> {
        let len = self.bars.len();
        self.bars
            .get(index)
            .ok_or(EditorError::IndexOutOfRange { index, len })
    }

    /// Get the bar at `index` mutably
    pub fn get_mut(&mut self, index: usize) -> Result<&mut BoundBar<V>> {
        let len = self.bars.len();
        self.bars
            .get_mut(index)
            .ok_or(EditorError::IndexOutOfRange { index, len })
    }

    pub fn count(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoundBar<V>> {
        self.bars.iter()
    }

    /// Tempo of the last bar, if any
    pub fn last_tempo(&self) -> Option<u32> {
        self.bars.last().map(|b| b.record.beats_per_minute)
    }

    /// Set the tempo of every bar
    pub fn set_tempo_all(&mut self, beats_per_minute: u32) {
        for bar in &mut self.bars {
            bar.record.beats_per_minute = beats_per_minute;
        }
    }

    /// Snapshot every bar in index order with the notes currently held by
    /// each view
    pub fn export_all(&self) -> Vec<BarRecord> {
        self.bars.iter().map(BoundBar::snapshot).collect()
    }

    /// Deliver notes to the bar at `index`
    pub fn load_notes_into(&mut self, index: usize, notes: &[Note]) -> Result<()> {
        let bar = self.get_mut(index)?;
        bar.record.notes = notes.to_vec();
        bar.view.load_notes(notes);
        Ok(())
    }

    /// Push each bar's stored notes to its view
    pub fn reload_all_notes(&mut self) {
        for bar in &mut self.bars {
            bar.view.load_notes(&bar.record.notes);
        }
    }

    /// Drop every bound bar
    pub fn clear(&mut self) {
        self.bars.clear();
    }
}
