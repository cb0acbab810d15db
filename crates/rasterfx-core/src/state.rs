//! Live buffer plus its snapshots.
//!
//! A [`BufferState`] owns three buffers at most:
//! - the **live** buffer every effect operates on
//! - the **original**, captured at load time and only replaced by a reload
//! - an optional **checkpoint**, allocated on first use and overwritten on
//!   every later checkpoint
//!
//! Restoring copies pixels into the live buffer; ownership never moves.

use std::sync::Arc;

use crate::error::LoadError;
use crate::image::PixelBuffer;
use crate::loader::{ImageSource, MemorySource, sample_size};

/// Editable image with restore points.
#[derive(Debug, Clone)]
pub struct BufferState {
    live: PixelBuffer,
    original: PixelBuffer,
    checkpoint: Option<PixelBuffer>,
    source: Option<Arc<dyn ImageSource + Send + Sync>>,
    sample_ratio: u32,
    source_dimensions: (u32, u32),
}

impl BufferState {
    /// Decode `source` so that both dimensions fall below the requested size
    /// (0 for either keeps full resolution).
    pub fn load(
        source: Arc<dyn ImageSource + Send + Sync>,
        req_width: u32,
        req_height: u32,
    ) -> Result<Self, LoadError> {
        let (src_width, src_height) = source.dimensions()?;
        let sample_ratio = sample_size(src_width, src_height, req_width, req_height);
        let live = source.decode(sample_ratio)?;
        tracing::info!(
            "loaded {src_width}x{src_height} source at 1/{sample_ratio} ({}x{})",
            live.width(),
            live.height()
        );
        Ok(Self {
            original: live.clone(),
            live,
            checkpoint: None,
            source: Some(source),
            sample_ratio,
            source_dimensions: (src_width, src_height),
        })
    }

    /// Wrap an already-decoded buffer. Such a state has no source, so
    /// [`reload_from_source`](Self::reload_from_source) fails with
    /// [`LoadError::NoSource`].
    pub fn from_buffer(buffer: PixelBuffer) -> Self {
        let source_dimensions = (buffer.width(), buffer.height());
        Self {
            original: buffer.clone(),
            live: buffer,
            checkpoint: None,
            source: None,
            sample_ratio: 1,
            source_dimensions,
        }
    }

    /// The buffer effects operate on.
    pub fn buffer(&self) -> &PixelBuffer {
        &self.live
    }

    pub fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.live
    }

    /// The load-time snapshot.
    pub fn original(&self) -> &PixelBuffer {
        &self.original
    }

    pub fn has_checkpoint(&self) -> bool {
        self.checkpoint.is_some()
    }

    /// Integer ratio the live buffer was decoded at.
    pub fn sample_ratio(&self) -> u32 {
        self.sample_ratio
    }

    /// Full-resolution dimensions of the source.
    pub fn source_dimensions(&self) -> (u32, u32) {
        self.source_dimensions
    }

    /// Copy the original snapshot back into the live buffer.
    pub fn restore_original(&mut self) {
        self.live.copy_from(&self.original);
    }

    /// Save the live buffer as the checkpoint, replacing any previous one.
    pub fn checkpoint(&mut self) {
        if let Some(saved) = &mut self.checkpoint
            && saved.copy_from(&self.live)
        {
            return;
        }
        self.checkpoint = Some(self.live.clone());
    }

    /// Copy the checkpoint into the live buffer. No-op without a checkpoint.
    pub fn restore_checkpoint(&mut self) {
        if let Some(saved) = &self.checkpoint {
            self.live.copy_from(saved);
        }
    }

    /// Decode the source again at the stored ratio, replacing the live buffer
    /// and the original. The checkpoint is dropped since it may no longer
    /// match the reloaded pixels.
    pub fn reload_from_source(&mut self) -> Result<(), LoadError> {
        let source = self.source.as_ref().ok_or(LoadError::NoSource)?;
        let fresh = source.decode(self.sample_ratio)?;
        tracing::info!("reloaded source at 1/{}", self.sample_ratio);
        self.original = fresh.clone();
        self.live = fresh;
        self.checkpoint = None;
        Ok(())
    }

    /// Independent low-resolution state built from the live buffer.
    ///
    /// The preview keeps a link to the source (if any) at the combined ratio
    /// so it can reload on its own. States without a source get the parent's
    /// live pixels as their source.
    pub fn preview(&self, req_width: u32, req_height: u32) -> BufferState {
        let ratio = sample_size(self.live.width(), self.live.height(), req_width, req_height);
        let live = self.live.downsample(ratio);
        let (source, sample_ratio): (Arc<dyn ImageSource + Send + Sync>, u32) = match &self.source {
            Some(source) => (Arc::clone(source), self.sample_ratio.saturating_mul(ratio)),
            None => (Arc::new(MemorySource::new(self.live.clone())), ratio),
        };
        BufferState {
            original: live.clone(),
            live,
            checkpoint: None,
            source: Some(source),
            sample_ratio,
            source_dimensions: self.source_dimensions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Rgba8;

    fn state_4x4() -> BufferState {
        let mut buffer = PixelBuffer::new(4, 4, Rgba8::default());
        for (i, px) in buffer.pixels_mut().iter_mut().enumerate() {
            *px = Rgba8::opaque(i as u8 * 10, 0, 0);
        }
        BufferState::from_buffer(buffer)
    }

    fn fill(state: &mut BufferState, px: Rgba8) {
        state.buffer_mut().map_in_place(|_| px);
    }

    #[test]
    fn test_restore_checkpoint_without_checkpoint_is_noop() {
        let mut state = state_4x4();
        fill(&mut state, Rgba8::opaque(1, 1, 1));
        state.restore_checkpoint();
        assert!(!state.has_checkpoint());
        assert!(state.buffer().pixels().iter().all(|&p| p == Rgba8::opaque(1, 1, 1)));
    }

    #[test]
    fn test_checkpoint_overwrites_previous() {
        let mut state = state_4x4();
        fill(&mut state, Rgba8::opaque(1, 1, 1));
        state.checkpoint();
        fill(&mut state, Rgba8::opaque(2, 2, 2));
        state.checkpoint();
        fill(&mut state, Rgba8::opaque(3, 3, 3));
        state.restore_checkpoint();
        assert!(state.buffer().pixels().iter().all(|&p| p == Rgba8::opaque(2, 2, 2)));
    }

    #[test]
    fn test_restore_original_ignores_checkpoint() {
        let mut state = state_4x4();
        let original = state.original().clone();
        fill(&mut state, Rgba8::opaque(7, 7, 7));
        state.checkpoint();
        state.restore_original();
        assert_eq!(state.buffer(), &original);
        assert_eq!(state.original(), &original);
    }

    #[test]
    fn test_reload_without_source_fails() {
        let mut state = state_4x4();
        assert!(matches!(state.reload_from_source(), Err(LoadError::NoSource)));
    }

    #[test]
    fn test_reload_replaces_original_and_drops_checkpoint() {
        let source = MemorySource::new(PixelBuffer::new(8, 8, Rgba8::opaque(9, 8, 7)));
        let mut state = BufferState::load(Arc::new(source), 5, 5).expect("load");
        assert_eq!(state.sample_ratio(), 2);
        assert_eq!(state.buffer().width(), 4);
        fill(&mut state, Rgba8::opaque(0, 0, 0));
        state.checkpoint();
        state.reload_from_source().expect("reload");
        assert!(!state.has_checkpoint());
        assert_eq!(state.buffer(), state.original());
        assert_eq!(state.buffer().get(0, 0), Some(Rgba8::opaque(9, 8, 7)));
        assert_eq!(state.buffer().width(), 4);
    }

    #[test]
    fn test_preview_is_independent_and_reloadable() {
        let mut state = state_4x4();
        let mut preview = state.preview(3, 3);
        assert_eq!((preview.buffer().width(), preview.buffer().height()), (2, 2));
        assert_eq!(preview.sample_ratio(), 2);

        fill(&mut preview, Rgba8::opaque(5, 5, 5));
        assert_eq!(state.buffer().get(0, 0), Some(Rgba8::opaque(0, 0, 0)));

        fill(&mut state, Rgba8::opaque(6, 6, 6));
        preview.reload_from_source().expect("reload");
        assert_eq!(preview.buffer().get(1, 0), Some(Rgba8::opaque(20, 0, 0)));
    }
}
