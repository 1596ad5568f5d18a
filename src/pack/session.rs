//! Double-buffered regeneration of packed strokes.

use std::sync::Arc;

use crate::{
    authoring::builder::Builder,
    foundation::core::Resolution,
    foundation::error::StrokeResult,
    pack::packer::{PackOptions, PackedStrokes, pack},
};

type AuthorFn = dyn Fn(&mut Builder, Resolution) -> StrokeResult<()>;

/// Owns an authoring procedure and two slots of packed output.
///
/// `regenerate` fills the inactive slot and flips only on success, so readers holding an
/// `Arc` from [`StrokeSession::active`] always see a complete buffer set.
pub struct StrokeSession {
    author: Box<AuthorFn>,
    opts: PackOptions,
    slots: [Option<Arc<PackedStrokes>>; 2],
    active: usize,
    generation: u64,
}

impl std::fmt::Debug for StrokeSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrokeSession")
            .field("opts", &self.opts)
            .field("active", &self.active)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl StrokeSession {
    /// Session with no packed output yet.
    pub fn new<F>(author: F, opts: PackOptions) -> Self
    where
        F: Fn(&mut Builder, Resolution) -> StrokeResult<()> + 'static,
    {
        Self {
            author: Box::new(author),
            opts,
            slots: [None, None],
            active: 0,
            generation: 0,
        }
    }

    /// Currently published output.
    pub fn active(&self) -> Option<Arc<PackedStrokes>> {
        self.slots[self.active].clone()
    }

    /// Number of successful regenerations.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Options used for the next regeneration.
    pub fn options(&self) -> &PackOptions {
        &self.opts
    }

    /// Re-author on a fresh builder, pack, and publish on success.
    ///
    /// On error the previously active output stays published.
    #[tracing::instrument(skip(self), fields(generation = self.generation))]
    pub fn regenerate(&mut self, resolution: Resolution) -> StrokeResult<Arc<PackedStrokes>> {
        let mut opts = self.opts;
        opts.resolution = resolution;
        let result = Builder::author(|b| (self.author)(b, resolution))
            .and_then(|mut builder| pack(&mut builder, &opts));
        match result {
            Ok(packed) => {
                let packed = Arc::new(packed);
                let inactive = 1 - self.active;
                self.slots[inactive] = Some(Arc::clone(&packed));
                self.active = inactive;
                self.opts = opts;
                self.generation += 1;
                tracing::debug!(generation = self.generation, "published packed strokes");
                Ok(packed)
            }
            Err(err) => {
                tracing::warn!(error = %err, "regeneration failed, keeping active buffers");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pack/session.rs"]
mod tests;
