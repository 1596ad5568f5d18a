/// Dense `f32` volume with `channels` values per cell.
///
/// Axes are `(x, y, z) = (control point, curve, frame)`; cell `(x, y, z)` starts at
/// `((z * height + y) * width + x) * channels`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Buffer3D {
    width: usize,
    height: usize,
    depth: usize,
    channels: usize,
    data: Vec<f32>,
}

impl Buffer3D {
    /// Zero-filled buffer.
    pub fn new(width: usize, height: usize, depth: usize, channels: usize) -> Self {
        Self {
            width,
            height,
            depth,
            channels,
            data: vec![0.0; width * height * depth * channels],
        }
    }

    /// `(width, height, depth)`.
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.depth)
    }

    /// Values per cell.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Offset of the first channel of a cell.
    pub fn offset(&self, x: usize, y: usize, z: usize) -> Option<usize> {
        if x >= self.width || y >= self.height || z >= self.depth {
            return None;
        }
        Some(((z * self.height + y) * self.width + x) * self.channels)
    }

    /// Channels of one cell.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<&[f32]> {
        let at = self.offset(x, y, z)?;
        Some(&self.data[at..at + self.channels])
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, z: usize, values: &[f32]) {
        if let Some(at) = self.offset(x, y, z) {
            let n = values.len().min(self.channels);
            self.data[at..at + n].copy_from_slice(&values[..n]);
        }
    }

    /// Flat storage.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Little-endian bytes of the flat storage, as uploaded to a texture.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.data.iter().flat_map(|v| v.to_le_bytes()).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pack/buffer.rs"]
mod tests;
