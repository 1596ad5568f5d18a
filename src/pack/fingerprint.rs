use crate::{foundation::math::Fnv1a64, pack::buffer::Buffer3D, pack::packer::PackedStrokes};

/// 128-bit content hash built from two FNV-1a streams with different seeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct StrokeFingerprint {
    /// Hash of the default-seeded stream.
    pub hi: u64,
    /// Hash of the second stream.
    pub lo: u64,
}

impl std::fmt::Display for StrokeFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Hash every buffer value and metadata field of `packed`.
pub fn fingerprint_packed(packed: &PackedStrokes) -> StrokeFingerprint {
    let mut a = Fnv1a64::new_default();
    let mut b = Fnv1a64::new(0x9ae1_6a3b_2f90_404f);

    write_u64_pair(&mut a, &mut b, packed.control_points as u64);
    write_u64_pair(&mut a, &mut b, packed.curve_count as u64);
    write_u64_pair(&mut a, &mut b, packed.frame_count as u64);
    write_u64_pair(&mut a, &mut b, u64::from(packed.resolution.width));
    write_u64_pair(&mut a, &mut b, u64::from(packed.resolution.height));

    for buf in [&packed.positions, &packed.colors, &packed.thickness] {
        write_buffer_pair(&mut a, &mut b, buf);
    }

    for lengths in &packed.curve_lengths {
        write_u64_pair(&mut a, &mut b, lengths.len() as u64);
        for &len in lengths {
            write_f64_pair(&mut a, &mut b, len);
        }
    }
    for r in &packed.curve_groups {
        write_u64_pair(&mut a, &mut b, r.group as u64);
        write_u64_pair(&mut a, &mut b, r.curve as u64);
    }
    for t in &packed.frame_timing {
        write_f64_pair(&mut a, &mut b, t.start);
        write_f64_pair(&mut a, &mut b, t.duration);
        write_f64_pair(&mut a, &mut b, t.blend_strength);
    }
    for pose in &packed.keyframes {
        write_u8_pair(&mut a, &mut b, pose.ease as u8);
        write_f64_pair(&mut a, &mut b, pose.strength);
        write_u64_pair(&mut a, &mut b, pose.groups.len() as u64);
        for t in std::iter::once(&pose.transform).chain(&pose.groups) {
            write_f64_pair(&mut a, &mut b, t.translate.x);
            write_f64_pair(&mut a, &mut b, t.translate.y);
            write_f64_pair(&mut a, &mut b, t.scale.x);
            write_f64_pair(&mut a, &mut b, t.scale.y);
            write_f64_pair(&mut a, &mut b, t.rotate);
        }
    }

    StrokeFingerprint {
        hi: a.finish(),
        lo: b.finish(),
    }
}

fn write_buffer_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, buf: &Buffer3D) {
    let (w, h, d) = buf.dims();
    for v in [w, h, d, buf.channels()] {
        write_u64_pair(a, b, v as u64);
    }
    for &v in buf.as_slice() {
        a.write_f32(v);
        b.write_f32(v);
    }
}

fn write_u8_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u8) {
    a.write_u8(v);
    b.write_u8(v);
}

fn write_u64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u64) {
    a.write_u64(v);
    b.write_u64(v);
}

fn write_f64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: f64) {
    a.write_f64(v);
    b.write_f64(v);
}

#[cfg(test)]
#[path = "../../tests/unit/pack/fingerprint.rs"]
mod tests;
