//! Density → colour ramp

/// One RGBA8 texel, uploadable as raw bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Rgba8 = Rgba8::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Ramp stops: transparent → blue → cyan → yellow → red
const STOPS: [(f32, [f32; 4]); 5] = [
    (0.0, [0.0, 0.0, 255.0, 0.0]),
    (0.25, [0.0, 0.0, 255.0, 140.0]),
    (0.5, [0.0, 255.0, 255.0, 180.0]),
    (0.75, [255.0, 255.0, 0.0, 210.0]),
    (1.0, [255.0, 0.0, 0.0, 235.0]),
];

/// Colour for a normalised density in [0, 1] (clamped)
pub fn ramp(value: f32) -> Rgba8 {
    let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    if v <= 0.0 {
        return Rgba8::TRANSPARENT;
    }

    let upper = STOPS.iter().position(|&(t, _)| t >= v).unwrap_or(STOPS.len() - 1);
    let (t0, c0) = STOPS[upper - 1];
    let (t1, c1) = STOPS[upper];
    let w = (v - t0) / (t1 - t0);

    let ch = |i: usize| (c0[i] + (c1[i] - c0[i]) * w).round() as u8;
    Rgba8::new(ch(0), ch(1), ch(2), ch(3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_endpoints() {
        assert_eq!(ramp(0.0), Rgba8::TRANSPARENT);
        assert_eq!(ramp(-3.0), Rgba8::TRANSPARENT);
        assert_eq!(ramp(f32::NAN), Rgba8::TRANSPARENT);
        assert_eq!(ramp(1.0), Rgba8::new(255, 0, 0, 235));
        assert_eq!(ramp(7.0), Rgba8::new(255, 0, 0, 235));
    }

    #[test]
    fn test_ramp_stops() {
        assert_eq!(ramp(0.25), Rgba8::new(0, 0, 255, 140));
        assert_eq!(ramp(0.5), Rgba8::new(0, 255, 255, 180));
        assert_eq!(ramp(0.75), Rgba8::new(255, 255, 0, 210));
    }

    #[test]
    fn test_alpha_rises_with_density() {
        let mut last = 0;
        for i in 0..=100 {
            let a = ramp(i as f32 / 100.0).a;
            assert!(a >= last);
            last = a;
        }
    }

    #[test]
    fn test_texels_cast_to_bytes() {
        let texels = [Rgba8::new(1, 2, 3, 4), Rgba8::new(5, 6, 7, 8)];
        let bytes: &[u8] = bytemuck::cast_slice(&texels);
        assert_eq!(bytes, &[1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
