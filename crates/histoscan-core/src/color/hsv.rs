//! HSV (Hue-Saturation-Value) conversions in the 8-bit convention

/// Largest hue value in the 8-bit convention (hue is stored as degrees / 2).
pub const HUE_MAX: u8 = 179;

/// HSV color in 8-bit storage
/// - H (hue): 0-179, half-degrees
/// - S (saturation): 0-255
/// - V (value): 0-255
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

/// Convert 8-bit RGB to 8-bit HSV
#[inline]
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let (rf, gf, bf) = (r as f32, g as f32, b as f32);

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let v = max;

    // Black or achromatic
    if max <= 0.0 || delta <= 0.0 {
        return Hsv {
            h: 0,
            s: 0,
            v: v as u8,
        };
    }

    let s = 255.0 * delta / max;

    let mut h = if max == rf {
        60.0 * (gf - bf) / delta
    } else if max == gf {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };
    if h < 0.0 {
        h += 360.0;
    }

    // Half-degree storage; 360 degrees folds back onto 0
    let h_half = (h / 2.0).round() as u32 % 180;

    Hsv {
        h: h_half as u8,
        s: s.round().clamp(0.0, 255.0) as u8,
        v: v as u8,
    }
}

/// Convert 8-bit HSV back to 8-bit RGB
#[inline]
pub fn hsv_to_rgb(hsv: Hsv) -> [u8; 3] {
    let s = hsv.s as f32 / 255.0;
    let v = hsv.v as f32 / 255.0;

    if hsv.s == 0 {
        return [hsv.v, hsv.v, hsv.v];
    }

    let h = (hsv.h as f32 * 2.0) % 360.0;
    let sector = h / 60.0;
    let index = sector.floor() as u32 % 6;
    let f = sector - sector.floor();

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match index {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    [to_u8(r), to_u8(g), to_u8(b)]
}

#[inline]
fn to_u8(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
