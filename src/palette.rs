//! Block colouring
//!
//! Hue walks around the wheel as the tower grows, so neighbouring layers
//! are easy to tell apart.

/// Saturation/lightness used for every block
const SATURATION: f32 = 0.7;
const LIGHTNESS: f32 = 0.6;

/// Linear RGB (0-1) for a block whose center sits at height `y`
pub fn color_for_height(y: f32) -> [f32; 3] {
    let hue = (y * 10.0).rem_euclid(360.0) / 360.0;
    hsl_to_rgb(hue, SATURATION, LIGHTNESS)
}

/// Pack an RGB triple into 0xRRGGBB
pub fn to_hex(rgb: [f32; 3]) -> u32 {
    let [r, g, b] = rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u32);
    (r << 16) | (g << 8) | b
}

/// HSL (all components 0-1) to RGB
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s == 0.0 {
        return [l, l, l];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
