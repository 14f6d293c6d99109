/// Perlin's quintic smoothstep, mirrored around zero: `|t|³(6|t|² - 15|t| + 10)`.
pub fn fade(t: f64) -> f64 {
    let t = t.abs();
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Cubic through `v1` at `x = 0` and `v2` at `x = 1`, with slopes taken from
/// the outer samples.
pub fn cubic_interpolate([v0, v1, v2, v3]: [f64; 4], x: f64) -> f64 {
    let p = (v3 - v2) - (v0 - v1);
    let q = (v0 - v1) - p;
    let r = v2 - v0;
    let s = v1;
    p * x * x * x + q * x * x + r * x + s
}

/// Floor-mod of a lattice coordinate into `0..len`.
pub fn wrap_index(coord: i64, len: usize) -> usize {
    coord.rem_euclid(len as i64) as usize
}
