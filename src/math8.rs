use embassy_time::Duration;

/// Blend two 8-bit values
#[inline]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub const fn blend8(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let delta = b as i16 - a as i16;

    let mut partial: u32 = (a as u32) << 16; // a * 65536
    partial = partial.wrapping_add(
        (delta as u32)
            .wrapping_mul(amount_of_b as u32)
            .wrapping_mul(257),
    ); // (b - a) * amount_of_b * 257
    partial = partial.wrapping_add(0x8000); // + 32768 for rounding

    (partial >> 16) as u8
}

/// Calculate progress (0-255) based on elapsed time and duration
///
/// A zero duration counts as complete.
#[allow(clippy::cast_possible_truncation)]
#[inline]
pub const fn progress8(elapsed: Duration, duration: Duration) -> u8 {
    let duration = duration.as_ticks();
    let elapsed = elapsed.as_ticks();
    if elapsed >= duration {
        return 255;
    }

    ((elapsed as u128 * 255) / duration as u128) as u8
}

/// Clamp `value` into the closed range spanned by `a` and `b`, in either order
#[inline]
pub const fn clamp_between(value: u8, a: u8, b: u8) -> u8 {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    if value < low {
        low
    } else if value > high {
        high
    } else {
        value
    }
}

/// Level of a fade from `from` to `to` after `elapsed` out of `duration`
///
/// The result never leaves the range spanned by `from` and `to`.
#[inline]
pub const fn fade8(from: u8, to: u8, elapsed: Duration, duration: Duration) -> u8 {
    let level = blend8(from, to, progress8(elapsed, duration));
    clamp_between(level, from, to)
}
