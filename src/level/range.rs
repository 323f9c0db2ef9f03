/// Fixed-width unsigned sample whose full range `[0, MAX]` is the white/black span
pub trait UnsignedSample: Copy + Ord + Into<u64> {
    const ZERO: Self;
    const MAX: Self;

    /// Narrows a value already known to lie in `[0, MAX]`
    fn from_u64(value: u64) -> Self;
}

impl UnsignedSample for u8 {
    const ZERO: Self = 0;
    const MAX: Self = u8::MAX;

    #[inline(always)]
    fn from_u64(value: u64) -> Self {
        u8::try_from(value).unwrap_or(u8::MAX)
    }
}

impl UnsignedSample for u16 {
    const ZERO: Self = 0;
    const MAX: Self = u16::MAX;

    #[inline(always)]
    fn from_u64(value: u64) -> Self {
        u16::try_from(value).unwrap_or(u16::MAX)
    }
}

/// What a min/max scan found
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scan<T> {
    /// No sample moved the initial bounds
    Empty,
    /// Every observed sample equals this value
    Flat(T),
    Spread { min: T, max: T },
}

impl<T: PartialOrd + Copy> Scan<T> {
    #[inline]
    fn classify(min: T, max: T) -> Self {
        if max < min {
            Self::Empty
        } else if max > min {
            Self::Spread { min, max }
        } else {
            Self::Flat(min)
        }
    }
}

/// Scans unsigned samples starting from `(MAX, 0)`
#[inline]
#[must_use]
pub fn scan_unsigned<T: UnsignedSample>(samples: &[T]) -> Scan<T> {
    let (min, max) = samples
        .iter()
        .fold((T::MAX, T::ZERO), |(min, max), &val| (min.min(val), max.max(val)));

    if samples.is_empty() {
        Scan::Empty
    } else {
        Scan::classify(min, max)
    }
}

/// Scans float samples starting from `(1.0, 0.0)`; NaN and infinities never move a bound
#[inline]
#[must_use]
pub fn scan_float(samples: &[f32]) -> Scan<f32> {
    let (min, max) = samples
        .iter()
        .filter(|val| val.is_finite())
        .fold((1.0_f32, 0.0_f32), |(min, max), &val| (min.min(val), max.max(val)));

    Scan::classify(min, max)
}
