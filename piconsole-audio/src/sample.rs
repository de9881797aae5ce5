/*
    Copyright (C) 2026  PICONSOLE contributors

    This file is part of PICONSOLE, a Rust library for building fantasy consoles.

    For the full copyright notice, see the lib.rs file.
*/
//! PCM samples, the handles of loaded samples and the conversion of mixed output samples.
use std::sync::Arc;

#[allow(unused_imports)]
use log::{error, warn, info, debug, trace};

/// An immutable buffer of signed 8-bit PCM data together with its native sample rate.
///
/// Cloning a `Sample` is cheap, the data is shared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sample {
    data: Arc<[i8]>,
    sample_rate: u16
}

impl Sample {
    pub fn new<D: Into<Arc<[i8]>>>(data: D, sample_rate: u16) -> Self {
        Sample { data: data.into(), sample_rate }
    }
    /// Returns the PCM data.
    #[inline]
    pub fn data(&self) -> &[i8] {
        &self.data
    }
    #[inline]
    pub fn sample_rate(&self) -> u16 {
        self.sample_rate
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub(crate) fn shared_data(&self) -> Arc<[i8]> {
        Arc::clone(&self.data)
    }
}

/// An opaque identifier of a sample loaded into a [Player][crate::Player].
///
/// A handle of an unloaded sample becomes stale and is never reused, even if its slot is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SampleHandle {
    index: u32,
    generation: u32
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    sample: Option<Sample>
}

/// A table of loaded samples addressed by generational handles.
#[derive(Debug, Default)]
pub(crate) struct SampleTable {
    slots: Vec<Slot>,
    free: Vec<u32>
}

impl SampleTable {
    pub fn insert(&mut self, sample: Sample) -> SampleHandle {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.sample = Some(sample);
            return SampleHandle { index, generation: slot.generation }
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot { generation: 0, sample: Some(sample) });
        SampleHandle { index, generation: 0 }
    }

    pub fn remove(&mut self, handle: SampleHandle) -> Option<Sample> {
        let slot = self.slots.get_mut(handle.index as usize)
                       .filter(|slot| slot.generation == handle.generation)?;
        let sample = slot.sample.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        Some(sample)
    }

    pub fn get(&self, handle: SampleHandle) -> Option<&Sample> {
        self.slots.get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.sample.as_ref())
    }

    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

/// Provides various methods to primitive types being used as audio output samples.
pub trait AudioSample: Copy + Send + Default + 'static {
    /// Creates a silent sample value (with zero amplitude). Useful for filling buffers.
    #[inline(always)]
    fn silence() -> Self {
        Self::default()
    }
}

/// For converting samples between types.
pub trait FromSample<S> {
    /// Converts to Self a sample from the `other`.
    fn from_sample(other: S) -> Self;
}

impl AudioSample for f32 {}
impl AudioSample for f64 {}
impl AudioSample for i8 {}
impl AudioSample for i16 {}
impl AudioSample for i32 {}
impl AudioSample for i64 {}
impl AudioSample for u8 {
    #[inline(always)] fn silence() -> Self { 0x80 }
}
impl AudioSample for u16 {
    #[inline(always)] fn silence() -> Self { 0x8000 }
}
impl AudioSample for u32 {
    #[inline(always)] fn silence() -> Self { 1 << 31 }
}
impl AudioSample for u64 {
    #[inline(always)] fn silence() -> Self { 1 << 63 }
}

macro_rules! impl_from_i16_float {
    ($($ft:ty),*) => {$(
        impl FromSample<i16> for $ft {
            #[inline]
            fn from_sample(other: i16) -> $ft {
                if other < 0 {
                    other as $ft / -(i16::MIN as $ft)
                } else {
                    other as $ft / i16::MAX as $ft
                }
            }
        }
    )*};
}

macro_rules! impl_from_i16_int {
    ($($int:ty, $uint:ty, $shift:expr);*) => {$(
        impl FromSample<i16> for $int {
            #[inline]
            fn from_sample(other: i16) -> $int {
                (other as $int) << $shift
            }
        }

        impl FromSample<i16> for $uint {
            #[inline]
            fn from_sample(other: i16) -> $uint {
                <$int>::from_sample(other).wrapping_sub(<$int>::MIN) as $uint
            }
        }
    )*};
}

impl FromSample<i16> for i8 {
    #[inline]
    fn from_sample(other: i16) -> i8 {
        (other >> 8) as i8
    }
}

impl FromSample<i16> for u8 {
    #[inline]
    fn from_sample(other: i16) -> u8 {
        i8::from_sample(other).wrapping_sub(i8::MIN) as u8
    }
}

impl_from_i16_float!(f32, f64);
impl_from_i16_int!(i16, u16, 0; i32, u32, 16; i64, u64, 48);
