// cargo +nightly bench --bench mixer -- --nocapture
#![feature(test)]
extern crate test;
use core::time::Duration;
use test::{black_box, Bencher};

use piconsole::audio::*;

#[bench]
fn bench_mixer_4_channels(ben: &mut Bencher) {
    let player = Player::new(PlayerConfig::default().with_buffer_latency(Duration::ZERO));
    let wave: Vec<i8> = (0..256).map(|i| (i as u8).wrapping_sub(128) as i8).collect();
    let sample = player.load_sample(Sample::new(wave, 22050));
    for (i, chan) in [Chan::CHAN0, Chan::CHAN1, Chan::CHAN2, Chan::CHAN3].into_iter().enumerate() {
        player.play(chan, sample, 1.0 + i as f64 * 0.25, 0.5);
        player.set_loop(chan, 0, 256, LoopType::Forward, 0.0);
    }
    let mut buffer = vec![0u8; 4 * 1024];
    ben.iter(|| {
        black_box(player.read(&mut buffer));
    });
}

#[bench]
fn bench_scheduling(ben: &mut Bencher) {
    let player = Player::default();
    let sample = player.load_sample(Sample::new(vec![1; 64], 8000));
    let mut frames = vec![[0i16; 2]; 735];
    ben.iter(|| {
        for i in 0..16 {
            player.set_sample(Chan::ALL, sample, 0, i as f64 * 0.001);
            player.set_pitch(Chan::CHAN1, 1.5, i as f64 * 0.001);
        }
        player.clear_chan(Chan::ALL, 0.01);
        player.read_frames(&mut frames);
        black_box(&frames);
    });
}
