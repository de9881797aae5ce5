#![cfg(feature = "audio")]
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use piconsole::audio::*;

const RATE: u32 = 8000;

fn player() -> Player {
    Player::new(PlayerConfig::default().with_sample_rate(RATE)
                                       .with_buffer_latency(Duration::from_millis(10)))
}

fn left_right(player: &Player, count: usize) -> Vec<[i16; 2]> {
    let mut frames = vec![[0; 2]; count];
    player.read_frames(&mut frames);
    frames
}

#[test]
fn channels_do_not_cross_stereo_sides() {
    let wave: Vec<i8> = (0..64).map(|i| if i & 4 == 0 { 40 } else { -40 }).collect();
    let mut outputs = Vec::new();
    for chan in [Chan::CHAN0, Chan::CHAN1, Chan::CHAN0|Chan::CHAN1|Chan::CHAN3] {
        let player = player();
        let sample = player.load_sample(Sample::new(wave.clone(), RATE as u16));
        player.play(chan, sample, 1.0, 0.5);
        outputs.push(left_right(&player, 200));
    }
    for ((only0, only1), both) in outputs[0].iter().zip(&outputs[1]).zip(&outputs[2]) {
        assert_eq!(both[0], only0[0] * 2);
        assert_eq!(only0[1], 0);
        assert_eq!(both[1], only1[1]);
        assert_eq!(only1[0], 0);
    }
    assert!(outputs[2].iter().any(|[l, _]| *l != 0));
}

#[test]
fn mixer_runs_on_another_thread() {
    let player = Arc::new(player());
    let sample = player.load_sample(Sample::new(vec![100; 4000], RATE as u16));
    let mixer = {
        let player = Arc::clone(&player);
        thread::spawn(move || {
            let mut buffer = vec![0u8; 256];
            let mut peak = 0i16;
            for _ in 0..100 {
                assert_eq!(player.read(&mut buffer), 256);
                for frame in buffer.chunks_exact(4) {
                    peak = peak.max(i16::from_le_bytes([frame[0], frame[1]]));
                }
            }
            peak
        })
    };
    player.play(Chan::CHAN3, sample, 1.0, 1.0);
    player.set_volume(Chan::CHAN3, 0.5, 0.5);
    let peak = mixer.join().unwrap();
    assert_eq!(player.current_tick(), 100 * 64);
    assert!(peak == 25600 || peak == 0);
    // the volume change lands at most 0.5 s plus the latency after the last mixed frame
    left_right(&player, 4100);
    let chan3 = player.channel_state(3).unwrap();
    assert_eq!(chan3.volume(), 0.5);
    assert_eq!(player.pending_commands(3), 0);
}

#[test]
fn scheduled_music_plays_in_order() {
    let player = player();
    let low = player.load_sample(Sample::new(vec![10; 1000], RATE as u16));
    let high = player.load_sample(Sample::new(vec![20; 1000], RATE as u16));
    player.set_sample(Chan::CHAN2, high, 0, 0.02);
    player.set_sample(Chan::CHAN2, low, 0, 0.01);
    player.clear_chan(Chan::CHAN2, 0.03);
    let right: Vec<i16> = left_right(&player, 400).iter().map(|[_, r]| r / 256).collect();
    // 10 ms latency is 80 ticks
    assert!(right[..160].iter().all(|&r| r == 0));
    assert!(right[160..240].iter().all(|&r| r == 10));
    assert!(right[240..320].iter().all(|&r| r == 20));
    assert!(right[320..].iter().all(|&r| r == 0));
}
