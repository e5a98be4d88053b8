use app_core::{expand, midi_to_hz, Cue, ToneEvent, THEMES};

#[test]
fn midi_to_hz_matches_a4_and_octave() {
    let a4 = midi_to_hz(69.0);
    assert!((a4 - 440.0).abs() < 1e-4);
    let a5 = midi_to_hz(81.0);
    assert!((a5 - 880.0).abs() < 1e-3);
    assert!((a5 / a4 - 2.0).abs() < 1e-4);
}

#[test]
fn midi_to_hz_is_monotonic_over_range() {
    let mut prev = midi_to_hz(20.0);
    for m in 21..=100 {
        let f = midi_to_hz(m as f32);
        assert!(f > prev, "frequency not increasing at midi {m}");
        prev = f;
    }
}

fn expand_one(cue: Cue) -> Vec<ToneEvent> {
    let mut out = Vec::new();
    expand(cue, &THEMES[0], &mut out);
    out
}

#[test]
fn countdown_tick_pitch_rises_toward_zero() {
    let f3 = expand_one(Cue::CountdownTick(3))[0].frequency_hz;
    let f2 = expand_one(Cue::CountdownTick(2))[0].frequency_hz;
    let f1 = expand_one(Cue::CountdownTick(1))[0].frequency_hz;
    assert!(f3 < f2 && f2 < f1, "tick should climb: {f3} {f2} {f1}");
}

#[test]
fn touch_down_pitch_distinguishes_palette_slots() {
    let a = expand_one(Cue::TouchDown { color_index: 0 })[0].frequency_hz;
    let b = expand_one(Cue::TouchDown { color_index: 1 })[0].frequency_hz;
    assert!(b > a);
    // Slots wrap past the palette
    let wrapped = expand_one(Cue::TouchDown { color_index: 6 })[0].frequency_hz;
    assert!((wrapped - a).abs() < 1e-4);
}

#[test]
fn winner_fanfare_is_an_ascending_scheduled_arpeggio() {
    for theme in &THEMES {
        let mut out = Vec::new();
        expand(Cue::Winner, theme, &mut out);
        assert!(
            out.len() >= theme.fanfare.degrees.len(),
            "{} fanfare too short",
            theme.name
        );
        let mut prev_start = -1.0;
        for ev in &out {
            assert!(
                ev.start_offset_sec > prev_start,
                "{} fanfare must stagger notes",
                theme.name
            );
            prev_start = ev.start_offset_sec;
            assert!(ev.frequency_hz > 0.0);
            assert!(ev.duration_sec > 0.0);
            assert!(ev.velocity > 0.0 && ev.velocity <= 1.0);
        }
    }
}

#[test]
fn no_touch_cue_descends() {
    let out = expand_one(Cue::NoTouch);
    assert_eq!(out.len(), 2);
    assert!(out[1].frequency_hz < out[0].frequency_hz);
    assert!(out[1].start_offset_sec > out[0].start_offset_sec);
}

#[test]
fn every_theme_has_a_playable_fanfare_and_full_palette() {
    for theme in &THEMES {
        assert!(!theme.fanfare.degrees.is_empty(), "{}", theme.name);
        assert!(
            theme.touch_palette.len() >= 6,
            "{} palette too small for a party",
            theme.name
        );
        for c in theme.touch_palette {
            for ch in c.rgb {
                assert!((0.0..=1.0).contains(&ch));
            }
        }
    }
}
