use super::*;

fn style() -> CaptionStyle {
    CaptionStyle::for_resolution(Resolution::PORTRAIT_1080)
}

#[test]
fn three_words_over_six_seconds() {
    let words = plan_captions("hello world test", 6.0, &style());
    let slices: Vec<(f64, f64)> = words.iter().map(|w| (w.start, w.end)).collect();
    assert_eq!(slices, vec![(0.0, 2.0), (2.0, 4.0), (4.0, 6.0)]);
    assert_eq!(words[1].word, "world");
    assert!((words[0].fade - 0.3).abs() < 1e-12);
}

#[test]
fn slices_partition_the_duration() {
    let text = "one two  three\tfour\nfive six seven";
    let d = 5.3;
    let words = plan_captions(text, d, &style());
    assert_eq!(words.len(), 7);
    assert_eq!(words[0].start, 0.0);
    assert_eq!(words.last().unwrap().end, d);
    for pair in words.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
    for w in &words {
        assert!((w.end - w.start - d / 7.0).abs() < 1e-9);
    }
}

#[test]
fn zero_words_yield_no_overlays() {
    assert!(plan_captions("", 4.0, &style()).is_empty());
    assert!(plan_captions("   \n\t", 4.0, &style()).is_empty());
}

#[test]
fn fade_is_capped_by_a_third_of_the_slice() {
    let words = plan_captions("a b c d e f", 1.2, &style());
    assert!((words[0].fade - 0.2 / 3.0).abs() < 1e-12);
}

#[test]
fn palette_cycles_by_index() {
    let words = plan_captions("a b c d e f g", 7.0, &style());
    assert_eq!(words[0].color, PALETTE[0]);
    assert_eq!(words[4].color, PALETTE[4]);
    assert_eq!(words[5].color, PALETTE[0]);
}

#[test]
fn opacity_fades_in_and_out_within_the_slice() {
    let w = &plan_captions("hello world", 4.0, &style())[0];
    assert_eq!(w.opacity_at(0.0), 0.0);
    assert!((w.opacity_at(0.15) - 0.5).abs() < 1e-6);
    assert_eq!(w.opacity_at(1.0), 1.0);
    assert!(w.opacity_at(1.9) < 0.5);
    assert_eq!(w.opacity_at(2.0), 0.0);
}

#[test]
fn word_settles_upward_into_place() {
    let s = style();
    let w = &plan_captions("hello", 2.0, &s)[0];
    assert_eq!(w.settle_offset(0.0, &s), s.settle_px);
    assert_eq!(w.settle_offset(1.0, &s), 0.0);
}

#[test]
fn font_size_tracks_width_with_cap() {
    assert_eq!(CaptionStyle::for_resolution(Resolution::PORTRAIT_1080).font_size, 40.0);
    assert_eq!(CaptionStyle::for_resolution(Resolution::new(500, 900)).font_size, 20.0);
    assert_eq!(CaptionStyle::for_resolution(Resolution::new(500, 900)).center_y, 720.0);
}
