use smc::{detect_swings, Candle, SwingDetector, SwingKind, SwingPoint};

fn bar(high: f64, low: f64) -> Candle {
    let mid = (high + low) / 2.0;
    Candle::new(mid, high, low, mid)
}

#[test]
fn window_one_marks_middle_high() {
    let candles = vec![bar(5.0, 4.0), bar(8.0, 7.0), bar(3.0, 2.0)];
    let swings = detect_swings(&candles, 1);

    assert_eq!(swings.len(), 3);
    assert_eq!(swings[0], SwingPoint::NONE);
    assert_eq!(swings[1], SwingPoint::high(8.0));
    assert_eq!(swings[2], SwingPoint::NONE);
}

#[test]
fn swing_low_reported_when_high_fails() {
    let candles = vec![bar(5.0, 3.0), bar(4.0, 1.0), bar(6.0, 4.0)];
    let swings = detect_swings(&candles, 1);
    assert_eq!(swings[1], SwingPoint::low(1.0));
}

#[test]
fn high_wins_when_candle_is_both_extremes() {
    let candles = vec![bar(5.0, 3.0), bar(10.0, 1.0), bar(6.0, 4.0)];
    let swings = detect_swings(&candles, 1);
    assert_eq!(swings[1].kind, SwingKind::High);
    assert_eq!(swings[1].level, Some(10.0));
}

#[test]
fn equal_highs_do_not_disqualify() {
    let candles = vec![bar(8.0, 3.0), bar(8.0, 5.0), bar(7.0, 4.0)];
    let swings = detect_swings(&candles, 1);
    assert_eq!(swings[1], SwingPoint::high(8.0));
}

#[test]
fn strictly_greater_high_disqualifies() {
    let candles = vec![bar(8.5, 6.0), bar(8.0, 5.0), bar(7.0, 6.0)];
    let swings = detect_swings(&candles, 1);
    // 5.0 is still the lowest low in the window
    assert_eq!(swings[1], SwingPoint::low(5.0));
}

#[test]
fn edges_without_full_window_stay_none() {
    let candles = (0..9)
        .map(|i| {
            let h = if i == 4 { 20.0 } else { 10.0 + i as f64 * 0.1 };
            bar(h, h - 1.0)
        })
        .collect::<Vec<_>>();
    let swings = detect_swings(&candles, 2);

    for idx in [0usize, 1, 7, 8] {
        assert_eq!(swings[idx], SwingPoint::NONE, "index {idx} lacks a full window");
    }
    assert_eq!(swings[4], SwingPoint::high(20.0));
}

#[test]
fn window_at_half_length_yields_no_swings() {
    let candles = vec![bar(1.0, 0.0), bar(9.0, 0.5), bar(2.0, 1.0), bar(3.0, 2.0)];
    let swings = detect_swings(&candles, 2);
    assert_eq!(swings.len(), 4);
    assert!(swings.iter().all(|x| !x.is_swing()));
}

#[test]
fn zero_window_marks_every_candle_high() {
    let candles = vec![bar(5.0, 4.0), bar(3.0, 1.0), bar(7.0, 6.0)];
    let swings = SwingDetector::new(0).detect(&candles);
    let levels = swings.iter().map(|x| (x.kind, x.level)).collect::<Vec<_>>();
    assert_eq!(
        levels,
        vec![
            (SwingKind::High, Some(5.0)),
            (SwingKind::High, Some(3.0)),
            (SwingKind::High, Some(7.0)),
        ]
    );
}

#[test]
fn empty_input_gives_empty_output() {
    let swings = SwingDetector::default().detect(&[]);
    assert!(swings.is_empty());
    assert_eq!(SwingDetector::default().window_size(), 50);
}
