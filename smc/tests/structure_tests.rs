use smc::{
    detect_structure_breaks, detect_swings, Bias, Candle, IndicatorError, StructureBreak,
    StructureBreakAnalyzer, SwingPoint,
};

fn bar(high: f64, low: f64) -> Candle {
    let mid = (high + low) / 2.0;
    Candle::new(mid, high, low, mid)
}

/// With a window of 1 this yields swings H12@1, L7@2, H14@3, L6@4, H16@5.
fn expanding_zigzag() -> Vec<Candle> {
    vec![
        bar(10.0, 8.0),
        bar(12.0, 10.0),
        bar(11.0, 7.0),
        bar(14.0, 9.0),
        bar(13.0, 6.0),
        bar(16.0, 10.0),
        bar(15.0, 11.0),
    ]
}

#[test]
fn fixture_swings_are_as_documented() {
    let swings = detect_swings(&expanding_zigzag(), 1);
    assert_eq!(
        swings.as_slice(),
        &[
            SwingPoint::NONE,
            SwingPoint::high(12.0),
            SwingPoint::low(7.0),
            SwingPoint::high(14.0),
            SwingPoint::low(6.0),
            SwingPoint::high(16.0),
            SwingPoint::NONE,
        ]
    );
}

#[test]
fn first_high_and_first_low_always_break() {
    let rows = detect_structure_breaks(&expanding_zigzag(), 1, true).expect("valid length");

    assert_eq!(rows[1].bos, Bias::Bullish);
    assert_eq!(rows[1].level, None, "nothing was there to break");
    assert_eq!(rows[1].broken_at, Some(1));

    assert_eq!(rows[2].bos, Bias::Bearish);
    assert_eq!(rows[2].level, None);
    assert_eq!(rows[2].broken_at, Some(2));
}

#[test]
fn bos_reports_the_previous_level() {
    let rows = detect_structure_breaks(&expanding_zigzag(), 1, true).expect("valid length");

    assert_eq!(rows[3].bos, Bias::Bullish);
    assert_eq!(rows[3].level, Some(12.0));
    assert_eq!(rows[3].origin, Some(1));
    assert_eq!(rows[3].broken_at, Some(3));

    assert_eq!(rows[5].bos, Bias::Bullish);
    assert_eq!(rows[5].broken_at, Some(5));
}

#[test]
fn choch_fires_on_zigzag_level_ordering() {
    let rows = detect_structure_breaks(&expanding_zigzag(), 1, true).expect("valid length");

    // only three swing points exist at index 3
    assert_eq!(rows[3].choch, Bias::None);

    // H12, L7, H14, L6: 6 < 7 < 12 < 14
    assert_eq!(rows[4].bos, Bias::Bearish);
    assert_eq!(rows[4].choch, Bias::Bearish);
    assert_eq!(rows[4].level, Some(7.0));
    assert_eq!(rows[4].origin, Some(2));

    // L7, H14, L6, H16: 16 > 14 > 7 > 6, the CHoCH level replaces the BOS level
    assert_eq!(rows[5].choch, Bias::Bullish);
    assert_eq!(rows[5].level, Some(14.0));
    assert_eq!(rows[5].origin, Some(3));

    assert_eq!(rows[0], StructureBreak::default());
    assert_eq!(rows[6], StructureBreak::default());
}

#[test]
fn higher_low_neither_breaks_nor_changes_character() {
    let candles = vec![
        bar(10.0, 8.0),
        bar(12.0, 10.0),
        bar(11.0, 7.0),
        bar(14.0, 9.0),
        bar(13.0, 8.5),
        bar(16.0, 10.0),
        bar(15.0, 11.0),
    ];
    let rows = detect_structure_breaks(&candles, 1, true).expect("valid length");

    assert_eq!(rows[4].bos, Bias::None);
    assert_eq!(rows[4].choch, Bias::None);
    assert_eq!(rows[4].level, None);
    assert_eq!(rows[4].broken_at, None);
}

#[test]
fn close_break_flag_does_not_change_output() {
    let with_close = detect_structure_breaks(&expanding_zigzag(), 1, true).expect("valid");
    let without_close = detect_structure_breaks(&expanding_zigzag(), 1, false).expect("valid");
    assert_eq!(with_close, without_close);

    let analyzer = StructureBreakAnalyzer::new(1, false).expect("valid");
    assert!(!analyzer.close_break());
}

#[test]
fn length_is_preserved_and_empty_input_is_fine() {
    let rows = detect_structure_breaks(&expanding_zigzag(), 1, true).expect("valid");
    assert_eq!(rows.len(), 7);

    let empty = detect_structure_breaks(&[], 50, true).expect("empty input is not an error");
    assert!(empty.is_empty());
}

#[test]
fn zero_swing_length_fails_fast() {
    let err = detect_structure_breaks(&expanding_zigzag(), 0, true).expect_err("must fail");
    assert!(matches!(err, IndicatorError::InvalidArgument(_)));
}
