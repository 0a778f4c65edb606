use xslice_buffer::grow::{DEFAULT_LARGE_DIVISOR, DEFAULT_THRESHOLD};
use xslice_buffer::{grow, GrowPolicy, View};
use xslice_tests::push_trace;

#[test]
fn test_doubling_until_threshold() {
    let (view, caps) = push_trace(0..DEFAULT_THRESHOLD as u32).unwrap();
    assert_eq!(DEFAULT_THRESHOLD, view.len());
    assert_eq!(DEFAULT_THRESHOLD, view.cap());
    assert_eq!(1, caps[0]);
    for w in caps.windows(2) {
        assert_eq!(w[0] * 2, w[1]);
    }
}

#[test]
fn test_quarter_growth_beyond_threshold() {
    let (_, caps) = push_trace(0..20_000u32).unwrap();
    let large: Vec<usize> = caps
        .iter()
        .copied()
        .filter(|c| *c >= DEFAULT_THRESHOLD)
        .collect();
    assert!(large.len() > 5);
    for w in large.windows(2) {
        assert_eq!(w[0] + w[0] / DEFAULT_LARGE_DIVISOR, w[1]);
        assert_ne!(w[0] * 2, w[1]);
    }
}

#[test]
fn test_append_102400() {
    let n = 102_400;
    let (view, caps) = push_trace(0..n as i32).unwrap();
    assert_eq!(n, view.len());
    assert_eq!(
        &[1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 1280, 1600, 2000][..],
        &caps[..14]
    );
    // every recorded capacity follows from the previous one
    for w in caps.windows(2) {
        assert_eq!(grow(w[0]), w[1]);
    }
    let last = *caps.last().unwrap();
    assert!(last >= n);
    assert_eq!(last, view.cap());
    assert!(view.iter().enumerate().all(|(i, v)| v == i as i32));
}

#[test]
fn test_capacity_sequence_matches_policy() {
    let (view, caps): (View<u16>, _) = push_trace(0..5000u16).unwrap();
    assert_eq!(5000, view.len());
    let expected: Vec<usize> = GrowPolicy::default()
        .steps(0)
        .take_while(|c| *c <= *caps.last().unwrap())
        .collect();
    assert_eq!(expected, caps);
}
