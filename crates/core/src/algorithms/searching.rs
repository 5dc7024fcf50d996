use crate::snapshot::{ArraySnapshot, Mark};
use crate::{Frame, FrameRecorder};

pub const LINEAR_SEARCH: &[&str] = &[
    "for i in 0..n",
    "  if a[i] == target: return i",
    "return not found",
];

pub const BINARY_SEARCH: &[&str] = &[
    "lo = 0; hi = n",
    "while lo < hi",
    "  mid = (lo + hi) / 2",
    "  if a[mid] == target: return mid",
    "  if a[mid] < target: lo = mid + 1",
    "  else: hi = mid",
    "return not found",
];

pub fn linear_search(values: &[i64], target: i64) -> Vec<Frame<ArraySnapshot>> {
    let mut state = ArraySnapshot::new(values.to_vec());
    let mut recorder = FrameRecorder::new();
    state.at_line(0);
    recorder.record(&state, format!("Search for {target}"));

    for index in 0..state.len() {
        state.mark(index, Mark::Compare).at_line(1);
        recorder.record(
            &state,
            format!("Compare {} with {target}", state.values[index]),
        );
        if state.values[index] == target {
            state.mark(index, Mark::Found);
            recorder.record(&state, format!("Found {target} at position {index}"));
            return recorder.finish();
        }
        state.mark(index, Mark::Discarded);
    }

    state.at_line(2);
    recorder.record(&state, format!("{target} is not in the array"));
    recorder.finish()
}

/// Expects `values` sorted ascending.
pub fn binary_search(values: &[i64], target: i64) -> Vec<Frame<ArraySnapshot>> {
    let mut state = ArraySnapshot::new(values.to_vec());
    let mut recorder = FrameRecorder::new();
    let (mut lo, mut hi) = (0, state.len());
    state.at_line(0);
    recorder.record(&state, format!("Search for {target} in 0..{hi}"));

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        state.mark(mid, Mark::Compare).at_line(2);
        recorder.record(
            &state,
            format!("Middle of {lo}..{hi} is {} at position {mid}", state.values[mid]),
        );

        let probe = state.values[mid];
        if probe == target {
            state.mark(mid, Mark::Found).at_line(3);
            recorder.record(&state, format!("Found {target} at position {mid}"));
            return recorder.finish();
        }
        let discarded = if probe < target {
            state.at_line(4);
            let discarded = lo..mid + 1;
            lo = mid + 1;
            discarded
        } else {
            state.at_line(5);
            let discarded = mid..hi;
            hi = mid;
            discarded
        };
        for index in discarded {
            state.mark(index, Mark::Discarded);
        }
        let side = if probe < target { "right" } else { "left" };
        recorder.record(
            &state,
            format!("{probe} is not {target}; keep the {side} half {lo}..{hi}"),
        );
    }

    state.at_line(6);
    recorder.record(&state, format!("{target} is not in the array"));
    recorder.finish()
}
