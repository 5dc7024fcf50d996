//! Sorting runners. Each records one frame per comparison and per write.

use crate::snapshot::{ArraySnapshot, Mark};
use crate::{Frame, FrameRecorder};

pub const BUBBLE_SORT: &[&str] = &[
    "for i in 0..n-1",
    "  for j in 0..n-1-i",
    "    if a[j] > a[j+1]",
    "      swap a[j], a[j+1]",
    "  a[n-1-i] is in place",
    "done",
];

pub const SELECTION_SORT: &[&str] = &[
    "for i in 0..n-1",
    "  min = i",
    "  for j in i+1..n",
    "    if a[j] < a[min]: min = j",
    "  swap a[i], a[min]",
    "done",
];

pub const INSERTION_SORT: &[&str] = &[
    "for i in 1..n",
    "  key = a[i]",
    "  j = i",
    "  while j > 0 and a[j-1] > key",
    "    shift a[j-1] right; j -= 1",
    "  a[j] = key",
    "done",
];

pub const MERGE_SORT: &[&str] = &[
    "merge_sort(lo, hi):",
    "  if hi - lo <= 1: return",
    "  mid = (lo + hi) / 2",
    "  merge_sort(lo, mid); merge_sort(mid, hi)",
    "  compare heads of both halves",
    "  write the smaller head to a[k]",
    "done",
];

pub const QUICK_SORT: &[&str] = &[
    "quick_sort(lo, hi):",
    "  if hi - lo <= 1: return",
    "  pivot = a[hi-1]; i = lo",
    "  for j in lo..hi-1",
    "    if a[j] < pivot: swap a[i], a[j]; i += 1",
    "  swap a[i], a[hi-1]",
    "  quick_sort(lo, i); quick_sort(i+1, hi)",
    "done",
];

type Recorder = FrameRecorder<ArraySnapshot>;

pub fn bubble_sort(values: &[i64]) -> Vec<Frame<ArraySnapshot>> {
    let mut state = ArraySnapshot::new(values.to_vec());
    let mut recorder = Recorder::new();
    recorder.record(&state, "Initial array");

    let n = state.len();
    for i in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - 1 - i {
            state.clear_transient();
            state.mark(j, Mark::Compare).mark(j + 1, Mark::Compare).at_line(2);
            recorder.record(
                &state,
                format!("Compare {} and {}", state.values[j], state.values[j + 1]),
            );
            if state.values[j] > state.values[j + 1] {
                state.swap(j, j + 1);
                state.mark(j, Mark::Swap).mark(j + 1, Mark::Swap).at_line(3);
                recorder.record(
                    &state,
                    format!("Swap {} and {}", state.values[j + 1], state.values[j]),
                );
                swapped = true;
            }
        }
        let settled = n - 1 - i;
        state.clear_transient();
        state.mark(settled, Mark::Sorted).at_line(4);
        recorder.record(
            &state,
            format!("{} is in its final position", state.values[settled]),
        );
        if !swapped {
            break;
        }
    }

    finish_sorted(&mut state, &mut recorder, BUBBLE_SORT.len() - 1);
    recorder.finish()
}

pub fn selection_sort(values: &[i64]) -> Vec<Frame<ArraySnapshot>> {
    let mut state = ArraySnapshot::new(values.to_vec());
    let mut recorder = Recorder::new();
    recorder.record(&state, "Initial array");

    let n = state.len();
    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        state.clear_transient();
        state.mark(i, Mark::Active).at_line(1);
        recorder.record(&state, format!("Assume {} is the minimum", state.values[i]));

        for j in i + 1..n {
            state.clear_transient();
            state.mark(min, Mark::Active).mark(j, Mark::Compare).at_line(3);
            recorder.record(
                &state,
                format!(
                    "Compare {} with current minimum {}",
                    state.values[j], state.values[min]
                ),
            );
            if state.values[j] < state.values[min] {
                min = j;
                state.clear_transient();
                state.mark(min, Mark::Active).at_line(3);
                recorder.record(&state, format!("New minimum {}", state.values[min]));
            }
        }

        state.clear_transient();
        if min != i {
            state.swap(i, min);
            state.mark(i, Mark::Swap).mark(min, Mark::Swap).at_line(4);
            recorder.record(
                &state,
                format!("Swap {} into position {}", state.values[i], i),
            );
            state.clear_transient();
        }
        state.mark(i, Mark::Sorted).at_line(4);
        recorder.record(
            &state,
            format!("{} is in its final position", state.values[i]),
        );
    }

    finish_sorted(&mut state, &mut recorder, SELECTION_SORT.len() - 1);
    recorder.finish()
}

pub fn insertion_sort(values: &[i64]) -> Vec<Frame<ArraySnapshot>> {
    let mut state = ArraySnapshot::new(values.to_vec());
    let mut recorder = Recorder::new();
    recorder.record(&state, "Initial array");

    for i in 1..state.len() {
        state.clear_marks();
        state.mark(i, Mark::Active).at_line(1);
        recorder.record(&state, format!("Insert {}", state.values[i]));

        let mut j = i;
        while j > 0 {
            state.clear_marks();
            state.mark(j, Mark::Active).mark(j - 1, Mark::Compare).at_line(3);
            recorder.record(
                &state,
                format!("Compare {} with {}", state.values[j], state.values[j - 1]),
            );
            if state.values[j - 1] <= state.values[j] {
                break;
            }
            state.swap(j - 1, j);
            state.clear_marks();
            state.mark(j - 1, Mark::Active).mark(j, Mark::Swap).at_line(4);
            recorder.record(&state, format!("Shift {} right", state.values[j]));
            j -= 1;
        }

        state.clear_marks();
        state.mark(j, Mark::Found).at_line(5);
        recorder.record(
            &state,
            format!("Place {} at position {}", state.values[j], j),
        );
    }

    finish_sorted(&mut state, &mut recorder, INSERTION_SORT.len() - 1);
    recorder.finish()
}

pub fn merge_sort(values: &[i64]) -> Vec<Frame<ArraySnapshot>> {
    let mut state = ArraySnapshot::new(values.to_vec());
    let mut recorder = Recorder::new();
    recorder.record(&state, "Initial array");

    let n = state.len();
    merge_range(&mut state, &mut recorder, 0, n);

    finish_sorted(&mut state, &mut recorder, MERGE_SORT.len() - 1);
    recorder.finish()
}

fn merge_range(state: &mut ArraySnapshot, recorder: &mut Recorder, lo: usize, hi: usize) {
    if hi - lo <= 1 {
        return;
    }
    let mid = lo + (hi - lo) / 2;
    state.clear_marks();
    for index in lo..hi {
        state.mark(index, Mark::Active);
    }
    state.at_line(2);
    recorder.record(state, format!("Split positions {lo}..{hi} at {mid}"));

    merge_range(state, recorder, lo, mid);
    merge_range(state, recorder, mid, hi);

    let left = state.values[lo..mid].to_vec();
    let right = state.values[mid..hi].to_vec();
    let (mut i, mut j) = (0, 0);
    for k in lo..hi {
        let take_left = match (left.get(i), right.get(j)) {
            (Some(a), Some(b)) => {
                state.clear_marks();
                state.at_line(4);
                recorder.record(state, format!("Compare {a} and {b}"));
                a <= b
            }
            (Some(_), None) => true,
            _ => false,
        };
        let value = if take_left {
            i += 1;
            left[i - 1]
        } else {
            j += 1;
            right[j - 1]
        };
        state.values[k] = value;
        state.clear_marks();
        state.mark(k, Mark::Swap).at_line(5);
        recorder.record(state, format!("Write {value} to position {k}"));
    }

    state.clear_marks();
    for index in lo..hi {
        state.mark(index, Mark::Found);
    }
    state.at_line(3);
    recorder.record(state, format!("Positions {lo}..{hi} merged"));
}

pub fn quick_sort(values: &[i64]) -> Vec<Frame<ArraySnapshot>> {
    let mut state = ArraySnapshot::new(values.to_vec());
    let mut recorder = Recorder::new();
    recorder.record(&state, "Initial array");

    let n = state.len();
    quick_range(&mut state, &mut recorder, 0, n);

    finish_sorted(&mut state, &mut recorder, QUICK_SORT.len() - 1);
    recorder.finish()
}

fn quick_range(state: &mut ArraySnapshot, recorder: &mut Recorder, lo: usize, hi: usize) {
    if hi - lo <= 1 {
        if hi > lo {
            state.clear_transient();
            state.mark(lo, Mark::Sorted).at_line(1);
            recorder.record(state, format!("{} is in its final position", state.values[lo]));
        }
        return;
    }

    let pivot_index = hi - 1;
    let pivot = state.values[pivot_index];
    state.clear_transient();
    state.mark(pivot_index, Mark::Pivot).at_line(2);
    recorder.record(state, format!("Choose pivot {pivot}"));

    let mut i = lo;
    for j in lo..pivot_index {
        state.clear_transient();
        state
            .mark(pivot_index, Mark::Pivot)
            .mark(j, Mark::Compare)
            .at_line(4);
        recorder.record(
            state,
            format!("Compare {} with pivot {pivot}", state.values[j]),
        );
        if state.values[j] < pivot {
            if i != j {
                state.swap(i, j);
                state.mark(i, Mark::Swap).mark(j, Mark::Swap);
                recorder.record(
                    state,
                    format!("Move {} before the pivot boundary", state.values[i]),
                );
            }
            i += 1;
        }
    }

    state.clear_transient();
    state.swap(i, pivot_index);
    state.mark(i, Mark::Sorted).at_line(5);
    recorder.record(state, format!("Pivot {pivot} settles at position {i}"));

    state.at_line(6);
    quick_range(state, recorder, lo, i);
    quick_range(state, recorder, i + 1, hi);
}

fn finish_sorted(state: &mut ArraySnapshot, recorder: &mut Recorder, done_line: usize) {
    for index in 0..state.len() {
        state.mark(index, Mark::Sorted);
    }
    state.at_line(done_line);
    recorder.record(state, "Array is sorted");
}
