//! Linear data structures: fill with every input value, then drain.
//!
//! Removed values accumulate in the snapshot's output row so the removal
//! order (LIFO or FIFO) stays visible.

use crate::snapshot::{ArraySnapshot, Mark};
use crate::{Frame, FrameRecorder};

pub const STACK: &[&str] = &[
    "push(x): place x on top",
    "peek(): read the top",
    "pop(): remove the top",
    "stack is empty",
];

pub const QUEUE: &[&str] = &[
    "enqueue(x): append x at the rear",
    "front(): read the front",
    "dequeue(): remove the front",
    "queue is empty",
];

pub fn stack(values: &[i64]) -> Vec<Frame<ArraySnapshot>> {
    let mut state = ArraySnapshot::default();
    let mut recorder = FrameRecorder::new();
    recorder.record(&state, "Empty stack");

    for value in values {
        state.clear_marks();
        state.push(*value, Mark::Active);
        state.at_line(0);
        recorder.record(&state, format!("Push {value}"));
    }

    while let Some(top) = state.values.last().copied() {
        let top_index = state.len() - 1;
        state.clear_marks();
        state.mark(top_index, Mark::Compare).at_line(1);
        recorder.record(&state, format!("Top is {top}"));

        state.pop();
        state.output.push(top);
        state.at_line(2);
        recorder.record(&state, format!("Pop {top}"));
    }

    state.at_line(3);
    recorder.record(&state, "Stack is empty");
    recorder.finish()
}

pub fn queue(values: &[i64]) -> Vec<Frame<ArraySnapshot>> {
    let mut state = ArraySnapshot::default();
    let mut recorder = FrameRecorder::new();
    recorder.record(&state, "Empty queue");

    for value in values {
        state.clear_marks();
        state.push(*value, Mark::Active);
        state.at_line(0);
        recorder.record(&state, format!("Enqueue {value}"));
    }

    while let Some(front) = state.values.first().copied() {
        state.clear_marks();
        state.mark(0, Mark::Compare).at_line(1);
        recorder.record(&state, format!("Front is {front}"));

        state.remove_front();
        state.output.push(front);
        state.at_line(2);
        recorder.record(&state, format!("Dequeue {front}"));
    }

    state.at_line(3);
    recorder.record(&state, "Queue is empty");
    recorder.finish()
}
