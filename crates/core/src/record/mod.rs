use crate::Frame;

/// Append-only builder used by algorithm runners to capture frames.
///
/// [`FrameRecorder::record`] clones the working state, so later mutation of
/// the runner's data cannot reach frames that were already captured.
#[derive(Debug, Clone)]
pub struct FrameRecorder<T> {
    frames: Vec<Frame<T>>,
}

impl<T: Clone> FrameRecorder<T> {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn record(&mut self, snapshot: &T, description: impl Into<String>) {
        self.frames.push(Frame::new(snapshot.clone(), description));
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn finish(self) -> Vec<Frame<T>> {
        self.frames
    }
}

impl<T: Clone> Default for FrameRecorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_frames_are_point_in_time_copies() {
        let mut working = vec![3, 1, 2];
        let mut recorder = FrameRecorder::new();

        recorder.record(&working, "initial");
        working.swap(0, 1);
        recorder.record(&working, "swapped");
        working.clear();

        let frames = recorder.finish();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].snapshot, vec![3, 1, 2]);
        assert_eq!(frames[1].snapshot, vec![1, 3, 2]);
        assert_eq!(frames[1].description, "swapped");
    }
}
