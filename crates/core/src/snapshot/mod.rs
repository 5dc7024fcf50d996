use serde::{Deserialize, Serialize};

/// Per-element highlight attached to an [`ArraySnapshot`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    #[default]
    Idle,
    Compare,
    Swap,
    Pivot,
    Sorted,
    Found,
    Discarded,
    Active,
}

impl Mark {
    /// Single character used by the text renderer.
    pub fn glyph(self) -> char {
        match self {
            Mark::Idle => ' ',
            Mark::Compare => '?',
            Mark::Swap => '~',
            Mark::Pivot => 'P',
            Mark::Sorted => '=',
            Mark::Found => '*',
            Mark::Discarded => '.',
            Mark::Active => '^',
        }
    }
}

/// Renderable state of a linear structure at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArraySnapshot {
    pub values: Vec<i64>,
    pub marks: Vec<Mark>,
    /// Highlighted pseudocode line, if any.
    pub line: Option<usize>,
    /// Secondary row, e.g. coins picked so far or popped values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output: Vec<i64>,
}

impl ArraySnapshot {
    pub fn new(values: Vec<i64>) -> Self {
        let marks = vec![Mark::Idle; values.len()];
        Self {
            values,
            marks,
            line: None,
            output: Vec::new(),
        }
    }

    pub fn at_line(&mut self, line: usize) -> &mut Self {
        self.line = Some(line);
        self
    }

    /// Marks `index`, ignoring indices outside the values.
    pub fn mark(&mut self, index: usize, mark: Mark) -> &mut Self {
        if let Some(slot) = self.marks.get_mut(index) {
            *slot = mark;
        }
        self
    }

    /// Resets every mark that is not [`Mark::Sorted`] back to idle.
    pub fn clear_transient(&mut self) -> &mut Self {
        for mark in &mut self.marks {
            if *mark != Mark::Sorted {
                *mark = Mark::Idle;
            }
        }
        self
    }

    pub fn clear_marks(&mut self) -> &mut Self {
        self.marks.iter_mut().for_each(|mark| *mark = Mark::Idle);
        self
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.values.swap(a, b);
        self.marks.swap(a, b);
    }

    pub fn push(&mut self, value: i64, mark: Mark) {
        self.values.push(value);
        self.marks.push(mark);
    }

    pub fn pop(&mut self) -> Option<i64> {
        self.marks.pop();
        self.values.pop()
    }

    pub fn remove_front(&mut self) -> Option<i64> {
        if self.values.is_empty() {
            return None;
        }
        self.marks.remove(0);
        Some(self.values.remove(0))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
