use derive_new::new;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Same,
    Added,
    Removed,
}

/// A classified span of text on one side of a row.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Segment {
    pub text: String,
    pub kind: SegmentKind,
}

impl Segment {
    pub fn same(text: impl Into<String>) -> Self {
        Segment::new(text.into(), SegmentKind::Same)
    }

    pub fn added(text: impl Into<String>) -> Self {
        Segment::new(text.into(), SegmentKind::Added)
    }

    pub fn removed(text: impl Into<String>) -> Self {
        Segment::new(text.into(), SegmentKind::Removed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeftKind {
    Same,
    Removed,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RightKind {
    Same,
    Added,
    Empty,
}

/// One line position of the side-by-side view.
///
/// A side carries a line number exactly when its kind is not `Empty`, and at
/// least one side is always occupied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedRow {
    pub left_number: Option<usize>,
    pub right_number: Option<usize>,
    pub left_segments: Vec<Segment>,
    pub right_segments: Vec<Segment>,
    pub left_kind: LeftKind,
    pub right_kind: RightKind,
}

impl AlignedRow {
    pub fn same(left_number: usize, right_number: usize, line: &str) -> Self {
        AlignedRow {
            left_number: Some(left_number),
            right_number: Some(right_number),
            left_segments: vec![Segment::same(line)],
            right_segments: vec![Segment::same(line)],
            left_kind: LeftKind::Same,
            right_kind: RightKind::Same,
        }
    }

    pub fn removed_only(left_number: usize, line: &str) -> Self {
        AlignedRow {
            left_number: Some(left_number),
            right_number: None,
            left_segments: vec![Segment::removed(line)],
            right_segments: Vec::new(),
            left_kind: LeftKind::Removed,
            right_kind: RightKind::Empty,
        }
    }

    pub fn added_only(right_number: usize, line: &str) -> Self {
        AlignedRow {
            left_number: None,
            right_number: Some(right_number),
            left_segments: Vec::new(),
            right_segments: vec![Segment::added(line)],
            left_kind: LeftKind::Empty,
            right_kind: RightKind::Added,
        }
    }

    pub fn modified(
        left_number: usize,
        right_number: usize,
        left_segments: Vec<Segment>,
        right_segments: Vec<Segment>,
    ) -> Self {
        AlignedRow {
            left_number: Some(left_number),
            right_number: Some(right_number),
            left_segments,
            right_segments,
            left_kind: LeftKind::Removed,
            right_kind: RightKind::Added,
        }
    }

    pub fn left_text(&self) -> String {
        self.left_segments.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn right_text(&self) -> String {
        self.right_segments.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn is_change(&self) -> bool {
        self.left_kind != LeftKind::Same || self.right_kind != RightKind::Same
    }
}
