// Render plan types: what to display at each format position.

/// What the host paints for one format token.
///
/// Literal text borrows from the [`Format`](crate::format::Format) the plan
/// was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment<'a> {
    /// Static mask text.
    Literal(&'a str),

    /// A digit slot: the entered digit, or `None` for an empty placeholder.
    Digit(Option<char>),
}

impl Segment<'_> {
    /// Whether this is a digit slot holding a digit.
    #[inline]
    pub fn is_filled(&self) -> bool {
        matches!(self, Self::Digit(Some(_)))
    }

    #[inline]
    pub fn is_digit(&self) -> bool {
        matches!(self, Self::Digit(_))
    }
}

/// Segments for one paint, plus the slot where the next digit lands.
///
/// Holds no state of its own: it is recomputed for every (format, value)
/// pair and dropped after the paint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan<'a> {
    segments: Vec<Segment<'a>>,
    cursor_slot: Option<usize>,
}

impl<'a> RenderPlan<'a> {
    pub fn new(segments: Vec<Segment<'a>>, cursor_slot: Option<usize>) -> Self {
        Self {
            segments,
            cursor_slot,
        }
    }

    /// One segment per format token, in format order.
    #[inline]
    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    /// Format index of the next slot to fill, or `None` when the value is full.
    #[inline]
    pub fn cursor_slot(&self) -> Option<usize> {
        self.cursor_slot
    }

    /// Whether every digit slot is filled.
    pub fn is_full(&self) -> bool {
        self.cursor_slot.is_none()
    }

    /// Number of digit segments holding a digit.
    pub fn filled_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_filled()).count()
    }

    /// Flatten the plan into display text, drawing empty slots as `placeholder`.
    pub fn to_text(&self, placeholder: char) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Digit(Some(d)) => out.push(*d),
                Segment::Digit(None) => out.push(placeholder),
            }
        }
        out
    }

    pub fn into_segments(self) -> Vec<Segment<'a>> {
        self.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RenderPlan<'static> {
        RenderPlan::new(
            vec![
                Segment::Literal("("),
                Segment::Digit(Some('1')),
                Segment::Digit(None),
                Segment::Literal(")"),
            ],
            Some(2),
        )
    }

    #[test]
    fn to_text_uses_placeholder() {
        assert_eq!(sample().to_text('_'), "(1_)");
        assert_eq!(sample().to_text(' '), "(1 )");
    }

    #[test]
    fn filled_count_ignores_literals() {
        assert_eq!(sample().filled_count(), 1);
    }

    #[test]
    fn cursor_accessors() {
        let plan = sample();
        assert_eq!(plan.cursor_slot(), Some(2));
        assert!(!plan.is_full());
        let full = RenderPlan::new(vec![Segment::Digit(Some('9'))], None);
        assert!(full.is_full());
    }

    #[test]
    fn segment_predicates() {
        assert!(Segment::Digit(None).is_digit());
        assert!(!Segment::Digit(None).is_filled());
        assert!(!Segment::Literal("-").is_digit());
    }
}
