//! Pager controls and when they are offered

use std::fmt;

/// A pager control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    First,
    Previous,
    Next,
    Last,
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Control::First => "first page",
            Control::Previous => "previous page",
            Control::Next => "next page",
            Control::Last => "last page",
        };
        f.write_str(name)
    }
}

/// Target page of each control, `None` when the control is not offered
///
/// First and previous need `current >= 2`; next and last need
/// `current < total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordances {
    pub first: Option<u32>,
    pub previous: Option<u32>,
    pub next: Option<u32>,
    pub last: Option<u32>,
}

impl Affordances {
    pub fn for_page(current: u32, total: u32) -> Self {
        let has_previous = current >= 2;
        let has_next = current < total;
        Self {
            first: has_previous.then_some(1),
            previous: has_previous.then(|| current - 1),
            next: has_next.then(|| current + 1),
            last: has_next.then_some(total),
        }
    }

    pub fn target(&self, control: Control) -> Option<u32> {
        match control {
            Control::First => self.first,
            Control::Previous => self.previous,
            Control::Next => self.next,
            Control::Last => self.last,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page() {
        let a = Affordances::for_page(1, 5);
        assert!(!a.has_previous());
        assert_eq!(a.first, None);
        assert_eq!(a.next, Some(2));
        assert_eq!(a.last, Some(5));
    }

    #[test]
    fn test_last_page() {
        let a = Affordances::for_page(5, 5);
        assert!(!a.has_next());
        assert_eq!(a.last, None);
        assert_eq!(a.previous, Some(4));
        assert_eq!(a.first, Some(1));
    }

    #[test]
    fn test_single_page_offers_nothing() {
        let a = Affordances::for_page(1, 1);
        for control in [Control::First, Control::Previous, Control::Next, Control::Last] {
            assert_eq!(a.target(control), None);
        }
    }

    #[test]
    fn test_middle_page() {
        let a = Affordances::for_page(3, 5);
        assert_eq!(
            a,
            Affordances {
                first: Some(1),
                previous: Some(2),
                next: Some(4),
                last: Some(5),
            }
        );
    }
}
