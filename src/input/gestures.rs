//! Gesture identifiers and swipe direction classification.

use serde::{Deserialize, Serialize};

use super::geometry::{Point, EPSILON};

/// Gesture identifiers reported to the gesture listener.
///
/// Numeric codes match the accessibility framework's gesture ids. Only the
/// one-finger subset is produced by the recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum GestureType {
    Invalid = 0x0000,
    SwipeUp = 0x0001,
    SwipeDown = 0x0002,
    SwipeLeft = 0x0003,
    SwipeRight = 0x0004,
    SwipeLeftThenRight = 0x0005,
    SwipeRightThenLeft = 0x0006,
    SwipeUpThenDown = 0x0007,
    SwipeDownThenUp = 0x0008,
    SwipeLeftThenUp = 0x0009,
    SwipeLeftThenDown = 0x000A,
    SwipeRightThenUp = 0x000B,
    SwipeRightThenDown = 0x000C,
    SwipeUpThenLeft = 0x000D,
    SwipeUpThenRight = 0x000E,
    SwipeDownThenLeft = 0x000F,
    SwipeDownThenRight = 0x0010,
    Tap = 0x0011,
    DoubleTap = 0x0012,
    DoubleTapHold = 0x0013,
    Drag = 0x0014,
    SwipeSlowly = 0x0015,
    TripleTap = 0x0016,
    Scale = 0x0017,
    Scroll = 0x0018,
    TwoFingerSingleTap = 0x0019,
    TwoFingerDoubleTap = 0x001A,
    TwoFingerDoubleTapAndHold = 0x001B,
    TwoFingerTripleTap = 0x001C,
    TwoFingerTripleTapAndHold = 0x001D,
    ThreeFingerSingleTap = 0x001E,
    ThreeFingerDoubleTap = 0x001F,
    ThreeFingerDoubleTapAndHold = 0x0020,
    ThreeFingerTripleTap = 0x0021,
    ThreeFingerTripleTapAndHold = 0x0022,
    FourFingerSingleTap = 0x0023,
    FourFingerDoubleTap = 0x0024,
    FourFingerDoubleTapAndHold = 0x0025,
    FourFingerTripleTap = 0x0026,
    FourFingerTripleTapAndHold = 0x0027,
    ThreeFingerSwipeUp = 0x0028,
    ThreeFingerSwipeDown = 0x0029,
    ThreeFingerSwipeLeft = 0x002A,
    ThreeFingerSwipeRight = 0x002B,
    FourFingerSwipeUp = 0x002C,
    FourFingerSwipeDown = 0x002D,
    FourFingerSwipeLeft = 0x002E,
    FourFingerSwipeRight = 0x002F,
}

/// Every identifier, in code order.
const ALL_GESTURES: [GestureType; 48] = [
    GestureType::Invalid,
    GestureType::SwipeUp,
    GestureType::SwipeDown,
    GestureType::SwipeLeft,
    GestureType::SwipeRight,
    GestureType::SwipeLeftThenRight,
    GestureType::SwipeRightThenLeft,
    GestureType::SwipeUpThenDown,
    GestureType::SwipeDownThenUp,
    GestureType::SwipeLeftThenUp,
    GestureType::SwipeLeftThenDown,
    GestureType::SwipeRightThenUp,
    GestureType::SwipeRightThenDown,
    GestureType::SwipeUpThenLeft,
    GestureType::SwipeUpThenRight,
    GestureType::SwipeDownThenLeft,
    GestureType::SwipeDownThenRight,
    GestureType::Tap,
    GestureType::DoubleTap,
    GestureType::DoubleTapHold,
    GestureType::Drag,
    GestureType::SwipeSlowly,
    GestureType::TripleTap,
    GestureType::Scale,
    GestureType::Scroll,
    GestureType::TwoFingerSingleTap,
    GestureType::TwoFingerDoubleTap,
    GestureType::TwoFingerDoubleTapAndHold,
    GestureType::TwoFingerTripleTap,
    GestureType::TwoFingerTripleTapAndHold,
    GestureType::ThreeFingerSingleTap,
    GestureType::ThreeFingerDoubleTap,
    GestureType::ThreeFingerDoubleTapAndHold,
    GestureType::ThreeFingerTripleTap,
    GestureType::ThreeFingerTripleTapAndHold,
    GestureType::FourFingerSingleTap,
    GestureType::FourFingerDoubleTap,
    GestureType::FourFingerDoubleTapAndHold,
    GestureType::FourFingerTripleTap,
    GestureType::FourFingerTripleTapAndHold,
    GestureType::ThreeFingerSwipeUp,
    GestureType::ThreeFingerSwipeDown,
    GestureType::ThreeFingerSwipeLeft,
    GestureType::ThreeFingerSwipeRight,
    GestureType::FourFingerSwipeUp,
    GestureType::FourFingerSwipeDown,
    GestureType::FourFingerSwipeLeft,
    GestureType::FourFingerSwipeRight,
];

impl GestureType {
    /// Numeric gesture id.
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Look up an identifier by its numeric id.
    pub fn from_code(code: u32) -> Option<Self> {
        ALL_GESTURES.get(code as usize).copied()
    }

    /// Whether this is a one- or two-segment swipe.
    pub fn is_swipe(self) -> bool {
        (GestureType::SwipeUp.code()..=GestureType::SwipeDownThenRight.code()).contains(&self.code())
    }

    /// Single swipe for a compass direction.
    pub fn swipe(direction: SwipeDirection) -> Self {
        match direction {
            SwipeDirection::Up => GestureType::SwipeUp,
            SwipeDirection::Down => GestureType::SwipeDown,
            SwipeDirection::Left => GestureType::SwipeLeft,
            SwipeDirection::Right => GestureType::SwipeRight,
        }
    }

    /// Two-segment swipe. Repeating a direction collapses into the single swipe.
    pub fn compound_swipe(first: SwipeDirection, second: SwipeDirection) -> Self {
        DIRECTION_TO_GESTURE[first.index()][second.index()]
    }
}

impl std::fmt::Display for GestureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Direction of a swipe segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Rows: first segment, columns: second segment; both in `SwipeDirection::index` order.
const DIRECTION_TO_GESTURE: [[GestureType; 4]; 4] = [
    [
        GestureType::SwipeUp,
        GestureType::SwipeUpThenDown,
        GestureType::SwipeUpThenLeft,
        GestureType::SwipeUpThenRight,
    ],
    [
        GestureType::SwipeDownThenUp,
        GestureType::SwipeDown,
        GestureType::SwipeDownThenLeft,
        GestureType::SwipeDownThenRight,
    ],
    [
        GestureType::SwipeLeftThenUp,
        GestureType::SwipeLeftThenDown,
        GestureType::SwipeLeft,
        GestureType::SwipeLeftThenRight,
    ],
    [
        GestureType::SwipeRightThenUp,
        GestureType::SwipeRightThenDown,
        GestureType::SwipeRightThenLeft,
        GestureType::SwipeRight,
    ],
];

impl SwipeDirection {
    fn index(self) -> usize {
        match self {
            SwipeDirection::Up => 0,
            SwipeDirection::Down => 1,
            SwipeDirection::Left => 2,
            SwipeDirection::Right => 3,
        }
    }

    /// Direction of the segment from `from` to `to`.
    ///
    /// The dominant axis wins; an exact tie between axes is classified as horizontal.
    /// Screen Y grows downwards, so a negative Y offset is `Up`.
    pub fn between(from: Point, to: Point) -> Self {
        let offset = to - from;

        if offset.x.abs() >= offset.y.abs() {
            if offset.x > EPSILON {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            }
        } else if offset.y < EPSILON {
            SwipeDirection::Up
        } else {
            SwipeDirection::Down
        }
    }
}

impl std::fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwipeDirection::Up => write!(f, "Up"),
            SwipeDirection::Down => write!(f, "Down"),
            SwipeDirection::Left => write!(f, "Left"),
            SwipeDirection::Right => write!(f, "Right"),
        }
    }
}
