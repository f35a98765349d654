//! Integer rectangles in playfield pixels.
//!
//! The y axis grows downward, as on screen.

/// The fixed-size area everything moves in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Playfield {
    pub width: i32,
    pub height: i32,
}

impl Default for Playfield {
    fn default() -> Self {
        Playfield {
            width: 1100,
            height: 650,
        }
    }
}

/// Axis-aligned rectangle: top-left corner plus size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Rect {
            left,
            top,
            width,
            height,
        }
    }

    /// A `width` × `height` rectangle whose centre is `center`.
    pub fn centered(center: (i32, i32), width: i32, height: i32) -> Self {
        let mut rect = Rect::new(0, 0, width, height);
        rect.set_center(center);
        rect
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub fn center(&self) -> (i32, i32) {
        (self.left + self.width / 2, self.top + self.height / 2)
    }

    pub fn set_center(&mut self, (cx, cy): (i32, i32)) {
        self.left = cx - self.width / 2;
        self.top = cy - self.height / 2;
    }

    /// Move in place.
    pub fn translate(&mut self, (dx, dy): (i32, i32)) {
        self.left += dx;
        self.top += dy;
    }

    /// Copy moved by `(dx, dy)`.
    pub fn translated(&self, delta: (i32, i32)) -> Rect {
        let mut moved = *self;
        moved.translate(delta);
        moved
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        intersects(self, other)
    }
}

// ── Bounds checker ────────────────────────────────────────────────────────────

/// Returns `(horizontal, vertical)`: whether `rect` lies inside the
/// playfield along each axis. Touching an edge still counts as inside.
pub fn check_bound(rect: &Rect, field: Playfield) -> (bool, bool) {
    let horizontal = rect.left >= 0 && rect.right() <= field.width;
    let vertical = rect.top >= 0 && rect.bottom() <= field.height;
    (horizontal, vertical)
}

pub fn fully_inside(rect: &Rect, field: Playfield) -> bool {
    check_bound(rect, field) == (true, true)
}

// ── Collision detector ────────────────────────────────────────────────────────

/// Strict AABB overlap. Rectangles that only share an edge do not collide,
/// and neither does a rectangle with no area.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    if a.width <= 0 || a.height <= 0 || b.width <= 0 || b.height <= 0 {
        return false;
    }
    a.left < b.right() && b.left < a.right() && a.top < b.bottom() && b.top < a.bottom()
}
