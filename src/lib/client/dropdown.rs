//! Open/closed state of the dropdown that hosts the contact form

/// A pointer position in page coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// Horizontal offset
    pub x: f64,

    /// Vertical offset
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned area on the page
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub origin: Point,

    /// Horizontal extent
    pub width: f64,

    /// Vertical extent
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle from its top-left corner and size
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            width,
            height,
        }
    }

    /// Whether `point` lies inside, edges included
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x <= self.origin.x + self.width
            && point.y >= self.origin.y
            && point.y <= self.origin.y + self.height
    }
}

/// Dropdown panel. Starts closed; a pointer press outside its bounds closes it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dropdown {
    open: bool,
    bounds: Rect,
}

impl Dropdown {
    /// A closed dropdown occupying `bounds`
    pub fn new(bounds: Rect) -> Self {
        Self {
            open: false,
            bounds,
        }
    }

    /// Whether the panel is showing
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show the panel
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hide the panel
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Flip between open and closed
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Update the panel's area after layout changes
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Handle a pointer press anywhere on the page.
    ///
    /// Returns `true` when the press closed the dropdown.
    pub fn pointer_down(&mut self, point: Point) -> bool {
        if self.open && !self.bounds.contains(point) {
            self.open = false;
            return true;
        }

        false
    }
}
