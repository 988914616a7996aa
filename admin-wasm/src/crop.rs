//! Square crop geometry for the avatar editor.
//!
//! At zoom 1 the crop square spans the image's short side; zooming in
//! shrinks it around its centre. Pan is kept so the square never leaves
//! the image.

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 3.0;
pub const ZOOM_STEP: f64 = 0.05;
pub const INITIAL_ZOOM: f64 = 1.2;

/// Largest edge of the uploaded JPEG, in pixels.
pub const MAX_OUTPUT_SIZE: u32 = 512;
pub const JPEG_QUALITY: f64 = 0.9;

/// Crop square in source image pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropState {
    image_width: f64,
    image_height: f64,
    zoom: f64,
    /// Offset of the crop centre from the image centre.
    pan_x: f64,
    pan_y: f64,
}

/// Snaps to the slider step and clamps into `MIN_ZOOM..=MAX_ZOOM`.
pub fn clamp_zoom(zoom: f64) -> f64 {
    if !zoom.is_finite() {
        return MIN_ZOOM;
    }
    let snapped = (zoom / ZOOM_STEP).round() * ZOOM_STEP;
    snapped.clamp(MIN_ZOOM, MAX_ZOOM)
}

impl CropState {
    /// `None` until the image reports real dimensions.
    pub fn new(image_width: f64, image_height: f64) -> Option<Self> {
        if !(image_width > 0.0 && image_height > 0.0) {
            return None;
        }
        Some(Self {
            image_width,
            image_height,
            zoom: INITIAL_ZOOM,
            pan_x: 0.0,
            pan_y: 0.0,
        })
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn side(&self) -> f64 {
        self.image_width.min(self.image_height) / self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = clamp_zoom(zoom);
        self.clamp_pan();
    }

    /// Applies a pointer drag of `(dx, dy)` viewport pixels on a preview
    /// `view_size` pixels wide. Dragging right reveals more of the left side.
    pub fn drag(&mut self, dx: f64, dy: f64, view_size: f64) {
        if view_size <= 0.0 {
            return;
        }
        let scale = self.side() / view_size;
        self.pan_x -= dx * scale;
        self.pan_y -= dy * scale;
        self.clamp_pan();
    }

    pub fn rect(&self) -> CropRect {
        let size = self.side();
        CropRect {
            x: self.image_width / 2.0 + self.pan_x - size / 2.0,
            y: self.image_height / 2.0 + self.pan_y - size / 2.0,
            size,
        }
    }

    /// Edge of the rasterized output: the crop's own size, capped.
    pub fn output_size(&self) -> u32 {
        (self.side().round() as u32).clamp(1, MAX_OUTPUT_SIZE)
    }

    fn clamp_pan(&mut self) {
        let side = self.side();
        let max_x = (self.image_width - side).max(0.0) / 2.0;
        let max_y = (self.image_height - side).max(0.0) / 2.0;
        self.pan_x = self.pan_x.clamp(-max_x, max_x);
        self.pan_y = self.pan_y.clamp(-max_y, max_y);
    }
}

#[cfg(test)]
mod tests {
    use super::{CropState, INITIAL_ZOOM, MAX_OUTPUT_SIZE, MAX_ZOOM, MIN_ZOOM, clamp_zoom};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn zero_sized_images_have_no_crop() {
        assert!(CropState::new(0.0, 100.0).is_none());
        assert!(CropState::new(100.0, f64::NAN).is_none());
    }

    #[test]
    fn starts_centred_at_initial_zoom() {
        let state = CropState::new(1200.0, 600.0).unwrap();
        assert!(approx(state.zoom(), INITIAL_ZOOM));
        let rect = state.rect();
        assert!(approx(rect.size, 500.0));
        assert!(approx(rect.x, 350.0));
        assert!(approx(rect.y, 50.0));
    }

    #[test]
    fn zoom_is_snapped_and_clamped() {
        assert!(approx(clamp_zoom(0.2), MIN_ZOOM));
        assert!(approx(clamp_zoom(7.0), MAX_ZOOM));
        assert!(approx(clamp_zoom(1.52), 1.5));
        assert!(approx(clamp_zoom(1.53), 1.55));
        assert!(approx(clamp_zoom(f64::NAN), MIN_ZOOM));
    }

    #[test]
    fn drag_never_leaves_the_image() {
        let mut state = CropState::new(1000.0, 1000.0).unwrap();
        state.set_zoom(2.0);
        state.drag(-10_000.0, 10_000.0, 280.0);
        let rect = state.rect();
        assert!(approx(rect.x + rect.size, 1000.0));
        assert!(approx(rect.y, 0.0));
    }

    #[test]
    fn drag_moves_against_pointer_in_source_pixels() {
        let mut state = CropState::new(1000.0, 1000.0).unwrap();
        state.set_zoom(2.0);
        let before = state.rect();
        // side is 500 px shown at 250 px, so 10 view px = 20 source px
        state.drag(10.0, 0.0, 250.0);
        let after = state.rect();
        assert!(approx(after.x, before.x - 20.0));
        assert!(approx(after.y, before.y));
    }

    #[test]
    fn zooming_out_pulls_pan_back_inside() {
        let mut state = CropState::new(1000.0, 1000.0).unwrap();
        state.set_zoom(3.0);
        state.drag(-10_000.0, 0.0, 280.0);
        state.set_zoom(1.0);
        let rect = state.rect();
        assert!(approx(rect.x, 0.0));
        assert!(approx(rect.size, 1000.0));
    }

    #[test]
    fn output_is_capped() {
        let big = CropState::new(4000.0, 3000.0).unwrap();
        assert_eq!(big.output_size(), MAX_OUTPUT_SIZE);
        let mut small = CropState::new(120.0, 120.0).unwrap();
        small.set_zoom(1.0);
        assert_eq!(small.output_size(), 120);
    }
}
