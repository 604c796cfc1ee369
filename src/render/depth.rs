//! Per-pixel depth storage for nearest-surface resolution.
//!
//! Sign convention: larger values are nearer. The buffer starts at negative
//! infinity ("nothing drawn yet"), so the first surface to reach a pixel
//! always passes, and a later surface passes only with a strictly greater z.

/// One `f32` per pixel, `width * height`, tightly packed.
#[derive(Debug, Clone)]
pub struct DepthBuffer {
    depths: Vec<f32>,
    width: u32,
    height: u32,
}

impl DepthBuffer {
    /// Value meaning "nothing drawn here yet".
    pub const FARTHEST: f32 = f32::NEG_INFINITY;

    pub fn new(width: u32, height: u32) -> Self {
        Self {
            depths: vec![Self::FARTHEST; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.depths = Vec::new();
        self.depths = vec![Self::FARTHEST; width as usize * height as usize];
        self.width = width;
        self.height = height;
    }

    /// Resets every pixel to [`DepthBuffer::FARTHEST`]. Called once per frame.
    pub fn clear(&mut self) {
        self.depths.fill(Self::FARTHEST);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|i| self.depths[i])
    }

    /// Stores `depth` if it is nearer than the current value.
    ///
    /// Returns true when the test passed and the caller should write color.
    /// Out-of-bounds coordinates never pass.
    #[inline]
    pub fn test_and_set(&mut self, x: i32, y: i32, depth: f32) -> bool {
        match self.index(x, y) {
            Some(i) if depth > self.depths[i] => {
                self.depths[i] = depth;
                true
            }
            _ => false,
        }
    }
}
