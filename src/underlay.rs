use crate::buffers::DepthBuffer;
use crate::config::ProjectionConfig;
use crate::quad::EdgeScale;

/// Which of a pixel's four axis neighbors sit more than the threshold nearer
/// to the camera. A set flag means a depth cliff at that edge would expose a
/// gap behind the nearer neighbor unless the quad stretches to cover it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnderlayTriggers {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl UnderlayTriggers {
    pub fn any_horizontal(self) -> bool {
        self.left || self.right
    }

    pub fn any_vertical(self) -> bool {
        self.up || self.down
    }
}

/// Classifies the depth discontinuities around pixel (x, y). Neighbors are
/// addressed with explicit per-direction bounds checks; edge pixels simply
/// have no neighbor on the outside.
pub fn classify(depth: &DepthBuffer, x: u32, y: u32, threshold: f32) -> UnderlayTriggers {
    let d = depth.get(x, y);
    let cliff = |nx: u32, ny: u32| depth.get(nx, ny) < d - threshold;
    UnderlayTriggers {
        left: x > 0 && cliff(x - 1, y),
        right: x + 1 < depth.width() && cliff(x + 1, y),
        up: y > 0 && cliff(x, y - 1),
        down: y + 1 < depth.height() && cliff(x, y + 1),
    }
}

/// Edge scales for the horizontally extended quad: base scales with the
/// left/right edges pushed out by a full underlay unit (the 2x multiplier
/// makes the extension symmetric around the original edge).
pub fn resolve_horizontal(cfg: &ProjectionConfig, triggers: UnderlayTriggers) -> EdgeScale {
    let mut scale = base_scale(cfg);
    if triggers.left {
        scale.left += cfg.underlay_left * 2.0;
    }
    if triggers.right {
        scale.right += cfg.underlay_right * 2.0;
    }
    scale
}

/// Edge scales for the vertically extended quad. Buffer row 0 is the bottom
/// of the frame, so the y-1 neighbor sits below the pixel in world space:
/// the `up` trigger stretches the down edge and vice versa.
pub fn resolve_vertical(cfg: &ProjectionConfig, triggers: UnderlayTriggers) -> EdgeScale {
    let mut scale = base_scale(cfg);
    if triggers.up {
        scale.down += cfg.underlay_up * 2.0;
    }
    if triggers.down {
        scale.up += cfg.underlay_down * 2.0;
    }
    scale
}

fn base_scale(cfg: &ProjectionConfig) -> EdgeScale {
    EdgeScale {
        left: cfg.scale_left,
        right: cfg.scale_right,
        up: cfg.scale_up,
        down: cfg.scale_down,
    }
}
