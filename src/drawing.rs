use crate::palette::Color;
use crate::vertex::Vertex;

/// Segments used to approximate circles.
const CIRCLE_SEGMENTS: u32 = 32;
/// Opacity applied to the shadow color when drawing glow halos.
const GLOW_ALPHA: f32 = 0.35;
const CIRCLE_STROKE_WIDTH: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, p: [f32; 2]) -> bool {
        p[0] >= self.x
            && p[0] <= self.x + self.width
            && p[1] >= self.y
            && p[1] <= self.y + self.height
    }

    /// True when the box `min..=max` overlaps this rectangle.
    pub fn overlaps(&self, min: [f32; 2], max: [f32; 2]) -> bool {
        min[0] <= self.x + self.width
            && max[0] >= self.x
            && min[1] <= self.y + self.height
            && max[1] >= self.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub blur: f32,
}

impl Shadow {
    pub const NONE: Shadow = Shadow {
        color: [0.0, 0.0, 0.0, 0.0],
        blur: 0.0,
    };

    fn is_visible(&self) -> bool {
        self.blur > 0.0 && self.color[3] > 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawingElement {
    Line {
        from: [f32; 2],
        to: [f32; 2],
        color: Color,
        width: f32,
        shadow: Shadow,
    },
    Circle {
        center: [f32; 2],
        radius: f32,
        stroke: Color,
        fill: Color,
        shadow: Shadow,
    },
}

impl DrawingElement {
    /// Bounding box as `(min, max)` corners.
    fn bounds(&self) -> ([f32; 2], [f32; 2]) {
        match self {
            DrawingElement::Line { from, to, .. } => (
                [from[0].min(to[0]), from[1].min(to[1])],
                [from[0].max(to[0]), from[1].max(to[1])],
            ),
            DrawingElement::Circle { center, radius, .. } => (
                [center[0] - radius, center[1] - radius],
                [center[0] + radius, center[1] + radius],
            ),
        }
    }

    fn touches(&self, region: &Rect) -> bool {
        let (min, max) = self.bounds();
        region.overlaps(min, max)
    }
}

/// Immediate-mode 2D target the ring animation draws into.
pub trait DrawingSurface {
    fn clear(&mut self, region: Rect);
    /// Glow applied to every following stroke until changed.
    fn set_shadow(&mut self, color: Color, blur: f32);
    fn draw_line(&mut self, from: [f32; 2], to: [f32; 2], color: Color, width: f32);
    fn draw_circle(&mut self, center: [f32; 2], radius: f32, stroke: Color, fill: Color);
}

/// Records draw calls and turns them into a triangle list for the GPU.
#[derive(Debug, Default)]
pub struct StrokeBatch {
    elements: Vec<DrawingElement>,
    shadow: Option<Shadow>,
    clip: Option<Rect>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl StrokeBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// A batch that discards strokes falling entirely outside `clip`.
    pub fn clipped(clip: Rect) -> Self {
        Self {
            clip: Some(clip),
            ..Self::default()
        }
    }

    pub fn set_clip(&mut self, clip: Rect) {
        self.clip = Some(clip);
        self.elements.retain(|element| element.touches(&clip));
    }

    fn record(&mut self, element: DrawingElement) {
        if self.clip.is_some_and(|clip| !element.touches(&clip)) {
            return;
        }
        self.elements.push(element);
    }

    pub fn elements(&self) -> &[DrawingElement] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, DrawingElement::Line { .. }))
            .count()
    }

    fn current_shadow(&self) -> Shadow {
        self.shadow.unwrap_or(Shadow::NONE)
    }

    pub fn tessellate(&self) -> Mesh {
        let mut mesh = Mesh::default();

        for element in &self.elements {
            match element {
                DrawingElement::Line {
                    from,
                    to,
                    color,
                    width,
                    shadow,
                } => {
                    if shadow.is_visible() {
                        mesh.push_segment(*from, *to, width + 2.0 * shadow.blur, glow(shadow));
                    }
                    mesh.push_segment(*from, *to, *width, *color);
                }
                DrawingElement::Circle {
                    center,
                    radius,
                    stroke,
                    fill,
                    shadow,
                } => {
                    if shadow.is_visible() {
                        mesh.push_disc(*center, radius + shadow.blur, glow(shadow));
                    }
                    mesh.push_disc(*center, *radius, *fill);
                    mesh.push_ring(*center, *radius, CIRCLE_STROKE_WIDTH, *stroke);
                }
            }
        }

        mesh
    }
}

impl DrawingSurface for StrokeBatch {
    /// Drops every element that reaches into `region`, like a canvas
    /// `clearRect` whose clipped remainder is off screen.
    fn clear(&mut self, region: Rect) {
        self.elements.retain(|element| !element.touches(&region));
    }

    fn set_shadow(&mut self, color: Color, blur: f32) {
        self.shadow = Some(Shadow { color, blur });
    }

    fn draw_line(&mut self, from: [f32; 2], to: [f32; 2], color: Color, width: f32) {
        let shadow = self.current_shadow();
        self.record(DrawingElement::Line {
            from,
            to,
            color,
            width,
            shadow,
        });
    }

    fn draw_circle(&mut self, center: [f32; 2], radius: f32, stroke: Color, fill: Color) {
        let shadow = self.current_shadow();
        self.record(DrawingElement::Circle {
            center,
            radius,
            stroke,
            fill,
            shadow,
        });
    }
}

fn glow(shadow: &Shadow) -> Color {
    let [r, g, b, a] = shadow.color;
    [r, g, b, a * GLOW_ALPHA]
}

/// Index of the next vertex, provided `count` more still fit in `u32` indices.
fn index_base(len: usize, count: usize) -> Option<u32> {
    let end = len.checked_add(count)?;
    u32::try_from(end).ok()?;
    u32::try_from(len).ok()
}

impl Mesh {
    fn reserve(&self, count: usize) -> Option<u32> {
        let base = index_base(self.vertices.len(), count);
        if base.is_none() {
            log::warn!("Mesh index space exhausted, dropping geometry");
        }
        base
    }

    fn push_segment(&mut self, p1: [f32; 2], p2: [f32; 2], width: f32, color: Color) {
        let dx = p2[0] - p1[0];
        let dy = p2[1] - p1[1];
        let len = (dx * dx + dy * dy).sqrt();
        if len <= 0.0 {
            return;
        }

        let nx = -dy / len * width * 0.5;
        let ny = dx / len * width * 0.5;
        let Some(base) = self.reserve(4) else {
            return;
        };

        for position in [
            [p1[0] - nx, p1[1] - ny],
            [p1[0] + nx, p1[1] + ny],
            [p2[0] + nx, p2[1] + ny],
            [p2[0] - nx, p2[1] - ny],
        ] {
            self.vertices.push(Vertex { position, color });
        }

        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    fn push_disc(&mut self, center: [f32; 2], radius: f32, color: Color) {
        let Some(center_index) = self.reserve(1 + CIRCLE_SEGMENTS as usize) else {
            return;
        };
        self.vertices.push(Vertex {
            position: center,
            color,
        });

        for i in 0..CIRCLE_SEGMENTS {
            let angle = (i as f32 * std::f32::consts::TAU) / CIRCLE_SEGMENTS as f32;
            self.vertices.push(Vertex {
                position: [
                    center[0] + angle.cos() * radius,
                    center[1] + angle.sin() * radius,
                ],
                color,
            });
        }

        for i in 0..CIRCLE_SEGMENTS {
            self.indices.extend_from_slice(&[
                center_index,
                center_index + 1 + i,
                center_index + 1 + (i + 1) % CIRCLE_SEGMENTS,
            ]);
        }
    }

    fn push_ring(&mut self, center: [f32; 2], radius: f32, width: f32, color: Color) {
        let point = |i: u32| {
            let angle = (i as f32 * std::f32::consts::TAU) / CIRCLE_SEGMENTS as f32;
            [
                center[0] + angle.cos() * radius,
                center[1] + angle.sin() * radius,
            ]
        };

        for i in 0..CIRCLE_SEGMENTS {
            self.push_segment(point(i), point(i + 1), width, color);
        }
    }
}
