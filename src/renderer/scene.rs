//! Game state → frame composition
//!
//! Builds one triangle list per frame in 800×450 screen space, grouped into
//! layers that are always emitted in [`Layer::ORDER`]. Composition only reads
//! the state, except for the runner's aura sparkle which is spawned here.

use std::f32::consts::{PI, TAU};
use std::ops::Range;

use glam::Vec2;

use super::glyphs;
use super::palette::Palette;
use super::shapes::{self, CIRCLE_SEGMENTS};
use super::vertex::{Color, Vertex, colors, hsl, rgb, rgba};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::ambient;
use crate::sim::{
    Collectible, CollectibleKind, Flyby, GameState, Obstacle, ObstacleKind, ParticleColor,
    Runner, Scenery, SceneryKind, SnowTint, Theme,
};

/// Aura sparkles are emitted on frames divisible by this
const AURA_INTERVAL: u64 = 3;
/// Roadside street sign starting x; it scrolls with the distance run
const STREET_SIGN_X: f32 = 600.0;
const STREET_SIGN_CULL_X: f32 = -200.0;
const STREET_NAME: &str = "MOSELEY WOOD GDNS";
const STREET_NUMBER: &str = "87";
/// Road dash spacing (one dash plus gap)
const DASH_PERIOD: f32 = 120.0;

/// Draw layers, back to front
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Sky,
    Streamers,
    Scenery,
    Flyby,
    StreetSign,
    Ground,
    Obstacles,
    Collectibles,
    Runner,
    Particles,
    Weather,
}

impl Layer {
    pub const ORDER: [Layer; 11] = [
        Layer::Sky,
        Layer::Streamers,
        Layer::Scenery,
        Layer::Flyby,
        Layer::StreetSign,
        Layer::Ground,
        Layer::Obstacles,
        Layer::Collectibles,
        Layer::Runner,
        Layer::Particles,
        Layer::Weather,
    ];
}

/// A composed frame ready for upload
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub vertices: Vec<Vertex>,
    /// Vertex range of each layer that drew something, in draw order
    pub layers: Vec<(Layer, Range<usize>)>,
}

/// Collects vertices per layer, applying an optional translate + rotate
struct Painter {
    frame: Frame,
    open: Option<(Layer, usize)>,
    origin: Vec2,
    rotation: Vec2,
}

impl Painter {
    fn new() -> Self {
        Self {
            frame: Frame::default(),
            open: None,
            origin: Vec2::ZERO,
            rotation: Vec2::X,
        }
    }

    fn begin(&mut self, layer: Layer) {
        self.close();
        self.open = Some((layer, self.frame.vertices.len()));
    }

    fn close(&mut self) {
        if let Some((layer, start)) = self.open.take() {
            let end = self.frame.vertices.len();
            if end > start {
                self.frame.layers.push((layer, start..end));
            }
        }
    }

    /// Subsequent shapes are local to `origin`, rotated by `angle` radians
    fn transform(&mut self, origin: Vec2, angle: f32) {
        self.origin = origin;
        self.rotation = Vec2::from_angle(angle);
    }

    fn reset_transform(&mut self) {
        self.transform(Vec2::ZERO, 0.0);
    }

    fn fill(&mut self, vertices: Vec<Vertex>) {
        if self.origin == Vec2::ZERO && self.rotation == Vec2::X {
            self.frame.vertices.extend(vertices);
            return;
        }
        let (origin, rotation) = (self.origin, self.rotation);
        self.frame.vertices.extend(vertices.into_iter().map(|v| {
            let p = origin + rotation.rotate(Vec2::from(v.position));
            Vertex::new(p.x, p.y, v.color)
        }));
    }

    fn finish(mut self) -> Frame {
        self.close();
        self.frame
    }
}

/// Compose the frame for the current state.
///
/// Spawns the runner's aura sparkle on every third frame before drawing, so
/// the new sparkle shows up in this frame's particle layer.
pub fn compose(state: &mut GameState, settings: &Settings) -> Frame {
    if state.frame % AURA_INTERVAL == 0 {
        let sparkle = ambient::aura_sparkle(&mut state.rng, state.runner.pos, state.runner.size);
        state.emit_particles(std::iter::once(sparkle));
    }
    let state: &GameState = state;
    let palette = Palette::of(state.theme);
    let frame = state.frame;
    let mut p = Painter::new();

    p.begin(Layer::Sky);
    p.fill(shapes::rect(0.0, 0.0, GAME_WIDTH, GAME_HEIGHT, sky_color(state.theme, frame, &palette)));

    p.begin(Layer::Streamers);
    if state.theme.is_party() {
        draw_streamers(&mut p, state);
    }

    p.begin(Layer::Scenery);
    for obj in &state.scenery {
        draw_scenery(&mut p, obj, state.theme, frame);
    }

    p.begin(Layer::Flyby);
    if state.flyby.active {
        draw_flyby(&mut p, &state.flyby);
    }

    p.begin(Layer::StreetSign);
    draw_street_sign(&mut p, state.distance);

    p.begin(Layer::Ground);
    draw_ground(&mut p, &palette, state.distance);

    p.begin(Layer::Obstacles);
    for obstacle in &state.obstacles {
        draw_obstacle(&mut p, obstacle);
    }

    p.begin(Layer::Collectibles);
    for item in &state.collectibles {
        draw_collectible(&mut p, item);
    }

    p.begin(Layer::Runner);
    draw_runner(&mut p, &state.runner, frame);

    p.begin(Layer::Particles);
    for particle in &state.particles {
        let color = match particle.color {
            ParticleColor::Dust => colors::DUST,
            ParticleColor::Gold => colors::SPARKLE_GOLD,
            ParticleColor::Amber => colors::SPARKLE_AMBER,
        };
        p.fill(shapes::rect(
            particle.pos.x,
            particle.pos.y,
            particle.size,
            particle.size,
            color,
        ));
    }

    p.begin(Layer::Weather);
    let visible = ambient::visible_snow(state.score, settings.snow_cap());
    for flake in state.snow.iter().take(visible) {
        let color = match flake.tint {
            SnowTint::White => colors::SNOW,
            SnowTint::Hue(hue) => hsl(hue, 1.0, 0.5),
        };
        p.fill(shapes::circle(flake.pos, flake.size, color, 8));
    }

    p.finish()
}

/// Disco sky in party themes, the palette sky otherwise
pub fn sky_color(theme: Theme, frame: u64, palette: &Palette) -> Color {
    match theme {
        Theme::NeonAvenue | Theme::HyperSpeed => hsl((frame % 360) as f32, 0.6, 0.15),
        Theme::MerryMode => hsl((frame as f32 * 0.5) % 360.0, 0.7, 0.2),
        _ => palette.sky,
    }
}

/// Fairy light color for roofline light `k`
pub fn light_color(k: usize, frame: u64, theme: Theme) -> Color {
    let rate = if theme.is_party() { 2 } else { 10 };
    colors::LIGHTS[(k + (frame / rate) as usize) % colors::LIGHTS.len()]
}

fn draw_streamers(p: &mut Painter, state: &GameState) {
    let wrap = GAME_WIDTH + 200.0;
    let frame = state.frame as f32;
    for s in &state.streamers {
        let x = (s.pos.x - frame * 2.0) % wrap;
        let x = if x < -100.0 { x + wrap } else { x };
        let y = s.pos.y + (frame * 0.05 + s.phase).sin() * 20.0;
        let curve = shapes::quadratic_bezier(
            Vec2::new(x, y),
            Vec2::new(x + 30.0, y - 30.0),
            Vec2::new(x + 60.0, y),
            12,
        );
        p.fill(shapes::polyline(&curve, 3.0, hsl(s.hue, 1.0, 0.5)));
    }
}

fn draw_ground(p: &mut Painter, palette: &Palette, distance: f32) {
    p.fill(shapes::rect(
        0.0,
        GROUND_Y,
        GAME_WIDTH,
        GAME_HEIGHT - GROUND_Y,
        palette.ground,
    ));

    let offset = (distance % DASH_PERIOD).floor();
    let last = (GAME_WIDTH / (DASH_PERIOD / 2.0)) as i32 + 1;
    for i in -1..=last {
        let x = i as f32 * DASH_PERIOD - offset;
        p.fill(shapes::rect(x, GROUND_Y + 20.0, 40.0, 5.0, palette.road_marking));
    }
}

fn draw_street_sign(p: &mut Painter, distance: f32) {
    let x = STREET_SIGN_X - distance;
    if x < STREET_SIGN_CULL_X {
        return;
    }
    let y = GROUND_Y - 120.0;
    let (w, h) = (240.0, 50.0);
    let sx = x - 110.0;

    p.fill(shapes::rect(x + 5.0, y + 40.0, 10.0, 80.0, rgb(0x1F2937)));

    // Border first, plate inset on top
    p.fill(shapes::rounded_rect(sx - 1.5, y - 1.5, w + 3.0, h + 3.0, 6.5, colors::BLACK));
    p.fill(shapes::rounded_rect(sx + 1.5, y + 1.5, w - 3.0, h - 3.0, 3.5, colors::WHITE));

    p.fill(glyphs::text_centered(STREET_NAME, sx + w / 2.0 + 10.0, y + 17.0, 3.0, colors::BLACK));
    p.fill(glyphs::text_centered(STREET_NUMBER, sx + 18.0, y + 20.0, 2.0, colors::CANDY_RED));
}

fn draw_scenery(p: &mut Painter, obj: &Scenery, theme: Theme, frame: u64) {
    let (x, y) = (obj.pos.x, obj.pos.y);
    let (w, h) = (obj.size.x, obj.size.y);

    match obj.kind {
        SceneryKind::LevelSign { level } => {
            let (post_h, sign_w, sign_h) = (80.0, 60.0, 40.0);
            let top = y - post_h;
            p.fill(shapes::rect(x + 15.0, top, 10.0, post_h, rgb(0x5C2B0C)));
            p.fill(shapes::rect(x, top, sign_w, sign_h, rgb(0x78350F)));
            p.fill(shapes::rect_outline(x, top, sign_w, sign_h, 2.0, rgb(0x3F1D06)));
            p.fill(shapes::rect(x, top - 4.0, sign_w, 4.0, colors::WHITE));

            let gold = colors::SPARKLE_AMBER;
            p.fill(glyphs::text_centered("LEVEL", x + sign_w / 2.0, top + 6.0, 2.0, gold));
            p.fill(glyphs::text_centered(&level.to_string(), x + sign_w / 2.0, top + 20.0, 3.0, gold));
        }
        SceneryKind::House | SceneryKind::Shop => {
            let wall = colors::HOUSE_WALLS[obj.variant as usize % colors::HOUSE_WALLS.len()];
            p.fill(shapes::rect(x, y - h, w, h, wall));

            if obj.kind == SceneryKind::Shop {
                p.fill(shapes::rect(x + 10.0, y - 60.0, w - 20.0, 40.0, rgb(0xBFDBFE)));
                p.fill(shapes::rect(x + 5.0, y - h + 10.0, w - 10.0, 20.0, rgb(0x1E293B)));
                p.fill(glyphs::text_centered("OPEN", x + w / 2.0, y - h + 15.0, 2.0, colors::WHITE));
            } else {
                let window = rgb(0xFEF08A);
                p.fill(shapes::rect(x + 10.0, y - h + 20.0, 20.0, 20.0, window));
                p.fill(shapes::rect(x + w - 30.0, y - h + 20.0, 20.0, 20.0, window));
            }

            let eave_l = Vec2::new(x - 5.0, y - h);
            let eave_r = Vec2::new(x + w + 5.0, y - h);
            let apex = Vec2::new(x + w / 2.0, y - h - 30.0);
            p.fill(shapes::triangle(eave_l, apex, eave_r, rgb(0x475569)));

            // Snow cap along both roof slopes
            let inner_apex = Vec2::new(x + w / 2.0, y - h - 25.0);
            p.fill(shapes::polygon(
                &[eave_l, apex, inner_apex, Vec2::new(x - 5.0, y - h + 5.0)],
                colors::WHITE,
            ));
            p.fill(shapes::triangle(
                apex,
                Vec2::new(x + w + 5.0, y - h + 5.0),
                inner_apex,
                colors::WHITE,
            ));

            for k in 0..10 {
                let lx = x - 5.0 + k as f32 * (w + 10.0) / 10.0;
                let rise = if k < 5 { k } else { 10 - k };
                let ly = y - h - rise as f32 * 6.0;
                p.fill(shapes::circle(
                    Vec2::new(lx + 2.0, ly),
                    3.0,
                    light_color(k, frame, theme),
                    8,
                ));
            }
        }
        SceneryKind::GingerbreadHouse => {
            p.fill(shapes::rect(x, y - h, w, h, rgb(0x78350F)));
            p.fill(shapes::triangle(
                Vec2::new(x - 5.0, y - h),
                Vec2::new(x + w / 2.0, y - h - 30.0),
                Vec2::new(x + w + 5.0, y - h),
                colors::WHITE,
            ));
            let buttons = [colors::CANDY_RED, colors::CANDY_GREEN, colors::CANDY_BLUE];
            for (i, color) in buttons.into_iter().enumerate() {
                let c = Vec2::new(x + 20.0 + i as f32 * 25.0, y - 40.0);
                p.fill(shapes::circle(c, 5.0, color, 10));
            }
            p.fill(shapes::pie(
                Vec2::new(x + w / 2.0, y),
                15.0,
                PI,
                TAU,
                rgb(0x5C2B0C),
                CIRCLE_SEGMENTS,
            ));
        }
        SceneryKind::MarketStall => {
            p.fill(shapes::rect(x + 10.0, y - 40.0, w - 20.0, 40.0, rgb(0x78350F)));
            let peak = Vec2::new(x + w / 2.0, y - 70.0);
            p.fill(shapes::triangle(
                Vec2::new(x, y - 40.0),
                peak,
                Vec2::new(x + w, y - 40.0),
                colors::CANDY_RED,
            ));
            p.fill(shapes::triangle(
                Vec2::new(x + 10.0, y - 46.0),
                peak,
                Vec2::new(x + w - 10.0, y - 46.0),
                colors::WHITE,
            ));
        }
        SceneryKind::Snowman => {
            let cx = x + 20.0;
            for (dy, r) in [(15.0, 15.0), (35.0, 12.0), (52.0, 9.0)] {
                p.fill(shapes::circle(Vec2::new(cx, y - dy), r, colors::WHITE, CIRCLE_SEGMENTS));
            }
            for (dx, dy) in [(-3.0, 54.0), (3.0, 54.0), (0.0, 35.0), (0.0, 30.0)] {
                p.fill(shapes::circle(Vec2::new(cx + dx, y - dy), 1.5, colors::BLACK, 6));
            }
            p.fill(shapes::triangle(
                Vec2::new(cx, y - 52.0),
                Vec2::new(cx + 8.0, y - 50.0),
                Vec2::new(cx, y - 48.0),
                rgb(0xF97316),
            ));
            let hat = rgb(0x1E293B);
            p.fill(shapes::rect(x + 14.0, y - 65.0, 12.0, 10.0, hat));
            p.fill(shapes::rect(x + 10.0, y - 57.0, 20.0, 3.0, hat));
        }
        SceneryKind::Tree => {
            let green = rgb(0x166534);
            for (lift, scale) in [(20.0, 1.5), (50.0, 1.2), (80.0, 1.0)] {
                p.fill(shapes::triangle(
                    Vec2::new(x, y - lift),
                    Vec2::new(x + w / 2.0, y - lift - 40.0 * scale),
                    Vec2::new(x + w, y - lift),
                    green,
                ));
            }
            let tip = if theme == Theme::MerryMode {
                hsl(((frame * 10) % 360) as f32, 1.0, 0.8)
            } else {
                colors::WHITE
            };
            p.fill(shapes::triangle(
                Vec2::new(x + w / 2.0, y - 140.0),
                Vec2::new(x + w / 2.0 - 10.0, y - 125.0),
                Vec2::new(x + w / 2.0 + 10.0, y - 125.0),
                tip,
            ));
            p.fill(shapes::rect(x + w / 2.0 - 5.0, y - 20.0, 10.0, 20.0, rgb(0x451A03)));
        }
        SceneryKind::Lamp => {
            let iron = rgb(0x1F2937);
            p.fill(shapes::rect(x, y - 100.0, 4.0, 100.0, iron));
            p.fill(shapes::polygon(
                &[
                    Vec2::new(x - 10.0, y - 100.0),
                    Vec2::new(x + 14.0, y - 100.0),
                    Vec2::new(x + 10.0, y - 115.0),
                    Vec2::new(x - 6.0, y - 115.0),
                ],
                iron,
            ));
            let light = if theme.is_party() {
                hsl(((frame * 10) % 360) as f32, 1.0, 0.7)
            } else {
                rgba(0xFDE047, 0.6)
            };
            p.fill(shapes::circle(Vec2::new(x + 2.0, y - 105.0), 15.0, light, CIRCLE_SEGMENTS));
        }
    }
}

fn draw_reindeer(p: &mut Painter, rx: f32, ry: f32, rudolph: bool) {
    let fur = rgb(0x78350F);
    p.fill(shapes::rect(rx, ry, 25.0, 12.0, fur));
    p.fill(shapes::rect(rx - 5.0, ry - 10.0, 8.0, 15.0, fur));
    p.fill(shapes::circle(Vec2::new(rx - 5.0, ry - 12.0), 6.0, fur, 10));

    let antler = rgb(0xFDE047);
    let base = Vec2::new(rx - 5.0, ry - 15.0);
    p.fill(shapes::line(base, Vec2::new(rx - 8.0, ry - 22.0), 1.0, antler));
    p.fill(shapes::line(base, Vec2::new(rx - 2.0, ry - 22.0), 1.0, antler));

    p.fill(shapes::rect(rx, ry + 12.0, 4.0, 8.0, fur));
    p.fill(shapes::rect(rx + 20.0, ry + 12.0, 4.0, 8.0, fur));

    if rudolph {
        let nose = Vec2::new(rx - 11.0, ry - 12.0);
        p.fill(shapes::glow(nose, 2.5, 7.5, colors::CANDY_RED, 0.5, 3));
        p.fill(shapes::circle(nose, 2.5, colors::CANDY_RED, 8));
    }
}

fn draw_flyby(p: &mut Painter, flyby: &Flyby) {
    p.transform(flyby.pos, 0.0);
    let sleigh_red = rgb(0xB91C1C);

    let mut hull = shapes::cubic_bezier(
        Vec2::new(10.0, 20.0),
        Vec2::new(10.0, 35.0),
        Vec2::new(40.0, 35.0),
        Vec2::new(50.0, 20.0),
        10,
    );
    hull.extend([Vec2::new(50.0, 10.0), Vec2::new(0.0, 10.0)]);
    p.fill(shapes::polygon(&hull, sleigh_red));

    let mut runner = shapes::quadratic_bezier(
        Vec2::new(55.0, 10.0),
        Vec2::new(55.0, 40.0),
        Vec2::new(10.0, 40.0),
        10,
    );
    runner.push(Vec2::new(-5.0, 30.0));
    p.fill(shapes::polyline(&runner, 2.0, colors::SPARKLE_AMBER));

    p.fill(shapes::circle(Vec2::new(35.0, 5.0), 10.0, rgb(0x854D0E), CIRCLE_SEGMENTS));

    p.fill(shapes::rect(10.0, 0.0, 20.0, 20.0, sleigh_red));
    p.fill(shapes::circle(Vec2::new(20.0, 5.0), 5.0, colors::WHITE, 10));
    p.fill(shapes::circle(Vec2::new(20.0, 0.0), 4.0, rgb(0xFCA5A5), 10));
    p.fill(shapes::triangle(
        Vec2::new(16.0, -3.0),
        Vec2::new(20.0, -10.0),
        Vec2::new(24.0, -3.0),
        sleigh_red,
    ));

    p.fill(shapes::polyline(
        &[
            Vec2::new(0.0, 20.0),
            Vec2::new(-40.0, 25.0),
            Vec2::new(-80.0, 25.0),
        ],
        1.0,
        rgb(0x92400E),
    ));
    draw_reindeer(p, -40.0, 20.0, false);
    draw_reindeer(p, -80.0, 18.0, true);

    p.reset_transform();
}

fn draw_obstacle(p: &mut Painter, obs: &Obstacle) {
    let (x, y) = (obs.pos.x, obs.pos.y);
    let (w, h) = (obs.size.x, obs.size.y);
    p.fill(shapes::rect(x + 5.0, y + h - 5.0, w, 5.0, colors::SHADOW));

    match obs.kind {
        ObstacleKind::Car => {
            let paint = colors::CAR_PALETTE[obs.paint as usize % colors::CAR_PALETTE.len()];
            p.fill(shapes::rect(x, y + 12.0, w, h - 12.0, paint));

            let roof_w = w - 30.0;
            let roof_x = x + 15.0;
            let roof_h = 15.0;
            p.fill(shapes::rect(roof_x, y, 5.0, roof_h, paint));
            p.fill(shapes::rect(roof_x + roof_w - 5.0, y, 5.0, roof_h, paint));
            p.fill(shapes::rect(roof_x, y, roof_w, 3.0, paint));
            p.fill(shapes::rect(roof_x + 5.0, y + 3.0, roof_w - 10.0, roof_h - 3.0, rgb(0x93C5FD)));

            for wx in [x + 18.0, x + w - 18.0] {
                let hub = Vec2::new(wx, y + h);
                p.fill(shapes::circle(hub, 7.0, rgb(0x1F2937), 12));
                p.fill(shapes::circle(hub, 3.0, rgb(0xD1D5DB), 8));
            }
        }
        ObstacleKind::Bin => {
            p.fill(shapes::rect(x, y, w, h, rgb(0x4B5563)));
            p.fill(shapes::rect(x - 2.0, y, w + 4.0, 8.0, rgb(0x374151)));
            p.fill(shapes::circle(Vec2::new(x + 5.0, y + h), 5.0, colors::BLACK, 10));
            let rib = rgb(0x6B7280);
            p.fill(shapes::rect(x + 5.0, y + 15.0, w - 10.0, 2.0, rib));
            p.fill(shapes::rect(x + 5.0, y + 25.0, w - 10.0, 2.0, rib));
        }
        ObstacleKind::Postbox => {
            let red = rgb(0xDC2626);
            let r = w / 2.0;
            p.fill(shapes::pie(Vec2::new(x + r, y + r), r, PI, TAU, red, CIRCLE_SEGMENTS));
            p.fill(shapes::rect(x, y + r, w, h - r, red));
            p.fill(shapes::rect(x - 2.0, y + h - 5.0, w + 4.0, 5.0, colors::BLACK));
            p.fill(shapes::rect(x + r - 6.0, y + 25.0, 12.0, 10.0, colors::WHITE));
            p.fill(shapes::rect(x + r - 8.0, y + 15.0, 16.0, 4.0, colors::BLACK));
        }
        ObstacleKind::Fence => {
            let posts = 3;
            let pw = w / posts as f32;
            for i in 0..posts {
                let px = x + i as f32 * pw;
                p.fill(shapes::rect(px + 2.0, y, pw - 4.0, h, colors::WHITE));
                p.fill(shapes::triangle(
                    Vec2::new(px + 2.0, y),
                    Vec2::new(px + pw / 2.0, y - 10.0),
                    Vec2::new(px + pw - 2.0, y),
                    colors::WHITE,
                ));
            }
            p.fill(shapes::rect(x, y + 15.0, w, 5.0, colors::WHITE));
            p.fill(shapes::rect(x, y + 30.0, w, 5.0, colors::WHITE));
        }
        ObstacleKind::Cone => {
            p.fill(shapes::triangle(
                Vec2::new(x + w / 2.0, y),
                Vec2::new(x + w, y + h),
                Vec2::new(x, y + h),
                rgb(0xF97316),
            ));
            p.fill(shapes::rect(x + 10.0, y + 10.0, w - 20.0, 5.0, colors::WHITE));
            p.fill(shapes::rect(x - 2.0, y + h - 4.0, w + 4.0, 4.0, colors::BLACK));
        }
        ObstacleKind::Barrier => {
            let red = colors::CANDY_RED;
            p.fill(shapes::rect(x, y, w, h, red));
            p.fill(shapes::rect(x + 4.0, y + 4.0, w - 8.0, h - 8.0, colors::WHITE));
            for sx in [x + 10.0, x + 40.0] {
                p.fill(shapes::polygon(
                    &[
                        Vec2::new(sx, y + 4.0),
                        Vec2::new(sx + 10.0, y + h - 4.0),
                        Vec2::new(sx + 20.0, y + h - 4.0),
                        Vec2::new(sx + 10.0, y + 4.0),
                    ],
                    red,
                ));
            }
        }
    }
}

fn draw_collectible(p: &mut Painter, item: &Collectible) {
    p.transform(item.sprite().center(), 0.0);

    match item.kind {
        CollectibleKind::Present => {
            p.fill(shapes::rect(-12.0, -12.0, 24.0, 24.0, rgb(0x1E40AF)));
            let ribbon = rgb(0xF59E0B);
            p.fill(shapes::rect(-4.0, -12.0, 8.0, 24.0, ribbon));
            p.fill(shapes::rect(-12.0, -4.0, 24.0, 8.0, ribbon));
        }
        CollectibleKind::Star => {
            p.fill(shapes::star(Vec2::ZERO, 15.0, 6.0, 5, 18.0, colors::SPARKLE_AMBER));
        }
        CollectibleKind::CandyCane => {
            let mut cane = vec![Vec2::new(0.0, 10.0)];
            cane.extend(shapes::cubic_bezier(
                Vec2::new(0.0, -5.0),
                Vec2::new(0.0, -15.0),
                Vec2::new(-15.0, -15.0),
                Vec2::new(-15.0, -5.0),
                10,
            ));
            p.fill(shapes::polyline(&cane, 6.0, colors::CANDY_RED));
            p.fill(shapes::circle(Vec2::new(0.0, 10.0), 3.0, colors::CANDY_RED, 8));
            p.fill(shapes::circle(Vec2::new(-15.0, -5.0), 3.0, colors::CANDY_RED, 8));
            p.fill(shapes::dashed_polyline(&cane, 6.0, 5.0, 5.0, 2.0, colors::WHITE));
        }
    }

    p.reset_transform();
}

fn draw_runner(p: &mut Painter, runner: &Runner, frame: u64) {
    let (w, h) = (runner.size.x, runner.size.y);
    let center = runner.pos + runner.size / 2.0;

    // Pulsing aura, unrotated
    let pulse = (frame as f32 * 0.2).sin() * 5.0 + 20.0;
    p.fill(shapes::glow(center, 10.0, pulse + 15.0, rgb(0xFFD700), 0.6, 6));

    p.transform(center, runner.rotation);
    let brown = colors::GINGERBREAD;

    p.fill(shapes::circle(Vec2::new(0.0, -h / 3.0), w / 2.0, brown, CIRCLE_SEGMENTS));
    p.fill(shapes::rect(-w / 2.0 + 4.0, -h / 4.0, w - 8.0, h / 2.0 + 5.0, brown));

    p.fill(shapes::capped_line(Vec2::new(-w / 4.0, -h / 6.0), Vec2::new(-w, 0.0), 8.0, brown));
    p.fill(shapes::capped_line(Vec2::new(w / 4.0, -h / 6.0), Vec2::new(w, 0.0), 8.0, brown));

    let stride = runner.limb_swing.sin() * 8.0;
    p.fill(shapes::capped_line(
        Vec2::new(-w / 4.0, h / 4.0),
        Vec2::new(-w / 2.0 - stride, h / 2.0),
        8.0,
        brown,
    ));
    p.fill(shapes::capped_line(
        Vec2::new(w / 4.0, h / 4.0),
        Vec2::new(w / 2.0 + stride, h / 2.0),
        8.0,
        brown,
    ));

    // Icing cuffs, eyes, smile
    let icing = colors::WHITE;
    p.fill(shapes::line(Vec2::new(-w + 2.0, 0.0), Vec2::new(-w + 2.0, 2.0), 2.0, icing));
    p.fill(shapes::line(Vec2::new(w - 2.0, 0.0), Vec2::new(w - 2.0, 2.0), 2.0, icing));
    p.fill(shapes::circle(Vec2::new(-5.0, -h / 3.0 - 2.0), 2.5, icing, 8));
    p.fill(shapes::circle(Vec2::new(5.0, -h / 3.0 - 2.0), 2.5, icing, 8));
    p.fill(shapes::arc_band(Vec2::new(0.0, -h / 3.0 + 4.0), 2.0, 4.0, 0.0, PI, icing, 8));

    p.fill(shapes::circle(Vec2::new(0.0, -h / 6.0 + 5.0), 3.0, colors::CANDY_RED, 8));
    p.fill(shapes::circle(Vec2::ZERO, 3.0, colors::CANDY_GREEN, 8));

    p.reset_transform();
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Vertices of one layer, if it drew anything
    fn layer(frame: &Frame, layer: Layer) -> Option<&[Vertex]> {
        frame
            .layers
            .iter()
            .find(|(l, _)| *l == layer)
            .map(|(_, range)| &frame.vertices[range.clone()])
    }

    fn is_ordered(frame: &Frame) -> bool {
        let positions: Vec<usize> = frame
            .layers
            .iter()
            .map(|(l, _)| *l)
            .map(|l| Layer::ORDER.iter().position(|o| *o == l).unwrap_or(usize::MAX))
            .collect();
        positions.windows(2).all(|w| w[0] < w[1])
    }

    #[test]
    fn test_layers_in_fixed_order() {
        let mut state = GameState::new(3);
        for _ in 0..200 {
            crate::sim::tick(&mut state);
        }
        let frame = compose(&mut state, &Settings::default());
        assert!(is_ordered(&frame));
        assert_eq!(frame.layers.first().map(|(l, _)| *l), Some(Layer::Sky));
        // Ranges tile the vertex buffer without gaps
        let mut expected_start = 0;
        for (_, range) in &frame.layers {
            assert_eq!(range.start, expected_start);
            expected_start = range.end;
        }
        assert_eq!(expected_start, frame.vertices.len());
        assert_eq!(frame.vertices.len() % 3, 0);
    }

    #[test]
    fn test_streamers_only_in_party_themes() {
        let mut state = GameState::new(4);
        let calm = compose(&mut state, &Settings::default());
        assert!(layer(&calm, Layer::Streamers).is_none());

        state.theme = Theme::NeonAvenue;
        let party = compose(&mut state, &Settings::default());
        assert!(layer(&party, Layer::Streamers).is_some());
        assert!(is_ordered(&party));
    }

    #[test]
    fn test_aura_sparkle_every_third_frame() {
        let mut state = GameState::new(5);
        state.frame = 3;
        compose(&mut state, &Settings::default());
        assert_eq!(state.particles.len(), 1);
        assert_eq!(state.particles[0].color, ParticleColor::Amber);

        state.frame = 4;
        compose(&mut state, &Settings::default());
        assert_eq!(state.particles.len(), 1);
    }

    #[test]
    fn test_compose_leaves_gameplay_untouched() {
        let mut state = GameState::new(6);
        for _ in 0..50 {
            crate::sim::tick(&mut state);
        }
        let (score, runner_y, obstacles) = (
            state.score,
            state.runner.pos.y,
            state.obstacles.len(),
        );
        compose(&mut state, &Settings::default());
        assert_eq!(state.score, score);
        assert_eq!(state.runner.pos.y, runner_y);
        assert_eq!(state.obstacles.len(), obstacles);
    }

    #[test]
    fn test_no_snow_at_zero_score() {
        let mut state = GameState::new(7);
        let frame = compose(&mut state, &Settings::default());
        assert!(layer(&frame, Layer::Weather).is_none());

        state.score = 5000;
        let frame = compose(&mut state, &Settings::default());
        assert!(layer(&frame, Layer::Weather).is_some());
    }

    #[test]
    fn test_street_sign_scrolls_away() {
        let mut state = GameState::new(8);
        let frame = compose(&mut state, &Settings::default());
        assert!(layer(&frame, Layer::StreetSign).is_some());

        state.distance = 801.0;
        let frame = compose(&mut state, &Settings::default());
        assert!(layer(&frame, Layer::StreetSign).is_none());
    }

    #[test]
    fn test_sky_colors() {
        let palette = Palette::of(Theme::StreetNight);
        assert_eq!(sky_color(Theme::StreetNight, 77, &palette), palette.sky);
        assert_eq!(
            sky_color(Theme::HyperSpeed, 480, &palette),
            hsl(120.0, 0.6, 0.15)
        );
        assert_eq!(sky_color(Theme::MerryMode, 240, &palette), hsl(120.0, 0.7, 0.2));
    }

    #[test]
    fn test_lights_cycle_faster_in_party() {
        // Calm rate 10: frames 0..9 share a color
        assert_eq!(light_color(0, 0, Theme::StreetMorning), light_color(0, 9, Theme::StreetMorning));
        assert_ne!(light_color(0, 0, Theme::StreetMorning), light_color(0, 10, Theme::StreetMorning));
        // Party rate 2
        assert_ne!(light_color(0, 0, Theme::NeonAvenue), light_color(0, 2, Theme::NeonAvenue));
        assert_eq!(light_color(1, 0, Theme::MerryMode), colors::CANDY_GREEN);
    }

    #[test]
    fn test_runner_drawn_around_its_box() {
        let mut state = GameState::new(9);
        let frame = compose(&mut state, &Settings::default());
        let runner = layer(&frame, Layer::Runner).unwrap_or(&[]);
        assert!(!runner.is_empty());
        let center = state.runner.pos + state.runner.size / 2.0;
        for v in runner {
            let d = Vec2::from(v.position) - center;
            assert!(d.length() < 60.0);
        }
    }
}
