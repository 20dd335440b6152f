//! Smooth 3D curves through mapped arc points, with net clearance enforced
//!
//! Control points are joined by a cardinal Catmull-Rom spline (uniform
//! parameter, reflected end tangents) and sampled at evenly spaced
//! parameter steps. Samples are clamped to the scene, then any arc that
//! crosses the net plane too low gets a parabolic height bump centred on
//! the crossing. Classification always reads the enforced curve.

use super::mapper::CoordinateMapper;
use super::types::{FilteredPoint, NetCrossing, ProcessedArc};
use crate::config::CurveConfig;
use crate::physics::{crosses_net, Table, Vec3};

/// Highest sampled point above the surface (m)
pub const SCENE_CEILING: f32 = 0.6;

/// A sampled, clamped, net-checked curve
#[derive(Clone, Debug, PartialEq)]
pub struct FittedCurve {
    pub points: Vec<Vec3>,
    pub net_crossing: NetCrossing,
    /// Peak height injected at the crossing (0 when none was needed)
    pub net_lift: f32,
}

/// Cubic Hermite coefficients for one spline segment
struct CubicSegment {
    c0: Vec3,
    c1: Vec3,
    c2: Vec3,
    c3: Vec3,
}

impl CubicSegment {
    fn catmull_rom(p0: &Vec3, p1: &Vec3, p2: &Vec3, p3: &Vec3, tension: f32) -> Self {
        let t0 = (p2 - p0) * tension;
        let t1 = (p3 - p1) * tension;
        Self {
            c0: *p1,
            c1: t0,
            c2: p1 * -3.0 + p2 * 3.0 - t0 * 2.0 - t1,
            c3: p1 * 2.0 - p2 * 2.0 + t0 + t1,
        }
    }

    fn at(&self, w: f32) -> Vec3 {
        let w2 = w * w;
        self.c0 + self.c1 * w + self.c2 * w2 + self.c3 * (w2 * w)
    }
}

/// Point on the spline at global parameter `t` ∈ [0, 1]
pub fn catmull_rom_point(control: &[Vec3], tension: f32, t: f32) -> Vec3 {
    let l = control.len();
    match l {
        0 => return Vec3::zeros(),
        1 => return control[0],
        _ => {}
    }

    let p = (l - 1) as f32 * t.clamp(0.0, 1.0);
    let mut seg = p.floor() as usize;
    let mut w = p - seg as f32;
    if seg >= l - 1 {
        seg = l - 2;
        w = 1.0;
    }

    let p1 = control[seg];
    let p2 = control[seg + 1];
    let p0 = if seg > 0 { control[seg - 1] } else { p1 * 2.0 - p2 };
    let p3 = if seg + 2 < l { control[seg + 2] } else { p2 * 2.0 - p1 };

    CubicSegment::catmull_rom(&p0, &p1, &p2, &p3, tension).at(w)
}

/// `steps + 1` evenly spaced samples from t = 0 to t = 1
pub fn sample_spline(control: &[Vec3], tension: f32, steps: usize) -> Vec<Vec3> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| catmull_rom_point(control, tension, i as f32 / steps as f32))
        .collect()
}

/// Keep samples inside the renderable scene
pub fn clamp_to_scene(points: &mut [Vec3], table: &Table) {
    let max_x = 2.0 * table.width;
    let max_z = 1.5 * table.depth;
    let floor = table.surface_y();
    let ceiling = table.surface_y() + SCENE_CEILING;

    for p in points.iter_mut() {
        p.x = p.x.clamp(-max_x, max_x);
        p.z = p.z.clamp(-max_z, max_z);
        p.y = p.y.clamp(floor, ceiling);
    }
}

/// First net-plane crossing: (normalised position along the curve, height)
pub fn find_net_crossing(points: &[Vec3]) -> Option<(f32, f32)> {
    if points.len() < 2 {
        return None;
    }

    let last = (points.len() - 1) as f32;
    points.windows(2).enumerate().find_map(|(i, w)| {
        let (a, b) = (&w[0], &w[1]);
        if !crosses_net(a.x, b.x) {
            return None;
        }
        let u = a.x / (a.x - b.x);
        let height = a.y + (b.y - a.y) * u;
        Some(((i as f32 + u) / last, height))
    })
}

/// Height the curve must reach at the net plane
pub fn clearance_threshold(table: &Table, config: &CurveConfig) -> f32 {
    table.net_top() + config.net_margin_m
}

/// Lift a too-low crossing. Returns the peak height added (0 if untouched).
pub fn enforce_net_clearance(points: &mut [Vec3], table: &Table, config: &CurveConfig) -> f32 {
    let Some((cross_t, height)) = find_net_crossing(points) else {
        return 0.0;
    };

    let threshold = clearance_threshold(table, config);
    if height >= threshold {
        return 0.0;
    }

    let peak = (threshold - height) + config.lift_headroom_m;
    let width = cross_t.max(1.0 - cross_t) * config.lift_width_factor;
    let width = if width > 0.0 { width } else { 1.0 };
    let last = (points.len() - 1).max(1) as f32;

    for (i, p) in points.iter_mut().enumerate() {
        let d = (i as f32 / last - cross_t).abs() / width;
        p.y += peak * (1.0 - d * d).max(0.0);
    }

    peak
}

/// Classify a (finished) curve against the clearance threshold
pub fn classify_net_crossing(points: &[Vec3], threshold: f32) -> NetCrossing {
    match find_net_crossing(points) {
        Some((_, height)) if height >= threshold => NetCrossing::Clears,
        Some(_) => NetCrossing::Clips,
        None => NetCrossing::None,
    }
}

/// Fit, clamp, enforce and classify a curve through scene-space control points
pub fn fit_curve(control: &[Vec3], table: &Table, config: &CurveConfig) -> Option<FittedCurve> {
    if control.len() < 2 {
        return None;
    }

    let steps = config.min_steps.max(config.steps_per_point * control.len());
    let mut points = sample_spline(control, config.tension, steps);
    clamp_to_scene(&mut points, table);

    let net_lift = enforce_net_clearance(&mut points, table, config);
    let net_crossing = classify_net_crossing(&points, clearance_threshold(table, config));

    Some(FittedCurve { points, net_crossing, net_lift })
}

/// Map an arc's filtered points and fit its curve
///
/// `points` are the control points in frame order (the segment plus the
/// following event point, if any). None when fewer than two.
pub fn fit_arc(
    points: &[FilteredPoint],
    is_toss: bool,
    mapper: &CoordinateMapper,
    table: &Table,
    config: &CurveConfig,
) -> Option<ProcessedArc> {
    let control: Vec<Vec3> = points.iter().map(|p| mapper.map(p.x, p.y)).collect();
    let fitted = fit_curve(&control, table, config)?;

    let first = points.first()?;
    let last = points.last()?;

    Some(ProcessedArc {
        curve_points: fitted.points,
        is_toss,
        net_crossing: fitted.net_crossing,
        start_frame: first.frame,
        end_frame: last.frame,
        control_frames: points.iter().map(|p| p.frame).collect(),
        net_lift: fitted.net_lift,
    })
}
