//! Keyframe tracks and their TCB (Kochanek-Bartels) interpolation.
//!
//! A track stores its keys in ascending frame order. After the keys are loaded or changed
//! `Track::setup` must be called once to derive the tangents the `eval_*` functions blend with.
//! Reading a track from a file runs `setup` automatically.

use crate::{
    math::{quat_exp, quat_from_axis_angle, quat_ln, quat_ln_dif, quat_squad, EPSILON},
    parsers::{
        chunk::{ChunkReader, ChunkWriter},
        ChunkParseError,
    },
};
use glam::{Quat, Vec3};
use std::{
    f32::consts::PI,
    io::{Seek, Write},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackType {
    Unknown,
    Bool,
    Float,
    Vector,
    Quat,
}

/// Shape parameters of a key. Only the parameters whose bit is set in `flags` are stored in the
/// file, the others are zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tcb {
    pub flags: u16,
    pub tension: f32,
    pub continuity: f32,
    pub bias: f32,
    pub ease_to: f32,
    pub ease_from: f32,
}

impl Tcb {
    pub const USE_TENSION: u16 = 0x0001;
    pub const USE_CONTINUITY: u16 = 0x0002;
    pub const USE_BIAS: u16 = 0x0004;
    pub const USE_EASE_TO: u16 = 0x0008;
    pub const USE_EASE_FROM: u16 = 0x0010;

    fn read(reader: &mut ChunkReader) -> Result<Tcb, ChunkParseError> {
        let mut tcb = Tcb {
            flags: reader.read::<u16>()?,
            ..Tcb::default()
        };
        if tcb.flags & Tcb::USE_TENSION != 0 {
            tcb.tension = reader.read::<f32>()?;
        }
        if tcb.flags & Tcb::USE_CONTINUITY != 0 {
            tcb.continuity = reader.read::<f32>()?;
        }
        if tcb.flags & Tcb::USE_BIAS != 0 {
            tcb.bias = reader.read::<f32>()?;
        }
        if tcb.flags & Tcb::USE_EASE_TO != 0 {
            tcb.ease_to = reader.read::<f32>()?;
        }
        if tcb.flags & Tcb::USE_EASE_FROM != 0 {
            tcb.ease_from = reader.read::<f32>()?;
        }
        Ok(tcb)
    }

    fn write<W: Write + Seek>(&self, writer: &mut ChunkWriter<W>) -> Result<(), ChunkParseError> {
        writer.write(self.flags)?;
        if self.flags & Tcb::USE_TENSION != 0 {
            writer.write(self.tension)?;
        }
        if self.flags & Tcb::USE_CONTINUITY != 0 {
            writer.write(self.continuity)?;
        }
        if self.flags & Tcb::USE_BIAS != 0 {
            writer.write(self.bias)?;
        }
        if self.flags & Tcb::USE_EASE_TO != 0 {
            writer.write(self.ease_to)?;
        }
        if self.flags & Tcb::USE_EASE_FROM != 0 {
            writer.write(self.ease_from)?;
        }
        Ok(())
    }
}

/// The stored value of a key. Rotation keys are relative to the previous key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyValue {
    Bool,
    Float(f32),
    Vector(Vec3),
    Quat { axis: Vec3, angle: f32 },
}

impl KeyValue {
    fn zero(kind: TrackType) -> KeyValue {
        match kind {
            TrackType::Unknown | TrackType::Bool => KeyValue::Bool,
            TrackType::Float => KeyValue::Float(0.0),
            TrackType::Vector => KeyValue::Vector(Vec3::ZERO),
            TrackType::Quat => KeyValue::Quat {
                axis: Vec3::ZERO,
                angle: 0.0,
            },
        }
    }
}

/// Values computed by `Track::setup`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tangents {
    None,
    Float { ds: f32, dd: f32 },
    Vector { ds: Vec3, dd: Vec3 },
    /// `quat` is the absolute orientation at the key, `a` and `b` the squad control points.
    Quat { quat: Quat, a: Quat, b: Quat },
}

#[derive(Debug, Clone, Copy)]
pub struct Key {
    pub frame: i32,
    pub tcb: Tcb,
    pub value: KeyValue,
    tangents: Tangents,
}

// Tangents are derived from the other fields and are ignored.
impl PartialEq for Key {
    fn eq(&self, other: &Key) -> bool {
        self.frame == other.frame && self.tcb == other.tcb && self.value == other.value
    }
}

impl Key {
    pub fn new(frame: i32, value: KeyValue) -> Key {
        Key {
            frame,
            tcb: Tcb::default(),
            value,
            tangents: Tangents::None,
        }
    }

    pub fn tangents(&self) -> Tangents {
        self.tangents
    }

    fn float_value(&self) -> f32 {
        match self.value {
            KeyValue::Float(v) => v,
            _ => 0.0,
        }
    }

    fn vector_value(&self) -> Vec3 {
        match self.value {
            KeyValue::Vector(v) => v,
            _ => Vec3::ZERO,
        }
    }

    fn axis_angle(&self) -> (Vec3, f32) {
        match self.value {
            KeyValue::Quat { axis, angle } => (axis, angle),
            _ => (Vec3::ZERO, 0.0),
        }
    }

    fn float_tangents(&self) -> (f32, f32) {
        match self.tangents {
            Tangents::Float { ds, dd } => (ds, dd),
            _ => (0.0, 0.0),
        }
    }

    fn vector_tangents(&self) -> (Vec3, Vec3) {
        match self.tangents {
            Tangents::Vector { ds, dd } => (ds, dd),
            _ => (Vec3::ZERO, Vec3::ZERO),
        }
    }

    /// Absolute orientation and control points. Before `setup` has run the key is treated as
    /// an isolated rotation.
    fn quat_tangents(&self) -> (Quat, Quat, Quat) {
        match self.tangents {
            Tangents::Quat { quat, a, b } => (quat, a, b),
            _ => {
                let (axis, angle) = self.axis_angle();
                let q = quat_from_axis_angle(axis, angle);
                (q, q, q)
            }
        }
    }
}

/// Blending weights of a key, derived from its TCB parameters and the spacing of its neighbours.
struct Weights {
    ksm: f32,
    ksp: f32,
    kdm: f32,
    kdp: f32,
}

/// `frames` holds the frames of the previous, current and next key when the key has both
/// neighbours. Wrapped neighbours can lie outside the `i32` range.
fn tcb_weights(cur: &Key, frames: Option<[i64; 3]>, rotation: bool) -> Weights {
    let mut fp = 1.0f32;
    let mut fn_ = 1.0f32;
    if let Some([prev, at, next]) = frames {
        let dt = 0.5 * (next - prev) as f64;
        fp = ((at - prev) as f64 / dt) as f32;
        fn_ = ((next - at) as f64 / dt) as f32;
        let c = cur.tcb.continuity.abs();
        fp = fp + c - c * fp;
        fn_ = fn_ + c - c * fn_;
    }

    let cm = 1.0 - cur.tcb.continuity;
    let tm = 0.5 * (1.0 - cur.tcb.tension);
    let cp = 2.0 - cm;
    let bm = 1.0 - cur.tcb.bias;
    let bp = 2.0 - bm;
    let tmcm = tm * cm;
    let tmcp = tm * cp;

    if rotation {
        Weights {
            ksm: 1.0 - tmcm * bp * fp,
            ksp: -tmcp * bm * fp,
            kdm: tmcp * bp * fn_,
            kdp: tmcm * bm * fn_ - 1.0,
        }
    } else {
        Weights {
            ksm: tmcm * bp * fp,
            ksp: tmcp * bm * fp,
            kdm: tmcp * bp * fn_,
            kdp: tmcm * bm * fn_,
        }
    }
}

fn float_key_setup(
    prev: Option<&Key>,
    cur: &Key,
    next: Option<&Key>,
    frames: Option<[i64; 3]>,
) -> Tangents {
    let w = tcb_weights(cur, frames, false);

    let value = cur.float_value();
    let mut delm = prev.map_or(0.0, |p| value - p.float_value());
    let mut delp = next.map_or(0.0, |n| n.float_value() - value);
    if prev.is_none() {
        delm = delp;
    }
    if next.is_none() {
        delp = delm;
    }

    Tangents::Float {
        ds: w.ksm * delm + w.ksp * delp,
        dd: w.kdm * delm + w.kdp * delp,
    }
}

fn vector_key_setup(
    prev: Option<&Key>,
    cur: &Key,
    next: Option<&Key>,
    frames: Option<[i64; 3]>,
) -> Tangents {
    let w = tcb_weights(cur, frames, false);

    let value = cur.vector_value();
    let mut delm = prev.map_or(Vec3::ZERO, |p| value - p.vector_value());
    let mut delp = next.map_or(Vec3::ZERO, |n| n.vector_value() - value);
    if prev.is_none() {
        delm = delp;
    }
    if next.is_none() {
        delp = delm;
    }

    Tangents::Vector {
        ds: w.ksm * delm + w.ksp * delp,
        dd: w.kdm * delm + w.kdp * delp,
    }
}

fn quat_key_setup(
    prev: Option<&Key>,
    cur: &Key,
    next: Option<&Key>,
    frames: Option<[i64; 3]>,
) -> Tangents {
    let (quat, _, _) = cur.quat_tangents();
    let (cur_axis, cur_angle) = cur.axis_angle();

    let qm = prev.map(|prev| {
        if cur_angle > 2.0 * PI - EPSILON {
            quat_ln(quat_from_axis_angle(cur_axis, 0.0))
        } else {
            let (mut q, _, _) = prev.quat_tangents();
            if q.dot(quat) < 0.0 {
                q = -q;
            }
            quat_ln_dif(q, quat)
        }
    });
    let qp = next.map(|next| {
        let (next_axis, next_angle) = next.axis_angle();
        if next_angle > 2.0 * PI - EPSILON {
            quat_ln(quat_from_axis_angle(next_axis, 0.0))
        } else {
            let (mut q, _, _) = next.quat_tangents();
            if q.dot(quat) < 0.0 {
                q = -q;
            }
            quat_ln_dif(quat, q)
        }
    });
    let (qm, qp) = match (qm, qp) {
        (Some(qm), Some(qp)) => (qm, qp),
        (Some(qm), None) => (qm, qm),
        (None, Some(qp)) => (qp, qp),
        (None, None) => (Quat::from_xyzw(0.0, 0.0, 0.0, 0.0), Quat::from_xyzw(0.0, 0.0, 0.0, 0.0)),
    };

    let w = tcb_weights(cur, frames, true);
    let qm = qm.to_array();
    let qp = qp.to_array();
    let mut qa = [0.0f32; 4];
    let mut qb = [0.0f32; 4];
    for i in 0..4 {
        qa[i] = 0.5 * (w.kdm * qm[i] + w.kdp * qp[i]);
        qb[i] = 0.5 * (w.ksm * qm[i] + w.ksp * qp[i]);
    }

    Tangents::Quat {
        quat,
        a: quat * quat_exp(Quat::from_array(qa)),
        b: quat * quat_exp(Quat::from_array(qb)),
    }
}

/// Hermite blend of `a` to `b` with the outgoing tangent `p` of `a` and the incoming tangent
/// `q` of `b`.
fn cubic(a: f32, p: f32, q: f32, b: f32, t: f32) -> f32 {
    let x = f64::from(2.0 * t * t * t - 3.0 * t * t + 1.0);
    let y = f64::from(-2.0 * t * t * t + 3.0 * t * t);
    let z = f64::from(t * t * t - 2.0 * t * t + t);
    let w = f64::from(t * t * t - t * t);
    (x * f64::from(a) + y * f64::from(b) + z * f64::from(p) + w * f64::from(q)) as f32
}

/// Where a time falls on a track.
enum Position {
    Before,
    After,
    /// Between `keys[index - 1]` and `keys[index]`, `u` is the fraction of that interval.
    Between { index: usize, u: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub flags: u16,
    kind: TrackType,
    pub keys: Vec<Key>,
}

impl Track {
    /// The track loops over its span when evaluated.
    pub const REPEAT: u16 = 0x0001;
    /// The tangents at both ends are computed as if the track looped.
    pub const SMOOTH: u16 = 0x0002;
    pub const LOCK_X: u16 = 0x0008;
    pub const LOCK_Y: u16 = 0x0010;
    pub const LOCK_Z: u16 = 0x0020;
    pub const UNLINK_X: u16 = 0x0100;
    pub const UNLINK_Y: u16 = 0x0200;
    pub const UNLINK_Z: u16 = 0x0400;

    pub fn new(kind: TrackType) -> Track {
        Track {
            flags: 0,
            kind,
            keys: Vec::new(),
        }
    }

    pub fn kind(&self) -> TrackType {
        self.kind
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Sets the number of keys. New keys are zeroed. Does nothing on an untyped track.
    pub fn resize(&mut self, n: usize) {
        if self.kind == TrackType::Unknown || self.keys.len() == n {
            return;
        }
        let zero = Key::new(0, KeyValue::zero(self.kind));
        self.keys.resize(n, zero);
    }

    /// Computes the tangents of every key. Rotation keys are accumulated into absolute
    /// orientations first.
    pub fn setup(&mut self) {
        if self.kind == TrackType::Quat {
            let mut prev: Option<Quat> = None;
            for key in &mut self.keys {
                let (axis, angle) = key.axis_angle();
                let q = quat_from_axis_angle(axis, angle);
                let quat = match prev {
                    Some(p) => q * p,
                    None => q,
                };
                key.tangents = Tangents::Quat {
                    quat,
                    a: quat,
                    b: quat,
                };
                prev = Some(quat);
            }
        }

        let n = self.keys.len();
        if n <= 1 {
            return;
        }

        let smooth = self.flags & Track::SMOOTH != 0;
        let span = i64::from(self.keys[n - 1].frame) - i64::from(self.keys[0].frame);
        for i in 0..n {
            // wrapped neighbours are shifted by the span
            let prev = if i > 0 {
                Some((self.keys[i - 1], 0))
            } else if smooth {
                Some((self.keys[n - 2], -span))
            } else {
                None
            };
            let next = if i < n - 1 {
                Some((self.keys[i + 1], 0))
            } else if smooth {
                Some((self.keys[1], span))
            } else {
                None
            };

            let cur = &self.keys[i];
            let frames = match (&prev, &next) {
                (Some((p, dp)), Some((q, dq))) => Some([
                    i64::from(p.frame) + dp,
                    i64::from(cur.frame),
                    i64::from(q.frame) + dq,
                ]),
                _ => None,
            };
            let prev = prev.as_ref().map(|(key, _)| key);
            let next = next.as_ref().map(|(key, _)| key);
            let tangents = match self.kind {
                TrackType::Float => float_key_setup(prev, cur, next, frames),
                TrackType::Vector => vector_key_setup(prev, cur, next, frames),
                TrackType::Quat => quat_key_setup(prev, cur, next, frames),
                TrackType::Bool | TrackType::Unknown => continue,
            };
            self.keys[i].tangents = tangents;
        }
    }

    fn position(&self, t: f32) -> Position {
        let n = self.keys.len();
        let t0 = self.keys[0].frame;
        let t1 = self.keys[n - 1].frame;

        let nt = if self.flags & Track::REPEAT != 0 && t1 != t0 {
            ((f64::from(t) - f64::from(t0)) % (f64::from(t1) - f64::from(t0)) + f64::from(t0)) as f32
        } else {
            t
        };

        if nt <= t0 as f32 {
            return Position::Before;
        }
        if nt >= t1 as f32 {
            return Position::After;
        }

        match (1..n).find(|&i| nt < self.keys[i].frame as f32) {
            Some(index) => {
                let f0 = self.keys[index - 1].frame;
                let f1 = self.keys[index].frame;
                let u = ((f64::from(nt) - f64::from(f0)) / (f64::from(f1) - f64::from(f0))) as f32;
                Position::Between { index, u }
            }
            // NaN
            None => Position::After,
        }
    }

    /// Hidden tracks toggle at every key: false before the first key, then alternating.
    pub fn eval_bool(&self, t: f32) -> bool {
        if self.keys.is_empty() {
            return false;
        }
        match self.position(t) {
            Position::Before => false,
            Position::After => self.keys.len() % 2 == 0,
            Position::Between { index, .. } => index % 2 == 0,
        }
    }

    pub fn eval_float(&self, t: f32) -> f32 {
        if self.keys.is_empty() {
            return 0.0;
        }
        match self.position(t) {
            Position::Before => self.keys[0].float_value(),
            Position::After => self.keys[self.keys.len() - 1].float_value(),
            Position::Between { index, u } => {
                let k0 = &self.keys[index - 1];
                let k1 = &self.keys[index];
                let (_, dd) = k0.float_tangents();
                let (ds, _) = k1.float_tangents();
                cubic(k0.float_value(), dd, ds, k1.float_value(), u)
            }
        }
    }

    pub fn eval_vector(&self, t: f32) -> Vec3 {
        if self.keys.is_empty() {
            return Vec3::ZERO;
        }
        match self.position(t) {
            Position::Before => self.keys[0].vector_value(),
            Position::After => self.keys[self.keys.len() - 1].vector_value(),
            Position::Between { index, u } => {
                let k0 = &self.keys[index - 1];
                let k1 = &self.keys[index];
                let (a, b) = (k0.vector_value(), k1.vector_value());
                let (_, dd) = k0.vector_tangents();
                let (ds, _) = k1.vector_tangents();
                Vec3::new(
                    cubic(a.x, dd.x, ds.x, b.x, u),
                    cubic(a.y, dd.y, ds.y, b.y, u),
                    cubic(a.z, dd.z, ds.z, b.z, u),
                )
            }
        }
    }

    pub fn eval_quat(&self, t: f32) -> Quat {
        if self.keys.is_empty() {
            return Quat::IDENTITY;
        }
        match self.position(t) {
            Position::Before => self.keys[0].quat_tangents().0,
            Position::After => self.keys[self.keys.len() - 1].quat_tangents().0,
            Position::Between { index, u } => {
                let (q0, a0, _) = self.keys[index - 1].quat_tangents();
                let (q1, _, b1) = self.keys[index].quat_tangents();
                quat_squad(q0, a0, b1, q1, u)
            }
        }
    }

    /// Reads the payload of a track chunk. The keys replace the current ones.
    pub(crate) fn read(&mut self, reader: &mut ChunkReader) -> Result<(), ChunkParseError> {
        self.flags = reader.read::<u16>()?;
        reader.read::<u32>()?;
        reader.read::<u32>()?;
        let nkeys = reader.read::<i32>()?.max(0) as usize;

        // Grows key by key, a corrupt count fails on the first short read.
        self.keys.clear();
        for _ in 0..nkeys {
            let frame = reader.read::<i32>()?;
            let tcb = Tcb::read(reader)?;
            let value = match self.kind {
                TrackType::Unknown | TrackType::Bool => KeyValue::Bool,
                TrackType::Float => KeyValue::Float(reader.read::<f32>()?),
                TrackType::Vector => KeyValue::Vector(reader.read_vector()?),
                TrackType::Quat => {
                    let angle = reader.read::<f32>()?;
                    let axis = reader.read_vector()?;
                    KeyValue::Quat { axis, angle }
                }
            };
            self.keys.push(Key {
                frame,
                tcb,
                value,
                tangents: Tangents::None,
            });
        }

        self.setup();
        Ok(())
    }

    pub(crate) fn write<W: Write + Seek>(
        &self,
        writer: &mut ChunkWriter<W>,
    ) -> Result<(), ChunkParseError> {
        writer.write(self.flags)?;
        writer.write(0u32)?;
        writer.write(0u32)?;
        writer.write(self.keys.len() as i32)?;

        for key in &self.keys {
            writer.write(key.frame)?;
            key.tcb.write(writer)?;
            match self.kind {
                TrackType::Unknown | TrackType::Bool => {}
                TrackType::Float => writer.write(key.float_value())?,
                TrackType::Vector => writer.write_vector(key.vector_value())?,
                TrackType::Quat => {
                    let (axis, angle) = key.axis_angle();
                    writer.write(angle)?;
                    writer.write_vector(axis)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::quat_inv;
    use proptest::prelude::*;
    use std::io::Cursor;

    fn float_track(keys: &[(i32, f32)]) -> Track {
        let mut track = Track::new(TrackType::Float);
        track.keys = keys
            .iter()
            .map(|&(frame, v)| Key::new(frame, KeyValue::Float(v)))
            .collect();
        track.setup();
        track
    }

    fn bool_track(frames: &[i32]) -> Track {
        let mut track = Track::new(TrackType::Bool);
        track.keys = frames.iter().map(|&f| Key::new(f, KeyValue::Bool)).collect();
        track
    }

    fn close(a: Quat, b: Quat) -> bool {
        (a.x - b.x).abs() < 1e-5
            && (a.y - b.y).abs() < 1e-5
            && (a.z - b.z).abs() < 1e-5
            && (a.w - b.w).abs() < 1e-5
    }

    #[test]
    fn test_empty_tracks() {
        assert_eq!(Track::new(TrackType::Float).eval_float(3.0), 0.0);
        assert_eq!(Track::new(TrackType::Vector).eval_vector(3.0), Vec3::ZERO);
        assert_eq!(Track::new(TrackType::Quat).eval_quat(3.0), Quat::IDENTITY);
        assert!(!Track::new(TrackType::Bool).eval_bool(3.0));
    }

    #[test]
    fn test_resize() {
        let mut track = Track::new(TrackType::Vector);
        track.resize(3);
        assert_eq!(track.keys.len(), 3);
        assert_eq!(track.keys[2].value, KeyValue::Vector(Vec3::ZERO));
        track.keys[0].frame = 7;
        track.resize(1);
        assert_eq!(track.keys[0].frame, 7);

        let mut untyped = Track::new(TrackType::Unknown);
        untyped.resize(4);
        assert!(untyped.is_empty());
    }

    #[test]
    fn test_linear_tangents() {
        let track = float_track(&[(0, 0.0), (10, 10.0), (20, 20.0)]);
        for key in &track.keys {
            assert_eq!(key.tangents(), Tangents::Float { ds: 10.0, dd: 10.0 });
        }
        assert!((track.eval_float(5.0) - 5.0).abs() < 1e-5);
        assert!((track.eval_float(15.0) - 15.0).abs() < 1e-5);
    }

    #[test]
    fn test_smooth_wraps_neighbours() {
        let mut track = float_track(&[(0, 0.0), (10, 10.0), (20, 0.0)]);
        assert_eq!(track.keys[0].tangents(), Tangents::Float { ds: 10.0, dd: 10.0 });

        track.flags |= Track::SMOOTH;
        track.setup();
        assert_eq!(track.keys[0].tangents(), Tangents::Float { ds: 0.0, dd: 0.0 });
        assert_eq!(track.keys[2].tangents(), Tangents::Float { ds: 0.0, dd: 0.0 });
    }

    #[test]
    fn test_repeat() {
        let mut track = float_track(&[(0, 0.0), (10, 10.0)]);
        track.flags |= Track::REPEAT;
        assert!((track.eval_float(15.0) - track.eval_float(5.0)).abs() < 1e-5);
        assert!((track.eval_float(25.0) - track.eval_float(5.0)).abs() < 1e-5);

        let mut single = float_track(&[(4, 2.5)]);
        single.flags |= Track::REPEAT;
        assert_eq!(single.eval_float(100.0), 2.5);
    }

    #[test]
    fn test_bool_parity() {
        let odd = bool_track(&[0, 10, 20]);
        assert!(!odd.eval_bool(-1.0));
        assert!(!odd.eval_bool(5.0));
        assert!(odd.eval_bool(15.0));
        assert!(!odd.eval_bool(25.0));

        let even = bool_track(&[0, 10, 20, 30]);
        assert!(even.eval_bool(35.0));
    }

    #[test]
    fn test_quat_accumulates_and_interpolates() {
        let mut track = Track::new(TrackType::Quat);
        track.keys = vec![
            Key::new(
                0,
                KeyValue::Quat {
                    axis: Vec3::Z,
                    angle: 0.0,
                },
            ),
            Key::new(
                10,
                KeyValue::Quat {
                    axis: Vec3::Z,
                    angle: PI / 4.0,
                },
            ),
            Key::new(
                20,
                KeyValue::Quat {
                    axis: Vec3::Z,
                    angle: PI / 4.0,
                },
            ),
        ];
        track.setup();

        let half = quat_from_axis_angle(Vec3::Z, PI / 2.0);
        assert!(close(track.eval_quat(20.0), half));
        assert!(close(track.eval_quat(25.0), half));
        assert!(close(track.eval_quat(-3.0), Quat::IDENTITY));

        let mut two = track.clone();
        two.keys.truncate(2);
        two.setup();
        let mid = quat_from_axis_angle(Vec3::Z, PI / 8.0);
        assert!(close(two.eval_quat(5.0), mid));
    }

    fn quat_track(keys: &[(i32, f32)], flags: u16) -> Track {
        let mut track = Track::new(TrackType::Quat);
        track.flags = flags;
        track.keys = keys
            .iter()
            .map(|&(frame, angle)| Key::new(frame, KeyValue::Quat { axis: Vec3::Z, angle }))
            .collect();
        track.setup();
        track
    }

    /// Control points of a key relative to its own orientation.
    fn local_controls(key: &Key) -> (Quat, Quat) {
        match key.tangents() {
            Tangents::Quat { quat, a, b } => (quat_inv(quat) * a, quat_inv(quat) * b),
            other => panic!("expected rotation tangents, got {:?}", other),
        }
    }

    #[test]
    fn test_smooth_quat_closes_the_loop() {
        // a full turn in quarter steps, the last interval twice as long
        let keys = [(0, 0.0), (10, PI / 2.0), (20, PI / 2.0), (30, PI / 2.0), (50, PI / 2.0)];
        let smooth = quat_track(&keys, Track::SMOOTH);
        let plain = quat_track(&keys, 0);

        let (a_first, b_first) = local_controls(&smooth.keys[0]);
        let (a_last, b_last) = local_controls(&smooth.keys[4]);
        assert!(close(a_first, a_last) || close(a_first, -a_last));
        assert!(close(b_first, b_last) || close(b_first, -b_last));

        let (a_open, _) = local_controls(&plain.keys[0]);
        assert!(!close(a_first, a_open) && !close(a_first, -a_open));
    }

    #[test]
    fn test_full_turn_key() {
        let track = quat_track(&[(0, PI / 2.0), (10, 2.0 * PI), (20, 0.0)], 0);

        let (a, b) = local_controls(&track.keys[1]);
        assert!(close(a, Quat::IDENTITY) || close(a, -Quat::IDENTITY));
        assert!(close(b, Quat::IDENTITY) || close(b, -Quat::IDENTITY));

        let quarter = quat_from_axis_angle(Vec3::Z, PI / 2.0);
        for &t in &[5.0, 15.0] {
            let q = track.eval_quat(t);
            assert!(close(q, quarter) || close(q, -quarter));
        }
    }

    #[test]
    fn test_repeat_quat() {
        let track = quat_track(&[(0, 0.0), (10, PI / 2.0)], Track::REPEAT);
        let at = track.eval_quat(5.0);
        assert!(close(track.eval_quat(15.0), at));
        assert!(close(track.eval_quat(25.0), at));
        assert!(!close(at, Quat::IDENTITY));
    }

    #[test]
    fn test_extreme_frames() {
        let mut track = float_track(&[(i32::MIN, 0.0), (i32::MAX, 10.0)]);
        track.flags = Track::SMOOTH | Track::REPEAT;

        let mut w = ChunkWriter::new(Cursor::new(Vec::new()));
        track.write(&mut w).unwrap();
        let data = w.into_inner().into_inner();

        let mut read = Track::new(TrackType::Float);
        read.read(&mut ChunkReader::new(&data)).unwrap();
        assert_eq!(read, track);
        for key in &read.keys {
            match key.tangents() {
                Tangents::Float { ds, dd } => assert!(ds.is_finite() && dd.is_finite()),
                other => panic!("expected float tangents, got {:?}", other),
            }
        }
        assert_eq!(read.eval_float(i32::MIN as f32), 0.0);
        assert!(read.eval_float(0.0).is_finite());
    }

    #[test]
    fn test_only_flagged_tcb_fields_are_stored() {
        let mut track = float_track(&[(0, 1.0)]);
        track.keys[0].tcb.flags = Tcb::USE_TENSION;
        track.keys[0].tcb.tension = 0.5;

        let mut w = ChunkWriter::new(Cursor::new(Vec::new()));
        track.write(&mut w).unwrap();
        let data = w.into_inner().into_inner();
        // header, frame, tcb flags, tension, value
        assert_eq!(data.len(), 14 + 4 + 2 + 4 + 4);

        let mut read = Track::new(TrackType::Float);
        read.read(&mut ChunkReader::new(&data)).unwrap();
        assert_eq!(read, track);
        assert_eq!(read.keys[0].tcb.tension, 0.5);
    }

    #[test]
    fn test_truncated_track() {
        let data = [0u8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xFF, 0xFF, 0, 0];
        let mut track = Track::new(TrackType::Vector);
        assert!(matches!(
            track.read(&mut ChunkReader::new(&data)),
            Err(ChunkParseError::NotEnoughData)
        ));
    }

    fn keys_strategy() -> impl Strategy<Value = Vec<(i32, f32, f32, f32)>> {
        prop::collection::vec(
            (1i32..20, -100.0f32..100.0, -1.0f32..1.0, -1.0f32..1.0),
            1..8,
        )
    }

    fn build(keys: &[(i32, f32, f32, f32)], kind: TrackType) -> Track {
        let mut track = Track::new(kind);
        let mut frame = 0;
        for &(step, v, tension, bias) in keys {
            frame += step;
            let value = match kind {
                TrackType::Vector => KeyValue::Vector(Vec3::new(v, -v, 0.5 * v)),
                _ => KeyValue::Float(v),
            };
            let mut key = Key::new(frame, value);
            key.tcb.flags = Tcb::USE_TENSION | Tcb::USE_BIAS;
            key.tcb.tension = tension;
            key.tcb.bias = bias;
            track.keys.push(key);
        }
        track.setup();
        track
    }

    proptest! {
        #[test]
        fn prop_float_boundaries(keys in keys_strategy(), before in 0.0f32..1000.0, after in 0.0f32..1000.0) {
            let track = build(&keys, TrackType::Float);
            let first = track.keys[0];
            let last = track.keys[track.keys.len() - 1];
            prop_assert_eq!(KeyValue::Float(track.eval_float(first.frame as f32 - before)), first.value);
            prop_assert_eq!(KeyValue::Float(track.eval_float(last.frame as f32 + after)), last.value);
        }

        #[test]
        fn prop_vector_boundaries(keys in keys_strategy(), before in 0.0f32..1000.0, after in 0.0f32..1000.0) {
            let track = build(&keys, TrackType::Vector);
            let first = track.keys[0];
            let last = track.keys[track.keys.len() - 1];
            prop_assert_eq!(KeyValue::Vector(track.eval_vector(first.frame as f32 - before)), first.value);
            prop_assert_eq!(KeyValue::Vector(track.eval_vector(last.frame as f32 + after)), last.value);
        }
    }
}
