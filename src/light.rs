use crate::{
    math::EPSILON,
    parsers::{
        chunk::{ChunkReader, ChunkWriter},
        ids, ChunkParseError,
    },
};
use glam::Vec3;
use log::debug;
use std::io::{Seek, Write};

/// An omni light, or a spotlight when `spot_light` is set. The `spot_*`, shadow and projector
/// fields only apply to spotlights.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub name: String,
    /// `OBJ_*` flags of the named object, see `file::object_flags`.
    pub object_flags: u32,
    pub spot_light: bool,
    pub see_cone: bool,
    pub color: Vec3,
    pub position: Vec3,
    pub target: Vec3,
    pub roll: f32,
    pub off: bool,
    pub outer_range: f32,
    pub inner_range: f32,
    pub multiplier: f32,
    pub attenuation: f32,
    pub rectangular_spot: bool,
    pub shadowed: bool,
    pub shadow_bias: f32,
    pub shadow_filter: f32,
    pub shadow_size: i16,
    pub spot_aspect: f32,
    pub use_projector: bool,
    pub projector: String,
    pub spot_overshoot: bool,
    pub ray_shadows: bool,
    pub ray_bias: f32,
    /// Hotspot and falloff cone angles in degrees.
    pub hotspot: f32,
    pub falloff: f32,
}

impl Light {
    pub fn new(name: &str) -> Light {
        Light {
            name: name.to_string(),
            object_flags: 0,
            spot_light: false,
            see_cone: false,
            color: Vec3::ZERO,
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            roll: 0.0,
            off: false,
            outer_range: 0.0,
            inner_range: 0.0,
            multiplier: 0.0,
            attenuation: 0.0,
            rectangular_spot: false,
            shadowed: false,
            shadow_bias: 0.0,
            shadow_filter: 0.0,
            shadow_size: 0,
            spot_aspect: 0.0,
            use_projector: false,
            projector: String::new(),
            spot_overshoot: false,
            ray_shadows: false,
            ray_bias: 0.0,
            hotspot: 0.0,
            falloff: 0.0,
        }
    }

    /// Reads an `N_DIRECT_LIGHT` chunk starting at its header.
    pub(crate) fn read(reader: &mut ChunkReader, name: &str) -> Result<Light, ChunkParseError> {
        let mut chunk = reader.begin_read(Some(ids::N_DIRECT_LIGHT))?;
        let mut light = Light::new(name);
        debug!("light: {}", name);

        light.position = reader.read_vector()?;
        reader.read_tell(&mut chunk);

        while let Some((id, size)) = reader.next_child(&mut chunk)? {
            match id {
                ids::COLOR_F => light.color = reader.read_vector()?,
                ids::DL_OFF => light.off = true,
                ids::DL_OUTER_RANGE => light.outer_range = reader.read::<f32>()?,
                ids::DL_INNER_RANGE => light.inner_range = reader.read::<f32>()?,
                ids::DL_MULTIPLIER => light.multiplier = reader.read::<f32>()?,
                // Older writers store the attenuation as a bare switch.
                ids::DL_ATTENUATE => {
                    light.attenuation = if size >= 10 {
                        reader.read::<f32>()?
                    } else {
                        1.0
                    }
                }
                ids::DL_SPOTLIGHT => {
                    reader.reset_to_header();
                    light.read_spotlight(reader)?;
                }
                _ => reader.unknown(id),
            }
        }

        reader.end_read(&chunk);
        Ok(light)
    }

    fn read_spotlight(&mut self, reader: &mut ChunkReader) -> Result<(), ChunkParseError> {
        let mut chunk = reader.begin_read(Some(ids::DL_SPOTLIGHT))?;
        self.spot_light = true;
        self.target = reader.read_vector()?;
        self.hotspot = reader.read::<f32>()?;
        self.falloff = reader.read::<f32>()?;
        reader.read_tell(&mut chunk);

        while let Some((id, _)) = reader.next_child(&mut chunk)? {
            match id {
                ids::DL_SPOT_ROLL => self.roll = reader.read::<f32>()?,
                ids::DL_SHADOWED => self.shadowed = true,
                ids::DL_LOCAL_SHADOW2 => {
                    self.shadow_bias = reader.read::<f32>()?;
                    self.shadow_filter = reader.read::<f32>()?;
                    self.shadow_size = reader.read::<i16>()?;
                }
                ids::DL_SEE_CONE => self.see_cone = true,
                ids::DL_SPOT_RECTANGULAR => self.rectangular_spot = true,
                ids::DL_SPOT_ASPECT => self.spot_aspect = reader.read::<f32>()?,
                ids::DL_SPOT_PROJECTOR => {
                    self.use_projector = true;
                    self.projector = reader.read_name()?;
                }
                ids::DL_SPOT_OVERSHOOT => self.spot_overshoot = true,
                ids::DL_RAY_BIAS => self.ray_bias = reader.read::<f32>()?,
                ids::DL_RAYSHAD => self.ray_shadows = true,
                _ => reader.unknown(id),
            }
        }

        reader.end_read(&chunk);
        Ok(())
    }

    pub(crate) fn write<W: Write + Seek>(
        &self,
        writer: &mut ChunkWriter<W>,
    ) -> Result<(), ChunkParseError> {
        let mark = writer.begin_write(ids::N_DIRECT_LIGHT)?;
        writer.write_vector(self.position)?;

        writer.write_header(ids::COLOR_F, 18)?;
        writer.write_vector(self.color)?;
        if self.off {
            writer.write_switch(ids::DL_OFF)?;
        }
        writer.write_header(ids::DL_OUTER_RANGE, 10)?;
        writer.write(self.outer_range)?;
        writer.write_header(ids::DL_INNER_RANGE, 10)?;
        writer.write(self.inner_range)?;
        writer.write_header(ids::DL_MULTIPLIER, 10)?;
        writer.write(self.multiplier)?;
        if self.attenuation.abs() > EPSILON {
            writer.write_header(ids::DL_ATTENUATE, 10)?;
            writer.write(self.attenuation)?;
        }

        if self.spot_light {
            self.write_spotlight(writer)?;
        }

        writer.end_write(mark)
    }

    fn write_spotlight<W: Write + Seek>(
        &self,
        writer: &mut ChunkWriter<W>,
    ) -> Result<(), ChunkParseError> {
        let mark = writer.begin_write(ids::DL_SPOTLIGHT)?;
        writer.write_vector(self.target)?;
        writer.write(self.hotspot)?;
        writer.write(self.falloff)?;

        writer.write_header(ids::DL_SPOT_ROLL, 10)?;
        writer.write(self.roll)?;
        if self.shadowed {
            writer.write_switch(ids::DL_SHADOWED)?;
        }
        if self.shadow_bias.abs() > EPSILON
            || self.shadow_filter.abs() > EPSILON
            || self.shadow_size != 0
        {
            writer.write_header(ids::DL_LOCAL_SHADOW2, 16)?;
            writer.write(self.shadow_bias)?;
            writer.write(self.shadow_filter)?;
            writer.write(self.shadow_size)?;
        }
        if self.see_cone {
            writer.write_switch(ids::DL_SEE_CONE)?;
        }
        if self.rectangular_spot {
            writer.write_switch(ids::DL_SPOT_RECTANGULAR)?;
        }
        if self.spot_aspect.abs() > EPSILON {
            writer.write_header(ids::DL_SPOT_ASPECT, 10)?;
            writer.write(self.spot_aspect)?;
        }
        if self.use_projector {
            let projector = writer.begin_write(ids::DL_SPOT_PROJECTOR)?;
            writer.write_name(&self.projector)?;
            writer.end_write(projector)?;
        }
        if self.spot_overshoot {
            writer.write_switch(ids::DL_SPOT_OVERSHOOT)?;
        }
        if self.ray_bias.abs() > EPSILON {
            writer.write_header(ids::DL_RAY_BIAS, 10)?;
            writer.write(self.ray_bias)?;
        }
        if self.ray_shadows {
            writer.write_switch(ids::DL_RAYSHAD)?;
        }

        writer.end_write(mark)
    }
}
