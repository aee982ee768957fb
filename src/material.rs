use crate::parsers::{
    chunk::{ChunkReader, ChunkWriter},
    ids, ChunkParseError,
};
use glam::Vec3;
use log::debug;
use std::io::{Seek, Write};

/// A bitmap applied to one channel of a material.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureMap {
    /// Bitmap file name. Maps with an empty name are not written.
    pub name: String,
    pub flags: u16,
    pub percent: f32,
    pub blur: f32,
    pub scale: [f32; 2],
    pub offset: [f32; 2],
    pub rotation: f32,
    pub tint_1: Vec3,
    pub tint_2: Vec3,
    pub tint_r: Vec3,
    pub tint_g: Vec3,
    pub tint_b: Vec3,
}

impl TextureMap {
    pub const DECALE: u16 = 0x0001;
    pub const MIRROR: u16 = 0x0002;
    pub const NEGATE: u16 = 0x0008;
    pub const NO_TILE: u16 = 0x0010;
    pub const SUMMED_AREA: u16 = 0x0020;
    pub const ALPHA_SOURCE: u16 = 0x0040;
    pub const TINT: u16 = 0x0080;
    pub const IGNORE_ALPHA: u16 = 0x0100;
    pub const RGB_TINT: u16 = 0x0200;

    fn read(&mut self, reader: &mut ChunkReader) -> Result<(), ChunkParseError> {
        let mut chunk = reader.begin_read(None)?;

        while let Some((id, _)) = reader.next_child(&mut chunk)? {
            match id {
                ids::INT_PERCENTAGE => self.percent = f32::from(reader.read::<i16>()?) / 100.0,
                ids::FLOAT_PERCENTAGE => self.percent = reader.read::<f32>()?,
                ids::MAT_MAPNAME => self.name = reader.read_name()?,
                ids::MAT_MAP_TILING => self.flags = reader.read::<u16>()?,
                ids::MAT_MAP_TEXBLUR => self.blur = reader.read::<f32>()?,
                ids::MAT_MAP_USCALE => self.scale[0] = reader.read::<f32>()?,
                ids::MAT_MAP_VSCALE => self.scale[1] = reader.read::<f32>()?,
                ids::MAT_MAP_UOFFSET => self.offset[0] = reader.read::<f32>()?,
                ids::MAT_MAP_VOFFSET => self.offset[1] = reader.read::<f32>()?,
                ids::MAT_MAP_ANG => self.rotation = reader.read::<f32>()?,
                ids::MAT_MAP_COL1 => self.tint_1 = reader.read_color_24()?,
                ids::MAT_MAP_COL2 => self.tint_2 = reader.read_color_24()?,
                ids::MAT_MAP_RCOL => self.tint_r = reader.read_color_24()?,
                ids::MAT_MAP_GCOL => self.tint_g = reader.read_color_24()?,
                ids::MAT_MAP_BCOL => self.tint_b = reader.read_color_24()?,
                _ => reader.unknown(id),
            }
        }

        reader.end_read(&chunk);
        Ok(())
    }

    fn write<W: Write + Seek>(
        &self,
        id: u16,
        writer: &mut ChunkWriter<W>,
    ) -> Result<(), ChunkParseError> {
        if self.name.is_empty() {
            return Ok(());
        }

        let mark = writer.begin_write(id)?;
        writer.write_header(ids::INT_PERCENTAGE, 8)?;
        writer.write((100.0 * self.percent + 0.5).floor() as i16)?;

        let name = writer.begin_write(ids::MAT_MAPNAME)?;
        writer.write_name(&self.name)?;
        writer.end_write(name)?;

        writer.write_header(ids::MAT_MAP_TILING, 8)?;
        writer.write(self.flags)?;

        for &(id, value) in &[
            (ids::MAT_MAP_TEXBLUR, self.blur),
            (ids::MAT_MAP_USCALE, self.scale[0]),
            (ids::MAT_MAP_VSCALE, self.scale[1]),
            (ids::MAT_MAP_UOFFSET, self.offset[0]),
            (ids::MAT_MAP_VOFFSET, self.offset[1]),
            (ids::MAT_MAP_ANG, self.rotation),
        ] {
            writer.write_header(id, 10)?;
            writer.write(value)?;
        }

        for &(id, tint) in &[
            (ids::MAT_MAP_COL1, self.tint_1),
            (ids::MAT_MAP_COL2, self.tint_2),
            (ids::MAT_MAP_RCOL, self.tint_r),
            (ids::MAT_MAP_GCOL, self.tint_g),
            (ids::MAT_MAP_BCOL, self.tint_b),
        ] {
            writer.write_header(id, 9)?;
            writer.write_color_24(tint)?;
        }

        writer.end_write(mark)
    }
}

impl Default for TextureMap {
    fn default() -> Self {
        TextureMap {
            name: String::new(),
            flags: TextureMap::NO_TILE,
            percent: 1.0,
            blur: 0.0,
            scale: [1.0, 1.0],
            offset: [0.0, 0.0],
            rotation: 0.0,
            tint_1: Vec3::ZERO,
            tint_2: Vec3::ZERO,
            tint_r: Vec3::ZERO,
            tint_g: Vec3::ZERO,
            tint_b: Vec3::ZERO,
        }
    }
}

/// Automatic cubic reflection map settings.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AutoReflMap {
    pub flags: u16,
    pub level: i8,
    pub size: i32,
    pub frame_step: i32,
}

impl AutoReflMap {
    pub const USE_REFL_MAP: u16 = 0x0001;
    pub const READ_FIRST_FRAME_ONLY: u16 = 0x0004;
    pub const FLAT_MIRROR: u16 = 0x0008;
}

/// Shading model of a material.
pub mod shading {
    pub const WIRE_FRAME: i16 = 0;
    pub const FLAT: i16 = 1;
    pub const GOURAUD: i16 = 2;
    pub const PHONG: i16 = 3;
    pub const METAL: i16 = 4;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
    pub shin_strength: f32,
    pub use_blur: bool,
    pub blur: f32,
    pub transparency: f32,
    pub falloff: f32,
    pub additive: bool,
    pub self_ilpct: f32,
    pub use_falloff: bool,
    pub self_illum: bool,
    pub shading: i16,
    pub soften: bool,
    pub face_map: bool,
    pub two_sided: bool,
    pub map_decal: bool,
    pub use_wire: bool,
    pub use_wire_abs: bool,
    pub wire_size: f32,
    pub texture1_map: TextureMap,
    pub texture1_mask: TextureMap,
    pub texture2_map: TextureMap,
    pub texture2_mask: TextureMap,
    pub opacity_map: TextureMap,
    pub opacity_mask: TextureMap,
    pub bump_map: TextureMap,
    pub bump_mask: TextureMap,
    pub specular_map: TextureMap,
    pub specular_mask: TextureMap,
    pub shininess_map: TextureMap,
    pub shininess_mask: TextureMap,
    pub self_illum_map: TextureMap,
    pub self_illum_mask: TextureMap,
    pub reflection_map: TextureMap,
    pub reflection_mask: TextureMap,
    pub autorefl_map: AutoReflMap,
}

impl Material {
    pub fn new(name: &str) -> Material {
        Material {
            name: name.to_string(),
            ambient: Vec3::splat(150.0 / 255.0),
            diffuse: Vec3::splat(150.0 / 255.0),
            specular: Vec3::splat(229.0 / 255.0),
            shininess: 0.1,
            shin_strength: 0.0,
            use_blur: false,
            blur: 0.0,
            transparency: 0.0,
            falloff: 0.0,
            additive: false,
            self_ilpct: 0.0,
            use_falloff: false,
            self_illum: false,
            shading: shading::PHONG,
            soften: false,
            face_map: false,
            two_sided: false,
            map_decal: false,
            use_wire: false,
            use_wire_abs: false,
            wire_size: 1.0,
            texture1_map: TextureMap::default(),
            texture1_mask: TextureMap::default(),
            texture2_map: TextureMap::default(),
            texture2_mask: TextureMap::default(),
            opacity_map: TextureMap::default(),
            opacity_mask: TextureMap::default(),
            bump_map: TextureMap::default(),
            bump_mask: TextureMap::default(),
            specular_map: TextureMap::default(),
            specular_mask: TextureMap::default(),
            shininess_map: TextureMap::default(),
            shininess_mask: TextureMap::default(),
            self_illum_map: TextureMap::default(),
            self_illum_mask: TextureMap::default(),
            reflection_map: TextureMap::default(),
            reflection_mask: TextureMap::default(),
            autorefl_map: AutoReflMap::default(),
        }
    }

    fn map_mut(&mut self, id: u16) -> Option<&mut TextureMap> {
        Some(match id {
            ids::MAT_TEXMAP => &mut self.texture1_map,
            ids::MAT_TEXMASK => &mut self.texture1_mask,
            ids::MAT_TEX2MAP => &mut self.texture2_map,
            ids::MAT_TEX2MASK => &mut self.texture2_mask,
            ids::MAT_OPACMAP => &mut self.opacity_map,
            ids::MAT_OPACMASK => &mut self.opacity_mask,
            ids::MAT_BUMPMAP => &mut self.bump_map,
            ids::MAT_BUMPMASK => &mut self.bump_mask,
            ids::MAT_SPECMAP => &mut self.specular_map,
            ids::MAT_SPECMASK => &mut self.specular_mask,
            ids::MAT_SHINMAP => &mut self.shininess_map,
            ids::MAT_SHINMASK => &mut self.shininess_mask,
            ids::MAT_SELFIMAP => &mut self.self_illum_map,
            ids::MAT_SELFIMASK => &mut self.self_illum_mask,
            ids::MAT_REFLMAP => &mut self.reflection_map,
            ids::MAT_REFLMASK => &mut self.reflection_mask,
            _ => return None,
        })
    }

    /// Texture maps in the order they are written.
    fn maps(&self) -> [(u16, &TextureMap); 16] {
        [
            (ids::MAT_TEXMAP, &self.texture1_map),
            (ids::MAT_TEXMASK, &self.texture1_mask),
            (ids::MAT_TEX2MAP, &self.texture2_map),
            (ids::MAT_TEX2MASK, &self.texture2_mask),
            (ids::MAT_OPACMAP, &self.opacity_map),
            (ids::MAT_OPACMASK, &self.opacity_mask),
            (ids::MAT_BUMPMAP, &self.bump_map),
            (ids::MAT_BUMPMASK, &self.bump_mask),
            (ids::MAT_SPECMAP, &self.specular_map),
            (ids::MAT_SPECMASK, &self.specular_mask),
            (ids::MAT_SHINMAP, &self.shininess_map),
            (ids::MAT_SHINMASK, &self.shininess_mask),
            (ids::MAT_SELFIMAP, &self.self_illum_map),
            (ids::MAT_SELFIMASK, &self.self_illum_mask),
            (ids::MAT_REFLMAP, &self.reflection_map),
            (ids::MAT_REFLMASK, &self.reflection_mask),
        ]
    }

    /// Reads a `MAT_ENTRY` chunk starting at its header.
    pub(crate) fn read(reader: &mut ChunkReader) -> Result<Material, ChunkParseError> {
        let mut chunk = reader.begin_read(Some(ids::MAT_ENTRY))?;
        let mut material = Material::new("");

        while let Some((id, _)) = reader.next_child(&mut chunk)? {
            match id {
                ids::MAT_NAME => {
                    material.name = reader.read_name()?;
                    debug!("material: {}", material.name);
                }
                ids::MAT_AMBIENT => {
                    reader.reset_to_header();
                    material.ambient = reader.read_color_block()?;
                }
                ids::MAT_DIFFUSE => {
                    reader.reset_to_header();
                    material.diffuse = reader.read_color_block()?;
                }
                ids::MAT_SPECULAR => {
                    reader.reset_to_header();
                    material.specular = reader.read_color_block()?;
                }
                ids::MAT_SHININESS => {
                    reader.reset_to_header();
                    material.shininess = reader.read_percentage_block()?;
                }
                ids::MAT_SHIN2PCT => {
                    reader.reset_to_header();
                    material.shin_strength = reader.read_percentage_block()?;
                }
                ids::MAT_TRANSPARENCY => {
                    reader.reset_to_header();
                    material.transparency = reader.read_percentage_block()?;
                }
                ids::MAT_XPFALL => {
                    reader.reset_to_header();
                    material.falloff = reader.read_percentage_block()?;
                }
                ids::MAT_SELF_ILPCT => {
                    reader.reset_to_header();
                    material.self_ilpct = reader.read_percentage_block()?;
                }
                ids::MAT_USE_XPFALL => material.use_falloff = true,
                ids::MAT_REFBLUR => {
                    reader.reset_to_header();
                    material.blur = reader.read_percentage_block()?;
                }
                ids::MAT_USE_REFBLUR => material.use_blur = true,
                ids::MAT_SHADING => material.shading = reader.read::<i16>()?,
                ids::MAT_SELF_ILLUM => material.self_illum = true,
                ids::MAT_TWO_SIDE => material.two_sided = true,
                ids::MAT_DECAL => material.map_decal = true,
                ids::MAT_ADDITIVE => material.additive = true,
                ids::MAT_FACEMAP => material.face_map = true,
                ids::MAT_PHONGSOFT => material.soften = true,
                ids::MAT_WIRE => material.use_wire = true,
                ids::MAT_WIREABS => material.use_wire_abs = true,
                ids::MAT_WIRE_SIZE => material.wire_size = reader.read::<f32>()?,
                ids::MAT_ACUBIC => {
                    reader.read::<i8>()?;
                    material.autorefl_map.level = reader.read::<i8>()?;
                    material.autorefl_map.flags = reader.read::<u16>()?;
                    material.autorefl_map.size = reader.read::<i32>()?;
                    material.autorefl_map.frame_step = reader.read::<i32>()?;
                }
                id => match material.map_mut(id) {
                    Some(map) => {
                        reader.reset_to_header();
                        map.read(reader)?;
                    }
                    None => reader.unknown(id),
                },
            }
        }

        reader.end_read(&chunk);
        Ok(material)
    }

    pub(crate) fn write<W: Write + Seek>(
        &self,
        writer: &mut ChunkWriter<W>,
    ) -> Result<(), ChunkParseError> {
        let mark = writer.begin_write(ids::MAT_ENTRY)?;

        let name = writer.begin_write(ids::MAT_NAME)?;
        writer.write_name(&self.name)?;
        writer.end_write(name)?;

        writer.write_color_block(ids::MAT_AMBIENT, self.ambient)?;
        writer.write_color_block(ids::MAT_DIFFUSE, self.diffuse)?;
        writer.write_color_block(ids::MAT_SPECULAR, self.specular)?;
        writer.write_percentage_block(ids::MAT_SHININESS, self.shininess)?;
        writer.write_percentage_block(ids::MAT_SHIN2PCT, self.shin_strength)?;
        writer.write_percentage_block(ids::MAT_TRANSPARENCY, self.transparency)?;
        writer.write_percentage_block(ids::MAT_XPFALL, self.falloff)?;
        if self.use_falloff {
            writer.write_switch(ids::MAT_USE_XPFALL)?;
        }

        writer.write_header(ids::MAT_SHADING, 8)?;
        writer.write(self.shading)?;

        writer.write_percentage_block(ids::MAT_REFBLUR, self.blur)?;
        if self.use_blur {
            writer.write_switch(ids::MAT_USE_REFBLUR)?;
        }

        for &(id, on) in &[
            (ids::MAT_SELF_ILLUM, self.self_illum),
            (ids::MAT_TWO_SIDE, self.two_sided),
            (ids::MAT_DECAL, self.map_decal),
            (ids::MAT_ADDITIVE, self.additive),
            (ids::MAT_WIRE, self.use_wire),
            (ids::MAT_WIREABS, self.use_wire_abs),
        ] {
            if on {
                writer.write_switch(id)?;
            }
        }

        writer.write_header(ids::MAT_WIRE_SIZE, 10)?;
        writer.write(self.wire_size)?;

        if self.face_map {
            writer.write_switch(ids::MAT_FACEMAP)?;
        }
        if self.soften {
            writer.write_switch(ids::MAT_PHONGSOFT)?;
        }
        writer.write_percentage_block(ids::MAT_SELF_ILPCT, self.self_ilpct)?;

        for (id, map) in self.maps().iter() {
            map.write(*id, writer)?;
        }

        if self.autorefl_map.flags != 0 {
            writer.write_header(ids::MAT_ACUBIC, 18)?;
            writer.write(0i8)?;
            writer.write(self.autorefl_map.level)?;
            writer.write(self.autorefl_map.flags)?;
            writer.write(self.autorefl_map.size)?;
            writer.write(self.autorefl_map.frame_step)?;
        }

        writer.end_write(mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn round_trip(material: &Material) -> Material {
        let mut w = ChunkWriter::new(Cursor::new(Vec::new()));
        material.write(&mut w).unwrap();
        let data = w.into_inner().into_inner();
        let mut r = ChunkReader::new(&data);
        let read = Material::read(&mut r).unwrap();
        assert_eq!(r.tell(), data.len() as u64);
        read
    }

    #[test]
    fn test_defaults_survive() {
        let mut material = Material::new("grey");
        // colours are stored with 8 bits per channel
        material.ambient = Vec3::splat(51.0 / 255.0);
        material.diffuse = Vec3::new(1.0, 0.0, 0.0);
        material.specular = Vec3::ONE;
        material.shininess = 0.25;
        assert_eq!(round_trip(&material), material);
    }

    #[test]
    fn test_switches_and_maps() {
        let mut material = Material::new("brick");
        material.ambient = Vec3::ZERO;
        material.diffuse = Vec3::ZERO;
        material.specular = Vec3::ZERO;
        material.shininess = 0.0;
        material.two_sided = true;
        material.use_wire_abs = true;
        material.soften = true;
        material.shading = shading::METAL;
        material.texture1_map.name = "brick.png".to_string();
        material.texture1_map.flags = TextureMap::MIRROR;
        material.texture1_map.scale = [2.0, 0.5];
        material.texture1_map.tint_r = Vec3::new(1.0, 0.0, 0.0);
        material.autorefl_map = AutoReflMap {
            flags: AutoReflMap::USE_REFL_MAP,
            level: 2,
            size: 128,
            frame_step: 1,
        };

        let read = round_trip(&material);
        assert_eq!(read, material);
        assert!(read.bump_map.name.is_empty());
    }

    #[test]
    fn test_linear_color_preferred() {
        let mut w = ChunkWriter::new(Cursor::new(Vec::new()));
        let mark = w.begin_write(ids::MAT_AMBIENT).unwrap();
        w.write_header(ids::LIN_COLOR_24, 9).unwrap();
        w.write_color_24(Vec3::ONE).unwrap();
        w.write_header(ids::COLOR_24, 9).unwrap();
        w.write_color_24(Vec3::ZERO).unwrap();
        w.end_write(mark).unwrap();
        let data = w.into_inner().into_inner();

        let color = ChunkReader::new(&data).read_color_block().unwrap();
        assert_eq!(color, Vec3::ONE);
    }
}
