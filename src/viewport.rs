use crate::parsers::{
    chunk::{ChunkReader, ChunkWriter},
    ids, primitive, ChunkParseError,
};
use glam::Vec3;
use std::io::{Seek, Write};

/// Editor view kinds.
pub mod view_type {
    pub const NOT_USED: u16 = 0;
    pub const TOP: u16 = 1;
    pub const BOTTOM: u16 = 2;
    pub const LEFT: u16 = 3;
    pub const RIGHT: u16 = 4;
    pub const FRONT: u16 = 5;
    pub const BACK: u16 = 6;
    pub const USER: u16 = 7;
    pub const SPOTLIGHT: u16 = 18;
    pub const CAMERA: u16 = 65535;
}

/// A layout holds at most this many views.
pub const MAX_VIEWS: usize = 32;

/// Camera names in views are stored in a fixed 11 byte field.
const VIEW_CAMERA_LEN: usize = 11;

fn read_camera_name(reader: &mut ChunkReader) -> Result<String, ChunkParseError> {
    let bytes = reader.read_bytes(VIEW_CAMERA_LEN)?;
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    Ok(bytes[..end].iter().map(|&b| char::from(b)).collect())
}

fn write_camera_name<W: Write + Seek>(
    writer: &mut ChunkWriter<W>,
    name: &str,
) -> Result<(), ChunkParseError> {
    let mut encoded = Vec::with_capacity(VIEW_CAMERA_LEN);
    primitive::write_string(name, &mut encoded);
    if encoded.len() > VIEW_CAMERA_LEN {
        return Err(ChunkParseError::StringTooLong {
            offset: writer.tell()?,
            max: VIEW_CAMERA_LEN,
        });
    }
    encoded.resize(VIEW_CAMERA_LEN, 0);
    writer.write_bytes(&encoded)
}

/// One pane of the editor layout.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub kind: u16,
    pub axis_lock: u16,
    pub position: [i16; 2],
    pub size: [i16; 2],
    pub zoom: f32,
    pub center: Vec3,
    pub horiz_angle: f32,
    pub vert_angle: f32,
    /// Name of the camera shown in the view, at most 10 characters. Longer names fail to write.
    pub camera: String,
}

impl Default for View {
    fn default() -> Self {
        View {
            kind: view_type::NOT_USED,
            axis_lock: 0,
            position: [0; 2],
            size: [0; 2],
            zoom: 0.0,
            center: Vec3::ZERO,
            horiz_angle: 0.0,
            vert_angle: 0.0,
            camera: String::new(),
        }
    }
}

impl View {
    fn read(reader: &mut ChunkReader) -> Result<View, ChunkParseError> {
        reader.read::<i16>()?;
        let axis_lock = reader.read::<u16>()?;
        let position = [reader.read::<i16>()?, reader.read::<i16>()?];
        let size = [reader.read::<i16>()?, reader.read::<i16>()?];
        let kind = reader.read::<u16>()?;
        let zoom = reader.read::<f32>()?;
        let center = reader.read_vector()?;
        let horiz_angle = reader.read::<f32>()?;
        let vert_angle = reader.read::<f32>()?;
        let camera = read_camera_name(reader)?;

        Ok(View {
            kind,
            axis_lock,
            position,
            size,
            zoom,
            center,
            horiz_angle,
            vert_angle,
            camera,
        })
    }

    fn write<W: Write + Seek>(&self, writer: &mut ChunkWriter<W>) -> Result<(), ChunkParseError> {
        writer.write_header(ids::VIEWPORT_DATA_3, 55)?;
        writer.write(0i16)?;
        writer.write(self.axis_lock)?;
        writer.write(self.position[0])?;
        writer.write(self.position[1])?;
        writer.write(self.size[0])?;
        writer.write(self.size[1])?;
        writer.write(self.kind)?;
        writer.write(self.zoom)?;
        writer.write_vector(self.center)?;
        writer.write(self.horiz_angle)?;
        writer.write(self.vert_angle)?;
        write_camera_name(writer, &self.camera)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    pub style: u16,
    pub active: i16,
    pub swap: i16,
    pub swap_prior: i16,
    pub swap_view: i16,
    pub position: [u16; 2],
    pub size: [u16; 2],
    pub views: Vec<View>,
}

/// The view restored when the file is opened.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultView {
    pub kind: u16,
    pub position: Vec3,
    pub width: f32,
    pub horiz_angle: f32,
    pub vert_angle: f32,
    pub roll_angle: f32,
    pub camera: String,
}

impl Default for DefaultView {
    fn default() -> Self {
        DefaultView {
            kind: view_type::NOT_USED,
            position: Vec3::ZERO,
            width: 0.0,
            horiz_angle: 0.0,
            vert_angle: 0.0,
            roll_angle: 0.0,
            camera: String::new(),
        }
    }
}

fn ortho_view_id(kind: u16) -> Option<u16> {
    match kind {
        view_type::TOP => Some(ids::VIEW_TOP),
        view_type::BOTTOM => Some(ids::VIEW_BOTTOM),
        view_type::LEFT => Some(ids::VIEW_LEFT),
        view_type::RIGHT => Some(ids::VIEW_RIGHT),
        view_type::FRONT => Some(ids::VIEW_FRONT),
        view_type::BACK => Some(ids::VIEW_BACK),
        _ => None,
    }
}

/// Editor state: the window layout and the default view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Viewport {
    pub layout: Layout,
    pub default_view: DefaultView,
}

impl Viewport {
    /// Reads a `VIEWPORT_LAYOUT` or `DEFAULT_VIEW` chunk, starting at its header.
    pub(crate) fn read(&mut self, reader: &mut ChunkReader) -> Result<(), ChunkParseError> {
        let mut chunk = reader.begin_read(None)?;

        match chunk.id {
            ids::VIEWPORT_LAYOUT => {
                let layout = &mut self.layout;
                layout.views.clear();
                layout.style = reader.read::<u16>()?;
                layout.active = reader.read::<i16>()?;
                reader.read::<i16>()?;
                layout.swap = reader.read::<i16>()?;
                reader.read::<i16>()?;
                layout.swap_prior = reader.read::<i16>()?;
                layout.swap_view = reader.read::<i16>()?;
                reader.read_tell(&mut chunk);

                while let Some((id, _)) = reader.next_child(&mut chunk)? {
                    match id {
                        ids::VIEWPORT_SIZE => {
                            layout.position = [reader.read::<u16>()?, reader.read::<u16>()?];
                            layout.size = [reader.read::<u16>()?, reader.read::<u16>()?];
                        }
                        ids::VIEWPORT_DATA_3 => {
                            if layout.views.len() < MAX_VIEWS {
                                let view = View::read(reader)?;
                                layout.views.push(view);
                            }
                        }
                        // superseded by VIEWPORT_DATA_3
                        ids::VIEWPORT_DATA => {}
                        _ => reader.unknown(id),
                    }
                }
            }
            ids::DEFAULT_VIEW => {
                let view = &mut self.default_view;
                while let Some((id, _)) = reader.next_child(&mut chunk)? {
                    match id {
                        ids::VIEW_TOP
                        | ids::VIEW_BOTTOM
                        | ids::VIEW_LEFT
                        | ids::VIEW_RIGHT
                        | ids::VIEW_FRONT
                        | ids::VIEW_BACK => {
                            view.kind = match id {
                                ids::VIEW_TOP => view_type::TOP,
                                ids::VIEW_BOTTOM => view_type::BOTTOM,
                                ids::VIEW_LEFT => view_type::LEFT,
                                ids::VIEW_RIGHT => view_type::RIGHT,
                                ids::VIEW_FRONT => view_type::FRONT,
                                _ => view_type::BACK,
                            };
                            view.position = reader.read_vector()?;
                            view.width = reader.read::<f32>()?;
                        }
                        ids::VIEW_USER => {
                            view.kind = view_type::USER;
                            view.position = reader.read_vector()?;
                            view.width = reader.read::<f32>()?;
                            view.horiz_angle = reader.read::<f32>()?;
                            view.vert_angle = reader.read::<f32>()?;
                            view.roll_angle = reader.read::<f32>()?;
                        }
                        ids::VIEW_CAMERA => {
                            view.kind = view_type::CAMERA;
                            view.camera = read_camera_name(reader)?;
                        }
                        _ => reader.unknown(id),
                    }
                }
            }
            id => reader.unknown(id),
        }

        reader.end_read(&chunk);
        Ok(())
    }

    pub(crate) fn write<W: Write + Seek>(
        &self,
        writer: &mut ChunkWriter<W>,
    ) -> Result<(), ChunkParseError> {
        let layout = &self.layout;
        if !layout.views.is_empty() {
            let mark = writer.begin_write(ids::VIEWPORT_LAYOUT)?;
            writer.write(layout.style)?;
            writer.write(layout.active)?;
            writer.write(0i16)?;
            writer.write(layout.swap)?;
            writer.write(0i16)?;
            writer.write(layout.swap_prior)?;
            writer.write(layout.swap_view)?;

            writer.write_header(ids::VIEWPORT_SIZE, 14)?;
            for v in layout.position.iter().chain(layout.size.iter()) {
                writer.write(*v)?;
            }

            for view in layout.views.iter().take(MAX_VIEWS) {
                view.write(writer)?;
            }
            writer.end_write(mark)?;
        }

        let view = &self.default_view;
        if view.kind != view_type::NOT_USED {
            let mark = writer.begin_write(ids::DEFAULT_VIEW)?;
            match view.kind {
                view_type::USER => {
                    writer.write_header(ids::VIEW_USER, 34)?;
                    writer.write_vector(view.position)?;
                    writer.write(view.width)?;
                    writer.write(view.horiz_angle)?;
                    writer.write(view.vert_angle)?;
                    writer.write(view.roll_angle)?;
                }
                view_type::CAMERA => {
                    writer.write_header(ids::VIEW_CAMERA, 17)?;
                    write_camera_name(writer, &view.camera)?;
                }
                kind => {
                    if let Some(id) = ortho_view_id(kind) {
                        writer.write_header(id, 22)?;
                        writer.write_vector(view.position)?;
                        writer.write(view.width)?;
                    }
                }
            }
            writer.end_write(mark)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn round_trip(viewport: &Viewport) -> Viewport {
        let mut w = ChunkWriter::new(Cursor::new(Vec::new()));
        viewport.write(&mut w).unwrap();
        let data = w.into_inner().into_inner();

        let mut r = ChunkReader::new(&data);
        let mut read = Viewport::default();
        while (r.tell() as usize) < data.len() {
            read.read(&mut r).unwrap();
        }
        read
    }

    #[test]
    fn test_empty_viewport_writes_nothing() {
        let mut w = ChunkWriter::new(Cursor::new(Vec::new()));
        Viewport::default().write(&mut w).unwrap();
        assert!(w.into_inner().into_inner().is_empty());
    }

    #[test]
    fn test_layout_views() {
        let mut viewport = Viewport::default();
        viewport.layout.style = 3;
        viewport.layout.active = 1;
        viewport.layout.size = [640, 480];
        viewport.layout.views.push(View {
            kind: view_type::TOP,
            size: [320, 240],
            zoom: 2.0,
            center: Vec3::new(1.0, 2.0, 3.0),
            ..View::default()
        });
        viewport.layout.views.push(View {
            kind: view_type::CAMERA,
            position: [320, 0],
            size: [320, 240],
            camera: "Camera01".to_string(),
            ..View::default()
        });
        viewport.default_view = DefaultView {
            kind: view_type::USER,
            position: Vec3::new(0.0, -10.0, 5.0),
            width: 200.0,
            horiz_angle: 30.0,
            vert_angle: 20.0,
            ..DefaultView::default()
        };

        assert_eq!(round_trip(&viewport), viewport);
    }

    #[test]
    fn test_camera_name_fills_the_field() {
        let mut viewport = Viewport::default();
        viewport.default_view.kind = view_type::CAMERA;
        viewport.default_view.camera = "TenLetters".to_string();
        assert_eq!(round_trip(&viewport), viewport);
    }

    #[test]
    fn test_long_camera_name_is_an_error() {
        let mut viewport = Viewport::default();
        viewport.default_view.kind = view_type::CAMERA;
        viewport.default_view.camera = "AVeryLongCameraName".to_string();

        let mut w = ChunkWriter::new(Cursor::new(Vec::new()));
        assert!(matches!(
            viewport.write(&mut w),
            Err(ChunkParseError::StringTooLong { max: 11, .. })
        ));

        viewport.default_view.camera.clear();
        viewport.layout.views.push(View {
            kind: view_type::CAMERA,
            camera: "Camera_Number_1".to_string(),
            ..View::default()
        });
        let mut w = ChunkWriter::new(Cursor::new(Vec::new()));
        assert!(viewport.write(&mut w).is_err());
    }
}
