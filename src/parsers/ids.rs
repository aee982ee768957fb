//! Chunk identifiers of the .3ds format, as named by the 3D Studio file toolkit.

pub const NULL_CHUNK: u16 = 0x0000;
pub const M3D_VERSION: u16 = 0x0002;
pub const M3D_KFVERSION: u16 = 0x0005;
pub const COLOR_F: u16 = 0x0010;
pub const COLOR_24: u16 = 0x0011;
pub const LIN_COLOR_24: u16 = 0x0012;
pub const LIN_COLOR_F: u16 = 0x0013;
pub const INT_PERCENTAGE: u16 = 0x0030;
pub const FLOAT_PERCENTAGE: u16 = 0x0031;
pub const MASTER_SCALE: u16 = 0x0100;

pub const BIT_MAP: u16 = 0x1100;
pub const USE_BIT_MAP: u16 = 0x1101;
pub const SOLID_BGND: u16 = 0x1200;
pub const USE_SOLID_BGND: u16 = 0x1201;
pub const V_GRADIENT: u16 = 0x1300;
pub const USE_V_GRADIENT: u16 = 0x1301;
pub const LO_SHADOW_BIAS: u16 = 0x1400;
pub const HI_SHADOW_BIAS: u16 = 0x1410;
pub const SHADOW_MAP_SIZE: u16 = 0x1420;
pub const SHADOW_SAMPLES: u16 = 0x1430;
pub const SHADOW_RANGE: u16 = 0x1440;
pub const SHADOW_FILTER: u16 = 0x1450;
pub const RAY_BIAS: u16 = 0x1460;
pub const O_CONSTS: u16 = 0x1500;
pub const AMBIENT_LIGHT: u16 = 0x2100;
pub const FOG: u16 = 0x2200;
pub const USE_FOG: u16 = 0x2201;
pub const FOG_BGND: u16 = 0x2210;
pub const DISTANCE_CUE: u16 = 0x2300;
pub const USE_DISTANCE_CUE: u16 = 0x2301;
pub const LAYER_FOG: u16 = 0x2302;
pub const USE_LAYER_FOG: u16 = 0x2303;
pub const DCUE_BGND: u16 = 0x2310;

pub const DEFAULT_VIEW: u16 = 0x3000;
pub const VIEW_TOP: u16 = 0x3010;
pub const VIEW_BOTTOM: u16 = 0x3020;
pub const VIEW_LEFT: u16 = 0x3030;
pub const VIEW_RIGHT: u16 = 0x3040;
pub const VIEW_FRONT: u16 = 0x3050;
pub const VIEW_BACK: u16 = 0x3060;
pub const VIEW_USER: u16 = 0x3070;
pub const VIEW_CAMERA: u16 = 0x3080;

pub const MDATA: u16 = 0x3D3D;
pub const MESH_VERSION: u16 = 0x3D3E;
pub const MLIBMAGIC: u16 = 0x3DAA;
pub const M3DMAGIC: u16 = 0x4D4D;
pub const CMAGIC: u16 = 0xC23D;

pub const NAMED_OBJECT: u16 = 0x4000;
pub const OBJ_HIDDEN: u16 = 0x4010;
pub const OBJ_VIS_LOFTER: u16 = 0x4011;
pub const OBJ_DOESNT_CAST: u16 = 0x4012;
pub const OBJ_MATTE: u16 = 0x4013;
pub const OBJ_FAST: u16 = 0x4014;
pub const OBJ_PROCEDURAL: u16 = 0x4015;
pub const OBJ_FROZEN: u16 = 0x4016;
pub const OBJ_DONT_RCVSHADOW: u16 = 0x4017;

pub const N_TRI_OBJECT: u16 = 0x4100;
pub const POINT_ARRAY: u16 = 0x4110;
pub const POINT_FLAG_ARRAY: u16 = 0x4111;
pub const FACE_ARRAY: u16 = 0x4120;
pub const MSH_MAT_GROUP: u16 = 0x4130;
pub const TEX_VERTS: u16 = 0x4140;
pub const SMOOTH_GROUP: u16 = 0x4150;
pub const MESH_MATRIX: u16 = 0x4160;
pub const MESH_COLOR: u16 = 0x4165;
pub const MESH_TEXTURE_INFO: u16 = 0x4170;
pub const MSH_BOXMAP: u16 = 0x4190;

pub const N_DIRECT_LIGHT: u16 = 0x4600;
pub const DL_SPOTLIGHT: u16 = 0x4610;
pub const DL_OFF: u16 = 0x4620;
pub const DL_ATTENUATE: u16 = 0x4625;
pub const DL_RAYSHAD: u16 = 0x4627;
pub const DL_SHADOWED: u16 = 0x4630;
pub const DL_LOCAL_SHADOW2: u16 = 0x4641;
pub const DL_SEE_CONE: u16 = 0x4650;
pub const DL_SPOT_RECTANGULAR: u16 = 0x4651;
pub const DL_SPOT_OVERSHOOT: u16 = 0x4652;
pub const DL_SPOT_PROJECTOR: u16 = 0x4653;
pub const DL_EXCLUDE: u16 = 0x4654;
pub const DL_SPOT_ROLL: u16 = 0x4656;
pub const DL_SPOT_ASPECT: u16 = 0x4657;
pub const DL_RAY_BIAS: u16 = 0x4658;
pub const DL_INNER_RANGE: u16 = 0x4659;
pub const DL_OUTER_RANGE: u16 = 0x465A;
pub const DL_MULTIPLIER: u16 = 0x465B;

pub const N_CAMERA: u16 = 0x4700;
pub const CAM_SEE_CONE: u16 = 0x4710;
pub const CAM_RANGES: u16 = 0x4720;

pub const VIEWPORT_LAYOUT: u16 = 0x7001;
pub const VIEWPORT_DATA: u16 = 0x7011;
pub const VIEWPORT_DATA_3: u16 = 0x7012;
pub const VIEWPORT_SIZE: u16 = 0x7020;

pub const MAT_NAME: u16 = 0xA000;
pub const MAT_AMBIENT: u16 = 0xA010;
pub const MAT_DIFFUSE: u16 = 0xA020;
pub const MAT_SPECULAR: u16 = 0xA030;
pub const MAT_SHININESS: u16 = 0xA040;
pub const MAT_SHIN2PCT: u16 = 0xA041;
pub const MAT_TRANSPARENCY: u16 = 0xA050;
pub const MAT_XPFALL: u16 = 0xA052;
pub const MAT_REFBLUR: u16 = 0xA053;
pub const MAT_SELF_ILLUM: u16 = 0xA080;
pub const MAT_TWO_SIDE: u16 = 0xA081;
pub const MAT_DECAL: u16 = 0xA082;
pub const MAT_ADDITIVE: u16 = 0xA083;
pub const MAT_SELF_ILPCT: u16 = 0xA084;
pub const MAT_WIRE: u16 = 0xA085;
pub const MAT_WIRE_SIZE: u16 = 0xA087;
pub const MAT_FACEMAP: u16 = 0xA088;
pub const MAT_PHONGSOFT: u16 = 0xA08C;
pub const MAT_WIREABS: u16 = 0xA08E;
pub const MAT_SHADING: u16 = 0xA100;
pub const MAT_TEXMAP: u16 = 0xA200;
pub const MAT_SPECMAP: u16 = 0xA204;
pub const MAT_OPACMAP: u16 = 0xA210;
pub const MAT_REFLMAP: u16 = 0xA220;
pub const MAT_BUMPMAP: u16 = 0xA230;
pub const MAT_USE_XPFALL: u16 = 0xA240;
pub const MAT_USE_REFBLUR: u16 = 0xA250;
pub const MAT_MAPNAME: u16 = 0xA300;
pub const MAT_ACUBIC: u16 = 0xA310;
pub const MAT_TEX2MAP: u16 = 0xA33A;
pub const MAT_SHINMAP: u16 = 0xA33C;
pub const MAT_SELFIMAP: u16 = 0xA33D;
pub const MAT_TEXMASK: u16 = 0xA33E;
pub const MAT_TEX2MASK: u16 = 0xA340;
pub const MAT_OPACMASK: u16 = 0xA342;
pub const MAT_BUMPMASK: u16 = 0xA344;
pub const MAT_SHINMASK: u16 = 0xA346;
pub const MAT_SPECMASK: u16 = 0xA348;
pub const MAT_SELFIMASK: u16 = 0xA34A;
pub const MAT_REFLMASK: u16 = 0xA34C;
pub const MAT_MAP_TILING: u16 = 0xA351;
pub const MAT_MAP_TEXBLUR: u16 = 0xA353;
pub const MAT_MAP_USCALE: u16 = 0xA354;
pub const MAT_MAP_VSCALE: u16 = 0xA356;
pub const MAT_MAP_UOFFSET: u16 = 0xA358;
pub const MAT_MAP_VOFFSET: u16 = 0xA35A;
pub const MAT_MAP_ANG: u16 = 0xA35C;
pub const MAT_MAP_COL1: u16 = 0xA360;
pub const MAT_MAP_COL2: u16 = 0xA362;
pub const MAT_MAP_RCOL: u16 = 0xA364;
pub const MAT_MAP_GCOL: u16 = 0xA366;
pub const MAT_MAP_BCOL: u16 = 0xA368;
pub const MAT_ENTRY: u16 = 0xAFFF;

pub const KFDATA: u16 = 0xB000;
pub const AMBIENT_NODE_TAG: u16 = 0xB001;
pub const OBJECT_NODE_TAG: u16 = 0xB002;
pub const CAMERA_NODE_TAG: u16 = 0xB003;
pub const TARGET_NODE_TAG: u16 = 0xB004;
pub const LIGHT_NODE_TAG: u16 = 0xB005;
pub const L_TARGET_NODE_TAG: u16 = 0xB006;
pub const SPOTLIGHT_NODE_TAG: u16 = 0xB007;
pub const KFSEG: u16 = 0xB008;
pub const KFCURTIME: u16 = 0xB009;
pub const KFHDR: u16 = 0xB00A;
pub const NODE_HDR: u16 = 0xB010;
pub const INSTANCE_NAME: u16 = 0xB011;
pub const PRESCALE: u16 = 0xB012;
pub const PIVOT: u16 = 0xB013;
pub const BOUNDBOX: u16 = 0xB014;
pub const MORPH_SMOOTH: u16 = 0xB015;
pub const POS_TRACK_TAG: u16 = 0xB020;
pub const ROT_TRACK_TAG: u16 = 0xB021;
pub const SCL_TRACK_TAG: u16 = 0xB022;
pub const FOV_TRACK_TAG: u16 = 0xB023;
pub const ROLL_TRACK_TAG: u16 = 0xB024;
pub const COL_TRACK_TAG: u16 = 0xB025;
pub const MORPH_TRACK_TAG: u16 = 0xB026;
pub const HOT_TRACK_TAG: u16 = 0xB027;
pub const FALL_TRACK_TAG: u16 = 0xB028;
pub const HIDE_TRACK_TAG: u16 = 0xB029;
pub const NODE_ID: u16 = 0xB030;

/// Returns the toolkit name of a chunk id, or `"***UNKNOWN***"`.
pub fn chunk_name(id: u16) -> &'static str {
    match id {
        NULL_CHUNK => "NULL_CHUNK",
        M3D_VERSION => "M3D_VERSION",
        M3D_KFVERSION => "M3D_KFVERSION",
        COLOR_F => "COLOR_F",
        COLOR_24 => "COLOR_24",
        LIN_COLOR_24 => "LIN_COLOR_24",
        LIN_COLOR_F => "LIN_COLOR_F",
        INT_PERCENTAGE => "INT_PERCENTAGE",
        FLOAT_PERCENTAGE => "FLOAT_PERCENTAGE",
        MASTER_SCALE => "MASTER_SCALE",
        BIT_MAP => "BIT_MAP",
        USE_BIT_MAP => "USE_BIT_MAP",
        SOLID_BGND => "SOLID_BGND",
        USE_SOLID_BGND => "USE_SOLID_BGND",
        V_GRADIENT => "V_GRADIENT",
        USE_V_GRADIENT => "USE_V_GRADIENT",
        LO_SHADOW_BIAS => "LO_SHADOW_BIAS",
        HI_SHADOW_BIAS => "HI_SHADOW_BIAS",
        SHADOW_MAP_SIZE => "SHADOW_MAP_SIZE",
        SHADOW_SAMPLES => "SHADOW_SAMPLES",
        SHADOW_RANGE => "SHADOW_RANGE",
        SHADOW_FILTER => "SHADOW_FILTER",
        RAY_BIAS => "RAY_BIAS",
        O_CONSTS => "O_CONSTS",
        AMBIENT_LIGHT => "AMBIENT_LIGHT",
        FOG => "FOG",
        USE_FOG => "USE_FOG",
        FOG_BGND => "FOG_BGND",
        DISTANCE_CUE => "DISTANCE_CUE",
        USE_DISTANCE_CUE => "USE_DISTANCE_CUE",
        LAYER_FOG => "LAYER_FOG",
        USE_LAYER_FOG => "USE_LAYER_FOG",
        DCUE_BGND => "DCUE_BGND",
        DEFAULT_VIEW => "DEFAULT_VIEW",
        VIEW_TOP => "VIEW_TOP",
        VIEW_BOTTOM => "VIEW_BOTTOM",
        VIEW_LEFT => "VIEW_LEFT",
        VIEW_RIGHT => "VIEW_RIGHT",
        VIEW_FRONT => "VIEW_FRONT",
        VIEW_BACK => "VIEW_BACK",
        VIEW_USER => "VIEW_USER",
        VIEW_CAMERA => "VIEW_CAMERA",
        MDATA => "MDATA",
        MESH_VERSION => "MESH_VERSION",
        MLIBMAGIC => "MLIBMAGIC",
        M3DMAGIC => "M3DMAGIC",
        CMAGIC => "CMAGIC",
        NAMED_OBJECT => "NAMED_OBJECT",
        OBJ_HIDDEN => "OBJ_HIDDEN",
        OBJ_VIS_LOFTER => "OBJ_VIS_LOFTER",
        OBJ_DOESNT_CAST => "OBJ_DOESNT_CAST",
        OBJ_MATTE => "OBJ_MATTE",
        OBJ_FAST => "OBJ_FAST",
        OBJ_PROCEDURAL => "OBJ_PROCEDURAL",
        OBJ_FROZEN => "OBJ_FROZEN",
        OBJ_DONT_RCVSHADOW => "OBJ_DONT_RCVSHADOW",
        N_TRI_OBJECT => "N_TRI_OBJECT",
        POINT_ARRAY => "POINT_ARRAY",
        POINT_FLAG_ARRAY => "POINT_FLAG_ARRAY",
        FACE_ARRAY => "FACE_ARRAY",
        MSH_MAT_GROUP => "MSH_MAT_GROUP",
        TEX_VERTS => "TEX_VERTS",
        SMOOTH_GROUP => "SMOOTH_GROUP",
        MESH_MATRIX => "MESH_MATRIX",
        MESH_COLOR => "MESH_COLOR",
        MESH_TEXTURE_INFO => "MESH_TEXTURE_INFO",
        MSH_BOXMAP => "MSH_BOXMAP",
        N_DIRECT_LIGHT => "N_DIRECT_LIGHT",
        DL_SPOTLIGHT => "DL_SPOTLIGHT",
        DL_OFF => "DL_OFF",
        DL_ATTENUATE => "DL_ATTENUATE",
        DL_RAYSHAD => "DL_RAYSHAD",
        DL_SHADOWED => "DL_SHADOWED",
        DL_LOCAL_SHADOW2 => "DL_LOCAL_SHADOW2",
        DL_SEE_CONE => "DL_SEE_CONE",
        DL_SPOT_RECTANGULAR => "DL_SPOT_RECTANGULAR",
        DL_SPOT_OVERSHOOT => "DL_SPOT_OVERSHOOT",
        DL_SPOT_PROJECTOR => "DL_SPOT_PROJECTOR",
        DL_EXCLUDE => "DL_EXCLUDE",
        DL_SPOT_ROLL => "DL_SPOT_ROLL",
        DL_SPOT_ASPECT => "DL_SPOT_ASPECT",
        DL_RAY_BIAS => "DL_RAY_BIAS",
        DL_INNER_RANGE => "DL_INNER_RANGE",
        DL_OUTER_RANGE => "DL_OUTER_RANGE",
        DL_MULTIPLIER => "DL_MULTIPLIER",
        N_CAMERA => "N_CAMERA",
        CAM_SEE_CONE => "CAM_SEE_CONE",
        CAM_RANGES => "CAM_RANGES",
        VIEWPORT_LAYOUT => "VIEWPORT_LAYOUT",
        VIEWPORT_DATA => "VIEWPORT_DATA",
        VIEWPORT_DATA_3 => "VIEWPORT_DATA_3",
        VIEWPORT_SIZE => "VIEWPORT_SIZE",
        MAT_NAME => "MAT_NAME",
        MAT_AMBIENT => "MAT_AMBIENT",
        MAT_DIFFUSE => "MAT_DIFFUSE",
        MAT_SPECULAR => "MAT_SPECULAR",
        MAT_SHININESS => "MAT_SHININESS",
        MAT_SHIN2PCT => "MAT_SHIN2PCT",
        MAT_TRANSPARENCY => "MAT_TRANSPARENCY",
        MAT_XPFALL => "MAT_XPFALL",
        MAT_REFBLUR => "MAT_REFBLUR",
        MAT_SELF_ILLUM => "MAT_SELF_ILLUM",
        MAT_TWO_SIDE => "MAT_TWO_SIDE",
        MAT_DECAL => "MAT_DECAL",
        MAT_ADDITIVE => "MAT_ADDITIVE",
        MAT_SELF_ILPCT => "MAT_SELF_ILPCT",
        MAT_WIRE => "MAT_WIRE",
        MAT_WIRE_SIZE => "MAT_WIRE_SIZE",
        MAT_FACEMAP => "MAT_FACEMAP",
        MAT_PHONGSOFT => "MAT_PHONGSOFT",
        MAT_WIREABS => "MAT_WIREABS",
        MAT_SHADING => "MAT_SHADING",
        MAT_TEXMAP => "MAT_TEXMAP",
        MAT_SPECMAP => "MAT_SPECMAP",
        MAT_OPACMAP => "MAT_OPACMAP",
        MAT_REFLMAP => "MAT_REFLMAP",
        MAT_BUMPMAP => "MAT_BUMPMAP",
        MAT_USE_XPFALL => "MAT_USE_XPFALL",
        MAT_USE_REFBLUR => "MAT_USE_REFBLUR",
        MAT_MAPNAME => "MAT_MAPNAME",
        MAT_ACUBIC => "MAT_ACUBIC",
        MAT_TEX2MAP => "MAT_TEX2MAP",
        MAT_SHINMAP => "MAT_SHINMAP",
        MAT_SELFIMAP => "MAT_SELFIMAP",
        MAT_TEXMASK => "MAT_TEXMASK",
        MAT_TEX2MASK => "MAT_TEX2MASK",
        MAT_OPACMASK => "MAT_OPACMASK",
        MAT_BUMPMASK => "MAT_BUMPMASK",
        MAT_SHINMASK => "MAT_SHINMASK",
        MAT_SPECMASK => "MAT_SPECMASK",
        MAT_SELFIMASK => "MAT_SELFIMASK",
        MAT_REFLMASK => "MAT_REFLMASK",
        MAT_MAP_TILING => "MAT_MAP_TILING",
        MAT_MAP_TEXBLUR => "MAT_MAP_TEXBLUR",
        MAT_MAP_USCALE => "MAT_MAP_USCALE",
        MAT_MAP_VSCALE => "MAT_MAP_VSCALE",
        MAT_MAP_UOFFSET => "MAT_MAP_UOFFSET",
        MAT_MAP_VOFFSET => "MAT_MAP_VOFFSET",
        MAT_MAP_ANG => "MAT_MAP_ANG",
        MAT_MAP_COL1 => "MAT_MAP_COL1",
        MAT_MAP_COL2 => "MAT_MAP_COL2",
        MAT_MAP_RCOL => "MAT_MAP_RCOL",
        MAT_MAP_GCOL => "MAT_MAP_GCOL",
        MAT_MAP_BCOL => "MAT_MAP_BCOL",
        MAT_ENTRY => "MAT_ENTRY",
        KFDATA => "KFDATA",
        AMBIENT_NODE_TAG => "AMBIENT_NODE_TAG",
        OBJECT_NODE_TAG => "OBJECT_NODE_TAG",
        CAMERA_NODE_TAG => "CAMERA_NODE_TAG",
        TARGET_NODE_TAG => "TARGET_NODE_TAG",
        LIGHT_NODE_TAG => "LIGHT_NODE_TAG",
        L_TARGET_NODE_TAG => "L_TARGET_NODE_TAG",
        SPOTLIGHT_NODE_TAG => "SPOTLIGHT_NODE_TAG",
        KFSEG => "KFSEG",
        KFCURTIME => "KFCURTIME",
        KFHDR => "KFHDR",
        NODE_HDR => "NODE_HDR",
        INSTANCE_NAME => "INSTANCE_NAME",
        PRESCALE => "PRESCALE",
        PIVOT => "PIVOT",
        BOUNDBOX => "BOUNDBOX",
        MORPH_SMOOTH => "MORPH_SMOOTH",
        POS_TRACK_TAG => "POS_TRACK_TAG",
        ROT_TRACK_TAG => "ROT_TRACK_TAG",
        SCL_TRACK_TAG => "SCL_TRACK_TAG",
        FOV_TRACK_TAG => "FOV_TRACK_TAG",
        ROLL_TRACK_TAG => "ROLL_TRACK_TAG",
        COL_TRACK_TAG => "COL_TRACK_TAG",
        MORPH_TRACK_TAG => "MORPH_TRACK_TAG",
        HOT_TRACK_TAG => "HOT_TRACK_TAG",
        FALL_TRACK_TAG => "FALL_TRACK_TAG",
        HIDE_TRACK_TAG => "HIDE_TRACK_TAG",
        NODE_ID => "NODE_ID",
        _ => "***UNKNOWN***",
    }
}
