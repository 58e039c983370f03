use std::fmt;

use derive_new::new;
use enum_map::Enum;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::EnumIter;

use crate::side::Side;


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Enum, EnumIter)]
pub enum PieceKind {
    Fu, // pawn
    Ky, // lance
    Ke, // knight
    Gi, // silver
    Ki, // gold
    Ka, // bishop
    Hi, // rook
    Ou, // king
    To, // promoted pawn
    Ny, // promoted lance
    Nk, // promoted knight
    Ng, // promoted silver
    Um, // promoted bishop (horse)
    Ry, // promoted rook (dragon)
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, new)]
pub struct PieceCode {
    pub kind: PieceKind,
    pub side: Side,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PieceCodeError {
    pub code: String,
}

impl fmt::Display for PieceCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid piece code \"{}\"", self.code)
    }
}

impl std::error::Error for PieceCodeError {}

impl PieceKind {
    // Uppercase two-letter code shared with the server.
    pub fn to_code(self) -> &'static str {
        use PieceKind::*;
        match self {
            Fu => "FU",
            Ky => "KY",
            Ke => "KE",
            Gi => "GI",
            Ki => "KI",
            Ka => "KA",
            Hi => "HI",
            Ou => "OU",
            To => "TO",
            Ny => "NY",
            Nk => "NK",
            Ng => "NG",
            Um => "UM",
            Ry => "RY",
        }
    }

    // Case-insensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        use PieceKind::*;
        Some(match code.to_ascii_uppercase().as_str() {
            "FU" => Fu,
            "KY" => Ky,
            "KE" => Ke,
            "GI" => Gi,
            "KI" => Ki,
            "KA" => Ka,
            "HI" => Hi,
            "OU" => Ou,
            "TO" => To,
            "NY" => Ny,
            "NK" => Nk,
            "NG" => Ng,
            "UM" => Um,
            "RY" => Ry,
            _ => return None,
        })
    }
}

impl PieceCode {
    pub fn parse(code: &str) -> Result<Self, PieceCodeError> {
        let err = || PieceCodeError { code: code.to_owned() };
        let kind = PieceKind::from_code(code).ok_or_else(err)?;
        let side = if code.chars().all(|ch| ch.is_ascii_uppercase()) {
            Side::Upper
        } else if code.chars().all(|ch| ch.is_ascii_lowercase()) {
            Side::Lower
        } else {
            return Err(err());
        };
        Ok(PieceCode { kind, side })
    }

    pub fn to_code(self) -> String {
        match self.side {
            Side::Upper => self.kind.to_code().to_owned(),
            Side::Lower => self.kind.to_code().to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for PieceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.to_code()) }
}

impl Serialize for PieceCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_code())
    }
}

impl<'de> Deserialize<'de> for PieceCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        PieceCode::parse(&code).map_err(serde::de::Error::custom)
    }
}

// Image served by the frontend host. The lower king traditionally uses a different character.
pub fn piece_image_path(piece: PieceCode) -> String {
    if piece.kind == PieceKind::Ou && piece.side == Side::Lower {
        return "/pieces/gyoku.png".to_owned();
    }
    format!("/pieces/{}.png", piece.kind.to_code().to_ascii_lowercase())
}

pub fn piece_to_kanji(piece: PieceCode) -> char {
    use PieceKind::*;
    match piece.kind {
        Fu => '歩',
        Ky => '香',
        Ke => '桂',
        Gi => '銀',
        Ki => '金',
        Ka => '角',
        Hi => '飛',
        Ou => match piece.side {
            Side::Upper => '王',
            Side::Lower => '玉',
        },
        To => 'と',
        Ny => '杏',
        Nk => '圭',
        Ng => '全',
        Um => '馬',
        Ry => '龍',
    }
}
